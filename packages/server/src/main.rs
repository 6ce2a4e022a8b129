#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Wind map API server binary.
//!
//! Reads configuration from the TOML file named by `WIND_MAP_CONFIG` (if
//! set), applies environment overrides, and serves the API.

use std::path::PathBuf;

use wind_map_config::DashboardConfig;

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config_path = std::env::var("WIND_MAP_CONFIG").ok().map(PathBuf::from);
    let config = DashboardConfig::resolve(config_path.as_deref())?;

    wind_map_server::run_server(config).await?;

    Ok(())
}

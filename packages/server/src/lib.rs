#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the wind map dashboard.
//!
//! Loads the turbine and farm tables once at startup, materializes their
//! rows, and answers every filter request from those immutable records.
//! Requests share nothing mutable, so workers filter concurrently without
//! coordination.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use wind_map_config::{ConfigError, DashboardConfig, PosterConfig, SliderConfig};
use wind_map_filter::Dataset;
use wind_map_filter_models::FilterOptions;
use wind_map_table::TableError;

/// Errors that can prevent the server from starting.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The input tables could not be loaded.
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// The HTTP server failed to bind or run.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shared application state.
pub struct AppState {
    /// Materialized turbine and farm records.
    pub dataset: Arc<Dataset>,
    /// Control options derived from the records.
    pub options: Arc<FilterOptions>,
    /// Initial slider positions.
    pub sliders: SliderConfig,
    /// Default poster grid.
    pub poster: PosterConfig,
}

impl AppState {
    /// Builds the state for a loaded dataset.
    #[must_use]
    pub fn new(dataset: Dataset, config: &DashboardConfig) -> Self {
        let options = dataset.options();
        Self {
            dataset: Arc::new(dataset),
            options: Arc::new(options),
            sliders: config.sliders,
            poster: config.poster,
        }
    }
}

/// Registers the `/api` routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health", web::get().to(handlers::health))
            .route("/dataset", web::get().to(handlers::dataset))
            .route("/options", web::get().to(handlers::options))
            .route("/criteria", web::get().to(handlers::initial_criteria))
            .route("/poster", web::get().to(handlers::poster))
            .route("/filter", web::post().to(handlers::filter))
            .route("/checklist", web::post().to(handlers::checklist))
            .route("/notice", web::post().to(handlers::notice)),
    );
}

/// Starts the wind map API server.
///
/// Loads both tables named in `config`, then serves the API until the
/// server is stopped. The caller provides the async runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an error if a table cannot be loaded or the HTTP server fails
/// to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: DashboardConfig) -> Result<(), ServerError> {
    log::info!(
        "Loading tables {} and {}...",
        config.data.turbine_table.display(),
        config.data.farm_table.display()
    );
    let dataset = Dataset::load(&config.data.turbine_table, &config.data.farm_table)?;

    let state = web::Data::new(AppState::new(dataset, &config));
    log::info!(
        "Serving {} rows ({} countries selectable)",
        state.dataset.row_count(),
        state.options.countries.len()
    );

    let bind_addr = config.server.bind_addr.clone();
    let port = config.server.port;
    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((bind_addr, port))?
    .run()
    .await?;

    Ok(())
}

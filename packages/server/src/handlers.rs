//! HTTP handler functions for the wind map API.

use actix_web::{HttpResponse, web};
use wind_map_filter::{notice::filter_notice, selection::sync_checklist};
use wind_map_filter_models::{ChecklistRequest, FilterCriteria, NoticeRequest, NoticeResponse};
use wind_map_server_models::{ApiDatasetSummary, ApiError, ApiHealth};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/dataset`
///
/// Reports how many rows the loaded tables hold.
pub async fn dataset(state: web::Data<AppState>) -> HttpResponse {
    let farm_rows = state.dataset.farms().iter().filter(|f| f.is_farm()).count();

    HttpResponse::Ok().json(ApiDatasetSummary {
        rows: state.dataset.row_count(),
        farm_rows,
    })
}

/// `GET /api/options`
///
/// Returns the checklist values and slider bounds derived from the data.
pub async fn options(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.options.as_ref())
}

/// `GET /api/criteria`
///
/// Returns the criteria the dashboard starts with.
pub async fn initial_criteria(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.sliders.initial_criteria(&state.options))
}

/// `GET /api/poster`
///
/// Returns the default poster grid layout.
pub async fn poster(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.poster)
}

/// `POST /api/filter`
///
/// Applies the posted criteria to every row and returns the matching ids
/// and their formatted counts.
pub async fn filter(
    state: web::Data<AppState>,
    criteria: web::Json<FilterCriteria>,
) -> HttpResponse {
    let dataset = state.dataset.clone();
    let criteria = criteria.into_inner();

    match web::block(move || dataset.filter(&criteria)).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(e) => {
            log::error!("Failed to filter rows: {e}");
            HttpResponse::InternalServerError().json(ApiError::new("Failed to filter rows"))
        }
    }
}

/// `POST /api/checklist`
///
/// Reconciles a checklist with its "All" toggle.
pub async fn checklist(
    state: web::Data<AppState>,
    request: web::Json<ChecklistRequest>,
) -> HttpResponse {
    let ChecklistRequest {
        attribute,
        trigger,
        state: checklist,
    } = request.into_inner();

    let synced = sync_checklist(trigger, checklist, state.options.values(attribute));
    HttpResponse::Ok().json(synced)
}

/// `POST /api/notice`
///
/// Returns the warning to show for a filter result, if any.
pub async fn notice(request: web::Json<NoticeRequest>) -> HttpResponse {
    HttpResponse::Ok().json(NoticeResponse::from(filter_notice(&request)))
}

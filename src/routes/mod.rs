use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{self, distance, maps};
use crate::middleware::rate_limit::{log_request, GlobalGovernorLayer};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health))
        // Distance
        .route("/api/distance", get(distance::distance))
        .route("/api/distance/within-radius", post(distance::within_radius))
        .route("/api/bounds", post(distance::bounds))
        // Map views
        .route("/api/maps", post(maps::from_data_attributes))
        .route("/api/maps/current-location", post(maps::current_location))
        .with_state(state)
}

/// Router with the full middleware stack. Needs connect info on each request
/// for the per-IP governor and request logging.
pub fn create_app(state: AppState, governor: GlobalGovernorLayer) -> Router {
    create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(governor)
        // Outermost, so requests the governor rejects are still logged
        .layer(middleware::from_fn(log_request))
}

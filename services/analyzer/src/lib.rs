pub mod config;
pub mod state;
pub mod provider;
pub mod provider_hf;
pub mod runtime;
pub mod verdict;
pub mod aggregate;
pub mod report;
pub mod routes_analyze;
pub mod routes_runtime;

use axum::{routing::{get, post}, Router};
use tower_http::cors::CorsLayer;

use crate::state::SharedState;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/analyze", post(crate::routes_analyze::post_analyze))
        .route("/analyze/report", post(crate::routes_analyze::post_report))
        .route("/analyze/example", get(crate::routes_analyze::get_example))
        .route("/runtime", get(crate::routes_runtime::get_runtime))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

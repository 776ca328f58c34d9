pub mod api;
pub mod state;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use crate::http::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/api/directories", get(api::list_directories))
        .route("/api/scan", post(api::scan_directory))
        .route("/api/clean", post(api::clean_files));

    let router = match &state.static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router.layer(TraceLayer::new_for_http()).with_state(state)
}

pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    // Axum's default 2MB body cap is below one legal resume; size policy is
    // enforced per-file in the handler, so give the whole batch headroom.
    let body_limit =
        state.config.max_resumes_per_batch * state.config.max_resume_bytes + 1024 * 1024;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/screenings", post(handlers::handle_screen))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

pub mod fallback;
pub mod tunnel;

use axum::Router;

use crate::{registrations, sessions, state::AppState, users};

/// Every `/api/...` endpoint, with the documentation/404 fallback for everything else.
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .merge(users::router())
        .merge(sessions::router())
        .merge(registrations::router())
        .fallback(fallback::fallback)
        .with_state(state)
}

use axum::{
    extract::{
        rejection::{PathRejection},
        Path, State,
    },
    routing::get,
    Json, Router,
};
use tracing::{instrument, warn};

use crate::{
    error::{ApiError, ApiResult},
    routes::fallback::invalid_endpoint,
    sessions::repo::{self, Session},
    state::AppState,
};

pub fn session_routes() -> Router<AppState> {
    Router::new()
        .route("/api/sessions", get(list_sessions).fallback(invalid_endpoint))
        .route("/api/sessions/:id", get(get_session).fallback(invalid_endpoint))
}

#[instrument(skip(state))]
pub async fn list_sessions(State(state): State<AppState>) -> ApiResult<Json<Vec<Session>>> {
    let mut conn = state.db.connect().await?;
    let sessions = repo::list(&mut conn).await?;
    Ok(Json(sessions))
}

#[instrument(skip(state))]
pub async fn get_session(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Session>> {
    let Path(id) = path?;
    let mut conn = state.db.connect().await?;
    match repo::find_by_id(&mut conn, &id).await? {
        Some(session) => Ok(Json(session)),
        None => {
            warn!(session_id = %id, "session not found");
            Err(ApiError::not_found("Session not found"))
        }
    }
}

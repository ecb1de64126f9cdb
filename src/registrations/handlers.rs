use axum::{
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    routing::{get, post},
    Json, Router,
};
use bytes::Bytes;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use super::dto::{
    RegisterResponse, RegistrationRequest, UnregisterResponse, ALREADY_REGISTERED, NOT_REGISTERED,
};
use crate::{
    error::{ApiError, ApiResult},
    payload::parse_object,
    registrations::repo::{self, RegisteredSession},
    routes::fallback::invalid_endpoint,
    sessions::repo as sessions,
    state::AppState,
    users::repo as users,
};

pub fn registration_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/user-sessions/:email",
            get(list_user_sessions).fallback(invalid_endpoint),
        )
        .route(
            "/api/register",
            post(register).delete(unregister).fallback(invalid_endpoint),
        )
}

fn user_not_found(email: &str) -> ApiError {
    warn!(%email, "user not found");
    ApiError::not_found("User not found")
}

#[instrument(skip(state))]
pub async fn list_user_sessions(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<Vec<RegisteredSession>>> {
    let Path(email) = path?;
    let mut conn = state.db.connect().await?;
    let user_id = users::find_id_by_email(&mut conn, &email)
        .await?
        .ok_or_else(|| user_not_found(&email))?;
    let rows = repo::list_for_user(&mut conn, &user_id).await?;
    Ok(Json(rows))
}

/// POST /api/register { "email": "...", "session_id": "..." }
#[instrument(skip(state, body))]
pub async fn register(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<RegisterResponse>> {
    let request = RegistrationRequest::try_from(parse_object(&body?)?)?;

    let mut conn = state.db.connect().await?;
    let user_id = users::find_id_by_email(&mut conn, &request.email)
        .await?
        .ok_or_else(|| user_not_found(&request.email))?;

    if !sessions::exists(&mut conn, &request.session_id).await? {
        warn!(session_id = %request.session_id, "session not found");
        return Err(ApiError::not_found("Session not found"));
    }

    let inserted = repo::insert(
        &mut conn,
        &user_id,
        &request.session_id,
        OffsetDateTime::now_utc(),
    )
    .await?;

    if !inserted {
        info!(%user_id, session_id = %request.session_id, "already registered");
        return Ok(Json(RegisterResponse::Unchanged {
            message: ALREADY_REGISTERED,
        }));
    }

    info!(%user_id, session_id = %request.session_id, "registered for session");
    Ok(Json(RegisterResponse::Registered {
        registered: true,
        session_id: request.session_id,
    }))
}

/// DELETE /api/register { "email": "...", "session_id": "..." }
#[instrument(skip(state, body))]
pub async fn unregister(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<UnregisterResponse>> {
    let request = RegistrationRequest::try_from(parse_object(&body?)?)?;

    let mut conn = state.db.connect().await?;
    let user_id = users::find_id_by_email(&mut conn, &request.email)
        .await?
        .ok_or_else(|| user_not_found(&request.email))?;

    if !repo::delete(&mut conn, &user_id, &request.session_id).await? {
        info!(%user_id, session_id = %request.session_id, "nothing to unregister");
        return Ok(Json(UnregisterResponse::Unchanged {
            message: NOT_REGISTERED,
        }));
    }

    info!(%user_id, session_id = %request.session_id, "unregistered from session");
    Ok(Json(UnregisterResponse::Unregistered {
        unregistered: true,
        session_id: request.session_id,
    }))
}

use axum::{
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    routing::get,
    Json, Router,
};
use bytes::Bytes;
use time::OffsetDateTime;
use tracing::{info, instrument, warn};

use super::dto::{UpsertUserRequest, UpsertUserResponse};
use crate::{
    error::{ApiError, ApiResult},
    payload::parse_object,
    routes::fallback::invalid_endpoint,
    state::AppState,
    users::repo::{self, UpsertOutcome, User},
};

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/users",
            get(list_users).post(upsert_user).fallback(invalid_endpoint),
        )
        .route("/api/users/:email", get(get_user).fallback(invalid_endpoint))
}

#[instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<User>>> {
    let mut conn = state.db.connect().await?;
    let users = repo::list(&mut conn).await?;
    Ok(Json(users))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<User>> {
    let Path(email) = path?;
    let mut conn = state.db.connect().await?;
    match repo::find_by_email(&mut conn, &email).await? {
        Some(user) => Ok(Json(user)),
        None => {
            warn!(%email, "user not found");
            Err(ApiError::not_found("User not found"))
        }
    }
}

/// POST /api/users { "email": "...", <profile fields> }
#[instrument(skip(state, body))]
pub async fn upsert_user(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<Json<UpsertUserResponse>> {
    let request = UpsertUserRequest::try_from(parse_object(&body?)?)?;

    let mut conn = state.db.connect().await?;
    let outcome = repo::upsert(&mut conn, &request, OffsetDateTime::now_utc()).await?;

    let response = match outcome {
        UpsertOutcome::Created(id) => {
            info!(user_id = %id, email = %request.email, "user created");
            UpsertUserResponse::Created { id, created: true }
        }
        UpsertOutcome::Updated(id) => {
            info!(user_id = %id, email = %request.email, "user updated");
            UpsertUserResponse::Updated { id, updated: true }
        }
    };
    Ok(Json(response))
}

use axum::{
    http::{header, Uri},
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

pub const API_PREFIX: &str = "/api/";

const API_DOCS: &str = "\
# ML March API Service

Backend API for the ML March website. It manages participant profiles, the session catalog and session registrations.

## Available Endpoints

### Users
- `GET /api/users` - Get all users
- `GET /api/users/{email}` - Get user by email
- `POST /api/users` - Create or update a user

### Sessions
- `GET /api/sessions` - Get all sessions
- `GET /api/sessions/{id}` - Get session by ID
- `GET /api/user-sessions/{email}` - Get sessions registered by a user

### Registration
- `POST /api/register` - Register a user for a session
- `DELETE /api/register` - Unregister a user from a session

Clients that cannot issue these requests directly may send `GET /?path=<endpoint>&method=<verb>&data=<json>`.
";

pub fn docs() -> Response {
    (
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        API_DOCS,
    )
        .into_response()
}

/// Known path, unsupported method.
pub async fn invalid_endpoint() -> ApiError {
    ApiError::not_found("Invalid endpoint or method")
}

/// Unknown path: JSON 404 under the API prefix, documentation anywhere else.
pub async fn fallback(uri: Uri) -> Response {
    if uri.path().starts_with(API_PREFIX) {
        invalid_endpoint().await.into_response()
    } else {
        docs()
    }
}

//! Query-parameter entry point used by browser clients that cannot send
//! arbitrary verbs or bodies: `GET /?path=/api/...&method=POST&data={...}`.

use axum::{
    body::Body,
    extract::{rejection::QueryRejection, Query, State},
    http::{header, Method, Request},
    response::{IntoResponse, Response},
    Router,
};
use serde::Deserialize;
use tower::ServiceExt;
use tracing::{debug, instrument};

use super::fallback::{docs, API_PREFIX};
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
pub struct TunnelParams {
    pub path: Option<String>,
    pub method: Option<String>,
    pub data: Option<String>,
}

#[instrument(skip(api))]
pub async fn tunnel(
    State(api): State<Router>,
    query: Result<Query<TunnelParams>, QueryRejection>,
) -> Response {
    let Query(params) = match query {
        Ok(query) => query,
        Err(rejection) => return ApiError::from(rejection).into_response(),
    };
    let Some(path) = params.path.filter(|p| p.starts_with(API_PREFIX)) else {
        return docs();
    };
    // verbs are matched exactly, so `post` is not `POST`
    let method = params.method.unwrap_or_else(|| "GET".to_string());

    let request = match build_request(&path, &method, params.data.unwrap_or_default()) {
        Ok(request) => request,
        Err(e) => return e.into_response(),
    };

    debug!(%method, %path, "dispatching tunnelled request");
    match api.oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    }
}

fn build_request(path: &str, method: &str, data: String) -> ApiResult<Request<Body>> {
    let method = Method::from_bytes(method.as_bytes())
        .map_err(|_| ApiError::validation(format!("Invalid method: {method}")))?;
    Request::builder()
        .method(method)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(data))
        .map_err(|e| ApiError::validation(format!("Invalid path: {e}")))
}

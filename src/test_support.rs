use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use sqlx::SqliteConnection;
use tempfile::TempDir;
use time::OffsetDateTime;
use tower::ServiceExt;

use crate::{
    app::build_app,
    config::AppConfig,
    db::bootstrap,
    state::AppState,
    users::{
        repo::{self as user_repo, UpsertOutcome},
        UpsertUserRequest,
    },
};

/// Bootstrapped store in a temporary directory, removed on drop.
pub struct TestStore {
    pub state: AppState,
    _dir: TempDir,
}

impl TestStore {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let state = AppState::new(AppConfig {
            database_path: dir.path().join("mlmarch.db"),
            host: "127.0.0.1".into(),
            port: 0,
        });
        bootstrap(&state.db).await.unwrap();
        Self { state, _dir: dir }
    }

    pub async fn conn(&self) -> SqliteConnection {
        self.state.db.connect().await.unwrap()
    }

    pub fn app(&self) -> Router {
        build_app(self.state.clone())
    }

    pub async fn create_user(&self, email: &str) -> String {
        let mut conn = self.conn().await;
        let request = UpsertUserRequest {
            email: email.to_string(),
            fields: Vec::new(),
        };
        match user_repo::upsert(&mut conn, &request, OffsetDateTime::now_utc())
            .await
            .unwrap()
        {
            UpsertOutcome::Created(id) | UpsertOutcome::Updated(id) => id,
        }
    }

    pub async fn registration_count(&self) -> i64 {
        let mut conn = self.conn().await;
        sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions")
            .fetch_one(&mut conn)
            .await
            .unwrap()
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let body = match body {
            Some(json) => Body::from(json.to_string()),
            None => Body::empty(),
        };
        self.oneshot(method, uri, body).await
    }

    /// Sends a request and decodes the JSON response body.
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = self.request(method, uri, body).await;
        decode_json(response).await
    }

    pub async fn send_raw(&self, method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let response = self.oneshot(method, uri, Body::from(body.to_string())).await;
        decode_json(response).await
    }

    /// GET returning (status, content type, body text).
    pub async fn get_text(&self, uri: &str) -> (StatusCode, String, String) {
        let response = self.oneshot(Method::GET, uri, Body::empty()).await;
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn oneshot(&self, method: Method, uri: &str, body: Body) -> Response {
        self.app()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap()
    }
}

async fn decode_json(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

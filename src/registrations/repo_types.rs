use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;

use crate::sessions::repo_types::Session;

/// A session joined with the caller's registration row.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct RegisteredSession {
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub session: Session,
    #[serde(with = "time::serde::rfc3339")]
    pub registered_at: OffsetDateTime,
    pub attended: bool,
}

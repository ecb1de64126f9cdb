use serde::Serialize;
use sqlx::FromRow;

/// Scheduled session from the seeded catalog.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Session {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub date: String,        // calendar date, e.g. 2025-03-10
    pub time: String,        // display range, e.g. "10:00 AM - 12:00 PM"
    pub status: Option<String>,
}

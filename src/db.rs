use std::{path::Path, time::Duration};

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode},
    ConnectOptions, Connection, SqliteConnection,
};

/// Handle to the SQLite store file.
///
/// Holds only connect options; every request opens its own connection with
/// [`Db::connect`] and the connection is closed when it is dropped.
#[derive(Clone)]
pub struct Db {
    options: SqliteConnectOptions,
}

impl Db {
    pub fn open(path: impl AsRef<Path>) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));
        Self { options }
    }

    pub async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        self.options.connect().await
    }
}

const SCHEMA: [&str; 3] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        email TEXT UNIQUE NOT NULL,
        first_name TEXT,
        last_name TEXT,
        phone TEXT,
        institution TEXT,
        education_level TEXT,
        ml_experience TEXT,
        interests TEXT,
        bio TEXT,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sessions (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT,
        date TEXT NOT NULL,
        time TEXT NOT NULL,
        status TEXT
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS user_sessions (
        user_id TEXT NOT NULL,
        session_id TEXT NOT NULL,
        registered_at TEXT NOT NULL,
        attended BOOLEAN NOT NULL DEFAULT 0,
        FOREIGN KEY (user_id) REFERENCES users (id),
        FOREIGN KEY (session_id) REFERENCES sessions (id),
        PRIMARY KEY (user_id, session_id)
    )
    "#,
];

// (id, title, description, date, time)
const SEED_SESSIONS: [(&str, &str, &str, &str, &str); 7] = [
    (
        "s1",
        "Introduction to Data Science and Statistical Methods for ML",
        "A foundational overview of key statistical methods and data science principles essential for machine learning.",
        "2025-03-10",
        "10:00 AM - 12:00 PM",
    ),
    (
        "s2",
        "Introduction to Machine Learning",
        "Explore core ML concepts, algorithms, and implementation techniques.",
        "2025-03-12",
        "2:00 PM - 4:00 PM",
    ),
    (
        "s3",
        "Implementation of Machine Learning Models and Applications",
        "Hands-on session on implementing various ML models and exploring real-world applications.",
        "2025-03-18",
        "10:00 AM - 1:00 PM",
    ),
    (
        "s4",
        "Introduction to Artificial Neural Networks",
        "Deep dive into neural network architectures, training methodologies, and applications.",
        "2025-03-20",
        "2:00 PM - 5:00 PM",
    ),
    (
        "s5",
        "Introduction to Natural Language Processing",
        "Learn how machines understand, interpret, and generate human language.",
        "2025-03-24",
        "10:00 AM - 12:00 PM",
    ),
    (
        "s6",
        "Computer Vision",
        "Discover techniques for image analysis, object detection, and visual recognition systems.",
        "2025-03-26",
        "2:00 PM - 5:00 PM",
    ),
    (
        "s7",
        "Robotics & MLOps",
        "Explore the integration of ML techniques in robotics and autonomous systems, followed by best practices for deploying, managing, and scaling machine learning models in production.",
        "2025-03-28",
        "10:00 AM - 1:00 PM",
    ),
];

const SEED_STATUS: &str = "upcoming";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapReport {
    pub seeded: u64,
}

/// Creates missing tables and seeds the session catalog when it is empty.
pub async fn bootstrap(db: &Db) -> anyhow::Result<BootstrapReport> {
    let mut conn = db.connect().await.context("open database")?;

    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(&mut conn)
            .await
            .context("create schema")?;
    }

    let mut tx = conn.begin().await.context("begin seed transaction")?;

    let existing: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
        .fetch_one(&mut *tx)
        .await
        .context("count sessions")?;

    if existing > 0 {
        tx.rollback().await?;
        tracing::debug!(existing, "sessions already present; skipping seed");
        return Ok(BootstrapReport { seeded: 0 });
    }

    let mut seeded = 0;
    for (id, title, description, date, time) in SEED_SESSIONS {
        seeded += sqlx::query(
            r#"
            INSERT INTO sessions (id, title, description, date, time, status)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .bind(date)
        .bind(time)
        .bind(SEED_STATUS)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("seed session {id}"))?
        .rows_affected();
    }

    tx.commit().await.context("commit seed transaction")?;
    tracing::info!(seeded, "seeded session catalog");

    Ok(BootstrapReport { seeded })
}

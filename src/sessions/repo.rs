use sqlx::SqliteConnection;

pub use super::repo_types::Session;

pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<Session>, sqlx::Error> {
    sqlx::query_as::<_, Session>(
        r#"
        SELECT id, title, description, date, time, status
        FROM sessions
        "#,
    )
    .fetch_all(conn)
    .await
}

pub async fn find_by_id(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Option<Session>, sqlx::Error> {
    sqlx::query_as::<_, Session>(
        r#"
        SELECT id, title, description, date, time, status
        FROM sessions
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(conn)
    .await
}

pub async fn exists(conn: &mut SqliteConnection, id: &str) -> Result<bool, sqlx::Error> {
    let found: Option<String> = sqlx::query_scalar("SELECT id FROM sessions WHERE id = ?")
        .bind(id)
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestStore;

    #[tokio::test]
    async fn find_by_id_returns_row_or_none() {
        let store = TestStore::new().await;
        let mut conn = store.conn().await;

        let s3 = find_by_id(&mut conn, "s3").await.unwrap().unwrap();
        assert_eq!(s3.title, "Implementation of Machine Learning Models and Applications");
        assert_eq!(s3.date, "2025-03-18");

        assert!(find_by_id(&mut conn, "s99").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn exists_matches_catalog() {
        let store = TestStore::new().await;
        let mut conn = store.conn().await;

        assert!(exists(&mut conn, "s1").await.unwrap());
        assert!(!exists(&mut conn, "S1").await.unwrap());
    }
}

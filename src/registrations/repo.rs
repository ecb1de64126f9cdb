use sqlx::SqliteConnection;
use time::OffsetDateTime;

pub use super::repo_types::RegisteredSession;

pub async fn list_for_user(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<RegisteredSession>, sqlx::Error> {
    sqlx::query_as::<_, RegisteredSession>(
        r#"
        SELECT s.id, s.title, s.description, s.date, s.time, s.status,
               us.registered_at, us.attended
        FROM sessions s
        JOIN user_sessions us ON s.id = us.session_id
        WHERE us.user_id = ?
        "#,
    )
    .bind(user_id)
    .fetch_all(conn)
    .await
}

/// Links a user to a session. Returns `false` when the pair was already registered.
pub async fn insert(
    conn: &mut SqliteConnection,
    user_id: &str,
    session_id: &str,
    now: OffsetDateTime,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO user_sessions (user_id, session_id, registered_at)
        VALUES (?, ?, ?)
        ON CONFLICT (user_id, session_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(session_id)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

/// Removes a registration. Returns `false` when there was nothing to remove.
pub async fn delete(
    conn: &mut SqliteConnection,
    user_id: &str,
    session_id: &str,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM user_sessions WHERE user_id = ? AND session_id = ?")
        .bind(user_id)
        .bind(session_id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::TestStore;

    async fn count(conn: &mut SqliteConnection) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM user_sessions")
            .fetch_one(conn)
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn second_insert_is_a_noop() {
        let store = TestStore::new().await;
        let user_id = store.create_user("a@x.com").await;
        let mut conn = store.conn().await;

        assert!(insert(&mut conn, &user_id, "s2", OffsetDateTime::now_utc()).await.unwrap());
        assert!(!insert(&mut conn, &user_id, "s2", OffsetDateTime::now_utc()).await.unwrap());
        assert_eq!(count(&mut conn).await, 1);
    }

    #[tokio::test]
    async fn list_joins_session_columns() {
        let store = TestStore::new().await;
        let user_id = store.create_user("a@x.com").await;
        let other_id = store.create_user("b@x.com").await;
        let mut conn = store.conn().await;

        let now = OffsetDateTime::now_utc();
        insert(&mut conn, &user_id, "s4", now).await.unwrap();
        insert(&mut conn, &other_id, "s5", now).await.unwrap();

        let rows = list_for_user(&mut conn, &user_id).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].session.id, "s4");
        assert_eq!(rows[0].session.title, "Introduction to Artificial Neural Networks");
        assert_eq!(rows[0].registered_at, now);
        assert!(!rows[0].attended);
    }

    #[tokio::test]
    async fn delete_reports_whether_a_row_went_away() {
        let store = TestStore::new().await;
        let user_id = store.create_user("a@x.com").await;
        let mut conn = store.conn().await;

        assert!(!delete(&mut conn, &user_id, "s1").await.unwrap());

        insert(&mut conn, &user_id, "s1", OffsetDateTime::now_utc()).await.unwrap();
        insert(&mut conn, &user_id, "s2", OffsetDateTime::now_utc()).await.unwrap();
        assert!(delete(&mut conn, &user_id, "s1").await.unwrap());

        let remaining = list_for_user(&mut conn, &user_id).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].session.id, "s2");
    }

    #[tokio::test]
    async fn foreign_keys_reject_unknown_session() {
        let store = TestStore::new().await;
        let user_id = store.create_user("a@x.com").await;
        let mut conn = store.conn().await;

        let result = insert(&mut conn, &user_id, "s99", OffsetDateTime::now_utc()).await;
        assert!(result.is_err());
        assert_eq!(count(&mut conn).await, 0);
    }
}

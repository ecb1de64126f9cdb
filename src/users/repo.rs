use sqlx::{QueryBuilder, Sqlite, SqliteConnection};
use time::OffsetDateTime;
use uuid::Uuid;

pub use super::repo_types::{UpsertOutcome, User};
use super::{ProfileField, UpsertUserRequest};

const USER_COLUMNS: &str = "id, email, first_name, last_name, phone, institution, \
     education_level, ml_experience, interests, bio, created_at, updated_at";

pub async fn list(conn: &mut SqliteConnection) -> Result<Vec<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users"))
        .fetch_all(conn)
        .await
}

pub async fn find_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
        .bind(email)
        .fetch_optional(conn)
        .await
}

pub async fn find_id_by_email(
    conn: &mut SqliteConnection,
    email: &str,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar("SELECT id FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(conn)
        .await
}

/// Inserts a user for a new email, or writes the supplied fields onto the
/// existing row. `id` and `email` never change once a row exists.
pub async fn upsert(
    conn: &mut SqliteConnection,
    request: &UpsertUserRequest,
    now: OffsetDateTime,
) -> Result<UpsertOutcome, sqlx::Error> {
    match find_id_by_email(&mut *conn, &request.email).await? {
        Some(id) => {
            update_fields(&mut *conn, &id, &request.fields, now).await?;
            Ok(UpsertOutcome::Updated(id))
        }
        None => {
            let id = Uuid::new_v4().to_string();
            insert(&mut *conn, &id, request, now).await?;
            Ok(UpsertOutcome::Created(id))
        }
    }
}

async fn insert(
    conn: &mut SqliteConnection,
    id: &str,
    request: &UpsertUserRequest,
    now: OffsetDateTime,
) -> Result<(), sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new("INSERT INTO users (id, email, created_at, updated_at");
    for (field, _) in &request.fields {
        qb.push(", ").push(field.column());
    }
    qb.push(") VALUES (");

    let mut values = qb.separated(", ");
    values.push_bind(id.to_owned());
    values.push_bind(request.email.clone());
    values.push_bind(now);
    values.push_bind(now);
    for (_, value) in &request.fields {
        values.push_bind(value.clone());
    }
    values.push_unseparated(")");

    qb.build().execute(conn).await?;
    Ok(())
}

async fn update_fields(
    conn: &mut SqliteConnection,
    id: &str,
    fields: &[(ProfileField, Option<String>)],
    now: OffsetDateTime,
) -> Result<(), sqlx::Error> {
    let mut qb = QueryBuilder::<Sqlite>::new("UPDATE users SET ");

    let mut assignments = qb.separated(", ");
    for (field, value) in fields {
        assignments.push(field.column());
        assignments.push_unseparated(" = ");
        assignments.push_bind_unseparated(value.clone());
    }
    assignments.push("updated_at = ");
    assignments.push_bind_unseparated(now);

    qb.push(" WHERE id = ").push_bind(id.to_owned());
    qb.build().execute(conn).await?;
    Ok(())
}

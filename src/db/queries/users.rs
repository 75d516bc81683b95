use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub score: i64,
}

pub async fn get_user(pool: &SqlitePool, id: i64) -> sqlx::Result<User> {
    sqlx::query_as::<_, User>("SELECT id, username, score FROM users WHERE users.id = ?1")
        .bind(id)
        .fetch_one(pool)
        .await
}

pub async fn get_users(pool: &SqlitePool) -> sqlx::Result<Vec<User>> {
    sqlx::query_as::<_, User>("SELECT id, username, score FROM users ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn create_user(pool: &SqlitePool, username: &str) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;
    let user_id = sqlx::query("INSERT INTO users (username) VALUES (?1)")
        .bind(username)
        .execute(&mut *conn)
        .await?
        .last_insert_rowid();

    Ok(user_id)
}

/// Adds `delta` to the user's score and returns the new score.
pub async fn add_to_score(pool: &SqlitePool, id: i64, delta: i64) -> sqlx::Result<i64> {
    get_user(pool, id).await?;
    let mut conn = pool.acquire().await?;

    sqlx::query("UPDATE users SET score = score + ?1 WHERE users.id = ?2")
        .bind(delta)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    drop(conn);

    Ok(get_user(pool, id).await?.score)
}

pub async fn import_users(pool: &SqlitePool, users: Vec<User>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for user in users {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, score) VALUES (?1, ?2, ?3)
            ON CONFLICT (id) DO UPDATE SET username = excluded.username, score = excluded.score
            "#,
        )
        .bind(user.id)
        .bind(user.username)
        .bind(user.score)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

use std::collections::BTreeMap;

use axum::extract::State;
use axum::routing::{get, patch};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::queries::users;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResponse, OrNotFound};
use crate::server::extract::{ApiJson, ApiPath};

#[derive(Deserialize)]
struct NewUser {
    username: Option<String>,
}

#[derive(Deserialize)]
struct ScoreUpdate {
    score: i64,
}

#[derive(Serialize)]
struct UserMap {
    success: bool,
    users: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created_user_id: i64,
}

#[derive(Serialize)]
struct ScoreUpdated {
    success: bool,
    updated_user_id: i64,
    new_score: i64,
}

async fn get_users(State(pool): State<SqlitePool>) -> ApiResponse<Json<UserMap>> {
    let users = users::get_users(&pool)
        .await?
        .into_iter()
        .map(|u| (u.id, u.username))
        .collect();
    Ok(Json(UserMap {
        success: true,
        users,
    }))
}

async fn create_user(
    State(pool): State<SqlitePool>,
    ApiJson(user): ApiJson<NewUser>,
) -> ApiResponse<Json<Created>> {
    let username = match user.username {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(ApiError::InvalidInput("missing field `username`".to_owned())),
    };
    let id = users::create_user(&pool, username.trim()).await?;
    Ok(Json(Created {
        success: true,
        created_user_id: id,
    }))
}

async fn add_score(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(update): ApiJson<ScoreUpdate>,
) -> ApiResponse<Json<ScoreUpdated>> {
    if update.score < 0 {
        return Err(ApiError::InvalidInput(format!(
            "score delta must not be negative, got {}",
            update.score
        )));
    }
    let new_score = users::add_to_score(&pool, id, update.score)
        .await
        .or_not_found("user", id)?;
    Ok(Json(ScoreUpdated {
        success: true,
        updated_user_id: id,
        new_score,
    }))
}

pub fn users_router(state: AppState) -> Router {
    Router::new()
        .route("/users", get(get_users).post(create_user))
        .route("/users/{id}", patch(add_score))
        .with_state(state)
}

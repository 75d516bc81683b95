use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use sqlx::SqlitePool;

use crate::db::queries::questions;
use crate::db::{Category, NewQuestion, Question, QuestionFilter};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResponse, OrNotFound};
use crate::server::extract::{ApiJson, ApiPath, ApiQuery, PageQuery};
use crate::telemetry::QUESTIONS_CREATED;

use super::{question_listing, QuestionListing};

#[derive(Deserialize)]
struct CreateQuestion {
    question: Option<String>,
    answer: Option<String>,
    category_id: Option<i64>,
    difficulty: Option<i64>,
    rating: Option<i64>,
}

impl CreateQuestion {
    fn validate(self) -> ApiResponse<NewQuestion> {
        let question = required_text(self.question, "question")?;
        let answer = required_text(self.answer, "answer")?;
        let category_id = self.category_id.ok_or_else(|| missing("category_id"))?;
        let difficulty = self.difficulty.ok_or_else(|| missing("difficulty"))?;
        Ok(NewQuestion {
            question,
            answer,
            category_id,
            rating: self.rating,
            difficulty,
        })
    }
}

fn missing(field: &str) -> ApiError {
    ApiError::InvalidInput(format!("missing field `{field}`"))
}

fn required_text(value: Option<String>, field: &str) -> ApiResponse<String> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(missing(field)),
    }
}

#[derive(Deserialize)]
struct SearchBody {
    search_term: Option<String>,
}

// the game frontend sends ratings either as numbers or as numeric strings
#[derive(Deserialize)]
struct RatingUpdate {
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    rating: Option<i64>,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created_question_id: i64,
}

#[derive(Serialize)]
struct Updated {
    success: bool,
    updated_question_id: i64,
}

#[derive(Serialize)]
struct Deleted {
    success: bool,
    deleted_question_id: i64,
}

#[derive(Serialize)]
struct SingleQuestion {
    success: bool,
    question: Question,
}

#[derive(Serialize)]
struct QuestionCategory {
    success: bool,
    category: Category,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<Json<QuestionListing>> {
    let listing = question_listing(&pool, &QuestionFilter::all(), query.page()?, false).await?;
    Ok(Json(listing))
}

async fn search_questions(
    State(pool): State<SqlitePool>,
    ApiQuery(query): ApiQuery<PageQuery>,
    ApiJson(body): ApiJson<SearchBody>,
) -> ApiResponse<Json<QuestionListing>> {
    let term = body.search_term.ok_or_else(|| missing("search_term"))?;
    let listing = question_listing(&pool, &QuestionFilter::search(&term), query.page()?, true).await?;
    Ok(Json(listing))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<CreateQuestion>,
) -> ApiResponse<Json<Created>> {
    let new_question = body.validate()?;
    let id = questions::create_question(&pool, &new_question).await?;
    QUESTIONS_CREATED.inc();
    tracing::info!(id, category_id = new_question.category_id, "question created");
    Ok(Json(Created {
        success: true,
        created_question_id: id,
    }))
}

async fn get_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<SingleQuestion>> {
    let question = questions::get_question(&pool, id)
        .await
        .or_not_found("question", id)?;
    Ok(Json(SingleQuestion {
        success: true,
        question,
    }))
}

async fn get_question_category(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<QuestionCategory>> {
    let category = questions::get_question_category(&pool, id)
        .await
        .or_not_found("question", id)?;
    Ok(Json(QuestionCategory {
        success: true,
        category,
    }))
}

async fn update_rating(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(body): ApiJson<RatingUpdate>,
) -> ApiResponse<Json<Updated>> {
    match body.rating {
        Some(rating) => questions::update_rating(&pool, id, rating)
            .await
            .or_not_found("question", id)?,
        None => {
            questions::get_question(&pool, id)
                .await
                .or_not_found("question", id)?;
        }
    }
    Ok(Json(Updated {
        success: true,
        updated_question_id: id,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResponse<Json<Deleted>> {
    questions::delete_question(&pool, id)
        .await
        .or_not_found("question", id)?;
    tracing::info!(id, "question deleted");
    Ok(Json(Deleted {
        success: true,
        deleted_question_id: id,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search_questions))
        .route(
            "/questions/{id}",
            get(get_question)
                .patch(update_rating)
                .delete(delete_question),
        )
        .route("/questions/{id}/category", get(get_question_category))
        .with_state(state)
}

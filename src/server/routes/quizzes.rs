use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::Question;
use crate::quiz::{select_question, QuizRequest};
use crate::server::app::AppState;
use crate::server::error::ApiResponse;
use crate::server::extract::ApiJson;
use crate::telemetry::QUIZ_CNTR;

#[derive(Deserialize)]
struct QuizBody {
    quiz_category_id: i64,
    previous_question_ids: Vec<i64>,
}

#[derive(Serialize)]
struct QuizQuestion {
    success: bool,
    question: Option<Question>,
}

async fn next_question(
    State(pool): State<SqlitePool>,
    ApiJson(body): ApiJson<QuizBody>,
) -> ApiResponse<Json<QuizQuestion>> {
    let request = QuizRequest {
        category_id: body.quiz_category_id,
        previous_question_ids: body.previous_question_ids,
    };
    let mut rng = StdRng::from_entropy();
    let question = select_question(&pool, &request, &mut rng).await?;

    let outcome = if question.is_some() { "served" } else { "exhausted" };
    QUIZ_CNTR
        .with_label_values(&[outcome])
        .inc();

    Ok(Json(QuizQuestion {
        success: true,
        question,
    }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(next_question))
        .with_state(state)
}

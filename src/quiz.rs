//! Random question selection for a running quiz.
//!
//! The selector keeps no state: the caller passes the ids it has already
//! served and gets back either a fresh question or `None` once the category is
//! exhausted.

use rand::seq::SliceRandom;
use rand::Rng;
use sqlx::SqlitePool;

use crate::db::queries::questions::get_filtered_questions;
use crate::db::{Question, QuestionFilter};

#[derive(Debug, Clone, Default)]
pub struct QuizRequest {
    /// `0` means any category.
    pub category_id: i64,
    pub previous_question_ids: Vec<i64>,
}

impl QuizRequest {
    pub fn candidate_filter(&self) -> QuestionFilter {
        QuestionFilter::category(self.category_id)
            .excluding(self.previous_question_ids.iter().copied())
    }
}

/// Picks one candidate uniformly at random.
pub fn choose_question<R: Rng + ?Sized>(candidates: &[Question], rng: &mut R) -> Option<Question> {
    candidates.choose(rng).cloned()
}

pub async fn select_question<R: Rng + Send + ?Sized>(
    pool: &SqlitePool,
    request: &QuizRequest,
    rng: &mut R,
) -> sqlx::Result<Option<Question>> {
    let candidates = get_filtered_questions(pool, &request.candidate_filter()).await?;
    tracing::debug!(
        category_id = request.category_id,
        excluded = request.previous_question_ids.len(),
        candidates = candidates.len(),
        "selecting quiz question"
    );
    Ok(choose_question(&candidates, rng))
}

mod categories;
mod questions;
mod quizzes;
mod users;

use std::collections::BTreeMap;

use serde::Serialize;
use sqlx::SqlitePool;

use crate::db::queries::categories::get_all_categories;
use crate::db::queries::questions::get_questions_page;
use crate::db::{Question, QuestionFilter};
use crate::pagination::Page;

use super::error::{ApiError, ApiResponse};

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;
pub use users::users_router;

/// Envelope shared by every paginated question listing.
#[derive(Serialize)]
struct QuestionListing {
    success: bool,
    questions: Vec<Question>,
    total_questions: usize,
    current_category_id: Option<i64>,
    categories: BTreeMap<i64, String>,
}

async fn category_names(pool: &SqlitePool) -> sqlx::Result<BTreeMap<i64, String>> {
    Ok(get_all_categories(pool)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect())
}

/// Fetches one page of `filter`. An empty page is an error unless `allow_empty`.
async fn question_listing(
    pool: &SqlitePool,
    filter: &QuestionFilter,
    page: Page,
    allow_empty: bool,
) -> ApiResponse<QuestionListing> {
    let page_of = get_questions_page(pool, filter, page).await?;
    if page_of.questions.is_empty() && !allow_empty {
        return Err(ApiError::EmptyPage);
    }
    Ok(QuestionListing {
        success: true,
        questions: page_of.questions,
        total_questions: page_of.total,
        current_category_id: filter.category_id(),
        categories: category_names(pool).await?,
    })
}

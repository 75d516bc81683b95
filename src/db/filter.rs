use std::collections::HashSet;

use sqlx::{QueryBuilder, Sqlite};

use crate::db::Question;

/// Category id meaning "any category".
pub const ANY_CATEGORY: i64 = 0;

const SELECT_QUESTIONS: &str =
    "SELECT id, question, answer, category_id, rating, difficulty FROM questions WHERE 1 = 1";

/// Predicates applied to the questions table. Results are always ordered by id.
///
/// Only the category predicate is pushed into SQL. Search folds case with
/// Unicode rules and exclusion lists can exceed SQLite's bind limit, so both
/// are applied to the fetched rows by [`QuestionFilter::matches`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    category_id: Option<i64>,
    search_term: Option<String>,
    excluded_ids: HashSet<i64>,
}

impl QuestionFilter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Questions of one category. [`ANY_CATEGORY`] leaves the set unfiltered.
    pub fn category(category_id: i64) -> Self {
        Self::default().in_category(category_id)
    }

    /// Case-insensitive substring search over the question text. Search is
    /// never combined with other predicates.
    pub fn search(term: &str) -> Self {
        Self {
            search_term: Some(term.to_lowercase()),
            ..Self::default()
        }
    }

    pub fn in_category(mut self, category_id: i64) -> Self {
        self.category_id = (category_id != ANY_CATEGORY).then_some(category_id);
        self
    }

    pub fn excluding(mut self, ids: impl IntoIterator<Item = i64>) -> Self {
        self.excluded_ids.extend(ids);
        self
    }

    pub fn category_id(&self) -> Option<i64> {
        if self.search_term.is_some() {
            return None;
        }
        self.category_id
    }

    pub(crate) fn select_query(&self) -> QueryBuilder<'static, Sqlite> {
        let mut builder = QueryBuilder::new(SELECT_QUESTIONS);
        if let Some(category_id) = self.category_id() {
            builder.push(" AND category_id = ").push_bind(category_id);
        }
        builder.push(" ORDER BY id ASC");
        builder
    }

    /// Row-level predicates that are not expressed in SQL.
    pub fn matches(&self, question: &Question) -> bool {
        if let Some(term) = &self.search_term {
            return question.question.to_lowercase().contains(term.as_str());
        }
        !self.excluded_ids.contains(&question.id)
    }
}

use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::db::{Category, QuestionFilter};
use crate::pagination::{paginate, Page};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category_id: i64,
    pub rating: Option<i64>,
    pub difficulty: i64,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category_id: i64,
    pub rating: Option<i64>,
    pub difficulty: i64,
}

/// One page of a filtered listing together with the size of the whole set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionsPage {
    pub questions: Vec<Question>,
    pub total: usize,
}

pub async fn get_question(pool: &SqlitePool, id: i64) -> sqlx::Result<Question> {
    sqlx::query_as::<_, Question>(
        r#"
        SELECT id, question, answer, category_id, rating, difficulty
        FROM questions WHERE questions.id = ?1
        "#,
    )
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn get_all_questions(pool: &SqlitePool) -> sqlx::Result<Vec<Question>> {
    get_filtered_questions(pool, &QuestionFilter::all()).await
}

pub async fn get_filtered_questions(
    pool: &SqlitePool,
    filter: &QuestionFilter,
) -> sqlx::Result<Vec<Question>> {
    let mut query = filter.select_query();
    let mut questions = query.build_query_as::<Question>().fetch_all(pool).await?;
    questions.retain(|q| filter.matches(q));
    Ok(questions)
}

pub async fn get_questions_page(
    pool: &SqlitePool,
    filter: &QuestionFilter,
    page: Page,
) -> sqlx::Result<QuestionsPage> {
    let questions = get_filtered_questions(pool, filter).await?;
    Ok(QuestionsPage {
        total: questions.len(),
        questions: paginate(&questions, page).to_vec(),
    })
}

/// Category the question belongs to.
pub async fn get_question_category(pool: &SqlitePool, question_id: i64) -> sqlx::Result<Category> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT categories.id, categories.name
        FROM questions JOIN categories ON questions.category_id = categories.id
        WHERE questions.id = ?1
        "#,
    )
    .bind(question_id)
    .fetch_one(pool)
    .await
}

pub async fn create_question(pool: &SqlitePool, question: &NewQuestion) -> sqlx::Result<i64> {
    let mut conn = pool.acquire().await?;

    let id = sqlx::query(
        r#"
        INSERT INTO questions (question, answer, category_id, rating, difficulty)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(&question.question)
    .bind(&question.answer)
    .bind(question.category_id)
    .bind(question.rating)
    .bind(question.difficulty)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    Ok(id)
}

pub async fn update_rating(pool: &SqlitePool, id: i64, rating: i64) -> sqlx::Result<()> {
    get_question(pool, id).await?;
    let mut conn = pool.acquire().await?;

    sqlx::query("UPDATE questions SET rating = ?1 WHERE questions.id = ?2")
        .bind(rating)
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

pub async fn delete_question(pool: &SqlitePool, id: i64) -> sqlx::Result<()> {
    get_question(pool, id).await?;
    let mut conn = pool.acquire().await?;

    sqlx::query("DELETE FROM questions WHERE questions.id = ?1")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(())
}

/// Inserts or overwrites questions by id.
pub async fn import_questions(pool: &SqlitePool, questions: Vec<Question>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for question in questions {
        sqlx::query(
            r#"
            INSERT INTO questions (id, question, answer, category_id, rating, difficulty)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (id) DO UPDATE SET
                question = excluded.question,
                answer = excluded.answer,
                category_id = excluded.category_id,
                rating = excluded.rating,
                difficulty = excluded.difficulty
            "#,
        )
        .bind(question.id)
        .bind(question.question)
        .bind(question.answer)
        .bind(question.category_id)
        .bind(question.rating)
        .bind(question.difficulty)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

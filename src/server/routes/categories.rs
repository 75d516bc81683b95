use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use axum_typed_multipart::{FieldData, TryFromMultipart, TypedMultipart, TypedMultipartError};
use serde::Serialize;
use sqlx::SqlitePool;
use tempfile::NamedTempFile;

use crate::db::queries::categories;
use crate::db::QuestionFilter;
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResponse};
use crate::server::extract::{ApiPath, ApiQuery, PageQuery};

use super::{category_names, question_listing, QuestionListing};

const ICON_CONTENT_TYPE: &str = "image/svg+xml";

#[derive(TryFromMultipart)]
struct NewCategory {
    name: String,
    #[form_data(limit = "1MiB")]
    icon: Option<FieldData<NamedTempFile>>,
}

#[derive(Serialize)]
struct CategoryMap {
    success: bool,
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    created_category_id: i64,
}

/// Icons are keyed by category id so distinct categories never share a file.
fn icon_file_name(category_id: i64) -> String {
    format!("{category_id}.svg")
}

fn save_icon(icon: NamedTempFile, path: &Path) -> std::io::Result<()> {
    // persist is a rename and fails across filesystems
    if let Err(err) = icon.persist(path) {
        std::fs::copy(err.file.path(), path)?;
    }
    Ok(())
}

async fn get_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<CategoryMap>> {
    Ok(Json(CategoryMap {
        success: true,
        categories: category_names(&pool).await?,
    }))
}

async fn create_category(
    State(pool): State<SqlitePool>,
    State(static_dir): State<PathBuf>,
    form: Result<TypedMultipart<NewCategory>, TypedMultipartError>,
) -> ApiResponse<Json<Created>> {
    let TypedMultipart(form) = form?;
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput("category name is empty".to_owned()));
    }
    if let Some(icon) = &form.icon {
        let content_type = icon.metadata.content_type.as_deref();
        if content_type != Some(ICON_CONTENT_TYPE) {
            return Err(ApiError::InvalidInput(format!(
                "icon must be {ICON_CONTENT_TYPE}, got {}",
                content_type.unwrap_or("no content type")
            )));
        }
    }

    // the row is only committed once its icon is on disk
    let mut tx = pool.begin().await?;
    let id = categories::create_category(&mut *tx, name).await?;
    if let Some(icon) = form.icon {
        let path = static_dir.join(icon_file_name(id));
        if let Err(err) = save_icon(icon.contents, &path) {
            tx.rollback().await?;
            return Err(err.into());
        }
        tracing::info!(id, path = %path.display(), "category icon saved");
    }
    tx.commit().await?;
    tracing::info!(id, name, "category created");

    Ok(Json(Created {
        success: true,
        created_category_id: id,
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    ApiPath(id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<PageQuery>,
) -> ApiResponse<Json<QuestionListing>> {
    let listing = question_listing(&pool, &QuestionFilter::category(id), query.page()?, false).await?;
    Ok(Json(listing))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(get_categories).post(create_category))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}

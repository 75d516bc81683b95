use serde::{Deserialize, Serialize};
use sqlx::{SqliteExecutor, SqlitePool};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Takes a pool or an open transaction, so callers can tie the insert to
/// other work that may still fail.
pub async fn create_category<'e, E>(executor: E, name: &str) -> sqlx::Result<i64>
where
    E: SqliteExecutor<'e>,
{
    let id = sqlx::query("INSERT INTO categories (name) VALUES (?1)")
        .bind(name)
        .execute(executor)
        .await?
        .last_insert_rowid();

    Ok(id)
}

pub async fn get_all_categories(pool: &SqlitePool) -> sqlx::Result<Vec<Category>> {
    sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name
        FROM categories
        ORDER BY id
        "#,
    )
    .fetch_all(pool)
    .await
}

pub async fn import_categories(pool: &SqlitePool, categories: Vec<Category>) -> sqlx::Result<()> {
    let mut tx = pool.begin().await?;
    for category in categories {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name) VALUES (?1, ?2)
            ON CONFLICT (id) DO UPDATE SET name = excluded.name
            "#,
        )
        .bind(category.id)
        .bind(category.name)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    #[tokio::test]
    async fn categories_are_listed_by_id() {
        let pool = test_pool().await;
        let science = create_category(&pool, "Science").await.unwrap();
        let art = create_category(&pool, "Art").await.unwrap();

        let all = get_all_categories(&pool).await.unwrap();
        assert_eq!(
            all,
            vec![
                Category { id: science, name: "Science".into() },
                Category { id: art, name: "Art".into() },
            ]
        );
    }

    #[tokio::test]
    async fn rolled_back_insert_leaves_no_row() {
        let pool = test_pool().await;
        let mut tx = pool.begin().await.unwrap();
        create_category(&mut *tx, "Science").await.unwrap();
        tx.rollback().await.unwrap();

        assert!(get_all_categories(&pool).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn import_overwrites_existing_rows() {
        let pool = test_pool().await;
        let science = create_category(&pool, "Science").await.unwrap();

        import_categories(
            &pool,
            vec![
                Category { id: science, name: "Physics".into() },
                Category { id: 10, name: "History".into() },
            ],
        )
        .await
        .unwrap();

        let all = get_all_categories(&pool).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "Physics");
        assert_eq!(all[1].id, 10);
    }
}

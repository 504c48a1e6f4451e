//! PostgreSQL cat store.
//! Each call is a single statement; consistency comes from the database's
//! per-statement atomicity.
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::debug;

use crate::features::cats::models::{Cat, CatAge, NewCat};
use crate::features::cats::store::{CatStore, StoreError};

/// Row shape of the `cats` table
#[derive(Debug, FromRow)]
struct CatRow {
    id: i64,
    name: String,
    age: Option<String>,
    breed: Option<String>,
    description: Option<String>,
    status: String,
    image: String,
}

impl From<CatRow> for Cat {
    fn from(row: CatRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            age: row.age.as_deref().and_then(CatAge::parse),
            breed: row.breed,
            description: row.description,
            status: row.status,
            image: row.image,
        }
    }
}

pub struct PgCatStore {
    pool: PgPool,
}

impl PgCatStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatStore for PgCatStore {
    async fn list_all(&self) -> Result<Vec<Cat>, StoreError> {
        let rows = sqlx::query_as::<_, CatRow>(
            r#"
            SELECT id, name, age, breed, description, status, image
            FROM cats
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list cats: {:?}", e);
            StoreError::from(e)
        })?;

        Ok(rows.into_iter().map(Cat::from).collect())
    }

    async fn insert(&self, cat: NewCat) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO cats (name, age, breed, description, status, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&cat.name)
        .bind(cat.age.as_ref().map(CatAge::to_db))
        .bind(&cat.breed)
        .bind(&cat.description)
        .bind(&cat.status)
        .bind(&cat.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert cat: {:?}", e);
            StoreError::from(e)
        })?;

        Ok(id)
    }

    async fn update_status(&self, id: i64, status: &str) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE cats SET status = $1 WHERE id = $2")
            .bind(status)
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id, rows = result.rows_affected(), "cats: status update");
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM cats WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(id, rows = result.rows_affected(), "cats: delete");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_conversion_coerces_age() {
        let row = CatRow {
            id: 4,
            name: "Nube".into(),
            age: Some("5".into()),
            breed: None,
            description: Some("Blanca".into()),
            status: "available".into(),
            image: String::new(),
        };
        let cat = Cat::from(row);
        assert_eq!(cat.id, 4);
        assert_eq!(cat.age, Some(CatAge::Years(5)));
        assert_eq!(cat.description.as_deref(), Some("Blanca"));
    }

    #[tokio::test]
    async fn test_unreachable_database_reports_unavailable() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .acquire_timeout(std::time::Duration::from_millis(200))
            .connect_lazy("postgres://nobody@127.0.0.1:1/cats")
            .unwrap();
        let store = PgCatStore::new(pool);

        let result = store.list_all().await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
        assert!(store.ping().await.is_err());
    }
}

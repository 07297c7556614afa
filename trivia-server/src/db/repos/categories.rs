//! Category repository

use std::collections::BTreeMap;

use sqlx::PgPool;

use super::DbError;
use crate::models::Category;

/// Labels seeded into an empty categories table, in id order
pub const DEFAULT_CATEGORIES: [&str; 6] = [
    "Science",
    "Art",
    "Geography",
    "History",
    "Entertainment",
    "Sports",
];

/// id -> label; serializes as a JSON object keyed by the stringified id
pub type CategoryMap = BTreeMap<i32, String>;

pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All categories ordered by id.
    pub async fn list(&self) -> Result<Vec<Category>, DbError> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, type FROM categories ORDER BY id")
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    /// All categories as an id -> label map.
    pub async fn mapping(&self) -> Result<CategoryMap, DbError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .map(|c| (c.id, c.kind))
            .collect())
    }

    /// Insert the default categories if the table is empty.
    ///
    /// Returns how many rows were inserted (0 when categories already exist).
    pub async fn seed_defaults(&self) -> Result<u64, DbError> {
        let mut tx = self.pool.begin().await?;

        // Serialize concurrent seeders so the emptiness check holds
        sqlx::query("LOCK TABLE categories IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(&mut *tx)
            .await?;

        if existing > 0 {
            tracing::info!(existing, "categories already present, skipping seed");
            return Ok(0);
        }

        let mut inserted = 0;
        for label in DEFAULT_CATEGORIES {
            inserted += sqlx::query("INSERT INTO categories (type) VALUES ($1)")
                .bind(label)
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;
        tracing::info!(inserted, "seeded default categories");
        Ok(inserted)
    }
}

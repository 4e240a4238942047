//! Repository for the `categories` table.

use sqlx::PgPool;

use assetdesk_core::types::DbId;

use crate::models::category::{Category, CategorySearchParams, CreateCategory, UpdateCategory};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Default page size for category listing.
const DEFAULT_LIMIT: i64 = 25;

/// Maximum page size for category listing.
const MAX_LIMIT: i64 = 100;

/// Provides CRUD operations for asset categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a new category.
    pub async fn create(pool: &PgPool, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (name, description) VALUES ($1, $2) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(&input.name)
            .bind(input.description.as_deref())
            .fetch_one(pool)
            .await
    }

    /// Find a category by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE id = $1");
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Search categories by name/description, ordered by name.
    pub async fn search(
        pool: &PgPool,
        params: &CategorySearchParams,
    ) -> Result<Vec<Category>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        let mut bind_idx = 1u32;
        let where_clause = if params.q.is_some() {
            let clause = format!("WHERE (name ILIKE ${bind_idx} OR description ILIKE ${bind_idx})");
            bind_idx += 1;
            clause
        } else {
            String::new()
        };

        let query = format!(
            "SELECT {COLUMNS} FROM categories {where_clause} \
             ORDER BY name LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Category>(&query);
        if let Some(ref term) = params.q {
            q = q.bind(format!("%{term}%"));
        }
        q = q.bind(limit).bind(offset);
        q.fetch_all(pool).await
    }

    /// Update a category. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .bind(input.name.as_deref())
            .bind(input.description.as_deref())
            .fetch_optional(pool)
            .await
    }

    /// Delete a category by ID. Returns `true` if a row was deleted.
    ///
    /// Fails with a foreign-key violation while assets still reference the
    /// category; call [`Self::count_assets`] first to produce a friendly
    /// refusal.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count the assets referencing a category.
    pub async fn count_assets(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM assets WHERE category_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count.0)
    }
}

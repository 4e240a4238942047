//! Repository for the `assets` table.
//!
//! Plain CRUD plus the search/list query that backs the admin changelist
//! (joined category name, derived warranty/QR flags). Lifecycle status
//! transitions live in [`crate::repositories::AssignmentRepo`].

use sqlx::PgPool;

use assetdesk_core::types::DbId;

use crate::models::asset::{Asset, AssetListRow, AssetSearchParams, CreateAsset, UpdateAsset};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, serial_number, model, category_id, purchase_date, warranty_expiry, \
    status, qr_code, created_at, updated_at";

/// Default page size for asset listing.
const DEFAULT_LIMIT: i64 = 25;

/// Maximum page size for asset listing.
const MAX_LIMIT: i64 = 100;

/// Provides CRUD operations for the asset inventory.
pub struct AssetRepo;

impl AssetRepo {
    /// Register a new asset. The default status is AVAILABLE.
    pub async fn create(pool: &PgPool, input: &CreateAsset) -> Result<Asset, sqlx::Error> {
        let query = format!(
            "INSERT INTO assets (\
                serial_number, model, category_id, purchase_date, warranty_expiry, status\
             ) VALUES ($1, $2, $3, $4, $5, COALESCE($6, 'AVAILABLE')) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(&input.serial_number)
            .bind(&input.model)
            .bind(input.category_id)
            .bind(input.purchase_date)
            .bind(input.warranty_expiry)
            .bind(input.status.map(|s| s.as_str()))
            .fetch_one(pool)
            .await
    }

    /// Find an asset by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE id = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an asset by its unique serial number.
    pub async fn find_by_serial(
        pool: &PgPool,
        serial_number: &str,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM assets WHERE serial_number = $1");
        sqlx::query_as::<_, Asset>(&query)
            .bind(serial_number)
            .fetch_optional(pool)
            .await
    }

    /// Search assets with optional filters and pagination, newest purchases
    /// first. Returns changelist rows with the joined category name and the
    /// derived warranty/QR flags.
    pub async fn search(
        pool: &PgPool,
        params: &AssetSearchParams,
    ) -> Result<Vec<AssetListRow>, sqlx::Error> {
        let limit = params.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = params.offset.unwrap_or(0);

        // Build dynamic WHERE clauses.
        let mut conditions = Vec::new();
        let mut bind_idx = 1u32;

        if params.q.is_some() {
            conditions.push(format!(
                "(a.serial_number ILIKE ${bind_idx} OR a.model ILIKE ${bind_idx})"
            ));
            bind_idx += 1;
        }
        if params.status.is_some() {
            conditions.push(format!("a.status = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.category_id.is_some() {
            conditions.push(format!("a.category_id = ${bind_idx}"));
            bind_idx += 1;
        }
        if params.purchased_from.is_some() {
            conditions.push(format!("a.purchase_date >= ${bind_idx}"));
            bind_idx += 1;
        }
        if params.purchased_to.is_some() {
            conditions.push(format!("a.purchase_date <= ${bind_idx}"));
            bind_idx += 1;
        }
        if params.warranty_from.is_some() {
            conditions.push(format!("a.warranty_expiry >= ${bind_idx}"));
            bind_idx += 1;
        }
        if params.warranty_to.is_some() {
            conditions.push(format!("a.warranty_expiry <= ${bind_idx}"));
            bind_idx += 1;
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", conditions.join(" AND "))
        };

        let query = format!(
            "SELECT \
                a.id, a.serial_number, a.model, a.category_id, \
                c.name AS category_name, \
                a.status, a.purchase_date, a.warranty_expiry, \
                (a.warranty_expiry < CURRENT_DATE) AS warranty_expired, \
                (a.qr_code IS NOT NULL) AS has_qr_code \
             FROM assets a \
             JOIN categories c ON c.id = a.category_id \
             {where_clause} \
             ORDER BY a.purchase_date DESC, a.id DESC \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, AssetListRow>(&query);

        // Bind dynamic parameters in order.
        if let Some(ref term) = params.q {
            q = q.bind(format!("%{term}%"));
        }
        if let Some(status) = params.status {
            q = q.bind(status.as_str());
        }
        if let Some(category_id) = params.category_id {
            q = q.bind(category_id);
        }
        if let Some(from) = params.purchased_from {
            q = q.bind(from);
        }
        if let Some(to) = params.purchased_to {
            q = q.bind(to);
        }
        if let Some(from) = params.warranty_from {
            q = q.bind(from);
        }
        if let Some(to) = params.warranty_to {
            q = q.bind(to);
        }

        q = q.bind(limit).bind(offset);
        q.fetch_all(pool).await
    }

    /// Update an asset. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateAsset,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!(
            "UPDATE assets SET \
                serial_number = COALESCE($2, serial_number), \
                model = COALESCE($3, model), \
                category_id = COALESCE($4, category_id), \
                purchase_date = COALESCE($5, purchase_date), \
                warranty_expiry = COALESCE($6, warranty_expiry), \
                status = COALESCE($7, status) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(input.serial_number.as_deref())
            .bind(input.model.as_deref())
            .bind(input.category_id)
            .bind(input.purchase_date)
            .bind(input.warranty_expiry)
            .bind(input.status.map(|s| s.as_str()))
            .fetch_optional(pool)
            .await
    }

    /// Record the relative media path of a generated QR artifact.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_qr_code(
        pool: &PgPool,
        id: DbId,
        qr_code: &str,
    ) -> Result<Option<Asset>, sqlx::Error> {
        let query = format!("UPDATE assets SET qr_code = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Asset>(&query)
            .bind(id)
            .bind(qr_code)
            .fetch_optional(pool)
            .await
    }

    /// Delete an asset by ID. Returns `true` if a row was deleted.
    ///
    /// Assignment history rows cascade away with the asset.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM assets WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

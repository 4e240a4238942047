//! Asset models and DTOs.

use assetdesk_core::lifecycle::AssetStatus;
use assetdesk_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `assets` table.
///
/// `status` is a cached field: AVAILABLE/DEPLOYED mirror the existence of an
/// active assignment and are maintained by the lifecycle operations in
/// [`crate::repositories::AssignmentRepo`]; BROKEN/RETIRED are set manually.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Asset {
    pub id: DbId,
    pub serial_number: String,
    pub model: String,
    pub category_id: DbId,
    pub purchase_date: NaiveDate,
    pub warranty_expiry: NaiveDate,
    #[sqlx(try_from = "String")]
    pub status: AssetStatus,
    /// Relative media path of the QR artifact (under `qr_codes/`), once
    /// generated.
    pub qr_code: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Asset list/search row with joined category and derived display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssetListRow {
    pub id: DbId,
    pub serial_number: String,
    pub model: String,
    pub category_id: DbId,
    /// Resolved category name (from JOIN).
    pub category_name: String,
    #[sqlx(try_from = "String")]
    pub status: AssetStatus,
    pub purchase_date: NaiveDate,
    pub warranty_expiry: NaiveDate,
    /// Derived: strictly past `warranty_expiry` as of the database clock.
    pub warranty_expired: bool,
    /// Derived: a QR artifact has been generated for this asset.
    pub has_qr_code: bool,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for registering a new asset.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAsset {
    pub serial_number: String,
    pub model: String,
    pub category_id: DbId,
    pub purchase_date: NaiveDate,
    pub warranty_expiry: NaiveDate,
    /// Defaults to AVAILABLE.
    pub status: Option<AssetStatus>,
}

/// DTO for updating an existing asset.
///
/// `qr_code` is deliberately absent: the artifact path is managed by the QR
/// generation actions only.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAsset {
    pub serial_number: Option<String>,
    pub model: Option<String>,
    pub category_id: Option<DbId>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_expiry: Option<NaiveDate>,
    /// Manual status changes (BROKEN/RETIRED live here; deploy/return own
    /// AVAILABLE/DEPLOYED).
    pub status: Option<AssetStatus>,
}

/// Query parameters for searching/listing assets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssetSearchParams {
    /// Term matched against serial number and model (ILIKE).
    pub q: Option<String>,
    /// Filter by status.
    pub status: Option<AssetStatus>,
    /// Filter by category.
    pub category_id: Option<DbId>,
    /// Purchase date range (inclusive).
    pub purchased_from: Option<NaiveDate>,
    pub purchased_to: Option<NaiveDate>,
    /// Warranty expiry range (inclusive).
    pub warranty_from: Option<NaiveDate>,
    pub warranty_to: Option<NaiveDate>,
    /// Maximum results (default 25, max 100).
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}

/// Request body for the bulk QR generation action.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkQrRequest {
    pub asset_ids: Vec<DbId>,
}

/// Result of the bulk QR generation action.
#[derive(Debug, Clone, Serialize)]
pub struct BulkQrResult {
    /// Number of assets selected.
    pub requested: usize,
    /// Number of QR artifacts successfully generated.
    pub generated: usize,
}

//! Assignment models, DTOs and lifecycle outcomes.

use assetdesk_core::lifecycle::{self, DeploymentConflict};
use assetdesk_core::types::{DbId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `assignments` table.
///
/// An assignment is active while `actual_return_date` is NULL. At most one
/// active assignment may exist per asset; the lifecycle operations enforce
/// this and a partial unique index backstops it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Assignment {
    pub id: DbId,
    pub asset_id: DbId,
    pub employee_id: DbId,
    pub assigned_date: NaiveDate,
    pub return_expected_date: Option<NaiveDate>,
    pub actual_return_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Assignment {
    /// Whether this assignment is still open (asset not yet returned).
    pub fn is_active(&self) -> bool {
        lifecycle::is_active(self.actual_return_date)
    }
}

/// Assignment list/search row with joined asset and employee display fields.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AssignmentRow {
    pub id: DbId,
    pub asset_id: DbId,
    pub employee_id: DbId,
    /// Serial number of the assigned asset (from JOIN).
    pub asset_serial_number: String,
    /// Model of the assigned asset (from JOIN).
    pub asset_model: String,
    /// Badge/HR code of the holder (from JOIN).
    pub employee_code: String,
    /// Full name of the holder (from JOIN).
    pub employee_name: String,
    pub assigned_date: NaiveDate,
    pub return_expected_date: Option<NaiveDate>,
    pub actual_return_date: Option<NaiveDate>,
    /// Derived: `actual_return_date IS NULL`.
    pub is_active: bool,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for deploying an asset to an employee.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAssignment {
    pub asset_id: DbId,
    pub employee_id: DbId,
    /// Defaults to today.
    pub assigned_date: Option<NaiveDate>,
    pub return_expected_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// DTO for editing an assignment's non-lifecycle fields.
///
/// Dates that drive the lifecycle (`assigned_date`, `actual_return_date`) are
/// not editable here; returns go through the dedicated return operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateAssignment {
    pub return_expected_date: Option<NaiveDate>,
    pub notes: Option<String>,
}

/// DTO for returning a deployed asset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReturnAssignment {
    /// Defaults to today.
    pub actual_return_date: Option<NaiveDate>,
}

/// Query parameters for searching/listing assignments.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentSearchParams {
    /// Term matched against asset serial/model and employee code/name
    /// (ILIKE).
    pub q: Option<String>,
    /// `true` keeps only open assignments, `false` only closed ones.
    pub active: Option<bool>,
    /// Assigned date range (inclusive).
    pub assigned_from: Option<NaiveDate>,
    pub assigned_to: Option<NaiveDate>,
    /// Expected return date range (inclusive).
    pub expected_from: Option<NaiveDate>,
    pub expected_to: Option<NaiveDate>,
    /// Actual return date range (inclusive).
    pub returned_from: Option<NaiveDate>,
    pub returned_to: Option<NaiveDate>,
    /// Maximum results (default 25, max 100).
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Lifecycle outcomes
// ---------------------------------------------------------------------------

/// Result of a deployment attempt.
///
/// Infrastructure failures surface as `sqlx::Error`; everything the caller
/// must translate into a client response is an explicit variant here.
#[derive(Debug)]
pub enum DeployOutcome {
    /// Deployment accepted; carries the created assignment.
    Deployed(Assignment),
    /// The asset already has an active holder.
    Conflict(DeploymentConflict),
    /// No asset with the requested id.
    AssetNotFound,
    /// No employee with the requested id.
    EmployeeNotFound,
}

/// Result of a return attempt.
#[derive(Debug)]
pub enum ReturnOutcome {
    /// Return recorded; carries the closed assignment.
    Returned(Assignment),
    /// The assignment was already closed on the given date. Returns are
    /// terminal; the stored date is kept.
    AlreadyReturned { actual_return_date: NaiveDate },
    /// No assignment with the requested id.
    NotFound,
}

//! Employee models and DTOs.

use assetdesk_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `employees` table.
///
/// `employee_id` is the human-facing badge/HR code, distinct from the
/// surrogate `id` primary key.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Employee {
    pub id: DbId,
    pub employee_id: String,
    pub full_name: String,
    pub email: String,
    pub department: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// DTO for registering a new employee.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateEmployee {
    pub employee_id: String,
    pub full_name: String,
    #[validate(email)]
    pub email: String,
    pub department: String,
}

/// DTO for updating an existing employee.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateEmployee {
    pub employee_id: Option<String>,
    pub full_name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub department: Option<String>,
}

/// Query parameters for searching/listing employees.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeSearchParams {
    /// Term matched against employee id, full name, email and department
    /// (ILIKE).
    pub q: Option<String>,
    /// Exact department filter.
    pub department: Option<String>,
    /// Maximum results (default 25, max 100).
    pub limit: Option<i64>,
    /// Offset for pagination.
    pub offset: Option<i64>,
}

//! Assignment lifecycle rules.
//!
//! Pure domain logic for the deploy/return state machine: the asset status
//! vocabulary, the single-active-assignment invariant check, and the display
//! labels used in conflict messages. Database reads and writes are performed
//! by the caller (repository layer), which applies these checks inside its
//! transaction.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Asset deployment status.
///
/// `Available` and `Deployed` are managed by the lifecycle operations;
/// `Broken` and `Retired` are set manually and never touched by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AssetStatus {
    Available,
    Deployed,
    Broken,
    Retired,
}

impl AssetStatus {
    /// The database representation (TEXT column, CHECK-constrained).
    pub fn as_str(self) -> &'static str {
        match self {
            AssetStatus::Available => "AVAILABLE",
            AssetStatus::Deployed => "DEPLOYED",
            AssetStatus::Broken => "BROKEN",
            AssetStatus::Retired => "RETIRED",
        }
    }
}

impl fmt::Display for AssetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized status strings coming out of the database.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown asset status: {0:?}")]
pub struct ParseAssetStatusError(pub String);

impl FromStr for AssetStatus {
    type Err = ParseAssetStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(AssetStatus::Available),
            "DEPLOYED" => Ok(AssetStatus::Deployed),
            "BROKEN" => Ok(AssetStatus::Broken),
            "RETIRED" => Ok(AssetStatus::Retired),
            other => Err(ParseAssetStatusError(other.to_string())),
        }
    }
}

impl TryFrom<String> for AssetStatus {
    type Error = ParseAssetStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The employee currently holding an asset, as reported by its most recent
/// active assignment.
#[derive(Debug, Clone)]
pub struct ActiveHolder {
    pub assignment_id: DbId,
    /// Employee display label, e.g. `"John Doe (EMP-001)"`.
    pub employee_label: String,
}

/// A refused deployment: the asset is already checked out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Asset \"{asset}\" is already deployed to {holder}. Please return it first before reassigning.")]
pub struct DeploymentConflict {
    /// Asset display label, e.g. `"Dell Latitude 5420 (DEMO-001)"`.
    pub asset: String,
    /// Label of the employee currently holding the asset.
    pub holder: String,
}

/// Decide whether a new assignment may be created for an asset.
///
/// The precondition gates on the cached status first: only a `Deployed`
/// asset triggers the active-assignment lookup, and only an actually
/// existing active assignment refuses the deployment. A `Deployed` status
/// with no active assignment row (stale cache) therefore permits the
/// deployment; the assignment set is the source of truth.
pub fn check_deployment(
    asset_label: &str,
    status: AssetStatus,
    active: Option<&ActiveHolder>,
) -> Result<(), DeploymentConflict> {
    if status != AssetStatus::Deployed {
        return Ok(());
    }
    match active {
        Some(holder) => Err(DeploymentConflict {
            asset: asset_label.to_string(),
            holder: holder.employee_label.clone(),
        }),
        None => Ok(()),
    }
}

/// An assignment is active while its actual return date is unset.
pub fn is_active(actual_return_date: Option<NaiveDate>) -> bool {
    actual_return_date.is_none()
}

/// Asset display label: `"{model} ({serial_number})"`.
pub fn asset_label(model: &str, serial_number: &str) -> String {
    format!("{model} ({serial_number})")
}

/// Employee display label: `"{full_name} ({employee_id})"`.
pub fn employee_label(full_name: &str, employee_id: &str) -> String {
    format!("{full_name} ({employee_id})")
}

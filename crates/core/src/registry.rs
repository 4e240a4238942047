//! Reference-data protection rules.
//!
//! Pure checks for operations on the category registry. The caller supplies
//! counts gathered from the repository layer.

use serde::Serialize;

/// Result of checking whether a category can safely be deleted.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryDeletionCheck {
    /// Whether no assets reference the category and it can be deleted.
    pub is_safe: bool,
    /// Number of assets referencing the category.
    pub referencing_assets: i64,
    /// Human-readable summary of the check.
    pub message: String,
}

/// Categories are protected from deletion while any asset references them.
pub fn check_category_deletion(name: &str, referencing_assets: i64) -> CategoryDeletionCheck {
    if referencing_assets == 0 {
        CategoryDeletionCheck {
            is_safe: true,
            referencing_assets: 0,
            message: format!("Category \"{name}\" is unused. Safe to delete."),
        }
    } else {
        CategoryDeletionCheck {
            is_safe: false,
            referencing_assets,
            message: format!(
                "Cannot delete category \"{name}\": {referencing_assets} asset(s) still reference it."
            ),
        }
    }
}

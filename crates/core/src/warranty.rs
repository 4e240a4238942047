//! Warranty expiry computation.
//!
//! Purely a point-in-time comparison against wall-clock time; nothing is
//! stored. Callers pass "today" explicitly so the rule stays testable.

use chrono::NaiveDate;
use serde::Serialize;

/// Derived warranty state for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WarrantyStatus {
    Active,
    Expired,
}

/// A warranty is expired strictly after its expiry date: an asset whose
/// warranty expires today is still covered.
pub fn is_expired(warranty_expiry: NaiveDate, today: NaiveDate) -> bool {
    today > warranty_expiry
}

/// Classify an asset's warranty as of `today`.
pub fn status(warranty_expiry: NaiveDate, today: NaiveDate) -> WarrantyStatus {
    if is_expired(warranty_expiry, today) {
        WarrantyStatus::Expired
    } else {
        WarrantyStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn expired_strictly_after_expiry() {
        assert!(is_expired(d(2024, 6, 30), d(2024, 7, 1)));
    }

    #[test]
    fn expiry_today_is_still_covered() {
        assert!(!is_expired(d(2024, 6, 30), d(2024, 6, 30)));
    }

    #[test]
    fn future_expiry_is_covered() {
        assert!(!is_expired(d(2025, 1, 1), d(2024, 6, 30)));
    }

    #[test]
    fn status_labels() {
        assert_eq!(status(d(2024, 6, 30), d(2024, 7, 1)), WarrantyStatus::Expired);
        assert_eq!(status(d(2024, 6, 30), d(2024, 6, 30)), WarrantyStatus::Active);
    }
}

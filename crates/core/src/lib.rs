//! Pure domain logic for the assetdesk ITAM service.
//!
//! Nothing in this crate touches the database or the filesystem beyond
//! in-memory image encoding; callers (the db and api crates) feed in data
//! from the repository layer and apply the results.

pub mod error;
pub mod lifecycle;
pub mod qr;
pub mod registry;
pub mod types;
pub mod warranty;

//! HTTP layer for the assetdesk ITAM service.
//!
//! Exposed as a library so integration tests can build the exact router
//! the binary serves, middleware stack included.

pub mod config;
pub mod error;
pub mod handlers;
pub mod media;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;

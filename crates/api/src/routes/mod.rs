pub mod assets;
pub mod assignments;
pub mod categories;
pub mod employees;
pub mod health;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/admin` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                    portal metadata (GET)
///
/// /categories                          list, create
/// /categories/{id}                     get, update, delete (delete refused while referenced)
///
/// /assets                              list, create
/// /assets/generate-qr                  bulk QR generation (POST)
/// /assets/{id}                         detail, update, delete
/// /assets/{id}/generate-qr             single QR generation (POST)
///
/// /employees                           list, create
/// /employees/departments               distinct department names (GET)
/// /employees/{id}                      get, update, delete
///
/// /assignments                         list, deploy (POST)
/// /assignments/{id}                    get, update, delete
/// /assignments/{id}/return             record return (POST)
/// ```
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // Portal landing metadata.
        .route("/", get(handlers::portal::index))
        // Reference data for assets.
        .nest("/categories", categories::router())
        // Asset registry and QR actions.
        .nest("/assets", assets::router())
        // Employee directory.
        .nest("/employees", employees::router())
        // Assignment lifecycle.
        .nest("/assignments", assignments::router())
}

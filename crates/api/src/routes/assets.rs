//! Route definitions for assets and QR generation actions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assets;
use crate::state::AppState;

/// Routes mounted at `/admin/assets`.
///
/// The static `/generate-qr` segment takes precedence over `/{id}`.
///
/// ```text
/// GET    /                     -> list_assets
/// POST   /                     -> create_asset
/// POST   /generate-qr          -> generate_qr_bulk
/// GET    /{id}                 -> get_asset (detail with history)
/// PUT    /{id}                 -> update_asset
/// DELETE /{id}                 -> delete_asset
/// POST   /{id}/generate-qr     -> generate_qr
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(assets::list_assets).post(assets::create_asset))
        .route("/generate-qr", post(assets::generate_qr_bulk))
        .route(
            "/{id}",
            get(assets::get_asset)
                .put(assets::update_asset)
                .delete(assets::delete_asset),
        )
        .route("/{id}/generate-qr", post(assets::generate_qr))
}

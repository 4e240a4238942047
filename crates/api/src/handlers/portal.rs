//! Admin portal entry points.

use axum::extract::State;
use axum::response::Redirect;
use axum::Json;
use serde::Serialize;

use crate::response::DataResponse;
use crate::state::AppState;

/// Resources exposed under `/admin`, in portal display order.
const ENTITIES: &[&str] = &["categories", "assets", "employees", "assignments"];

/// Branding and navigation metadata for the admin portal landing page.
#[derive(Debug, Serialize)]
pub struct PortalMeta {
    pub header: String,
    pub title: String,
    pub index_title: String,
    pub entities: &'static [&'static str],
}

/// The service has no public surface; the root forwards to the portal.
pub async fn root_redirect() -> Redirect {
    Redirect::temporary("/admin")
}

pub async fn index(State(state): State<AppState>) -> Json<DataResponse<PortalMeta>> {
    let site = &state.config.site;
    Json(DataResponse::new(PortalMeta {
        header: site.header.clone(),
        title: site.title.clone(),
        index_title: site.index_title.clone(),
        entities: ENTITIES,
    }))
}

//! Route definitions for assignments.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::assignments;
use crate::state::AppState;

/// Routes mounted at `/admin/assignments`.
///
/// ```text
/// GET    /                -> list_assignments
/// POST   /                -> create_assignment (deploy)
/// GET    /{id}            -> get_assignment
/// PUT    /{id}            -> update_assignment
/// DELETE /{id}            -> delete_assignment
/// POST   /{id}/return     -> return_assignment
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(assignments::list_assignments).post(assignments::create_assignment),
        )
        .route(
            "/{id}",
            get(assignments::get_assignment)
                .put(assignments::update_assignment)
                .delete(assignments::delete_assignment),
        )
        .route("/{id}/return", post(assignments::return_assignment))
}

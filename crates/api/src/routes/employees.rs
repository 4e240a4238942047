//! Route definitions for employees.

use axum::routing::get;
use axum::Router;

use crate::handlers::employees;
use crate::state::AppState;

/// Routes mounted at `/admin/employees`.
///
/// The static `/departments` segment takes precedence over `/{id}`.
///
/// ```text
/// GET    /               -> list_employees
/// POST   /               -> create_employee
/// GET    /departments    -> list_departments
/// GET    /{id}           -> get_employee
/// PUT    /{id}           -> update_employee
/// DELETE /{id}           -> delete_employee
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(employees::list_employees).post(employees::create_employee),
        )
        .route("/departments", get(employees::list_departments))
        .route(
            "/{id}",
            get(employees::get_employee)
                .put(employees::update_employee)
                .delete(employees::delete_employee),
        )
}

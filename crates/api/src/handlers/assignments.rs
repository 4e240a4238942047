//! Assignment handlers.
//!
//! Creation and return run through the transactional lifecycle operations
//! in the repository; this layer only translates their outcomes into HTTP
//! statuses.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use assetdesk_core::error::CoreError;
use assetdesk_core::types::DbId;
use assetdesk_db::models::assignment::{
    Assignment, AssignmentRow, AssignmentSearchParams, CreateAssignment, DeployOutcome,
    ReturnAssignment, ReturnOutcome, UpdateAssignment,
};
use assetdesk_db::repositories::AssignmentRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

pub async fn list_assignments(
    State(state): State<AppState>,
    Query(params): Query<AssignmentSearchParams>,
) -> AppResult<Json<DataResponse<Vec<AssignmentRow>>>> {
    let items = AssignmentRepo::search(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(items)))
}

/// Deploy an asset to an employee. Refused with a 409 naming the current
/// holder while another assignment of the asset is still open.
pub async fn create_assignment(
    State(state): State<AppState>,
    Json(input): Json<CreateAssignment>,
) -> AppResult<(StatusCode, Json<DataResponse<Assignment>>)> {
    match AssignmentRepo::deploy(&state.pool, &input).await? {
        DeployOutcome::Deployed(assignment) => {
            tracing::info!(
                assignment_id = assignment.id,
                asset_id = assignment.asset_id,
                employee_id = assignment.employee_id,
                "Deployed asset"
            );
            Ok((StatusCode::CREATED, Json(DataResponse::new(assignment))))
        }
        DeployOutcome::Conflict(conflict) => {
            Err(CoreError::Conflict(conflict.to_string()).into())
        }
        DeployOutcome::AssetNotFound => Err(CoreError::NotFound {
            entity: "Asset",
            id: input.asset_id,
        }
        .into()),
        DeployOutcome::EmployeeNotFound => Err(CoreError::NotFound {
            entity: "Employee",
            id: input.employee_id,
        }
        .into()),
    }
}

pub async fn get_assignment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AssignmentRow>>> {
    let found = AssignmentRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Assignment",
            id,
        })?;
    Ok(Json(DataResponse::new(found)))
}

pub async fn update_assignment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAssignment>,
) -> AppResult<Json<DataResponse<Assignment>>> {
    let updated = AssignmentRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Assignment",
            id,
        })?;
    Ok(Json(DataResponse::new(updated)))
}

/// Close an open assignment and free the asset. A second return attempt is
/// refused; returns are terminal.
pub async fn return_assignment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ReturnAssignment>,
) -> AppResult<Json<DataResponse<Assignment>>> {
    match AssignmentRepo::record_return(&state.pool, id, &input).await? {
        ReturnOutcome::Returned(assignment) => {
            tracing::info!(
                assignment_id = assignment.id,
                asset_id = assignment.asset_id,
                "Returned asset"
            );
            Ok(Json(DataResponse::new(assignment)))
        }
        ReturnOutcome::AlreadyReturned { actual_return_date } => Err(CoreError::Conflict(
            format!("Assignment was already returned on {actual_return_date}"),
        )
        .into()),
        ReturnOutcome::NotFound => Err(CoreError::NotFound {
            entity: "Assignment",
            id,
        }
        .into()),
    }
}

/// Hard-delete an assignment record. This is a history edit, not a return;
/// the asset's cached status is untouched.
pub async fn delete_assignment(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AssignmentRepo::delete(&state.pool, id).await? {
        tracing::info!(assignment_id = id, "Deleted assignment");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound {
            entity: "Assignment",
            id,
        }
        .into())
    }
}

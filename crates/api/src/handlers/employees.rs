//! Employee handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use validator::Validate;

use assetdesk_core::error::CoreError;
use assetdesk_core::types::DbId;
use assetdesk_db::models::employee::{
    CreateEmployee, Employee, EmployeeSearchParams, UpdateEmployee,
};
use assetdesk_db::repositories::EmployeeRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

pub async fn list_employees(
    State(state): State<AppState>,
    Query(params): Query<EmployeeSearchParams>,
) -> AppResult<Json<DataResponse<Vec<Employee>>>> {
    let items = EmployeeRepo::search(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(items)))
}

/// Distinct department names, for filter dropdowns.
pub async fn list_departments(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let departments = EmployeeRepo::list_departments(&state.pool).await?;
    Ok(Json(DataResponse::new(departments)))
}

pub async fn create_employee(
    State(state): State<AppState>,
    Json(input): Json<CreateEmployee>,
) -> AppResult<(StatusCode, Json<DataResponse<Employee>>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let created = EmployeeRepo::create(&state.pool, &input).await?;
    tracing::info!(
        employee_id = created.id,
        code = %created.employee_id,
        "Created employee"
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}

pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Employee>>> {
    let found = EmployeeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
            id,
        })?;
    Ok(Json(DataResponse::new(found)))
}

pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEmployee>,
) -> AppResult<Json<DataResponse<Employee>>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let updated = EmployeeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Employee",
            id,
        })?;
    Ok(Json(DataResponse::new(updated)))
}

pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if EmployeeRepo::delete(&state.pool, id).await? {
        tracing::info!(employee_id = id, "Deleted employee");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound {
            entity: "Employee",
            id,
        }
        .into())
    }
}

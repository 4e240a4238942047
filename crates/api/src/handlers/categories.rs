//! Category handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use assetdesk_core::error::CoreError;
use assetdesk_core::registry;
use assetdesk_core::types::DbId;
use assetdesk_db::models::category::{
    Category, CategorySearchParams, CreateCategory, UpdateCategory,
};
use assetdesk_db::repositories::CategoryRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategorySearchParams>,
) -> AppResult<Json<DataResponse<Vec<Category>>>> {
    let items = CategoryRepo::search(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(items)))
}

pub async fn create_category(
    State(state): State<AppState>,
    Json(input): Json<CreateCategory>,
) -> AppResult<(StatusCode, Json<DataResponse<Category>>)> {
    let created = CategoryRepo::create(&state.pool, &input).await?;
    tracing::info!(category_id = created.id, name = %created.name, "Created category");
    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Category>>> {
    let found = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Category",
            id,
        })?;
    Ok(Json(DataResponse::new(found)))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCategory>,
) -> AppResult<Json<DataResponse<Category>>> {
    let updated = CategoryRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Category",
            id,
        })?;
    Ok(Json(DataResponse::new(updated)))
}

/// Deletion is refused while any asset references the category. The check
/// runs here for a friendly message; the RESTRICT foreign key backs it up
/// against races.
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    let category = CategoryRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Category",
            id,
        })?;

    let referencing = CategoryRepo::count_assets(&state.pool, id).await?;
    let check = registry::check_category_deletion(&category.name, referencing);
    if !check.is_safe {
        return Err(CoreError::Conflict(check.message).into());
    }

    if CategoryRepo::delete(&state.pool, id).await? {
        tracing::info!(category_id = id, "Deleted category");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound {
            entity: "Category",
            id,
        }
        .into())
    }
}

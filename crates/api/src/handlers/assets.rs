//! Asset handlers, including QR code generation.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::Serialize;

use assetdesk_core::error::CoreError;
use assetdesk_core::qr;
use assetdesk_core::types::DbId;
use assetdesk_core::warranty::{self, WarrantyStatus};
use assetdesk_db::models::asset::{
    Asset, AssetListRow, AssetSearchParams, BulkQrRequest, BulkQrResult, CreateAsset, UpdateAsset,
};
use assetdesk_db::models::assignment::AssignmentRow;
use assetdesk_db::repositories::{AssetRepo, AssignmentRepo, CategoryRepo};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Full asset record with derived display data and assignment history.
#[derive(Debug, Serialize)]
pub struct AssetDetail {
    #[serde(flatten)]
    pub asset: Asset,
    pub category_name: String,
    pub warranty: WarrantyStatus,
    /// URL encoded into the asset's QR code, when one can be built.
    pub qr_payload: Option<String>,
    pub assignments: Vec<AssignmentRow>,
}

pub async fn list_assets(
    State(state): State<AppState>,
    Query(params): Query<AssetSearchParams>,
) -> AppResult<Json<DataResponse<Vec<AssetListRow>>>> {
    let items = AssetRepo::search(&state.pool, &params).await?;
    Ok(Json(DataResponse::new(items)))
}

pub async fn create_asset(
    State(state): State<AppState>,
    Json(input): Json<CreateAsset>,
) -> AppResult<(StatusCode, Json<DataResponse<Asset>>)> {
    let created = AssetRepo::create(&state.pool, &input).await?;
    tracing::info!(
        asset_id = created.id,
        serial_number = %created.serial_number,
        "Created asset"
    );
    Ok((StatusCode::CREATED, Json(DataResponse::new(created))))
}

pub async fn get_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<AssetDetail>>> {
    let asset = AssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Asset", id })?;
    let category = CategoryRepo::find_by_id(&state.pool, asset.category_id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Category",
            id: asset.category_id,
        })?;
    let assignments = AssignmentRepo::list_for_asset(&state.pool, id).await?;

    let warranty = warranty::status(asset.warranty_expiry, Utc::now().date_naive());
    let qr_payload = qr::payload_url(state.config.site.base_domain.as_deref(), Some(asset.id));

    Ok(Json(DataResponse::new(AssetDetail {
        asset,
        category_name: category.name,
        warranty,
        qr_payload,
        assignments,
    })))
}

pub async fn update_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateAsset>,
) -> AppResult<Json<DataResponse<Asset>>> {
    let updated = AssetRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(CoreError::NotFound { entity: "Asset", id })?;
    Ok(Json(DataResponse::new(updated)))
}

/// Removes the asset and, via cascade, its assignment history. Any QR
/// artifact on disk is left behind.
pub async fn delete_asset(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if AssetRepo::delete(&state.pool, id).await? {
        tracing::info!(asset_id = id, "Deleted asset");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(CoreError::NotFound { entity: "Asset", id }.into())
    }
}

/// Render and store the QR image for one asset.
pub async fn generate_qr(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Asset>>> {
    let updated = generate_for_asset(&state, id).await?;
    Ok(Json(DataResponse::new(updated)))
}

/// Render and store QR images for a batch of assets. Per-asset failures
/// are logged and skipped; the batch reports only the success count.
pub async fn generate_qr_bulk(
    State(state): State<AppState>,
    Json(input): Json<BulkQrRequest>,
) -> AppResult<Json<DataResponse<BulkQrResult>>> {
    let requested = input.asset_ids.len();
    let mut generated = 0usize;
    for &id in &input.asset_ids {
        match generate_for_asset(&state, id).await {
            Ok(_) => generated += 1,
            Err(err) => {
                tracing::warn!(asset_id = id, error = %err, "Skipping QR generation");
            }
        }
    }
    Ok(Json(DataResponse::new(BulkQrResult {
        requested,
        generated,
    })))
}

/// Build the payload URL, render the PNG, write it to the media store, and
/// persist the artifact path on the asset.
async fn generate_for_asset(state: &AppState, id: DbId) -> Result<Asset, AppError> {
    let asset = AssetRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Asset", id })?;

    let payload = qr::payload_url(state.config.site.base_domain.as_deref(), Some(asset.id))
        .ok_or_else(|| AppError::InternalError("QR payload requires a saved asset".to_string()))?;
    let png = qr::render_png(&payload).map_err(|e| AppError::InternalError(e.to_string()))?;

    let filename = qr::artifact_filename(&asset.serial_number);
    let relative = state
        .media
        .store_qr(&filename, &png)
        .map_err(|e| AppError::InternalError(format!("Failed to store QR artifact: {e}")))?;

    let updated = AssetRepo::set_qr_code(&state.pool, id, &relative)
        .await?
        .ok_or(CoreError::NotFound { entity: "Asset", id })?;
    tracing::info!(asset_id = id, path = %relative, "Generated QR code");
    Ok(updated)
}

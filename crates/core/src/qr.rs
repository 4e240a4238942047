//! QR payload construction and image rendering.
//!
//! The payload is a stable lookup URL for an asset's administrative detail
//! record. Rendering is bytes-in/bytes-out; writing the artifact to the
//! media store is the caller's concern, as is persisting the resulting path
//! on the asset record.

use image::Luma;
use qrcode::types::QrError as QrEncodeError;
use qrcode::{EcLevel, QrCode};

use crate::types::DbId;

/// Rendered pixels per QR module.
const MODULE_PIXELS: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("QR encoding failed: {0}")]
    Encode(#[from] QrEncodeError),

    #[error("PNG encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Relative administrative detail path for an asset.
pub fn admin_detail_path(asset_id: DbId) -> String {
    format!("/admin/assets/{asset_id}")
}

/// Build the lookup URL encoded into an asset's QR image.
///
/// The URL embeds the asset's durable primary key, so there is nothing to
/// encode for an asset that has not been assigned one yet (`None`). Falls
/// back to the relative detail path when no base domain is configured.
pub fn payload_url(base_domain: Option<&str>, asset_id: Option<DbId>) -> Option<String> {
    let path = admin_detail_path(asset_id?);
    Some(match base_domain {
        Some(domain) => format!("{}{path}", domain.trim_end_matches('/')),
        None => path,
    })
}

/// Deterministic artifact filename derived from the serial number.
pub fn artifact_filename(serial_number: &str) -> String {
    format!("asset_{serial_number}_qr.png")
}

/// Render a payload URL as a black-on-white PNG.
///
/// Error-correction level L, 4-module quiet zone, 10 px per module.
pub fn render_png(payload: &str) -> Result<Vec<u8>, QrError> {
    let code = QrCode::with_error_correction_level(payload.as_bytes(), EcLevel::L)?;
    let img = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PIXELS, MODULE_PIXELS)
        .quiet_zone(true)
        .build();

    let mut bytes = Vec::new();
    image::DynamicImage::ImageLuma8(img)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

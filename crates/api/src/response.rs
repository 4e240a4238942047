//! Common response envelope.
//!
//! Every successful JSON response wraps its payload in `{"data": ...}` so
//! clients can distinguish payloads from the `{"error", "code"}` shape that
//! [`crate::error::AppError`] produces.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

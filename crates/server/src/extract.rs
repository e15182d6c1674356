// crates/server/src/extract.rs
//! Request extractors whose rejections use the `ErrorResponse` body.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// `axum::Json` with rejections mapped through `ApiError::InvalidBody`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

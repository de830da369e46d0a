// src/common/extract.rs
// Extratores que rejeitam com `AppError`, para que todo erro saia como `{detail}`.

use axum::extract::{FromRequest, FromRequestParts};

use crate::common::error::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);

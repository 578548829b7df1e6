// src/presentation/http/extractors.rs
//! Wrappers around axum's extractors that reject with the service's JSON
//! error body instead of axum's plain-text defaults.
use axum::extract::{FromRequest, FromRequestParts};

use super::error::HttpError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(HttpError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(HttpError))]
pub struct ApiQuery<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(HttpError))]
pub struct ApiPath<T>(pub T);

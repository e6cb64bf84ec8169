// SPDX-License-Identifier: MIT
// Copyright 2026 SEA Catering contributors

//! Puts the cause of a 500 into the error body.
//!
//! Only installed outside production.

use crate::error::{ErrorResponse, InternalDetail};
use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

/// Rebuild error responses that carry an [`InternalDetail`] with an `error` field.
pub async fn expose_internal_details(req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    let Some(InternalDetail(detail)) = response.extensions().get::<InternalDetail>().cloned()
    else {
        return response;
    };

    let body = ErrorResponse {
        success: false,
        message: "Internal server error".to_string(),
        error: Some(detail),
    };

    (response.status(), Json(body)).into_response()
}

//! Backend proxy handler
//!
//! Innermost stage of the protected pipeline: resolves the request path
//! against the upstream route table and forwards it through the upstream
//! client. Requests only arrive here after tenant resolution, analytics,
//! rate limiting, and chaos have all let them through.

use application::ProxiedRequest;
use axum::{
    body::Body,
    extract::{Request, State},
    http::{StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

/// Largest request body the proxy will buffer
const MAX_PROXY_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Forward a request to its backend
pub async fn forward(State(state): State<AppState>, req: Request) -> Response {
    let path = req.uri().path().to_string();

    let Some(route) = state.upstream_router.resolve(&path).cloned() else {
        return ApiError::NotFound(format!("No backend for {path}")).into_response();
    };

    let method = req.method().to_string();
    let path_and_query = req
        .uri()
        .path_and_query()
        .map_or_else(|| path.clone(), ToString::to_string);
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let body = match axum::body::to_bytes(req.into_body(), MAX_PROXY_BODY_BYTES).await {
        Ok(bytes) => bytes,
        Err(e) => {
            return ApiError::BadRequest(format!("Unreadable request body: {e}")).into_response();
        },
    };

    let proxied = ProxiedRequest {
        method,
        path_and_query,
        body,
        content_type,
    };

    match state.upstream.forward(&route.upstream_url, proxied).await {
        Ok(upstream) => {
            let status =
                StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
            let mut builder = Response::builder().status(status);
            if let Some(content_type) = upstream.content_type {
                builder = builder.header(CONTENT_TYPE, content_type);
            }
            builder.body(Body::from(upstream.body)).map_or_else(
                |e| ApiError::Internal(e.to_string()).into_response(),
                |response| response,
            )
        },
        Err(e) => {
            warn!(
                error = %e,
                upstream = %route.upstream_url,
                path = %path,
                "Upstream dispatch failed"
            );
            ApiError::from(e).into_response()
        },
    }
}

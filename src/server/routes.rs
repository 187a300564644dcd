use axum::{
    body::Bytes,
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

use crate::response::CanonicalResponse;
use crate::server::AppContext;
use crate::service::{ApiError, ExtractRequest};

pub async fn home() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "yt-dlp server running",
        "usage": {
            "POST": "/extract  with JSON { 'url': '<video_url>' }",
            "GET": "/extract?url=<video_url>"
        }
    }))
}

pub async fn health(State(ctx): State<AppContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "provider": ctx.provider_status,
    }))
}

pub async fn extract_query(
    State(ctx): State<AppContext>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<CanonicalResponse>, ApiError> {
    let request = ExtractRequest {
        url: params.get("url").cloned(),
        max_retries: params.get("max_retries").and_then(|n| n.trim().parse().ok()),
    };
    let response = ctx.service.handle_extract_request(request).await?;
    Ok(Json(response))
}

pub async fn extract_body(
    State(ctx): State<AppContext>,
    body: Bytes,
) -> Result<Json<CanonicalResponse>, ApiError> {
    let response = ctx
        .service
        .handle_extract_request(request_from_body(&body))
        .await?;
    Ok(Json(response))
}

/// Missing or malformed bodies become an empty request
fn request_from_body(body: &[u8]) -> ExtractRequest {
    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            if !body.is_empty() {
                tracing::debug!("Ignoring unparseable request body: {}", e);
            }
            return ExtractRequest::default();
        }
    };

    ExtractRequest {
        url: value.get("url").and_then(Value::as_str).map(String::from),
        max_retries: value
            .get("max_retries")
            .and_then(Value::as_u64)
            .map(|n| n.min(u32::MAX as u64) as u32),
    }
}

use axum::{
    Json,
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Response},
};
use http_body_util::BodyExt;
use tracing::{debug, warn};

use super::{
    models::{ChapterRequest, HealthResponse, ProxyQuery},
    state::AppState,
};
use crate::api::error::ApiError;
use crate::{chapter, proxy};

/// Chapter extraction endpoint (POST /api/fetch-manga)
///
/// ## Flow:
/// 1. Require a JSON body no larger than `server.max_request_bytes`
/// 2. Reject a missing or blank `url` with 400
/// 3. Fetch the page and run the extraction cascade
/// 4. Answer with the chapter, or `success: false` plus an HTML sample when
///    no strategy found images
///
/// Upstream statuses below 500 other than 200 are mirrored; transport
/// failures and 5xx answers become a 500.
pub async fn fetch_manga(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: axum::body::Body,
) -> Result<impl IntoResponse, ApiError> {
    super::utils::require_json(&headers)?;

    let body_bytes = read_body(body, state.config.server.max_request_bytes.as_usize()).await?;

    // An empty body is treated like `{}`
    let request: ChapterRequest = if body_bytes.is_empty() {
        ChapterRequest::default()
    } else {
        serde_json::from_slice(&body_bytes)?
    };

    let url = request
        .url
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty())
        .ok_or(ApiError::MissingUrl)?;

    let outcome = chapter::fetch_chapter(state.fetcher.as_ref(), &state.config, &url).await?;

    Ok(Json(outcome))
}

async fn read_body(body: axum::body::Body, max_size: usize) -> Result<Vec<u8>, ApiError> {
    let data = body
        .collect()
        .await
        .map_err(|err| ApiError::InvalidPayload(err.to_string()))?
        .to_bytes()
        .to_vec();

    super::utils::validate_body_size(&data, max_size)?;

    Ok(data)
}

/// Image proxy endpoint (GET /api/proxy-image?url=...)
///
/// Validation failures answer 400 with a short text message. Anything that
/// goes wrong after that (timeout, oversized body, non-200 upstream) answers
/// 200 with the placeholder SVG. The image is fully buffered before any
/// header is written, so a failure can never interrupt a started response.
pub async fn proxy_image(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> Response {
    let settings = &state.config.proxy;

    let url = match proxy::validate_image_url(query.url.as_deref(), settings.strict_validation) {
        Ok(url) => url,
        Err(err) => {
            debug!(error = %err, "Rejected image URL");
            return err.into_response();
        }
    };

    match proxy::fetch_image(
        state.fetcher.as_ref(),
        &state.config.upstream,
        settings,
        url,
    )
    .await
    {
        Ok(image) => image.respond(&settings.cache_control()),
        Err(err) => {
            warn!(url, error = %err, "Error proxying image");
            err.into_response()
        }
    }
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Health check endpoint (GET /health)
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

//! Image proxy
//!
//! Re-serves a remote image from this origin so the browser never talks to
//! the hotlink-protected CDN directly. Once a URL has passed validation,
//! every failure degrades to [`placeholder::PLACEHOLDER_SVG`] with a 200 so
//! `<img>` tags render something instead of a broken icon.

mod content_type;
mod placeholder;
mod validation;

pub use content_type::resolve_content_type;
pub use placeholder::{PLACEHOLDER_CONTENT_TYPE, PLACEHOLDER_SVG, placeholder_response};
pub use validation::validate_image_url;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use thiserror::Error;
use tracing::debug;

use crate::config::{ProxyConfig, UpstreamConfig};
use crate::upstream::{FetchError, FetchRequest, Fetcher};

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Image URL is required")]
    MissingUrl,
    #[error("Invalid URL format")]
    InvalidUrl,
    #[error("URL does not appear to be an image")]
    NotAnImage,
    #[error("upstream returned status code: {0}")]
    UpstreamStatus(u16),
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ProxyError {
    /// Input problems are reported; everything else becomes the placeholder
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            ProxyError::MissingUrl | ProxyError::InvalidUrl | ProxyError::NotAnImage
        )
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        if self.is_validation() {
            (StatusCode::BAD_REQUEST, self.to_string()).into_response()
        } else {
            placeholder_response()
        }
    }
}

/// A fetched image ready to be served
#[derive(Debug, Clone)]
pub struct ProxiedImage {
    pub content_type: String,
    pub body: Bytes,
}

/// Fetch `url` with the image headers, accepting only a 200 response
pub async fn fetch_image(
    fetcher: &dyn Fetcher,
    upstream: &UpstreamConfig,
    settings: &ProxyConfig,
    url: &str,
) -> Result<ProxiedImage, ProxyError> {
    let headers = upstream.image_headers();
    let response = fetcher
        .fetch(FetchRequest {
            url,
            headers: &headers,
            timeout: settings.timeout(),
            max_body_bytes: Some(settings.max_image_bytes.as_u64()),
        })
        .await?;

    if response.status != 200 {
        return Err(ProxyError::UpstreamStatus(response.status));
    }

    let content_type = resolve_content_type(url, response.content_type.as_deref());
    debug!(url, %content_type, size = response.body.len(), "Image fetched");

    Ok(ProxiedImage {
        content_type,
        body: response.body,
    })
}

impl ProxiedImage {
    /// 200 with the resolved type and a public cache directive
    pub fn respond(self, cache_control: &str) -> Response {
        (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, self.content_type),
                (header::CACHE_CONTROL, cache_control.to_string()),
            ],
            self.body,
        )
            .into_response()
    }
}

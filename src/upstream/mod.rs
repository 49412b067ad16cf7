//! Outbound fetch capability
//!
//! Handlers depend on the [`Fetcher`] trait rather than on reqwest directly,
//! so tests can substitute canned upstream responses. Status policy lives in
//! the callers: a fetcher returns whatever status the upstream produced.

mod http;

pub use http::HttpClient;

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

use crate::config::HeadersMap;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("timeout of {0:?} exceeded")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    RequestFailed(String),

    #[error("body exceeds limit of {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("failed to read body: {0}")]
    Body(String),
}

/// A single outbound GET
#[derive(Debug, Clone)]
pub struct FetchRequest<'a> {
    pub url: &'a str,
    pub headers: &'a HeadersMap,
    pub timeout: Duration,
    /// Bodies larger than this fail with [`FetchError::TooLarge`]
    pub max_body_bytes: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct FetchResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl FetchResponse {
    /// Body decoded as UTF-8, replacing invalid sequences
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: FetchRequest<'_>) -> Result<FetchResponse, FetchError>;
}

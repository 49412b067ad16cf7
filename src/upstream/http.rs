//! reqwest-backed [`Fetcher`]

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::{Client, header};
use std::time::Duration;
use tracing::debug;

use super::{FetchError, FetchRequest, FetchResponse, Fetcher};

const MAX_REDIRECTS: usize = 10;

/// Shared HTTP client; cheap to clone
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .map_err(|e| FetchError::RequestFailed(e.to_string()))?;

        Ok(Self { client })
    }

    async fn read_body(
        mut response: reqwest::Response,
        limit: Option<u64>,
        timeout: Duration,
    ) -> Result<Bytes, FetchError> {
        if let (Some(limit), Some(declared)) = (limit, response.content_length()) {
            if declared > limit {
                return Err(FetchError::TooLarge { limit });
            }
        }

        let mut buf = BytesMut::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| map_error(e, timeout))? {
            if let Some(limit) = limit {
                if (buf.len() + chunk.len()) as u64 > limit {
                    return Err(FetchError::TooLarge { limit });
                }
            }
            buf.extend_from_slice(&chunk);
        }

        Ok(buf.freeze())
    }
}

#[async_trait]
impl Fetcher for HttpClient {
    async fn fetch(&self, request: FetchRequest<'_>) -> Result<FetchResponse, FetchError> {
        debug!(url = request.url, "Starting fetch");

        let url = reqwest::Url::parse(request.url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", request.url, e)))?;

        let mut builder = self.client.get(url).timeout(request.timeout);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| map_error(e, request.timeout))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);

        // The request timeout also covers reading the body
        let body = Self::read_body(response, request.max_body_bytes, request.timeout).await?;

        debug!(url = request.url, status, size = body.len(), "Fetch completed");

        Ok(FetchResponse {
            status,
            content_type,
            body,
        })
    }
}

fn map_error(err: reqwest::Error, timeout: Duration) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout(timeout)
    } else if err.is_body() || err.is_decode() {
        FetchError::Body(err.to_string())
    } else {
        FetchError::RequestFailed(err.to_string())
    }
}

//! Chapter fetch: one upstream GET followed by the extraction cascade

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::extract::{self, ChapterPage, PageImage};
use crate::upstream::{FetchRequest, Fetcher};

pub const NO_IMAGES_MESSAGE: &str =
    "No images found in the chapter. Website structure may have changed.";

#[derive(Debug, Error)]
pub enum ChapterError {
    /// Upstream answered below 500 but not with 200; the status is mirrored
    #[error("{site} returned status code: {status}")]
    UpstreamStatus { site: String, status: u16 },

    /// Transport failure, timeout, or a 5xx from upstream
    #[error("Error fetching manga: {0}")]
    Upstream(String),
}

/// Successful extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterResult {
    pub success: bool,
    pub title: String,
    pub chapter_title: String,
    pub images: Vec<PageImage>,
    pub total_images: usize,
}

/// The page loaded but no strategy found any image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoImages {
    pub success: bool,
    pub message: String,
    /// Leading slice of the raw HTML for diagnosing markup changes
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChapterOutcome {
    Found(ChapterResult),
    Empty(NoImages),
}

impl ChapterOutcome {
    pub fn from_page(page: ChapterPage, html: &str, sample_chars: usize) -> Self {
        if page.images.is_empty() {
            return ChapterOutcome::Empty(NoImages {
                success: false,
                message: NO_IMAGES_MESSAGE.to_string(),
                html: extract::html_sample(html, sample_chars),
            });
        }

        ChapterOutcome::Found(ChapterResult {
            success: true,
            title: page.title,
            chapter_title: page.chapter_title,
            total_images: page.images.len(),
            images: page.images,
        })
    }

    pub fn images(&self) -> &[PageImage] {
        match self {
            ChapterOutcome::Found(result) => &result.images,
            ChapterOutcome::Empty(_) => &[],
        }
    }
}

/// Fetch the chapter page at `url` and scrape it.
///
/// Statuses of 500 and above fail like a transport error. Other non-200
/// statuses are surfaced as [`ChapterError::UpstreamStatus`]. No retries.
#[tracing::instrument(skip(fetcher, config), fields(request_id = %Uuid::now_v7()))]
pub async fn fetch_chapter(
    fetcher: &dyn Fetcher,
    config: &Config,
    url: &str,
) -> Result<ChapterOutcome, ChapterError> {
    info!("Fetching chapter");

    let headers = config.upstream.chapter_headers();
    let response = fetcher
        .fetch(FetchRequest {
            url,
            headers: &headers,
            timeout: config.chapter.timeout(),
            max_body_bytes: None,
        })
        .await
        .map_err(|e| {
            warn!(error = %e, "Chapter fetch failed");
            ChapterError::Upstream(e.to_string())
        })?;

    if response.status >= 500 {
        warn!(status = response.status, "Upstream server error");
        return Err(ChapterError::Upstream(format!(
            "Request failed with status code {}",
            response.status
        )));
    }

    if response.status != 200 {
        warn!(status = response.status, "Unexpected upstream status");
        return Err(ChapterError::UpstreamStatus {
            site: config.upstream.name.clone(),
            status: response.status,
        });
    }

    let html = response.text();
    let page = extract::extract_chapter(&html);

    Ok(ChapterOutcome::from_page(
        page,
        &html,
        config.chapter.html_sample_chars,
    ))
}

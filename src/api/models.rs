//! Wire models for the HTTP surface.
//!
//! - `POST /api/fetch-manga` accepts a [`ChapterRequest`] and answers with a
//!   [`ChapterOutcome`] (or an [`ErrorResponse`] on failure)
//! - `GET /api/proxy-image?url=` takes a [`ProxyQuery`] and answers with
//!   image bytes or the placeholder SVG
//!
//! A successful chapter looks like:
//!
//! ```json
//! {
//!   "success": true,
//!   "title": "Solo Leveling",
//!   "chapterTitle": "Episode 12",
//!   "images": [
//!     { "index": 1, "url": "https://cdn.example.com/comics/1/a.jpg" }
//!   ],
//!   "totalImages": 1
//! }
//! ```

use serde::{Deserialize, Serialize};

pub use crate::chapter::{ChapterOutcome, ChapterResult, NoImages};
pub use crate::extract::PageImage;

#[derive(Debug, Default, Deserialize)]
pub struct ChapterRequest {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProxyQuery {
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

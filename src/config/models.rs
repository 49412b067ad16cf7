use crate::humanize::ByteSize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::time::Duration;

/// Outbound request headers, keyed by header name
pub type HeadersMap = BTreeMap<String, String>;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub chapter: ChapterConfig,
    #[serde(default)]
    pub proxy: ProxyConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Upper bound for the chapter request body
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: ByteSize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_request_bytes: default_max_request_bytes(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 3000))
}

fn default_max_request_bytes() -> ByteSize {
    ByteSize::kib(64)
}

/// The scraped site and the browser identity presented to it
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Display name used in status error messages
    #[serde(default = "default_upstream_name")]
    pub name: String,
    #[serde(default = "default_referer")]
    pub referer: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_accept")]
    pub accept: String,
    #[serde(default = "default_accept_language")]
    pub accept_language: String,
    #[serde(default = "default_cookie")]
    pub cookie: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            name: default_upstream_name(),
            referer: default_referer(),
            user_agent: default_user_agent(),
            accept: default_accept(),
            accept_language: default_accept_language(),
            cookie: default_cookie(),
        }
    }
}

impl UpstreamConfig {
    /// Headers sent when fetching a chapter page
    pub fn chapter_headers(&self) -> HeadersMap {
        let mut headers = self.image_headers();
        headers.insert("Accept".to_string(), self.accept.clone());
        headers.insert("Accept-Language".to_string(), self.accept_language.clone());
        if !self.cookie.is_empty() {
            headers.insert("Cookie".to_string(), self.cookie.clone());
        }
        headers
    }

    /// Headers sent when proxying an image
    pub fn image_headers(&self) -> HeadersMap {
        HeadersMap::from([
            ("User-Agent".to_string(), self.user_agent.clone()),
            ("Referer".to_string(), self.referer.clone()),
        ])
    }
}

fn default_upstream_name() -> String {
    "MangaToon".to_string()
}

fn default_referer() -> String {
    "https://mangatoon.mobi/".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_accept() -> String {
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8".to_string()
}

fn default_accept_language() -> String {
    "en-US,en;q=0.5".to_string()
}

fn default_cookie() -> String {
    "locale=en".to_string()
}

/// Chapter extraction settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ChapterConfig {
    #[serde(default = "default_chapter_timeout_secs")]
    pub timeout_secs: u64,
    /// Characters of raw HTML echoed back when no images are found
    #[serde(default = "default_html_sample_chars")]
    pub html_sample_chars: usize,
}

impl Default for ChapterConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_chapter_timeout_secs(),
            html_sample_chars: default_html_sample_chars(),
        }
    }
}

impl ChapterConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_chapter_timeout_secs() -> u64 {
    10
}

fn default_html_sample_chars() -> usize {
    200
}

/// Image proxy settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyConfig {
    #[serde(default = "default_proxy_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: ByteSize,
    /// Reject URLs that do not parse or lack an image extension.
    /// When off, only a missing URL is rejected up front.
    #[serde(default = "default_strict_validation")]
    pub strict_validation: bool,
    #[serde(default = "default_cache_max_age_secs")]
    pub cache_max_age_secs: u64,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_proxy_timeout_secs(),
            max_image_bytes: default_max_image_bytes(),
            strict_validation: default_strict_validation(),
            cache_max_age_secs: default_cache_max_age_secs(),
        }
    }
}

impl ProxyConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.cache_max_age_secs)
    }
}

fn default_proxy_timeout_secs() -> u64 {
    8
}

fn default_max_image_bytes() -> ByteSize {
    ByteSize::mib(10)
}

fn default_strict_validation() -> bool {
    true
}

fn default_cache_max_age_secs() -> u64 {
    24 * 60 * 60
}

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

use super::ProxyError;

static IMAGE_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(?:jpe?g|png|gif|webp)(?:\?.*)?$").expect("valid image extension regex")
});

/// Accepts an image URL for proxying.
///
/// A missing or blank URL is always rejected. With `strict` set the URL must
/// also parse and end in an image extension (query string allowed), which
/// keeps the proxy from relaying arbitrary content.
pub fn validate_image_url(raw: Option<&str>, strict: bool) -> Result<&str, ProxyError> {
    let url = raw
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or(ProxyError::MissingUrl)?;

    if strict {
        Url::parse(url).map_err(|_| ProxyError::InvalidUrl)?;

        if !IMAGE_EXTENSION.is_match(url) {
            return Err(ProxyError::NotAnImage);
        }
    }

    Ok(url)
}

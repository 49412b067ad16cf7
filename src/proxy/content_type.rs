use regex::Regex;
use std::sync::LazyLock;

static EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.(png|gif|webp)(?:\?.*)?$").expect("valid extension regex")
});

/// Content type for a proxied image.
///
/// Starts from `image/jpeg`, refines by the URL's extension, and finally
/// defers to the upstream header when it names an `image/` type.
pub fn resolve_content_type(url: &str, upstream: Option<&str>) -> String {
    if let Some(declared) = upstream.filter(|ct| ct.starts_with("image/")) {
        return declared.to_string();
    }

    guess_from_extension(url).to_string()
}

fn guess_from_extension(url: &str) -> &'static str {
    let extension = EXTENSION
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_ascii_lowercase());

    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

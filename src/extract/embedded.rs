//! Image lists embedded as JSON in inline scripts
//!
//! Pages sometimes ship their reader state as a JSON object literal assigned
//! inside a `<script>`. Only the shapes below are understood; anything else
//! is skipped element by element.

use regex::Regex;
use scraper::Html;
use serde::Deserialize;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::warn;

use super::is_absolute;
use super::strategies::script_texts;

const LIST_KEYS: [&str; 2] = ["comicImgs", "imageList"];

/// Greedy from the first `{` to the last `}` around a known list key
static EMBEDDED_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)\{.*"(?:comicImgs|imageList)".*\}"#).expect("valid embedded JSON regex")
});

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EmbeddedImage {
    Url(String),
    Entry { url: String },
}

impl EmbeddedImage {
    fn into_url(self) -> String {
        match self {
            EmbeddedImage::Url(url) | EmbeddedImage::Entry { url } => url,
        }
    }
}

pub(super) fn embedded_json(document: &Html) -> Vec<String> {
    let mut urls = Vec::new();

    for (script, text) in script_texts(document).enumerate() {
        if !LIST_KEYS.iter().any(|key| text.contains(key)) {
            continue;
        }

        match image_urls(&text) {
            Ok(found) => urls.extend(found),
            Err(error) => warn!(script, %error, "Skipping script with malformed embedded JSON"),
        }
    }

    urls
}

fn image_urls(script: &str) -> Result<Vec<String>, serde_json::Error> {
    let Some(candidate) = EMBEDDED_OBJECT.find(script) else {
        return Ok(Vec::new());
    };

    let root: Value = serde_json::from_str(candidate.as_str())?;
    let urls = image_list(&root)
        .map(|list| {
            list.iter()
                .filter_map(|item| EmbeddedImage::deserialize(item).ok())
                .map(EmbeddedImage::into_url)
                .filter(|url| is_absolute(url))
                .collect()
        })
        .unwrap_or_default();

    Ok(urls)
}

/// `comicImgs`, then `imageList`, then both again under `data`
fn image_list(root: &Value) -> Option<&Vec<Value>> {
    list_field(root)
        .or_else(|| root.get("data").and_then(list_field))?
        .as_array()
}

fn list_field(value: &Value) -> Option<&Value> {
    LIST_KEYS
        .iter()
        .filter_map(|key| value.get(key))
        .find(|field| !field.is_null())
}

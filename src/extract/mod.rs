//! Chapter page scraping
//!
//! A fetched chapter page is parsed once, then the image [`Strategy`] list
//! is tried in order. The first strategy that yields at least one URL wins
//! and the rest are skipped; results are never merged. Title extraction is
//! independent of the cascade and always runs.
//!
//! These are heuristics against markup this service does not control, so
//! tests pin concrete HTML snapshots rather than a general contract.

mod embedded;
mod strategies;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;
use tracing::{debug, info};

pub const UNKNOWN_TITLE: &str = "Unknown Manga";
pub const UNKNOWN_CHAPTER: &str = "Unknown Chapter";

static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".title-text").expect("valid title selector"));
static CHAPTER_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".episode-title").expect("valid chapter title selector"));

/// One page of a chapter, in reading order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageImage {
    /// 1-based and contiguous
    pub index: usize,
    pub url: String,
}

impl PageImage {
    /// Number URLs from 1 in the order given
    pub fn sequence(urls: Vec<String>) -> Vec<PageImage> {
        urls.into_iter()
            .enumerate()
            .map(|(i, url)| PageImage { index: i + 1, url })
            .collect()
    }
}

/// Image discovery heuristics, in cascade order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `<img src>` inside `.pictures`
    PictureContainer,
    /// `<img src|data-src>` inside `.viewer-container`
    ViewerContainer,
    /// `/comics/` image URLs anywhere in inline script text
    ScriptUrls,
    /// `comicImgs` / `imageList` arrays in embedded JSON
    EmbeddedJson,
}

impl Strategy {
    pub const CASCADE: [Strategy; 4] = [
        Strategy::PictureContainer,
        Strategy::ViewerContainer,
        Strategy::ScriptUrls,
        Strategy::EmbeddedJson,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Strategy::PictureContainer => "picture_container",
            Strategy::ViewerContainer => "viewer_container",
            Strategy::ScriptUrls => "script_urls",
            Strategy::EmbeddedJson => "embedded_json",
        }
    }

    /// Candidate image URLs in document order
    pub fn run(&self, document: &Html) -> Vec<String> {
        match self {
            Strategy::PictureContainer => strategies::picture_container(document),
            Strategy::ViewerContainer => strategies::viewer_container(document),
            Strategy::ScriptUrls => strategies::script_urls(document),
            Strategy::EmbeddedJson => embedded::embedded_json(document),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Everything scraped from one chapter page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterPage {
    pub title: String,
    pub chapter_title: String,
    pub images: Vec<PageImage>,
    /// Strategy that produced `images`, `None` when all came up empty
    pub strategy: Option<Strategy>,
}

/// Parse `html` and run the title lookup plus the image cascade
pub fn extract_chapter(html: &str) -> ChapterPage {
    let document = Html::parse_document(html);

    let title = select_text(&document, &TITLE).unwrap_or_else(|| UNKNOWN_TITLE.to_string());
    let chapter_title =
        select_text(&document, &CHAPTER_TITLE).unwrap_or_else(|| UNKNOWN_CHAPTER.to_string());

    let (strategy, urls) = run_cascade(&document);
    let images = PageImage::sequence(urls);

    match strategy {
        Some(strategy) => info!(%strategy, count = images.len(), "Found chapter images"),
        None => info!("No chapter images found"),
    }

    ChapterPage {
        title,
        chapter_title,
        images,
        strategy,
    }
}

fn run_cascade(document: &Html) -> (Option<Strategy>, Vec<String>) {
    for strategy in Strategy::CASCADE {
        let urls = strategy.run(document);
        if !urls.is_empty() {
            return (Some(strategy), urls);
        }
        debug!(%strategy, "Strategy found no images, falling back");
    }
    (None, Vec::new())
}

/// Trimmed text of every match, `None` when blank
fn select_text(document: &Html, selector: &Selector) -> Option<String> {
    let text: String = document
        .select(selector)
        .flat_map(|element| element.text())
        .collect();
    let trimmed = text.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A value carrying a scheme separator, e.g. `https://`
pub(crate) fn is_absolute(url: &str) -> bool {
    url.contains("://")
}

/// First `max_chars` characters of `html` followed by `...`
pub fn html_sample(html: &str, max_chars: usize) -> String {
    let mut sample: String = html.chars().take(max_chars).collect();
    sample.push_str("...");
    sample
}

#[cfg(test)]
mod tests {
    use super::*;

    const PICTURES: &str = r#"
        <html><body>
          <div class="title-text">  Solo Leveling </div>
          <div class="episode-title">Episode 12</div>
          <div class="pictures">
            <img src="https://cdn.example.com/comics/1/a.jpg">
            <img src="https://cdn.example.com/comics/1/b.jpg">
          </div>
          <div class="viewer-container">
            <img src="https://cdn.example.com/comics/1/viewer.jpg">
          </div>
          <script>var x = "https://cdn.example.com/comics/1/script.png";</script>
        </body></html>
    "#;

    #[test]
    fn test_first_strategy_wins_entirely() {
        let page = extract_chapter(PICTURES);

        assert_eq!(page.strategy, Some(Strategy::PictureContainer));
        assert_eq!(page.title, "Solo Leveling");
        assert_eq!(page.chapter_title, "Episode 12");
        assert_eq!(
            page.images,
            vec![
                PageImage {
                    index: 1,
                    url: "https://cdn.example.com/comics/1/a.jpg".to_string()
                },
                PageImage {
                    index: 2,
                    url: "https://cdn.example.com/comics/1/b.jpg".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_falls_through_to_viewer_container() {
        let html = r#"
            <div class="pictures"><img src="/relative.jpg"></div>
            <div class="viewer-container">
              <img data-src="https://cdn.example.com/comics/2/1.webp">
              <img src="https://cdn.example.com/comics/2/2.webp">
              <img src="https://cdn.example.com/comics/2/3.webp">
            </div>
        "#;

        let page = extract_chapter(html);
        assert_eq!(page.strategy, Some(Strategy::ViewerContainer));
        let indices: Vec<usize> = page.images.iter().map(|image| image.index).collect();
        assert_eq!(indices, vec![1, 2, 3]);
        assert_eq!(page.images[0].url, "https://cdn.example.com/comics/2/1.webp");
    }

    #[test]
    fn test_defaults_when_nothing_matches() {
        let page = extract_chapter("<html><body><p>Chapter locked</p></body></html>");

        assert_eq!(page.strategy, None);
        assert!(page.images.is_empty());
        assert_eq!(page.title, UNKNOWN_TITLE);
        assert_eq!(page.chapter_title, UNKNOWN_CHAPTER);
    }

    #[test]
    fn test_title_runs_without_images() {
        let html = r#"<span class="title-text">Tower of God</span><span class="episode-title"> </span>"#;
        let page = extract_chapter(html);

        assert_eq!(page.title, "Tower of God");
        assert_eq!(page.chapter_title, UNKNOWN_CHAPTER);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        assert_eq!(extract_chapter(PICTURES), extract_chapter(PICTURES));
    }

    #[test]
    fn test_html_sample_truncates_by_chars() {
        let html = "é".repeat(300);
        let sample = html_sample(&html, 200);

        assert_eq!(sample.chars().count(), 203);
        assert!(sample.ends_with("..."));
        assert_eq!(html_sample("<p>", 200), "<p>...");
    }

    #[test]
    fn test_is_absolute() {
        assert!(is_absolute("https://a/b.jpg"));
        assert!(is_absolute("//cdn://odd"));
        assert!(!is_absolute("/comics/a.jpg"));
        assert!(!is_absolute("data:image/png;base64,AAA"));
    }
}

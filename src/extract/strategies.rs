use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use super::is_absolute;

static PICTURE_IMAGES: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(".pictures img").expect("valid pictures selector"));
static VIEWER_IMAGES: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(".viewer-container img").expect("valid viewer selector")
});
static SCRIPTS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("script").expect("valid script selector"));

static COMIC_IMAGE_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)https?://[^"'\s]+/comics/[^"'\s]+\.(?:jpe?g|png|webp|gif)"#)
        .expect("valid comic image regex")
});

pub(super) fn picture_container(document: &Html) -> Vec<String> {
    document
        .select(&PICTURE_IMAGES)
        .filter_map(|img| img.value().attr("src"))
        .filter(|src| is_absolute(src))
        .map(str::to_owned)
        .collect()
}

pub(super) fn viewer_container(document: &Html) -> Vec<String> {
    document
        .select(&VIEWER_IMAGES)
        .filter_map(|img| {
            let element = img.value();
            element
                .attr("src")
                .filter(|src| !src.is_empty())
                .or_else(|| element.attr("data-src"))
        })
        .filter(|src| is_absolute(src))
        .map(str::to_owned)
        .collect()
}

pub(super) fn script_urls(document: &Html) -> Vec<String> {
    let buffer: String = script_texts(document).collect();
    COMIC_IMAGE_URL
        .find_iter(&buffer)
        .map(|m| m.as_str().to_owned())
        .collect()
}

/// Raw text of each `<script>` block in document order
pub(super) fn script_texts(document: &Html) -> impl Iterator<Item = String> + '_ {
    document.select(&SCRIPTS).map(element_text)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_picture_container_skips_relative_sources() {
        let document = Html::parse_document(
            r#"<div class="pictures">
                 <img src="https://a.example/1.jpg">
                 <img src="/lazy-placeholder.gif">
                 <img>
                 <img src="https://a.example/2.jpg">
               </div>
               <img src="https://a.example/outside.jpg">"#,
        );

        assert_eq!(
            picture_container(&document),
            vec!["https://a.example/1.jpg", "https://a.example/2.jpg"]
        );
    }

    #[test]
    fn test_picture_container_ignores_data_src() {
        let document = Html::parse_document(
            r#"<div class="pictures"><img data-src="https://a.example/1.jpg"></div>"#,
        );
        assert!(picture_container(&document).is_empty());
    }

    #[test]
    fn test_viewer_container_prefers_src_over_data_src() {
        let document = Html::parse_document(
            r#"<div class="viewer-container">
                 <img src="https://a.example/src.jpg" data-src="https://a.example/lazy.jpg">
                 <img src="" data-src="https://a.example/lazy-2.jpg">
                 <img data-src="relative.jpg">
               </div>"#,
        );

        assert_eq!(
            viewer_container(&document),
            vec!["https://a.example/src.jpg", "https://a.example/lazy-2.jpg"]
        );
    }

    #[test]
    fn test_script_urls_in_match_order() {
        let document = Html::parse_document(
            r#"<script>
                 var pages = ["https://cdn.example/comics/9/001.JPG",'https://cdn.example/comics/9/002.jpeg'];
               </script>
               <script>load("http://cdn.example/comics/9/003.gif?v=1")</script>
               <script>var cover = "https://cdn.example/covers/9.jpg";</script>"#,
        );

        assert_eq!(
            script_urls(&document),
            vec![
                "https://cdn.example/comics/9/001.JPG",
                "https://cdn.example/comics/9/002.jpeg",
                "http://cdn.example/comics/9/003.gif",
            ]
        );
    }

    #[test]
    fn test_script_urls_ignores_markup_outside_scripts() {
        let document = Html::parse_document(
            r#"<a href="https://cdn.example/comics/9/001.jpg">page</a><script></script>"#,
        );
        assert!(script_urls(&document).is_empty());
    }
}

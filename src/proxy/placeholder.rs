use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

pub const PLACEHOLDER_CONTENT_TYPE: &str = "image/svg+xml";

/// 300x150 light-red card shown in place of an image that failed to load
pub const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="300" height="150">
  <rect width="300" height="150" fill="#f8d7da" />
  <text x="50%" y="50%" font-family="Arial" font-size="14" fill="#721c24" text-anchor="middle">
    Error loading image
  </text>
</svg>
"##;

/// 200 response carrying the placeholder SVG, never cached
pub fn placeholder_response() -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, PLACEHOLDER_CONTENT_TYPE),
            (header::CACHE_CONTROL, "no-store"),
        ],
        PLACEHOLDER_SVG,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_svg_shape() {
        assert!(PLACEHOLDER_SVG.contains(r#"width="300" height="150""#));
        assert!(PLACEHOLDER_SVG.contains("#f8d7da"));
        assert!(PLACEHOLDER_SVG.contains("#721c24"));
        assert!(PLACEHOLDER_SVG.contains("Error loading image"));
    }

    #[test]
    fn test_placeholder_response_headers() {
        let response = placeholder_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            PLACEHOLDER_CONTENT_TYPE
        );
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");
    }
}

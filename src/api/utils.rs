//! Request helpers for the chapter endpoint

use axum::http::{HeaderMap, header};

use crate::api::error::ApiError;

/// Requires `application/json`, optionally with parameters such as charset
pub fn require_json(headers: &HeaderMap) -> Result<mime::Mime, ApiError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::InvalidPayload("missing Content-Type header".into()))?;

    let media_type: mime::Mime = content_type.parse().map_err(|_| {
        ApiError::InvalidPayload(format!("invalid Content-Type: {}", content_type))
    })?;

    if media_type.type_() != mime::APPLICATION || media_type.subtype() != mime::JSON {
        return Err(ApiError::InvalidPayload(format!(
            "Content-Type must be application/json, got: {}/{}",
            media_type.type_(),
            media_type.subtype()
        )));
    }

    Ok(media_type)
}

/// Rejects bodies above `max_size` bytes
pub fn validate_body_size(data: &[u8], max_size: usize) -> Result<(), ApiError> {
    if data.len() > max_size {
        return Err(ApiError::PayloadTooLarge(data.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_content_type(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn test_require_json_valid() {
        assert!(require_json(&with_content_type("application/json")).is_ok());
        assert!(require_json(&with_content_type("application/json; charset=utf-8")).is_ok());
    }

    #[test]
    fn test_require_json_invalid() {
        for value in ["application/jsonp", "text/plain", "application/x-www-form-urlencoded", "invalid"] {
            assert!(require_json(&with_content_type(value)).is_err(), "accepted {value}");
        }
        assert!(matches!(
            require_json(&HeaderMap::new()),
            Err(ApiError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_validate_body_size() {
        let data = vec![0u8; 1000];
        assert!(validate_body_size(&data, 1000).is_ok());
        assert!(matches!(
            validate_body_size(&data, 999),
            Err(ApiError::PayloadTooLarge(1000))
        ));
    }
}

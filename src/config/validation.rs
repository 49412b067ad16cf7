use super::models::Config;
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Timeout must be positive: {field} = 0")]
    ZeroTimeout { field: &'static str },

    #[error("proxy.max_image_bytes must be positive")]
    ZeroImageLimit,

    #[error("server.max_request_bytes must be positive")]
    ZeroRequestLimit,

    #[error("chapter.html_sample_chars must be positive")]
    ZeroHtmlSample,

    #[error("upstream.referer must be an absolute http(s) URL, got '{0}'")]
    InvalidReferer(String),

    #[error("upstream.user_agent must not be empty")]
    EmptyUserAgent,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_timeouts(config)?;
    validate_limits(config)?;
    validate_upstream(config)?;
    Ok(())
}

fn validate_timeouts(config: &Config) -> Result<(), ValidationError> {
    if config.chapter.timeout_secs == 0 {
        return Err(ValidationError::ZeroTimeout {
            field: "chapter.timeout_secs",
        });
    }

    if config.proxy.timeout_secs == 0 {
        return Err(ValidationError::ZeroTimeout {
            field: "proxy.timeout_secs",
        });
    }

    Ok(())
}

fn validate_limits(config: &Config) -> Result<(), ValidationError> {
    if config.proxy.max_image_bytes.as_u64() == 0 {
        return Err(ValidationError::ZeroImageLimit);
    }

    if config.server.max_request_bytes.as_u64() == 0 {
        return Err(ValidationError::ZeroRequestLimit);
    }

    if config.chapter.html_sample_chars == 0 {
        return Err(ValidationError::ZeroHtmlSample);
    }

    Ok(())
}

fn validate_upstream(config: &Config) -> Result<(), ValidationError> {
    let referer = &config.upstream.referer;
    let is_http = Url::parse(referer)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false);
    if !is_http {
        return Err(ValidationError::InvalidReferer(referer.clone()));
    }

    if config.upstream.user_agent.trim().is_empty() {
        return Err(ValidationError::EmptyUserAgent);
    }

    Ok(())
}

use super::models::Config;
use config::{ConfigError, Environment, File};
use std::env;
use std::path::PathBuf;

const CONFIG_ENV_VAR: &str = "MANGAPROXY_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/mangaproxy.toml";
const ENV_PREFIX: &str = "MANGAPROXY";
const ENV_SEPARATOR: &str = "__";

/// Load configuration from multiple sources with priority:
/// 1. Defaults (embedded in structs)
/// 2. TOML file (if exists)
/// 3. Environment variables from .env file (via dotenvy)
/// 4. System environment variables (highest priority)
pub fn load() -> Result<Config, ConfigError> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let config_path = env::var(CONFIG_ENV_VAR)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

    load_from_sources(config_path)
}

/// Load configuration from a specific path and environment
pub fn load_from_sources(config_path: PathBuf) -> Result<Config, ConfigError> {
    let mut builder = config::Config::builder();

    if config_path.exists() {
        tracing::info!("Loading configuration from: {}", config_path.display());
        builder = builder.add_source(File::from(config_path).required(false));
    } else {
        tracing::warn!(
            "Configuration file not found at {}, using defaults and environment overrides",
            config_path.display()
        );
    }

    // MANGAPROXY__PROXY__TIMEOUT_SECS -> proxy.timeout_secs
    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator(ENV_SEPARATOR)
            .try_parsing(true),
    );

    builder.build()?.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::humanize::ByteSize;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_load_defaults_only() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:3000");
        assert_eq!(config.upstream.name, "MangaToon");
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let toml_content = r#"
[server]
bind_addr = "127.0.0.1:9000"
max_request_bytes = "16KB"

[upstream]
name = "Mirror"
referer = "https://mirror.example/"
cookie = ""

[chapter]
timeout_secs = 4
html_sample_chars = 80

[proxy]
timeout_secs = 2
max_image_bytes = "2MB"
strict_validation = false
cache_max_age_secs = 60
        "#;

        fs::write(&config_path, toml_content).unwrap();

        let config = load_from_sources(config_path).unwrap();
        assert_eq!(config.server.bind_addr.to_string(), "127.0.0.1:9000");
        assert_eq!(config.server.max_request_bytes, ByteSize::kib(16));
        assert_eq!(config.upstream.name, "Mirror");
        assert_eq!(config.upstream.referer, "https://mirror.example/");
        assert!(config.upstream.cookie.is_empty());
        // Unset keys keep their defaults
        assert_eq!(config.upstream.accept_language, "en-US,en;q=0.5");
        assert_eq!(config.chapter.timeout_secs, 4);
        assert_eq!(config.chapter.html_sample_chars, 80);
        assert_eq!(config.proxy.max_image_bytes, ByteSize::mib(2));
        assert!(!config.proxy.strict_validation);
        assert_eq!(config.proxy.cache_max_age_secs, 60);
    }
}

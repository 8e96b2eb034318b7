//! Site configuration management for `skiff.toml`.
//!
//! # Sections
//!
//! | Section        | Purpose                                         |
//! |----------------|-------------------------------------------------|
//! | `[site]`       | Site metadata (title, author, url, description) |
//! | `[build]`      | Content/output paths, home article count, feed  |
//! | `[serve]`      | Development server (interface, port)            |
//! | `[newsletter]` | Upstream subscriber API (endpoint, credential)  |

mod section;

pub use section::{BuildConfig, FeedConfig, NewsletterConfig, ServeConfig, SiteInfoConfig};

use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Environment variable consulted for the newsletter credential when
/// `[newsletter].api_key` is absent from the config file.
pub const NEWSLETTER_API_KEY_ENV: &str = "SKIFF_NEWSLETTER_API_KEY";

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Root configuration structure representing skiff.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site metadata
    pub site: SiteInfoConfig,

    /// Build settings
    pub build: BuildConfig,

    /// Development server settings
    pub serve: ServeConfig,

    /// Newsletter proxy settings
    pub newsletter: NewsletterConfig,
}

impl SiteConfig {
    /// Load configuration from a `skiff.toml` path.
    ///
    /// The project root becomes the config file's parent directory; the
    /// newsletter credential falls back to the environment when unset.
    /// Callers apply CLI overrides, then run [`Self::validate`].
    pub fn load(config_path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::Io(config_path.to_path_buf(), e))?;

        let mut config: Self = toml::from_str(&raw)?;
        config.root = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        if config.newsletter.api_key.is_none()
            && let Ok(key) = env::var(NEWSLETTER_API_KEY_ENV)
            && !key.is_empty()
        {
            config.newsletter.api_key = Some(key);
        }

        Ok(config)
    }

    /// Validate cross-field constraints before any build starts.
    ///
    /// Run after CLI overrides so `--rss=false` can lift the site.url
    /// requirement.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url_str) = &self.site.url {
            let parsed = url::Url::parse(url_str).map_err(|e| {
                ConfigError::Validation(format!("site.url is not a valid URL: {e}"))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ConfigError::Validation(format!(
                    "site.url scheme '{}' not supported, must be http or https",
                    parsed.scheme()
                )));
            }
        } else if self.build.feed.enable {
            return Err(ConfigError::Validation(
                "build.feed is enabled but site.url is not configured".into(),
            ));
        }

        if self.build.feed.enable && self.build.feed.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "build.feed.path must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Absolute base URL with no trailing slash (empty when unset).
    pub fn base_url(&self) -> &str {
        self.site
            .url
            .as_deref()
            .unwrap_or_default()
            .trim_end_matches('/')
    }

    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.build.content)
    }

    /// Directory scanned for articles (`<content>/articles`).
    pub fn articles_dir(&self) -> PathBuf {
        self.content_dir().join("articles")
    }

    /// Directory holding the static pages (`<content>/pages`).
    pub fn pages_dir(&self) -> PathBuf {
        self.content_dir().join("pages")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(&self.build.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn load_str(content: &str) -> Result<SiteConfig, ConfigError> {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("skiff.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        SiteConfig::load(&path)
    }

    fn load_valid_str(content: &str) -> Result<SiteConfig, ConfigError> {
        let config = load_str(content)?;
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn test_minimal_config() {
        let config = load_valid_str("[site]\nurl = \"https://example.com\"\n").unwrap();
        assert_eq!(config.base_url(), "https://example.com");
        assert_eq!(config.build.home_articles, 4);
        assert!(config.articles_dir().ends_with("content/articles"));
    }

    #[test]
    fn test_feed_requires_url() {
        let err = load_valid_str("").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        // Disabling the feed lifts the requirement
        assert!(load_valid_str("[build.feed]\nenable = false\n").is_ok());
    }

    #[test]
    fn test_invalid_url_scheme_rejected() {
        let err = load_valid_str("[site]\nurl = \"ftp://example.com\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_base_url_strips_trailing_slash() {
        let config = load_valid_str("[site]\nurl = \"https://example.com/\"\n").unwrap();
        assert_eq!(config.base_url(), "https://example.com");
    }

    #[test]
    fn test_malformed_toml() {
        let err = load_str("[site\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_newsletter_defaults() {
        let config = load_str("").unwrap();
        assert!(config.newsletter.endpoint.contains("mailerlite"));
    }
}

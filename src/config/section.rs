//! Configuration section definitions for `skiff.toml`.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

/// `[site]` - site metadata used by page rendering and the RSS feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteInfoConfig {
    /// Site title.
    pub title: String,
    /// Author name.
    pub author: String,
    /// Author email (used in RSS author fields).
    pub email: String,
    /// Site description.
    pub description: String,
    /// Site URL (e.g., "https://example.com"). Required when the feed is enabled.
    pub url: Option<String>,
    /// Language code (e.g., "en").
    pub language: String,
}

impl Default for SiteInfoConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            email: String::new(),
            description: String::new(),
            url: None,
            language: "en".into(),
        }
    }
}

/// `[build]` - paths and build options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Content directory, relative to the project root.
    pub content: PathBuf,
    /// Output directory, relative to the project root.
    pub output: PathBuf,
    /// Number of articles shown on the home page.
    pub home_articles: usize,
    /// Feed generation settings.
    pub feed: FeedConfig,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content: "content".into(),
            output: "public".into(),
            home_articles: 4,
            feed: FeedConfig::default(),
        }
    }
}

/// `[build.feed]` - RSS feed generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// Enable feed generation.
    pub enable: bool,
    /// Output path for the feed file, relative to the output directory.
    pub path: PathBuf,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            path: "rss/feed.xml".into(),
        }
    }
}

/// `[serve]` - development server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    pub interface: IpAddr,
    /// Port number to listen on.
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 8080,
        }
    }
}

/// `[newsletter]` - subscription forwarding to the mailing-list service.
///
/// The API key may be set here or via the `SKIFF_NEWSLETTER_API_KEY`
/// environment variable (resolved once at config load, so the proxy
/// itself never reads process state).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsletterConfig {
    /// Upstream subscriber API endpoint.
    pub endpoint: String,
    /// Bearer credential for the upstream API. Never exposed to callers.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for NewsletterConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://connect.mailerlite.com/api/subscribers".into(),
            api_key: None,
        }
    }
}

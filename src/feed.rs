//! RSS 2.0 feed generation.
//!
//! Regenerated once per production build from the full sorted catalog.

use std::fs;

use anyhow::{Result, anyhow};
use rss::{ChannelBuilder, GuidBuilder, ItemBuilder, validation::Validate};

use crate::catalog::ArticleRecord;
use crate::config::SiteConfig;
use crate::log;

/// Build and write the RSS feed if enabled in config.
///
/// `articles` must already be in feed order (newest first).
pub fn build_feed(config: &SiteConfig, articles: &[ArticleRecord]) -> Result<()> {
    if !config.build.feed.enable {
        return Ok(());
    }

    let xml = feed_xml(config, articles)?;
    let feed_path = config.output_dir().join(&config.build.feed.path);

    if let Some(parent) = feed_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&feed_path, &xml)?;

    log!("rss"; "{} ({} items)", config.build.feed.path.display(), articles.len());
    Ok(())
}

/// Render the sorted catalog to RSS XML.
fn feed_xml(config: &SiteConfig, articles: &[ArticleRecord]) -> Result<String> {
    let items: Vec<_> = articles
        .iter()
        .map(|article| article_to_item(article, config))
        .collect();

    let channel = ChannelBuilder::default()
        .title(&config.site.title)
        .link(config.base_url())
        .description(&config.site.description)
        .language(config.site.language.clone())
        .generator("skiff".to_string())
        .items(items)
        .build();

    channel
        .validate()
        .map_err(|e| anyhow!("RSS validation failed: {e}"))?;
    Ok(channel.to_string())
}

fn article_to_item(article: &ArticleRecord, config: &SiteConfig) -> rss::Item {
    let link = format!("{}/articles/{}/", config.base_url(), article.slug);

    ItemBuilder::default()
        .title(article.title.clone())
        .link(Some(link.clone()))
        .guid(GuidBuilder::default().permalink(true).value(link).build())
        .description(article.description.clone())
        .pub_date(article.date.to_rfc2822())
        .author(rss_author(article, config))
        .build()
}

/// RSS author format is "email (Name)"; fall back to site config for
/// whichever half the article does not provide.
fn rss_author(article: &ArticleRecord, config: &SiteConfig) -> Option<String> {
    let name = article.author.as_deref().unwrap_or(&config.site.author);
    if config.site.email.is_empty() || name.is_empty() {
        return None;
    }
    Some(format!("{} ({})", config.site.email, name))
}

//! Production build pipeline.
//!
//! Content Store -> Catalog Builder -> Feed Sorter -> {pages, RSS}.
//! Any load failure aborts the whole build; no partial site is written.

use std::fs;

use anyhow::{Context, Result};

use crate::catalog::{ArticleRecord, FsLoader, build_catalog, sort_by_date_desc};
use crate::config::SiteConfig;
use crate::feed::build_feed;
use crate::render::render_site;
use crate::{debug, log};

/// Build the whole site. Returns the sorted catalog for callers (like
/// serve) that want to report on it.
pub fn build_site(config: &SiteConfig, clean: bool) -> Result<Vec<ArticleRecord>> {
    if clean {
        let output_dir = config.output_dir();
        if output_dir.exists() {
            fs::remove_dir_all(&output_dir)
                .with_context(|| format!("failed to clean {}", output_dir.display()))?;
            debug!("build"; "cleaned {}", output_dir.display());
        }
    }

    let catalog = build_catalog(&config.articles_dir(), &FsLoader)
        .context("catalog build failed")?;
    debug!("build"; "discovered {} articles", catalog.len());

    let sorted = sort_by_date_desc(&catalog);

    render_site(config, &sorted)?;
    build_feed(config, &sorted)?;

    log!("build"; "done ({} articles)", sorted.len());
    Ok(sorted)
}

//! Static page loading (`content/pages/*.md`).
//!
//! The marketing pages (about, accessibility, speaking, thank-you) use the
//! same frontmatter format as articles but are not part of the article
//! catalog: they need `title` and `description`, never a date, and they
//! render at `/<slug>/` instead of `/articles/<slug>/`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::catalog::{ContentLoadError, split_frontmatter};

/// A loaded static page.
#[derive(Debug, Clone)]
pub struct StaticPage {
    pub slug: String,
    pub title: String,
    pub description: String,
    pub body: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawPageMeta {
    title: Option<String>,
    description: Option<String>,
}

/// Load every `*.md` directly under `pages_dir`, sorted by file name.
///
/// A missing pages directory is fine (a site may have articles only);
/// a page that fails to parse fails the build, same policy as articles.
pub fn load_pages(pages_dir: &Path) -> Result<Vec<StaticPage>, ContentLoadError> {
    if !pages_dir.is_dir() {
        return Ok(Vec::new());
    }

    let scan_err = |source| ContentLoadError::Scan {
        path: pages_dir.to_path_buf(),
        source,
    };

    let mut entries: Vec<_> = fs::read_dir(pages_dir)
        .map_err(scan_err)?
        .collect::<Result<_, _>>()
        .map_err(scan_err)?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    let mut pages = Vec::new();
    for entry in entries {
        let path = entry.path();
        if !path.is_file() || path.extension().is_none_or(|e| e != "md") {
            continue;
        }
        let Some(slug) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        pages.push(load_page(&path, slug)?);
    }

    Ok(pages)
}

fn load_page(path: &Path, slug: &str) -> Result<StaticPage, ContentLoadError> {
    let source = fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let (frontmatter, body) =
        split_frontmatter(&source).ok_or_else(|| ContentLoadError::MissingFrontmatter {
            path: path.to_path_buf(),
        })?;

    let raw: RawPageMeta =
        toml::from_str(frontmatter).map_err(|source| ContentLoadError::Frontmatter {
            path: path.to_path_buf(),
            source,
        })?;

    let missing = |field: &'static str| ContentLoadError::MissingField {
        path: path.to_path_buf(),
        field,
    };
    let title = raw.title.filter(|t| !t.trim().is_empty()).ok_or_else(|| missing("title"))?;
    let description = raw
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| missing("description"))?;

    Ok(StaticPage {
        slug: slug.to_string(),
        title,
        description,
        body: body.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_pages() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("about.md"),
            "+++\ntitle = \"About\"\ndescription = \"Who I am\"\n+++\n\nHello.\n",
        )
        .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let pages = load_pages(dir.path()).unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].slug, "about");
        assert_eq!(pages[0].title, "About");
    }

    #[test]
    fn test_missing_pages_dir_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(load_pages(&dir.path().join("pages")).unwrap().is_empty());
    }

    #[test]
    fn test_page_missing_title_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("about.md"),
            "+++\ndescription = \"x\"\n+++\nbody",
        )
        .unwrap();

        let err = load_pages(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            ContentLoadError::MissingField { field: "title", .. }
        ));
    }
}

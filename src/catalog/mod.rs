//! Article catalog: discovery, loading, and ordering.
//!
//! The catalog is rebuilt from scratch on every build. Discovery accepts
//! two shapes under the articles directory:
//!
//! ```text
//! content/articles/
//! ├── other.md              -> slug "other"
//! └── my-article/
//!     └── index.md          -> slug "my-article"
//! ```
//!
//! A document that fails to load aborts the whole build. A partial
//! article list presented as "all articles" would be a correctness
//! defect, so there is no skip-and-continue path.

mod loader;

pub use loader::{ArticleMeta, ContentLoader, Document, FsLoader};
pub(crate) use loader::split_frontmatter;

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use thiserror::Error;

use crate::utils::date::Date;

/// Errors raised while building the catalog.
///
/// Every variant names the offending document so the author can fix it.
#[derive(Debug, Error)]
pub enum ContentLoadError {
    #[error("failed to read `{path}`")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to scan articles directory `{path}`")]
    Scan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("`{path}` has no `+++` frontmatter block")]
    MissingFrontmatter { path: PathBuf },

    #[error("invalid frontmatter in `{path}`")]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("`{path}` is missing required field `{field}`")]
    MissingField { path: PathBuf, field: &'static str },

    #[error("`{path}` has invalid date `{value}` (expected YYYY-MM-DD)")]
    InvalidDate { path: PathBuf, value: String },

    #[error("slug `{slug}` maps to both `{first}` and `{second}`")]
    DuplicateSlug {
        slug: String,
        first: PathBuf,
        second: PathBuf,
    },
}

/// One article, ready for rendering and feed generation.
#[derive(Debug, Clone)]
pub struct ArticleRecord {
    /// URL-safe identifier derived from the document path.
    pub slug: String,
    pub title: String,
    pub date: Date,
    pub description: String,
    pub author: Option<String>,
    /// Source document path, kept for error reporting.
    pub source: PathBuf,
    /// Markdown body, rendered to HTML by the page renderer.
    pub body: String,
}

/// Build the catalog: discover every article under `articles_dir` and
/// load it through `loader`.
///
/// Output order follows discovery order (file-name sorted, so repeated
/// builds over unchanged content produce identical catalogs); callers
/// wanting the feed order go through [`sort_by_date_desc`].
pub fn build_catalog<L>(articles_dir: &Path, loader: &L) -> Result<Vec<ArticleRecord>, ContentLoadError>
where
    L: ContentLoader + Sync,
{
    let discovered = discover(articles_dir)?;

    // Loads are independent and read-only, so fan out.
    let records: Vec<ArticleRecord> = discovered
        .par_iter()
        .map(|(slug, path)| {
            let doc = loader.load(path)?;
            Ok(ArticleRecord {
                slug: slug.clone(),
                title: doc.meta.title,
                date: doc.meta.date,
                description: doc.meta.description,
                author: doc.meta.author,
                source: path.clone(),
                body: doc.body,
            })
        })
        .collect::<Result<_, ContentLoadError>>()?;

    Ok(records)
}

/// Order records by publication date, newest first.
///
/// The sort is stable: records sharing a date keep their relative
/// discovery order. The input is left untouched; callers may still hold
/// the pre-sort list.
pub fn sort_by_date_desc(records: &[ArticleRecord]) -> Vec<ArticleRecord> {
    let mut sorted = records.to_vec();
    // Full calendar comparison via Date's derived Ord. Dates were
    // validated at load time, so every record is comparable here.
    sorted.sort_by(|a, z| z.date.cmp(&a.date));
    sorted
}

/// Find every article document and derive its slug.
///
/// Flat form: `<slug>.md` directly under the root. Folder form:
/// `<slug>/index.md` one level down (for articles with co-located assets).
fn discover(articles_dir: &Path) -> Result<Vec<(String, PathBuf)>, ContentLoadError> {
    let scan_err = |source| ContentLoadError::Scan {
        path: articles_dir.to_path_buf(),
        source,
    };

    let mut found: Vec<(String, PathBuf)> = Vec::new();

    let mut entries: Vec<_> = fs::read_dir(articles_dir)
        .map_err(scan_err)?
        .collect::<Result<_, _>>()
        .map_err(scan_err)?;
    entries.sort_by_key(std::fs::DirEntry::file_name);

    for entry in entries {
        let path = entry.path();

        if path.is_file() {
            if path.extension().is_some_and(|e| e == "md")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                found.push((stem.to_string(), path));
            }
        } else if path.is_dir() {
            let index = path.join("index.md");
            if index.is_file()
                && let Some(name) = path.file_name().and_then(|s| s.to_str())
            {
                found.push((name.to_string(), index));
            }
        }
    }

    // `foo.md` next to `foo/index.md` would silently shadow one article.
    for (i, (slug, path)) in found.iter().enumerate() {
        if let Some((_, first)) = found[..i].iter().find(|(s, _)| s == slug) {
            return Err(ContentLoadError::DuplicateSlug {
                slug: slug.clone(),
                first: first.clone(),
                second: path.clone(),
            });
        }
    }

    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn article(title: &str, date: &str) -> String {
        format!(
            "+++\ntitle = \"{title}\"\ndate = \"{date}\"\ndescription = \"About {title}\"\n+++\n\nBody of {title}.\n"
        )
    }

    fn site(docs: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (rel, content) in docs {
            let path = dir.path().join(rel);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        dir
    }

    #[test]
    fn test_discovery_both_shapes() {
        let dir = site(&[
            ("other.md", &article("Other", "2024-01-01")),
            ("my-article/index.md", &article("Mine", "2024-02-01")),
        ]);

        let catalog = build_catalog(dir.path(), &FsLoader).unwrap();
        let mut slugs: Vec<_> = catalog.iter().map(|r| r.slug.as_str()).collect();
        slugs.sort_unstable();
        assert_eq!(slugs, ["my-article", "other"]);
    }

    #[test]
    fn test_discovery_ignores_non_markdown_and_assets() {
        let dir = site(&[
            ("post.md", &article("Post", "2024-01-01")),
            ("notes.txt", "not an article"),
            // Asset folder without index.md is not an article
            ("images/cover.png", ""),
        ]);

        let catalog = build_catalog(dir.path(), &FsLoader).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].slug, "post");
    }

    #[test]
    fn test_slugs_are_stable_across_builds() {
        let dir = site(&[
            ("b.md", &article("B", "2024-01-01")),
            ("a/index.md", &article("A", "2024-02-01")),
        ]);

        let first = build_catalog(dir.path(), &FsLoader).unwrap();
        let second = build_catalog(dir.path(), &FsLoader).unwrap();
        let slugs =
            |c: &[ArticleRecord]| c.iter().map(|r| r.slug.clone()).collect::<Vec<_>>();
        assert_eq!(slugs(&first), slugs(&second));
        assert!(first.iter().all(|r| !r.slug.is_empty()));
    }

    #[test]
    fn test_missing_date_fails_whole_build() {
        let dir = site(&[
            ("good.md", &article("Good", "2024-01-01")),
            (
                "bad.md",
                "+++\ntitle = \"Bad\"\ndescription = \"no date\"\n+++\nbody",
            ),
        ]);

        let err = build_catalog(dir.path(), &FsLoader).unwrap_err();
        assert!(matches!(
            err,
            ContentLoadError::MissingField { field: "date", .. }
        ));
    }

    #[test]
    fn test_duplicate_slug_rejected() {
        let dir = site(&[
            ("foo.md", &article("Flat", "2024-01-01")),
            ("foo/index.md", &article("Folder", "2024-02-01")),
        ]);

        let err = build_catalog(dir.path(), &FsLoader).unwrap_err();
        assert!(matches!(err, ContentLoadError::DuplicateSlug { .. }));
    }

    #[test]
    fn test_missing_articles_dir_fails() {
        let dir = TempDir::new().unwrap();
        let err = build_catalog(&dir.path().join("nope"), &FsLoader).unwrap_err();
        assert!(matches!(err, ContentLoadError::Scan { .. }));
    }

    #[test]
    fn test_sort_newest_first() {
        let dir = site(&[
            ("a.md", &article("A", "2023-01-01")),
            ("b.md", &article("B", "2023-06-01")),
            ("c.md", &article("C", "2022-12-31")),
        ]);

        let catalog = build_catalog(dir.path(), &FsLoader).unwrap();
        let sorted = sort_by_date_desc(&catalog);
        let dates: Vec<_> = sorted.iter().map(|r| r.date.to_iso8601()).collect();
        assert_eq!(dates, ["2023-06-01", "2023-01-01", "2022-12-31"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_dates() {
        let dir = site(&[
            ("first.md", &article("First", "2024-01-01")),
            ("second.md", &article("Second", "2024-01-01")),
            ("third.md", &article("Third", "2024-01-01")),
        ]);

        let catalog = build_catalog(dir.path(), &FsLoader).unwrap();
        let sorted = sort_by_date_desc(&catalog);
        let slugs: Vec<_> = sorted.iter().map(|r| r.slug.as_str()).collect();
        // Equal dates keep discovery (file-name) order
        assert_eq!(slugs, ["first", "second", "third"]);
    }

    #[test]
    fn test_sort_does_not_mutate_input() {
        let dir = site(&[
            ("old.md", &article("Old", "2020-01-01")),
            ("new.md", &article("New", "2024-01-01")),
        ]);

        let catalog = build_catalog(dir.path(), &FsLoader).unwrap();
        let before: Vec<_> = catalog.iter().map(|r| r.slug.clone()).collect();
        let _sorted = sort_by_date_desc(&catalog);
        let after: Vec<_> = catalog.iter().map(|r| r.slug.clone()).collect();
        assert_eq!(before, after);
    }
}

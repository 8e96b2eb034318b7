//! Document loading from the content store.
//!
//! The catalog builder never touches the filesystem directly; it goes
//! through [`ContentLoader`], so the physical storage (or parsing format)
//! can be swapped without touching discovery or sorting.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::ContentLoadError;
use crate::utils::date::Date;

/// A loaded document: validated metadata plus the markdown body.
#[derive(Debug, Clone)]
pub struct Document {
    pub meta: ArticleMeta,
    pub body: String,
}

/// Validated article metadata.
///
/// All three fields are required; a document missing any of them fails
/// the load (and with it, the whole catalog build).
#[derive(Debug, Clone)]
pub struct ArticleMeta {
    pub title: String,
    pub date: Date,
    pub description: String,
    pub author: Option<String>,
}

/// Raw frontmatter as written by the author, before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawMeta {
    title: Option<String>,
    date: Option<String>,
    description: Option<String>,
    author: Option<String>,
}

/// Loads a document's metadata and body given its path.
pub trait ContentLoader {
    fn load(&self, path: &Path) -> Result<Document, ContentLoadError>;
}

/// Filesystem-backed loader: markdown files with TOML `+++` frontmatter.
#[derive(Debug, Default)]
pub struct FsLoader;

impl ContentLoader for FsLoader {
    fn load(&self, path: &Path) -> Result<Document, ContentLoadError> {
        let source = fs::read_to_string(path).map_err(|source| ContentLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let (frontmatter, body) =
            split_frontmatter(&source).ok_or_else(|| ContentLoadError::MissingFrontmatter {
                path: path.to_path_buf(),
            })?;

        let raw: RawMeta =
            toml::from_str(frontmatter).map_err(|source| ContentLoadError::Frontmatter {
                path: path.to_path_buf(),
                source,
            })?;

        let meta = validate_meta(raw, path)?;

        Ok(Document {
            meta,
            body: body.to_string(),
        })
    }
}

/// Split `+++` delimited TOML frontmatter from the markdown body.
///
/// Shared with the static page loader, which applies looser field rules.
pub(crate) fn split_frontmatter(source: &str) -> Option<(&str, &str)> {
    let rest = source.strip_prefix("+++")?;
    let rest = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n"))?;

    // Closing fence on its own line, or at end of file
    if let Some(end) = rest.find("\n+++\n") {
        Some((&rest[..end], &rest[end + 5..]))
    } else if let Some(stripped) = rest.strip_suffix("\n+++") {
        Some((stripped, ""))
    } else {
        None
    }
}

fn validate_meta(raw: RawMeta, path: &Path) -> Result<ArticleMeta, ContentLoadError> {
    let missing = |field: &'static str| ContentLoadError::MissingField {
        path: path.to_path_buf(),
        field,
    };

    let title = raw.title.filter(|t| !t.trim().is_empty()).ok_or_else(|| missing("title"))?;
    let description = raw
        .description
        .filter(|d| !d.trim().is_empty())
        .ok_or_else(|| missing("description"))?;

    let date_str = raw.date.ok_or_else(|| missing("date"))?;
    let date = Date::parse(&date_str).ok_or_else(|| ContentLoadError::InvalidDate {
        path: path.to_path_buf(),
        value: date_str,
    })?;

    Ok(ArticleMeta {
        title,
        date,
        description,
        author: raw.author,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_doc(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".md").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const VALID: &str = "+++\ntitle = \"Hello\"\ndate = \"2024-01-15\"\ndescription = \"A post\"\n+++\n\n# Body\n";

    #[test]
    fn test_load_valid_document() {
        let file = write_doc(VALID);
        let doc = FsLoader.load(file.path()).unwrap();
        assert_eq!(doc.meta.title, "Hello");
        assert_eq!(doc.meta.date, Date::from_ymd(2024, 1, 15));
        assert_eq!(doc.meta.description, "A post");
        assert!(doc.body.contains("# Body"));
    }

    #[test]
    fn test_load_missing_date() {
        let file = write_doc("+++\ntitle = \"Hello\"\ndescription = \"A post\"\n+++\nbody");
        let err = FsLoader.load(file.path()).unwrap_err();
        assert!(matches!(err, ContentLoadError::MissingField { field: "date", .. }));
    }

    #[test]
    fn test_load_invalid_date() {
        let file =
            write_doc("+++\ntitle = \"x\"\ndate = \"soon\"\ndescription = \"y\"\n+++\nbody");
        let err = FsLoader.load(file.path()).unwrap_err();
        assert!(matches!(err, ContentLoadError::InvalidDate { .. }));
    }

    #[test]
    fn test_load_blank_title_rejected() {
        let file = write_doc(
            "+++\ntitle = \"  \"\ndate = \"2024-01-15\"\ndescription = \"y\"\n+++\nbody",
        );
        let err = FsLoader.load(file.path()).unwrap_err();
        assert!(matches!(err, ContentLoadError::MissingField { field: "title", .. }));
    }

    #[test]
    fn test_load_no_frontmatter() {
        let file = write_doc("# Just markdown\n");
        let err = FsLoader.load(file.path()).unwrap_err();
        assert!(matches!(err, ContentLoadError::MissingFrontmatter { .. }));
    }

    #[test]
    fn test_load_malformed_toml() {
        let file = write_doc("+++\ntitle = unquoted\n+++\nbody");
        let err = FsLoader.load(file.path()).unwrap_err();
        assert!(matches!(err, ContentLoadError::Frontmatter { .. }));
    }

    #[test]
    fn test_split_frontmatter_at_eof() {
        let (fm, body) = split_frontmatter("+++\ntitle = \"x\"\n+++").unwrap();
        assert_eq!(fm, "title = \"x\"");
        assert_eq!(body, "");
    }
}

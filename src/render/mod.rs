//! Page rendering: embedded HTML templates plus markdown bodies.
//!
//! Every route is written as `<route>/index.html` under the output
//! directory so the site can be served by any static file host:
//!
//! ```text
//! public/
//! ├── index.html                  home (latest N articles + newsletter)
//! ├── style.css
//! ├── about/index.html            one per static page
//! └── articles/<slug>/index.html  one per article
//! ```

mod markdown;
mod pages;
mod template;

pub use markdown::{MarkdownOptions, to_html};
pub use pages::{StaticPage, load_pages};
pub use template::{Template, TemplateVars, escape_html};

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::catalog::ArticleRecord;
use crate::config::SiteConfig;
use crate::log;
use crate::utils::date::Date;

/// Variables for the base layout template.
struct LayoutVars<'a> {
    language: &'a str,
    title: &'a str,
    description: &'a str,
    site_title: &'a str,
    author: &'a str,
    main: &'a str,
}

impl TemplateVars for LayoutVars<'_> {
    fn apply(&self, content: &str) -> String {
        content
            .replace("__LANGUAGE__", &escape_html(self.language))
            .replace("__TITLE__", &escape_html(self.title))
            .replace("__DESCRIPTION__", &escape_html(self.description))
            .replace("__SITE_TITLE__", &escape_html(self.site_title))
            .replace("__AUTHOR__", &escape_html(self.author))
            .replace("__YEAR__", &Date::today().year.to_string())
            .replace("__MAIN__", self.main)
    }
}

/// Base page layout (head, nav, footer).
const BASE_HTML: Template<LayoutVars<'static>> =
    Template::new(include_str!("templates/base.html"));

/// Newsletter signup form shown on the home page.
const NEWSLETTER_HTML: &str = include_str!("templates/newsletter.html");

/// Embedded stylesheet, copied into the output directory on every build.
const STYLE_CSS: &str = include_str!("templates/style.css");

/// Render the whole site into the output directory.
///
/// `articles` must already be sorted newest-first; the home page takes
/// the first `build.home_articles` of it.
pub fn render_site(config: &SiteConfig, articles: &[ArticleRecord]) -> Result<()> {
    let output_dir = config.output_dir();
    fs::create_dir_all(&output_dir)?;
    fs::write(output_dir.join("style.css"), STYLE_CSS)?;

    let static_pages = load_pages(&config.pages_dir())?;

    write_page(&output_dir.join("index.html"), config, &home_main(config, articles))?;

    for page in &static_pages {
        let main = page_main(page);
        write_route(&output_dir, &page.slug, config, page, &main)?;
    }

    for article in articles {
        let main = article_main(article);
        let path = output_dir
            .join("articles")
            .join(&article.slug)
            .join("index.html");
        write_html(&path, config, &article.title, &article.description, &main)?;
    }

    log!(
        "render";
        "{} articles, {} pages -> {}",
        articles.len(),
        static_pages.len() + 1,
        output_dir.display()
    );
    Ok(())
}

/// Home page body: intro, latest articles, newsletter form.
fn home_main(config: &SiteConfig, articles: &[ArticleRecord]) -> String {
    let mut main = format!(
        "<section class=\"intro\">\n<h1>{}</h1>\n<p>{}</p>\n</section>\n",
        escape_html(&config.site.title),
        escape_html(&config.site.description),
    );

    for article in articles.iter().take(config.build.home_articles) {
        main.push_str(&article_summary(article));
    }

    main.push_str(NEWSLETTER_HTML);
    main
}

/// One article entry on the home page.
fn article_summary(article: &ArticleRecord) -> String {
    format!(
        "<article class=\"summary\">\n\
         <h2><a href=\"/articles/{slug}/\">{title}</a></h2>\n\
         <time datetime=\"{iso}\">{display}</time>\n\
         <p>{description}</p>\n\
         <a href=\"/articles/{slug}/\">Read article</a>\n\
         </article>\n",
        slug = article.slug,
        title = escape_html(&article.title),
        iso = article.date.to_iso8601(),
        display = article.date.to_display(),
        description = escape_html(&article.description),
    )
}

/// Full article page body.
fn article_main(article: &ArticleRecord) -> String {
    format!(
        "<article>\n<h1>{title}</h1>\n<time datetime=\"{iso}\">{display}</time>\n{body}</article>\n",
        title = escape_html(&article.title),
        iso = article.date.to_iso8601(),
        display = article.date.to_display(),
        body = to_html(&article.body, &MarkdownOptions::all()),
    )
}

/// Static page body.
fn page_main(page: &StaticPage) -> String {
    format!(
        "<article>\n<h1>{title}</h1>\n{body}</article>\n",
        title = escape_html(&page.title),
        body = to_html(&page.body, &MarkdownOptions::all()),
    )
}

fn write_route(
    output_dir: &Path,
    slug: &str,
    config: &SiteConfig,
    page: &StaticPage,
    main: &str,
) -> Result<()> {
    let path = output_dir.join(slug).join("index.html");
    write_html(&path, config, &page.title, &page.description, main)
}

fn write_page(path: &Path, config: &SiteConfig, main: &str) -> Result<()> {
    write_html(path, config, &config.site.title, &config.site.description, main)
}

fn write_html(
    path: &Path,
    config: &SiteConfig,
    title: &str,
    description: &str,
    main: &str,
) -> Result<()> {
    let html = BASE_HTML.render(&LayoutVars {
        language: &config.site.language,
        title,
        description,
        site_title: &config.site.title,
        author: &config.site.author,
        main,
    });

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))
}

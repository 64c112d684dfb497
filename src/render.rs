use std::io::Write;
use std::path::Path;

use askama::Template;
use clap::ValueEnum;
use tempfile::NamedTempFile;

use crate::config::FeedConfig;
use crate::entry::Entry;
use crate::error::Error;

/// Rendering theme selected on the command line. Presentation only; has no
/// effect on pipeline semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn css_class(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[derive(Template)]
#[template(path = "feed.html")]
struct FeedTemplate<'a> {
    theme: Theme,
    feed_title: &'a str,
    entries: &'a [Entry],
}

pub struct IndexLink {
    pub title: String,
    pub filename: String,
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    theme: Theme,
    links: Vec<IndexLink>,
}

/// Render one feed's page from its ordered entry list.
pub fn feed_page(feed_title: &str, theme: Theme, entries: &[Entry]) -> Result<String, Error> {
    let template = FeedTemplate {
        theme,
        feed_title,
        entries,
    };
    Ok(template.render()?)
}

/// Render the index page linking every configured feed, in configuration
/// order.
pub fn index_page(theme: Theme, feeds: &[FeedConfig]) -> Result<String, Error> {
    let links = feeds
        .iter()
        .map(|feed| IndexLink {
            title: feed.title.clone(),
            filename: feed.filename(),
        })
        .collect();

    let template = IndexTemplate { theme, links };
    Ok(template.render()?)
}

/// Write a page atomically: the file either keeps its previous content or
/// gets the new content whole, never a partial write.
pub fn write_page(path: &Path, html: &str) -> Result<(), Error> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let dir = dir.unwrap_or_else(|| Path::new("."));

    let write_err = |source: std::io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(html.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;

    Ok(())
}

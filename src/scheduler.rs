use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use crate::config::{Config, FeedConfig};
use crate::entry;
use crate::error::Error;
use crate::fetcher::Fetcher;
use crate::merge;
use crate::render::{self, Theme};
use crate::store::Store;

/// Pause between consecutive feeds within a cycle, to stay polite toward
/// hosts serving several of the configured feeds.
const INTER_FEED_DELAY: Duration = Duration::from_secs(2);

pub struct Scheduler {
    fetcher: Fetcher,
    store: Store,
    out_dir: PathBuf,
    theme: Theme,
}

impl Scheduler {
    pub fn new(store: Store, out_dir: PathBuf, theme: Theme) -> Self {
        Self {
            fetcher: Fetcher::new(),
            store,
            out_dir,
            theme,
        }
    }

    /// Poll forever: reload configuration, run one cycle, sleep, repeat.
    ///
    /// A configuration that fails to load is fatal and propagates; a cycle
    /// never runs against stale or partial configuration. Everything else is
    /// handled inside the cycle.
    pub async fn run(&self, config_path: &Path) -> Result<(), Error> {
        loop {
            let config = Config::load(config_path)?;
            self.run_cycle(&config).await;

            info!("Sleeping for {} seconds", config.update_interval);
            tokio::time::sleep(Duration::from_secs(config.update_interval)).await;
        }
    }

    /// One full pass: every configured feed strictly in order, with a fixed
    /// delay between feeds, then the index page.
    pub async fn run_cycle(&self, config: &Config) {
        info!("Starting cycle over {} feeds", config.feeds.len());

        for (i, feed) in config.feeds.iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(INTER_FEED_DELAY).await;
            }
            if let Err(e) = self.process_feed(feed, config.max_entries).await {
                error!("Feed '{}' failed this cycle: {}", feed.title, e);
            }
        }

        if let Err(e) = self.write_index(&config.feeds) {
            error!("Failed to write index page: {}", e);
        }

        info!("Cycle complete");
    }

    /// Fetch, normalize, merge, persist, and render a single feed.
    ///
    /// A fetch failure degrades to an empty batch: the stored history stays
    /// untouched and the page is re-rendered from it. Store and write errors
    /// fail this feed's update for the cycle; the next cycle retries.
    async fn process_feed(&self, feed: &FeedConfig, max_entries: usize) -> Result<(), Error> {
        info!("Fetching feed: {} ({})", feed.title, feed.url);

        let raw_items = match self.fetcher.fetch_feed(&feed.url).await {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    "Fetch failed for '{}', treating as empty this cycle: {}",
                    feed.title, e
                );
                Vec::new()
            }
        };

        let now = Utc::now();
        let mut fresh = Vec::with_capacity(raw_items.len());
        for item in raw_items {
            match entry::normalize(item, now) {
                Ok(entry) => fresh.push(entry),
                Err(e) => warn!("Skipping entry in '{}': {}", feed.title, e),
            }
        }

        let history = self.store.load_entries(&feed.url).await?;
        let known: HashSet<String> = history.iter().map(|e| e.link.clone()).collect();

        let new_batch = merge::filter_new(&known, fresh);
        info!("{} new entries for '{}'", new_batch.len(), feed.title);

        let merged = merge::merge_bounded(new_batch, history, max_entries);
        self.store.replace_entries(&feed.url, &merged).await?;

        let html = render::feed_page(&feed.title, self.theme, &merged)?;
        render::write_page(&self.out_dir.join(feed.filename()), &html)?;

        Ok(())
    }

    fn write_index(&self, feeds: &[FeedConfig]) -> Result<(), Error> {
        let html = render::index_page(self.theme, feeds)?;
        render::write_page(&self.out_dir.join("index.html"), &html)
    }
}

//! Persisted per-feed entry history.
//!
//! Each feed owns a flat ordered list of entries keyed by feed URL. The list
//! is the source of truth for dedup membership; rendered markup is derived
//! from it and never consulted.

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};

use crate::entry::Entry;
use crate::error::Error;

pub struct Store {
    pool: SqlitePool,
}

impl Store {
    pub async fn new(database_url: &str) -> Result<Self, Error> {
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    pub async fn initialize(&self) -> Result<(), Error> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                feed_url TEXT NOT NULL,
                position INTEGER NOT NULL,
                link TEXT NOT NULL,
                title TEXT NOT NULL,
                summary TEXT NOT NULL DEFAULT '',
                published_at TEXT NOT NULL,
                PRIMARY KEY (feed_url, position),
                UNIQUE (feed_url, link)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Load a feed's stored history in its persisted order (newest first).
    pub async fn load_entries(&self, feed_url: &str) -> Result<Vec<Entry>, Error> {
        let entries = sqlx::query_as::<_, Entry>(
            r#"
            SELECT title, link, published_at, summary
            FROM entries
            WHERE feed_url = ?
            ORDER BY position
            "#,
        )
        .bind(feed_url)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Swap a feed's entire stored history in one transaction, so the list
    /// either fully updates or stays untouched.
    pub async fn replace_entries(&self, feed_url: &str, entries: &[Entry]) -> Result<(), Error> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM entries WHERE feed_url = ?")
            .bind(feed_url)
            .execute(&mut *tx)
            .await?;

        for (position, entry) in entries.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO entries (feed_url, position, link, title, summary, published_at)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(feed_url)
            .bind(position as i64)
            .bind(&entry.link)
            .bind(&entry.title)
            .bind(&entry.summary)
            .bind(entry.published_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

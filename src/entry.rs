use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use sqlx::FromRow;

use crate::timezone;

/// One item as it came off the wire, before any date handling.
///
/// Date fields stay textual here on purpose: feeds disagree wildly about
/// formats and zone abbreviations, and the normalizer owns that problem.
#[derive(Debug, Clone, Default)]
pub struct RawItem {
    pub title: String,
    pub link: String,
    pub published: Option<String>,
    pub updated: Option<String>,
    pub summary: Option<String>,
}

/// One normalized, timestamped feed entry. `link` is the dedup key
/// (case-sensitive, exact match); `published_at` is always timezone-aware.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Entry {
    pub title: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
    pub summary: String,
}

impl Entry {
    /// Human-readable timestamp for the rendered pages.
    pub fn published_display(&self) -> String {
        self.published_at.format("%a, %d %b %Y %H:%M UTC").to_string()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unparsable date {text:?}")]
pub struct DateParseError {
    pub text: String,
}

/// Convert a raw item into exactly one entry.
///
/// The publication instant prefers `published`, falls back to `updated`, and
/// finally to `now` when the feed supplies neither. A date string that is
/// present but unparsable fails this single entry; the caller skips it and
/// continues with the rest of the feed.
pub fn normalize(raw: RawItem, now: DateTime<Utc>) -> Result<Entry, DateParseError> {
    let published_at = match raw.published.as_deref().or(raw.updated.as_deref()) {
        Some(text) => parse_feed_date(text)?,
        None => now,
    };

    Ok(Entry {
        title: raw.title,
        link: raw.link,
        published_at,
        summary: raw.summary.unwrap_or_default(),
    })
}

/// Parse a feed date string into a UTC instant.
///
/// Accepted forms, in order: an RFC-2822-like date whose trailing zone token
/// is an abbreviation from [`timezone::resolve`], standard RFC 2822,
/// RFC 3339 / ISO-8601, and finally a bare naive datetime which is taken as
/// UTC. The abbreviation path runs first because chrono's RFC 2822 parser
/// treats unknown alphabetic zones as +0000, which would silently misplace
/// zones like JST by nine hours.
pub fn parse_feed_date(text: &str) -> Result<DateTime<Utc>, DateParseError> {
    let text = text.trim();

    if let Some((head, token)) = text.rsplit_once(' ') {
        if let Some(tz) = timezone::resolve(token) {
            if let Some(naive) = parse_naive(head.trim()) {
                // A local time falling in a DST gap degrades to UTC rather
                // than rejecting the entry.
                return Ok(match tz.from_local_datetime(&naive).earliest() {
                    Some(local) => local.with_timezone(&Utc),
                    None => naive.and_utc(),
                });
            }
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Some(naive) = parse_naive(text) {
        return Ok(naive.and_utc());
    }

    Err(DateParseError {
        text: text.to_string(),
    })
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    const FORMATS: &[&str] = &[
        "%a, %d %b %Y %H:%M:%S",
        "%a, %d %b %y %H:%M:%S",
        "%d %b %Y %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
    ];

    FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
}

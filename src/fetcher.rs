use std::str::FromStr;
use std::time::Duration;

use reqwest::Client;
use tracing::warn;

use crate::entry::RawItem;
use crate::error::Error;

pub struct Fetcher {
    client: Client,
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetcher {
    pub fn new() -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent("Feedsite/0.1 (RSS to HTML)")
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Fetch one feed and return its raw items. Date fields are passed
    /// through as the original strings so the normalizer sees exactly what
    /// the feed published.
    pub async fn fetch_feed(&self, url: &str) -> Result<Vec<RawItem>, Error> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_feed(&body)
    }
}

/// Parse a feed document as Atom first, then RSS.
pub fn parse_feed(body: &str) -> Result<Vec<RawItem>, Error> {
    if let Ok(feed) = atom_syndication::Feed::from_str(body) {
        return Ok(atom_items(&feed));
    }
    if let Ok(channel) = rss::Channel::from_str(body) {
        return Ok(rss_items(&channel));
    }
    Err(Error::UnrecognizedFeed)
}

fn rss_items(channel: &rss::Channel) -> Vec<RawItem> {
    let mut items = Vec::new();

    for item in channel.items() {
        let Some(link) = item.link() else {
            warn!(
                "Skipping entry with no link: {}",
                item.title().unwrap_or("(untitled)")
            );
            continue;
        };

        items.push(RawItem {
            title: item.title().unwrap_or("Untitled").to_string(),
            link: link.to_string(),
            published: item.pub_date().map(str::to_string),
            updated: None,
            summary: item.description().map(str::to_string),
        });
    }

    items
}

fn atom_items(feed: &atom_syndication::Feed) -> Vec<RawItem> {
    let mut items = Vec::new();

    for entry in feed.entries() {
        let Some(link) = entry.links().first() else {
            warn!("Skipping entry with no link: {}", entry.title().as_str());
            continue;
        };

        items.push(RawItem {
            title: entry.title().to_string(),
            link: link.href().to_string(),
            published: entry.published().map(|dt| dt.to_rfc3339()),
            updated: Some(entry.updated().to_rfc3339()),
            summary: entry.summary().map(|text| text.to_string()),
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;

    const RSS_SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Example News</title>
    <link>https://example.com</link>
    <description>Example</description>
    <item>
      <title>First Article</title>
      <link>https://example.com/first</link>
      <pubDate>Mon, 02 Jan 2023 10:00:00 GMT</pubDate>
      <description>The first one.</description>
    </item>
    <item>
      <title>Second Article</title>
      <link>https://example.com/second</link>
      <pubDate>Tue, 03 Jan 2023 10:00:00 JST</pubDate>
    </item>
  </channel>
</rss>"#;

    const ATOM_SAMPLE: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example Atom</title>
  <id>urn:example</id>
  <updated>2023-01-02T10:00:00Z</updated>
  <entry>
    <title>Atom Article</title>
    <id>urn:example:1</id>
    <link href="https://example.com/atom-article"/>
    <published>2023-01-02T09:00:00Z</published>
    <updated>2023-01-02T10:00:00Z</updated>
    <summary>An atom summary.</summary>
  </entry>
</feed>"#;

    mod parse_feed_tests {
        use super::*;

        #[test]
        fn test_parse_rss_channel() {
            let items = parse_feed(RSS_SAMPLE).unwrap();
            assert_eq!(items.len(), 2);

            assert_eq!(items[0].title, "First Article");
            assert_eq!(items[0].link, "https://example.com/first");
            assert_eq!(
                items[0].published.as_deref(),
                Some("Mon, 02 Jan 2023 10:00:00 GMT")
            );
            assert_eq!(items[0].summary.as_deref(), Some("The first one."));

            // Date strings pass through untouched, abbreviation included
            assert_eq!(
                items[1].published.as_deref(),
                Some("Tue, 03 Jan 2023 10:00:00 JST")
            );
            assert!(items[1].summary.is_none());
        }

        #[test]
        fn test_parse_atom_feed() {
            let items = parse_feed(ATOM_SAMPLE).unwrap();
            assert_eq!(items.len(), 1);

            assert_eq!(items[0].title, "Atom Article");
            assert_eq!(items[0].link, "https://example.com/atom-article");
            assert_eq!(
                items[0].published.as_deref(),
                Some("2023-01-02T09:00:00+00:00")
            );
            assert_eq!(
                items[0].updated.as_deref(),
                Some("2023-01-02T10:00:00+00:00")
            );
            assert_eq!(items[0].summary.as_deref(), Some("An atom summary."));
        }

        #[test]
        fn test_item_without_link_is_skipped() {
            let xml = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Example</title>
    <link>https://example.com</link>
    <description>Example</description>
    <item>
      <title>No Link Here</title>
    </item>
    <item>
      <title>Has Link</title>
      <link>https://example.com/has-link</link>
    </item>
  </channel>
</rss>"#;

            let items = parse_feed(xml).unwrap();
            assert_eq!(items.len(), 1);
            assert_eq!(items[0].link, "https://example.com/has-link");
        }

        #[test]
        fn test_untitled_item_gets_default_title() {
            let xml = r#"<?xml version="1.0"?>
<rss version="2.0">
  <channel>
    <title>Example</title>
    <link>https://example.com</link>
    <description>Example</description>
    <item>
      <link>https://example.com/untitled</link>
    </item>
  </channel>
</rss>"#;

            let items = parse_feed(xml).unwrap();
            assert_eq!(items[0].title, "Untitled");
        }

        #[test]
        fn test_unrecognized_body_is_rejected() {
            let result = parse_feed("<html><body>not a feed</body></html>");
            assert!(matches!(result, Err(Error::UnrecognizedFeed)));
        }
    }

    mod fetch_feed_tests {
        use super::*;
        use wiremock::matchers::{method, path};
        use wiremock::{Mock, MockServer, ResponseTemplate};

        #[tokio::test]
        async fn test_fetch_feed_success() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/rss"))
                .respond_with(ResponseTemplate::new(200).set_body_string(RSS_SAMPLE))
                .mount(&server)
                .await;

            let fetcher = Fetcher::new();
            let items = fetcher
                .fetch_feed(&format!("{}/rss", server.uri()))
                .await
                .unwrap();

            assert_eq!(items.len(), 2);
        }

        #[tokio::test]
        async fn test_fetch_feed_http_error() {
            let server = MockServer::start().await;
            Mock::given(method("GET"))
                .and(path("/rss"))
                .respond_with(ResponseTemplate::new(404))
                .mount(&server)
                .await;

            let fetcher = Fetcher::new();
            let result = fetcher.fetch_feed(&format!("{}/rss", server.uri())).await;

            assert!(matches!(result, Err(Error::Fetch(_))));
        }
    }
}

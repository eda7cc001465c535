use async_trait::async_trait;
use feed_rs::parser;
use nl_core::{Error, FeedEntry, FeedSource, Result};
use reqwest::Client;
use url::Url;
use crate::scrapers::{utils, FetchConfig, FEED_TIMEOUT};

/// RSS/Atom source read over HTTP.
pub struct RssFeedSource {
    url: Url,
    client: Client,
}

impl RssFeedSource {
    pub fn new(url: &str, config: &FetchConfig) -> Result<Self> {
        let url = Url::parse(url)?;
        let client = config.clone().with_timeout(FEED_TIMEOUT).build_client()?;
        Ok(Self { url, client })
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    fn source_url(&self) -> &str {
        self.url.as_str()
    }

    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>> {
        let response = utils::get(&self.client, &self.url)
            .await
            .map_err(|e| Error::Feed(format!("Failed to fetch {}: {}", self.url, e)))?;
        let body = response.bytes().await?;
        parse_entries(&body)
    }
}

/// Parse a feed document into entries, keeping feed order.
///
/// Entries without a link are dropped since every section needs a
/// "Read more" target.
pub fn parse_entries(content: &[u8]) -> Result<Vec<FeedEntry>> {
    tracing::debug!("Parsing feed content ({} bytes)", content.len());
    let feed = parser::parse(content)
        .map_err(|e| Error::Feed(format!("Failed to parse feed: {}", e)))?;

    let entries = feed
        .entries
        .into_iter()
        .filter_map(|entry| {
            let title = entry.title.map(|t| t.content);
            let Some(link) = entry.links.first().map(|l| l.href.clone()) else {
                tracing::warn!("Skipping feed entry without link: {:?}", title);
                return None;
            };
            Some(FeedEntry {
                title,
                description: entry.summary.map(|s| s.content),
                link,
            })
        })
        .collect::<Vec<_>>();

    tracing::info!("Parsed feed with {} entries", entries.len());
    Ok(entries)
}

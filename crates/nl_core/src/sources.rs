use async_trait::async_trait;
use std::path::PathBuf;
use crate::types::FeedEntry;
use crate::Result;

#[async_trait]
pub trait FeedSource: Send + Sync {
    fn source_url(&self) -> &str;

    /// Fetch the feed and return its entries in feed order.
    async fn fetch_entries(&self) -> Result<Vec<FeedEntry>>;
}

#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Find the first image on the article page and save it as JPEG.
    ///
    /// Returns the absolute path of the saved file. Any error means the entry
    /// is rendered without an image.
    async fn fetch_image(&self, article_url: &str, title: &str) -> Result<PathBuf>;
}

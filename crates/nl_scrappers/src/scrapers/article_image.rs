use std::path::{Path, PathBuf};
use async_trait::async_trait;
use image::ImageFormat;
use nl_core::{Error, ImageFetcher, OutputLayout, Result};
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;
use super::{utils, FetchConfig};

/// Saves the first image of an article page as a JPEG under the images dir.
pub struct ArticleImageFetcher {
    client: Client,
    layout: OutputLayout,
}

impl ArticleImageFetcher {
    pub fn new(layout: OutputLayout, config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: config.build_client()?,
            layout,
        })
    }

    async fn download(&self, url: &Url) -> Result<Vec<u8>> {
        let response = utils::get(&self.client, url).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl ImageFetcher for ArticleImageFetcher {
    async fn fetch_image(&self, article_url: &str, title: &str) -> Result<PathBuf> {
        let page_url = utils::parse_url(article_url)?;
        let html = utils::get(&self.client, &page_url).await?.text().await?;
        let image_url = find_first_image(&html, &page_url)?;
        tracing::debug!("Found image {} for '{}'", image_url, title);

        let bytes = self.download(&image_url).await?;
        let path = self.layout.image_path(title);
        let target = path.clone();
        tokio::task::spawn_blocking(move || save_as_jpeg(&bytes, &target))
            .await
            .map_err(|e| Error::External(e.into()))??;

        tracing::info!("🖼️ Saved image for '{}' to {}", title, path.display());
        Ok(path)
    }
}

/// The `src` of the first `<img>` in document order, resolved against `base`.
pub fn find_first_image(html: &str, base: &Url) -> Result<Url> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("img")
        .map_err(|e| Error::Scraping(format!("Invalid selector: {}", e)))?;

    let img = document
        .select(&selector)
        .next()
        .ok_or_else(|| Error::Scraping(format!("No image found on {}", base)))?;

    let src = img
        .value()
        .attr("src")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::Scraping(format!("First image on {} has no src", base)))?;

    utils::resolve(base, src)
}

/// Decode `bytes` in any supported format and write them to `path` as JPEG.
pub fn save_as_jpeg(bytes: &[u8], path: &Path) -> Result<()> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| Error::Image(format!("Failed to decode image: {}", e)))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    // JPEG has no alpha channel
    decoded
        .to_rgb8()
        .save_with_format(path, ImageFormat::Jpeg)
        .map_err(|e| Error::Image(format!("Failed to write {}: {}", path.display(), e)))
}

use std::time::Duration;
use nl_core::{Error, Result};
use reqwest::Client;
use url::Url;

pub mod article_image;

pub const SCRAPE_TIMEOUT: Duration = Duration::from_secs(10);
pub const FEED_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout: Duration,
}

impl FetchConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build_client(&self) -> Result<Client> {
        Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .build()
            .map_err(Error::from)
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("newsletter-bot/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: SCRAPE_TIMEOUT,
        }
    }
}

/// Common utilities for scrapers
pub(crate) mod utils {
    use super::*;

    pub fn parse_url(url: &str) -> Result<Url> {
        Url::parse(url).map_err(|e| Error::Scraping(format!("Failed to parse URL {}: {}", url, e)))
    }

    /// Resolve `reference` against `base`; absolute references pass through.
    pub fn resolve(base: &Url, reference: &str) -> Result<Url> {
        base.join(reference.trim())
            .map_err(|e| Error::Scraping(format!("Cannot resolve '{}' against {}: {}", reference, base, e)))
    }

    /// GET `url`, failing on any non-success status.
    pub async fn get(client: &Client, url: &Url) -> Result<reqwest::Response> {
        let response = client.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Scraping(format!("GET {} returned {}", url, status)));
        }
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::utils;

    #[test]
    fn test_parse_url() {
        assert!(utils::parse_url("https://example.com").is_ok());
        assert!(utils::parse_url("invalid-url").is_err());
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let base = Url::parse("https://news.example.com/world/story.html").unwrap();
        assert_eq!(
            utils::resolve(&base, "/img/a.png").unwrap().as_str(),
            "https://news.example.com/img/a.png"
        );
        assert_eq!(
            utils::resolve(&base, "b.jpg").unwrap().as_str(),
            "https://news.example.com/world/b.jpg"
        );
        assert_eq!(
            utils::resolve(&base, "//cdn.example.com/c.jpg").unwrap().as_str(),
            "https://cdn.example.com/c.jpg"
        );
        assert_eq!(
            utils::resolve(&base, "http://other.org/d.gif").unwrap().as_str(),
            "http://other.org/d.gif"
        );
    }

    #[test]
    fn test_default_config() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, SCRAPE_TIMEOUT);
        assert!(config.user_agent.starts_with("newsletter-bot/"));
        assert!(config.build_client().is_ok());
    }
}

pub mod feed;
pub mod scrapers;

pub use feed::RssFeedSource;
pub use scrapers::article_image::ArticleImageFetcher;
pub use scrapers::FetchConfig;

pub mod prelude {
    pub use super::{ArticleImageFetcher, FetchConfig, RssFeedSource};
    pub use nl_core::{FeedEntry, Result, Error};
}

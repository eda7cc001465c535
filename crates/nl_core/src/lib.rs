pub mod error;
pub mod layout;
pub mod models;
pub mod newsletter;
pub mod paragraph;
pub mod sources;
pub mod storage;
pub mod types;

pub use error::{Error, Result};
pub use layout::{sanitize_filename, OutputLayout};
pub use models::InferenceModel;
pub use newsletter::{EntryReport, ImageStatus, Newsletter, NewsletterBuilder, ParagraphStatus, RunReport};
pub use paragraph::{Paragraph, ParagraphGenerator, FALLBACK_TEXT};
pub use sources::{FeedSource, ImageFetcher};
pub use storage::NewsletterStore;
pub use types::FeedEntry;

pub mod prelude {
    pub use crate::{Error, FeedEntry, FeedSource, ImageFetcher, InferenceModel, NewsletterStore, OutputLayout, Result};
}

use std::sync::Arc;
use nl_core::{NewsletterBuilder, NewsletterStore};
use tokio::sync::Mutex;

pub struct AppState {
    pub builder: Arc<NewsletterBuilder>,
    pub store: Arc<dyn NewsletterStore>,
    /// Held for the whole of a generation run so two requests never
    /// interleave writes to the same output directory.
    pub generation: Mutex<()>,
}

impl AppState {
    pub fn new(builder: Arc<NewsletterBuilder>, store: Arc<dyn NewsletterStore>) -> Self {
        Self {
            builder,
            store,
            generation: Mutex::new(()),
        }
    }
}

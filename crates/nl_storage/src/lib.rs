use std::sync::Arc;
use nl_core::{Error, NewsletterStore, OutputLayout, Result};

pub mod backends;

pub use backends::*;

/// Build the store named by `kind` (`file` or `memory`).
pub fn create_store(kind: &str, layout: &OutputLayout) -> Result<Arc<dyn NewsletterStore>> {
    match kind {
        "file" => Ok(Arc::new(FileStore::new(layout.clone())?)),
        "memory" => Ok(Arc::new(MemoryStore::new())),
        other => Err(Error::Storage(format!(
            "Unknown storage backend '{}'. Available backends: file, memory",
            other
        ))),
    }
}

pub mod prelude {
    pub use super::create_store;
    pub use super::backends::*;
}

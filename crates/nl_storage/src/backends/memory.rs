use async_trait::async_trait;
use nl_core::{NewsletterStore, Result};
use tokio::sync::RwLock;

/// Keeps the latest document in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    content: RwLock<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl NewsletterStore for MemoryStore {
    async fn save(&self, content: &str) -> Result<()> {
        *self.content.write().await = Some(content.to_string());
        Ok(())
    }

    async fn load(&self) -> Result<Option<String>> {
        Ok(self.content.read().await.clone())
    }

    fn location(&self) -> String {
        "memory://newsletter.md".to_string()
    }
}

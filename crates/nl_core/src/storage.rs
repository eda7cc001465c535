use async_trait::async_trait;
use crate::Result;

#[async_trait]
pub trait NewsletterStore: Send + Sync {
    /// Persist the document, replacing any previous version.
    async fn save(&self, content: &str) -> Result<()>;

    /// Latest saved document, or `None` if nothing has been saved yet.
    async fn load(&self) -> Result<Option<String>>;

    /// Human-readable location used in log lines.
    fn location(&self) -> String;
}

use std::io::ErrorKind;
use async_trait::async_trait;
use nl_core::{NewsletterStore, OutputLayout, Result};

/// Writes the document to `<output_dir>/newsletter.md`.
#[derive(Debug, Clone)]
pub struct FileStore {
    layout: OutputLayout,
}

impl FileStore {
    /// Creates the output and images directories up front.
    pub fn new(layout: OutputLayout) -> Result<Self> {
        layout.ensure()?;
        Ok(Self { layout })
    }
}

#[async_trait]
impl NewsletterStore for FileStore {
    async fn save(&self, content: &str) -> Result<()> {
        // The directory may have been removed since startup
        self.layout.ensure()?;
        let path = self.layout.newsletter_path();
        tokio::fs::write(&path, content.as_bytes()).await?;
        tracing::info!("💾 Newsletter saved to {}", path.display());
        Ok(())
    }

    async fn load(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(self.layout.newsletter_path()).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn location(&self) -> String {
        self.layout.newsletter_path().display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_load_before_save() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::new(OutputLayout::new(temp_dir.path())).unwrap();
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_round_trip_is_byte_identical() {
        let temp_dir = tempdir().unwrap();
        let layout = OutputLayout::new(temp_dir.path().join("newsletter_output"));
        let store = FileStore::new(layout.clone()).unwrap();

        let content = "# Weekly Newsletter\n\n## Ünïcödé · 日本語 & <b>\n\r\nno trailing newline";
        store.save(content).await.unwrap();

        assert_eq!(store.load().await.unwrap().as_deref(), Some(content));
        assert_eq!(std::fs::read(layout.newsletter_path()).unwrap(), content.as_bytes());
    }

    #[tokio::test]
    async fn test_save_overwrites() {
        let temp_dir = tempdir().unwrap();
        let store = FileStore::new(OutputLayout::new(temp_dir.path())).unwrap();
        store.save("a much longer first version").await.unwrap();
        store.save("short").await.unwrap();
        assert_eq!(store.load().await.unwrap().as_deref(), Some("short"));
    }

    #[tokio::test]
    async fn test_recreates_removed_directory() {
        let temp_dir = tempdir().unwrap();
        let layout = OutputLayout::new(temp_dir.path().join("out"));
        let store = FileStore::new(layout.clone()).unwrap();
        std::fs::remove_dir_all(layout.root()).unwrap();

        store.save("content").await.unwrap();
        assert!(layout.images_dir().is_dir());
        assert_eq!(store.load().await.unwrap().as_deref(), Some("content"));
    }
}

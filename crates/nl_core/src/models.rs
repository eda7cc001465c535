use async_trait::async_trait;
use std::fmt;
use crate::Result;

/// A hosted chat-completion model.
#[async_trait]
pub trait InferenceModel: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Submit `prompt` as a single user message and return the first choice's text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

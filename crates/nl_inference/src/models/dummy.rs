use std::fmt;
use nl_core::Result;
use super::InferenceModel;

/// Offline model that echoes the prompt's title back as a teaser.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl InferenceModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let title = prompt
            .lines()
            .find_map(|line| line.strip_prefix("Title: "))
            .unwrap_or("this story");
        Ok(format!("Don't miss {}: the full story is one click away.", title.trim()))
    }
}

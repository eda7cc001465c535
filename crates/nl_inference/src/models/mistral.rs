use std::fmt;
use reqwest::Client;
use nl_core::{Error, Result};
use super::{ChatRequest, ChatResponse, InferenceModel};
use crate::Config;

pub struct MistralModel {
    client: Client,
    api_key: Option<String>,
    model_name: String,
    base_url: String,
}

impl fmt::Debug for MistralModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MistralModel")
            .field("client", &"<reqwest::Client>")
            .field("api_key", &"<redacted>")
            .field("model_name", &self.model_name)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl MistralModel {
    /// Builds the client even without an API key. Every completion then
    /// fails, so each section falls back to the placeholder paragraph.
    pub fn new(config: Config) -> Result<Self> {
        let api_key = config.api_key.filter(|k| !k.trim().is_empty());
        if api_key.is_none() {
            tracing::warn!("⚠️ No Mistral API key configured; paragraphs will use the fallback text");
        }

        Ok(Self {
            client: Client::new(),
            api_key,
            model_name: config.model_name,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait::async_trait]
impl InferenceModel for MistralModel {
    fn name(&self) -> &str {
        "Mistral"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Inference("Mistral API key is required".to_string()))?;
        let request = ChatRequest::user(&self.model_name, prompt);

        let response = self.client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Inference(format!("Mistral returned {}: {}", status, body)));
        }

        let text = response.json::<ChatResponse>().await?.into_text()?;
        tracing::debug!("Generated {} characters with {}", text.len(), self.model_name);
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_builds_without_api_key() {
        let model = MistralModel::new(Config::default()).unwrap();
        assert!(!model.has_api_key());

        let blank = MistralModel::new(Config { api_key: Some("  ".to_string()), ..Config::default() }).unwrap();
        assert!(!blank.has_api_key());

        let keyed = MistralModel::new(Config { api_key: Some("test-key".to_string()), ..Config::default() }).unwrap();
        assert!(keyed.has_api_key());
    }

    #[tokio::test]
    async fn test_complete_without_api_key_is_an_error() {
        // Unreachable endpoint: the key check must fail before any request
        let model = MistralModel::new(Config {
            base_url: "http://127.0.0.1:9/v1".to_string(),
            ..Config::default()
        })
        .unwrap();
        let err = model.complete("hello").await.unwrap_err();
        assert_eq!(err.to_string(), "Inference error: Mistral API key is required");
    }

    #[test]
    fn test_endpoint_and_redaction() {
        let model = MistralModel::new(Config {
            api_key: Some("secret-key".to_string()),
            base_url: "http://localhost:8080/v1/".to_string(),
            ..Config::default()
        })
        .unwrap();
        assert_eq!(model.endpoint(), "http://localhost:8080/v1/chat/completions");
        assert!(!format!("{:?}", model).contains("secret-key"));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_an_error() {
        let model = MistralModel::new(Config {
            api_key: Some("test-key".to_string()),
            base_url: "http://127.0.0.1:9/v1".to_string(),
            ..Config::default()
        })
        .unwrap();
        assert!(model.complete("hello").await.is_err());
    }
}

use std::sync::Arc;
use serde::{Deserialize, Serialize};
use nl_core::{Error, InferenceModel, Result};
use crate::Config;

pub mod dummy;
pub mod mistral;

pub use dummy::DummyModel;
pub use mistral::MistralModel;

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn user(model: &str, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: Message,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Message {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice.
    pub fn into_text(self) -> Result<String> {
        self.choices
            .into_iter()
            .next()
            .ok_or_else(|| Error::Inference("Response contained no choices".to_string()))?
            .message
            .content
            .ok_or_else(|| Error::Inference("First choice has no content".to_string()))
    }
}

pub fn create_model(config: Config) -> Result<Arc<dyn InferenceModel>> {
    config.validate()?;
    match config.model.as_str() {
        "mistral" => Ok(Arc::new(MistralModel::new(config)?)),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Inference(format!(
            "Unknown model '{}'. Available models: mistral, dummy",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_shape() {
        let request = ChatRequest::user("mistral-large-latest", "Hello");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "model": "mistral-large-latest",
                "messages": [{"role": "user", "content": "Hello"}]
            })
        );
    }

    #[test]
    fn test_first_choice_text() {
        let body = r#"{
            "id": "cmpl-1",
            "object": "chat.completion",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "First"}, "finish_reason": "stop"},
                {"index": 1, "message": {"role": "assistant", "content": "Second"}, "finish_reason": "stop"}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.into_text().unwrap(), "First");
    }

    #[test]
    fn test_malformed_responses() {
        let empty: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert!(empty.into_text().is_err());

        let null_content: ChatResponse =
            serde_json::from_str(r#"{"choices": [{"message": {"role": "assistant", "content": null}}]}"#).unwrap();
        assert!(null_content.into_text().is_err());
    }

    #[test]
    fn test_create_model() {
        let dummy = create_model(Config { model: "dummy".to_string(), ..Config::default() }).unwrap();
        assert_eq!(dummy.name(), "Dummy");

        let mistral = create_model(Config { api_key: Some("test-key".to_string()), ..Config::default() }).unwrap();
        assert_eq!(mistral.name(), "Mistral");

        let keyless = create_model(Config::default()).unwrap();
        assert_eq!(keyless.name(), "Mistral");

        assert!(create_model(Config { model: "gpt".to_string(), ..Config::default() }).is_err());
    }
}

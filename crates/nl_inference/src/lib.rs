use nl_core::Result;

pub mod models;

pub const DEFAULT_MODEL: &str = "mistral";
pub const DEFAULT_MODEL_NAME: &str = "mistral-large-latest";
pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai/v1";

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: Option<String>,
    /// Backend selector: `mistral` or `dummy`.
    pub model: String,
    /// Model identifier sent with every request.
    pub model_name: String,
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            model_name: DEFAULT_MODEL_NAME.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)?;
        Ok(())
    }
}

pub mod prelude {
    pub use super::Config;
    pub use super::models::create_model;
    pub use nl_core::{InferenceModel, Result, Error};
}

pub use models::create_model;

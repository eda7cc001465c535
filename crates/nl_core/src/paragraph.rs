use std::sync::Arc;
use crate::models::InferenceModel;

pub const FALLBACK_TEXT: &str = "Content unavailable.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Paragraph {
    Generated(String),
    /// The model call failed; the section renders [`FALLBACK_TEXT`].
    Fallback { reason: String },
    /// The model answered with blank text.
    Empty,
}

impl Paragraph {
    pub fn text(&self) -> Option<&str> {
        match self {
            Paragraph::Generated(text) => Some(text),
            Paragraph::Fallback { .. } => Some(FALLBACK_TEXT),
            Paragraph::Empty => None,
        }
    }
}

pub fn build_prompt(title: &str, description: &str) -> String {
    format!(
        "Write an engaging paragraph for a newsletter that entices readers to read the full article.\n\n\
         Title: {title}\n\
         Description: {description}\n\n\
         Keep it to a single paragraph and make the reader curious enough to click through."
    )
}

/// Asks the model for a promotional paragraph per entry. Never fails.
#[derive(Debug, Clone)]
pub struct ParagraphGenerator {
    model: Arc<dyn InferenceModel>,
}

impl ParagraphGenerator {
    pub fn new(model: Arc<dyn InferenceModel>) -> Self {
        Self { model }
    }

    pub async fn generate(&self, title: &str, description: &str) -> Paragraph {
        let prompt = build_prompt(title, description);
        match self.model.complete(&prompt).await {
            Ok(text) if text.trim().is_empty() => {
                tracing::warn!("{} returned an empty paragraph for '{}'", self.model.name(), title);
                Paragraph::Empty
            }
            Ok(text) => Paragraph::Generated(text.trim().to_string()),
            Err(e) => {
                tracing::error!("Failed to generate paragraph for '{}': {}", title, e);
                Paragraph::Fallback { reason: e.to_string() }
            }
        }
    }
}

use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Untitled";
pub const DEFAULT_DESCRIPTION: &str = "No description available.";

/// One item read from the RSS source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    pub link: String,
}

impl FeedEntry {
    pub fn new(title: impl Into<String>, description: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            link: link.into(),
        }
    }

    /// Title with blank or missing values replaced by "Untitled".
    pub fn title_or_default(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
    }

    /// Description, or "No description available." only when the feed had
    /// none. A present but empty description is passed through as is.
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(DEFAULT_DESCRIPTION)
    }
}

use std::sync::Arc;
use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::layout::OutputLayout;
use crate::models::InferenceModel;
use crate::paragraph::{Paragraph, ParagraphGenerator};
use crate::sources::{FeedSource, ImageFetcher};
use crate::types::FeedEntry;
use crate::Result;

pub const MAX_SECTIONS: usize = 5;

pub const INTRODUCTION: &str = "# Weekly Newsletter\n\n\
Welcome to this week's edition! We've picked the latest stories from our feed \
and put together a short preview of each one. Grab a coffee and dig in.\n\n";

pub const CONCLUSION: &str = "Thanks for reading! Stay tuned for more stories in our next edition.\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ParagraphStatus {
    Generated,
    Fallback(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ImageStatus {
    /// Markdown reference relative to the output root.
    Attached(String),
    Missing(String),
}

/// What happened to one rendered section.
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub title: String,
    pub link: String,
    pub paragraph: ParagraphStatus,
    pub image: ImageStatus,
}

impl EntryReport {
    /// The paragraph is the fallback text.
    pub fn has_fallback_paragraph(&self) -> bool {
        matches!(self.paragraph, ParagraphStatus::Fallback(_))
    }

    pub fn has_image(&self) -> bool {
        matches!(self.image, ImageStatus::Attached(_))
    }

    /// Either the paragraph or the image could not be produced.
    pub fn is_degraded(&self) -> bool {
        self.has_fallback_paragraph() || !self.has_image()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub entries: Vec<EntryReport>,
    /// Titles of entries left out because the model returned nothing.
    pub skipped: Vec<String>,
}

impl RunReport {
    /// Sections rendered with the fallback paragraph.
    pub fn fallback_count(&self) -> usize {
        self.entries.iter().filter(|e| e.has_fallback_paragraph()).count()
    }

    pub fn missing_images(&self) -> usize {
        self.entries.iter().filter(|e| !e.has_image()).count()
    }

    /// Sections missing their paragraph, their image, or both.
    pub fn degraded_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_degraded()).count()
    }

    /// Every section has a generated paragraph and an image, and nothing
    /// was skipped.
    pub fn is_clean(&self) -> bool {
        self.degraded_count() == 0 && self.skipped.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct Newsletter {
    pub content: String,
    pub report: RunReport,
}

/// Renders one article section.
pub fn render_section(title: &str, image: Option<&str>, paragraph: &str, link: &str) -> String {
    let mut section = format!("## {}\n\n", title);
    if let Some(image) = image {
        section.push_str(&format!("![{}]({})\n\n", title, image));
    }
    section.push_str(&format!("{}\n\n", paragraph));
    section.push_str(&format!("[Read more]({})\n\n", link));
    section.push_str("---\n\n");
    section
}

pub fn render_document(sections: &[String]) -> String {
    let mut content = String::from(INTRODUCTION);
    for section in sections {
        content.push_str(section);
    }
    content.push_str(CONCLUSION);
    content
}

/// Drives one run: feed, per-entry paragraph and image, Markdown assembly.
pub struct NewsletterBuilder {
    feed: Arc<dyn FeedSource>,
    images: Arc<dyn ImageFetcher>,
    paragraphs: ParagraphGenerator,
    layout: OutputLayout,
    max_sections: usize,
}

impl NewsletterBuilder {
    pub fn new(
        feed: Arc<dyn FeedSource>,
        images: Arc<dyn ImageFetcher>,
        model: Arc<dyn InferenceModel>,
        layout: OutputLayout,
    ) -> Self {
        Self {
            feed,
            images,
            paragraphs: ParagraphGenerator::new(model),
            layout,
            max_sections: MAX_SECTIONS,
        }
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Build the document. Only a failed feed fetch is an error; every
    /// per-entry failure degrades that entry and the run continues.
    pub async fn generate(&self) -> Result<Newsletter> {
        tracing::info!("📡 Fetching feed from {}", self.feed.source_url());
        let entries = self.feed.fetch_entries().await?;
        tracing::info!("📰 Feed returned {} entries", entries.len());

        let mut sections = Vec::with_capacity(self.max_sections);
        let mut report = RunReport {
            generated_at: Utc::now(),
            entries: Vec::new(),
            skipped: Vec::new(),
        };

        for entry in &entries {
            if sections.len() >= self.max_sections {
                break;
            }
            match self.build_section(entry).await {
                Some((section, entry_report)) => {
                    sections.push(section);
                    report.entries.push(entry_report);
                }
                None => report.skipped.push(entry.title_or_default().to_string()),
            }
        }

        tracing::info!(
            "✨ Newsletter built with {} sections ({} fallback paragraphs, {} without image, {} skipped)",
            report.entries.len(),
            report.fallback_count(),
            report.missing_images(),
            report.skipped.len()
        );

        Ok(Newsletter {
            content: render_document(&sections),
            report,
        })
    }

    async fn build_section(&self, entry: &FeedEntry) -> Option<(String, EntryReport)> {
        let title = entry.title_or_default();
        let description = entry.description_or_default();

        tracing::info!("🤖 Generating paragraph for '{}'", title);
        let paragraph = self.paragraphs.generate(title, description).await;
        let text = match paragraph.text() {
            Some(text) => text.to_string(),
            None => {
                tracing::warn!("Skipping '{}': empty paragraph", title);
                return None;
            }
        };

        let image = match self.images.fetch_image(&entry.link, title).await {
            Ok(path) => ImageStatus::Attached(self.layout.image_reference(&path)),
            Err(e) => {
                tracing::error!("No image for '{}' ({}): {}", title, entry.link, e);
                ImageStatus::Missing(e.to_string())
            }
        };

        let image_ref = match &image {
            ImageStatus::Attached(reference) => Some(reference.as_str()),
            ImageStatus::Missing(_) => None,
        };
        let section = render_section(title, image_ref, &text, &entry.link);

        let paragraph = match paragraph {
            Paragraph::Fallback { reason } => ParagraphStatus::Fallback(reason),
            _ => ParagraphStatus::Generated,
        };

        Some((
            section,
            EntryReport {
                title: title.to_string(),
                link: entry.link.clone(),
                paragraph,
                image,
            },
        ))
    }
}

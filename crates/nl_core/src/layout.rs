use std::path::{Component, Path, PathBuf};
use crate::Result;

pub const NEWSLETTER_FILE: &str = "newsletter.md";
pub const IMAGES_DIR: &str = "images";
pub const MAX_FILENAME_CHARS: usize = 50;

/// Where a run writes its document and images.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn newsletter_path(&self) -> PathBuf {
        self.root.join(NEWSLETTER_FILE)
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join(IMAGES_DIR)
    }

    pub fn image_path(&self, title: &str) -> PathBuf {
        self.images_dir().join(format!("{}.jpg", sanitize_filename(title)))
    }

    /// Create the output directory and its images subdirectory.
    pub fn ensure(&self) -> Result<()> {
        std::fs::create_dir_all(self.images_dir())?;
        Ok(())
    }

    /// Markdown reference for `image`, relative to the output root and
    /// always `/`-separated. Characters that would end a bare link
    /// destination are percent-encoded.
    pub fn image_reference(&self, image: &Path) -> String {
        let relative = image
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| {
                let name = image.file_name().map(PathBuf::from).unwrap_or_default();
                Path::new(IMAGES_DIR).join(name)
            });

        relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(encode_destination(&part.to_string_lossy())),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

fn encode_destination(part: &str) -> String {
    let mut encoded = String::with_capacity(part.len());
    for c in part.chars() {
        match c {
            ' ' => encoded.push_str("%20"),
            '%' => encoded.push_str("%25"),
            '(' => encoded.push_str("%28"),
            ')' => encoded.push_str("%29"),
            '<' => encoded.push_str("%3C"),
            '>' => encoded.push_str("%3E"),
            c if c.is_control() => encoded.extend(
                c.to_string().bytes().map(|b| format!("%{:02X}", b)),
            ),
            c => encoded.push(c),
        }
    }
    encoded
}

/// Reduce a title to alphanumerics, spaces, dashes and underscores, capped at
/// [`MAX_FILENAME_CHARS`] characters.
pub fn sanitize_filename(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .take(MAX_FILENAME_CHARS)
        .collect();

    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "untitled".to_string()
    } else {
        cleaned.to_string()
    }
}

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Shared chapter representation across all input formats
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    /// Plain text body; may be empty
    pub content: String,
}

impl Chapter {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

/// What a format reader hands back to the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extracted {
    /// One unstructured text stream, still to be segmented
    FlatText(String),
    /// Sections the container already delimits, in reading order
    Chapters(Vec<Chapter>),
}

/// Trait for reading document formats (PDF, EPUB, DOCX, etc.)
pub trait DocumentReader {
    /// Extract either flat text or ready-made chapters
    fn extract(&self) -> Result<Extracted>;
}

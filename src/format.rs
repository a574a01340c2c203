use crate::error::{ParseError, Result};
use std::fmt;
use std::path::Path;

/// The document formats the parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Txt,
    Pdf,
    Doc,
    Docx,
    Epub,
    Mobi,
}

impl Format {
    /// Resolve a format from a lower-case extension without the leading dot.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            "txt" => Some(Self::Txt),
            "pdf" => Some(Self::Pdf),
            "doc" => Some(Self::Doc),
            "docx" => Some(Self::Docx),
            "epub" => Some(Self::Epub),
            "mobi" => Some(Self::Mobi),
            _ => None,
        }
    }

    /// Select the format purely from the path's extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        Self::from_extension(&ext).ok_or(ParseError::UnsupportedFormat(ext))
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Txt => "txt",
            Self::Pdf => "pdf",
            Self::Doc => "doc",
            Self::Docx => "docx",
            Self::Epub => "epub",
            Self::Mobi => "mobi",
        }
    }

    /// Title used for chapters that have no natural heading.
    pub fn default_title(self) -> &'static str {
        match self {
            Self::Txt => "文本章节",
            Self::Pdf => "PDF 章节",
            Self::Doc | Self::Docx => "Word 章节",
            Self::Epub => "EPUB 章节",
            Self::Mobi => "MOBI 章节",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.extension().to_uppercase())
    }
}

use crate::error::{ParseError, Result};
use crate::format::Format;
use crate::html;
use crate::reader::{Chapter, DocumentReader, Extracted};
use crate::text;
use rbook::prelude::*;
use rbook::Epub;
use std::path::Path;
use tracing::debug;

pub struct EpubData {
    epub: Epub,
}

/// One spine item: its path inside the container and its XHTML
pub struct SpineDocument {
    pub name: String,
    pub html: String,
}

impl EpubData {
    pub fn open(path: &Path) -> Result<Self> {
        let epub = Epub::options()
            .strict(false)
            .open(path)
            .map_err(|e| ParseError::extraction(Format::Epub, "failed to parse EPUB file", e.to_string()))?;
        Ok(Self { epub })
    }

    /// Spine documents in reading order
    pub fn documents(&self) -> Result<Vec<SpineDocument>> {
        let mut documents = Vec::new();
        let mut reader = self.epub.reader();

        while let Some(result) = reader.read_next() {
            let data = result.map_err(|e| {
                ParseError::extraction(Format::Epub, "failed to read EPUB chapter content", e.to_string())
            })?;
            let html = data.content().to_string();

            // Skip empty or near-empty content
            if html.trim().is_empty() {
                continue;
            }

            let name = data
                .manifest_entry()
                .resource()
                .key()
                .value()
                .unwrap_or_default()
                .to_string();

            documents.push(SpineDocument { name, html });
        }

        Ok(documents)
    }
}

impl DocumentReader for EpubData {
    fn extract(&self) -> Result<Extracted> {
        let documents = self.documents()?;
        chapters_from_documents(&documents).map(Extracted::Chapters)
    }
}

/// Turn spine documents into chapters, dropping those without visible text
pub fn chapters_from_documents(documents: &[SpineDocument]) -> Result<Vec<Chapter>> {
    let mut chapters = Vec::new();

    for document in documents {
        let dom = html::parse_html(&document.html);
        let content = text::normalize(&html::body_text(&dom));

        if content.trim().is_empty() {
            debug!(name = %document.name, "Skipping EPUB item without text");
            continue;
        }

        chapters.push(Chapter {
            title: guess_title(&document.name),
            content,
        });
    }

    if chapters.is_empty() {
        return Err(ParseError::EmptyResult(Format::Epub));
    }
    Ok(chapters)
}

/// File name without directory or extension, e.g. `OEBPS/Text/ch01.xhtml` -> `ch01`
pub fn guess_title(name: &str) -> String {
    Path::new(name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| Format::Epub.default_title().to_string())
}

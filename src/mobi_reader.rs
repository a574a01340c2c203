//! MOBI books.
//!
//! The book's HTML is walked element by element: `h1`–`h3` open a new chapter
//! and every other block contributes a line of content. Books without such
//! headings are handed back as flat text for the segmenter.

use crate::error::{ParseError, Result};
use crate::format::Format;
use crate::html;
use crate::reader::{Chapter, DocumentReader, Extracted};
use crate::text;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;
use tracing::debug;

const SECTION_HEADINGS: [&str; 3] = ["h1", "h2", "h3"];
const WALKED_ELEMENTS: [&str; 8] = ["h1", "h2", "h3", "h4", "h5", "h6", "p", "div"];

pub struct MobiData {
    raw_html: String,
}

impl MobiData {
    pub fn open(path: &Path) -> Result<Self> {
        // The mobi crate can panic on truncated records.
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            mobi::Mobi::from_path(path).map(|book| book.content_as_string_lossy())
        }));

        match outcome {
            Ok(Ok(raw_html)) => Ok(Self { raw_html }),
            Ok(Err(e)) => Err(ParseError::extraction(
                Format::Mobi,
                "failed to parse MOBI file",
                e.to_string(),
            )),
            Err(_) => Err(ParseError::extraction_msg(
                Format::Mobi,
                "failed to parse MOBI file: malformed document",
            )),
        }
    }

    pub fn from_html(raw_html: impl Into<String>) -> Self {
        Self {
            raw_html: raw_html.into(),
        }
    }
}

impl DocumentReader for MobiData {
    fn extract(&self) -> Result<Extracted> {
        Ok(extract_from_html(&self.raw_html))
    }
}

/// Split book HTML at `h1`–`h3`, or return its plain text when that finds
/// nothing to split on.
pub fn extract_from_html(raw_html: &str) -> Extracted {
    let dom = html::parse_html(raw_html);
    let default_title = Format::Mobi.default_title();

    let mut chapters = Vec::new();
    let mut saw_heading = false;
    let mut current_title = default_title.to_string();
    let mut current_content: Vec<String> = Vec::new();

    for element in html::find_elements(&dom.document, &WALKED_ELEMENTS) {
        let is_heading = html::element_name(&element)
            .is_some_and(|name| SECTION_HEADINGS.contains(&name));
        let text = text::normalize(&html::text_content(&element, " "));

        if is_heading {
            saw_heading = true;
            if !current_content.is_empty() {
                chapters.push(make_chapter(&current_title, &current_content));
                current_content.clear();
            }
            current_title = text;
        } else {
            current_content.push(text);
        }
    }

    if !current_content.is_empty() {
        chapters.push(make_chapter(&current_title, &current_content));
    }

    if chapters.is_empty() || !saw_heading {
        debug!(chapters = chapters.len(), "No MOBI headings, falling back to flat text");
        return Extracted::FlatText(html::document_text(&dom));
    }
    Extracted::Chapters(chapters)
}

fn make_chapter(title: &str, content: &[String]) -> Chapter {
    let title = match title.trim() {
        "" => Format::Mobi.default_title(),
        t => t,
    };
    Chapter::new(title, content.join("\n").trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn headings_open_chapters() {
        let html = "<html><body>\
            <h1>Part One</h1><p>first</p><p>second</p>\
            <h2>Part Two</h2><h4>aside</h4><div>third</div>\
            </body></html>";

        let Extracted::Chapters(chapters) = extract_from_html(html) else {
            panic!("expected chapters");
        };
        assert_eq!(
            chapters,
            vec![
                Chapter::new("Part One", "first\nsecond"),
                Chapter::new("Part Two", "aside\nthird"),
            ]
        );
    }

    #[test]
    fn content_before_first_heading_uses_default_title() {
        let html = "<body><p>preface</p><h3>One</h3><p>body</p></body>";
        let Extracted::Chapters(chapters) = extract_from_html(html) else {
            panic!("expected chapters");
        };
        assert_eq!(chapters[0], Chapter::new("MOBI 章节", "preface"));
        assert_eq!(chapters[1], Chapter::new("One", "body"));
    }

    #[test]
    fn blank_heading_falls_back_to_default_title() {
        let html = "<body><h1>Real</h1><p>a</p><h2>\u{3000} </h2><p>b</p></body>";
        let Extracted::Chapters(chapters) = extract_from_html(html) else {
            panic!("expected chapters");
        };
        assert_eq!(chapters[1].title, "MOBI 章节");
    }

    #[test]
    fn nested_blocks_are_each_visited() {
        let html = "<body><h1>T</h1><div><p>x</p></div></body>";
        let Extracted::Chapters(chapters) = extract_from_html(html) else {
            panic!("expected chapters");
        };
        assert_eq!(chapters[0].content, "x\nx");
    }

    #[test]
    fn headings_without_content_fall_back() {
        let html = "<body><h1>Only a title</h1></body>";
        assert_eq!(
            extract_from_html(html),
            Extracted::FlatText("Only a title".into())
        );
    }

    #[test]
    fn no_headings_falls_back_to_document_text() {
        let html = "<body><p>第一章 开始</p><p>正文</p></body>";
        assert_eq!(
            extract_from_html(html),
            Extracted::FlatText("第一章 开始\n正文".into())
        );
    }

    #[test]
    fn garbage_file_is_extraction_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.mobi");
        std::fs::write(&path, b"not a palm database").unwrap();

        assert!(matches!(
            MobiData::open(&path),
            Err(ParseError::ExtractionFailure { format: Format::Mobi, .. })
        ));
    }
}

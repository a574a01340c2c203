//! Split documents into titled chapters.
//!
//! [`DocumentParser::parse`] picks a reader from the file extension (TXT, PDF,
//! DOC, DOCX, EPUB or MOBI). Formats that only yield a flat text stream are cut
//! at heading lines such as `第一章` or `Chapter 1`, falling back to fixed-size
//! chunks when no headings are found. EPUB and MOBI keep the sections their
//! containers already delimit.
//!
//! ```no_run
//! use chapterize::DocumentParser;
//!
//! let chapters = DocumentParser::new().parse("novel.txt")?;
//! for chapter in &chapters {
//!     println!("{}: {} chars", chapter.title, chapter.content.chars().count());
//! }
//! # Ok::<(), chapterize::ParseError>(())
//! ```

pub mod doc_reader;
pub mod docx_reader;
pub mod epub_reader;
pub mod error;
pub mod format;
pub mod html;
pub mod mobi_reader;
pub mod parser;
pub mod pdf_reader;
pub mod reader;
pub mod segmenter;
pub mod text;
pub mod txt_reader;

pub use doc_reader::{BackendError, CommandBackend, LegacyDocBackend};
pub use error::{ParseError, Result};
pub use format::Format;
pub use parser::{DocumentParser, DocumentParserBuilder, ParserOptions};
pub use reader::{Chapter, DocumentReader, Extracted};

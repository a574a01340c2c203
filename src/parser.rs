use crate::doc_reader::{CommandBackend, DocData, LegacyDocBackend};
use crate::docx_reader::DocxData;
use crate::epub_reader::EpubData;
use crate::error::Result;
use crate::format::Format;
use crate::mobi_reader::MobiData;
use crate::pdf_reader::PdfData;
use crate::reader::{Chapter, DocumentReader, Extracted};
use crate::segmenter::{self, DEFAULT_CHUNK_SIZE};
use crate::txt_reader::TxtData;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Tunables for [`DocumentParser`]
#[derive(Clone)]
pub struct ParserOptions {
    /// Characters per chapter when a flat document has no headings
    pub chunk_size: usize,
    /// Text extraction backend for `.doc`; `None` makes `.doc` unsupported
    pub doc_backend: Option<Arc<dyn LegacyDocBackend>>,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            doc_backend: Some(Arc::new(CommandBackend::default())),
        }
    }
}

impl fmt::Debug for ParserOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParserOptions")
            .field("chunk_size", &self.chunk_size)
            .field("doc_backend", &self.doc_backend.is_some())
            .finish()
    }
}

/// Turns documents into chapters.
///
/// Holds no per-document state, so one parser can serve concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct DocumentParser {
    options: ParserOptions,
}

impl DocumentParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParserOptions) -> Self {
        Self { options }
    }

    pub fn builder() -> DocumentParserBuilder {
        DocumentParserBuilder::default()
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    /// Parse the file at `path` into chapters in reading order.
    ///
    /// The format is chosen from the extension alone; unknown extensions fail
    /// before the file is touched.
    pub fn parse(&self, path: impl AsRef<Path>) -> Result<Vec<Chapter>> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        info!(path = %path.display(), %format, "Parsing document");

        let extracted = self.reader_for(format, path)?.extract()?;
        let chapters = match extracted {
            Extracted::Chapters(chapters) => chapters,
            Extracted::FlatText(flat) => {
                debug!(chars = flat.len(), "Segmenting flat text");
                segmenter::split_into_chapters(&flat, format.default_title(), self.options.chunk_size)
            }
        };

        info!(%format, chapters = chapters.len(), "Parsed document");
        Ok(chapters)
    }

    /// Segment raw text as if it came from a file of `format`.
    pub fn parse_text(&self, raw: &str, format: Format) -> Vec<Chapter> {
        segmenter::split_into_chapters(raw, format.default_title(), self.options.chunk_size)
    }

    fn reader_for(&self, format: Format, path: &Path) -> Result<Box<dyn DocumentReader>> {
        Ok(match format {
            Format::Txt => Box::new(TxtData::open(path)),
            Format::Pdf => Box::new(PdfData::open(path)),
            Format::Doc => Box::new(DocData::open(path, self.options.doc_backend.clone())),
            Format::Docx => Box::new(DocxData::open(path)?),
            Format::Epub => Box::new(EpubData::open(path)?),
            Format::Mobi => Box::new(MobiData::open(path)?),
        })
    }
}

#[derive(Debug, Default)]
pub struct DocumentParserBuilder {
    options: ParserOptions,
}

impl DocumentParserBuilder {
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.options.chunk_size = chunk_size.max(1);
        self
    }

    pub fn doc_backend(mut self, backend: impl LegacyDocBackend + 'static) -> Self {
        self.options.doc_backend = Some(Arc::new(backend));
        self
    }

    pub fn without_doc_backend(mut self) -> Self {
        self.options.doc_backend = None;
        self
    }

    pub fn build(self) -> DocumentParser {
        DocumentParser::with_options(self.options)
    }
}

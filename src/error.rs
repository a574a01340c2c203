//! Error types for chapter extraction.

use crate::format::Format;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while turning a document into chapters.
///
/// Every variant is terminal for the current parse: no chapters are returned
/// alongside an error.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("unsupported file type: .{0}")]
    UnsupportedFormat(String),

    #[error("{message}")]
    ExtractionFailure {
        format: Format,
        message: String,
        #[source]
        source: Option<BoxError>,
    },

    #[error("no chapters could be extracted from the {0} file")]
    EmptyResult(Format),

    #[error("{message}")]
    MissingOptionalBackend { format: Format, message: String },
}

impl ParseError {
    /// Wraps a library error with a format-specific description.
    pub fn extraction<E>(format: Format, message: impl Into<String>, source: E) -> Self
    where
        E: Into<BoxError>,
    {
        Self::ExtractionFailure {
            format,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// An extraction failure without an underlying library error.
    pub fn extraction_msg(format: Format, message: impl Into<String>) -> Self {
        Self::ExtractionFailure {
            format,
            message: message.into(),
            source: None,
        }
    }

    /// The format the error relates to, if one was recognised.
    pub fn format(&self) -> Option<Format> {
        match self {
            Self::UnsupportedFormat(_) => None,
            Self::ExtractionFailure { format, .. }
            | Self::EmptyResult(format)
            | Self::MissingOptionalBackend { format, .. } => Some(*format),
        }
    }

    /// True when the document itself is at fault rather than the deployment.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, Self::MissingOptionalBackend { .. })
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

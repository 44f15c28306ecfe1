//! Renderer error types.
//!
//! None of these cross the public render entry points: the renderer logs
//! them and degrades to a fallback string. They surface only where a
//! caller builds a renderer or parses a format or extension name.

use thiserror::Error;

/// Errors raised inside the content pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The Markdown converter could not produce HTML.
    #[error("markdown converter '{converter}' failed: {details}")]
    Convert { converter: String, details: String },

    /// The sanitizer could not process its input.
    #[error("sanitizer '{sanitizer}' failed: {details}")]
    Sanitize { sanitizer: String, details: String },

    /// A sanitizer policy would let executable content through.
    #[error("invalid sanitizer policy: {0}")]
    InvalidPolicy(String),

    /// A text format name is not one of the known formats.
    #[error("unknown text format '{0}'. Valid formats: auto, markdown, html, plain_text")]
    UnknownFormat(String),

    /// A Markdown extension name is not one the converter supports.
    #[error(
        "unknown markdown extension '{0}'. Valid extensions: tables, strikethrough, footnotes, none"
    )]
    UnknownExtension(String),
}

impl RenderError {
    /// Create a converter failure.
    pub fn convert(converter: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Convert {
            converter: converter.into(),
            details: details.into(),
        }
    }

    /// Create a sanitizer failure.
    pub fn sanitize(sanitizer: impl Into<String>, details: impl Into<String>) -> Self {
        Self::Sanitize {
            sanitizer: sanitizer.into(),
            details: details.into(),
        }
    }
}

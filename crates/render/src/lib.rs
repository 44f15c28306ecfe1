//! Benon content renderer.
//!
//! Turns stored post and comment bodies into HTML that is safe to inject
//! into a page. Markdown is converted then sanitized, HTML is sanitized,
//! and plain text is escaped and split into paragraphs. The `benon-render`
//! binary wraps the library for one-off files and exported post records.

pub mod config;
pub mod content;
pub mod error;
pub mod post;

pub use config::RenderConfig;
pub use content::{
    ContentKind, ContentRenderer, TextFormat, format_content, looks_like_markdown,
    markdown_to_html, sanitize_html,
};
pub use error::RenderError;
pub use post::{PostRecord, RenderedPost, render_posts};

//! Content rendering module.
//!
//! This module provides:
//! - classify: Markdown/HTML/plain-text detection
//! - MarkdownConverter: Markdown to HTML conversion
//! - Sanitizer: safe-prose HTML sanitization
//! - FilterPipeline: plain-text escaping and paragraph formatting
//! - ContentRenderer: the dispatcher tying them together

mod classify;
mod filter;
mod markdown;
mod render;
mod sanitize;

pub use classify::{ContentKind, TextFormat, classify, contains_html_tag, looks_like_markdown};
pub use filter::{FilterPipeline, HtmlEscapeFilter, ParagraphFilter, TextFilter};
pub use markdown::{CommonMarkConverter, MarkdownConverter, MarkdownExtensions};
pub use render::{
    ContentRenderer, format_content, markdown_to_html, normalize_newlines, sanitize_html,
};
pub use sanitize::{
    AmmoniaSanitizer, DEFAULT_LINK_REL, DEFAULT_URL_SCHEMES, SanitizePolicy, Sanitizer,
};

//! Content dispatcher.
//!
//! [`ContentRenderer`] is the single entry point display code calls. It
//! classifies a blob once and dispatches to one branch:
//! - Markdown: convert, then sanitize
//! - HTML: sanitize
//! - plain text: escape, then paragraphs
//!
//! Every failure is logged and absorbed; callers always get a string.

use std::borrow::Cow;
use std::sync::{Arc, LazyLock};

use tracing::{debug, error, warn};

use super::classify::{ContentKind, TextFormat, classify};
use super::filter::FilterPipeline;
use super::markdown::{CommonMarkConverter, MarkdownConverter};
use super::sanitize::{AmmoniaSanitizer, Sanitizer};
use crate::config::RenderConfig;
use crate::error::RenderError;

/// Renderer with the default policy, built on first use.
static DEFAULT_RENDERER: LazyLock<ContentRenderer> = LazyLock::new(ContentRenderer::default);

/// Normalize `\r\n` line endings to `\n`.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if text.contains("\r\n") {
        Cow::Owned(text.replace("\r\n", "\n"))
    } else {
        Cow::Borrowed(text)
    }
}

/// Classifies content and renders it to safe HTML.
pub struct ContentRenderer {
    sanitizer: Arc<dyn Sanitizer>,
    converter: Arc<dyn MarkdownConverter>,
    plain_text: FilterPipeline,
}

impl ContentRenderer {
    /// Create a renderer from explicit collaborators.
    pub fn new(sanitizer: Arc<dyn Sanitizer>, converter: Arc<dyn MarkdownConverter>) -> Self {
        Self {
            sanitizer,
            converter,
            plain_text: FilterPipeline::plain_text(),
        }
    }

    /// Create a renderer from configuration.
    ///
    /// Fails only if the sanitizer policy is unsafe.
    pub fn from_config(config: &RenderConfig) -> Result<Self, RenderError> {
        let sanitizer = AmmoniaSanitizer::new(config.sanitize.clone())?;
        let converter = CommonMarkConverter::new(config.markdown);
        Ok(Self::new(Arc::new(sanitizer), Arc::new(converter)))
    }

    /// Render content, classifying it first.
    ///
    /// Absent or empty content renders to an empty string.
    pub fn format_content(&self, content: Option<&str>) -> String {
        self.render(content, TextFormat::Auto)
    }

    /// Render content with a caller-chosen format.
    ///
    /// `TextFormat::Auto` behaves like [`ContentRenderer::format_content`].
    pub fn render(&self, content: Option<&str>, format: TextFormat) -> String {
        let Some(content) = content.filter(|c| !c.is_empty()) else {
            return String::new();
        };
        let text = normalize_newlines(content);
        let kind = format.forced_kind().unwrap_or_else(|| classify(&text));
        debug!(kind = %kind, format = %format, len = text.len(), "rendering content");

        match kind {
            ContentKind::Markdown => self.render_markdown(&text),
            ContentKind::Html => self.sanitize_html(&text),
            ContentKind::PlainText => self.plain_text(&text),
        }
    }

    /// Convert Markdown to sanitized HTML.
    ///
    /// If the sanitizer fails, the unsanitized HTML is returned and a
    /// warning logged. If the converter fails, the text is rendered as
    /// plain text instead.
    pub fn markdown_to_html(&self, markdown: &str) -> String {
        if markdown.is_empty() {
            return String::new();
        }
        self.render_markdown(markdown)
    }

    /// Sanitize an HTML fragment.
    ///
    /// If the sanitizer fails, an empty string is returned: with HTML as
    /// the only input there is no safer representation to show.
    pub fn sanitize_html(&self, html: &str) -> String {
        match self.sanitizer.sanitize(html) {
            Ok(clean) => clean,
            Err(e) => {
                error!(
                    sanitizer = self.sanitizer.name(),
                    error = %e,
                    "HTML sanitization failed, dropping content"
                );
                String::new()
            }
        }
    }

    /// Escape plain text and wrap it in paragraph markup.
    pub fn plain_text(&self, text: &str) -> String {
        self.plain_text.process(&normalize_newlines(text))
    }

    /// Classify text after normalizing line endings.
    pub fn classify(&self, text: &str) -> ContentKind {
        classify(&normalize_newlines(text))
    }

    fn render_markdown(&self, markdown: &str) -> String {
        let html = match self.converter.convert(markdown) {
            Ok(html) => html,
            Err(e) => {
                warn!(
                    converter = self.converter.name(),
                    error = %e,
                    "markdown conversion failed, rendering as plain text"
                );
                return self.plain_text(markdown);
            }
        };

        match self.sanitizer.sanitize(&html) {
            Ok(clean) => clean,
            Err(e) => {
                // Accepted risk: unsanitized converter output reaches the page.
                warn!(
                    sanitizer = self.sanitizer.name(),
                    error = %e,
                    "sanitization of rendered markdown failed, returning unsanitized HTML"
                );
                html
            }
        }
    }
}

impl Default for ContentRenderer {
    fn default() -> Self {
        Self::new(
            Arc::new(AmmoniaSanitizer::default()),
            Arc::new(CommonMarkConverter::default()),
        )
    }
}

/// Render content with the default renderer.
pub fn format_content(content: Option<&str>) -> String {
    DEFAULT_RENDERER.format_content(content)
}

/// Convert Markdown to sanitized HTML with the default renderer.
pub fn markdown_to_html(markdown: &str) -> String {
    DEFAULT_RENDERER.markdown_to_html(markdown)
}

/// Sanitize HTML with the default renderer.
pub fn sanitize_html(html: &str) -> String {
    DEFAULT_RENDERER.sanitize_html(html)
}

//! Plain-text filter pipeline.
//!
//! Turns text that carries neither Markdown nor HTML into safe markup:
//! - html_escape: escapes the five HTML-significant characters
//! - paragraph: splits on blank lines into `<p>` units, single newlines become `<br/>`
//!
//! Escaping always runs before structure is added, so every angle bracket
//! in the output was introduced by the pipeline itself.

use regex::Regex;
use std::sync::LazyLock;

/// Runs of two or more newlines separate paragraphs.
///
/// # Panics
///
/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid regex literal"));

/// Trait for text filters in the pipeline.
pub trait TextFilter: Send + Sync {
    /// Filter name for debugging.
    fn name(&self) -> &str;

    /// Process the input text and return filtered output.
    fn process(&self, input: &str) -> String;
}

/// Pipeline of text filters applied in sequence.
pub struct FilterPipeline {
    filters: Vec<Box<dyn TextFilter>>,
}

impl FilterPipeline {
    /// Create a new empty pipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline.
    pub fn add<F: TextFilter + 'static>(mut self, filter: F) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Create the plain text pipeline (escape, then paragraphs).
    pub fn plain_text() -> Self {
        Self::new().add(HtmlEscapeFilter).add(ParagraphFilter)
    }

    /// Names of the filters in application order.
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Process text through all filters in the pipeline.
    pub fn process(&self, input: &str) -> String {
        self.filters
            .iter()
            .fold(input.to_string(), |acc, filter| filter.process(&acc))
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::plain_text()
    }
}

/// Filter that escapes all HTML characters.
///
/// Ampersand goes first so the entities added by later replacements are
/// not escaped twice.
pub struct HtmlEscapeFilter;

impl TextFilter for HtmlEscapeFilter {
    fn name(&self) -> &str {
        "html_escape"
    }

    fn process(&self, input: &str) -> String {
        input
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#039;")
    }
}

/// Filter that wraps blank-line separated units in `<p>` and turns the
/// remaining newlines into `<br/>`.
///
/// Expects `\n` line endings.
pub struct ParagraphFilter;

impl TextFilter for ParagraphFilter {
    fn name(&self) -> &str {
        "paragraph"
    }

    fn process(&self, input: &str) -> String {
        PARAGRAPH_BREAK
            .split(input)
            .map(|unit| format!("<p>{}</p>", unit.replace('\n', "<br/>")))
            .collect()
    }
}

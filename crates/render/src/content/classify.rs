//! Content classification.
//!
//! Decides which rendering branch a blob takes. The Markdown check is a
//! permissive heuristic: one hit from any indicator is enough, and false
//! positives are acceptable because Markdown parsers render stray
//! asterisks as literal text.

use regex::{Regex, RegexSet};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::error::RenderError;

/// Markdown indicators. `(?m)` anchors `^` at every line start; `.` never
/// crosses a newline.
const MARKDOWN_INDICATORS: &[&str] = &[
    r"(?m)^#{1,6}\s+",      // ATX heading
    r"\*\*.+\*\*",          // bold
    r"\*.+\*",              // italic (also hits bold)
    r"`{1,3}[^`]+`{1,3}",   // code span or fence
    r"\[.+\]\(.+\)",        // link
    r"(?m)^>\s+",           // blockquote
    r"-{3,}",               // horizontal rule
];

/// # Panics
///
/// Panics if a hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static MARKDOWN_SET: LazyLock<RegexSet> =
    LazyLock::new(|| RegexSet::new(MARKDOWN_INDICATORS).expect("valid regex literals"));

/// An opening tag starting with a letter, anywhere in the text.
///
/// # Panics
///
/// Panics if the hard-coded regex literal is invalid (impossible in practice).
#[allow(clippy::expect_used)]
static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[a-z].*>").expect("valid regex literal"));

/// Which rendering branch a blob takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Markdown,
    Html,
    PlainText,
}

impl ContentKind {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::PlainText => "plain_text",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Format a caller asks for. `Auto` classifies the blob first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextFormat {
    #[default]
    Auto,
    Markdown,
    Html,
    PlainText,
}

impl TextFormat {
    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::PlainText => "plain_text",
        }
    }

    /// The branch this format forces, or `None` for `Auto`.
    pub fn forced_kind(&self) -> Option<ContentKind> {
        match self {
            Self::Auto => None,
            Self::Markdown => Some(ContentKind::Markdown),
            Self::Html => Some(ContentKind::Html),
            Self::PlainText => Some(ContentKind::PlainText),
        }
    }
}

impl fmt::Display for TextFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TextFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "markdown" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "plain_text" => Ok(Self::PlainText),
            _ => Err(RenderError::UnknownFormat(s.to_string())),
        }
    }
}

/// Whether the text shows any Markdown syntax.
///
/// Empty input is never Markdown.
pub fn looks_like_markdown(text: &str) -> bool {
    !text.is_empty() && MARKDOWN_SET.is_match(text)
}

/// Whether the text contains something shaped like an HTML tag.
pub fn contains_html_tag(text: &str) -> bool {
    HTML_TAG.is_match(text)
}

/// Classify text into a rendering branch.
///
/// Markdown wins over HTML: code spans may hold literal angle brackets
/// that would otherwise look like tags.
pub fn classify(text: &str) -> ContentKind {
    if looks_like_markdown(text) {
        ContentKind::Markdown
    } else if contains_html_tag(text) {
        ContentKind::Html
    } else {
        ContentKind::PlainText
    }
}

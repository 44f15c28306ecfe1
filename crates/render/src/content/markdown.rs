//! Markdown to HTML conversion.
//!
//! The converter only produces HTML; it never sanitizes. Raw HTML blocks
//! in the source pass straight through and are left for the sanitizer.

use pulldown_cmark::{Options, Parser, html};

use crate::error::RenderError;

/// Converts Markdown source into an HTML fragment.
pub trait MarkdownConverter: Send + Sync {
    /// Converter name for logging.
    fn name(&self) -> &str;

    /// Convert Markdown source to unsanitized HTML.
    fn convert(&self, markdown: &str) -> Result<String, RenderError>;
}

/// Optional syntax on top of CommonMark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkdownExtensions {
    pub tables: bool,
    pub strikethrough: bool,
    pub footnotes: bool,
}

impl MarkdownExtensions {
    /// Plain CommonMark, no extensions.
    pub fn none() -> Self {
        Self {
            tables: false,
            strikethrough: false,
            footnotes: false,
        }
    }

    /// Parse a comma-separated extension list (`tables,strikethrough`).
    ///
    /// `none` or an empty list turns every extension off.
    pub fn parse_list(list: &str) -> Result<Self, RenderError> {
        let mut extensions = Self::none();
        for name in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match name.to_lowercase().as_str() {
                "tables" => extensions.tables = true,
                "strikethrough" => extensions.strikethrough = true,
                "footnotes" => extensions.footnotes = true,
                "none" => {}
                other => return Err(RenderError::UnknownExtension(other.to_string())),
            }
        }
        Ok(extensions)
    }

    /// Parser options for these extensions.
    pub fn options(&self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        options
    }
}

impl Default for MarkdownExtensions {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            footnotes: true,
        }
    }
}

/// CommonMark converter backed by pulldown-cmark.
///
/// Malformed Markdown degrades to literal text; this converter never fails.
#[derive(Debug, Clone, Default)]
pub struct CommonMarkConverter {
    extensions: MarkdownExtensions,
}

impl CommonMarkConverter {
    pub fn new(extensions: MarkdownExtensions) -> Self {
        Self { extensions }
    }
}

impl MarkdownConverter for CommonMarkConverter {
    fn name(&self) -> &str {
        "commonmark"
    }

    fn convert(&self, markdown: &str) -> Result<String, RenderError> {
        let parser = Parser::new_ext(markdown, self.extensions.options());
        let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut html_output, parser);
        Ok(html_output)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn convert(markdown: &str) -> String {
        CommonMarkConverter::default().convert(markdown).unwrap()
    }

    #[test]
    fn converts_headings_emphasis_and_links() {
        let html = convert("# Title\n\nThis is **bold** and a [link](https://example.com).");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains(r#"<a href="https://example.com">link</a>"#));
    }

    #[test]
    fn escapes_angle_brackets_in_code_spans() {
        let html = convert("Use `<div>` here");
        assert!(html.contains("<code>&lt;div&gt;</code>"));
    }

    #[test]
    fn converts_block_constructs() {
        let html = convert("> quoted\n\n- one\n- two\n\n---\n\n```\ncode\n```");
        assert!(html.contains("<blockquote>"));
        assert!(html.contains("<li>one</li>"));
        assert!(html.contains("<hr />"));
        assert!(html.contains("<pre><code>code\n</code></pre>"));
    }

    #[test]
    fn malformed_markdown_degrades_to_text() {
        let html = convert("**never closed and [broken](link");
        assert!(html.contains("**never closed"));
        assert!(html.starts_with("<p>"));
    }

    #[test]
    fn strikethrough_follows_extensions() {
        assert!(convert("~~gone~~").contains("<del>gone</del>"));

        let plain = CommonMarkConverter::new(MarkdownExtensions::none())
            .convert("~~gone~~")
            .unwrap();
        assert!(!plain.contains("<del>"));
    }

    #[test]
    fn tables_follow_extensions() {
        let table = "| a | b |\n|---|---|\n| 1 | 2 |";
        assert!(convert(table).contains("<table>"));
    }

    #[test]
    fn parse_extension_list() {
        assert_eq!(
            MarkdownExtensions::parse_list("tables, footnotes").unwrap(),
            MarkdownExtensions {
                tables: true,
                strikethrough: false,
                footnotes: true,
            }
        );
        assert_eq!(
            MarkdownExtensions::parse_list("None").unwrap(),
            MarkdownExtensions::none()
        );
        assert_eq!(
            MarkdownExtensions::parse_list("").unwrap(),
            MarkdownExtensions::none()
        );

        let err = MarkdownExtensions::parse_list("tables,mermaid").unwrap_err();
        assert!(matches!(&err, RenderError::UnknownExtension(name) if name == "mermaid"));
        assert!(err.to_string().contains("strikethrough"));
    }

    #[test]
    fn converter_name() {
        assert_eq!(CommonMarkConverter::default().name(), "commonmark");
    }
}

//! Benon test utilities.
//!
//! Helpers for integration testing: post fixtures, hostile content
//! samples, failing collaborators, and assertion utilities for rendered
//! HTML.

use benon_render::PostRecord;
use serde_json::Value as JsonValue;

/// Create a test post with default values.
pub fn test_post(slug: &str, title: &str) -> TestPost {
    TestPost {
        id: JsonValue::String(format!("post-{slug}")),
        slug: slug.to_string(),
        title: title.to_string(),
        excerpt: None,
        content: None,
        published: true,
    }
}

/// A test post builder for creating exported-row fixtures.
#[derive(Debug, Clone)]
pub struct TestPost {
    pub id: JsonValue,
    pub slug: String,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: Option<String>,
    pub published: bool,
}

impl TestPost {
    /// Set a custom ID.
    pub fn with_id(mut self, id: JsonValue) -> Self {
        self.id = id;
        self
    }

    /// Set the body.
    pub fn with_content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    /// Set the excerpt.
    pub fn with_excerpt(mut self, excerpt: &str) -> Self {
        self.excerpt = Some(excerpt.to_string());
        self
    }

    /// Set as unpublished.
    pub fn unpublished(mut self) -> Self {
        self.published = false;
        self
    }

    /// The row as the backend would export it, with extra columns the
    /// renderer must ignore.
    pub fn to_json(&self) -> JsonValue {
        serde_json::json!({
            "id": self.id,
            "slug": self.slug,
            "title": self.title,
            "excerpt": self.excerpt,
            "content": self.content,
            "published": self.published,
            "cover_image": null,
            "created_at": "2024-05-01T10:00:00Z",
        })
    }

    /// The row as a renderer input record.
    pub fn to_record(&self) -> PostRecord {
        PostRecord {
            id: self.id.clone(),
            slug: self.slug.clone(),
            title: self.title.clone(),
            excerpt: self.excerpt.clone(),
            content: self.content.clone(),
            published: self.published,
        }
    }
}

/// Hostile and tricky content samples.
pub mod fixtures {
    /// HTML carrying a script block, an event handler and a safe paragraph.
    pub const SCRIPT_AND_HANDLER: &str =
        r#"<div onclick="alert(1)">Click</div><script>alert(2)</script><p>Safe</p>"#;

    /// A link whose URL runs script.
    pub const JAVASCRIPT_LINK: &str = r#"<a href="javascript:alert(1)">link</a>"#;

    /// Markdown with raw HTML smuggled into it.
    pub const MARKDOWN_WITH_RAW_HTML: &str = "# Post\n\nIntro with **bold**.\n\n<script>steal()</script>\n\n<img src=\"x.png\" onerror=\"alert(1)\">\n\n[click](javascript:alert(1))";

    /// Markdown whose only angle brackets sit inside a code span.
    pub const CODE_SPAN_TAG: &str = "Wrap blocks in `<div>` elements.";

    /// Plain text using every HTML-significant character.
    pub const SPECIAL_CHARS: &str = "Tom & Jerry say \"hi\" <3 it's 5 > 4";

    /// Plain text with line breaks and a paragraph break.
    pub const TWO_PARAGRAPHS: &str = "Line one\nLine two\n\nSecond paragraph";

    /// Every hostile sample, for sweeping invariants.
    pub fn hostile() -> Vec<&'static str> {
        vec![
            SCRIPT_AND_HANDLER,
            JAVASCRIPT_LINK,
            MARKDOWN_WITH_RAW_HTML,
            r#"<img src="a.png" onerror="alert(1)" onload="x()">"#,
            r#"<p>ok</p><SCRIPT type="text/javascript">evil()</SCRIPT>"#,
            r#"<a href=" JaVaScRiPt:alert(1)">mixed case</a>"#,
            r#"<iframe src="https://evil.example"></iframe><p>after</p>"#,
            "<svg onload=alert(1)><circle/></svg>",
            "**bold** <a href=\"javascript:void(0)\" onmouseover=\"x()\">hover</a>",
        ]
    }
}

/// Collaborators that always fail, for exercising fallback paths.
pub mod doubles {
    use benon_render::RenderError;
    use benon_render::content::{MarkdownConverter, Sanitizer};

    /// A sanitizer that can never run.
    pub struct FailingSanitizer;

    impl Sanitizer for FailingSanitizer {
        fn name(&self) -> &str {
            "failing"
        }

        fn sanitize(&self, _html: &str) -> Result<String, RenderError> {
            Err(RenderError::sanitize("failing", "sanitizer unavailable"))
        }
    }

    /// A converter that always errors.
    pub struct FailingConverter;

    impl MarkdownConverter for FailingConverter {
        fn name(&self) -> &str {
            "failing"
        }

        fn convert(&self, _markdown: &str) -> Result<String, RenderError> {
            Err(RenderError::convert("failing", "converter crashed"))
        }
    }
}

/// Assertion helpers for rendered HTML.
pub mod assert {
    use regex::Regex;
    use std::sync::LazyLock;

    /// # Panics
    ///
    /// Panics if the hard-coded regex literal is invalid (impossible in practice).
    #[allow(clippy::expect_used)]
    static EVENT_HANDLER: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"(?i)\bon[a-z]+\s*=").expect("valid regex literal"));

    /// Assert that a string contains a substring.
    pub fn contains(haystack: &str, needle: &str) {
        assert!(
            haystack.contains(needle),
            "Expected string to contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that a string does not contain a substring.
    pub fn not_contains(haystack: &str, needle: &str) {
        assert!(
            !haystack.contains(needle),
            "Expected string to NOT contain '{needle}'\nActual: {haystack}"
        );
    }

    /// Assert that HTML carries no script, event handler or script URL.
    pub fn safe_html(html: &str) {
        let lower = html.to_lowercase();
        not_contains(&lower, "<script");
        not_contains(&lower, "javascript:");
        assert!(
            !EVENT_HANDLER.is_match(html),
            "Expected no event-handler attribute\nActual: {html}"
        );
    }
}

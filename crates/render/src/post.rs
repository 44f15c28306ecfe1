//! Rendering for exported blog post records.
//!
//! Post rows come from the hosted backend's `blog_posts` export. Only the
//! fields the renderer needs are read; everything else in a row is
//! ignored. The body goes through the full dispatcher and the excerpt is
//! always treated as plain text.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::content::{ContentRenderer, TextFormat};

fn default_published() -> bool {
    true
}

/// One exported blog post row.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PostRecord {
    /// Backend row id, passed through untouched.
    pub id: JsonValue,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Rows without the column count as published.
    #[serde(default = "default_published")]
    pub published: bool,
}

/// A post with its body rendered to safe HTML.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPost {
    pub id: JsonValue,
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    pub html: String,
}

impl RenderedPost {
    /// Render one record.
    pub fn from_record(renderer: &ContentRenderer, record: &PostRecord) -> Self {
        Self {
            id: record.id.clone(),
            slug: record.slug.clone(),
            title: record.title.clone(),
            excerpt: record
                .excerpt
                .as_deref()
                .filter(|e| !e.trim().is_empty())
                .map(|e| renderer.render(Some(e), TextFormat::PlainText)),
            html: renderer.format_content(record.content.as_deref()),
        }
    }
}

/// Render every published record, keeping input order.
pub fn render_posts(renderer: &ContentRenderer, records: &[PostRecord]) -> Vec<RenderedPost> {
    records
        .iter()
        .filter(|record| {
            if !record.published {
                debug!(slug = %record.slug, "skipping unpublished post");
            }
            record.published
        })
        .map(|record| RenderedPost::from_record(renderer, record))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: JsonValue) -> PostRecord {
        serde_json::from_value(value).expect("valid post fixture")
    }

    #[test]
    fn deserializes_minimal_row() {
        let post = record(json!({ "id": 7, "slug": "hello", "title": "Hello" }));
        assert_eq!(post.id, json!(7));
        assert_eq!(post.content, None);
        assert!(post.published);
    }

    #[test]
    fn ignores_unknown_columns() {
        let post = record(json!({
            "id": "0b8f",
            "slug": "s",
            "title": "T",
            "cover_image": "https://cdn.example.com/a.jpg",
            "created_at": "2024-05-01T10:00:00Z",
            "content": "Hello"
        }));
        assert_eq!(post.content.as_deref(), Some("Hello"));
    }

    #[test]
    fn renders_body_and_excerpt() {
        let renderer = ContentRenderer::default();
        let post = record(json!({
            "id": "a1",
            "slug": "first",
            "title": "First",
            "excerpt": "Tips & *tricks*",
            "content": "# Welcome\n\nRead **this**."
        }));
        let rendered = RenderedPost::from_record(&renderer, &post);
        assert!(rendered.html.contains("<h1>Welcome</h1>"));
        assert!(rendered.html.contains("<strong>this</strong>"));
        assert_eq!(rendered.excerpt.as_deref(), Some("<p>Tips &amp; *tricks*</p>"));
    }

    #[test]
    fn missing_content_renders_empty() {
        let renderer = ContentRenderer::default();
        let post = record(json!({ "id": 1, "slug": "empty", "title": "Empty", "excerpt": "  " }));
        let rendered = RenderedPost::from_record(&renderer, &post);
        assert_eq!(rendered.html, "");
        assert_eq!(rendered.excerpt, None);
    }

    #[test]
    fn skips_unpublished_posts() {
        let renderer = ContentRenderer::default();
        let posts = vec![
            record(json!({ "id": 1, "slug": "a", "title": "A", "content": "one" })),
            record(json!({ "id": 2, "slug": "b", "title": "B", "published": false })),
            record(json!({ "id": 3, "slug": "c", "title": "C", "content": "three" })),
        ];
        let rendered = render_posts(&renderer, &posts);
        let slugs: Vec<&str> = rendered.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "c"]);
        assert_eq!(rendered[1].html, "<p>three</p>");
    }

    #[test]
    fn serializes_without_empty_excerpt() {
        let rendered = RenderedPost {
            id: json!(1),
            slug: "s".to_string(),
            title: "T".to_string(),
            excerpt: None,
            html: "<p>x</p>".to_string(),
        };
        let value = serde_json::to_value(&rendered).unwrap();
        assert_eq!(
            value,
            json!({ "id": 1, "slug": "s", "title": "T", "html": "<p>x</p>" })
        );
    }
}

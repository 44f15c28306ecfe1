//! HTML sanitization.
//!
//! The sanitizer is an injected capability: the renderer holds a
//! [`Sanitizer`] built once at startup and never looks one up at render
//! time. [`AmmoniaSanitizer`] applies a safe-prose allow-list:
//! - headings, paragraphs, emphasis, lists, blockquote, code/pre, tables
//! - `<a href>` and `<img src alt>` with scheme-checked URLs
//! - `<script>` and `<style>` removed together with their contents
//! - every `on*` event-handler attribute dropped
//!
//! A link whose URL uses a disallowed scheme keeps its text but loses the
//! `href`.

use std::collections::HashSet;

use ammonia::Builder;

use crate::error::RenderError;

/// Schemes that execute script or smuggle markup. No policy may allow them.
const FORBIDDEN_SCHEMES: &[&str] = &["javascript", "vbscript", "livescript", "data"];

/// Schemes allowed in `href`/`src` when nothing else is configured.
pub const DEFAULT_URL_SCHEMES: &[&str] = &["http", "https", "mailto", "tel"];

/// `rel` value added to every link when nothing else is configured.
pub const DEFAULT_LINK_REL: &str = "noopener noreferrer";

/// Turns arbitrary HTML into HTML that is safe to inject into a page.
///
/// Implementations are shared across threads and must not mutate
/// configuration after construction.
pub trait Sanitizer: Send + Sync {
    /// Sanitizer name for logging.
    fn name(&self) -> &str;

    /// Sanitize an HTML fragment.
    fn sanitize(&self, html: &str) -> Result<String, RenderError>;
}

/// URL and link settings for [`AmmoniaSanitizer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizePolicy {
    /// Lowercase scheme names without the trailing colon.
    pub url_schemes: Vec<String>,

    /// `rel` attribute forced onto every `<a>`; `None` leaves links alone.
    pub link_rel: Option<String>,
}

impl SanitizePolicy {
    /// Build a policy, normalizing scheme names (`HTTPS:` → `https`).
    pub fn new<I, S>(url_schemes: I, link_rel: Option<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut schemes: Vec<String> = Vec::new();
        for scheme in url_schemes {
            let scheme = normalize_scheme(scheme.as_ref());
            if !schemes.contains(&scheme) {
                schemes.push(scheme);
            }
        }
        let link_rel = link_rel
            .map(|rel| rel.trim().to_string())
            .filter(|rel| !rel.is_empty());
        Self {
            url_schemes: schemes,
            link_rel,
        }
    }

    /// Reject policies that would let executable URLs through.
    pub fn validate(&self) -> Result<(), RenderError> {
        for scheme in &self.url_schemes {
            if scheme.is_empty() {
                return Err(RenderError::InvalidPolicy(
                    "empty URL scheme in allow-list".to_string(),
                ));
            }
            if !scheme
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
            {
                return Err(RenderError::InvalidPolicy(format!(
                    "'{scheme}' is not a valid URL scheme"
                )));
            }
            if FORBIDDEN_SCHEMES.contains(&scheme.as_str()) {
                return Err(RenderError::InvalidPolicy(format!(
                    "URL scheme '{scheme}' can execute script and cannot be allowed"
                )));
            }
        }
        Ok(())
    }
}

impl Default for SanitizePolicy {
    fn default() -> Self {
        Self::new(
            DEFAULT_URL_SCHEMES.iter().copied(),
            Some(DEFAULT_LINK_REL.to_string()),
        )
    }
}

fn normalize_scheme(scheme: &str) -> String {
    scheme.trim().trim_end_matches(':').to_ascii_lowercase()
}

/// Safe-prose sanitizer backed by ammonia.
///
/// A fresh builder borrows the policy on every call, so the sanitizer
/// holds only owned, read-only configuration.
#[derive(Debug, Clone, Default)]
pub struct AmmoniaSanitizer {
    policy: SanitizePolicy,
}

impl AmmoniaSanitizer {
    /// Create a sanitizer, rejecting unsafe policies.
    pub fn new(policy: SanitizePolicy) -> Result<Self, RenderError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    fn builder(&self) -> Builder<'_> {
        let schemes: HashSet<&str> = self.policy.url_schemes.iter().map(String::as_str).collect();
        let mut builder = Builder::default();
        builder
            .url_schemes(schemes)
            .link_rel(self.policy.link_rel.as_deref());
        builder
    }
}

impl Sanitizer for AmmoniaSanitizer {
    fn name(&self) -> &str {
        "ammonia"
    }

    fn sanitize(&self, html: &str) -> Result<String, RenderError> {
        if html.is_empty() {
            return Ok(String::new());
        }
        Ok(self.builder().clean(html).to_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn clean(html: &str) -> String {
        AmmoniaSanitizer::default().sanitize(html).unwrap()
    }

    #[test]
    fn removes_script_tags_and_event_handlers() {
        let out =
            clean(r#"<div onclick="alert(1)">Click</div><script>alert(2)</script><p>Safe</p>"#);
        assert!(out.contains("Click"));
        assert!(out.contains("<p>Safe</p>"));
        assert!(!out.contains("<script"));
        assert!(!out.contains("alert(2)"));
        assert!(!out.contains("onclick"));
    }

    #[test]
    fn removes_style_with_contents() {
        let out = clean("<style>body { display: none }</style><p>shown</p>");
        assert_eq!(out, "<p>shown</p>");
    }

    #[test]
    fn removes_javascript_uris_keeps_text() {
        let out = clean(r#"<a href="javascript:alert(1)">link</a>"#);
        assert!(out.contains("link"));
        assert!(!out.contains("javascript:"));
        assert!(!out.contains("href"));
    }

    #[test]
    fn removes_data_uris() {
        let out = clean(r#"<img src="data:image/svg+xml;base64,AAAA" alt="pic">"#);
        assert!(!out.contains("data:"));
        assert!(out.contains(r#"alt="pic""#));
    }

    #[test]
    fn keeps_safe_links_and_images() {
        let out = clean(r#"<a href="https://example.com">ok</a><img src="/media/a.png" alt="a">"#);
        assert!(out.contains(r#"href="https://example.com""#));
        assert!(out.contains(r#"rel="noopener noreferrer""#));
        assert!(out.contains(r#"src="/media/a.png""#));
    }

    #[test]
    fn strips_event_handlers_on_images() {
        let out = clean(r#"<img src="x.png" onerror="alert('xss')">"#);
        assert!(!out.contains("onerror"));
        assert!(out.contains(r#"src="x.png""#));
    }

    #[test]
    fn link_rel_can_be_disabled() {
        let sanitizer = AmmoniaSanitizer::new(SanitizePolicy::new(["https"], None)).unwrap();
        let out = sanitizer
            .sanitize(r#"<a href="https://example.com">ok</a>"#)
            .unwrap();
        assert!(!out.contains("rel="));
    }

    #[test]
    fn custom_schemes_restrict_urls() {
        let sanitizer = AmmoniaSanitizer::new(SanitizePolicy::new(["https"], None)).unwrap();
        let out = sanitizer
            .sanitize(r#"<a href="mailto:a@b.c">mail</a>"#)
            .unwrap();
        assert!(!out.contains("mailto:"));
        assert!(out.contains("mail"));
    }

    #[test]
    fn empty_input_is_empty() {
        assert_eq!(clean(""), "");
    }

    #[test]
    fn sanitizing_twice_changes_nothing() {
        for html in [
            r#"<p onclick="x()">Hi <a href="https://example.com" rel="nofollow">there</a></p>"#,
            "<script>bad()</script><h2>Title</h2><ul><li>one &amp; two</li></ul>",
            r#"<img src="javascript:alert(1)" alt="x"><blockquote>q &lt; r</blockquote>"#,
        ] {
            let once = clean(html);
            assert_eq!(clean(&once), once, "not idempotent for {html}");
        }
    }

    #[test]
    fn policy_normalizes_schemes() {
        let policy = SanitizePolicy::new([" HTTPS: ", "https", "Mailto"], Some("  ".to_string()));
        assert_eq!(policy.url_schemes, vec!["https", "mailto"]);
        assert_eq!(policy.link_rel, None);
    }

    #[test]
    fn policy_rejects_script_schemes() {
        for scheme in ["javascript", "JavaScript:", "vbscript", "data"] {
            let policy = SanitizePolicy::new(["https", scheme], None);
            assert!(
                matches!(policy.validate(), Err(RenderError::InvalidPolicy(_))),
                "{scheme} must be rejected"
            );
            assert!(AmmoniaSanitizer::new(policy).is_err());
        }
    }

    #[test]
    fn policy_rejects_malformed_schemes() {
        let policy = SanitizePolicy::new(["ht tp"], None);
        assert!(policy.validate().is_err());
        let policy = SanitizePolicy::new([":"], None);
        assert!(policy.validate().is_err());
    }

    #[test]
    fn default_policy_is_valid() {
        let policy = SanitizePolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.url_schemes, vec!["http", "https", "mailto", "tel"]);
        assert_eq!(policy.link_rel.as_deref(), Some(DEFAULT_LINK_REL));
    }
}

//! Configuration loaded from environment variables.

use std::env;

use anyhow::{Context, Result};

use crate::content::{
    DEFAULT_LINK_REL, DEFAULT_URL_SCHEMES, MarkdownExtensions, SanitizePolicy, TextFormat,
};

/// Renderer configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderConfig {
    /// URL schemes and link `rel` for the sanitizer
    /// (`RENDER_URL_SCHEMES`, default: "http,https,mailto,tel";
    /// `RENDER_LINK_REL`, default: "noopener noreferrer", empty disables).
    pub sanitize: SanitizePolicy,

    /// Markdown extensions (`RENDER_MARKDOWN_EXTENSIONS`, comma-separated,
    /// default: "tables,strikethrough,footnotes", "none" disables all).
    pub markdown: MarkdownExtensions,

    /// Format used when the caller does not pick one
    /// (`RENDER_DEFAULT_FORMAT`, default: "auto").
    pub default_format: TextFormat,
}

impl RenderConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let url_schemes: Vec<String> = lookup("RENDER_URL_SCHEMES")
            .map(|v| {
                v.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| DEFAULT_URL_SCHEMES.iter().map(|s| s.to_string()).collect());

        let link_rel = lookup("RENDER_LINK_REL").unwrap_or_else(|| DEFAULT_LINK_REL.to_string());

        let sanitize = SanitizePolicy::new(url_schemes, Some(link_rel));
        sanitize
            .validate()
            .context("RENDER_URL_SCHEMES is invalid")?;

        let markdown = match lookup("RENDER_MARKDOWN_EXTENSIONS") {
            Some(v) => MarkdownExtensions::parse_list(&v)
                .context("RENDER_MARKDOWN_EXTENSIONS is invalid")?,
            None => MarkdownExtensions::default(),
        };

        let default_format = lookup("RENDER_DEFAULT_FORMAT")
            .unwrap_or_else(|| "auto".to_string())
            .parse::<TextFormat>()
            .context("RENDER_DEFAULT_FORMAT must be one of auto, markdown, html, plain_text")?;

        Ok(Self {
            sanitize,
            markdown,
            default_format,
        })
    }
}

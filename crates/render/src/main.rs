//! Benon content renderer CLI.
//!
//! Renders stored content to safe HTML from the command line.
//!
//! Usage:
//!   benon-render render post.md --format auto
//!   benon-render classify post.md
//!   benon-render posts blog_posts.json > rendered.json

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use benon_render::{ContentRenderer, PostRecord, RenderConfig, TextFormat, render_posts};

/// Render blog content to sanitized HTML.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one content blob and print the HTML.
    Render {
        /// Input file; reads stdin when absent or "-".
        input: Option<PathBuf>,

        /// Force a format: auto, markdown, html or plain_text
        /// (default: RENDER_DEFAULT_FORMAT, then auto).
        #[arg(long)]
        format: Option<TextFormat>,
    },

    /// Print which branch a blob would take.
    Classify {
        /// Input file; reads stdin when absent or "-".
        input: Option<PathBuf>,
    },

    /// Render a JSON array of exported blog post rows.
    Posts {
        /// Input file; reads stdin when absent or "-".
        input: Option<PathBuf>,

        /// Pretty-print the JSON output.
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();
    let config = RenderConfig::from_env().context("failed to load configuration")?;
    debug!(
        url_schemes = ?config.sanitize.url_schemes,
        default_format = %config.default_format,
        "Configuration loaded"
    );

    let renderer =
        ContentRenderer::from_config(&config).context("failed to build content renderer")?;

    let output = execute(args.command, &renderer, config.default_format, io::stdin())?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{output}").context("failed to write output")?;

    Ok(())
}

/// Run one subcommand and return what it prints.
///
/// `stdin` is read when the input path is absent or `-`.
fn execute<R: Read>(
    command: Command,
    renderer: &ContentRenderer,
    default_format: TextFormat,
    stdin: R,
) -> Result<String> {
    match command {
        Command::Render { input, format } => {
            let content = read_input(input.as_deref(), stdin)?;
            Ok(renderer.render(Some(content.as_str()), format.unwrap_or(default_format)))
        }
        Command::Classify { input } => {
            let content = read_input(input.as_deref(), stdin)?;
            Ok(renderer.classify(&content).to_string())
        }
        Command::Posts { input, pretty } => {
            let raw = read_input(input.as_deref(), stdin)?;
            let records = parse_posts(&raw)?;
            let rendered = render_posts(renderer, &records);
            info!(
                read = records.len(),
                rendered = rendered.len(),
                "Posts rendered"
            );
            let json = if pretty {
                serde_json::to_string_pretty(&rendered)
            } else {
                serde_json::to_string(&rendered)
            };
            json.context("failed to serialize rendered posts")
        }
    }
}

fn parse_posts(raw: &str) -> Result<Vec<PostRecord>> {
    serde_json::from_str(raw).context("input is not a JSON array of post records")
}

fn read_input<R: Read>(path: Option<&Path>, mut stdin: R) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

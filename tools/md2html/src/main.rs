//! md2html - convert Markdown to an HTML fragment.
//!
//! Reads a Markdown file (or stdin) and writes the HTML to stdout.
//! `--export <dir>` additionally saves `converted.html` into a directory.

mod error;

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use markdown_html_converter::{
    ConversionOptions, HtmlExport, LineBreakMode, MarkdownConverter, stats,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use error::CliError;

/// Line-break mode as spelled on the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LineBreaks {
    Standard,
    Github,
}

impl From<LineBreaks> for LineBreakMode {
    fn from(value: LineBreaks) -> Self {
        match value {
            LineBreaks::Standard => LineBreakMode::Standard,
            LineBreaks::Github => LineBreakMode::Github,
        }
    }
}

/// Convert Markdown to HTML.
#[derive(Debug, Parser)]
#[command(name = "md2html", version, about)]
struct Cli {
    /// Markdown file to convert (reads stdin when omitted).
    input: Option<PathBuf>,

    /// Paragraph / line-break policy.
    #[arg(long, value_enum, default_value = "standard")]
    line_breaks: LineBreaks,

    /// Leave pipe tables as literal text.
    #[arg(long)]
    no_tables: bool,

    /// Leave fenced and inline code as literal text.
    #[arg(long)]
    no_code_blocks: bool,

    /// Replace :shortcode: emoji.
    #[arg(long)]
    emoji: bool,

    /// Clear the sanitizeHTML flag.
    #[arg(long)]
    no_sanitize: bool,

    /// Full options object as JSON (all five fields required).
    #[arg(
        long,
        value_name = "JSON",
        conflicts_with_all = ["line_breaks", "no_tables", "no_code_blocks", "emoji", "no_sanitize"]
    )]
    options: Option<String>,

    /// Print word and character counts of the input to stderr.
    #[arg(long)]
    stats: bool,

    /// Save the HTML as converted.html in this directory.
    #[arg(long, value_name = "DIR")]
    export: Option<PathBuf>,

    /// Enable debug logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn conversion_options(&self) -> Result<ConversionOptions, CliError> {
        if let Some(json) = &self.options {
            return Ok(ConversionOptions::from_json(json)?);
        }

        Ok(ConversionOptions {
            line_breaks: self.line_breaks.into(),
            enable_tables: !self.no_tables,
            enable_code_blocks: !self.no_code_blocks,
            enable_emoji: self.emoji,
            sanitize_html: !self.no_sanitize,
        })
    }

    fn read_input(&self) -> Result<String, CliError> {
        let bytes = match &self.input {
            Some(path) => fs::read(path)?,
            None => {
                let mut buffer = Vec::new();
                io::stdin().read_to_end(&mut buffer)?;
                buffer
            }
        };

        String::from_utf8(bytes)
            .map_err(|e| CliError::Validation(format!("input is not valid UTF-8: {e}")))
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let options = cli.conversion_options()?;
    debug!(options = %options.to_json(), "resolved conversion options");

    let markdown = cli.read_input()?;
    let html = MarkdownConverter::with_options(options).convert(&markdown);

    let mut stdout = io::stdout().lock();
    stdout.write_all(html.as_bytes())?;
    if !html.is_empty() {
        stdout.write_all(b"\n")?;
    }
    stdout.flush()?;

    if cli.stats {
        let counts = stats(&markdown);
        let summary = serde_json::json!({
            "wordCount": counts.word_count,
            "characterCount": counts.character_count,
        });
        eprintln!("{summary}");
    }

    if let Some(dir) = &cli.export {
        let export = HtmlExport::new(html);
        let path = export.save_in(dir)?;
        info!(path = %path.display(), etag = %export.etag(), "exported html");
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    // --verbose enables DEBUG level, otherwise use RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

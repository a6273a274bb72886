//! chatdown CLI.
//!
//! Exports a saved chat page (HTML) to a Markdown transcript.
//!
//! Usage examples:
//!   $ chatdown conversation.html
//!   $ chatdown conversation.html --output-dir ~/notes --overwrite
//!   $ curl -s "$PAGE_URL" | chatdown - --title "Shared chat" -v

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use chatdown::{DirectorySaver, ExportService, Page};
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "chatdown", author, version, about = "Export chat transcripts from saved HTML pages to Markdown")]
struct Cli {
    /// Saved page to export (`-` reads standard input).
    input: String,

    /// Directory the Markdown file is written to.
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Replace an existing file with the same name.
    #[arg(long)]
    overwrite: bool,

    /// Additional button label that must never be treated as a tool (repeatable).
    #[arg(long = "exclude-tool", value_name = "LABEL")]
    exclude_tools: Vec<String>,

    /// Use this title instead of the page's <title>.
    #[arg(long)]
    title: Option<String>,

    /// Increase log verbosity (pass multiple times for DEBUG).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(summary) => {
            println!("✓ Exported: {}", summary);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("✗ Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    let html = read_input(&cli.input)?;
    let page = Page::parse(&html);

    let mut service = ExportService::new();
    let options = service.options_mut();
    options.tool_exclusions.extend(cli.exclude_tools.iter().cloned());
    options.title_override = cli.title.clone();

    let saver = DirectorySaver::new(&cli.output_dir).overwrite(cli.overwrite);
    let summary = service.export(&page, &saver)?;
    Ok(summary.to_string())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut html = String::new();
        io::stdin()
            .read_to_string(&mut html)
            .context("failed to read page from stdin")?;
        return Ok(html);
    }

    fs::read_to_string(input).with_context(|| format!("failed to read page from {}", input))
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Chat with an ingested repository and drive the ingest form from a terminal
#[derive(Parser)]
#[command(name = "forky", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,

    /// Backend origin. Uses FORKY_BASE_URL if not set.
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for machine consumption
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ask questions about an ingested repository
    Chat {
        /// Question to send. Repeat to send several requests at once.
        #[arg(required = true)]
        messages: Vec<String>,
        /// Saved result page to read the summary and content from
        #[arg(long)]
        page: Option<PathBuf>,
        /// File with the repository summary (overrides --page)
        #[arg(long)]
        summary_file: Option<PathBuf>,
        /// File with the repository content (overrides --page)
        #[arg(long)]
        content_file: Option<PathBuf>,
        /// Request deadline in milliseconds (default: 30000)
        #[arg(long)]
        timeout_ms: Option<u64>,
        /// Print the rendered transcript markup when done
        #[arg(long)]
        html: bool,
    },
    /// Submit a repository to the ingest form
    Ingest {
        /// Repository URL, e.g. https://github.com/owner/repo
        url: String,
        /// File-size slider position (0-500, default: 243)
        #[arg(long)]
        position: Option<u32>,
        /// Pattern type (exclude or include); needs --pattern
        #[arg(long, requires = "pattern")]
        pattern_type: Option<String>,
        /// Glob pattern; needs --pattern-type
        #[arg(long, requires = "pattern_type")]
        pattern: Option<String>,
        /// Form action, relative to the base URL
        #[arg(long, default_value = "/")]
        action: String,
        /// Page markup to submit from (default: a bare ingest form)
        #[arg(long)]
        page: Option<PathBuf>,
        /// Write the digest here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Copy the digest to the system clipboard instead of printing it
        #[arg(long, conflicts_with = "out")]
        copy: bool,
    },
    /// Show the file-size limit for slider positions
    Size {
        /// Slider positions (0-500)
        #[arg(required = true)]
        positions: Vec<u32>,
    },
}

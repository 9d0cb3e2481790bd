use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::types::OutputFormat;

/// enginelint - check engine reference pages and their schema.org graphs
#[derive(Parser)]
#[command(name = "enginelint")]
#[command(about = "Lint engine reference page content and its JSON-LD graph")]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides this.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Lint page data and print a report
    Lint {
        /// Path to the page data JSON file
        data: PathBuf,

        /// Lint configuration file (defaults apply when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Report format (text or json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Only lint this brand
        #[arg(short, long)]
        brand: Option<String>,

        /// Only lint this engine code
        #[arg(short, long)]
        engine: Option<String>,

        /// Exit non-zero on warnings as well as errors
        #[arg(long)]
        deny_warnings: bool,
    },
    /// List every engine with its production years and section sizes
    List {
        /// Path to the page data JSON file
        data: PathBuf,
    },
    /// Print one engine's JSON-LD graph
    Jsonld {
        /// Path to the page data JSON file
        data: PathBuf,
        /// Brand name, e.g. saab
        brand: String,
        /// Engine code, e.g. b230ft
        engine: String,
        /// Wrap the output in a <script type="application/ld+json"> element
        #[arg(long)]
        script_tag: bool,
    },
    /// Write the default lint configuration to a file
    InitConfig {
        /// Destination path
        path: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

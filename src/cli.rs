//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// Pageviews - record and aggregate encyclopedia page views
#[derive(Parser)]
#[command(name = "pageviews")]
#[command(version)]
#[command(about = "Record and aggregate encyclopedia page views", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', global = true, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Record one view of a page
    Record {
        /// Page title
        title: String,

        /// Project identifier (wikipedia~<lang>[~<variant>], commons, wikidata)
        #[arg(long, short = 'p')]
        project: String,

        /// Namespace ID
        #[arg(long, short = 'n', default_value_t = 0)]
        namespace: i32,
    },

    /// Import historical views from a CSV file (title,project,viewed_at)
    Import {
        /// Input file path
        file_path: String,
    },

    /// Show view counts per page
    Counts {
        /// Only show the N most viewed pages
        #[arg(long)]
        top: Option<usize>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Also write counts to a CSV file
        #[arg(long, short = 'o')]
        output: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: config.example.toml)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

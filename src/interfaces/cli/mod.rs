//! CLI interface module
//!
//! This module provides command-line interface functionality for pageviews.

pub mod commands;

use std::fmt;
use std::sync::Arc;

use crate::cli::{Commands, ConfigCommands};
use crate::config::StaticConfig;
use crate::services::PageViewService;
use crate::storage::{PageViewStore, StorageFactory};
use commands::{config_generate, import_views, record_view, show_counts};

#[derive(Debug)]
pub enum CliError {
    StorageError(String),
    ParseError(String),
    CommandError(String),
}

impl CliError {
    /// Format as simple output
    pub fn format_simple(&self) -> String {
        match self {
            CliError::StorageError(msg) => format!("Storage error: {}", msg),
            CliError::ParseError(msg) => format!("Parse error: {}", msg),
            CliError::CommandError(msg) => format!("Command error: {}", msg),
        }
    }

    /// Format as colored output
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        match self {
            CliError::StorageError(msg) => {
                format!("{} {}", "Storage error:".red().bold(), msg.white())
            }
            CliError::ParseError(msg) => {
                format!("{} {}", "Parse error:".yellow().bold(), msg.white())
            }
            CliError::CommandError(msg) => {
                format!("{} {}", "Command error:".red().bold(), msg.white())
            }
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for CliError {}

impl From<crate::errors::PageViewError> for CliError {
    fn from(err: crate::errors::PageViewError) -> Self {
        match err {
            crate::errors::PageViewError::Validation(_)
            | crate::errors::PageViewError::DateParse(_) => CliError::ParseError(err.to_string()),
            other => CliError::StorageError(other.to_string()),
        }
    }
}

async fn open_service(config: &StaticConfig) -> Result<PageViewService, CliError> {
    let storage = StorageFactory::create_with(config).await?;
    Ok(PageViewService::new(Some(storage as Arc<dyn PageViewStore>))?)
}

/// Run a CLI command from clap-parsed input
pub async fn run_cli_command(cmd: Commands, config: &StaticConfig) -> Result<(), CliError> {
    match cmd {
        Commands::Record {
            title,
            project,
            namespace,
        } => record_view(&open_service(config).await?, title, project, namespace).await,

        Commands::Import { file_path } => import_views(&open_service(config).await?, file_path).await,

        Commands::Counts { top, json, output } => {
            show_counts(&open_service(config).await?, top, json, output).await
        }

        // Generate doesn't need a database connection
        Commands::Config {
            action: ConfigCommands::Generate { output_path, force },
        } => config_generate(output_path, force).await,
    }
}

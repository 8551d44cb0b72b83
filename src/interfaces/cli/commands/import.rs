//! Import historical views from CSV

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::PageViewService;
use crate::utils::csv_handler;

pub async fn import_views(service: &PageViewService, file_path: String) -> Result<(), CliError> {
    let requests = csv_handler::read_import_csv(&file_path)?;

    if requests.is_empty() {
        println!("{} No rows to import in {}", "ℹ".bold().blue(), file_path);
        return Ok(());
    }

    println!(
        "{} Importing {} views from {}",
        "ℹ".bold().blue(),
        requests.len().to_string().cyan(),
        file_path.blue()
    );

    let summary = service
        .import_views(&requests)
        .await
        .map_err(|e| CliError::CommandError(format!("Import failed: {}", e)))?;

    println!(
        "{} Imported {} views across {} pages",
        "✓".bold().green(),
        summary.views_inserted.to_string().green(),
        summary.pages_upserted.to_string().green()
    );
    if summary.views_skipped > 0 {
        println!(
            "{} {} views skipped (page not found)",
            "⚠".bold().yellow(),
            summary.views_skipped.to_string().yellow()
        );
    }
    Ok(())
}

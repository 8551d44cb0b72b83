//! Record a single view

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::PageViewService;
use crate::storage::Project;

pub async fn record_view(
    service: &PageViewService,
    title: String,
    project: String,
    namespace: i32,
) -> Result<(), CliError> {
    let project: Project = project.parse()?;

    service
        .record_view(&title, namespace, &project)
        .await
        .map_err(|e| CliError::CommandError(format!("Failed to record view: {}", e)))?;

    println!(
        "{} Recorded view of {} {}",
        "✓".bold().green(),
        title.cyan(),
        format!("({}, ns {})", project, namespace).dimmed()
    );
    Ok(())
}

//! Show aggregated view counts

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::services::{PageViewService, sort_by_views, summarize_counts};
use crate::utils::csv_handler;

pub async fn show_counts(
    service: &PageViewService,
    top: Option<usize>,
    json: bool,
    output: Option<String>,
) -> Result<(), CliError> {
    // 汇总行与列表来自同一个读快照
    let mut counts = service.fetch_page_view_counts().await?;
    let (pages, views) = summarize_counts(&counts);
    sort_by_views(&mut counts);
    if let Some(limit) = top {
        counts.truncate(limit);
    }

    if let Some(path) = output.as_deref() {
        csv_handler::export_counts_to_csv(&counts, path)?;
    }

    if json {
        let body = serde_json::to_string_pretty(&counts)
            .map_err(|e| CliError::CommandError(format!("Failed to serialize counts: {}", e)))?;
        println!("{}", body);
        return Ok(());
    }

    if counts.is_empty() {
        println!("{} No page views recorded", "ℹ".bold().blue());
        return Ok(());
    }

    println!("{}", "Page views:".bold().green());
    println!();
    for count in &counts {
        println!(
            "  {:>6}  {} {}",
            count.count.to_string().cyan(),
            count.page.title,
            format!("({}, ns {})", count.page.project_id, count.page.namespace_id).dimmed()
        );
    }
    println!();

    println!(
        "{} {} pages, {} views ({})",
        "ℹ".bold().blue(),
        pages.to_string().green(),
        views.to_string().green(),
        service.backend_name()
    );

    if let Some(path) = output {
        println!("{} Counts written to {}", "✓".bold().green(), path.blue());
    }
    Ok(())
}

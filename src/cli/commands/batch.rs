use anyhow::{ anyhow, Result };
use std::fs;
use std::path::Path;

use qaforge::{ default_scenarios, BatchScenario, BatchSummary, CancellationToken, QaSystem };

use crate::cli::commands::print_json;
use crate::cli::{ ui, OutputFormat };

/// Batch regression command
pub async fn execute<S: QaSystem>(
    system: &S,
    scenarios_path: Option<&Path>,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<bool> {
    let scenarios = match scenarios_path {
        Some(path) => load_scenarios(path)?,
        None => default_scenarios(),
    };
    ui::print_info(&format!("Starting batch test for {} scenarios...", scenarios.len()));

    let spinner = ui::spinner_with_message("Running scenarios...");
    let results = system.run_batch(&scenarios, cancel).await;
    spinner.finish_and_clear();

    let summary = BatchSummary::from_results(&results);
    match format {
        OutputFormat::Json => print_json(&serde_json::json!({ "results": results, "summary": summary }))?,
        OutputFormat::Text => ui::print_batch_report(&results, &summary),
    }
    Ok(summary.failed == 0)
}

fn load_scenarios(path: &Path) -> Result<Vec<BatchScenario>> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow!("Failed to read scenarios file {}: {}", path.display(), e))?;
    let scenarios: Vec<BatchScenario> = serde_yaml::from_str(&content)?;
    if scenarios.is_empty() {
        return Err(anyhow!("Scenarios file {} is empty", path.display()));
    }
    Ok(scenarios)
}

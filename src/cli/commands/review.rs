use anyhow::Result;

use qaforge::{ CancellationToken, QaSystem };

use crate::cli::commands::print_json;
use crate::cli::{ ui, OutputFormat };

/// Architect/auditor refinement command
pub async fn execute<S: QaSystem>(
    system: &S,
    requirement: &str,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let spinner = ui::spinner_with_message("Architect and auditor at work...");
    let result = system.run_refinement(requirement, cancel).await;
    spinner.finish_and_clear();
    let result = result?;

    if format == OutputFormat::Json {
        return print_json(&result);
    }

    for round in &result.rounds {
        ui::print_header(&format!("Revision {} - auditor says: {}", round.revision, round.decision));
        ui::print_text(&round.auditor_response);
    }

    ui::print_header("FINAL TEST PLAN");
    ui::print_text(result.artifact());
    println!();
    ui::print_decision(result.state.decision, result.revision_count());
    Ok(())
}

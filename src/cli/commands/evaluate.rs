use anyhow::Result;

use qaforge::{ EvaluationRequest, QaSystem };

use crate::cli::commands::print_json;
use crate::cli::{ ui, OutputFormat };

/// Evaluation command producing the health report
pub async fn execute<S: QaSystem>(
    system: &S,
    query: &str,
    context: &str,
    output: &str,
    request: &EvaluationRequest,
    format: OutputFormat,
) -> Result<()> {
    let spinner = ui::spinner_with_message("Scoring...");
    let score = system.evaluate(query, context, output, request).await;
    spinner.finish_and_clear();
    let score = score?;

    match format {
        OutputFormat::Json => print_json(&score),
        OutputFormat::Text => {
            ui::print_health_report(&score);
            Ok(())
        }
    }
}

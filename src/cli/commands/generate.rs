use anyhow::Result;

use qaforge::{ CancellationToken, QaSystem };

use crate::cli::commands::print_json;
use crate::cli::{ ui, OutputFormat };

/// Single-pass test case generation command
pub async fn execute<S: QaSystem>(
    system: &S,
    query: &str,
    format: OutputFormat,
    cancel: &CancellationToken,
) -> Result<()> {
    let spinner = ui::spinner_with_message("Routing & retrieving...");
    let result = system.run_pipeline(query, cancel).await;
    spinner.finish_and_clear();
    let result = result?;

    if format == OutputFormat::Json {
        return print_json(&result);
    }

    ui::print_header(&format!("Route: {}", result.category.as_str().to_uppercase()));
    ui::print_result("Context Used", &result.document.text);
    ui::print_result("Source", result.document.source());
    ui::print_header("AI Generated Test Case");
    ui::print_text(result.artifact.as_str());
    println!();
    ui::print_result("Model", &result.trace.model);
    if let Some(ms) = result.trace.elapsed_ms() {
        ui::print_result("Elapsed", &format!("{} ms", ms));
    }
    Ok(())
}

use colored::*;
use console::Term;
use dialoguer::{ theme::ColorfulTheme, Input };
use indicatif::{ ProgressBar, ProgressStyle };
use std::time::Duration;
use textwrap::wrap;

use qaforge::{ BatchResult, BatchSummary, Decision, EvaluationScore, MetricKind };

/// UI theme for consistent appearance
pub fn get_theme() -> ColorfulTheme {
    ColorfulTheme::default()
}

/// Print a section header
pub fn print_header(title: &str) {
    let title = format!(" {} ", title);
    println!("\n{}\n", title.bold().white().on_blue());
}

/// Print text with proper wrapping
pub fn print_text(text: &str) {
    let width = Term::stdout().size().1 as usize;
    for line in text.lines() {
        if line.starts_with('#') {
            println!("{}", line.bold());
        } else if line.starts_with('-') || line.starts_with('|') || line.starts_with("```") {
            println!("{}", line);
        } else {
            for wrapped_line in wrap(line, width.saturating_sub(10).max(20)) {
                println!("{}", wrapped_line);
            }
        }
    }
}

/// Print an error message
pub fn print_error(message: &str) {
    eprintln!("{} {}", "ERROR:".red().bold(), message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("{} {}", "WARNING:".yellow().bold(), message);
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("{} {}", "SUCCESS:".green().bold(), message);
}

/// Print information
pub fn print_info(message: &str) {
    println!("{} {}", "INFO:".blue().bold(), message);
}

/// Print a formatted result
pub fn print_result(label: &str, value: &str) {
    println!("{}: {}", label.bold(), value);
}

pub fn print_decision(decision: Decision, revisions: u32) {
    let line = decision_line(decision, revisions);
    match decision {
        Decision::Approved => println!("{}", line.green().bold()),
        _ => println!("{}", line.yellow().bold()),
    }
}

fn decision_line(decision: Decision, revisions: u32) -> String {
    match decision {
        Decision::Approved => format!("✓ Approved after {} revision(s)", revisions),
        _ => format!("✗ Not approved after {} revision(s); unapproved at the revision ceiling", revisions),
    }
}

/// System health report for one evaluation
pub fn print_health_report(score: &EvaluationScore) {
    print_header("SYSTEM HEALTH REPORT");
    let rows = [
        ("Retrieval Quality (Context)", MetricKind::ContextualRelevance),
        ("Generation Honesty (Faithfulness)", MetricKind::Faithfulness),
        ("User Satisfaction (Relevance)", MetricKind::AnswerRelevance),
    ];
    for (label, metric) in rows {
        match (score.score(metric), score.metric_passed(metric)) {
            (Some(value), Some(true)) => print_result(label, &format!("{:.2}", value).green().to_string()),
            (Some(value), _) => print_result(label, &format!("{:.2}", value).red().to_string()),
            (None, _) => print_result(label, "not requested"),
        }
    }
    print_result("Scorer", &score.scorer);
    if score.passed {
        print_success("The output stayed faithful to the requirements.");
    } else {
        print_warning("Potential hallucination detected.");
    }
}

pub fn print_batch_report(results: &[BatchResult], summary: &BatchSummary) {
    print_header("BATCH TEST REPORT");
    for result in results {
        let status = if result.passed { "✅ PASS".green() } else { "❌ FAIL".red() };
        let score = result.score.map(|s| format!("{:.2}", s)).unwrap_or_else(|| "-".to_string());
        println!("{} | Score: {} | Query: {}", status, score, result.input);
        if let Some(false) = result.category_matched {
            println!("    routed to unexpected category {:?}", result.category);
        }
        if let Some(error) = &result.error {
            println!("    {}", error.dimmed());
        }
    }
    println!();
    print_result("Passed", &format!("{}/{}", summary.passed, summary.total));
    if let Some(mean) = summary.mean_score {
        print_result("Mean faithfulness", &format!("{:.2}", mean));
    }
}

/// Ask for a line of text when it was not given on the command line
pub fn prompt_text(prompt: &str) -> std::io::Result<String> {
    Input::<String>::with_theme(&get_theme())
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() { Err("Please enter a query first.") } else { Ok(()) }
        })
        .interact_text()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
}

pub fn spinner_with_message(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decision_line_wording() {
        assert_eq!(decision_line(Decision::Approved, 1), "✓ Approved after 1 revision(s)");
        let line = decision_line(Decision::Revise, 3);
        assert!(line.contains("unapproved at the revision ceiling"));
        assert!(!line.contains("unaudited"));
    }
}

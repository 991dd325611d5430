//! Output Formatting and Display Functions
//!
//! Rendered formats come from the library's report generator; the `pretty`
//! format is a colored table view built here.

use std::path::Path;

use owo_colors::OwoColorize;
use tabled::{settings::Style as TableStyle, Table, Tabled};

use crate::cli::args::OutputFormat;
use modlens_rs::detectors::refactoring::Severity;
use modlens_rs::{AnalysisReport, ReportFormat, ReportGenerator};

/// Write or print the report in the requested format
pub fn emit_report(
    report: &AnalysisReport,
    format: OutputFormat,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let generator = ReportGenerator::new();

    match (format.report_format(), out) {
        (Some(report_format), Some(path)) => {
            generator.write_report(report, report_format, path)?;
            eprintln!("{} {}", "Report written to".bold(), path.display().cyan());
        }
        (Some(report_format), None) => {
            print!("{}", generator.render(report, report_format)?);
        }
        (None, Some(path)) => {
            display_report(report);
            generator.write_report(report, ReportFormat::Text, path)?;
            eprintln!("{} {}", "Summary written to".bold(), path.display().cyan());
        }
        (None, None) => display_report(report),
    }

    Ok(())
}

/// Display the report as colored tables
pub fn display_report(report: &AnalysisReport) {
    println!(
        "{} {}",
        "Modularity analysis:".bright_blue().bold(),
        report.file_path.cyan()
    );
    println!();

    #[derive(Tabled)]
    struct StatsRow {
        metric: String,
        value: String,
    }

    let stats_rows = vec![
        StatsRow {
            metric: "Source Lines".to_string(),
            value: report.sloc.to_string(),
        },
        StatsRow {
            metric: "Functions".to_string(),
            value: report.total_functions.to_string(),
        },
        StatsRow {
            metric: "Classes".to_string(),
            value: report.total_classes.to_string(),
        },
        StatsRow {
            metric: "Average Complexity".to_string(),
            value: format!("{:.2}", report.average_complexity),
        },
        StatsRow {
            metric: "Max Complexity".to_string(),
            value: report.max_complexity.to_string(),
        },
        StatsRow {
            metric: "Maintainability Index".to_string(),
            value: format!("{:.2}", report.maintainability),
        },
        StatsRow {
            metric: "Cohesion".to_string(),
            value: format!("{:.2}", report.cohesion),
        },
    ];

    let mut table = Table::new(stats_rows);
    table.with(TableStyle::rounded());
    println!("{}", table);
    println!();

    if report.results.is_empty() {
        println!("{}", "No modularity issues found.".bright_green().bold());
        return;
    }

    #[derive(Tabled)]
    struct IssueRow {
        severity: String,
        issue: String,
        action: String,
        steps: usize,
    }

    let issue_rows: Vec<IssueRow> = report
        .results
        .iter()
        .map(|suggestion| IssueRow {
            severity: severity_label(suggestion.issue.severity),
            issue: suggestion.issue.description.clone(),
            action: suggestion.action.title(),
            steps: suggestion.steps.len(),
        })
        .collect();

    println!(
        "{} {}",
        "Issues found:".bright_red().bold(),
        report.total_issues
    );
    let mut table = Table::new(issue_rows);
    table.with(TableStyle::rounded());
    println!("{}", table);
    println!();

    #[derive(Tabled)]
    struct FunctionRow {
        function: String,
        line: usize,
        complexity: u32,
        lines: usize,
    }

    let function_rows: Vec<FunctionRow> = report
        .most_complex_functions(5)
        .into_iter()
        .filter(|f| f.complexity > 0)
        .map(|f| FunctionRow {
            function: f.name.clone(),
            line: f.line,
            complexity: f.complexity,
            lines: f.lines,
        })
        .collect();

    if !function_rows.is_empty() {
        println!("{}", "Most complex functions:".bright_blue().bold());
        let mut table = Table::new(function_rows);
        table.with(TableStyle::rounded());
        println!("{}", table);
    }
}

fn severity_label(severity: Severity) -> String {
    let label = severity.as_str().to_uppercase();
    match severity {
        Severity::Critical => label.bright_red().bold().to_string(),
        Severity::High => label.red().to_string(),
        Severity::Medium => label.yellow().to_string(),
        Severity::Low => label.dimmed().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_labels_are_uppercase() {
        for severity in [Severity::Critical, Severity::High, Severity::Medium, Severity::Low] {
            let label = severity_label(severity);
            assert!(label.contains(&severity.as_str().to_uppercase()));
        }
    }

    #[test]
    fn only_pretty_uses_table_display() {
        assert_eq!(OutputFormat::Pretty.report_format(), None);
        assert_eq!(OutputFormat::Json.report_format(), Some(ReportFormat::Json));
        assert_eq!(OutputFormat::Text.report_format(), Some(ReportFormat::Text));
    }
}

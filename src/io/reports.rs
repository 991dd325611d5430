//! Report rendering: JSON, YAML and the plain-text summary.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::results::AnalysisReport;
use crate::detectors::refactoring::planner::snake_to_title;
use crate::detectors::refactoring::{IssueDetails, Severity};
use crate::io::previews::generate_previews;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Format error: {0}")]
    Format(#[from] std::fmt::Error),
}

/// Output format for a rendered report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Yaml,
    Text,
}

const RULER_WIDTH: usize = 80;
const DETAIL_LIMIT: usize = 3;
const CALLER_LIMIT: usize = 3;

/// Renders [`AnalysisReport`]s.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    top_issues: usize,
    top_functions: usize,
    previews: usize,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            top_issues: 5,
            top_functions: 5,
            previews: 3,
        }
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of suggestions whose previews are appended to the text summary.
    pub fn with_previews(mut self, count: usize) -> Self {
        self.previews = count;
        self
    }

    pub fn render(&self, report: &AnalysisReport, format: ReportFormat) -> Result<String, ReportError> {
        match format {
            ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            ReportFormat::Yaml => Ok(serde_yaml::to_string(report)?),
            ReportFormat::Text => self.render_summary(report),
        }
    }

    pub fn write_report<P: AsRef<Path>>(
        &self,
        report: &AnalysisReport,
        format: ReportFormat,
        path: P,
    ) -> Result<(), ReportError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.render(report, format)?)?;
        Ok(())
    }

    /// Human-readable summary of the report.
    pub fn render_summary(&self, report: &AnalysisReport) -> Result<String, ReportError> {
        let mut out = String::new();

        heading(&mut out, "FILE MODULARITY ANALYSIS SUMMARY")?;
        writeln!(out, "\nFile: {}", report.file_name)?;
        writeln!(out, "Path: {}", report.file_path)?;
        self.write_metrics(&mut out, report)?;

        writeln!(out, "\nTotal issues found: {}", report.total_issues)?;
        self.write_issue_counts(&mut out, report)?;

        heading(&mut out, "TOP ISSUES")?;
        self.write_top_issues(&mut out, report)?;

        heading(&mut out, "MOST COMPLEX FUNCTIONS")?;
        for (i, function) in report
            .most_complex_functions(self.top_functions)
            .into_iter()
            .enumerate()
        {
            if function.complexity > 0 {
                writeln!(
                    out,
                    "{}. {} - Complexity: {} (line {})",
                    i + 1,
                    function.name,
                    function.complexity,
                    function.line
                )?;
            }
        }

        heading(&mut out, "FUNCTION CALL GRAPH (Top 5 Most Called)")?;
        for (name, callers) in report.most_called_functions(self.top_functions) {
            if callers.is_empty() {
                continue;
            }
            writeln!(out, "\n{name}:")?;
            writeln!(
                out,
                "  Called by {} function(s): {}",
                callers.len(),
                callers
                    .iter()
                    .take(CALLER_LIMIT)
                    .map(String::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
            if callers.len() > CALLER_LIMIT {
                writeln!(out, "  ... and {} more", callers.len() - CALLER_LIMIT)?;
            }
        }

        self.write_previews(&mut out, report)?;
        Ok(out)
    }

    fn write_metrics(&self, out: &mut String, report: &AnalysisReport) -> std::fmt::Result {
        let metrics = &report.metrics;
        writeln!(out, "\nFile Metrics:")?;
        writeln!(out, "  Lines of Code: {}", metrics.loc)?;
        writeln!(out, "  Source Lines: {}", metrics.sloc)?;
        writeln!(out, "  Functions: {}", metrics.function_count)?;
        writeln!(out, "  Classes: {}", metrics.class_count)?;
        writeln!(out, "  Average Complexity: {:.2}", metrics.average_complexity)?;
        writeln!(out, "  Max Complexity: {}", metrics.max_complexity)?;
        writeln!(out, "  Maintainability Index: {:.2}", metrics.maintainability_index)?;
        writeln!(out, "  Cohesion Score: {:.2}", metrics.cohesion)
    }

    fn write_issue_counts(&self, out: &mut String, report: &AnalysisReport) -> std::fmt::Result {
        writeln!(out, "\nIssues by severity:")?;
        for severity in [Severity::Critical, Severity::High, Severity::Medium, Severity::Low] {
            let count = report.issues().filter(|i| i.severity == severity).count();
            if count > 0 {
                writeln!(out, "  {}: {count}", severity.as_str().to_uppercase())?;
            }
        }

        let mut by_type: IndexMap<&str, usize> = IndexMap::new();
        for issue in report.issues() {
            *by_type.entry(issue.type_name()).or_default() += 1;
        }
        let mut by_type: Vec<_> = by_type.into_iter().collect();
        by_type.sort_by(|a, b| b.1.cmp(&a.1));

        writeln!(out, "\nIssues by type:")?;
        for (type_name, count) in by_type {
            writeln!(out, "  {}: {count}", snake_to_title(type_name))?;
        }
        Ok(())
    }

    fn write_top_issues(&self, out: &mut String, report: &AnalysisReport) -> std::fmt::Result {
        for (i, suggestion) in report.results.iter().take(self.top_issues).enumerate() {
            let issue = &suggestion.issue;
            writeln!(
                out,
                "\n{}. [{}] {}",
                i + 1,
                issue.severity.as_str().to_uppercase(),
                snake_to_title(issue.type_name())
            )?;
            writeln!(out, "   {}", issue.description)?;
            writeln!(out, "   Action: {}", suggestion.action.title())?;
            writeln!(out, "   Steps: {}", suggestion.steps.len())?;

            match &issue.details {
                IssueDetails::ComplexFunctions { functions } => {
                    writeln!(out, "   Complex functions:")?;
                    for f in functions.iter().take(DETAIL_LIMIT) {
                        writeln!(
                            out,
                            "     - {} (line {}, complexity: {})",
                            f.name, f.line, f.complexity
                        )?;
                    }
                }
                IssueDetails::InternalDuplication { duplicates, .. } => {
                    writeln!(out, "   Duplicate pairs:")?;
                    for pair in duplicates.iter().take(DETAIL_LIMIT) {
                        writeln!(
                            out,
                            "     - {} <-> {} ({:.1}% similar)",
                            pair.first,
                            pair.second,
                            pair.similarity * 100.0
                        )?;
                    }
                }
                IssueDetails::GodFunctions { functions } => {
                    writeln!(out, "   Long functions:")?;
                    for f in functions.iter().take(DETAIL_LIMIT) {
                        writeln!(out, "     - {} (line {}, {} lines)", f.name, f.line, f.lines)?;
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    fn write_previews(&self, out: &mut String, report: &AnalysisReport) -> std::fmt::Result {
        if self.previews == 0 || report.results.is_empty() {
            return Ok(());
        }

        heading(out, "REFACTORING PREVIEWS")?;
        for (i, suggestion) in report.results.iter().take(self.previews).enumerate() {
            let previews = generate_previews(suggestion);
            if previews.is_empty() {
                continue;
            }
            writeln!(out, "\n--- Preview {}: {} ---", i + 1, suggestion.action.title())?;
            for preview in previews {
                out.push_str(&preview.diff);
            }
        }
        Ok(())
    }
}

fn heading(out: &mut String, title: &str) -> std::fmt::Result {
    let ruler = "=".repeat(RULER_WIDTH);
    writeln!(out, "\n{ruler}\n{title}\n{ruler}")
}

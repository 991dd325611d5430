//! Analysis report returned to callers.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::pipeline::PipelineResult;
use crate::detectors::clone_detection::DuplicatePair;
use crate::detectors::complexity::FileMetrics;
use crate::detectors::graph::RelationshipGraph;
use crate::detectors::refactoring::{Issue, Suggestion};
use crate::lang::common::{ClassRecord, ImportRecord};

/// Per-function summary row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSummary {
    pub name: String,
    pub line: usize,
    pub complexity: u32,
    /// Number of lines in the function source
    pub lines: usize,
    pub is_private: bool,
}

/// Canonical analysis response: file summary plus one suggestion per issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub file_path: String,
    pub file_name: String,
    pub total_functions: usize,
    pub total_classes: usize,
    pub average_complexity: f64,
    pub max_complexity: u32,
    pub maintainability: f64,
    pub sloc: usize,
    pub cohesion: f64,
    pub total_issues: usize,
    pub metrics: FileMetrics,
    pub functions: Vec<FunctionSummary>,
    pub classes: Vec<ClassRecord>,
    pub imports: Vec<ImportRecord>,
    /// Call relationships keyed by function name
    pub relationships: RelationshipGraph,
    /// Retained similar function pairs
    pub duplicates: Vec<DuplicatePair>,
    /// Candidate module groupings of function names
    pub clusters: Vec<Vec<String>>,
    /// Refactor suggestions, most severe first
    pub results: Vec<Suggestion>,
}

impl AnalysisReport {
    /// Build the report for a finished pipeline run.
    pub fn from_pipeline(result: PipelineResult) -> Self {
        let PipelineResult {
            file,
            file_metrics,
            graph,
            duplicates,
            clusters,
            suggestions,
            ..
        } = result;

        let file_name = Path::new(&file.path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.path.clone());

        let functions = file
            .functions
            .iter()
            .map(|f| FunctionSummary {
                name: f.name.clone(),
                line: f.start_line,
                complexity: f.complexity,
                lines: f.line_count(),
                is_private: f.is_private,
            })
            .collect();

        Self {
            file_name,
            file_path: file.path.clone(),
            total_functions: file.function_count(),
            total_classes: file.class_count(),
            classes: file.classes,
            imports: file.imports,
            average_complexity: file_metrics.average_complexity,
            max_complexity: file_metrics.max_complexity,
            maintainability: file_metrics.maintainability_index,
            sloc: file_metrics.sloc,
            cohesion: file_metrics.cohesion,
            total_issues: suggestions.len(),
            metrics: file_metrics,
            functions,
            relationships: graph,
            duplicates: duplicates.to_vec(),
            clusters,
            results: suggestions,
        }
    }

    /// Issues in report order.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.results.iter().map(|suggestion| &suggestion.issue)
    }

    /// Whether any suggestion addresses the given issue type.
    pub fn has_issue(&self, type_name: &str) -> bool {
        self.issues().any(|issue| issue.type_name() == type_name)
    }

    /// Issue with the given type, if detected.
    pub fn issue(&self, type_name: &str) -> Option<&Issue> {
        self.issues().find(|issue| issue.type_name() == type_name)
    }

    /// Functions sorted by complexity, highest first.
    pub fn most_complex_functions(&self, limit: usize) -> Vec<&FunctionSummary> {
        let mut functions: Vec<&FunctionSummary> = self.functions.iter().collect();
        functions.sort_by(|a, b| b.complexity.cmp(&a.complexity));
        functions.truncate(limit);
        functions
    }

    /// `(name, callers)` sorted by caller count, highest first.
    pub fn most_called_functions(&self, limit: usize) -> Vec<(&str, &[String])> {
        let mut called: Vec<(&str, &[String])> = self
            .relationships
            .iter()
            .map(|(name, entry)| (name.as_str(), entry.called_by.as_slice()))
            .collect();
        called.sort_by(|a, b| b.1.len().cmp(&a.1.len()));
        called.truncate(limit);
        called
    }
}

//! Threshold rules that turn file facts into modularity issues.

use tracing::debug;

use super::{ComplexFunction, Issue, IssueDetails, IssueThresholds, LongFunction, Severity};
use crate::detectors::clone_detection::DuplicateSet;
use crate::detectors::complexity::FileMetrics;
use crate::detectors::graph::RelationshipGraph;
use crate::lang::common::FunctionRecord;

/// Everything the rules look at for one file.
#[derive(Debug, Clone, Copy)]
pub struct IssueContext<'a> {
    pub functions: &'a [FunctionRecord],
    pub class_count: usize,
    pub metrics: &'a FileMetrics,
    pub graph: &'a RelationshipGraph,
    pub duplicates: &'a DuplicateSet,
}

/// Applies every issue rule.
#[derive(Debug, Clone, Default)]
pub struct IssueDetector {
    thresholds: IssueThresholds,
}

impl IssueDetector {
    pub fn new(thresholds: IssueThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &IssueThresholds {
        &self.thresholds
    }

    /// Run every rule and return the issues sorted by severity.
    ///
    /// The sort is stable, so issues of equal severity keep rule order.
    pub fn detect(&self, context: &IssueContext<'_>) -> Vec<Issue> {
        let t = &self.thresholds;
        let rules = [
            detect_large_file(context, t),
            detect_too_many_functions(context, t),
            detect_complex_functions(context, t),
            detect_internal_duplication(context, t),
            detect_orphan_functions(context, t),
            detect_god_functions(context, t),
            detect_low_maintainability(context, t),
            detect_mixed_responsibilities(context, t),
            detect_procedural_style(context, t),
        ];

        let mut issues: Vec<Issue> = rules.into_iter().flatten().collect();
        issues.sort_by_key(|issue| issue.severity);

        debug!(
            issues = issues.len(),
            types = ?issues.iter().map(Issue::type_name).collect::<Vec<_>>(),
            "Detected modularity issues"
        );

        issues
    }
}

fn detect_large_file(context: &IssueContext<'_>, t: &IssueThresholds) -> Option<Issue> {
    let sloc = context.metrics.sloc;
    (sloc > t.max_sloc).then(|| {
        Issue::new(
            IssueDetails::LargeFile {
                sloc,
                metrics: context.metrics.clone(),
            },
            Severity::High,
            format!("File is too large ({sloc} SLOC). Consider splitting."),
        )
    })
}

fn detect_too_many_functions(context: &IssueContext<'_>, t: &IssueThresholds) -> Option<Issue> {
    let count = context.functions.len();
    (count > t.max_functions).then(|| {
        Issue::new(
            IssueDetails::TooManyFunctions { count },
            Severity::Medium,
            format!("File has {count} functions. Consider organizing into classes or modules."),
        )
    })
}

fn detect_complex_functions(context: &IssueContext<'_>, t: &IssueThresholds) -> Option<Issue> {
    let functions: Vec<ComplexFunction> = context
        .functions
        .iter()
        .filter(|f| f.complexity > t.max_complexity)
        .map(|f| ComplexFunction {
            name: f.name.clone(),
            complexity: f.complexity,
            line: f.start_line,
        })
        .collect();

    if functions.is_empty() {
        return None;
    }
    let description = format!(
        "{} functions have high complexity (>{})",
        functions.len(),
        t.max_complexity
    );
    Some(Issue::new(
        IssueDetails::ComplexFunctions { functions },
        Severity::High,
        description,
    ))
}

fn detect_internal_duplication(context: &IssueContext<'_>, t: &IssueThresholds) -> Option<Issue> {
    let duplicates = context.duplicates;
    if duplicates.is_empty() {
        return None;
    }

    let high_similarity_count = duplicates.high_similarity_count();
    let severity = if high_similarity_count > t.high_similarity_pairs {
        Severity::High
    } else {
        Severity::Medium
    };
    let count = duplicates.len();

    Some(Issue::new(
        IssueDetails::InternalDuplication {
            duplicates: duplicates.to_vec(),
            count,
            high_similarity_count,
        },
        severity,
        format!("{count} pairs of similar functions found"),
    ))
}

fn detect_orphan_functions(context: &IssueContext<'_>, t: &IssueThresholds) -> Option<Issue> {
    let functions: Vec<String> = context
        .functions
        .iter()
        .filter(|f| {
            !f.is_private
                && context.graph.callers_of(&f.name).is_empty()
                && !t.is_orphan_exempt(&f.name)
        })
        .map(|f| f.name.clone())
        .collect();

    let count = functions.len();
    (count > t.min_orphans).then(|| {
        Issue::new(
            IssueDetails::OrphanFunctions { functions, count },
            Severity::Low,
            format!("{count} functions are never called internally"),
        )
    })
}

fn detect_god_functions(context: &IssueContext<'_>, t: &IssueThresholds) -> Option<Issue> {
    let functions: Vec<LongFunction> = context
        .functions
        .iter()
        .filter(|f| f.line_count() > t.max_function_lines)
        .map(|f| LongFunction {
            name: f.name.clone(),
            lines: f.line_count(),
            line: f.start_line,
        })
        .collect();

    if functions.is_empty() {
        return None;
    }
    let description = format!(
        "{} functions are too long (>{} lines)",
        functions.len(),
        t.max_function_lines
    );
    Some(Issue::new(
        IssueDetails::GodFunctions { functions },
        Severity::Medium,
        description,
    ))
}

fn detect_low_maintainability(context: &IssueContext<'_>, t: &IssueThresholds) -> Option<Issue> {
    let score = context.metrics.maintainability_index;
    (score < t.min_maintainability).then(|| {
        Issue::new(
            IssueDetails::LowMaintainability { score },
            Severity::High,
            format!("Low maintainability index: {score:.2}"),
        )
    })
}

fn detect_mixed_responsibilities(
    context: &IssueContext<'_>,
    t: &IssueThresholds,
) -> Option<Issue> {
    let cohesion = context.metrics.cohesion;
    let crowded = context.functions.len() > t.mixed_responsibility_min_functions;
    (cohesion < t.min_cohesion && crowded).then(|| {
        Issue::new(
            IssueDetails::MixedResponsibilities { cohesion },
            Severity::Medium,
            format!("Low cohesion ({cohesion:.2}): File likely has mixed responsibilities"),
        )
    })
}

fn detect_procedural_style(context: &IssueContext<'_>, t: &IssueThresholds) -> Option<Issue> {
    let function_count = context.functions.len();
    (context.class_count == 0 && function_count > t.procedural_min_functions).then(|| {
        Issue::new(
            IssueDetails::ProceduralStyle { function_count },
            Severity::Low,
            "Consider using classes to organize related functions",
        )
    })
}

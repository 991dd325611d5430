//! Modularity issue detection and refactor planning.
//!
//! [`IssueDetector`] applies the threshold rules in [`IssueThresholds`] to the
//! structural records, metrics, relationship graph and duplicate pairs of one
//! file. [`planner::RefactorPlanner`] turns each issue into a suggestion.

pub mod clustering;
mod detection_rules;
pub mod planner;

pub use clustering::cluster_functions;
pub use detection_rules::{IssueContext, IssueDetector};
pub use planner::{
    EstimatedImpact, PlannerConfig, RefactorPlanner, RefactorStep, Suggestion, SuggestionAction,
};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::config::validation::{
    validate_percentage, validate_positive_usize, validate_unit_range,
};
use crate::core::errors::Result;
use crate::detectors::clone_detection::DuplicatePair;
use crate::detectors::complexity::FileMetrics;

/// Issue severity. Declaration order is the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    /// Sort rank, lower comes first.
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 0,
            Severity::High => 1,
            Severity::Medium => 2,
            Severity::Low => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complex function entry of a `complex_functions` issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexFunction {
    pub name: String,
    pub complexity: u32,
    pub line: usize,
}

/// Long function entry of a `god_functions` issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongFunction {
    pub name: String,
    /// Number of lines in the function source
    pub lines: usize,
    pub line: usize,
}

/// Rule-specific issue payload, tagged by issue type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IssueDetails {
    LargeFile {
        sloc: usize,
        metrics: FileMetrics,
    },
    TooManyFunctions {
        count: usize,
    },
    ComplexFunctions {
        functions: Vec<ComplexFunction>,
    },
    InternalDuplication {
        duplicates: Vec<DuplicatePair>,
        count: usize,
        high_similarity_count: usize,
    },
    OrphanFunctions {
        functions: Vec<String>,
        count: usize,
    },
    GodFunctions {
        functions: Vec<LongFunction>,
    },
    LowMaintainability {
        score: f64,
    },
    MixedResponsibilities {
        cohesion: f64,
    },
    ProceduralStyle {
        function_count: usize,
    },
}

impl IssueDetails {
    /// Issue type name as serialized.
    pub fn type_name(&self) -> &'static str {
        match self {
            IssueDetails::LargeFile { .. } => "large_file",
            IssueDetails::TooManyFunctions { .. } => "too_many_functions",
            IssueDetails::ComplexFunctions { .. } => "complex_functions",
            IssueDetails::InternalDuplication { .. } => "internal_duplication",
            IssueDetails::OrphanFunctions { .. } => "orphan_functions",
            IssueDetails::GodFunctions { .. } => "god_functions",
            IssueDetails::LowMaintainability { .. } => "low_maintainability",
            IssueDetails::MixedResponsibilities { .. } => "mixed_responsibilities",
            IssueDetails::ProceduralStyle { .. } => "procedural_style",
        }
    }
}

/// A detected modularity problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(flatten)]
    pub details: IssueDetails,
    pub severity: Severity,
    pub description: String,
}

impl Issue {
    pub fn new(details: IssueDetails, severity: Severity, description: impl Into<String>) -> Self {
        Self {
            details,
            severity,
            description: description.into(),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.details.type_name()
    }
}

/// Thresholds for every issue rule. Comparisons are strict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueThresholds {
    /// `large_file` above this SLOC
    pub max_sloc: usize,
    /// `too_many_functions` above this function count
    pub max_functions: usize,
    /// `complex_functions` above this cyclomatic complexity
    pub max_complexity: u32,
    /// `internal_duplication` is high severity above this many high pairs
    pub high_similarity_pairs: usize,
    /// `orphan_functions` above this many uncalled public functions
    pub min_orphans: usize,
    /// `god_functions` above this many source lines
    pub max_function_lines: usize,
    /// `low_maintainability` below this index
    pub min_maintainability: f64,
    /// `mixed_responsibilities` below this cohesion
    pub min_cohesion: f64,
    /// `mixed_responsibilities` also needs more functions than this
    pub mixed_responsibility_min_functions: usize,
    /// `procedural_style` above this function count in a class-free file
    pub procedural_min_functions: usize,
    /// Names never reported as orphans
    pub orphan_exempt_names: Vec<String>,
    /// Names containing this are never reported as orphans
    pub orphan_exempt_substring: String,
}

impl Default for IssueThresholds {
    fn default() -> Self {
        Self {
            max_sloc: 500,
            max_functions: 20,
            max_complexity: 10,
            high_similarity_pairs: 3,
            min_orphans: 5,
            max_function_lines: 50,
            min_maintainability: 65.0,
            min_cohesion: 0.30,
            mixed_responsibility_min_functions: 10,
            procedural_min_functions: 15,
            orphan_exempt_names: vec!["main".to_string(), "__init__".to_string()],
            orphan_exempt_substring: "test_".to_string(),
        }
    }
}

impl IssueThresholds {
    pub fn validate(&self) -> Result<()> {
        validate_positive_usize(self.max_sloc, "max_sloc")?;
        validate_positive_usize(self.max_function_lines, "max_function_lines")?;
        validate_percentage(self.min_maintainability, "min_maintainability")?;
        validate_unit_range(self.min_cohesion, "min_cohesion")?;
        Ok(())
    }

    /// Whether `name` can never be an orphan.
    pub fn is_orphan_exempt(&self, name: &str) -> bool {
        self.orphan_exempt_names.iter().any(|exempt| exempt == name)
            || (!self.orphan_exempt_substring.is_empty()
                && name.contains(&self.orphan_exempt_substring))
    }
}

//! Refactor suggestions, one builder per issue type.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Issue, IssueDetails};
use crate::core::config::validation::{validate_percentage, validate_positive_usize};
use crate::core::errors::Result;

/// Estimates used when sizing suggestions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Estimated lines per function moved into a new module
    pub lines_per_function_estimate: usize,
    /// Functions grouped into one class
    pub functions_per_class: usize,
    /// Functions a long function is split into
    pub functions_per_long_function_split: usize,
    /// Orphans listed in the verification step
    pub orphan_review_limit: usize,
    /// Maintainability index to aim for
    pub target_maintainability: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            lines_per_function_estimate: 20,
            functions_per_class: 5,
            functions_per_long_function_split: 3,
            orphan_review_limit: 5,
            target_maintainability: 75.0,
        }
    }
}

impl PlannerConfig {
    pub fn validate(&self) -> Result<()> {
        validate_positive_usize(self.functions_per_class, "functions_per_class")?;
        validate_positive_usize(
            self.functions_per_long_function_split,
            "functions_per_long_function_split",
        )?;
        validate_percentage(self.target_maintainability, "target_maintainability")?;
        Ok(())
    }
}

/// What a suggestion proposes to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionAction {
    ExtractCommonFunction,
    SplitFile,
    SimplifyFunctions,
    SplitLongFunctions,
    SeparateConcerns,
    OrganizeFunctions,
    IntroduceClasses,
    ImproveMaintainability,
    ReviewUnusedCode,
}

impl SuggestionAction {
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestionAction::ExtractCommonFunction => "extract_common_function",
            SuggestionAction::SplitFile => "split_file",
            SuggestionAction::SimplifyFunctions => "simplify_functions",
            SuggestionAction::SplitLongFunctions => "split_long_functions",
            SuggestionAction::SeparateConcerns => "separate_concerns",
            SuggestionAction::OrganizeFunctions => "organize_functions",
            SuggestionAction::IntroduceClasses => "introduce_classes",
            SuggestionAction::ImproveMaintainability => "improve_maintainability",
            SuggestionAction::ReviewUnusedCode => "review_unused_code",
        }
    }

    /// Title-cased label, e.g. "Split Long Functions".
    pub fn title(self) -> String {
        snake_to_title(self.as_str())
    }
}

/// `split_long_functions` to `Split Long Functions`.
pub fn snake_to_title(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One concrete step of a suggestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RefactorStep {
    IdentifyCommonCode {
        description: String,
        duplicate_pairs: Vec<(String, String)>,
    },
    RefactorDuplicates {
        description: String,
        count: usize,
    },
    CreateModule {
        name: String,
        functions: Vec<String>,
        description: String,
    },
    BreakDownFunction {
        function: String,
        line: usize,
        complexity: u32,
        description: String,
    },
    ExtractMethods {
        function: String,
        line: usize,
        lines: usize,
        description: String,
    },
    CreateFocusedModule {
        description: String,
        clusters: usize,
    },
    GroupIntoClasses {
        description: String,
        function_count: usize,
    },
    ConvertToOop {
        description: String,
        function_count: usize,
    },
    ReduceComplexity {
        description: String,
    },
    AddDocumentation {
        description: String,
    },
    ImproveNaming {
        description: String,
    },
    VerifyUsage {
        description: String,
        functions: Vec<String>,
    },
    ConsiderRemoval {
        description: String,
    },
}

impl RefactorStep {
    pub fn description(&self) -> &str {
        match self {
            RefactorStep::IdentifyCommonCode { description, .. }
            | RefactorStep::RefactorDuplicates { description, .. }
            | RefactorStep::CreateModule { description, .. }
            | RefactorStep::BreakDownFunction { description, .. }
            | RefactorStep::ExtractMethods { description, .. }
            | RefactorStep::CreateFocusedModule { description, .. }
            | RefactorStep::GroupIntoClasses { description, .. }
            | RefactorStep::ConvertToOop { description, .. }
            | RefactorStep::ReduceComplexity { description }
            | RefactorStep::AddDocumentation { description }
            | RefactorStep::ImproveNaming { description }
            | RefactorStep::VerifyUsage { description, .. }
            | RefactorStep::ConsiderRemoval { description } => description,
        }
    }
}

/// Expected effect of a suggestion. The shape depends on the action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EstimatedImpact {
    Deduplication {
        lines_saved: usize,
        duplicate_count: usize,
    },
    FileSplit {
        new_files: usize,
        current_size: usize,
        estimated_new_sizes: Vec<usize>,
    },
    ComplexityReduction {
        functions_affected: usize,
        average_complexity_reduction: String,
    },
    FunctionSplit {
        functions_affected: usize,
        estimated_new_functions: usize,
    },
    Cohesion {
        cohesion_improvement: String,
        suggested_modules: usize,
    },
    Organization {
        current_functions: usize,
        estimated_classes: usize,
    },
    Style {
        style_improvement: String,
    },
    Maintainability {
        current_score: f64,
        target_score: f64,
    },
    Review {
        functions_to_review: usize,
    },
}

/// A refactor suggestion for one issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub action: SuggestionAction,
    pub issue: Issue,
    pub steps: Vec<RefactorStep>,
    pub estimated_impact: EstimatedImpact,
}

/// Builds suggestions from issues.
#[derive(Debug, Clone, Default)]
pub struct RefactorPlanner {
    config: PlannerConfig,
}

impl RefactorPlanner {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// One suggestion per issue, in issue order.
    ///
    /// `clusters` is the function clustering of the file, used by the file
    /// split and separation suggestions.
    pub fn plan(&self, issues: &[Issue], clusters: &[Vec<String>]) -> Vec<Suggestion> {
        let suggestions: Vec<Suggestion> = issues
            .iter()
            .map(|issue| self.suggest(issue, clusters))
            .collect();
        debug!(suggestions = suggestions.len(), "Planned refactorings");
        suggestions
    }

    /// Suggestion for a single issue.
    pub fn suggest(&self, issue: &Issue, clusters: &[Vec<String>]) -> Suggestion {
        let config = &self.config;
        let (action, steps, estimated_impact) = match &issue.details {
            IssueDetails::InternalDuplication { duplicates, .. } => {
                let pairs = duplicates
                    .iter()
                    .map(|d| (d.first.clone(), d.second.clone()))
                    .collect();
                let lines: usize = duplicates
                    .iter()
                    .map(|d| d.first_source.split('\n').count())
                    .sum();
                (
                    SuggestionAction::ExtractCommonFunction,
                    vec![
                        RefactorStep::IdentifyCommonCode {
                            description: "Extract common logic into a helper function".into(),
                            duplicate_pairs: pairs,
                        },
                        RefactorStep::RefactorDuplicates {
                            description: "Replace duplicate code with calls to helper function"
                                .into(),
                            count: duplicates.len(),
                        },
                    ],
                    EstimatedImpact::Deduplication {
                        lines_saved: lines / 2,
                        duplicate_count: duplicates.len(),
                    },
                )
            }
            IssueDetails::LargeFile { sloc, .. } => (
                SuggestionAction::SplitFile,
                clusters
                    .iter()
                    .enumerate()
                    .map(|(i, cluster)| RefactorStep::CreateModule {
                        name: format!("module_{}.py", i + 1),
                        functions: cluster.clone(),
                        description: format!("Extract {} related functions", cluster.len()),
                    })
                    .collect(),
                EstimatedImpact::FileSplit {
                    new_files: clusters.len(),
                    current_size: *sloc,
                    estimated_new_sizes: clusters
                        .iter()
                        .map(|cluster| cluster.len() * config.lines_per_function_estimate)
                        .collect(),
                },
            ),
            IssueDetails::ComplexFunctions { functions } => (
                SuggestionAction::SimplifyFunctions,
                functions
                    .iter()
                    .map(|f| RefactorStep::BreakDownFunction {
                        function: f.name.clone(),
                        line: f.line,
                        complexity: f.complexity,
                        description: format!(
                            "Break down {} (complexity: {})",
                            f.name, f.complexity
                        ),
                    })
                    .collect(),
                EstimatedImpact::ComplexityReduction {
                    functions_affected: functions.len(),
                    average_complexity_reduction: "50-70%".into(),
                },
            ),
            IssueDetails::GodFunctions { functions } => (
                SuggestionAction::SplitLongFunctions,
                functions
                    .iter()
                    .map(|f| RefactorStep::ExtractMethods {
                        function: f.name.clone(),
                        line: f.line,
                        lines: f.lines,
                        description: format!(
                            "Split {} ({} lines) into smaller functions",
                            f.name, f.lines
                        ),
                    })
                    .collect(),
                EstimatedImpact::FunctionSplit {
                    functions_affected: functions.len(),
                    estimated_new_functions: functions.len()
                        * config.functions_per_long_function_split,
                },
            ),
            IssueDetails::MixedResponsibilities { .. } => (
                SuggestionAction::SeparateConcerns,
                vec![RefactorStep::CreateFocusedModule {
                    description: "Group related functions into separate modules or classes"
                        .into(),
                    clusters: clusters.len(),
                }],
                EstimatedImpact::Cohesion {
                    cohesion_improvement: "2-3x".into(),
                    suggested_modules: clusters.len(),
                },
            ),
            IssueDetails::TooManyFunctions { count } => (
                SuggestionAction::OrganizeFunctions,
                vec![RefactorStep::GroupIntoClasses {
                    description: "Organize related functions into classes".into(),
                    function_count: *count,
                }],
                EstimatedImpact::Organization {
                    current_functions: *count,
                    estimated_classes: *count / config.functions_per_class.max(1),
                },
            ),
            IssueDetails::ProceduralStyle { function_count } => (
                SuggestionAction::IntroduceClasses,
                vec![RefactorStep::ConvertToOop {
                    description: "Convert related functions into class methods".into(),
                    function_count: *function_count,
                }],
                EstimatedImpact::Style {
                    style_improvement: "Better encapsulation and organization".into(),
                },
            ),
            IssueDetails::LowMaintainability { score } => (
                SuggestionAction::ImproveMaintainability,
                vec![
                    RefactorStep::ReduceComplexity {
                        description: "Simplify complex functions and improve code structure"
                            .into(),
                    },
                    RefactorStep::AddDocumentation {
                        description: "Add docstrings and comments".into(),
                    },
                    RefactorStep::ImproveNaming {
                        description: "Use more descriptive variable and function names".into(),
                    },
                ],
                EstimatedImpact::Maintainability {
                    current_score: *score,
                    target_score: config.target_maintainability,
                },
            ),
            IssueDetails::OrphanFunctions { functions, count } => (
                SuggestionAction::ReviewUnusedCode,
                vec![
                    RefactorStep::VerifyUsage {
                        description: "Verify if these functions are part of public API".into(),
                        functions: functions
                            .iter()
                            .take(config.orphan_review_limit)
                            .cloned()
                            .collect(),
                    },
                    RefactorStep::ConsiderRemoval {
                        description: "Consider removing or documenting as utility functions"
                            .into(),
                    },
                ],
                EstimatedImpact::Review {
                    functions_to_review: *count,
                },
            ),
        };

        Suggestion {
            action,
            issue: issue.clone(),
            steps,
            estimated_impact,
        }
    }
}

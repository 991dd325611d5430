//! Plain-text previews of what a suggestion would change.

use serde::{Deserialize, Serialize};

use crate::detectors::refactoring::{RefactorStep, Suggestion};

/// Duplicate pairs shown per duplication preview
const DUPLICATE_PREVIEW_LIMIT: usize = 3;
/// Functions listed per file split preview
const MODULE_PREVIEW_LIMIT: usize = 5;

/// Kind of change a preview illustrates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreviewKind {
    FunctionSplit,
    ExtractMethod,
    Duplication,
    FileSplit,
}

/// Rendered preview for one refactor step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffPreview {
    #[serde(rename = "type")]
    pub kind: PreviewKind,
    pub diff: String,
}

/// Previews for every previewable step of `suggestion`, in step order.
pub fn generate_previews(suggestion: &Suggestion) -> Vec<DiffPreview> {
    suggestion.steps.iter().filter_map(preview_step).collect()
}

fn preview_step(step: &RefactorStep) -> Option<DiffPreview> {
    match step {
        RefactorStep::BreakDownFunction {
            function,
            line,
            complexity,
            description,
        } => Some(DiffPreview {
            kind: PreviewKind::FunctionSplit,
            diff: function_split(function, *line, *complexity, description),
        }),
        RefactorStep::ExtractMethods {
            function,
            line,
            lines,
            description,
        } => Some(DiffPreview {
            kind: PreviewKind::ExtractMethod,
            diff: format!(
                "=== {function} (line {line}) ===\nCurrent: {lines} lines\nSuggestion: {description}\n"
            ),
        }),
        RefactorStep::IdentifyCommonCode {
            duplicate_pairs, ..
        } => Some(DiffPreview {
            kind: PreviewKind::Duplication,
            diff: duplication(duplicate_pairs),
        }),
        RefactorStep::CreateModule {
            name, functions, ..
        } => Some(DiffPreview {
            kind: PreviewKind::FileSplit,
            diff: file_split(name, functions),
        }),
        _ => None,
    }
}

fn function_split(function: &str, line: usize, complexity: u32, description: &str) -> String {
    let mut diff = format!(
        "=== {function} (line {line}) ===\nComplexity: {complexity}\nSuggestion: {description}\n\n"
    );
    diff.push_str("# Example refactoring:\n");
    diff.push_str(&format!("- def {function}(...):\n"));
    diff.push_str("-     # Long complex function\n");
    diff.push_str("+     \n");
    diff.push_str(&format!("+ def {function}_part1(...):\n"));
    diff.push_str("+     # First responsibility\n");
    diff.push_str("+     \n");
    diff.push_str(&format!("+ def {function}_part2(...):\n"));
    diff.push_str("+     # Second responsibility\n");
    diff
}

fn duplication(pairs: &[(String, String)]) -> String {
    let mut diff = String::from("=== Code Duplication ===\n");
    for (first, second) in pairs.iter().take(DUPLICATE_PREVIEW_LIMIT) {
        diff.push_str(&format!("Similar: {first} <-> {second}\n"));
    }
    diff.push_str("\nSuggestion: Extract common logic into helper function\n");
    diff
}

fn file_split(name: &str, functions: &[String]) -> String {
    let mut diff = format!(
        "=== New file: {name} ===\nMove {} functions:\n",
        functions.len()
    );
    for function in functions.iter().take(MODULE_PREVIEW_LIMIT) {
        diff.push_str(&format!("  - {function}\n"));
    }
    if functions.len() > MODULE_PREVIEW_LIMIT {
        diff.push_str(&format!(
            "  ... and {} more\n",
            functions.len() - MODULE_PREVIEW_LIMIT
        ));
    }
    diff
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detectors::refactoring::{
        EstimatedImpact, Issue, IssueDetails, Severity, SuggestionAction,
    };

    fn suggestion(action: SuggestionAction, steps: Vec<RefactorStep>) -> Suggestion {
        Suggestion {
            action,
            issue: Issue::new(
                IssueDetails::ProceduralStyle { function_count: 1 },
                Severity::Low,
                "test",
            ),
            steps,
            estimated_impact: EstimatedImpact::Review {
                functions_to_review: 0,
            },
        }
    }

    #[test]
    fn function_split_preview_uses_function_name() {
        let previews = generate_previews(&suggestion(
            SuggestionAction::SimplifyFunctions,
            vec![RefactorStep::BreakDownFunction {
                function: "parse".into(),
                line: 12,
                complexity: 14,
                description: "Break down parse".into(),
            }],
        ));

        assert_eq!(previews.len(), 1);
        assert_eq!(previews[0].kind, PreviewKind::FunctionSplit);
        let diff = &previews[0].diff;
        assert!(diff.starts_with("=== parse (line 12) ===\nComplexity: 14\n"));
        assert!(diff.contains("- def parse(...):\n"));
        assert!(diff.contains("+ def parse_part1(...):\n"));
        assert!(diff.contains("+ def parse_part2(...):\n"));
    }

    #[test]
    fn extract_method_preview() {
        let previews = generate_previews(&suggestion(
            SuggestionAction::SplitLongFunctions,
            vec![RefactorStep::ExtractMethods {
                function: "run".into(),
                line: 3,
                lines: 64,
                description: "Split run".into(),
            }],
        ));

        assert_eq!(
            previews[0].diff,
            "=== run (line 3) ===\nCurrent: 64 lines\nSuggestion: Split run\n"
        );
    }

    #[test]
    fn duplication_preview_lists_first_three_pairs() {
        let pairs = (0..5)
            .map(|i| (format!("a{i}"), format!("b{i}")))
            .collect::<Vec<_>>();
        let previews = generate_previews(&suggestion(
            SuggestionAction::ExtractCommonFunction,
            vec![
                RefactorStep::IdentifyCommonCode {
                    description: "Find shared code".into(),
                    duplicate_pairs: pairs,
                },
                RefactorStep::RefactorDuplicates {
                    description: "Replace".into(),
                    count: 5,
                },
            ],
        ));

        assert_eq!(previews.len(), 1);
        let diff = &previews[0].diff;
        assert!(diff.contains("Similar: a2 <-> b2\n"));
        assert!(!diff.contains("a3"));
        assert!(diff.ends_with("\nSuggestion: Extract common logic into helper function\n"));
    }

    #[test]
    fn file_split_preview_truncates_function_list() {
        let functions = (0..8).map(|i| format!("f{i}")).collect::<Vec<_>>();
        let previews = generate_previews(&suggestion(
            SuggestionAction::SplitFile,
            vec![RefactorStep::CreateModule {
                name: "module_1.py".into(),
                functions,
                description: "Move".into(),
            }],
        ));

        let diff = &previews[0].diff;
        assert!(diff.starts_with("=== New file: module_1.py ===\nMove 8 functions:\n"));
        assert!(diff.contains("  - f4\n"));
        assert!(!diff.contains("  - f5\n"));
        assert!(diff.ends_with("  ... and 3 more\n"));
    }

    #[test]
    fn non_previewable_steps_are_skipped() {
        let previews = generate_previews(&suggestion(
            SuggestionAction::ImproveMaintainability,
            vec![RefactorStep::AddDocumentation {
                description: "Document".into(),
            }],
        ));
        assert!(previews.is_empty());
    }
}

//! Halstead software science metrics calculation.
//!
//! Operators are the operator tokens of arithmetic, boolean, comparison,
//! unary and augmented-assignment expressions; operands are the expressions
//! those operators act on. Code without operator expressions has zero volume.

use std::collections::HashSet;

use tree_sitter::Node;

use super::types::HalsteadMetrics;

/// Calculate Halstead metrics for the tree rooted at `root_node`.
pub fn calculate_halstead_for_node(root_node: Node<'_>, source: &str) -> HalsteadMetrics {
    let mut counts = HalsteadCounts::default();
    let mut stack = vec![root_node];

    while let Some(node) = stack.pop() {
        counts.process_node(node, source);
        let mut cursor = node.walk();
        stack.extend(node.children(&mut cursor));
    }

    counts.into_metrics()
}

/// Accumulated counts for Halstead calculation.
#[derive(Default)]
struct HalsteadCounts {
    operator_set: HashSet<String>,
    operand_set: HashSet<String>,
    operator_total: f64,
    operand_total: f64,
}

impl HalsteadCounts {
    fn process_node(&mut self, node: Node<'_>, source: &str) {
        let (operator_field, operand_fields): (&str, &[&str]) = match node.kind() {
            "binary_operator" | "boolean_operator" => ("operator", &["left", "right"]),
            "augmented_assignment" => ("operator", &["left", "right"]),
            "unary_operator" => ("operator", &["argument"]),
            "not_operator" => ("", &["argument"]),
            "comparison_operator" => ("operators", &[]),
            _ => return,
        };

        if node.kind() == "not_operator" {
            self.add_operator("not".to_string());
        } else {
            let mut cursor = node.walk();
            let operators: Vec<String> = node
                .children_by_field_name(operator_field, &mut cursor)
                .map(|op| operand_text(op, source))
                .collect();
            for operator in operators {
                self.add_operator(operator);
            }
        }

        if node.kind() == "comparison_operator" {
            let mut cursor = node.walk();
            let operands: Vec<String> = node
                .named_children(&mut cursor)
                .filter(|child| child.kind() != "comment")
                .map(|child| operand_text(child, source))
                .collect();
            for operand in operands {
                self.add_operand(operand);
            }
            return;
        }

        for field in operand_fields {
            if let Some(operand) = node.child_by_field_name(field) {
                self.add_operand(operand_text(operand, source));
            }
        }
    }

    fn add_operator(&mut self, operator: String) {
        self.operator_set.insert(operator);
        self.operator_total += 1.0;
    }

    fn add_operand(&mut self, operand: String) {
        self.operand_set.insert(operand);
        self.operand_total += 1.0;
    }

    fn into_metrics(self) -> HalsteadMetrics {
        compute_halstead_from_counts(
            self.operator_set.len() as f64,
            self.operand_set.len() as f64,
            self.operator_total,
            self.operand_total,
        )
    }
}

/// Compute Halstead metrics from operator/operand counts.
pub fn compute_halstead_from_counts(n1: f64, n2: f64, n_1: f64, n_2: f64) -> HalsteadMetrics {
    let mut metrics = HalsteadMetrics {
        n1,
        n2,
        n_1,
        n_2,
        ..HalsteadMetrics::default()
    };
    metrics.vocabulary = n1 + n2;
    metrics.length = n_1 + n_2;
    metrics.calculated_length = calculate_halstead_length(n1, n2);

    if metrics.vocabulary > 0.0 && metrics.length > 0.0 {
        metrics.volume = metrics.length * metrics.vocabulary.log2();
    }
    if n2 > 0.0 {
        metrics.difficulty = (n1 / 2.0) * (n_2 / n2);
    }
    metrics.effort = metrics.difficulty * metrics.volume;

    metrics
}

/// Calculate the theoretical Halstead program length.
pub fn calculate_halstead_length(n1: f64, n2: f64) -> f64 {
    let part1 = if n1 > 0.0 { n1 * n1.log2() } else { 0.0 };
    let part2 = if n2 > 0.0 { n2 * n2.log2() } else { 0.0 };
    part1 + part2
}

fn operand_text(node: Node<'_>, source: &str) -> String {
    match node.utf8_text(source.as_bytes()) {
        Ok(text) if !text.trim().is_empty() => text.split_whitespace().collect::<Vec<_>>().join(" "),
        _ => node.kind().to_string(),
    }
}

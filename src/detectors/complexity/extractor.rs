//! Cyclomatic complexity of functions, methods and classes.
//!
//! Every function definition at any depth is its own block; a function's
//! complexity never includes the decision points of definitions nested in it.

use tree_sitter::Node;

use super::types::{BlockComplexity, BlockKind};

/// Measure every function and class block under `root`, in document order.
pub fn measure_blocks(root: Node<'_>, source: &str) -> Vec<BlockComplexity> {
    let mut blocks = Vec::new();
    for definition in own_definitions(root) {
        measure_definition(definition, false, source, &mut blocks);
    }
    blocks
}

fn measure_definition(
    node: Node<'_>,
    in_class: bool,
    source: &str,
    blocks: &mut Vec<BlockComplexity>,
) -> u32 {
    let is_class = node.kind() == "class_definition";
    let kind = match (is_class, in_class) {
        (true, _) => BlockKind::Class,
        (false, true) => BlockKind::Method,
        (false, false) => BlockKind::Function,
    };
    let name = node
        .child_by_field_name("name")
        .and_then(|n| n.utf8_text(source.as_bytes()).ok())
        .unwrap_or("<anonymous>")
        .to_string();

    let slot = blocks.len();
    blocks.push(BlockComplexity {
        name,
        kind,
        line: node.start_position().row + 1,
        complexity: 0,
    });

    let body = node.child_by_field_name("body");
    let own_points = body.map(own_decision_points).unwrap_or(0);
    let nested = body.map(own_definitions).unwrap_or_default();

    let complexity = if is_class {
        let mut method_points = 0;
        for definition in nested {
            let method = measure_definition(definition, true, source, blocks);
            if definition.kind() == "function_definition" {
                method_points += method.saturating_sub(1);
            }
        }
        1 + own_points + method_points
    } else {
        for definition in nested {
            measure_definition(definition, false, source, blocks);
        }
        1 + own_points
    };

    blocks[slot].complexity = complexity;
    complexity
}

/// Decision points within `scope`, not descending into nested definitions.
pub fn own_decision_points(scope: Node<'_>) -> u32 {
    let mut total = 0;
    let mut stack = vec![scope];

    while let Some(node) = stack.pop() {
        total += decision_points(node);
        let mut cursor = node.walk();
        stack.extend(node.children(&mut cursor).filter(|child| !is_definition(*child)));
    }

    total
}

fn decision_points(node: Node<'_>) -> u32 {
    match node.kind() {
        "if_statement" | "elif_clause" | "conditional_expression" | "boolean_operator"
        | "for_in_clause" | "if_clause" | "case_clause" | "assert_statement"
        | "except_clause" | "except_group_clause" => 1,
        "for_statement" | "while_statement" => 1 + u32::from(has_else(node)),
        "try_statement" => u32::from(has_else(node)),
        _ => 0,
    }
}

fn has_else(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .any(|child| child.kind() == "else_clause");
    found
}

fn is_definition(node: Node<'_>) -> bool {
    matches!(node.kind(), "function_definition" | "class_definition")
}

/// Definitions directly owned by `scope`, in document order.
fn own_definitions(scope: Node<'_>) -> Vec<Node<'_>> {
    let mut found = Vec::new();
    let mut stack = children_reversed(scope);

    while let Some(node) = stack.pop() {
        if is_definition(node) {
            found.push(node);
            continue;
        }
        stack.extend(children_reversed(node));
    }

    found
}

fn children_reversed(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let mut children: Vec<_> = node.children(&mut cursor).collect();
    children.reverse();
    children
}

//! Raw line counts.

use tree_sitter::Node;

use super::types::RawCounts;

/// Classify every line of `source` as docstring, blank, comment-only or source.
///
/// Docstring lines are the rows of expression statements consisting of a
/// single string literal. A comment-only line starts with a comment token
/// after optional indentation.
pub fn count_raw(root: Node<'_>, source: &str) -> RawCounts {
    let lines: Vec<&str> = source.lines().collect();
    let mut docstring_rows = vec![false; lines.len()];
    let mut comment_rows = vec![false; lines.len()];
    let mut comments = 0;

    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match node.kind() {
            "comment" => {
                comments += 1;
                let start = node.start_position();
                let leading = lines.get(start.row).and_then(|line| line.get(..start.column));
                if leading.is_some_and(|prefix| prefix.trim().is_empty()) {
                    comment_rows[start.row] = true;
                }
                continue;
            }
            "expression_statement" if is_string_statement(node) => {
                let last = node.end_position().row.min(lines.len().saturating_sub(1));
                for row in node.start_position().row..=last {
                    if let Some(flag) = docstring_rows.get_mut(row) {
                        *flag = true;
                    }
                }
                continue;
            }
            _ => {}
        }
        let mut cursor = node.walk();
        stack.extend(node.children(&mut cursor));
    }

    let mut counts = RawCounts {
        loc: lines.len(),
        comments,
        ..RawCounts::default()
    };
    for (row, line) in lines.iter().enumerate() {
        if docstring_rows[row] {
            counts.multi += 1;
        } else if line.trim().is_empty() {
            counts.blank += 1;
        } else if comment_rows[row] {
            counts.single_comments += 1;
        } else {
            counts.sloc += 1;
        }
    }

    counts
}

fn is_string_statement(node: Node<'_>) -> bool {
    let mut cursor = node.walk();
    let mut named = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment");
    matches!(
        (named.next().map(|child| child.kind()), named.next()),
        (Some("string" | "concatenated_string"), None)
    )
}

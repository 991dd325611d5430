//! Python structural extraction with tree-sitter integration.
//!
//! One traversal of the syntax tree classifies every node as a function,
//! class, import or other node and routes it to the matching visitor.
//! Records are emitted level by level of the Python statement tree, in
//! document order within a level. A statement inside an `if`, loop, `with`
//! or `try` body sits one level below that statement, each `elif` adds a
//! level, and `except`/`case` bodies sit two levels below their statement.
//! Nested functions become independent, flat records.

use serde::{Deserialize, Serialize};
use tracing::debug;
use tree_sitter::{Node, Parser};

use super::common::{
    is_private_name, ClassRecord, FunctionRecord, ImportKind, ImportRecord, SourceFile,
};
use super::registry::create_parser_for_language;
use crate::core::errors::{ModlensError, Result};

#[cfg(test)]
#[path = "python_tests.rs"]
mod tests;

/// Which `return` statements count towards a function's has-return flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReturnScope {
    /// Any `return <value>` in the definition's subtree, including returns
    /// that belong to nested functions and classes.
    #[default]
    Subtree,
    /// Only returns in the function's own body; the scan stops at nested
    /// function, class and lambda boundaries.
    OwnBody,
}

/// Configuration for structural extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Return attribution for nested definitions
    #[serde(default)]
    pub return_scope: ReturnScope,
}

/// A syntax node tagged with the role it plays during extraction.
enum SyntaxItem<'tree> {
    Function(Node<'tree>),
    Class(Node<'tree>),
    Import(Node<'tree>),
    Other,
}

impl<'tree> SyntaxItem<'tree> {
    fn classify(node: Node<'tree>) -> Self {
        match node.kind() {
            "function_definition" => Self::Function(node),
            "class_definition" => Self::Class(node),
            "import_statement" | "import_from_statement" | "future_import_statement" => {
                Self::Import(node)
            }
            _ => Self::Other,
        }
    }
}

/// Output collections filled during the traversal.
#[derive(Default)]
struct Records {
    functions: Vec<FunctionRecord>,
    classes: Vec<ClassRecord>,
    imports: Vec<ImportRecord>,
}

/// Python-specific parsing and structural extraction
pub struct PythonAdapter {
    /// Tree-sitter parser for Python
    parser: Parser,

    /// Extraction options
    config: ExtractionConfig,
}

/// Parsing and record extraction methods for [`PythonAdapter`].
impl PythonAdapter {
    /// Create a new Python adapter with default extraction options
    pub fn new() -> Result<Self> {
        Self::with_config(ExtractionConfig::default())
    }

    /// Create a new Python adapter with explicit extraction options
    pub fn with_config(config: ExtractionConfig) -> Result<Self> {
        let parser = create_parser_for_language("py")?;
        Ok(Self { parser, config })
    }

    /// Parse Python source code and extract function, class and import records.
    ///
    /// Any syntax error in the tree is fatal and reported with the position of
    /// the first offending node.
    pub fn parse_source(&mut self, source_code: &str, file_path: &str) -> Result<SourceFile> {
        let tree = self
            .parser
            .parse(source_code, None)
            .ok_or_else(|| ModlensError::parse("python", "Failed to parse Python source code"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(locate_syntax_error(root, file_path));
        }

        let visitor = RecordVisitor {
            source: source_code,
            config: &self.config,
        };
        let mut records = Records::default();
        visitor.walk(root, &mut records)?;

        debug!(
            file = file_path,
            functions = records.functions.len(),
            classes = records.classes.len(),
            imports = records.imports.len(),
            "Extracted structural records"
        );

        Ok(SourceFile {
            path: file_path.to_string(),
            source: source_code.to_string(),
            tree,
            functions: records.functions,
            classes: records.classes,
            imports: records.imports,
        })
    }
}

/// Visits classified nodes and turns them into records.
struct RecordVisitor<'a> {
    source: &'a str,
    config: &'a ExtractionConfig,
}

impl<'a> RecordVisitor<'a> {
    /// Depth-first pass tagging each record with its statement depth, then a
    /// stable sort by depth.
    fn walk(&self, root: Node<'_>, out: &mut Records) -> Result<()> {
        let mut functions = Vec::new();
        let mut classes = Vec::new();
        let mut imports = Vec::new();
        let mut pending = vec![(root, 0usize)];

        while let Some((node, depth)) = pending.pop() {
            match SyntaxItem::classify(node) {
                SyntaxItem::Function(def) => functions.push((depth, self.visit_function(def)?)),
                SyntaxItem::Class(def) => classes.push((depth, self.visit_class(def)?)),
                SyntaxItem::Import(stmt) => {
                    imports.push((depth, self.visit_import(stmt)?));
                    continue;
                }
                SyntaxItem::Other => {}
            }

            let mut children = Vec::new();
            let mut elif_count = 0;
            let mut cursor = node.walk();
            for child in node.children(&mut cursor) {
                let child_depth = match child.kind() {
                    "elif_clause" => {
                        elif_count += 1;
                        depth + elif_count
                    }
                    "else_clause" if node.kind() == "if_statement" => depth + elif_count + 1,
                    _ if opens_statement_level(node.kind()) => depth + 1,
                    _ => depth,
                };
                children.push((child, child_depth));
            }
            pending.extend(children.into_iter().rev());
        }

        out.functions = by_depth(functions);
        out.classes = by_depth(classes);
        out.imports = by_depth(imports);
        Ok(())
    }

    fn visit_function(&self, def: Node<'_>) -> Result<FunctionRecord> {
        let name = self.name_of(def)?;
        let (source, start_line, end_line) = self.definition_source(def)?;

        let parameters = match def.child_by_field_name("parameters") {
            Some(params) => self.positional_parameters(params)?,
            None => Vec::new(),
        };

        Ok(FunctionRecord {
            is_private: is_private_name(&name),
            name,
            start_line,
            end_line,
            parameters,
            calls: self.collect_calls(def)?,
            has_return: self.has_value_return(def),
            source,
            decorators: self.decorator_names(def)?,
            complexity: 0,
        })
    }

    fn visit_class(&self, def: Node<'_>) -> Result<ClassRecord> {
        let name = self.name_of(def)?;
        let (source, start_line, end_line) = self.definition_source(def)?;

        let mut bases = Vec::new();
        if let Some(superclasses) = def.child_by_field_name("superclasses") {
            let mut cursor = superclasses.walk();
            for base in superclasses.named_children(&mut cursor) {
                if let Some(base_name) = self.dotted_name(base)? {
                    bases.push(base_name);
                }
            }
        }

        let mut methods = Vec::new();
        if let Some(body) = def.child_by_field_name("body") {
            let mut cursor = body.walk();
            for statement in body.named_children(&mut cursor) {
                let method = match statement.kind() {
                    "function_definition" => Some(statement),
                    "decorated_definition" => statement
                        .child_by_field_name("definition")
                        .filter(|inner| inner.kind() == "function_definition"),
                    _ => None,
                };
                if let Some(method) = method {
                    methods.push(self.name_of(method)?);
                }
            }
        }

        Ok(ClassRecord {
            is_private: is_private_name(&name),
            name,
            start_line,
            end_line,
            methods,
            bases,
            source,
        })
    }

    fn visit_import(&self, stmt: Node<'_>) -> Result<ImportRecord> {
        let line = stmt.start_position().row + 1;
        let mut names = Vec::new();
        let mut cursor = stmt.walk();
        for imported in stmt.children_by_field_name("name", &mut cursor) {
            names.push(self.imported_name(imported)?);
        }

        let (kind, module) = match stmt.kind() {
            "import_statement" => (ImportKind::Direct, None),
            "future_import_statement" => (ImportKind::From, Some("__future__".to_string())),
            _ => {
                let mut cursor = stmt.walk();
                if stmt
                    .named_children(&mut cursor)
                    .any(|child| child.kind() == "wildcard_import")
                {
                    names.push("*".to_string());
                }
                let module = match stmt.child_by_field_name("module_name") {
                    Some(module) => self.module_name(module)?,
                    None => None,
                };
                (ImportKind::From, module)
            }
        };

        Ok(ImportRecord {
            kind,
            module,
            names,
            line,
        })
    }

    /// Regular positional-or-keyword parameters: everything after a `/`
    /// marker and before `*`, `*args` or `**kwargs`.
    fn positional_parameters(&self, params: Node<'_>) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            match param.kind() {
                "identifier" => names.push(self.text(param)?.to_string()),
                "default_parameter" | "typed_default_parameter" => {
                    if let Some(name) = param
                        .child_by_field_name("name")
                        .filter(|n| n.kind() == "identifier")
                    {
                        names.push(self.text(name)?.to_string());
                    }
                }
                "typed_parameter" => match first_code_child(param) {
                    Some(inner) if inner.kind() == "identifier" => {
                        names.push(self.text(inner)?.to_string())
                    }
                    _ => break,
                },
                "positional_separator" => names.clear(),
                "keyword_separator" | "list_splat_pattern" | "dictionary_splat_pattern" => break,
                _ => {}
            }
        }
        Ok(names)
    }

    /// Callee names of every call in the definition, nested definitions included.
    fn collect_calls(&self, def: Node<'_>) -> Result<Vec<String>> {
        let mut calls = Vec::new();
        let mut stack = vec![def];
        while let Some(node) = stack.pop() {
            if node.kind() == "call" {
                if let Some(callee) = node.child_by_field_name("function") {
                    if let Some(name) = self.callee_name(callee)? {
                        calls.push(name);
                    }
                }
            }
            stack.extend(children_in_reverse(node));
        }
        Ok(calls)
    }

    fn callee_name(&self, callee: Node<'_>) -> Result<Option<String>> {
        let target = match callee.kind() {
            "identifier" => Some(callee),
            "attribute" => callee.child_by_field_name("attribute"),
            _ => None,
        };
        target
            .map(|node| self.text(node).map(str::to_string))
            .transpose()
    }

    fn has_value_return(&self, def: Node<'_>) -> bool {
        let Some(body) = def.child_by_field_name("body") else {
            return false;
        };

        let mut stack = vec![body];
        while let Some(node) = stack.pop() {
            match node.kind() {
                "return_statement" if carries_value(node) => return true,
                "function_definition" | "class_definition" | "lambda"
                    if self.config.return_scope == ReturnScope::OwnBody =>
                {
                    continue
                }
                _ => {}
            }
            stack.extend(children_in_reverse(node));
        }
        false
    }

    fn decorator_names(&self, def: Node<'_>) -> Result<Vec<String>> {
        let Some(wrapper) = def
            .parent()
            .filter(|parent| parent.kind() == "decorated_definition")
        else {
            return Ok(Vec::new());
        };

        let mut names = Vec::new();
        let mut cursor = wrapper.walk();
        for decorator in wrapper.named_children(&mut cursor) {
            if decorator.kind() != "decorator" {
                continue;
            }
            let Some(expression) = first_code_child(decorator) else {
                continue;
            };
            let target = if expression.kind() == "call" {
                expression.child_by_field_name("function")
            } else {
                Some(expression)
            };
            if let Some(target) = target {
                if let Some(name) = self.dotted_name(target)? {
                    names.push(name);
                }
            }
        }
        Ok(names)
    }

    /// `a` or `a.b.c`; `None` for any other expression shape.
    fn dotted_name(&self, node: Node<'_>) -> Result<Option<String>> {
        match node.kind() {
            "identifier" => Ok(Some(self.text(node)?.to_string())),
            "attribute" => {
                let (Some(object), Some(attribute)) = (
                    node.child_by_field_name("object"),
                    node.child_by_field_name("attribute"),
                ) else {
                    return Ok(None);
                };
                let Some(prefix) = self.dotted_name(object)? else {
                    return Ok(None);
                };
                Ok(Some(format!("{}.{}", prefix, self.text(attribute)?)))
            }
            _ => Ok(None),
        }
    }

    fn imported_name(&self, node: Node<'_>) -> Result<String> {
        let target = if node.kind() == "aliased_import" {
            node.child_by_field_name("name").unwrap_or(node)
        } else {
            node
        };
        Ok(self.text(target)?.to_string())
    }

    /// Module of a from-import; purely relative imports (`from . import x`) have none.
    fn module_name(&self, node: Node<'_>) -> Result<Option<String>> {
        match node.kind() {
            "dotted_name" => Ok(Some(self.text(node)?.to_string())),
            "relative_import" => {
                let mut cursor = node.walk();
                let dotted = node
                    .named_children(&mut cursor)
                    .find(|child| child.kind() == "dotted_name");
                dotted
                    .map(|d| self.text(d).map(str::to_string))
                    .transpose()
            }
            _ => Ok(None),
        }
    }

    fn name_of(&self, def: Node<'_>) -> Result<String> {
        let name = def.child_by_field_name("name").ok_or_else(|| {
            ModlensError::parse(
                "python",
                format!(
                    "{} without a name at line {}",
                    def.kind(),
                    def.start_position().row + 1
                ),
            )
        })?;
        Ok(self.text(name)?.to_string())
    }

    /// Source slice of a definition with trailing blank and comment-only lines
    /// removed, plus its 1-based line span.
    fn definition_source(&self, def: Node<'_>) -> Result<(String, usize, usize)> {
        let text = trim_trailing_trivia(self.text(def)?);
        let start_line = def.start_position().row + 1;
        let end_line = start_line + text.matches('\n').count();
        Ok((text.to_string(), start_line, end_line))
    }

    fn text(&self, node: Node<'_>) -> Result<&'a str> {
        Ok(node.utf8_text(self.source.as_bytes())?)
    }
}

/// Nodes whose nested statements sit one level deeper in the statement tree.
fn opens_statement_level(kind: &str) -> bool {
    matches!(
        kind,
        "module"
            | "function_definition"
            | "class_definition"
            | "if_statement"
            | "elif_clause"
            | "for_statement"
            | "while_statement"
            | "with_statement"
            | "try_statement"
            | "except_clause"
            | "except_group_clause"
            | "match_statement"
            | "case_clause"
    )
}

fn by_depth<T>(mut records: Vec<(usize, T)>) -> Vec<T> {
    records.sort_by_key(|(depth, _)| *depth);
    records.into_iter().map(|(_, record)| record).collect()
}

fn children_in_reverse<'tree>(node: Node<'tree>) -> Vec<Node<'tree>> {
    let mut cursor = node.walk();
    let mut children: Vec<Node<'tree>> = node.children(&mut cursor).collect();
    children.reverse();
    children
}

fn first_code_child(node: Node<'_>) -> Option<Node<'_>> {
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");
    found
}

fn carries_value(return_stmt: Node<'_>) -> bool {
    first_code_child(return_stmt).is_some()
}

fn trim_trailing_trivia(text: &str) -> &str {
    let mut end = text.trim_end().len();
    loop {
        let body = &text[..end];
        match body.rfind('\n') {
            Some(pos) if body[pos + 1..].trim_start().starts_with('#') => {
                end = body[..pos].trim_end().len();
            }
            _ => break,
        }
    }
    &text[..end]
}

fn locate_syntax_error(root: Node<'_>, file_path: &str) -> ModlensError {
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if node.is_error() || node.is_missing() {
            let position = node.start_position();
            let message = if node.is_missing() {
                format!("invalid syntax: missing `{}`", node.kind())
            } else {
                "invalid syntax".to_string()
            };
            return ModlensError::parse_with_location(
                "python",
                message,
                file_path,
                Some(position.row + 1),
                Some(position.column + 1),
            );
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node
            .children(&mut cursor)
            .filter(|child| child.has_error())
            .collect();
        stack.extend(children.into_iter().rev());
    }

    ModlensError::parse_with_location("python", "invalid syntax", file_path, None, None)
}

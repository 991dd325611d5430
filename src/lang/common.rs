//! Structural records shared by the extractor and every downstream stage.

use serde::{Deserialize, Serialize};
use tree_sitter::Tree;

/// A function or method definition found anywhere in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionRecord {
    /// Function name
    pub name: String,
    /// First line of the `def` (1-based)
    pub start_line: usize,
    /// Last line of the body (1-based)
    pub end_line: usize,
    /// Regular positional parameter names
    pub parameters: Vec<String>,
    /// Callee names in document order, one entry per call site
    pub calls: Vec<String>,
    /// Whether a `return <value>` is reachable in the definition
    pub has_return: bool,
    /// Leading underscore naming convention
    pub is_private: bool,
    /// Exact source text of the definition
    pub source: String,
    /// Decorator names
    pub decorators: Vec<String>,
    /// Cyclomatic complexity, 0 until metrics are attached
    pub complexity: u32,
}

impl FunctionRecord {
    /// Number of lines spanned by the source slice.
    pub fn line_count(&self) -> usize {
        self.source.split('\n').count()
    }
}

/// A class definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassRecord {
    /// Class name
    pub name: String,
    /// First line of the `class` statement (1-based)
    pub start_line: usize,
    /// Last line of the body (1-based)
    pub end_line: usize,
    /// Names of methods declared directly in the class body
    pub methods: Vec<String>,
    /// Base class names (dotted for attribute access)
    pub bases: Vec<String>,
    /// Exact source text of the definition
    pub source: String,
    /// Leading underscore naming convention
    pub is_private: bool,
}

/// Kind of import statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    /// `import a, b.c`
    Direct,
    /// `from m import x`
    From,
}

/// An import statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    /// Direct or from-import
    pub kind: ImportKind,
    /// Source module for from-imports; `None` for direct and purely relative imports
    pub module: Option<String>,
    /// Imported names
    pub names: Vec<String>,
    /// Line of the statement (1-based)
    pub line: usize,
}

/// A parsed source file together with every record extracted from it.
///
/// Owns all derived records for the duration of one analysis run.
#[derive(Debug, Clone)]
pub struct SourceFile {
    /// Display path, used only for diagnostics
    pub path: String,
    /// Raw source text
    pub source: String,
    /// Parsed syntax tree
    pub tree: Tree,
    /// Functions by statement depth, then document order
    pub functions: Vec<FunctionRecord>,
    /// Classes by statement depth, then document order
    pub classes: Vec<ClassRecord>,
    /// Imports by statement depth, then document order
    pub imports: Vec<ImportRecord>,
}

impl SourceFile {
    /// Number of function records.
    pub fn function_count(&self) -> usize {
        self.functions.len()
    }

    /// Number of class records.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// First function with the given name.
    pub fn function(&self, name: &str) -> Option<&FunctionRecord> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// Whether `name` follows the private naming convention.
pub fn is_private_name(name: &str) -> bool {
    name.starts_with('_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(source: &str) -> FunctionRecord {
        FunctionRecord {
            name: "f".into(),
            start_line: 1,
            end_line: 1,
            parameters: vec![],
            calls: vec![],
            has_return: false,
            is_private: false,
            source: source.into(),
            decorators: vec![],
            complexity: 0,
        }
    }

    #[test]
    fn line_count_counts_split_segments() {
        assert_eq!(record("def f(): pass").line_count(), 1);
        assert_eq!(record("def f():\n    pass").line_count(), 2);
        assert_eq!(record("").line_count(), 1);
    }

    #[test]
    fn private_names_start_with_underscore() {
        assert!(is_private_name("_helper"));
        assert!(is_private_name("__init__"));
        assert!(!is_private_name("public"));
    }
}

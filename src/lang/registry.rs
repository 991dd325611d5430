//! Tree-sitter language and parser construction.

use tree_sitter::{Language, Parser};

use crate::core::errors::{ModlensError, Result};

/// File extensions handled by the Python grammar.
pub const PYTHON_EXTENSIONS: &[&str] = &["py", "pyi"];

/// Get tree-sitter language for a language key
pub fn get_tree_sitter_language(language_key: &str) -> Result<Language> {
    match language_key {
        "py" | "python" => Ok(tree_sitter_python::LANGUAGE.into()),
        _ => Err(ModlensError::parse(
            language_key,
            format!("Unsupported language: {}", language_key),
        )),
    }
}

/// Create a tree-sitter parser for a language key
pub fn create_parser_for_language(language_key: &str) -> Result<Parser> {
    let language = get_tree_sitter_language(language_key)?;
    let mut parser = Parser::new();
    parser.set_language(&language).map_err(|e| {
        ModlensError::parse(
            language_key,
            format!("Failed to set {} language: {}", language_key, e),
        )
    })?;
    Ok(parser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_parser_is_available() {
        assert!(create_parser_for_language("py").is_ok());
        assert!(create_parser_for_language("python").is_ok());
    }

    #[test]
    fn unknown_language_is_rejected() {
        let Err(err) = create_parser_for_language("cobol") else {
            panic!("expected an error for unsupported language");
        };
        assert!(err.is_parse_error());
        assert!(err.to_string().contains("Unsupported language"));
    }
}

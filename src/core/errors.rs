//! Error types for the modlens-rs library.
//!
//! Two tiers exist in the analysis pipeline: parse failures are fatal and
//! surface as [`ModlensError::Parse`], while metric failures are recovered
//! inside the pipeline and only ever appear in logs.

use std::io;
use std::str::Utf8Error;

use thiserror::Error;

/// Main result type for modlens operations.
pub type Result<T> = std::result::Result<T, ModlensError>;

/// Error type for all modlens operations.
#[derive(Error, Debug)]
pub enum ModlensError {
    /// I/O related errors (reading sources, writing reports, staging files)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Syntax errors in the analyzed source
    #[error("Parse error in {language}: {message}")]
    Parse {
        /// Programming language being parsed
        language: String,
        /// Error description
        message: String,
        /// File path where error occurred
        file_path: Option<String>,
        /// Line number (1-based, if available)
        line: Option<usize>,
        /// Column number (1-based, if available)
        column: Option<usize>,
    },

    /// Failures raised by a metrics provider
    #[error("Metrics error: {message}")]
    Metrics {
        /// Error description
        message: String,
        /// Provider that produced the failure
        provider: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },
}

impl ModlensError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new parse error
    pub fn parse(language: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            language: language.into(),
            message: message.into(),
            file_path: None,
            line: None,
            column: None,
        }
    }

    /// Create a new parse error with file context
    pub fn parse_with_location(
        language: impl Into<String>,
        message: impl Into<String>,
        file_path: impl Into<String>,
        line: Option<usize>,
        column: Option<usize>,
    ) -> Self {
        Self::Parse {
            language: language.into(),
            message: message.into(),
            file_path: Some(file_path.into()),
            line,
            column,
        }
    }

    /// Create a new metrics error attributed to a provider
    pub fn metrics_from(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Metrics {
            message: message.into(),
            provider: Some(provider.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error naming the offending field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Whether this error is a syntax error in the analyzed source.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Add context to an existing error.
    ///
    /// I/O errors take the context as their message; configuration,
    /// validation and serialization errors get it as a prefix. Parse and
    /// metrics errors already carry their origin and are left unchanged.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        match &mut self {
            Self::Io { message, .. } => *message = context,
            Self::Config { message, .. }
            | Self::Validation { message, .. }
            | Self::Serialization { message, .. } => {
                *message = format!("{context}: {message}");
            }
            Self::Parse { .. } | Self::Metrics { .. } => {}
        }
        self
    }
}

impl From<io::Error> for ModlensError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for ModlensError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for ModlensError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<Utf8Error> for ModlensError {
    fn from(err: Utf8Error) -> Self {
        Self::parse("python", format!("UTF-8 encoding error: {err}"))
    }
}

/// Result extension trait for adding context to errors
pub trait ModlensResultExt<T> {
    /// Add lazily built context to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error result
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E> ModlensResultExt<T> for std::result::Result<T, E>
where
    E: Into<ModlensError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| e.into().with_context(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = ModlensError::config("Invalid configuration");
        assert!(matches!(err, ModlensError::Config { .. }));

        let err = ModlensError::parse("python", "Syntax error");
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_error_with_context() {
        let err = ModlensError::validation("must be positive").with_context("thresholds.max_sloc");
        assert_eq!(
            err.to_string(),
            "Validation error: thresholds.max_sloc: must be positive"
        );

        let err = ModlensError::metrics_from("tree-sitter", "visitor failed").with_context("ignored");
        match err {
            ModlensError::Metrics { message, provider } => {
                assert_eq!(message, "visitor failed");
                assert_eq!(provider.as_deref(), Some("tree-sitter"));
            }
            other => panic!("Expected Metrics error, got {other:?}"),
        }
    }

    #[test]
    fn test_result_extension() {
        let result: std::result::Result<i32, std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "File not found",
        ));

        let modlens_result = result.context("Failed to read source file");
        match modlens_result {
            Err(ModlensError::Io { message, source }) => {
                assert_eq!(message, "Failed to read source file");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("Expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_field_error() {
        let err = ModlensError::config_field("Invalid value", "thresholds.max_sloc");

        if let ModlensError::Config { message, field } = err {
            assert_eq!(message, "Invalid value");
            assert_eq!(field, Some("thresholds.max_sloc".to_string()));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_parse_with_location_display() {
        let err = ModlensError::parse_with_location(
            "python",
            "invalid syntax",
            "broken.py",
            Some(3),
            Some(9),
        );

        assert_eq!(err.to_string(), "Parse error in python: invalid syntax");
        if let ModlensError::Parse { line, column, file_path, .. } = err {
            assert_eq!(line, Some(3));
            assert_eq!(column, Some(9));
            assert_eq!(file_path.as_deref(), Some("broken.py"));
        } else {
            panic!("Expected Parse error");
        }
    }

    #[test]
    fn test_serde_errors_convert() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ModlensError = json_err.into();
        assert!(matches!(err, ModlensError::Serialization { data_type: Some(ref t), .. } if t == "JSON"));

        let yaml_err = serde_yaml::from_str::<Vec<u32>>("a: [").unwrap_err();
        let err: ModlensError = yaml_err.into();
        assert!(matches!(err, ModlensError::Serialization { data_type: Some(ref t), .. } if t == "YAML"));
    }
}

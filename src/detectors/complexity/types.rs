//! Metric types produced by the metrics stage.

use serde::{Deserialize, Serialize};

/// Kind of a measured code block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Function,
    Method,
    Class,
}

/// Cyclomatic complexity of one function, method or class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockComplexity {
    /// Block name
    pub name: String,
    /// Block kind
    pub kind: BlockKind,
    /// First line (1-based)
    pub line: usize,
    /// Cyclomatic complexity
    pub complexity: u32,
}

/// Raw line counts of a source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawCounts {
    /// Total lines
    pub loc: usize,
    /// Source lines: not blank, not comment-only, not docstring
    pub sloc: usize,
    /// Comment tokens, inline comments included
    pub comments: usize,
    /// Comment-only lines
    pub single_comments: usize,
    /// Docstring lines
    pub multi: usize,
    /// Blank lines
    pub blank: usize,
}

/// Halstead software science metrics.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HalsteadMetrics {
    /// Distinct operators
    pub n1: f64,
    /// Distinct operands
    pub n2: f64,
    /// Total operators
    pub n_1: f64,
    /// Total operands
    pub n_2: f64,
    pub vocabulary: f64,
    pub length: f64,
    pub calculated_length: f64,
    pub volume: f64,
    pub difficulty: f64,
    pub effort: f64,
}

/// Everything a metrics provider reports for one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMeasurements {
    /// Measured blocks in document order
    pub blocks: Vec<BlockComplexity>,
    /// Maintainability index in [0, 100]
    pub maintainability_index: f64,
    /// Raw line counts
    pub raw: RawCounts,
    /// Halstead metrics of the whole file
    pub halstead: HalsteadMetrics,
}

/// Metrics stage output. All zero when the provider failed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CodeMetrics {
    /// Maintainability index
    pub maintainability_index: f64,
    /// Raw line counts
    pub raw: RawCounts,
    /// Mean complexity over all measured blocks
    pub average_complexity: f64,
    /// Highest block complexity
    pub max_complexity: u32,
    /// Measured blocks
    pub blocks: Vec<BlockComplexity>,
}

impl CodeMetrics {
    /// Summarize provider measurements.
    pub fn from_measurements(measurements: FileMeasurements) -> Self {
        let max_complexity = measurements
            .blocks
            .iter()
            .map(|b| b.complexity)
            .max()
            .unwrap_or(0);
        let average_complexity = if measurements.blocks.is_empty() {
            0.0
        } else {
            let total: u64 = measurements.blocks.iter().map(|b| u64::from(b.complexity)).sum();
            total as f64 / measurements.blocks.len() as f64
        };

        Self {
            maintainability_index: measurements.maintainability_index,
            raw: measurements.raw,
            average_complexity,
            max_complexity,
            blocks: measurements.blocks,
        }
    }
}

/// File-level summary combining metrics, structure counts and cohesion.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMetrics {
    pub maintainability_index: f64,
    pub loc: usize,
    pub sloc: usize,
    pub comments: usize,
    pub multi: usize,
    pub blank: usize,
    pub function_count: usize,
    pub class_count: usize,
    pub average_complexity: f64,
    pub max_complexity: u32,
    pub cohesion: f64,
}

impl FileMetrics {
    /// Combine the metrics stage output with structural counts and cohesion.
    pub fn assemble(
        metrics: &CodeMetrics,
        function_count: usize,
        class_count: usize,
        cohesion: f64,
    ) -> Self {
        Self {
            maintainability_index: metrics.maintainability_index,
            loc: metrics.raw.loc,
            sloc: metrics.raw.sloc,
            comments: metrics.raw.comments,
            multi: metrics.raw.multi,
            blank: metrics.raw.blank,
            function_count,
            class_count,
            average_complexity: metrics.average_complexity,
            max_complexity: metrics.max_complexity,
            cohesion,
        }
    }
}

//! Metrics stage: cyclomatic complexity, raw counts, Halstead volume and the
//! maintainability index.
//!
//! Metric computation sits behind the [`MetricsProvider`] trait so the
//! pipeline can swap the tree-sitter implementation for another engine.
//! [`MetricsAdapter`] attaches block complexities to extracted functions and
//! degrades to zeroed metrics when the provider fails.

mod extractor;
mod halstead;
mod raw;
pub mod types;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::core::errors::{ModlensError, Result};
use crate::lang::common::{FunctionRecord, SourceFile};
use crate::lang::registry::create_parser_for_language;

pub use extractor::{measure_blocks, own_decision_points};
pub use halstead::{calculate_halstead_for_node, compute_halstead_from_counts};
pub use raw::count_raw;
pub use types::{
    BlockComplexity, BlockKind, CodeMetrics, FileMeasurements, FileMetrics, HalsteadMetrics,
    RawCounts,
};

/// Source of file metrics.
pub trait MetricsProvider: Send + Sync {
    /// Provider name used in logs.
    fn name(&self) -> &str;

    /// Measure a complete source file.
    fn measure(&self, source: &str) -> Result<FileMeasurements>;
}

/// Default provider computing block complexity, raw counts and maintainability from a tree-sitter parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeSitterMetricsProvider;

impl MetricsProvider for TreeSitterMetricsProvider {
    fn name(&self) -> &str {
        "tree-sitter"
    }

    fn measure(&self, source: &str) -> Result<FileMeasurements> {
        let mut parser = create_parser_for_language("python")?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| ModlensError::metrics_from(self.name(), "Parser produced no tree"))?;
        let root = tree.root_node();

        let blocks = measure_blocks(root, source);
        let raw = count_raw(root, source);
        let halstead = calculate_halstead_for_node(root, source);

        let total_complexity: u32 = blocks.iter().map(|block| block.complexity).sum();
        let comment_percent = if raw.sloc > 0 {
            (raw.comments + raw.multi) as f64 / raw.sloc as f64 * 100.0
        } else {
            0.0
        };
        let maintainability_index = maintainability_index(
            halstead.volume,
            f64::from(total_complexity),
            raw.sloc,
            comment_percent,
        );

        Ok(FileMeasurements {
            blocks,
            maintainability_index,
            raw,
            halstead,
        })
    }
}

/// Maintainability index rescaled to [0, 100].
///
/// Returns 100 when either the Halstead volume or the SLOC count is zero.
pub fn maintainability_index(
    volume: f64,
    complexity: f64,
    sloc: usize,
    comment_percent: f64,
) -> f64 {
    if volume <= 0.0 || sloc == 0 {
        return 100.0;
    }

    let raw_index = 171.0
        - 5.2 * volume.ln()
        - 0.23 * complexity
        - 16.2 * (sloc as f64).ln()
        + 50.0 * (2.46 * comment_percent.to_radians()).sqrt().sin();

    (raw_index * 100.0 / 171.0).clamp(0.0, 100.0)
}

/// Runs a [`MetricsProvider`] over a parsed file.
#[derive(Clone)]
pub struct MetricsAdapter {
    provider: Arc<dyn MetricsProvider>,
}

impl Default for MetricsAdapter {
    fn default() -> Self {
        Self::new(Arc::new(TreeSitterMetricsProvider))
    }
}

impl MetricsAdapter {
    /// Create an adapter over the given provider.
    pub fn new(provider: Arc<dyn MetricsProvider>) -> Self {
        Self { provider }
    }

    /// Name of the wrapped provider.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Measure `file` and attach complexities to its functions.
    ///
    /// Provider errors are logged and yield zeroed metrics.
    pub fn measure(&self, file: &mut SourceFile) -> CodeMetrics {
        match self.provider.measure(&file.source) {
            Ok(measurements) => {
                attach_complexities(&mut file.functions, &measurements.blocks);
                let metrics = CodeMetrics::from_measurements(measurements);
                debug!(
                    provider = self.provider.name(),
                    blocks = metrics.blocks.len(),
                    maintainability = metrics.maintainability_index,
                    "Measured file metrics"
                );
                metrics
            }
            Err(error) => {
                warn!(
                    provider = self.provider.name(),
                    file = %file.path,
                    "Metrics provider failed, continuing with zeroed metrics: {}",
                    error
                );
                for function in &mut file.functions {
                    function.complexity = 0;
                }
                CodeMetrics::default()
            }
        }
    }
}

/// Give each function the complexity of the first block with its name.
pub fn attach_complexities(functions: &mut [FunctionRecord], blocks: &[BlockComplexity]) {
    for function in functions.iter_mut() {
        function.complexity = blocks
            .iter()
            .find(|block| block.name == function.name)
            .map(|block| block.complexity)
            .unwrap_or(0);
    }
}

#[cfg(test)]
mod tests;

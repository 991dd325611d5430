//! Main analysis engine implementation.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::api::results::AnalysisReport;
use crate::core::config::ModlensConfig;
use crate::core::errors::{ModlensError, ModlensResultExt, Result};
use crate::core::pipeline::AnalysisPipeline;
use crate::detectors::complexity::MetricsProvider;

/// Main modlens analysis engine
#[derive(Clone)]
pub struct ModlensEngine {
    pipeline: AnalysisPipeline,
}

impl ModlensEngine {
    /// Create an engine after validating the configuration
    pub fn new(config: ModlensConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pipeline: AnalysisPipeline::new(config),
        })
    }

    /// Create an engine with a custom metrics provider
    pub fn with_metrics_provider(
        config: ModlensConfig,
        provider: Arc<dyn MetricsProvider>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            pipeline: AnalysisPipeline::with_metrics_provider(config, provider),
        })
    }

    /// Engine configuration
    pub fn config(&self) -> &ModlensConfig {
        self.pipeline.config()
    }

    /// Analyze Python source text. `path` is used for naming and diagnostics only.
    pub fn analyze_source(&self, path: &str, source: &str) -> Result<AnalysisReport> {
        let result = self.pipeline.run(path, source)?;
        Ok(AnalysisReport::from_pipeline(result))
    }

    /// Read and analyze a Python file
    pub fn analyze_file<P: AsRef<Path>>(&self, path: P) -> Result<AnalysisReport> {
        let path = path.as_ref();
        info!("Starting file analysis: {}", path.display());

        if !path.is_file() {
            return Err(ModlensError::io(
                format!("Path is not a readable file: {}", path.display()),
                std::io::Error::new(std::io::ErrorKind::NotFound, "File not found"),
            ));
        }

        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;
        let source = std::str::from_utf8(&bytes)?;

        self.analyze_source(&path.to_string_lossy(), source)
    }
}

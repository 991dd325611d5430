//! Single-file analysis pipeline.
//!
//! Stages run in a fixed order, each consuming the outputs of the ones
//! before it:
//! 1. structural extraction (fatal on syntax errors)
//! 2. relationship graph
//! 3. metrics (degrades to zeroed metrics on provider failure)
//! 4. duplicate detection
//! 5. cohesion
//! 6. issue detection
//! 7. clustering and refactor planning

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::core::config::ModlensConfig;
use crate::core::errors::Result;
use crate::detectors::clone_detection::{DuplicateSet, SimilarityDetector};
use crate::detectors::cohesion::calculate_file_cohesion;
use crate::detectors::complexity::{CodeMetrics, FileMetrics, MetricsAdapter, MetricsProvider};
use crate::detectors::graph::RelationshipGraph;
use crate::detectors::refactoring::{
    cluster_functions, Issue, IssueContext, IssueDetector, RefactorPlanner, Suggestion,
};
use crate::lang::common::SourceFile;
use crate::lang::python::PythonAdapter;

/// Everything produced by one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// Parsed file with extracted records and attached complexities
    pub file: SourceFile,
    /// Metrics stage output
    pub metrics: CodeMetrics,
    /// File summary used by the issue rules
    pub file_metrics: FileMetrics,
    pub graph: RelationshipGraph,
    pub duplicates: DuplicateSet,
    pub cohesion: f64,
    /// Issues sorted by severity
    pub issues: Vec<Issue>,
    /// Function clusters used for split suggestions
    pub clusters: Vec<Vec<String>>,
    /// One suggestion per issue, in issue order
    pub suggestions: Vec<Suggestion>,
}

/// Runs the analysis stages over one source text.
#[derive(Clone)]
pub struct AnalysisPipeline {
    config: ModlensConfig,
    metrics: MetricsAdapter,
    similarity: SimilarityDetector,
    detector: IssueDetector,
    planner: RefactorPlanner,
}

impl AnalysisPipeline {
    /// Create a pipeline using the tree-sitter metrics provider.
    pub fn new(config: ModlensConfig) -> Self {
        Self::with_metrics(config, MetricsAdapter::default())
    }

    /// Create a pipeline with a custom metrics provider.
    pub fn with_metrics_provider(config: ModlensConfig, provider: Arc<dyn MetricsProvider>) -> Self {
        Self::with_metrics(config, MetricsAdapter::new(provider))
    }

    fn with_metrics(config: ModlensConfig, metrics: MetricsAdapter) -> Self {
        Self {
            similarity: SimilarityDetector::new(config.similarity.clone()),
            detector: IssueDetector::new(config.thresholds.clone()),
            planner: RefactorPlanner::new(config.planner.clone()),
            metrics,
            config,
        }
    }

    pub fn config(&self) -> &ModlensConfig {
        &self.config
    }

    /// Analyze `source`, reporting `path` in diagnostics.
    pub fn run(&self, path: &str, source: &str) -> Result<PipelineResult> {
        let started = Instant::now();

        let mut adapter = PythonAdapter::with_config(self.config.extraction.clone())?;
        let mut file = adapter.parse_source(source, path)?;
        debug!(
            stage = "extraction",
            functions = file.function_count(),
            classes = file.class_count(),
            "Stage complete"
        );

        let graph = RelationshipGraph::build(&file.functions);
        debug!(stage = "relationships", entries = graph.len(), "Stage complete");

        let metrics = self.metrics.measure(&mut file);
        debug!(
            stage = "metrics",
            provider = self.metrics.provider_name(),
            sloc = metrics.raw.sloc,
            "Stage complete"
        );

        let duplicates = self.similarity.detect(&file.functions);
        debug!(stage = "similarity", pairs = duplicates.len(), "Stage complete");

        let cohesion = calculate_file_cohesion(file.function_count(), &graph);
        debug!(stage = "cohesion", cohesion, "Stage complete");

        let file_metrics =
            FileMetrics::assemble(&metrics, file.function_count(), file.class_count(), cohesion);
        let issues = self.detector.detect(&IssueContext {
            functions: &file.functions,
            class_count: file.class_count(),
            metrics: &file_metrics,
            graph: &graph,
            duplicates: &duplicates,
        });
        debug!(stage = "issues", issues = issues.len(), "Stage complete");

        let clusters = cluster_functions(&file.functions, &graph);
        let suggestions = self.planner.plan(&issues, &clusters);
        debug!(
            stage = "planning",
            clusters = clusters.len(),
            suggestions = suggestions.len(),
            "Stage complete"
        );

        info!(
            file = path,
            functions = file.function_count(),
            issues = issues.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Analysis complete"
        );

        Ok(PipelineResult {
            file,
            metrics,
            file_metrics,
            graph,
            duplicates,
            cohesion,
            issues,
            clusters,
            suggestions,
        })
    }
}

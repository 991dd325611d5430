//! # Modlens-RS: Single-File Modularity Analysis for Python
//!
//! Modlens reads one Python source file and reports how well it is
//! modularized:
//!
//! - **Structure**: functions, classes and imports extracted with tree-sitter
//! - **Relationships**: intra-file call graph, callers and related functions
//! - **Metrics**: cyclomatic complexity, raw line counts, maintainability index
//! - **Duplication**: pairwise function similarity over normalized source
//! - **Issues**: threshold rules for size, complexity, duplication and cohesion
//! - **Refactoring**: one concrete, step-by-step suggestion per issue
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        API Layer                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Core        │  Detectors      │  Language  │  I/O         │
//! │              │                 │  Adapters  │              │
//! │ • Pipeline   │ • Graph         │ • Python   │ • Reports    │
//! │ • Config     │ • Complexity    │            │ • Previews   │
//! │ • Errors     │ • Clone detect  │            │              │
//! │              │ • Cohesion      │            │              │
//! │              │ • Refactoring   │            │              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use modlens_rs::{ModlensConfig, ModlensEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = ModlensEngine::new(ModlensConfig::default())?;
//!     let report = engine.analyze_file("app/services.py")?;
//!
//!     println!("{} issues in {}", report.total_issues, report.file_name);
//!     Ok(())
//! }
//! ```

#![warn(unsafe_code)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "mimalloc")]
#[global_allocator]
static ALLOC: mimalloc::MiMalloc = mimalloc::MiMalloc;

// Core pipeline, configuration and errors
pub mod core {
    //! Analysis pipeline, configuration and error types.

    pub mod config;
    pub mod errors;
    pub mod pipeline;
}

// Analysis stages
pub mod detectors {
    //! Analysis stages run by the pipeline.

    pub mod clone_detection;
    pub mod cohesion;
    pub mod complexity;
    pub mod graph;
    pub mod refactoring;
}

// Language-specific AST adapters
pub mod lang {
    //! Tree-sitter parsing and structural extraction.

    pub mod common;
    pub mod python;
    pub mod registry;
}

// Rendering
pub mod io {
    //! Report rendering and refactoring previews.

    pub mod previews;
    pub mod reports;
}

// Public API and engine interface
pub mod api {
    //! High-level API and engine interface.

    pub mod engine;
    pub mod results;
}

// Re-export primary types for convenience
pub use api::engine::ModlensEngine;
pub use api::results::{AnalysisReport, FunctionSummary};
pub use core::config::ModlensConfig;
pub use core::errors::{ModlensError, ModlensResultExt, Result};
pub use detectors::complexity::MetricsProvider;
pub use io::reports::{ReportFormat, ReportGenerator};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

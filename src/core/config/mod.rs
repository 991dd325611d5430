//! Configuration types and management for modlens-rs.
//!
//! Every threshold the analysis pipeline consults lives in one of the
//! structures composed here, so tests and users can override a rule without
//! touching rule logic. All sections are optional in YAML and fall back to
//! their defaults.

pub mod validation;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{ModlensError, Result};
use crate::detectors::clone_detection::SimilarityConfig;
use crate::detectors::refactoring::planner::PlannerConfig;
use crate::detectors::refactoring::IssueThresholds;
use crate::lang::python::ExtractionConfig;

pub use validation::{
    validate_ordered, validate_percentage, validate_positive_f64, validate_positive_usize,
    validate_unit_range,
};

/// Top-level configuration for a modlens analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ModlensConfig {
    /// Structural extraction options
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Duplicate-function detection options
    #[serde(default)]
    pub similarity: SimilarityConfig,

    /// Issue rule thresholds
    #[serde(default)]
    pub thresholds: IssueThresholds,

    /// Refactor planner estimates
    #[serde(default)]
    pub planner: PlannerConfig,
}

impl ModlensConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            ModlensError::io(format!("Failed to read config file: {}", path.display()), e)
        })?;

        Self::from_yaml_str(&content)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(Into::into)
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content).map_err(|e| {
            ModlensError::io(
                format!("Failed to write config file: {}", path.display()),
                e,
            )
        })
    }

    /// Validate every section, reporting the first failing field.
    pub fn validate(&self) -> Result<()> {
        self.similarity.validate().map_err(|e| {
            ModlensError::config_field(format!("Invalid similarity configuration: {e}"), "similarity")
        })?;
        self.thresholds.validate().map_err(|e| {
            ModlensError::config_field(format!("Invalid threshold configuration: {e}"), "thresholds")
        })?;
        self.planner.validate().map_err(|e| {
            ModlensError::config_field(format!("Invalid planner configuration: {e}"), "planner")
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests;

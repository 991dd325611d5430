//! Near-duplicate function detection within a single file.
//!
//! Each function body is normalized (lines stripped, blank and comment-only
//! lines dropped) and every unordered pair of functions is scored with a
//! Ratcliff/Obershelp ratio. Pairs are canonicalized before matching so the
//! score of (A, B) always equals the score of (B, A).

pub mod sequence_matcher;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::config::validation::{validate_ordered, validate_unit_range};
use crate::core::errors::Result;
use crate::lang::common::FunctionRecord;

pub use sequence_matcher::{MatchBlock, SequenceMatcher};

/// Unit compared by the sequence matcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchGranularity {
    /// Normalized lines
    #[default]
    Lines,
    /// Characters of the normalized text
    Characters,
}

/// Duplicate detection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimilarityConfig {
    /// Pairs scoring above this ratio are retained
    pub duplicate_threshold: f64,
    /// Pairs scoring above this ratio are flagged as high similarity
    pub high_similarity_threshold: f64,
    /// Sequence element the ratio is computed over
    pub granularity: MatchGranularity,
    /// Score pairs on the rayon thread pool
    pub parallel: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            duplicate_threshold: 0.70,
            high_similarity_threshold: 0.85,
            granularity: MatchGranularity::Lines,
            parallel: false,
        }
    }
}

impl SimilarityConfig {
    pub fn validate(&self) -> Result<()> {
        validate_unit_range(self.duplicate_threshold, "duplicate_threshold")?;
        validate_unit_range(self.high_similarity_threshold, "high_similarity_threshold")?;
        validate_ordered(
            self.duplicate_threshold,
            self.high_similarity_threshold,
            "duplicate_threshold",
            "high_similarity_threshold",
        )?;
        Ok(())
    }
}

/// Two functions whose normalized bodies are similar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicatePair {
    #[serde(rename = "func1")]
    pub first: String,
    #[serde(rename = "func2")]
    pub second: String,
    pub similarity: f64,
    #[serde(rename = "source1")]
    pub first_source: String,
    #[serde(rename = "source2")]
    pub second_source: String,
    #[serde(rename = "line1")]
    pub first_line: usize,
    #[serde(rename = "line2")]
    pub second_line: usize,
    #[serde(rename = "complexity1")]
    pub first_complexity: u32,
    #[serde(rename = "complexity2")]
    pub second_complexity: u32,
    /// Ratio exceeded the high similarity threshold
    pub high_similarity: bool,
}

impl DuplicatePair {
    fn new(first: &FunctionRecord, second: &FunctionRecord, similarity: f64, high: bool) -> Self {
        Self {
            first: first.name.clone(),
            second: second.name.clone(),
            similarity,
            first_source: first.source.clone(),
            second_source: second.source.clone(),
            first_line: first.start_line,
            second_line: second.start_line,
            first_complexity: first.complexity,
            second_complexity: second.complexity,
            high_similarity: high,
        }
    }
}

/// Retained duplicate pairs keyed by `(first, second)` name.
///
/// A later pair with the same names replaces the earlier value but keeps its
/// position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DuplicateSet {
    pairs: IndexMap<(String, String), DuplicatePair>,
}

impl DuplicateSet {
    pub fn insert(&mut self, pair: DuplicatePair) {
        self.pairs
            .insert((pair.first.clone(), pair.second.clone()), pair);
    }

    pub fn get(&self, first: &str, second: &str) -> Option<&DuplicatePair> {
        self.pairs.get(&(first.to_string(), second.to_string()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DuplicatePair> {
        self.pairs.values()
    }

    /// Pairs above the high similarity threshold.
    pub fn high_similarity_count(&self) -> usize {
        self.iter().filter(|pair| pair.high_similarity).count()
    }

    pub fn to_vec(&self) -> Vec<DuplicatePair> {
        self.pairs.values().cloned().collect()
    }
}

/// Pairwise similarity detector.
#[derive(Debug, Clone, Default)]
pub struct SimilarityDetector {
    config: SimilarityConfig,
}

impl SimilarityDetector {
    pub fn new(config: SimilarityConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimilarityConfig {
        &self.config
    }

    /// Score every unordered pair of `functions`.
    pub fn detect(&self, functions: &[FunctionRecord]) -> DuplicateSet {
        let normalized: Vec<String> = functions
            .iter()
            .map(|function| normalize_source(&function.source))
            .collect();

        let count = functions.len();
        let pairs: Vec<(usize, usize)> = (0..count)
            .flat_map(|i| (i + 1..count).map(move |j| (i, j)))
            .collect();

        let granularity = self.config.granularity;
        let score = |&(i, j): &(usize, usize)| {
            (i, j, similarity_ratio(&normalized[i], &normalized[j], granularity))
        };
        let scored: Vec<(usize, usize, f64)> = if self.config.parallel {
            pairs.par_iter().map(score).collect()
        } else {
            pairs.iter().map(score).collect()
        };

        let mut duplicates = DuplicateSet::default();
        for (i, j, ratio) in scored {
            if ratio > self.config.duplicate_threshold {
                let high = ratio > self.config.high_similarity_threshold;
                duplicates.insert(DuplicatePair::new(&functions[i], &functions[j], ratio, high));
            }
        }

        debug!(
            compared = pairs.len(),
            retained = duplicates.len(),
            high = duplicates.high_similarity_count(),
            "Scored function pairs"
        );

        duplicates
    }
}

/// Strip every line and drop blank and comment-only lines.
pub fn normalize_source(source: &str) -> String {
    source
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Symmetric similarity of two normalized sources.
pub fn similarity_ratio(a: &str, b: &str, granularity: MatchGranularity) -> f64 {
    let (a, b) = if a <= b { (a, b) } else { (b, a) };
    match granularity {
        MatchGranularity::Lines => {
            let (a, b) = (split_lines(a), split_lines(b));
            SequenceMatcher::new(&a, &b).ratio()
        }
        MatchGranularity::Characters => {
            let a: Vec<char> = a.chars().collect();
            let b: Vec<char> = b.chars().collect();
            SequenceMatcher::new(&a, &b).ratio()
        }
    }
}

fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split('\n').collect()
    }
}

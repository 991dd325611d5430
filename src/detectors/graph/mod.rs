//! Intra-file call relationships between extracted functions.
//!
//! The graph is an insertion-ordered map from function name to an owned
//! [`RelationshipEntry`], built in three ordered passes:
//! 1. copy each function's outgoing call list,
//! 2. derive `called_by` from calls that name a function defined in the file,
//! 3. link every pair of functions sharing at least [`MIN_SHARED_CALLS`]
//!    call targets as `related`.
//!
//! Calls match by literal name only. Aliases, attribute chains and dynamic
//! dispatch are not resolved.

use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lang::common::FunctionRecord;

/// Number of shared call targets that makes two functions related.
pub const MIN_SHARED_CALLS: usize = 2;

/// Relationships of one function name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationshipEntry {
    /// Outgoing call names, one per call site
    pub calls: Vec<String>,
    /// Callers defined in this file, one per call site
    pub called_by: Vec<String>,
    /// Functions sharing at least two call targets, one entry per related
    /// pair of definitions (symmetric)
    pub related: Vec<String>,
}

/// Call graph over the functions of one file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipGraph {
    entries: IndexMap<String, RelationshipEntry>,
}

impl RelationshipGraph {
    /// Build the relationship graph for a function list.
    ///
    /// Functions sharing a name share one entry; later definitions append
    /// their calls to it. Related links are made per pair of definitions, so
    /// same-named definitions with common call targets link to their own name.
    pub fn build(functions: &[FunctionRecord]) -> Self {
        let mut entries: IndexMap<String, RelationshipEntry> =
            IndexMap::with_capacity(functions.len());

        for function in functions {
            entries
                .entry(function.name.clone())
                .or_default()
                .calls
                .extend(function.calls.iter().cloned());
        }

        for function in functions {
            for call in &function.calls {
                if let Some(callee) = entries.get_mut(call) {
                    callee.called_by.push(function.name.clone());
                }
            }
        }

        let call_sets: Vec<HashSet<&str>> = functions
            .iter()
            .map(|f| f.calls.iter().map(String::as_str).collect())
            .collect();

        let mut related_pairs = 0usize;
        for (i, first) in functions.iter().enumerate() {
            for (j, second) in functions.iter().enumerate().skip(i + 1) {
                let shared = call_sets[i].intersection(&call_sets[j]).count();
                if shared < MIN_SHARED_CALLS {
                    continue;
                }
                related_pairs += 1;
                if let Some(entry) = entries.get_mut(&first.name) {
                    entry.related.push(second.name.clone());
                }
                if let Some(entry) = entries.get_mut(&second.name) {
                    entry.related.push(first.name.clone());
                }
            }
        }

        debug!(
            functions = entries.len(),
            related_pairs, "Built relationship graph"
        );

        Self { entries }
    }

    /// Entry for a function name.
    pub fn get(&self, name: &str) -> Option<&RelationshipEntry> {
        self.entries.get(name)
    }

    /// Callers of `name`, empty when the name is unknown.
    pub fn callers_of(&self, name: &str) -> &[String] {
        self.entries
            .get(name)
            .map(|entry| entry.called_by.as_slice())
            .unwrap_or(&[])
    }

    /// Related functions of `name`, empty when the name is unknown.
    pub fn related_to(&self, name: &str) -> &[String] {
        self.entries
            .get(name)
            .map(|entry| entry.related.as_slice())
            .unwrap_or(&[])
    }

    /// Entries in first-definition order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &RelationshipEntry)> {
        self.entries.iter()
    }

    /// Number of distinct function names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the graph has no functions.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of `called_by` and `related` lengths over all entries.
    pub fn relationship_degree(&self) -> usize {
        self.entries
            .values()
            .map(|entry| entry.called_by.len() + entry.related.len())
            .sum()
    }
}

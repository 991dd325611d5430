//! File cohesion derived from relationship graph density.

use crate::detectors::graph::RelationshipGraph;

/// Cohesion of a file with `function_count` functions and the given graph.
///
/// Every caller link and related link is counted once from each end, so the
/// degree sum is halved before dividing by the number of unordered function
/// pairs. The result is clamped to 1.0; files with fewer than two functions
/// are trivially cohesive.
pub fn calculate_file_cohesion(function_count: usize, graph: &RelationshipGraph) -> f64 {
    if function_count < 2 {
        return 1.0;
    }

    let possible_pairs = function_count * (function_count - 1) / 2;
    if possible_pairs == 0 {
        return 1.0;
    }

    let observed = graph.relationship_degree() as f64 / 2.0;
    (observed / possible_pairs as f64).min(1.0)
}

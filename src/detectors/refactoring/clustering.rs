//! Greedy grouping of functions into candidate modules.

use std::collections::HashSet;

use crate::detectors::graph::RelationshipGraph;
use crate::lang::common::FunctionRecord;

/// Partition the distinct function names into clusters.
///
/// Walking the function list in order, each unassigned name seeds a cluster
/// and pulls in its unassigned `related` functions (one hop only). Names
/// left over are appended to the first cluster, or form one cluster when
/// there is none. `related` names that are not functions of the file are
/// ignored, so every distinct name lands in exactly one cluster.
pub fn cluster_functions(
    functions: &[FunctionRecord],
    graph: &RelationshipGraph,
) -> Vec<Vec<String>> {
    let known: HashSet<&str> = functions.iter().map(|f| f.name.as_str()).collect();
    let mut assigned: HashSet<&str> = HashSet::with_capacity(known.len());
    let mut clusters: Vec<Vec<String>> = Vec::new();

    for function in functions {
        let seed = function.name.as_str();
        if !assigned.insert(seed) {
            continue;
        }

        let mut cluster = vec![seed.to_string()];
        for related in graph.related_to(seed) {
            if let Some(&name) = known.get(related.as_str()) {
                if assigned.insert(name) {
                    cluster.push(name.to_string());
                }
            }
        }
        clusters.push(cluster);
    }

    let mut leftovers: Vec<String> = Vec::new();
    for function in functions {
        let name = function.name.as_str();
        if assigned.insert(name) {
            leftovers.push(name.to_string());
        }
    }
    if !leftovers.is_empty() {
        match clusters.first_mut() {
            Some(first) => first.extend(leftovers),
            None => clusters.push(leftovers),
        }
    }

    clusters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn function(name: &str, calls: &[&str]) -> FunctionRecord {
        FunctionRecord {
            name: name.to_string(),
            start_line: 1,
            end_line: 2,
            parameters: Vec::new(),
            calls: calls.iter().map(|c| c.to_string()).collect(),
            has_return: false,
            is_private: false,
            source: format!("def {name}():\n    pass"),
            decorators: Vec::new(),
            complexity: 1,
        }
    }

    fn clusters_of(functions: &[FunctionRecord]) -> Vec<Vec<String>> {
        cluster_functions(functions, &RelationshipGraph::build(functions))
    }

    #[test]
    fn empty_input_has_no_clusters() {
        assert!(clusters_of(&[]).is_empty());
    }

    #[test]
    fn unrelated_functions_are_singletons() {
        let clusters = clusters_of(&[function("a", &[]), function("b", &[])]);
        assert_eq!(clusters, vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn related_functions_join_the_seed_cluster() {
        let clusters = clusters_of(&[
            function("read", &["open", "close"]),
            function("other", &[]),
            function("write", &["open", "close"]),
        ]);
        assert_eq!(clusters, vec![vec!["read", "write"], vec!["other"]]);
    }

    #[test]
    fn expansion_is_one_hop() {
        // a~b and b~c are related but a and c share only one target
        let clusters = clusters_of(&[
            function("a", &["p", "q"]),
            function("b", &["p", "q", "r", "s"]),
            function("c", &["r", "s"]),
        ]);
        assert_eq!(clusters, vec![vec!["a", "b"], vec!["c"]]);
    }

    #[test]
    fn duplicate_names_appear_once() {
        let clusters = clusters_of(&[
            function("run", &[]),
            function("run", &[]),
            function("stop", &[]),
        ]);
        assert_eq!(clusters, vec![vec!["run"], vec!["stop"]]);
    }
}

//! Property tests for causeweb-taxonomy.

use proptest::prelude::*;

use causeweb_core::models::{Node, Scale};
use causeweb_core::CancelToken;
use causeweb_taxonomy::TaxonomyGraph;

fn make_node(i: usize) -> Node {
    Node {
        id: format!("n{i}"),
        name: format!("Node {i}"),
        scale: Scale::new(((i % 7) + 1) as u8).unwrap(),
        category: "test".to_string(),
        description: String::new(),
    }
}

/// Apply a random edit script, keeping only the edits the graph accepts.
fn build_graph(n: usize, edits: &[(usize, usize, bool)]) -> TaxonomyGraph {
    let mut graph = TaxonomyGraph::new();
    for i in 0..n {
        graph.insert_node(make_node(i));
    }
    for &(parent, child, remove) in edits {
        let parent = format!("n{}", parent % n);
        let child = format!("n{}", child % n);
        if remove {
            let _ = graph.remove_edge(&parent, &child);
        } else {
            let _ = graph.add_edge(&parent, &child);
        }
    }
    graph
}

fn edit_strategy(n: usize) -> impl Strategy<Value = Vec<(usize, usize, bool)>> {
    prop::collection::vec((0..n, 0..n, prop::bool::weighted(0.2)), 0..n * 3)
}

// =============================================================================
// No node is ever its own ancestor
// =============================================================================
proptest! {
    #[test]
    fn no_self_ancestors(edits in edit_strategy(12)) {
        let graph = build_graph(12, &edits);
        for node_id in graph.node_ids() {
            let ancestors = graph.ancestors(&node_id).unwrap();
            prop_assert!(
                !ancestors.contains(&node_id),
                "{node_id} is its own ancestor"
            );
        }
    }
}

// =============================================================================
// Depth invariant: depth = max(parent depths) + 1, or 0 at roots
// =============================================================================
proptest! {
    #[test]
    fn depth_matches_parent_depths(edits in edit_strategy(12)) {
        let graph = build_graph(12, &edits);
        for node_id in graph.node_ids() {
            let parents = graph.parents_of(&node_id);
            let depth = graph.depth(&node_id).unwrap();
            if parents.is_empty() {
                prop_assert_eq!(depth, 0);
            } else {
                let expected = parents
                    .iter()
                    .map(|p| graph.depth(p).unwrap())
                    .max()
                    .unwrap()
                    + 1;
                prop_assert_eq!(depth, expected);
            }
        }
    }
}

// =============================================================================
// Caches agree with full recomputation after any edit script
// =============================================================================
proptest! {
    #[test]
    fn integrity_always_clean(edits in edit_strategy(10)) {
        let graph = build_graph(10, &edits);
        let report = graph.validate_integrity(&CancelToken::new());
        prop_assert!(
            report.is_consistent(),
            "mismatches after edit script: {:?}",
            report.mismatches
        );
    }
}

// =============================================================================
// Snapshot replay preserves structure and caches
// =============================================================================
proptest! {
    #[test]
    fn snapshot_replay_preserves_edges(edits in edit_strategy(8)) {
        let graph = build_graph(8, &edits);
        let snapshot = graph.snapshot();
        let replayed = TaxonomyGraph::from_snapshot(&snapshot).unwrap();
        prop_assert_eq!(replayed.edges(), graph.edges());
        prop_assert_eq!(replayed.snapshot(), snapshot);
    }
}

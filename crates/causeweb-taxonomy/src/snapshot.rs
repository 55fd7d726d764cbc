//! Serializable taxonomy snapshots: the outbound contract for the
//! persistence collaborator. The core itself performs no file or
//! database I/O.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use causeweb_core::models::Node;
use causeweb_core::TaxonomyError;

use crate::graph::TaxonomyGraph;

/// Cached state exported alongside each node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeCacheRecord {
    pub node_id: String,
    pub depth: usize,
    pub primary_path: String,
    pub ancestors: Vec<String>,
}

/// A full, durable-storage-ready view of one taxonomy graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxonomySnapshot {
    pub nodes: Vec<Node>,
    /// Parent→child relations, sorted.
    pub edges: Vec<(String, String)>,
    pub caches: Vec<NodeCacheRecord>,
}

impl TaxonomyGraph {
    /// Export nodes, edges, and cached state in deterministic order.
    pub fn snapshot(&self) -> TaxonomySnapshot {
        let node_ids = self.node_ids();
        let nodes = node_ids
            .iter()
            .filter_map(|id| self.node(id).cloned())
            .collect();
        let caches = node_ids
            .iter()
            .filter_map(|id| {
                self.cache().get(id).map(|entry| {
                    let mut ancestors: Vec<String> = entry.ancestors.iter().cloned().collect();
                    ancestors.sort();
                    NodeCacheRecord {
                        node_id: id.clone(),
                        depth: entry.depth,
                        primary_path: entry.primary_path.clone(),
                        ancestors,
                    }
                })
            })
            .collect();
        TaxonomySnapshot {
            nodes,
            edges: self.edges(),
            caches,
        }
    }

    /// Rebuild a graph from a snapshot by replaying nodes and edges.
    /// Caches are recomputed, not trusted from the snapshot; replay
    /// re-runs every structural guarantee.
    pub fn from_snapshot(snapshot: &TaxonomySnapshot) -> Result<Self, TaxonomyError> {
        let mut graph = TaxonomyGraph::new();
        for node in &snapshot.nodes {
            graph.insert_node(node.clone());
        }
        for (parent_id, child_id) in &snapshot.edges {
            graph.add_edge(parent_id, child_id)?;
        }
        Ok(graph)
    }
}

impl TaxonomySnapshot {
    /// Ancestor set for one node as recorded in the snapshot.
    pub fn ancestors_of(&self, node_id: &str) -> Option<HashSet<&str>> {
        self.caches
            .iter()
            .find(|record| record.node_id == node_id)
            .map(|record| record.ancestors.iter().map(String::as_str).collect())
    }
}

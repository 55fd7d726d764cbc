//! Per-graph cache of derived node state.
//!
//! Owned by exactly one `TaxonomyGraph` instance and invalidated by it
//! on every structural change; never shared across graphs.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Cached derived state for one node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// 0 for a parentless node, else `max(depth(parent)) + 1`.
    pub depth: usize,
    /// Canonical display path following the first-recorded parent chain.
    pub primary_path: String,
    /// Transitive closure of the parent relation, excluding the node itself.
    pub ancestors: HashSet<String>,
}

/// Cache of derived state for every node in one taxonomy graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyCache {
    entries: HashMap<String, CacheEntry>,
}

impl TaxonomyCache {
    pub fn get(&self, node_id: &str) -> Option<&CacheEntry> {
        self.entries.get(node_id)
    }

    pub fn insert(&mut self, node_id: String, entry: CacheEntry) {
        self.entries.insert(node_id, entry);
    }

    pub fn remove(&mut self, node_id: &str) {
        self.entries.remove(node_id);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CacheEntry)> {
        self.entries.iter()
    }

    /// Apply a batch of recomputed entries in one step, so a cascade is
    /// never observable half-applied.
    pub fn apply(&mut self, batch: HashMap<String, CacheEntry>) {
        for (node_id, entry) in batch {
            self.entries.insert(node_id, entry);
        }
    }
}

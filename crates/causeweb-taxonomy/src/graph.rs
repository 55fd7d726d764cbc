//! The taxonomy graph: nodes, parent/child relations, and the cascade
//! recomputation that keeps cached depth/path/ancestors consistent.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use causeweb_core::models::Node;
use causeweb_core::TaxonomyError;

use crate::cache::{CacheEntry, TaxonomyCache};

/// Separator used in canonical display paths.
pub const PATH_SEPARATOR: &str = "/";

/// A DAG of taxonomy nodes. Multiple parents are permitted; cycles are
/// rejected at insertion. Structural mutation must be serialized by the
/// caller (single-writer); reads never mutate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxonomyGraph {
    nodes: HashMap<String, Node>,
    /// Parent lists in insertion order; the first entry is the primary
    /// parent used for the canonical path.
    parents: HashMap<String, Vec<String>>,
    children: HashMap<String, Vec<String>>,
    cache: TaxonomyCache,
}

impl TaxonomyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Admit a node from the catalog collaborator. A duplicate id
    /// replaces the record but keeps existing relations and caches.
    pub fn insert_node(&mut self, node: Node) {
        let id = node.id.clone();
        let is_new = self.nodes.insert(id.clone(), node).is_none();
        if is_new {
            self.parents.entry(id.clone()).or_default();
            self.children.entry(id.clone()).or_default();
            self.cache.insert(
                id.clone(),
                CacheEntry {
                    depth: 0,
                    primary_path: id,
                    ancestors: HashSet::new(),
                },
            );
        }
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.nodes.contains_key(node_id)
    }

    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.get(node_id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Node ids in sorted order, for deterministic iteration.
    pub fn node_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.nodes.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn parents_of(&self, node_id: &str) -> &[String] {
        self.parents.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn children_of(&self, node_id: &str) -> &[String] {
        self.children.get(node_id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All parent→child edges, ordered by child id. A child's parents
    /// keep their recorded order, so replaying the list preserves the
    /// primary parent.
    pub fn edges(&self) -> Vec<(String, String)> {
        let mut edges = Vec::new();
        for child in self.node_ids() {
            for parent in self.parents_of(&child) {
                edges.push((parent.clone(), child.clone()));
            }
        }
        edges
    }

    pub(crate) fn cache(&self) -> &TaxonomyCache {
        &self.cache
    }

    /// Record `parent_id` as a parent of `child_id`.
    ///
    /// All-or-nothing: a rejected call leaves the graph unchanged. On
    /// success, depth/path/ancestors are recomputed for `child_id` and
    /// cascaded to every descendant.
    pub fn add_edge(&mut self, parent_id: &str, child_id: &str) -> Result<(), TaxonomyError> {
        self.require_node(parent_id)?;
        self.require_node(child_id)?;

        if parent_id == child_id {
            return Err(TaxonomyError::Cycle {
                parent_id: parent_id.to_string(),
                child_id: child_id.to_string(),
            });
        }
        // If the child is already an ancestor of the parent, closing
        // this edge would make the child its own ancestor.
        if self.compute_ancestors(parent_id).contains(child_id) {
            return Err(TaxonomyError::Cycle {
                parent_id: parent_id.to_string(),
                child_id: child_id.to_string(),
            });
        }

        if self.parents_of(child_id).iter().any(|p| p == parent_id) {
            // Relation already recorded; caches are already consistent.
            return Ok(());
        }

        self.parents
            .entry(child_id.to_string())
            .or_default()
            .push(parent_id.to_string());
        self.children
            .entry(parent_id.to_string())
            .or_default()
            .push(child_id.to_string());

        self.recompute_cascade(child_id);
        Ok(())
    }

    /// Remove the relation if present. Signals `EdgeNotFound` otherwise,
    /// leaving the graph unchanged.
    pub fn remove_edge(&mut self, parent_id: &str, child_id: &str) -> Result<(), TaxonomyError> {
        let position = self
            .parents
            .get(child_id)
            .and_then(|ps| ps.iter().position(|p| p == parent_id));
        let Some(position) = position else {
            return Err(TaxonomyError::EdgeNotFound {
                parent_id: parent_id.to_string(),
                child_id: child_id.to_string(),
            });
        };

        if let Some(ps) = self.parents.get_mut(child_id) {
            ps.remove(position);
        }
        if let Some(cs) = self.children.get_mut(parent_id) {
            cs.retain(|c| c != child_id);
        }

        self.recompute_cascade(child_id);
        Ok(())
    }

    /// Cached depth: 0 for a parentless node, else `max(depth(parent)) + 1`.
    pub fn depth(&self, node_id: &str) -> Result<usize, TaxonomyError> {
        self.require_node(node_id)?;
        Ok(self.cache.get(node_id).map(|e| e.depth).unwrap_or(0))
    }

    /// Cached canonical path, following the first-recorded parent chain.
    /// A root's path is its own id.
    pub fn primary_path(&self, node_id: &str) -> Result<String, TaxonomyError> {
        self.require_node(node_id)?;
        Ok(self
            .cache
            .get(node_id)
            .map(|e| e.primary_path.clone())
            .unwrap_or_else(|| node_id.to_string()))
    }

    /// Closure of the parent relation, excluding the node itself.
    /// Always computed by iterative traversal, never read from cache, so
    /// it stays trustworthy even against a corrupted cache.
    pub fn ancestors(&self, node_id: &str) -> Result<HashSet<String>, TaxonomyError> {
        self.require_node(node_id)?;
        Ok(self.compute_ancestors(node_id))
    }

    /// Closure of the child relation, excluding the node itself.
    pub fn descendants(&self, node_id: &str) -> Result<HashSet<String>, TaxonomyError> {
        self.require_node(node_id)?;
        Ok(self.closure(node_id, &self.children))
    }

    fn require_node(&self, node_id: &str) -> Result<(), TaxonomyError> {
        if self.contains(node_id) {
            Ok(())
        } else {
            Err(TaxonomyError::ReferentialIntegrity {
                node_id: node_id.to_string(),
            })
        }
    }

    pub(crate) fn compute_ancestors(&self, node_id: &str) -> HashSet<String> {
        self.closure(node_id, &self.parents)
    }

    /// Iterative reachability closure with an explicit stack and visited
    /// set. Tolerates arbitrarily deep hierarchies and terminates even if
    /// a structural defect were to introduce a cycle.
    fn closure(&self, node_id: &str, relation: &HashMap<String, Vec<String>>) -> HashSet<String> {
        let mut visited: HashSet<String> = HashSet::new();
        let mut stack: Vec<&String> = relation
            .get(node_id)
            .map(|links| links.iter().collect())
            .unwrap_or_default();

        while let Some(current) = stack.pop() {
            if current.as_str() == node_id || !visited.insert(current.clone()) {
                continue;
            }
            if let Some(links) = relation.get(current) {
                stack.extend(links.iter());
            }
        }
        visited
    }

    /// Depth of `node_id`, memoized per computation pass via `memo`.
    /// Iterative: parents are pushed on an explicit stack until resolved.
    pub(crate) fn compute_depth(&self, node_id: &str, memo: &mut HashMap<String, usize>) -> usize {
        if let Some(&depth) = memo.get(node_id) {
            return depth;
        }
        let mut stack: Vec<String> = vec![node_id.to_string()];
        let mut on_stack: HashSet<String> = HashSet::new();
        on_stack.insert(node_id.to_string());

        while let Some(top) = stack.last().cloned() {
            if memo.contains_key(&top) {
                on_stack.remove(&top);
                stack.pop();
                continue;
            }
            let parent_ids = self.parents_of(&top);
            let pending: Vec<String> = parent_ids
                .iter()
                .filter(|p| !memo.contains_key(*p) && !on_stack.contains(*p))
                .cloned()
                .collect();
            if pending.is_empty() {
                // Parents still on the stack (a defect-induced cycle)
                // are skipped rather than looped on.
                let depth = parent_ids
                    .iter()
                    .filter_map(|p| memo.get(p))
                    .map(|d| d + 1)
                    .max()
                    .unwrap_or(0);
                memo.insert(top.clone(), depth);
                on_stack.remove(&top);
                stack.pop();
            } else {
                for parent in pending {
                    on_stack.insert(parent.clone());
                    stack.push(parent);
                }
            }
        }
        memo.get(node_id).copied().unwrap_or(0)
    }

    /// Canonical path: the first-recorded parent chain, root first,
    /// joined with [`PATH_SEPARATOR`].
    pub(crate) fn compute_primary_path(&self, node_id: &str) -> String {
        let mut segments: Vec<&str> = vec![node_id];
        let mut visited: HashSet<&str> = HashSet::new();
        visited.insert(node_id);

        let mut current = node_id;
        while let Some(primary) = self.parents_of(current).first() {
            let primary = primary.as_str();
            if !visited.insert(primary) {
                break;
            }
            segments.push(primary);
            current = primary;
        }
        segments.reverse();
        segments.join(PATH_SEPARATOR)
    }

    /// Recompute cached state for `changed_id` and every descendant.
    /// Entries are computed into a batch first and applied in one step.
    fn recompute_cascade(&mut self, changed_id: &str) {
        let mut affected: Vec<String> = self
            .closure(changed_id, &self.children)
            .into_iter()
            .collect();
        affected.push(changed_id.to_string());
        affected.sort();

        // Depths outside the affected set are still valid; seed the memo
        // with them so the pass only recomputes what changed.
        let affected_set: HashSet<&String> = affected.iter().collect();
        let mut memo: HashMap<String, usize> = HashMap::new();
        for (node_id, entry) in self.cache.iter() {
            if !affected_set.contains(node_id) {
                memo.insert(node_id.clone(), entry.depth);
            }
        }

        let mut batch: HashMap<String, CacheEntry> = HashMap::new();
        for node_id in &affected {
            let depth = self.compute_depth(node_id, &mut memo);
            batch.insert(
                node_id.clone(),
                CacheEntry {
                    depth,
                    primary_path: self.compute_primary_path(node_id),
                    ancestors: self.compute_ancestors(node_id),
                },
            );
        }
        debug!(changed = changed_id, affected = affected.len(), "recomputed taxonomy caches");
        self.cache.apply(batch);
    }

    /// Explicit repair: recompute every cache entry from scratch.
    pub fn rebuild_caches(&mut self) {
        let mut memo: HashMap<String, usize> = HashMap::new();
        let mut batch: HashMap<String, CacheEntry> = HashMap::new();
        for node_id in self.node_ids() {
            let depth = self.compute_depth(&node_id, &mut memo);
            batch.insert(
                node_id.clone(),
                CacheEntry {
                    depth,
                    primary_path: self.compute_primary_path(&node_id),
                    ancestors: self.compute_ancestors(&node_id),
                },
            );
        }
        self.cache = TaxonomyCache::default();
        self.cache.apply(batch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causeweb_core::models::Scale;

    fn node(id: &str) -> Node {
        Node {
            id: id.to_string(),
            name: id.to_uppercase(),
            scale: Scale::new(3).unwrap(),
            category: "housing".to_string(),
            description: String::new(),
        }
    }

    fn graph(ids: &[&str]) -> TaxonomyGraph {
        let mut g = TaxonomyGraph::new();
        for id in ids {
            g.insert_node(node(id));
        }
        g
    }

    #[test]
    fn root_has_depth_zero_and_own_path() {
        let g = graph(&["a"]);
        assert_eq!(g.depth("a").unwrap(), 0);
        assert_eq!(g.primary_path("a").unwrap(), "a");
        assert!(g.ancestors("a").unwrap().is_empty());
    }

    #[test]
    fn depth_is_max_over_parents_plus_one() {
        let mut g = graph(&["a", "b", "c", "d"]);
        // a → b → d, c → d where c is a root: depth(d) = 2 via b.
        g.add_edge("a", "b").unwrap();
        g.add_edge("b", "d").unwrap();
        g.add_edge("c", "d").unwrap();
        assert_eq!(g.depth("d").unwrap(), 2);
        assert_eq!(g.primary_path("d").unwrap(), "a/b/d");
    }

    #[test]
    fn cascade_updates_descendants() {
        let mut g = graph(&["a", "b", "c"]);
        g.add_edge("b", "c").unwrap();
        assert_eq!(g.depth("c").unwrap(), 1);
        // Attaching b under a must deepen c as well.
        g.add_edge("a", "b").unwrap();
        assert_eq!(g.depth("b").unwrap(), 1);
        assert_eq!(g.depth("c").unwrap(), 2);
        assert_eq!(g.primary_path("c").unwrap(), "a/b/c");
        assert!(g.ancestors("c").unwrap().contains("a"));
    }

    #[test]
    fn cycle_rejection_is_a_true_noop() {
        let mut g = graph(&["a", "b", "c"]);
        g.add_edge("a", "b").unwrap();
        g.add_edge("b", "c").unwrap();

        let before = g.clone();
        let err = g.add_edge("c", "a").unwrap_err();
        assert!(matches!(err, TaxonomyError::Cycle { .. }));
        assert_eq!(g, before, "failed mutation must not change the graph");
        assert_eq!(g.edges(), vec![
            ("a".to_string(), "b".to_string()),
            ("b".to_string(), "c".to_string()),
        ]);
    }

    #[test]
    fn self_edge_rejected() {
        let mut g = graph(&["a"]);
        assert!(matches!(
            g.add_edge("a", "a"),
            Err(TaxonomyError::Cycle { .. })
        ));
    }

    #[test]
    fn unknown_node_rejected() {
        let mut g = graph(&["a"]);
        assert!(matches!(
            g.add_edge("a", "ghost"),
            Err(TaxonomyError::ReferentialIntegrity { .. })
        ));
    }

    #[test]
    fn remove_edge_signals_not_found() {
        let mut g = graph(&["a", "b"]);
        assert!(matches!(
            g.remove_edge("a", "b"),
            Err(TaxonomyError::EdgeNotFound { .. })
        ));
        g.add_edge("a", "b").unwrap();
        g.remove_edge("a", "b").unwrap();
        assert_eq!(g.depth("b").unwrap(), 0);
        assert_eq!(g.primary_path("b").unwrap(), "b");
    }

    #[test]
    fn deep_chain_traverses_iteratively() {
        let ids: Vec<String> = (0..2000).map(|i| format!("n{i}")).collect();
        let mut g = TaxonomyGraph::new();
        for id in &ids {
            g.insert_node(node(id));
        }
        for window in ids.windows(2) {
            g.add_edge(&window[0], &window[1]).unwrap();
        }
        assert_eq!(g.depth("n1999").unwrap(), 1999);
        assert_eq!(g.ancestors("n1999").unwrap().len(), 1999);
        assert_eq!(g.descendants("n0").unwrap().len(), 1999);
    }
}

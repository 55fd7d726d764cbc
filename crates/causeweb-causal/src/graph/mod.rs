//! Mechanism edge store: a petgraph `StableGraph` with id lookup maps.
//!
//! Unlike the taxonomy, this graph is NOT acyclic by construction:
//! mechanisms are empirically discovered, independently of the taxonomy,
//! so feedback loops are legitimate data. Downstream consumers must
//! defend against cycles explicitly.

pub mod sync;

use std::collections::{BTreeMap, HashMap, HashSet};

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use petgraph::Directed;

use causeweb_core::models::Mechanism;
use causeweb_core::MechanismError;
use causeweb_taxonomy::TaxonomyGraph;

/// Node payload: just the taxonomy node id. All node semantics live in
/// the taxonomy graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MechanismNode {
    pub node_id: String,
}

/// One outgoing hop in the adjacency view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyEdge {
    pub mechanism_id: String,
    pub target_id: String,
}

/// Directed causal edges between taxonomy nodes, keyed by mechanism id.
#[derive(Debug, Clone, Default)]
pub struct MechanismGraph {
    pub graph: StableGraph<MechanismNode, Mechanism, Directed>,
    node_indices: HashMap<String, NodeIndex>,
    edge_indices: HashMap<String, EdgeIndex>,
}

impl MechanismGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a mechanism after re-validating that both endpoints exist
    /// in the taxonomy (defense in depth; the ingestion collaborator is
    /// expected to have checked already) and that its evidence interval
    /// is ordered. A duplicate id supersedes the stored mechanism.
    pub fn add_mechanism(
        &mut self,
        mechanism: Mechanism,
        taxonomy: &TaxonomyGraph,
    ) -> Result<(), MechanismError> {
        for node_id in [&mechanism.from_node_id, &mechanism.to_node_id] {
            if !taxonomy.contains(node_id) {
                return Err(MechanismError::ReferentialIntegrity {
                    mechanism_id: mechanism.id.clone(),
                    node_id: node_id.clone(),
                });
            }
        }
        mechanism.validate_interval()?;

        if self.edge_indices.contains_key(&mechanism.id) {
            // Superseded, not mutated: drop the old edge and re-insert.
            let _ = self.remove_mechanism(&mechanism.id);
        }

        let from = self.ensure_node(&mechanism.from_node_id);
        let to = self.ensure_node(&mechanism.to_node_id);
        let id = mechanism.id.clone();
        let edge = self.graph.add_edge(from, to, mechanism);
        self.edge_indices.insert(id, edge);
        Ok(())
    }

    /// Remove a mechanism by id, returning it.
    pub fn remove_mechanism(&mut self, mechanism_id: &str) -> Result<Mechanism, MechanismError> {
        let edge = self.edge_indices.remove(mechanism_id).ok_or_else(|| {
            MechanismError::UnknownMechanism {
                mechanism_id: mechanism_id.to_string(),
            }
        })?;
        self.graph
            .remove_edge(edge)
            .ok_or_else(|| MechanismError::UnknownMechanism {
                mechanism_id: mechanism_id.to_string(),
            })
    }

    pub fn mechanism(&self, mechanism_id: &str) -> Option<&Mechanism> {
        self.edge_indices
            .get(mechanism_id)
            .and_then(|&edge| self.graph.edge_weight(edge))
    }

    /// All mechanisms, sorted by id.
    pub fn mechanisms(&self) -> Vec<&Mechanism> {
        let mut all: Vec<&Mechanism> = self.graph.edge_weights().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub fn mechanism_count(&self) -> usize {
        self.edge_indices.len()
    }

    /// Node id → outgoing hops, deterministically ordered. This is the
    /// only view the pathway enumerator consumes.
    pub fn adjacency(&self) -> BTreeMap<String, Vec<AdjacencyEdge>> {
        let mut adjacency: BTreeMap<String, Vec<AdjacencyEdge>> = BTreeMap::new();
        for mechanism in self.graph.edge_weights() {
            adjacency
                .entry(mechanism.from_node_id.clone())
                .or_default()
                .push(AdjacencyEdge {
                    mechanism_id: mechanism.id.clone(),
                    target_id: mechanism.to_node_id.clone(),
                });
        }
        for edges in adjacency.values_mut() {
            edges.sort_by(|a, b| {
                (&a.target_id, &a.mechanism_id).cmp(&(&b.target_id, &b.mechanism_id))
            });
        }
        adjacency
    }

    /// Every node id that appears as a target of some mechanism.
    pub fn target_node_ids(&self) -> HashSet<String> {
        self.graph
            .edge_weights()
            .map(|m| m.to_node_id.clone())
            .collect()
    }

    /// Every node id that appears as either endpoint of some mechanism.
    pub fn participating_node_ids(&self) -> HashSet<String> {
        self.graph
            .edge_weights()
            .flat_map(|m| [m.from_node_id.clone(), m.to_node_id.clone()])
            .collect()
    }

    fn ensure_node(&mut self, node_id: &str) -> NodeIndex {
        if let Some(&index) = self.node_indices.get(node_id) {
            return index;
        }
        let index = self.graph.add_node(MechanismNode {
            node_id: node_id.to_string(),
        });
        self.node_indices.insert(node_id.to_string(), index);
        index
    }
}

//! Serializable mechanism snapshots for the persistence collaborator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use causeweb_core::models::{Mechanism, PosteriorWeight};
use causeweb_core::MechanismError;
use causeweb_taxonomy::TaxonomyGraph;

use super::MechanismGraph;

/// Durable-storage-ready view of the mechanism graph and its posterior
/// weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MechanismSnapshot {
    /// Mechanisms sorted by id.
    pub mechanisms: Vec<Mechanism>,
    /// Posterior weight per mechanism id, where computed.
    pub weights: BTreeMap<String, PosteriorWeight>,
}

/// Export the graph plus whatever weights have been computed.
pub fn to_snapshot(
    graph: &MechanismGraph,
    weights: &BTreeMap<String, PosteriorWeight>,
) -> MechanismSnapshot {
    MechanismSnapshot {
        mechanisms: graph.mechanisms().into_iter().cloned().collect(),
        weights: weights.clone(),
    }
}

/// Rebuild a mechanism graph from a snapshot, re-running referential
/// integrity against the given taxonomy.
pub fn from_snapshot(
    snapshot: &MechanismSnapshot,
    taxonomy: &TaxonomyGraph,
) -> Result<MechanismGraph, MechanismError> {
    let mut graph = MechanismGraph::new();
    for mechanism in &snapshot.mechanisms {
        graph.add_mechanism(mechanism.clone(), taxonomy)?;
    }
    Ok(graph)
}

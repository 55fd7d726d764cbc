use serde::{Deserialize, Serialize};

/// Taxonomy graph errors. Mutating calls are transactional: a rejected
/// call leaves the graph unchanged.
#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("unknown node: {node_id}")]
    ReferentialIntegrity { node_id: String },

    #[error("edge {parent_id} -> {child_id} would create a cycle")]
    Cycle { parent_id: String, child_id: String },

    #[error("edge {parent_id} -> {child_id} not found")]
    EdgeNotFound { parent_id: String, child_id: String },

    #[error("cached values disagree with recomputation on {} node(s)", .mismatches.len())]
    InconsistentCache { mismatches: Vec<CacheMismatch> },
}

/// A single node whose cached value disagrees with a fresh recomputation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheMismatch {
    pub node_id: String,
    /// Which cached field disagrees: "depth", "primary_path", or "ancestors".
    pub field: String,
    pub cached: String,
    pub recomputed: String,
}

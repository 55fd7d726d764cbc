use serde::{Deserialize, Serialize};

/// An ordered chain of 2+ mechanisms forming a multi-hop causal route
/// from a root node (a node that is never the target of any mechanism).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pathway {
    /// Synthetic, deterministic id assigned at enumeration time.
    pub id: String,
    /// Nodes visited, root first. Always `mechanism_ids.len() + 1` long.
    pub node_ids: Vec<String>,
    /// Mechanisms traversed, in order.
    pub mechanism_ids: Vec<String>,
}

impl Pathway {
    /// Number of mechanism hops.
    pub fn len(&self) -> usize {
        self.mechanism_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mechanism_ids.is_empty()
    }
}

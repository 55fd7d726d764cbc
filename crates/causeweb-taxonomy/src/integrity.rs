//! Cache integrity validation: recompute everything from scratch and
//! report disagreements. Never auto-repairs; `rebuild_caches` is the
//! explicit repair operation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use causeweb_core::errors::CacheMismatch;
use causeweb_core::{CancelToken, TaxonomyError};

use crate::graph::TaxonomyGraph;

/// Outcome of an integrity pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityReport {
    /// Nodes checked before completion or cancellation.
    pub checked: usize,
    /// True when the pass stopped early at the caller's request.
    pub cancelled: bool,
    pub mismatches: Vec<CacheMismatch>,
}

impl IntegrityReport {
    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Fail-fast view of the report.
    pub fn into_result(self) -> Result<(), TaxonomyError> {
        if self.mismatches.is_empty() {
            Ok(())
        } else {
            Err(TaxonomyError::InconsistentCache {
                mismatches: self.mismatches,
            })
        }
    }
}

impl TaxonomyGraph {
    /// Recompute depth/path/ancestors for every node from scratch and
    /// report every node whose cached value disagrees. The cancel flag
    /// is checked between nodes so a bulk pass can be aborted.
    pub fn validate_integrity(&self, cancel: &CancelToken) -> IntegrityReport {
        let mut report = IntegrityReport::default();
        let mut memo: HashMap<String, usize> = HashMap::new();

        for node_id in self.node_ids() {
            if cancel.is_cancelled() {
                report.cancelled = true;
                break;
            }
            report.checked += 1;

            let fresh_depth = self.compute_depth(&node_id, &mut memo);
            let fresh_path = self.compute_primary_path(&node_id);
            let fresh_ancestors = self.compute_ancestors(&node_id);

            let Some(cached) = self.cache().get(&node_id) else {
                report.mismatches.push(CacheMismatch {
                    node_id: node_id.clone(),
                    field: "depth".to_string(),
                    cached: "<missing>".to_string(),
                    recomputed: fresh_depth.to_string(),
                });
                continue;
            };

            if cached.depth != fresh_depth {
                report.mismatches.push(CacheMismatch {
                    node_id: node_id.clone(),
                    field: "depth".to_string(),
                    cached: cached.depth.to_string(),
                    recomputed: fresh_depth.to_string(),
                });
            }
            if cached.primary_path != fresh_path {
                report.mismatches.push(CacheMismatch {
                    node_id: node_id.clone(),
                    field: "primary_path".to_string(),
                    cached: cached.primary_path.clone(),
                    recomputed: fresh_path,
                });
            }
            if cached.ancestors != fresh_ancestors {
                report.mismatches.push(CacheMismatch {
                    node_id: node_id.clone(),
                    field: "ancestors".to_string(),
                    cached: sorted_list(cached.ancestors.iter()),
                    recomputed: sorted_list(fresh_ancestors.iter()),
                });
            }
        }

        if !report.mismatches.is_empty() {
            warn!(
                mismatches = report.mismatches.len(),
                checked = report.checked,
                "taxonomy cache inconsistency detected"
            );
        }
        report
    }
}

fn sorted_list<'a>(ids: impl Iterator<Item = &'a String>) -> String {
    let mut ids: Vec<&str> = ids.map(String::as_str).collect();
    ids.sort_unstable();
    ids.join(",")
}

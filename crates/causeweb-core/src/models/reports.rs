use serde::{Deserialize, Serialize};

/// One record rejected during a bulk ingest, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRecord {
    pub id: String,
    pub reason: String,
}

/// Outcome of a bulk ingest call. Bulk operations always return a
/// result set plus per-item rejections, never an all-or-nothing error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub accepted: usize,
    pub rejected: Vec<RejectedRecord>,
}

impl IngestReport {
    pub fn accept(&mut self) {
        self.accepted += 1;
    }

    pub fn reject(&mut self, id: impl Into<String>, reason: impl ToString) {
        self.rejected.push(RejectedRecord {
            id: id.into(),
            reason: reason.to_string(),
        });
    }
}

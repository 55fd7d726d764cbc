mod mechanism;
mod node;
mod pathway;
mod propagation;
mod reports;
mod weight;

pub use mechanism::{Direction, EvidenceGrade, EvidenceSummary, Mechanism};
pub use node::{Node, Scale};
pub use pathway::Pathway;
pub use propagation::{AggregateStats, PropagationResult, PropagationWarning};
pub use reports::{IngestReport, RejectedRecord};
pub use weight::PosteriorWeight;

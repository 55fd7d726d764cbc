//! # causeweb-core
//!
//! Foundation crate for the causeweb mechanism graph engine.
//! Defines all value objects, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod cancel;
pub mod config;
pub mod constants;
pub mod errors;
pub mod models;

// Re-export the most commonly used types at the crate root.
pub use cancel::CancelToken;
pub use config::EngineConfig;
pub use errors::{MechanismError, PropagationError, TaxonomyError};
pub use models::{
    AggregateStats, Direction, EvidenceGrade, EvidenceSummary, IngestReport, Mechanism, Node,
    Pathway, PosteriorWeight, PropagationResult, PropagationWarning, Scale,
};

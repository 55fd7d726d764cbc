//! # causeweb-causal
//!
//! The causal mechanism graph engine: evidence-graded edges between
//! taxonomy nodes, Bayesian posterior weights, acyclic pathway
//! enumeration, and seeded Monte Carlo uncertainty propagation with
//! weakest-link, geometric-mean, and compound-effect aggregation.

pub mod engine;
pub mod graph;
pub mod pathways;
pub mod propagation;
pub mod stats;
pub mod weights;

pub use engine::{AnalysisOutcome, MechanismEngine};
pub use graph::MechanismGraph;
pub use pathways::PathwayEnumerator;
pub use propagation::{PropagationOutcome, UncertaintyPropagator};
pub use weights::BayesianWeightEngine;

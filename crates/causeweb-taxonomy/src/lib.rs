//! # causeweb-taxonomy
//!
//! The taxonomic DAG of health-determinant nodes. Guarantees no node is
//! ever its own ancestor, and keeps per-node depth, canonical path, and
//! ancestor closures cached and consistent across structural changes.

pub mod cache;
pub mod graph;
pub mod integrity;
pub mod snapshot;

pub use cache::{CacheEntry, TaxonomyCache};
pub use graph::TaxonomyGraph;
pub use integrity::IntegrityReport;
pub use snapshot::TaxonomySnapshot;

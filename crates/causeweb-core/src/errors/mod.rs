mod mechanism_error;
mod propagation_error;
mod taxonomy_error;

pub use mechanism_error::MechanismError;
pub use propagation_error::PropagationError;
pub use taxonomy_error::{CacheMismatch, TaxonomyError};

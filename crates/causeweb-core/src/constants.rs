/// Causeweb engine version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// z-score for a two-sided 95% confidence interval.
pub const Z_95: f64 = 1.96;

/// Lowest taxonomy scale level (policy/structural determinants).
pub const MIN_SCALE: u8 = 1;

/// Highest taxonomy scale level (crisis endpoints).
pub const MAX_SCALE: u8 = 7;

/// Growth rate of posterior uncertainty per unit of contextual deviation.
pub const CONTEXT_UNCERTAINTY_RATE: f64 = 0.1;

/// Bounds on the contextual adjustment factor.
pub const CONTEXT_ADJUSTMENT_MIN: f64 = 0.5;
pub const CONTEXT_ADJUSTMENT_MAX: f64 = 1.5;

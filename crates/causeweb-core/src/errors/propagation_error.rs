/// Propagation errors. Per-mechanism and per-pathway problems surface as
/// warnings alongside results; only a whole-batch abort is an error.
#[derive(Debug, thiserror::Error)]
pub enum PropagationError {
    #[error("propagation cancelled before any pathway completed")]
    Cancelled,

    #[error("invalid sampling distribution for mechanism {mechanism_id}: {reason}")]
    InvalidDistribution {
        mechanism_id: String,
        reason: String,
    },
}

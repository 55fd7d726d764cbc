/// Mechanism graph errors.
#[derive(Debug, thiserror::Error)]
pub enum MechanismError {
    #[error("mechanism {mechanism_id} references unknown node {node_id}")]
    ReferentialIntegrity {
        mechanism_id: String,
        node_id: String,
    },

    #[error("mechanism {mechanism_id} has invalid interval: {reason}")]
    InvalidInterval {
        mechanism_id: String,
        reason: String,
    },

    #[error("unknown mechanism: {mechanism_id}")]
    UnknownMechanism { mechanism_id: String },
}

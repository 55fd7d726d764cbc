use serde::{Deserialize, Serialize};

use crate::errors::MechanismError;

/// Direction of a causal effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Positive,
    Negative,
}

/// GRADE-style evidence quality: A is strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EvidenceGrade {
    A,
    B,
    C,
}

/// Literature evidence backing one mechanism. Effect size and CI bounds
/// are explicit options: mechanisms arrive from extraction pipelines
/// that do not always recover a quantitative estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceSummary {
    pub quality_grade: EvidenceGrade,
    pub n_studies: u32,
    pub effect_size: Option<f64>,
    pub ci_lower: Option<f64>,
    pub ci_upper: Option<f64>,
}

impl EvidenceSummary {
    /// Both CI bounds present, in order.
    pub fn interval(&self) -> Option<(f64, f64)> {
        match (self.ci_lower, self.ci_upper) {
            (Some(lo), Some(hi)) => Some((lo, hi)),
            _ => None,
        }
    }
}

/// A directed, evidence-graded causal edge between two taxonomy nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mechanism {
    pub id: String,
    pub from_node_id: String,
    pub to_node_id: String,
    pub direction: Direction,
    pub category: String,
    pub evidence: EvidenceSummary,
}

impl Mechanism {
    /// Check the `ci_lower ≤ effect_size ≤ ci_upper` invariant for every
    /// bound that is present.
    pub fn validate_interval(&self) -> Result<(), MechanismError> {
        let invalid = |reason: String| MechanismError::InvalidInterval {
            mechanism_id: self.id.clone(),
            reason,
        };

        if let (Some(lo), Some(hi)) = (self.evidence.ci_lower, self.evidence.ci_upper) {
            if lo > hi {
                return Err(invalid(format!("ci_lower {lo} > ci_upper {hi}")));
            }
        }
        if let Some(effect) = self.evidence.effect_size {
            if let Some(lo) = self.evidence.ci_lower {
                if effect < lo {
                    return Err(invalid(format!("effect_size {effect} < ci_lower {lo}")));
                }
            }
            if let Some(hi) = self.evidence.ci_upper {
                if effect > hi {
                    return Err(invalid(format!("effect_size {effect} > ci_upper {hi}")));
                }
            }
        }
        Ok(())
    }
}

use serde::{Deserialize, Serialize};

use crate::constants::{MAX_SCALE, MIN_SCALE};

/// Scale level of a taxonomy node: 1 = policy/structural determinant,
/// 7 = crisis endpoint. Assigned externally; the core only range-checks it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Scale(u8);

impl Scale {
    pub fn new(level: u8) -> Option<Self> {
        (MIN_SCALE..=MAX_SCALE).contains(&level).then_some(Self(level))
    }

    pub fn level(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Scale {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Scale::new(level).ok_or_else(|| format!("scale {level} outside {MIN_SCALE}..={MAX_SCALE}"))
    }
}

impl From<Scale> for u8 {
    fn from(scale: Scale) -> u8 {
        scale.0
    }
}

/// A typed concept in the health-determinant taxonomy.
///
/// Parent relations are owned by the taxonomy graph, not the node;
/// cached depth/path/ancestors live in the graph's cache object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub scale: Scale,
    pub category: String,
    pub description: String,
}

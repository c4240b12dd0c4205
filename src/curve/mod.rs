//! Feature Response Curve.
//!
//! The curve plots, for a growing budget of tolerated features, the fraction of
//! the genome covered by the contigs that fit in that budget when contigs are
//! taken from most to least feature dense. A curve that rises quickly belongs
//! to an assembly whose features sit in few, short contigs.

use serde::{Deserialize, Serialize};

pub mod assembler;

/// One point of the curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrcPoint {
    /// Feature-count threshold
    pub features: f64,
    /// Fraction of the genome covered by the contigs within the threshold
    pub coverage: f64,
}

/// Ordered curve points, non-decreasing in both coordinates
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrcCurve {
    points: Vec<FrcPoint>,
}

impl FrcCurve {
    #[must_use]
    pub fn new(points: Vec<FrcPoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[FrcPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Coverage reached with every feature tolerated
    #[must_use]
    pub fn final_coverage(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.coverage)
    }
}

use serde::{Deserialize, Serialize};

/// Mis-assembly indicator raised when a window deviates from the genome baseline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureKind {
    LowCoverage,
    HighCoverage,
    LowNormal,
    HighNormal,
    HighSingle,
    HighSpanning,
    HighOutie,
    Compression,
    Stretch,
}

impl FeatureKind {
    /// All kinds, in reporting order
    pub const ALL: [FeatureKind; 9] = [
        FeatureKind::LowCoverage,
        FeatureKind::HighCoverage,
        FeatureKind::LowNormal,
        FeatureKind::HighNormal,
        FeatureKind::HighSingle,
        FeatureKind::HighSpanning,
        FeatureKind::HighOutie,
        FeatureKind::Compression,
        FeatureKind::Stretch,
    ];

    /// Position of this kind in [`FeatureKind::ALL`]
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Self::LowCoverage => 0,
            Self::HighCoverage => 1,
            Self::LowNormal => 2,
            Self::HighNormal => 3,
            Self::HighSingle => 4,
            Self::HighSpanning => 5,
            Self::HighOutie => 6,
            Self::Compression => 7,
            Self::Stretch => 8,
        }
    }
}

impl std::fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::LowCoverage => "LowCoverage",
            Self::HighCoverage => "HighCoverage",
            Self::LowNormal => "LowNormal",
            Self::HighNormal => "HighNormal",
            Self::HighSingle => "HighSingle",
            Self::HighSpanning => "HighSpanning",
            Self::HighOutie => "HighOutie",
            Self::Compression => "Compression",
            Self::Stretch => "Stretch",
        };
        write!(f, "{name}")
    }
}

/// Genome-wide coverage ratios and insert-size distribution from the first pass.
///
/// Every ratio is an accumulated length divided by the genome length, so it
/// reads as a depth of coverage. All ratios are 0 for an empty genome.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GlobalBaseline {
    /// Read coverage (all informative reads)
    pub c_a: f64,
    /// Span coverage of correctly mated inserts
    pub s_a: f64,
    /// Coverage by correctly mated reads
    pub c_m: f64,
    /// Coverage by wrongly oriented or wrongly distanced reads
    pub c_w: f64,
    /// Coverage by singletons
    pub c_s: f64,
    /// Coverage by reads whose mate is on a different contig
    pub c_c: f64,
    pub insert_mean: f64,
    pub insert_std: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_all() {
        for (i, kind) in FeatureKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(FeatureKind::HighOutie.to_string(), "HighOutie");
        assert_eq!(FeatureKind::Stretch.to_string(), "Stretch");
    }
}

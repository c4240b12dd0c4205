use serde::{Deserialize, Serialize};

use crate::core::types::FeatureKind;

/// Feature counts collected over the windows of one contig
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContigFeatureProfile {
    /// Reference sequence id in the alignment header
    pub reference_id: usize,

    /// Contig name (diagnostics only)
    pub name: String,

    /// Contig length as reported by the header
    pub length: u64,

    /// Counts indexed by [`FeatureKind::index`]
    feature_counts: [u64; 9],

    pub total_features: u64,
}

impl ContigFeatureProfile {
    pub fn new(reference_id: usize, name: impl Into<String>, length: u64) -> Self {
        Self {
            reference_id,
            name: name.into(),
            length,
            feature_counts: [0; 9],
            total_features: 0,
        }
    }

    pub fn record(&mut self, kind: FeatureKind) {
        self.feature_counts[kind.index()] += 1;
        self.total_features += 1;
    }

    #[must_use]
    pub fn count(&self, kind: FeatureKind) -> u64 {
        self.feature_counts[kind.index()]
    }

    /// Features per base; 0 for a zero-length contig
    #[must_use]
    pub fn feature_density(&self) -> f64 {
        if self.length == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        {
            self.total_features as f64 / self.length as f64
        }
    }
}

/// Profiles of every contig seen in the alignment stream, in stream order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeatureProfiles {
    pub contigs: Vec<ContigFeatureProfile>,
}

impl FeatureProfiles {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, profile: ContigFeatureProfile) {
        self.contigs.push(profile);
    }

    #[must_use]
    pub fn total_features(&self) -> u64 {
        self.contigs.iter().map(|c| c.total_features).sum()
    }

    #[must_use]
    pub fn total_length(&self) -> u64 {
        self.contigs.iter().map(|c| c.length).sum()
    }

    /// Sum of one feature kind over all contigs
    #[must_use]
    pub fn count(&self, kind: FeatureKind) -> u64 {
        self.contigs.iter().map(|c| c.count(kind)).sum()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.contigs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.contigs.is_empty()
    }
}

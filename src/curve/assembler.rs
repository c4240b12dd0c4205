use std::cmp::Ordering;

use tracing::debug;

use crate::core::profile::{ContigFeatureProfile, FeatureProfiles};
use crate::curve::{FrcCurve, FrcPoint};

/// Number of equal steps between 0 and the total feature count
pub const CURVE_STEPS: u32 = 100;

/// Builds the curve from completed contig profiles
#[derive(Debug, Clone, Copy, Default)]
pub struct FrcAssembler {
    estimated_genome_size: Option<u64>,
}

impl FrcAssembler {
    /// `estimated_genome_size` is the coverage denominator; without it the
    /// summed contig length is used
    #[must_use]
    pub fn new(estimated_genome_size: Option<u64>) -> Self {
        Self {
            estimated_genome_size,
        }
    }

    /// Genome size the coverage fractions are relative to
    #[must_use]
    pub fn genome_size(&self, profiles: &FeatureProfiles) -> u64 {
        self.estimated_genome_size
            .unwrap_or_else(|| profiles.total_length())
    }

    /// Assemble the curve.
    ///
    /// Contigs are ranked by descending feature density, ties broken by
    /// descending length and then by stream order. For each of the 101
    /// thresholds `total * i / 100` the longest ranked prefix whose cumulative
    /// feature count stays within the threshold contributes its length.
    /// Without any feature the curve is the single point `(0, total length / genome)`.
    #[must_use]
    pub fn assemble(&self, profiles: &FeatureProfiles) -> FrcCurve {
        let genome = self.genome_size(profiles);
        let total = profiles.total_features();

        if total == 0 {
            return FrcCurve::new(vec![FrcPoint {
                features: 0.0,
                coverage: fraction(profiles.total_length(), genome),
            }]);
        }

        let ranked = rank(profiles);

        #[allow(clippy::cast_precision_loss)]
        let total = total as f64;
        let mut points = Vec::with_capacity(CURVE_STEPS as usize + 1);
        let mut next = 0;
        let mut cumulative_features = 0u64;
        let mut covered = 0u64;

        for step in 0..=CURVE_STEPS {
            let threshold = total * f64::from(step) / f64::from(CURVE_STEPS);
            while let Some(contig) = ranked.get(next) {
                let with_contig = cumulative_features + contig.total_features;
                #[allow(clippy::cast_precision_loss)]
                let exceeds = with_contig as f64 > threshold;
                if exceeds {
                    break;
                }
                cumulative_features = with_contig;
                covered += contig.length;
                next += 1;
            }
            points.push(FrcPoint {
                features: threshold,
                coverage: fraction(covered, genome),
            });
        }

        debug!(
            contigs = ranked.len(),
            genome_size = genome,
            final_coverage = fraction(covered, genome),
            "Assembled FRC"
        );

        FrcCurve::new(points)
    }
}

fn rank(profiles: &FeatureProfiles) -> Vec<&ContigFeatureProfile> {
    let mut ranked: Vec<(usize, &ContigFeatureProfile)> =
        profiles.contigs.iter().enumerate().collect();
    ranked.sort_by(|(ia, a), (ib, b)| compare_density(a, b).then_with(|| ia.cmp(ib)));
    ranked.into_iter().map(|(_, profile)| profile).collect()
}

fn fraction(length: u64, genome: u64) -> f64 {
    if genome == 0 {
        return 0.0;
    }
    #[allow(clippy::cast_precision_loss)]
    {
        length as f64 / genome as f64
    }
}

/// Descending feature density, then descending length
#[must_use]
pub fn compare_density(a: &ContigFeatureProfile, b: &ContigFeatureProfile) -> Ordering {
    b.feature_density()
        .total_cmp(&a.feature_density())
        .then_with(|| b.length.cmp(&a.length))
}

use serde::{Deserialize, Serialize};

use crate::analysis::window::WindowAccumulator;
use crate::config::FeatureThresholds;
use crate::core::types::{FeatureKind, GlobalBaseline};
use crate::utils::validation::safe_ratio;

/// Value reported for the CE statistic of a window without usable inserts
pub const CE_NO_DATA: f64 = -100.0;

/// Local ratios of a closed window.
///
/// Each ratio is an accumulated length divided by the window length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSummary {
    pub start: i64,
    pub end: i64,
    pub c_a: f64,
    pub s_a: f64,
    pub c_m: f64,
    pub c_w: f64,
    pub c_s: f64,
    pub c_c: f64,
    pub inserts: u64,
    /// CE z-score; `None` without inserts or without a genome-wide spread
    pub ce_statistic: Option<f64>,
}

impl WindowSummary {
    #[must_use]
    pub fn new(window: &WindowAccumulator, baseline: &GlobalBaseline) -> Self {
        let length = window.length();
        Self {
            start: window.start,
            end: window.end,
            c_a: safe_ratio(window.reads_length, length),
            s_a: safe_ratio(window.inserts_length, length),
            c_m: safe_ratio(window.correctly_mated_length, length),
            c_w: safe_ratio(
                window.wrongly_oriented_length + window.wrongly_distanced_length,
                length,
            ),
            c_s: safe_ratio(window.singleton_length, length),
            c_c: safe_ratio(window.different_contig_length, length),
            inserts: window.inserts,
            ce_statistic: ce_statistic(window, baseline),
        }
    }

    /// CE statistic with [`CE_NO_DATA`] standing in for a missing value
    #[must_use]
    pub fn ce_or_sentinel(&self) -> f64 {
        self.ce_statistic.unwrap_or(CE_NO_DATA)
    }
}

/// `(local_mean - mean) / (std / sqrt(n))` over the window's inserts
fn ce_statistic(window: &WindowAccumulator, baseline: &GlobalBaseline) -> Option<f64> {
    if window.inserts == 0 || !(baseline.insert_std > 0.0) {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = window.inserts as f64;
    let local_mean = safe_ratio(window.inserts_length, window.inserts);
    let z = (local_mean - baseline.insert_mean) / (baseline.insert_std / n.sqrt());
    z.is_finite().then_some(z)
}

/// Decides which features a closed window raises.
///
/// The same baseline is used for every window of every contig.
#[derive(Debug, Clone, Copy)]
pub struct FeatureClassifier {
    baseline: GlobalBaseline,
    thresholds: FeatureThresholds,
}

impl FeatureClassifier {
    #[must_use]
    pub fn new(baseline: GlobalBaseline, thresholds: FeatureThresholds) -> Self {
        Self {
            baseline,
            thresholds,
        }
    }

    #[must_use]
    pub fn baseline(&self) -> &GlobalBaseline {
        &self.baseline
    }

    /// Whether `kind` fires for the window
    #[must_use]
    pub fn fires(&self, kind: FeatureKind, window: &WindowSummary) -> bool {
        let t = &self.thresholds;
        let b = &self.baseline;
        match kind {
            FeatureKind::LowCoverage => window.c_a < t.low_coverage * b.c_a,
            FeatureKind::HighCoverage => window.c_a > t.high_coverage * b.c_a,
            FeatureKind::LowNormal => window.c_m < t.low_normal * b.c_m,
            FeatureKind::HighNormal => window.c_m > t.high_normal * b.c_m,
            FeatureKind::HighSingle => window.c_s > t.high_single * window.c_a,
            FeatureKind::HighSpanning => window.c_c > t.high_spanning * window.c_a,
            FeatureKind::HighOutie => window.c_w > t.high_outie * window.c_a,
            FeatureKind::Compression => window
                .ce_statistic
                .is_some_and(|z| z < -t.ce_statistic),
            FeatureKind::Stretch => window.ce_statistic.is_some_and(|z| z > t.ce_statistic),
        }
    }

    /// All features the window raises, in [`FeatureKind::ALL`] order
    #[must_use]
    pub fn classify(&self, window: &WindowSummary) -> Vec<FeatureKind> {
        FeatureKind::ALL
            .into_iter()
            .filter(|kind| self.fires(*kind, window))
            .collect()
    }
}

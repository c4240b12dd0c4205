use serde::Serialize;
use tracing::info;

use crate::analysis::classifier::FeatureClassifier;
use crate::analysis::global_pass::{run_global_pass, GlobalStatistics};
use crate::analysis::window_pass::run_window_pass;
use crate::analysis::AnalysisError;
use crate::config::FrcConfig;
use crate::core::profile::FeatureProfiles;
use crate::core::types::GlobalBaseline;
use crate::curve::assembler::FrcAssembler;
use crate::curve::FrcCurve;
use crate::parsing::AlignmentSource;

/// Everything a full run produces
#[derive(Debug, Clone, Serialize)]
pub struct FrcReport {
    pub statistics: GlobalStatistics,
    pub baseline: GlobalBaseline,
    pub profiles: FeatureProfiles,
    pub curve: FrcCurve,
    /// Denominator used for the coverage fractions
    pub genome_size: u64,
    /// Windows closed during the second pass
    pub windows: u64,
}

/// Runs the two statistics passes and assembles the curve
#[derive(Debug, Clone)]
pub struct FrcEngine {
    config: FrcConfig,
}

impl FrcEngine {
    /// # Errors
    ///
    /// Returns `AnalysisError::Invalid` if the config does not validate.
    pub fn new(config: FrcConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &FrcConfig {
        &self.config
    }

    /// Pass 1 only
    ///
    /// # Errors
    ///
    /// Returns any error of the global pass.
    pub fn global_statistics<S: AlignmentSource + ?Sized>(
        &self,
        source: &mut S,
    ) -> Result<GlobalStatistics, AnalysisError> {
        run_global_pass(source, self.config.insert_bounds())
    }

    /// Both passes and the curve.
    ///
    /// The source is consumed from its current position for pass 1 and
    /// rewound before pass 2.
    ///
    /// # Errors
    ///
    /// Returns the first error of either pass, or a `SourceError` if the
    /// source cannot be rewound. No partial result is returned.
    pub fn run<S: AlignmentSource + ?Sized>(&self, source: &mut S) -> Result<FrcReport, AnalysisError> {
        let statistics = self.global_statistics(source)?;
        let baseline = statistics.baseline();
        info!(
            c_a = baseline.c_a,
            c_m = baseline.c_m,
            insert_mean = baseline.insert_mean,
            insert_std = baseline.insert_std,
            "Baseline"
        );

        source.reopen()?;

        let classifier = FeatureClassifier::new(baseline, self.config.thresholds);
        let windows = run_window_pass(
            source,
            &classifier,
            self.config.insert_bounds(),
            self.config.window_size,
        )?;

        let assembler = FrcAssembler::new(self.config.estimated_genome_size);
        let genome_size = assembler.genome_size(&windows.profiles);
        let curve = assembler.assemble(&windows.profiles);

        Ok(FrcReport {
            statistics,
            baseline,
            profiles: windows.profiles,
            curve,
            genome_size,
            windows: windows.windows,
        })
    }
}

use tracing::{debug, info};

use crate::analysis::classifier::{FeatureClassifier, WindowSummary};
use crate::analysis::contigs::{ContigInfo, ContigTracker};
use crate::analysis::window::{WindowAccumulator, WindowTiling};
use crate::analysis::AnalysisError;
use crate::core::pairing::{classify, InsertBounds};
use crate::core::profile::{ContigFeatureProfile, FeatureProfiles};
use crate::parsing::AlignmentSource;

/// Output of the window pass
#[derive(Debug, Clone, Default)]
pub struct WindowPassOutput {
    pub profiles: FeatureProfiles,
    /// Windows closed over all contigs
    pub windows: u64,
}

/// Window state of the contig currently being read
struct ContigWindows {
    profile: ContigFeatureProfile,
    tiling: WindowTiling,
    index: usize,
    window: WindowAccumulator,
}

impl ContigWindows {
    fn new(contig: ContigInfo, window_size: u64) -> Self {
        let tiling = WindowTiling::new(contig.length, window_size);
        let (start, end) = tiling.bounds(0);
        Self {
            profile: ContigFeatureProfile::new(contig.reference_id, contig.name, contig.length),
            tiling,
            index: 0,
            window: WindowAccumulator::new(start, end),
        }
    }

    fn close(&mut self, classifier: &FeatureClassifier) {
        let summary = WindowSummary::new(&self.window, classifier.baseline());
        let features = classifier.classify(&summary);
        for kind in &features {
            self.profile.record(*kind);
        }
        debug!(
            contig = %self.profile.name,
            start = summary.start,
            end = summary.end,
            c_a = summary.c_a,
            ce = summary.ce_or_sentinel(),
            features = features.len(),
            "Closed window"
        );
    }

    /// Close windows until `target` is the open one; returns the number closed.
    /// A target behind the open window leaves it open.
    fn advance_to(&mut self, target: usize, classifier: &FeatureClassifier) -> u64 {
        let mut closed = 0;
        while self.index < target {
            self.close(classifier);
            closed += 1;
            self.index += 1;
            let (start, end) = self.tiling.bounds(self.index);
            self.window.reset(start, end);
        }
        closed
    }

    /// Close the open window and every window after it
    fn finish(mut self, classifier: &FeatureClassifier) -> (ContigFeatureProfile, u64) {
        let last = self.tiling.window_count() - 1;
        let closed = self.advance_to(last, classifier);
        self.close(classifier);
        (self.profile, closed + 1)
    }
}

/// Run the window pass over the whole source.
///
/// The source is read from its current position, so callers rewind it after
/// the global pass. Each contig with at least one mapped record is tiled into
/// windows of `window_size` bases. An informative record is folded into the
/// window holding its start; every window between the previous record and this
/// one is closed and classified on the way, empty or not. On a contig change
/// and at end of stream the remaining windows of the contig are closed.
///
/// # Errors
///
/// Returns `AnalysisError::Source` for unreadable records and the contig
/// tracking errors of [`ContigTracker::enter`].
pub fn run_window_pass<S: AlignmentSource + ?Sized>(
    source: &mut S,
    classifier: &FeatureClassifier,
    bounds: InsertBounds,
    window_size: u64,
) -> Result<WindowPassOutput, AnalysisError> {
    let mut output = WindowPassOutput::default();
    let mut tracker = ContigTracker::new();
    let mut current: Option<ContigWindows> = None;

    while let Some(record) = source.next_record()? {
        let Some(reference_id) = record.reference_id.filter(|_| !record.flags.unmapped) else {
            continue;
        };

        if let Some(contig) = tracker.enter(source, reference_id, false)? {
            if let Some(previous) = current.take() {
                let (profile, closed) = previous.finish(classifier);
                output.windows += closed;
                output.profiles.push(profile);
            }
            current = Some(ContigWindows::new(contig, window_size));
        }

        if !record.is_informative() {
            continue;
        }

        let Some(state) = current.as_mut() else {
            continue;
        };
        let target = state.tiling.index_of(record.position);
        output.windows += state.advance_to(target, classifier);
        state.window.add(&record, &classify(&record, bounds));
    }

    if let Some(last) = current.take() {
        let (profile, closed) = last.finish(classifier);
        output.windows += closed;
        output.profiles.push(profile);
    }

    info!(
        contigs = output.profiles.len(),
        windows = output.windows,
        features = output.profiles.total_features(),
        "Window pass complete"
    );

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FeatureThresholds;
    use crate::core::record::AlignmentRecord;
    use crate::core::types::{FeatureKind, GlobalBaseline};
    use crate::parsing::memory::MemorySource;

    fn classifier(c_a: f64) -> FeatureClassifier {
        FeatureClassifier::new(
            GlobalBaseline {
                c_a,
                ..GlobalBaseline::default()
            },
            FeatureThresholds::default(),
        )
    }

    fn run(
        contigs: &[(&str, u64)],
        records: Vec<AlignmentRecord>,
        c_a: f64,
    ) -> WindowPassOutput {
        let mut source = MemorySource::new(contigs.iter().copied(), records);
        run_window_pass(&mut source, &classifier(c_a), InsertBounds::default(), 1000).unwrap()
    }

    #[test]
    fn test_every_window_closed() {
        // Reads only in the first window of a 5-window contig
        let records = vec![AlignmentRecord::new(0, 10, 100)];
        let output = run(&[("a", 5000)], records, 0.02);
        assert_eq!(output.windows, 5);
        let profile = &output.profiles.contigs[0];
        // 4 empty windows fall below 1/3 of the baseline coverage
        assert_eq!(profile.count(FeatureKind::LowCoverage), 4);
    }

    #[test]
    fn test_trailing_windows_of_each_contig_closed() {
        let records = vec![AlignmentRecord::new(0, 10, 100), AlignmentRecord::new(1, 10, 100)];
        let output = run(&[("a", 3000), ("b", 2500)], records, 0.02);
        assert_eq!(output.windows, 6);
        assert_eq!(output.profiles.len(), 2);
        assert_eq!(output.profiles.contigs[0].count(FeatureKind::LowCoverage), 2);
        assert_eq!(output.profiles.contigs[1].count(FeatureKind::LowCoverage), 2);
    }

    #[test]
    fn test_gap_windows_closed() {
        let records = vec![AlignmentRecord::new(0, 10, 100), AlignmentRecord::new(0, 3500, 100)];
        let output = run(&[("a", 4000)], records, 0.02);
        assert_eq!(output.windows, 4);
        // windows 1 and 2 are empty
        assert_eq!(output.profiles.contigs[0].count(FeatureKind::LowCoverage), 2);
    }

    #[test]
    fn test_zero_length_contig_gets_one_window() {
        let records = vec![AlignmentRecord::new(0, 0, 100)];
        let output = run(&[("empty", 0)], records, 0.02);
        assert_eq!(output.windows, 1);
        assert_eq!(output.profiles.contigs[0].length, 0);
    }

    #[test]
    fn test_filtered_records_still_open_contig() {
        let records = vec![AlignmentRecord::new(0, 0, 100).with_mapping_quality(0)];
        let output = run(&[("a", 2000)], records, 0.02);
        assert_eq!(output.profiles.len(), 1);
        assert_eq!(output.windows, 2);
        assert_eq!(output.profiles.contigs[0].count(FeatureKind::LowCoverage), 2);
    }

    #[test]
    fn test_unmapped_only_stream_has_no_profiles() {
        let mut record = AlignmentRecord::new(0, 0, 100);
        record.flags.unmapped = true;
        let output = run(&[("a", 2000)], vec![record], 0.02);
        assert!(output.profiles.is_empty());
        assert_eq!(output.windows, 0);
    }

    #[test]
    fn test_zero_baseline_never_low() {
        let output = run(&[("a", 3000)], vec![AlignmentRecord::new(0, 0, 100)], 0.0);
        let profile = &output.profiles.contigs[0];
        assert_eq!(profile.count(FeatureKind::LowCoverage), 0);
        assert_eq!(profile.count(FeatureKind::LowNormal), 0);
    }
}

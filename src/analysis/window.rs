use crate::core::pairing::{PairClass, Pairing};
use crate::core::record::AlignmentRecord;

/// Fixed-width windows `[i*W, min((i+1)*W, L))` covering a contig of length `L`.
///
/// A contig shorter than one window gets a single truncated window, a
/// zero-length contig a single empty window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowTiling {
    contig_length: i64,
    window_size: i64,
}

impl WindowTiling {
    #[must_use]
    pub fn new(contig_length: u64, window_size: u64) -> Self {
        Self {
            contig_length: i64::try_from(contig_length).unwrap_or(i64::MAX),
            window_size: i64::try_from(window_size.max(1)).unwrap_or(i64::MAX),
        }
    }

    #[must_use]
    pub fn window_count(&self) -> usize {
        let n = (self.contig_length + self.window_size - 1) / self.window_size;
        usize::try_from(n.max(1)).unwrap_or(usize::MAX)
    }

    /// Bounds of window `index`
    #[must_use]
    pub fn bounds(&self, index: usize) -> (i64, i64) {
        let index = i64::try_from(index).unwrap_or(i64::MAX);
        let start = index.saturating_mul(self.window_size).min(self.contig_length);
        let end = start.saturating_add(self.window_size).min(self.contig_length);
        (start, end)
    }

    /// Window holding `position`; coordinates outside the contig are clamped
    /// to the first or last window
    #[must_use]
    pub fn index_of(&self, position: i64) -> usize {
        let index = usize::try_from(position.max(0) / self.window_size).unwrap_or(usize::MAX);
        index.min(self.window_count() - 1)
    }
}

/// Statistics of the records starting inside one window
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WindowAccumulator {
    pub start: i64,
    pub end: i64,
    pub reads_length: u64,
    pub inserts: u64,
    pub inserts_length: u64,
    pub correctly_mated_length: u64,
    pub wrongly_oriented_length: u64,
    pub wrongly_distanced_length: u64,
    pub singleton_length: u64,
    pub different_contig_length: u64,
}

impl WindowAccumulator {
    #[must_use]
    pub fn new(start: i64, end: i64) -> Self {
        Self {
            start,
            end,
            ..Self::default()
        }
    }

    /// Window length in bases
    #[must_use]
    pub fn length(&self) -> u64 {
        u64::try_from(self.end - self.start).unwrap_or(0)
    }

    /// Zero every statistic and move to new bounds
    pub fn reset(&mut self, start: i64, end: i64) {
        *self = Self::new(start, end);
    }

    /// Fold one informative record and its classification into the window.
    ///
    /// A correctly mated insert is registered by read 1. Read 2 registers it
    /// only when the pair's span reaches the window start or end, i.e. when the
    /// span is not fully inside this window.
    pub fn add(&mut self, record: &AlignmentRecord, pairing: &Pairing) {
        let length = u64::from(record.aligned_length);
        self.reads_length += length;

        match pairing.class {
            PairClass::CorrectlyMated => self.correctly_mated_length += length,
            PairClass::WronglyOriented => self.wrongly_oriented_length += length,
            PairClass::WronglyDistanced => self.wrongly_distanced_length += length,
            PairClass::DifferentContig => self.different_contig_length += length,
            PairClass::Singleton => self.singleton_length += length,
        }

        let Some(span) = pairing.correct_insert() else {
            return;
        };
        let registers = if record.flags.is_read1 {
            true
        } else if record.flags.is_read2 {
            span.start <= self.start || span.end() >= self.end
        } else {
            false
        };
        if registers {
            self.inserts += 1;
            self.inserts_length += u64::try_from(span.insert).unwrap_or(0);
        }
    }
}

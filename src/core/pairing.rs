//! Paired-end classification shared by the global and the windowed pass.
//!
//! Every informative record falls into exactly one [`PairClass`]:
//!
//! | Mate placement | Insert in bounds | FR orientation | Class |
//! |----------------|------------------|----------------|-------|
//! | same contig    | yes              | yes            | `CorrectlyMated` |
//! | same contig    | yes              | no             | `WronglyOriented` |
//! | same contig    | no               | (not checked)  | `WronglyDistanced` |
//! | other contig   | -                | -              | `DifferentContig` |
//! | unmapped/none  | -                | -              | `Singleton` |

use serde::{Deserialize, Serialize};

use crate::core::record::AlignmentRecord;

/// Accepted insert-size band, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsertBounds {
    pub min: i64,
    pub max: i64,
}

impl InsertBounds {
    #[must_use]
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    #[must_use]
    pub fn contains(&self, insert: i64) -> bool {
        self.min <= insert && insert <= self.max
    }
}

impl Default for InsertBounds {
    fn default() -> Self {
        Self::new(100, 1_000_000)
    }
}

/// Category a read is assigned to by its mate placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairClass {
    CorrectlyMated,
    WronglyOriented,
    WronglyDistanced,
    DifferentContig,
    Singleton,
}

/// Outer span of a pair whose ends sit on the same contig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairSpan {
    /// Leftmost coordinate of the pair
    pub start: i64,
    /// Insert size (`end - start`)
    pub insert: i64,
}

impl PairSpan {
    #[must_use]
    pub fn end(&self) -> i64 {
        self.start + self.insert
    }
}

/// Result of classifying one record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pairing {
    pub class: PairClass,
    /// Present only when both ends are on the same contig
    pub span: Option<PairSpan>,
}

impl Pairing {
    /// Span of a correctly mated pair, the only kind that feeds insert statistics
    #[must_use]
    pub fn correct_insert(&self) -> Option<PairSpan> {
        match self.class {
            PairClass::CorrectlyMated => self.span,
            _ => None,
        }
    }
}

/// True when `record` is the leftmost end of its pair; ties go to read 1
fn is_leftmost(record: &AlignmentRecord) -> bool {
    record.position < record.mate_position
        || (record.position == record.mate_position && record.flags.is_read1)
}

/// Outer span of a same-contig pair.
///
/// Uses the aligner's template length when present. Otherwise the mate is
/// assumed to be as long as this read and the span is measured from the
/// leftmost start to the rightmost end.
#[must_use]
pub fn pair_span(record: &AlignmentRecord) -> PairSpan {
    let start = record.position.min(record.mate_position);
    let insert = match record.insert_size {
        Some(tlen) => tlen.abs(),
        None if is_leftmost(record) => {
            record.mate_position + i64::from(record.query_length) - record.position
        }
        None => record.end() - record.mate_position,
    };
    PairSpan {
        start,
        insert: insert.max(0),
    }
}

/// True when the pair faces inwards: leftmost read forward, rightmost reverse
#[must_use]
pub fn is_forward_reverse(record: &AlignmentRecord) -> bool {
    let flags = &record.flags;
    if is_leftmost(record) {
        !flags.reverse_strand && flags.mate_reverse_strand
    } else {
        flags.reverse_strand && !flags.mate_reverse_strand
    }
}

/// Classify an informative record against the insert-size band
#[must_use]
pub fn classify(record: &AlignmentRecord, bounds: InsertBounds) -> Pairing {
    if record.mate_on_same_contig() {
        let span = pair_span(record);
        let class = if !bounds.contains(span.insert) {
            PairClass::WronglyDistanced
        } else if is_forward_reverse(record) {
            PairClass::CorrectlyMated
        } else {
            PairClass::WronglyOriented
        };
        return Pairing {
            class,
            span: Some(span),
        };
    }

    let class = if !record.flags.mate_unmapped && record.mate_reference_id.is_some() {
        PairClass::DifferentContig
    } else {
        PairClass::Singleton
    };
    Pairing { class, span: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::RecordFlags;

    fn pair_end(position: i64, mate_position: i64, reverse: bool, read1: bool) -> AlignmentRecord {
        AlignmentRecord::new(0, position, 100)
            .with_mate(0, mate_position)
            .with_flags(RecordFlags {
                is_read1: read1,
                is_read2: !read1,
                reverse_strand: reverse,
                mate_reverse_strand: !reverse,
                ..RecordFlags::default()
            })
    }

    #[test]
    fn test_correctly_mated_both_ends() {
        let bounds = InsertBounds::new(100, 1000);
        let left = pair_end(1000, 1200, false, true).with_insert_size(300);
        let right = pair_end(1200, 1000, true, false).with_insert_size(-300);

        let a = classify(&left, bounds);
        let b = classify(&right, bounds);
        assert_eq!(a.class, PairClass::CorrectlyMated);
        assert_eq!(b.class, PairClass::CorrectlyMated);
        assert_eq!(a.span, b.span);
        assert_eq!(a.span.unwrap().start, 1000);
        assert_eq!(a.span.unwrap().end(), 1300);
    }

    #[test]
    fn test_wrong_orientation() {
        let bounds = InsertBounds::new(100, 1000);
        // Outie: leftmost read is reverse
        let record = pair_end(1000, 1200, true, true).with_insert_size(300);
        assert_eq!(classify(&record, bounds).class, PairClass::WronglyOriented);

        // Both forward
        let mut record = pair_end(1000, 1200, false, true).with_insert_size(300);
        record.flags.mate_reverse_strand = false;
        assert_eq!(classify(&record, bounds).class, PairClass::WronglyOriented);
    }

    #[test]
    fn test_wrong_distance_ignores_orientation() {
        let bounds = InsertBounds::new(100, 1000);
        let record = pair_end(1000, 5000, true, true).with_insert_size(4100);
        assert_eq!(classify(&record, bounds).class, PairClass::WronglyDistanced);

        let record = pair_end(1000, 1010, false, true).with_insert_size(50);
        assert_eq!(classify(&record, bounds).class, PairClass::WronglyDistanced);
    }

    #[test]
    fn test_different_contig_and_singleton() {
        let bounds = InsertBounds::default();
        let record = AlignmentRecord::new(0, 10, 100).with_mate(3, 500);
        assert_eq!(classify(&record, bounds).class, PairClass::DifferentContig);

        let record = AlignmentRecord::new(0, 10, 100);
        let pairing = classify(&record, bounds);
        assert_eq!(pairing.class, PairClass::Singleton);
        assert!(pairing.span.is_none());
    }

    #[test]
    fn test_span_without_template_length() {
        // Leftmost: mate start + read length - start
        let left = pair_end(1000, 1200, false, true);
        assert_eq!(pair_span(&left).insert, 300);

        // Rightmost: own end - mate start
        let right = pair_end(1200, 1000, true, false);
        assert_eq!(pair_span(&right).insert, 300);
        assert_eq!(pair_span(&right).start, 1000);
    }

    #[test]
    fn test_tie_goes_to_read1() {
        let bounds = InsertBounds::new(50, 1000);
        let read1 = pair_end(1000, 1000, false, true).with_insert_size(100);
        let read2 = pair_end(1000, 1000, true, false).with_insert_size(-100);
        assert_eq!(classify(&read1, bounds).class, PairClass::CorrectlyMated);
        assert_eq!(classify(&read2, bounds).class, PairClass::CorrectlyMated);
    }
}

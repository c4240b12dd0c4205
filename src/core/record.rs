use serde::{Deserialize, Serialize};

/// Mapping flags of one alignment record, decoded from the SAM FLAG field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordFlags {
    pub unmapped: bool,
    pub mate_unmapped: bool,
    pub is_read1: bool,
    pub is_read2: bool,
    pub reverse_strand: bool,
    pub mate_reverse_strand: bool,
    pub duplicate: bool,
    pub secondary: bool,
    pub qc_fail: bool,
    pub proper_pair: bool,
}

impl RecordFlags {
    /// Decode the raw SAM FLAG bits
    #[must_use]
    pub fn from_bits(bits: u16) -> Self {
        Self {
            proper_pair: bits & 0x2 != 0,
            unmapped: bits & 0x4 != 0,
            mate_unmapped: bits & 0x8 != 0,
            reverse_strand: bits & 0x10 != 0,
            mate_reverse_strand: bits & 0x20 != 0,
            is_read1: bits & 0x40 != 0,
            is_read2: bits & 0x80 != 0,
            secondary: bits & 0x100 != 0,
            qc_fail: bits & 0x200 != 0,
            duplicate: bits & 0x400 != 0,
        }
    }
}

/// One alignment record as consumed by the statistics passes.
///
/// Coordinates are 0-based. `aligned_length` is the number of reference bases
/// consumed by the alignment, `query_length` the length of the sequenced read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlignmentRecord {
    /// Contig this read aligns to (`None` when unplaced)
    pub reference_id: Option<usize>,

    /// Contig the mate aligns to (`None` when unplaced)
    pub mate_reference_id: Option<usize>,

    pub position: i64,

    pub mate_position: i64,

    pub aligned_length: u32,

    pub query_length: u32,

    /// Signed template length as recorded by the aligner (`None` when 0/absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insert_size: Option<i64>,

    /// Mapping quality; 0 means the read is not confidently placed
    pub mapping_quality: u8,

    pub flags: RecordFlags,
}

impl AlignmentRecord {
    /// A mapped, forward-strand, unpaired record at `position` on `reference_id`
    #[must_use]
    pub fn new(reference_id: usize, position: i64, aligned_length: u32) -> Self {
        Self {
            reference_id: Some(reference_id),
            mate_reference_id: None,
            position,
            mate_position: -1,
            aligned_length,
            query_length: aligned_length,
            insert_size: None,
            mapping_quality: 60,
            flags: RecordFlags {
                mate_unmapped: true,
                ..RecordFlags::default()
            },
        }
    }

    /// Place the mate of this record
    #[must_use]
    pub fn with_mate(mut self, mate_reference_id: usize, mate_position: i64) -> Self {
        self.mate_reference_id = Some(mate_reference_id);
        self.mate_position = mate_position;
        self.flags.mate_unmapped = false;
        self
    }

    #[must_use]
    pub fn with_insert_size(mut self, insert_size: i64) -> Self {
        self.insert_size = (insert_size != 0).then_some(insert_size);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: RecordFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_mapping_quality(mut self, mapping_quality: u8) -> Self {
        self.mapping_quality = mapping_quality;
        self
    }

    /// End (exclusive) of the aligned interval on the reference
    #[must_use]
    pub fn end(&self) -> i64 {
        self.position + i64::from(self.aligned_length)
    }

    /// True when the record is used for coverage and pairing statistics.
    ///
    /// Both passes go through this filter so global and per-window ratios
    /// are computed over the same reads.
    #[must_use]
    pub fn is_informative(&self) -> bool {
        !self.flags.unmapped
            && !self.flags.duplicate
            && !self.flags.secondary
            && !self.flags.qc_fail
            && self.mapping_quality > 0
    }

    /// True when both ends of the pair are placed on the same contig
    #[must_use]
    pub fn mate_on_same_contig(&self) -> bool {
        !self.flags.mate_unmapped
            && self.reference_id.is_some()
            && self.mate_reference_id == self.reference_id
    }
}

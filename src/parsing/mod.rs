//! Alignment record sources.
//!
//! Both statistics passes read the alignments through the [`AlignmentSource`]
//! trait. A source hands out records in file order, can be rewound to the first
//! record for the second pass, and answers contig length and name lookups from
//! the sequence dictionary.
//!
//! - [`alignment::AlignmentFile`]: SAM, gzip-compressed SAM and BAM files via noodles
//! - [`memory::MemorySource`]: records held in memory
//!
//! ## Example
//!
//! ```rust,no_run
//! use frc_align::parsing::alignment::AlignmentFile;
//! use frc_align::parsing::AlignmentSource;
//! use std::path::Path;
//!
//! let mut source = AlignmentFile::open(Path::new("assembly.bam")).unwrap();
//! while let Some(record) = source.next_record().unwrap() {
//!     println!("{:?} {}", record.reference_id, record.position);
//! }
//! source.reopen().unwrap();
//! ```
//!
//! ## Record fields
//!
//! | Field | SAM column | Notes |
//! |-------|------------|-------|
//! | `reference_id` | RNAME | index into the `@SQ` lines |
//! | `position` | POS | converted to 0-based |
//! | `mapping_quality` | MAPQ | 255 when missing |
//! | `aligned_length` | CIGAR | M, D, N, =, X operations |
//! | `mate_reference_id` | RNEXT | |
//! | `mate_position` | PNEXT | converted to 0-based |
//! | `insert_size` | TLEN | `None` when 0 |
//! | `query_length` | SEQ | |

use thiserror::Error;

use crate::core::record::AlignmentRecord;

pub mod alignment;
pub mod memory;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Failed to open alignment source {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt alignment record #{record}: {source}")]
    CorruptRecord {
        record: u64,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Re-readable, ordered stream of alignment records plus its sequence dictionary
pub trait AlignmentSource {
    /// Next record in file order, `None` at end of stream
    ///
    /// # Errors
    ///
    /// Returns `SourceError::CorruptRecord` if the record cannot be decoded.
    fn next_record(&mut self) -> Result<Option<AlignmentRecord>, SourceError>;

    /// Rewind to the first record
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Open` if the underlying source cannot be re-opened.
    fn reopen(&mut self) -> Result<(), SourceError>;

    /// Number of sequences in the dictionary
    fn reference_count(&self) -> usize;

    /// Length of a dictionary sequence
    fn length_of(&self, reference_id: usize) -> Option<u64>;

    /// Name of a dictionary sequence
    fn name_of(&self, reference_id: usize) -> Option<&str>;
}

//! The two statistics passes and the engine that runs them.
//!
//! 1. [`global_pass`]: one forward pass over the whole stream computes the
//!    genome-wide [`GlobalBaseline`](crate::core::types::GlobalBaseline) and the
//!    insert-size distribution.
//! 2. [`window_pass`]: after the source is rewound, a second pass slides fixed
//!    windows along each contig, accumulates per-window statistics
//!    ([`window`]) and classifies every closed window against the baseline
//!    ([`classifier`]).
//! 3. [`engine`]: runs both passes and hands the per-contig profiles to the
//!    curve assembler.
//!
//! Records must be grouped by contig: once the stream leaves a contig it may
//! not come back to it.

use thiserror::Error;

use crate::parsing::SourceError;
use crate::utils::validation::ValidationError;

pub mod classifier;
pub mod contigs;
pub mod engine;
pub mod global_pass;
pub mod window;
pub mod window_pass;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Invalid parameters: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Records are not grouped by contig: {contig} reappears after another contig")]
    UnsortedInput { contig: String },

    #[error("Record refers to reference id {id}, but the header lists only {count} sequences")]
    UnknownReference { id: usize, count: usize },
}

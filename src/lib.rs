//! # frc-align
//!
//! A library for scoring de novo assemblies with Feature Response Curves (FRC).
//!
//! Paired-end reads aligned back to an assembly carry evidence of
//! mis-assemblies: collapsed repeats pile up coverage, broken scaffolds leave
//! mates on other contigs, and compressed or expanded regions shift the insert
//! size. `frc-align` turns that evidence into per-window features and ranks
//! contigs by feature density to draw the curve of genome coverage against the
//! number of tolerated features.
//!
//! ## Features
//!
//! - **Two-pass analysis**: genome-wide baselines first, per-window deviations second
//! - **Paired-end classification**: correctly mated, wrongly oriented, wrongly
//!   distanced, different contig and singleton reads
//! - **Nine feature kinds**: coverage, mate coverage, singletons, spanning pairs,
//!   outies, compression and stretch
//! - **SAM/BAM input**: read with noodles, gzip-compressed SAM included
//!
//! ## Example
//!
//! ```rust,no_run
//! use frc_align::{AlignmentFile, FrcConfig, FrcEngine};
//! use std::path::Path;
//!
//! let mut source = AlignmentFile::open(Path::new("assembly.bam")).unwrap();
//! let engine = FrcEngine::new(FrcConfig::default()).unwrap();
//! let report = engine.run(&mut source).unwrap();
//!
//! for point in report.curve.points() {
//!     println!("{} {}", point.features, point.coverage);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Records, pairing classification, running moments, profiles
//! - [`parsing`]: Alignment sources (SAM/BAM files, in-memory records)
//! - [`analysis`]: Global pass, window pass, feature classifier, engine
//! - [`curve`]: Curve assembly
//! - [`output`]: Curve and feature table files
//! - [`config`]: Run parameters and thresholds
//! - [`cli`]: Command-line interface implementation

pub mod analysis;
pub mod cli;
pub mod config;
pub mod core;
pub mod curve;
pub mod output;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use analysis::engine::{FrcEngine, FrcReport};
pub use analysis::AnalysisError;
pub use config::FrcConfig;
pub use core::profile::{ContigFeatureProfile, FeatureProfiles};
pub use core::record::AlignmentRecord;
pub use core::types::*;
pub use curve::{FrcCurve, FrcPoint};
pub use parsing::alignment::AlignmentFile;
pub use parsing::memory::MemorySource;
pub use parsing::AlignmentSource;

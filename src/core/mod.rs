//! Core data types shared by both statistics passes.
//!
//! - [`AlignmentRecord`](record::AlignmentRecord): the fields of one alignment the passes consume
//! - [`OnlineMoments`](moments::OnlineMoments): running mean/standard deviation
//! - [`pairing`]: paired-end classification (orientation, distance, mate placement)
//! - [`GlobalBaseline`](types::GlobalBaseline), [`FeatureKind`](types::FeatureKind): baseline ratios and anomaly kinds
//! - [`ContigFeatureProfile`](profile::ContigFeatureProfile): per-contig feature counts
//!
//! ## Read classes
//!
//! | Class | Mate | Contributes to |
//! |-------|------|----------------|
//! | correctly mated | same contig, FR, insert in band | `C_M`, insert statistics |
//! | wrongly oriented | same contig, not FR, insert in band | `C_W` |
//! | wrongly distanced | same contig, insert out of band | `C_W` |
//! | different contig | other contig | `C_C` |
//! | singleton | unmapped | `C_S` |

pub mod moments;
pub mod pairing;
pub mod profile;
pub mod record;
pub mod types;

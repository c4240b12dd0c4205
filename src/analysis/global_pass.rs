use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::analysis::contigs::ContigTracker;
use crate::analysis::AnalysisError;
use crate::core::moments::OnlineMoments;
use crate::core::pairing::{classify, InsertBounds, PairClass};
use crate::core::types::GlobalBaseline;
use crate::parsing::AlignmentSource;
use crate::utils::validation::safe_ratio;

/// Read counts gathered during the global pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadCensus {
    /// Every record in the stream
    pub total_reads: u64,
    pub unmapped_reads: u64,
    /// Mapped records passing the quality/duplicate/secondary/QC filter
    pub mapped_reads: u64,
    /// Mapped records dropped by the filter
    pub filtered_reads: u64,
    /// Duplicates among the filtered records
    pub duplicates: u64,
    /// Informative records flagged as proper pairs by the aligner
    pub proper_pairs: u64,
    pub correctly_mated: u64,
    pub wrongly_oriented: u64,
    pub wrongly_distanced: u64,
    pub different_contig: u64,
    pub singletons: u64,
}

impl ReadCensus {
    /// Reads assigned to a pairing class; equals `mapped_reads`
    #[must_use]
    pub fn classified(&self) -> u64 {
        self.correctly_mated
            + self.wrongly_oriented
            + self.wrongly_distanced
            + self.different_contig
            + self.singletons
    }
}

/// Accumulated lengths and counts of the global pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalStatistics {
    pub contigs: u64,
    pub genome_length: u64,
    pub census: ReadCensus,
    /// Aligned length of all informative reads
    pub reads_length: u64,
    /// Number of correctly mated inserts (counted once per pair)
    pub inserts: u64,
    pub inserts_length: u64,
    pub correctly_mated_length: u64,
    pub wrongly_oriented_length: u64,
    pub wrongly_distanced_length: u64,
    pub singleton_length: u64,
    pub different_contig_length: u64,
    pub insert_moments: OnlineMoments,
}

impl GlobalStatistics {
    /// Genome-wide ratios; all 0 when no contig was seen
    #[must_use]
    pub fn baseline(&self) -> GlobalBaseline {
        let genome = self.genome_length;
        GlobalBaseline {
            c_a: safe_ratio(self.reads_length, genome),
            s_a: safe_ratio(self.inserts_length, genome),
            c_m: safe_ratio(self.correctly_mated_length, genome),
            c_w: safe_ratio(
                self.wrongly_oriented_length + self.wrongly_distanced_length,
                genome,
            ),
            c_s: safe_ratio(self.singleton_length, genome),
            c_c: safe_ratio(self.different_contig_length, genome),
            insert_mean: self.insert_moments.mean(),
            insert_std: self.insert_moments.stddev(),
        }
    }

    fn observe_contig(&mut self, length: u64) {
        self.contigs += 1;
        self.genome_length += length;
    }
}

/// Run the global pass over the whole source.
///
/// Unmapped records are only counted. Every mapped record registers its contig
/// (adding the contig length to the genome length on the first record of each
/// run). Informative records are classified against `bounds`; read 1 of a
/// correctly mated pair feeds the insert-size distribution.
///
/// # Errors
///
/// Returns `AnalysisError::Source` for unreadable records and the contig
/// tracking errors of [`ContigTracker::enter`].
pub fn run_global_pass<S: AlignmentSource + ?Sized>(
    source: &mut S,
    bounds: InsertBounds,
) -> Result<GlobalStatistics, AnalysisError> {
    let mut stats = GlobalStatistics::default();
    let mut tracker = ContigTracker::new();

    while let Some(record) = source.next_record()? {
        stats.census.total_reads += 1;

        let Some(reference_id) = record.reference_id.filter(|_| !record.flags.unmapped) else {
            stats.census.unmapped_reads += 1;
            continue;
        };

        if let Some(contig) = tracker.enter(source, reference_id, true)? {
            debug!(contig = %contig.name, length = contig.length, "Global pass entered contig");
            stats.observe_contig(contig.length);
        }

        if !record.is_informative() {
            stats.census.filtered_reads += 1;
            if record.flags.duplicate {
                stats.census.duplicates += 1;
            }
            continue;
        }

        stats.census.mapped_reads += 1;
        if record.flags.proper_pair {
            stats.census.proper_pairs += 1;
        }

        let length = u64::from(record.aligned_length);
        stats.reads_length += length;

        let pairing = classify(&record, bounds);
        match pairing.class {
            PairClass::CorrectlyMated => {
                stats.census.correctly_mated += 1;
                stats.correctly_mated_length += length;
            }
            PairClass::WronglyOriented => {
                stats.census.wrongly_oriented += 1;
                stats.wrongly_oriented_length += length;
            }
            PairClass::WronglyDistanced => {
                stats.census.wrongly_distanced += 1;
                stats.wrongly_distanced_length += length;
            }
            PairClass::DifferentContig => {
                stats.census.different_contig += 1;
                stats.different_contig_length += length;
            }
            PairClass::Singleton => {
                stats.census.singletons += 1;
                stats.singleton_length += length;
            }
        }

        if record.flags.is_read1 {
            if let Some(span) = pairing.correct_insert() {
                #[allow(clippy::cast_precision_loss)]
                let insert = span.insert as f64;
                stats.insert_moments.observe(insert);
                stats.inserts += 1;
                stats.inserts_length += u64::try_from(span.insert).unwrap_or(0);
            }
        }
    }

    info!(
        contigs = stats.contigs,
        genome_length = stats.genome_length,
        reads = stats.census.total_reads,
        mapped = stats.census.mapped_reads,
        inserts = stats.inserts,
        "Global statistics computed"
    );

    Ok(stats)
}

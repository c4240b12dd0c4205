use std::collections::HashSet;

use tracing::warn;

use crate::analysis::AnalysisError;
use crate::parsing::AlignmentSource;
use crate::utils::validation::check_contig_length;

/// Dictionary entry of the contig a run of records belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContigInfo {
    pub reference_id: usize,
    pub name: String,
    pub length: u64,
}

/// Follows the contig runs of a grouped record stream
#[derive(Debug, Default)]
pub struct ContigTracker {
    current: Option<usize>,
    seen: HashSet<usize>,
}

impl ContigTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record on `reference_id`.
    ///
    /// Returns the contig's dictionary entry when the record starts a new run,
    /// `None` when it continues the current one. Contig lengths below 1 are
    /// reported with a warning when `warn_invalid` is set and kept as they are.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::UnknownReference` for ids outside the dictionary
    /// and `AnalysisError::UnsortedInput` when a finished contig reappears.
    pub fn enter<S: AlignmentSource + ?Sized>(
        &mut self,
        source: &S,
        reference_id: usize,
        warn_invalid: bool,
    ) -> Result<Option<ContigInfo>, AnalysisError> {
        if self.current == Some(reference_id) {
            return Ok(None);
        }

        let length = source
            .length_of(reference_id)
            .ok_or_else(|| AnalysisError::UnknownReference {
                id: reference_id,
                count: source.reference_count(),
            })?;
        let name = source
            .name_of(reference_id)
            .map_or_else(|| reference_id.to_string(), str::to_string);

        if !self.seen.insert(reference_id) {
            return Err(AnalysisError::UnsortedInput { contig: name });
        }

        if warn_invalid {
            if let Some(msg) = check_contig_length(&name, length) {
                warn!(contig = %name, length, "{msg}");
            }
        }

        self.current = Some(reference_id);
        Ok(Some(ContigInfo {
            reference_id,
            name,
            length,
        }))
    }
}

use crate::core::record::AlignmentRecord;
use crate::parsing::{AlignmentSource, SourceError};

/// An [`AlignmentSource`] over records held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    contigs: Vec<(String, u64)>,
    records: Vec<AlignmentRecord>,
    cursor: usize,
}

impl MemorySource {
    /// `contigs` is the sequence dictionary as (name, length) pairs
    pub fn new<N: Into<String>>(
        contigs: impl IntoIterator<Item = (N, u64)>,
        records: Vec<AlignmentRecord>,
    ) -> Self {
        Self {
            contigs: contigs
                .into_iter()
                .map(|(name, length)| (name.into(), length))
                .collect(),
            records,
            cursor: 0,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[AlignmentRecord] {
        &self.records
    }
}

impl AlignmentSource for MemorySource {
    fn next_record(&mut self) -> Result<Option<AlignmentRecord>, SourceError> {
        let record = self.records.get(self.cursor).cloned();
        if record.is_some() {
            self.cursor += 1;
        }
        Ok(record)
    }

    fn reopen(&mut self) -> Result<(), SourceError> {
        self.cursor = 0;
        Ok(())
    }

    fn reference_count(&self) -> usize {
        self.contigs.len()
    }

    fn length_of(&self, reference_id: usize) -> Option<u64> {
        self.contigs.get(reference_id).map(|(_, length)| *length)
    }

    fn name_of(&self, reference_id: usize) -> Option<&str> {
        self.contigs.get(reference_id).map(|(name, _)| name.as_str())
    }
}

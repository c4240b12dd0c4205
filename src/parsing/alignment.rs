use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use noodles::sam::alignment::record::cigar::op::Kind;
use noodles::sam::alignment::RecordBuf;
use noodles::{bam, sam};
use tracing::debug;

use crate::core::record::{AlignmentRecord, RecordFlags};
use crate::parsing::{AlignmentSource, SourceError};

/// Container formats readable by [`AlignmentFile`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    Sam,
    SamGz,
    Bam,
}

impl AlignmentFormat {
    /// Detect the format from the file name
    ///
    /// # Errors
    ///
    /// Returns `SourceError::UnsupportedFormat` for anything but `.sam`,
    /// `.sam.gz` and `.bam`.
    pub fn from_path(path: &Path) -> Result<Self, SourceError> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if name.ends_with(".sam.gz") {
            Ok(Self::SamGz)
        } else if name.ends_with(".sam") {
            Ok(Self::Sam)
        } else if name.ends_with(".bam") {
            Ok(Self::Bam)
        } else {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("<none>");
            Err(SourceError::UnsupportedFormat(ext.to_string()))
        }
    }
}

/// Reads one record into a reusable buffer; SAM and BAM readers differ in type
trait RecordRead {
    fn read_into(&mut self, header: &sam::Header, record: &mut RecordBuf) -> io::Result<usize>;
}

impl<R: BufRead> RecordRead for sam::io::Reader<R> {
    fn read_into(&mut self, header: &sam::Header, record: &mut RecordBuf) -> io::Result<usize> {
        self.read_record_buf(header, record)
    }
}

impl<R: Read> RecordRead for bam::io::Reader<R> {
    fn read_into(&mut self, header: &sam::Header, record: &mut RecordBuf) -> io::Result<usize> {
        self.read_record_buf(header, record)
    }
}

/// A SAM/BAM file read through noodles
pub struct AlignmentFile {
    path: PathBuf,
    format: AlignmentFormat,
    header: sam::Header,
    names: Vec<String>,
    lengths: Vec<u64>,
    reader: Box<dyn RecordRead>,
    buf: RecordBuf,
    records_read: u64,
}

impl std::fmt::Debug for AlignmentFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignmentFile")
            .field("path", &self.path)
            .field("format", &self.format)
            .field("references", &self.names.len())
            .field("records_read", &self.records_read)
            .finish_non_exhaustive()
    }
}

impl AlignmentFile {
    /// Open an alignment file and read its header
    ///
    /// # Errors
    ///
    /// Returns `SourceError::UnsupportedFormat` for unknown extensions and
    /// `SourceError::Open` if the file or its header cannot be read.
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let format = AlignmentFormat::from_path(path)?;
        let (header, reader) = open_reader(path, format)?;

        let mut names = Vec::new();
        let mut lengths = Vec::new();
        for (name, map) in header.reference_sequences() {
            names.push(name.to_string());
            lengths.push(map.length().get() as u64);
        }

        debug!(
            path = %path.display(),
            references = names.len(),
            "Opened alignment file"
        );

        Ok(Self {
            path: path.to_path_buf(),
            format,
            header,
            names,
            lengths,
            reader,
            buf: RecordBuf::default(),
            records_read: 0,
        })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn format(&self) -> AlignmentFormat {
        self.format
    }
}

impl AlignmentSource for AlignmentFile {
    fn next_record(&mut self) -> Result<Option<AlignmentRecord>, SourceError> {
        let n = self
            .reader
            .read_into(&self.header, &mut self.buf)
            .map_err(|source| SourceError::CorruptRecord {
                record: self.records_read + 1,
                source,
            })?;

        if n == 0 {
            return Ok(None);
        }

        self.records_read += 1;
        Ok(Some(convert_record(&self.buf)))
    }

    fn reopen(&mut self) -> Result<(), SourceError> {
        let (header, reader) = open_reader(&self.path, self.format)?;
        self.header = header;
        self.reader = reader;
        self.records_read = 0;
        Ok(())
    }

    fn reference_count(&self) -> usize {
        self.names.len()
    }

    fn length_of(&self, reference_id: usize) -> Option<u64> {
        self.lengths.get(reference_id).copied()
    }

    fn name_of(&self, reference_id: usize) -> Option<&str> {
        self.names.get(reference_id).map(String::as_str)
    }
}

fn open_reader(
    path: &Path,
    format: AlignmentFormat,
) -> Result<(sam::Header, Box<dyn RecordRead>), SourceError> {
    let open_error = |source: io::Error| SourceError::Open {
        path: path.display().to_string(),
        source,
    };

    let file = File::open(path).map_err(open_error)?;

    match format {
        AlignmentFormat::Sam => {
            let mut reader = sam::io::Reader::new(BufReader::new(file));
            let header = reader.read_header().map_err(open_error)?;
            Ok((header, Box::new(reader)))
        }
        AlignmentFormat::SamGz => {
            let mut reader = sam::io::Reader::new(BufReader::new(MultiGzDecoder::new(file)));
            let header = reader.read_header().map_err(open_error)?;
            Ok((header, Box::new(reader)))
        }
        AlignmentFormat::Bam => {
            let mut reader = bam::io::Reader::new(file);
            let header = reader.read_header().map_err(open_error)?;
            Ok((header, Box::new(reader)))
        }
    }
}

/// Reference bases consumed by the CIGAR operations
fn reference_span(record: &RecordBuf) -> u32 {
    let span: usize = record
        .cigar()
        .as_ref()
        .iter()
        .filter(|op| {
            matches!(
                op.kind(),
                Kind::Match
                    | Kind::Deletion
                    | Kind::Skip
                    | Kind::SequenceMatch
                    | Kind::SequenceMismatch
            )
        })
        .map(|op| op.len())
        .sum();
    u32::try_from(span).unwrap_or(u32::MAX)
}

/// 1-based SAM position to 0-based coordinate, -1 when absent
fn zero_based(position: Option<noodles::core::Position>) -> i64 {
    position.map_or(-1, |p| i64::try_from(usize::from(p)).unwrap_or(i64::MAX) - 1)
}

fn convert_record(record: &RecordBuf) -> AlignmentRecord {
    let template_length = i64::from(record.template_length());

    AlignmentRecord {
        reference_id: record.reference_sequence_id(),
        mate_reference_id: record.mate_reference_sequence_id(),
        position: zero_based(record.alignment_start()),
        mate_position: zero_based(record.mate_alignment_start()),
        aligned_length: reference_span(record),
        query_length: u32::try_from(record.sequence().len()).unwrap_or(u32::MAX),
        insert_size: (template_length != 0).then_some(template_length),
        mapping_quality: record.mapping_quality().map_or(255, u8::from),
        flags: RecordFlags::from_bits(u16::from(record.flags())),
    }
}

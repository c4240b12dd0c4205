//! Result files.
//!
//! The curve file holds the header `features coverage` followed by one
//! `<features> <coverage>` line per point. Numbers are written with the
//! shortest representation that parses back to the same `f64`, so
//! [`parse_curve`] reproduces the assembled curve exactly.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

use crate::core::profile::FeatureProfiles;
use crate::core::types::FeatureKind;
use crate::curve::{FrcCurve, FrcPoint};

pub const CURVE_HEADER: &str = "features coverage";

#[derive(Error, Debug)]
pub enum CurveParseError {
    #[error("Failed to read curve: {0}")]
    Io(#[from] std::io::Error),

    #[error("Curve file is empty")]
    MissingHeader,

    #[error("Unexpected curve header: '{0}'")]
    BadHeader(String),

    #[error("Malformed curve line {line}: '{content}'")]
    Malformed { line: usize, content: String },
}

/// Write the curve text
///
/// # Errors
///
/// Returns any I/O error of the writer.
pub fn write_curve<W: Write>(curve: &FrcCurve, writer: &mut W) -> std::io::Result<()> {
    writeln!(writer, "{CURVE_HEADER}")?;
    for point in curve.points() {
        writeln!(writer, "{} {}", point.features, point.coverage)?;
    }
    Ok(())
}

/// Read curve text written by [`write_curve`]
///
/// # Errors
///
/// Returns `CurveParseError` if the header is missing or a line is not two numbers.
pub fn parse_curve<R: BufRead>(reader: R) -> Result<FrcCurve, CurveParseError> {
    let mut lines = reader.lines();
    let header = lines.next().ok_or(CurveParseError::MissingHeader)??;
    if header.trim() != CURVE_HEADER {
        return Err(CurveParseError::BadHeader(header));
    }

    let mut points = Vec::new();
    for (index, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let malformed = || CurveParseError::Malformed {
            line: index + 2,
            content: line.clone(),
        };
        let mut fields = line.split_whitespace();
        let (Some(features), Some(coverage), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(malformed());
        };
        let features: f64 = features.parse().map_err(|_| malformed())?;
        let coverage: f64 = coverage.parse().map_err(|_| malformed())?;
        points.push(FrcPoint { features, coverage });
    }

    Ok(FrcCurve::new(points))
}

/// Write the per-contig feature table, tab separated
///
/// # Errors
///
/// Returns any I/O error of the writer.
pub fn write_feature_table<W: Write>(
    profiles: &FeatureProfiles,
    writer: &mut W,
) -> std::io::Result<()> {
    let kinds: Vec<String> = FeatureKind::ALL.iter().map(ToString::to_string).collect();
    writeln!(writer, "contig\tlength\t{}\ttotal", kinds.join("\t"))?;

    for profile in &profiles.contigs {
        let counts: Vec<String> = FeatureKind::ALL
            .iter()
            .map(|kind| profile.count(*kind).to_string())
            .collect();
        writeln!(
            writer,
            "{}\t{}\t{}\t{}",
            profile.name,
            profile.length,
            counts.join("\t"),
            profile.total_features
        )?;
    }
    Ok(())
}

/// Output written to a temporary file next to its destination, not yet in place
#[derive(Debug)]
pub struct StagedFile {
    temp: NamedTempFile,
    path: PathBuf,
}

impl StagedFile {
    /// Destination the file is moved to by [`StagedFile::persist`]
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Move the file to its destination
    ///
    /// # Errors
    ///
    /// Returns the I/O error of the rename; the temporary file is then removed.
    pub fn persist(self) -> std::io::Result<()> {
        self.temp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}

/// Write the contents of `path` to a temporary file in the same directory.
///
/// Nothing appears at `path` until the returned file is persisted. Dropping it
/// removes the temporary file.
///
/// # Errors
///
/// Returns the error of `write`, or the I/O error of creating the temporary file.
pub fn stage<F>(path: &Path, write: F) -> std::io::Result<StagedFile>
where
    F: FnOnce(&mut BufWriter<&File>) -> std::io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temp = NamedTempFile::new_in(dir)?;
    {
        let mut writer = BufWriter::new(temp.as_file());
        write(&mut writer)?;
        writer.flush()?;
    }
    Ok(StagedFile {
        temp,
        path: path.to_path_buf(),
    })
}

/// Move staged files into place, all or none.
///
/// If a rename fails, the files already moved by this call are removed again.
///
/// # Errors
///
/// Returns the I/O error of the first failed rename.
pub fn persist_all(files: Vec<StagedFile>) -> std::io::Result<()> {
    let mut persisted: Vec<PathBuf> = Vec::with_capacity(files.len());
    for file in files {
        let path = file.path.clone();
        if let Err(e) = file.persist() {
            for done in &persisted {
                let _ = std::fs::remove_file(done);
            }
            return Err(e);
        }
        persisted.push(path);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::profile::ContigFeatureProfile;
    use std::io::Cursor;

    #[test]
    fn test_curve_text_round_trip() {
        let curve = FrcCurve::new(vec![
            FrcPoint { features: 0.0, coverage: 0.0 },
            FrcPoint { features: 0.15, coverage: 1.0 / 3.0 },
            FrcPoint { features: 15.0, coverage: 1.0 },
        ]);
        let mut buffer = Vec::new();
        write_curve(&curve, &mut buffer).unwrap();

        let text = String::from_utf8(buffer.clone()).unwrap();
        assert!(text.starts_with("features coverage\n0 0\n0.15 0.3333333333333333\n"));

        let parsed = parse_curve(Cursor::new(buffer)).unwrap();
        assert_eq!(parsed, curve);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_curve(Cursor::new("")),
            Err(CurveParseError::MissingHeader)
        ));
        assert!(matches!(
            parse_curve(Cursor::new("x y\n")),
            Err(CurveParseError::BadHeader(_))
        ));
        assert!(matches!(
            parse_curve(Cursor::new("features coverage\n1 abc\n")),
            Err(CurveParseError::Malformed { line: 2, .. })
        ));
        assert!(matches!(
            parse_curve(Cursor::new("features coverage\n1 2 3\n")),
            Err(CurveParseError::Malformed { .. })
        ));
    }

    #[test]
    fn test_feature_table() {
        let mut profile = ContigFeatureProfile::new(0, "ctg1", 2000);
        profile.record(FeatureKind::LowCoverage);
        profile.record(FeatureKind::Stretch);
        let profiles = FeatureProfiles {
            contigs: vec![profile],
        };

        let mut buffer = Vec::new();
        write_feature_table(&profiles, &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "contig\tlength\tLowCoverage\tHighCoverage\tLowNormal\tHighNormal\tHighSingle\tHighSpanning\tHighOutie\tCompression\tStretch\ttotal"
        );
        assert_eq!(lines[1], "ctg1\t2000\t1\t0\t0\t0\t0\t0\t0\t0\t1\t2");
    }

    #[test]
    fn test_failed_write_keeps_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("FRC.txt");

        stage(&path, |w| writeln!(w, "first")).unwrap().persist().unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\n");

        let failed = stage(&path, |w| {
            writeln!(w, "second")?;
            Err(std::io::Error::other("boom"))
        });
        assert!(failed.is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\n");
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_staged_files_appear_only_when_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let curve = dir.path().join("FRC.txt");
        let table = dir.path().join("features.tsv");

        let first = stage(&curve, |w| writeln!(w, "curve")).unwrap();
        assert_eq!(first.path(), curve.as_path());
        assert!(!curve.exists());

        let failed = stage(&dir.path().join("missing").join("features.tsv"), |w| {
            writeln!(w, "table")
        });
        assert!(failed.is_err());
        drop(first);
        assert!(!curve.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);

        let staged = vec![
            stage(&curve, |w| writeln!(w, "curve")).unwrap(),
            stage(&table, |w| writeln!(w, "table")).unwrap(),
        ];
        persist_all(staged).unwrap();
        assert_eq!(std::fs::read_to_string(&curve).unwrap(), "curve\n");
        assert_eq!(std::fs::read_to_string(&table).unwrap(), "table\n");
    }
}

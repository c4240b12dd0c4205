//! Library-level tests running the full analysis over SAM files and in-memory records

mod common;

use std::io::Cursor;

use frc_align::core::record::RecordFlags;
use frc_align::output::{parse_curve, write_curve};
use frc_align::{
    AlignmentFile, AlignmentRecord, AlignmentSource, FeatureKind, FrcConfig, FrcEngine,
    MemorySource,
};
use tempfile::TempDir;

use common::{even_pairs, sam_text, write_assembly_sam, Pair, READ_LENGTH};

fn memory_records(pairs: &[Pair]) -> Vec<AlignmentRecord> {
    let length = u32::try_from(READ_LENGTH).unwrap();
    let mut records = Vec::new();
    for (contig, left, insert) in pairs {
        let right = left + insert - READ_LENGTH;
        records.push(
            AlignmentRecord::new(*contig, *left, length)
                .with_mate(*contig, right)
                .with_insert_size(*insert)
                .with_flags(RecordFlags::from_bits(99)),
        );
        records.push(
            AlignmentRecord::new(*contig, right, length)
                .with_mate(*contig, *left)
                .with_insert_size(-insert)
                .with_flags(RecordFlags::from_bits(147)),
        );
    }
    records.sort_by_key(|r| (r.reference_id, r.position));
    records
}

#[test]
fn test_file_and_memory_sources_agree() {
    let tmp = TempDir::new().unwrap();
    let mut pairs = even_pairs(0, 2000);
    pairs.extend(even_pairs(1, 2000));
    let contigs = [("ctg1", 3000), ("ctg2", 2000)];

    let path = tmp.path().join("assembly.sam");
    std::fs::write(&path, sam_text(&contigs, &pairs)).unwrap();

    let engine = FrcEngine::new(FrcConfig::default()).unwrap();
    let from_file = engine.run(&mut AlignmentFile::open(&path).unwrap()).unwrap();
    let from_memory = engine
        .run(&mut MemorySource::new(contigs, memory_records(&pairs)))
        .unwrap();

    assert_eq!(from_file.statistics.census, from_memory.statistics.census);
    assert_eq!(from_file.baseline, from_memory.baseline);
    assert_eq!(from_file.profiles.contigs, from_memory.profiles.contigs);
    assert_eq!(from_file.curve, from_memory.curve);
}

#[test]
fn test_empty_tail_window_is_low_coverage() {
    let tmp = TempDir::new().unwrap();
    let path = write_assembly_sam(tmp.path());

    let engine = FrcEngine::new(FrcConfig::default()).unwrap();
    let report = engine.run(&mut AlignmentFile::open(&path).unwrap()).unwrap();

    assert_eq!(report.genome_size, 5000);
    assert_eq!(report.windows, 5);
    assert_eq!(report.statistics.census.correctly_mated, report.statistics.census.mapped_reads);
    assert!((report.baseline.insert_mean - 300.0).abs() < 1.0);

    let ctg1 = &report.profiles.contigs[0];
    let ctg2 = &report.profiles.contigs[1];
    assert_eq!(ctg1.count(FeatureKind::LowCoverage), 1);
    assert_eq!(ctg2.count(FeatureKind::LowCoverage), 0);
    assert_eq!(report.profiles.count(FeatureKind::HighSpanning), 0);
    assert_eq!(report.profiles.count(FeatureKind::HighSingle), 0);

    let points = report.curve.points();
    assert_eq!(points.len(), 101);
    assert_eq!(points[0].features, 0.0);
    assert!((report.curve.final_coverage() - 1.0).abs() < 1e-12);
    for pair in points.windows(2) {
        assert!(pair[1].features >= pair[0].features);
        assert!(pair[1].coverage >= pair[0].coverage);
    }
}

#[test]
fn test_curve_file_round_trip() {
    let tmp = TempDir::new().unwrap();
    let path = write_assembly_sam(tmp.path());

    let engine = FrcEngine::new(FrcConfig::default()).unwrap();
    let report = engine.run(&mut AlignmentFile::open(&path).unwrap()).unwrap();

    let mut text = Vec::new();
    write_curve(&report.curve, &mut text).unwrap();
    let parsed = parse_curve(Cursor::new(text)).unwrap();
    assert_eq!(parsed, report.curve);
}

#[test]
fn test_reopen_restarts_stream() {
    let tmp = TempDir::new().unwrap();
    let path = write_assembly_sam(tmp.path());
    let mut source = AlignmentFile::open(&path).unwrap();

    let mut first = 0;
    while source.next_record().unwrap().is_some() {
        first += 1;
    }
    source.reopen().unwrap();
    let mut second = 0;
    while source.next_record().unwrap().is_some() {
        second += 1;
    }
    assert!(first > 0);
    assert_eq!(first, second);
}

#[test]
fn test_unsorted_file_rejected() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("unsorted.sam");
    let mut text = sam_text(&[("ctg1", 2000), ("ctg2", 2000)], &[(0, 0, 300), (1, 0, 300)]);
    text.push_str(&format!(
        "late\t0\tctg1\t1500\t60\t{READ_LENGTH}M\t*\t0\t0\t{}\t*\n",
        "A".repeat(usize::try_from(READ_LENGTH).unwrap())
    ));
    std::fs::write(&path, text).unwrap();

    let engine = FrcEngine::new(FrcConfig::default()).unwrap();
    let result = engine.run(&mut AlignmentFile::open(&path).unwrap());
    assert!(matches!(
        result,
        Err(frc_align::AnalysisError::UnsortedInput { ref contig }) if contig == "ctg1"
    ));
}

#[test]
fn test_tight_inserts_raise_no_compression_or_stretch() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("tight.sam");
    std::fs::write(&path, sam_text(&[("ctg1", 2000)], &even_pairs(0, 2000))).unwrap();

    let engine = FrcEngine::new(FrcConfig::default()).unwrap();
    let report = engine.run(&mut AlignmentFile::open(&path).unwrap()).unwrap();

    assert_eq!(report.windows, 2);
    assert!((report.baseline.insert_mean - 300.0).abs() < 1e-9);
    assert!((report.baseline.insert_std - 10.0).abs() < 1e-9);
    assert_eq!(report.profiles.count(FeatureKind::Compression), 0);
    assert_eq!(report.profiles.count(FeatureKind::Stretch), 0);
}

//! Helpers writing small SAM files for the integration tests

#![allow(dead_code)]

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

pub const READ_LENGTH: i64 = 100;

/// One FR pair: contig index, 0-based leftmost start, insert size
pub type Pair = (usize, i64, i64);

/// SAM text with one `@SQ` line per contig and two records per pair, sorted by
/// contig then position
pub fn sam_text(contigs: &[(&str, u64)], pairs: &[Pair]) -> String {
    let mut text = String::from("@HD\tVN:1.6\tSO:coordinate\n");
    for (name, length) in contigs {
        writeln!(text, "@SQ\tSN:{name}\tLN:{length}").unwrap();
    }

    let sequence = "A".repeat(READ_LENGTH as usize);
    let mut records = Vec::new();
    for (i, (contig, left, insert)) in pairs.iter().enumerate() {
        let right = left + insert - READ_LENGTH;
        let name = contigs[*contig].0;
        records.push((
            *contig,
            *left,
            format!(
                "p{i}\t99\t{name}\t{}\t60\t{READ_LENGTH}M\t=\t{}\t{insert}\t{sequence}\t*",
                left + 1,
                right + 1
            ),
        ));
        records.push((
            *contig,
            right,
            format!(
                "p{i}\t147\t{name}\t{}\t60\t{READ_LENGTH}M\t=\t{}\t-{insert}\t{sequence}\t*",
                right + 1,
                left + 1
            ),
        ));
    }
    records.sort_by_key(|(contig, position, _)| (*contig, *position));

    for (_, _, line) in records {
        writeln!(text, "{line}").unwrap();
    }
    text
}

/// Pairs every 50 bp over `[0, covered)` of `contig`, inserts alternating 290 and 310
pub fn even_pairs(contig: usize, covered: i64) -> Vec<Pair> {
    (0..covered - 310)
        .step_by(50)
        .enumerate()
        .map(|(i, left)| (contig, left, if i % 2 == 0 { 290 } else { 310 }))
        .collect()
}

/// Two contigs; the last 1000 bp of `ctg1` have no reads
pub fn write_assembly_sam(dir: &Path) -> PathBuf {
    let mut pairs = even_pairs(0, 2000);
    pairs.extend(even_pairs(1, 2000));
    let path = dir.join("assembly.sam");
    fs::write(&path, sam_text(&[("ctg1", 3000), ("ctg2", 2000)], &pairs)).unwrap();
    path
}

//! Compute command - run both passes and write the Feature Response Curve.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::analysis::engine::{FrcEngine, FrcReport};
use crate::cli::{OutputFormat, ParameterArgs};
use crate::core::types::FeatureKind;
use crate::output::{persist_all, stage, write_curve, write_feature_table};
use crate::parsing::alignment::AlignmentFile;

/// Arguments for the compute command
#[derive(Args, Debug)]
pub struct ComputeArgs {
    /// Alignments of paired-end reads to the assembly (SAM, SAM.gz or BAM),
    /// grouped by contig
    #[arg(required = true)]
    pub alignments: PathBuf,

    /// Curve output file
    #[arg(short, long, default_value = "FRC.txt")]
    pub output: PathBuf,

    /// Also write the per-contig feature counts as TSV
    #[arg(long)]
    pub features: Option<PathBuf>,

    #[command(flatten)]
    pub params: ParameterArgs,
}

/// Execute the compute command
///
/// # Errors
///
/// Returns an error if the alignments cannot be read, the parameters are
/// invalid or an output file cannot be written. Output files are only moved
/// into place once both passes succeeded and every file was written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ComputeArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.params.resolve()?;

    if verbose {
        eprintln!(
            "Window {} bp, insert band {}..={}",
            config.window_size, config.min_insert, config.max_insert
        );
    }

    let mut source = AlignmentFile::open(&args.alignments)
        .with_context(|| format!("Failed to open {}", args.alignments.display()))?;
    let engine = FrcEngine::new(config)?;
    let report = engine
        .run(&mut source)
        .with_context(|| format!("Failed to analyze {}", args.alignments.display()))?;

    let mut staged = vec![stage(&args.output, |w| write_curve(&report.curve, w))
        .with_context(|| format!("Failed to write {}", args.output.display()))?];
    if let Some(path) = &args.features {
        staged.push(
            stage(path, |w| write_feature_table(&report.profiles, w))
                .with_context(|| format!("Failed to write {}", path.display()))?,
        );
    }
    persist_all(staged).context("Failed to move output files into place")?;

    match format {
        OutputFormat::Text => print_text(&args, &report),
        OutputFormat::Json => print_json(&args, &report)?,
        OutputFormat::Tsv => print_tsv(&args, &report),
    }

    Ok(())
}

fn print_text(args: &ComputeArgs, report: &FrcReport) {
    let census = &report.statistics.census;
    println!("\nFRC of {}", args.alignments.display());
    println!(
        "\n   Reads: {} total, {} unmapped, {} used, {} filtered",
        census.total_reads, census.unmapped_reads, census.mapped_reads, census.filtered_reads
    );
    println!(
        "   Insert size: {:.1} ± {:.1} ({} pairs)",
        report.baseline.insert_mean, report.baseline.insert_std, report.statistics.inserts
    );
    println!(
        "   Contigs: {} ({} bp), genome size {} bp, {} windows",
        report.profiles.len(),
        report.profiles.total_length(),
        report.genome_size,
        report.windows
    );

    println!("\n   Features: {}", report.profiles.total_features());
    for kind in FeatureKind::ALL {
        let count = report.profiles.count(kind);
        if count > 0 {
            println!("      {kind:<14} {count}");
        }
    }

    println!(
        "\n   Curve: {} points written to {}",
        report.curve.len(),
        args.output.display()
    );
    if let Some(path) = &args.features {
        println!("   Feature table written to {}", path.display());
    }
}

fn print_json(args: &ComputeArgs, report: &FrcReport) -> anyhow::Result<()> {
    let features: serde_json::Map<String, serde_json::Value> = FeatureKind::ALL
        .iter()
        .map(|kind| (kind.to_string(), report.profiles.count(*kind).into()))
        .collect();

    let output = serde_json::json!({
        "alignments": args.alignments.display().to_string(),
        "output": args.output.display().to_string(),
        "census": report.statistics.census,
        "baseline": report.baseline,
        "contigs": report.profiles.len(),
        "genome_size": report.genome_size,
        "windows": report.windows,
        "features": features,
        "total_features": report.profiles.total_features(),
        "curve": report.curve,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(args: &ComputeArgs, report: &FrcReport) {
    let kinds: Vec<String> = FeatureKind::ALL.iter().map(ToString::to_string).collect();
    println!(
        "alignments\tcontigs\tgenome_size\twindows\tinsert_mean\tinsert_std\t{}\ttotal_features",
        kinds.join("\t")
    );
    let counts: Vec<String> = FeatureKind::ALL
        .iter()
        .map(|kind| report.profiles.count(*kind).to_string())
        .collect();
    println!(
        "{}\t{}\t{}\t{}\t{:.4}\t{:.4}\t{}\t{}",
        args.alignments.display(),
        report.profiles.len(),
        report.genome_size,
        report.windows,
        report.baseline.insert_mean,
        report.baseline.insert_std,
        counts.join("\t"),
        report.profiles.total_features(),
    );
}

//! Stats command - run the global pass and report the baseline.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::analysis::engine::FrcEngine;
use crate::analysis::global_pass::GlobalStatistics;
use crate::cli::{OutputFormat, ParameterArgs};
use crate::parsing::alignment::AlignmentFile;

/// Arguments for the stats command
#[derive(Args, Debug)]
pub struct StatsArgs {
    /// Alignments of paired-end reads to the assembly (SAM, SAM.gz or BAM)
    #[arg(required = true)]
    pub alignments: PathBuf,

    #[command(flatten)]
    pub params: ParameterArgs,
}

/// Execute the stats command
///
/// # Errors
///
/// Returns an error if the alignments cannot be read or the parameters are invalid.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: StatsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = args.params.resolve()?;
    let mut source = AlignmentFile::open(&args.alignments)
        .with_context(|| format!("Failed to open {}", args.alignments.display()))?;

    if verbose {
        eprintln!("Reading {:?} file {}", source.format(), args.alignments.display());
    }

    let statistics = FrcEngine::new(config)?
        .global_statistics(&mut source)
        .with_context(|| format!("Failed to analyze {}", args.alignments.display()))?;

    match format {
        OutputFormat::Text => print_text(&args, &statistics),
        OutputFormat::Json => print_json(&args, &statistics)?,
        OutputFormat::Tsv => print_tsv(&args, &statistics),
    }

    Ok(())
}

fn print_text(args: &StatsArgs, statistics: &GlobalStatistics) {
    let census = &statistics.census;
    let baseline = statistics.baseline();

    println!("\nStatistics of {}", args.alignments.display());
    println!(
        "\n   Genome: {} contigs, {} bp",
        statistics.contigs, statistics.genome_length
    );
    println!(
        "   Reads: {} total, {} unmapped, {} used, {} filtered ({} duplicates)",
        census.total_reads,
        census.unmapped_reads,
        census.mapped_reads,
        census.filtered_reads,
        census.duplicates
    );
    println!("   Proper pairs (aligner flag): {}", census.proper_pairs);

    println!("\n   Pairing:");
    println!("      correctly mated    {}", census.correctly_mated);
    println!("      wrongly oriented   {}", census.wrongly_oriented);
    println!("      wrongly distanced  {}", census.wrongly_distanced);
    println!("      different contig   {}", census.different_contig);
    println!("      singletons         {}", census.singletons);
    println!("      total              {}", census.classified());

    println!("\n   Baseline coverage:");
    println!("      reads (C_A)             {:.4}", baseline.c_a);
    println!("      inserts (S_A)           {:.4}", baseline.s_a);
    println!("      correctly mated (C_M)   {:.4}", baseline.c_m);
    println!("      wrongly mated (C_W)     {:.4}", baseline.c_w);
    println!("      singletons (C_S)        {:.4}", baseline.c_s);
    println!("      different contig (C_C)  {:.4}", baseline.c_c);
    println!(
        "\n   Insert size: {:.1} ± {:.1} ({} pairs)",
        baseline.insert_mean, baseline.insert_std, statistics.inserts
    );
}

fn print_json(args: &StatsArgs, statistics: &GlobalStatistics) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "alignments": args.alignments.display().to_string(),
        "contigs": statistics.contigs,
        "genome_length": statistics.genome_length,
        "census": statistics.census,
        "inserts": statistics.inserts,
        "baseline": statistics.baseline(),
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv(args: &StatsArgs, statistics: &GlobalStatistics) {
    let census = &statistics.census;
    let baseline = statistics.baseline();

    println!(
        "alignments\tcontigs\tgenome_length\ttotal_reads\tunmapped\tmapped\tfiltered\tcorrectly_mated\twrongly_oriented\twrongly_distanced\tdifferent_contig\tsingletons\tc_a\ts_a\tc_m\tc_w\tc_s\tc_c\tinsert_mean\tinsert_std"
    );
    println!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{:.4}",
        args.alignments.display(),
        statistics.contigs,
        statistics.genome_length,
        census.total_reads,
        census.unmapped_reads,
        census.mapped_reads,
        census.filtered_reads,
        census.correctly_mated,
        census.wrongly_oriented,
        census.wrongly_distanced,
        census.different_contig,
        census.singletons,
        baseline.c_a,
        baseline.s_a,
        baseline.c_m,
        baseline.c_w,
        baseline.c_s,
        baseline.c_c,
        baseline.insert_mean,
        baseline.insert_std,
    );
}

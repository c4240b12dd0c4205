//! Command-line interface for frc.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **compute**: Run both statistics passes and write the Feature Response Curve
//! - **stats**: Run the global pass only and report the read census and baseline
//!
//! ## Usage
//!
//! ```text
//! # Curve with default settings, written to FRC.txt
//! frc compute assembly.bam
//!
//! # Custom insert band and per-contig feature table
//! frc compute assembly.bam --min-insert 200 --max-insert 800 --features features.tsv
//!
//! # Baseline statistics as JSON
//! frc stats assembly.sam --format json
//! ```

use clap::{Parser, Subcommand};

use crate::config::FrcConfig;

pub mod compute;
pub mod stats;

#[derive(Parser)]
#[command(name = "frc")]
#[command(author = "Fulcrum Genomics")]
#[command(version)]
#[command(about = "Feature Response Curves from paired-end alignments to an assembly")]
#[command(
    long_about = "frc scores a de novo assembly from paired-end reads aligned back to it.\n\nA first pass over the alignments computes genome-wide coverage and insert-size baselines. A second pass slides fixed windows along every contig and flags windows that deviate from the baseline:\n- Low or high read coverage\n- Low or high coverage by correctly mated pairs\n- Many singletons, mates on other contigs or misoriented pairs\n- Compressed or stretched insert sizes\n\nContigs are then ranked by feature density to build the curve."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute the Feature Response Curve of an assembly
    Compute(compute::ComputeArgs),

    /// Report the genome-wide statistics of the first pass
    Stats(stats::StatsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Run parameters shared by the commands; unset flags keep the config value
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ParameterArgs {
    /// JSON config file; flags below override its values
    #[arg(long)]
    pub config: Option<std::path::PathBuf>,

    /// Window width in bases [default: 1000]
    #[arg(long)]
    pub window: Option<u64>,

    /// Smallest insert size of a properly distanced pair [default: 100]
    #[arg(long)]
    pub min_insert: Option<i64>,

    /// Largest insert size of a properly distanced pair [default: 1000000]
    #[arg(long)]
    pub max_insert: Option<i64>,

    /// Genome size for the coverage fractions [default: sum of contig lengths]
    #[arg(long)]
    pub genome_size: Option<u64>,
}

impl ParameterArgs {
    /// Build the run config from the config file and the flags
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or the result does
    /// not validate.
    pub fn resolve(&self) -> anyhow::Result<FrcConfig> {
        use anyhow::Context;

        let mut config = match &self.config {
            Some(path) => FrcConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => FrcConfig::default(),
        };
        if let Some(window) = self.window {
            config.window_size = window;
        }
        if let Some(min) = self.min_insert {
            config.min_insert = min;
        }
        if let Some(max) = self.max_insert {
            config.max_insert = max;
        }
        if self.genome_size.is_some() {
            config.estimated_genome_size = self.genome_size;
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let args = ParameterArgs {
            window: Some(500),
            max_insert: Some(800),
            genome_size: Some(10_000),
            ..ParameterArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.window_size, 500);
        assert_eq!(config.min_insert, 100);
        assert_eq!(config.max_insert, 800);
        assert_eq!(config.estimated_genome_size, Some(10_000));
    }

    #[test]
    fn test_flags_override_config_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::with_suffix(".json").unwrap();
        write!(file, r#"{{"window_size": 2000, "min_insert": 150}}"#).unwrap();
        file.flush().unwrap();

        let args = ParameterArgs {
            config: Some(file.path().to_path_buf()),
            min_insert: Some(200),
            ..ParameterArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.window_size, 2000);
        assert_eq!(config.min_insert, 200);
    }

    #[test]
    fn test_invalid_combination_rejected() {
        let args = ParameterArgs {
            min_insert: Some(900),
            max_insert: Some(100),
            ..ParameterArgs::default()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "frc", "compute", "in.sam", "--window", "500", "--format", "json", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.format, OutputFormat::Json));
        let Commands::Compute(args) = cli.command else {
            panic!("expected compute");
        };
        assert_eq!(args.params.window, Some(500));
    }
}

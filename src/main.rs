use clap::Parser;
use tracing_subscriber::EnvFilter;

use frc_align::cli;

fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();

    // Initialize logging based on verbosity flag
    let filter = if cli.verbose {
        EnvFilter::new("frc_align=debug,info")
    } else {
        EnvFilter::new("frc_align=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        cli::Commands::Compute(args) => {
            cli::compute::run(args, cli.format, cli.verbose)?;
        }
        cli::Commands::Stats(args) => {
            cli::stats::run(args, cli.format, cli.verbose)?;
        }
    }

    Ok(())
}

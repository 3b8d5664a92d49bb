use std::io;
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::WrapErr;
use geoeff::{
    RunParameters, init_logging, load_parameters, progress_header, progress_row,
    prompt_parameters, write_results,
};
use geoeff_core::{DEFAULT_SEED, DetectorShape, SourceKind, sweep_evaluate_with};

#[derive(Parser, Debug)]
#[command(name = "geoeff")]
#[command(about = "Monte Carlo geometric efficiency of a source facing a flat detector")]
#[command(version)]
struct Args {
    /// Source distribution: 'uniform' or 'gaussian'
    source: SourceKind,

    /// Detector shape: 'circular' or 'annular'
    detector: DetectorShape,

    /// Read run parameters from a YAML file instead of prompting
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file (overrides the prompted or configured filename)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Base random seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Evaluate grid points one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();
    init_logging(&args.log_level)?;

    let mut params = match &args.config {
        Some(path) => load_parameters(path)
            .wrap_err_with(|| format!("failed to load parameters from {}", path.display()))?,
        None => prompt_parameters(&mut io::stdin().lock(), &mut io::stdout(), args.detector)?,
    };
    if let Some(output) = &args.output {
        params.output = output.clone();
    }

    run(&args, &params)
}

/// Validate, sweep and write the results file. Nothing is written unless the
/// whole sweep succeeds.
fn run(args: &Args, params: &RunParameters) -> color_eyre::Result<()> {
    let config = params.sweep_config(args.source, args.detector, args.seed, !args.sequential)?;
    tracing::info!(
        source = %args.source,
        detector = %args.detector,
        samples = config.samples_per_point,
        "running sweep"
    );

    println!("{}", progress_header());
    let result = sweep_evaluate_with(&config, None, |report| {
        println!("{}", progress_row(report));
    })?;

    write_results(&params.output, &result)
        .wrap_err_with(|| format!("failed to write {}", params.output.display()))?;
    println!("Wrote output file");

    Ok(())
}

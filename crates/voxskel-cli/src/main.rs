//! voxskel CLI — command-line interface for 3D curve thinning.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use voxskel_core::{analyze, Skeletonizer};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "voxskel")]
#[command(about = "Thin binary voxel volumes to topology-preserving curve skeletons")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Thin an Analyze volume and write the skeleton next to it.
    Thin(CliThinArgs),

    /// Print header and foreground statistics of an Analyze volume.
    Info {
        /// Dataset stem: reads <stem>.hdr and <stem>.img.
        #[arg(long)]
        input: PathBuf,
    },
}

#[derive(Debug, Clone, Args)]
struct CliThinArgs {
    /// Input dataset stem: reads <stem>.hdr and <stem>.img.
    #[arg(long)]
    input: PathBuf,

    /// Output dataset stem: writes <stem>.hdr and <stem>.img.
    #[arg(long)]
    out: PathBuf,

    /// Directory holding lut_simple.dat and lut_isthmus.dat.
    #[arg(long)]
    lut_dir: PathBuf,

    /// Optional path to write the run report (JSON).
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Thin(args) => run_thin(&args),
        Commands::Info { input } => run_info(&input),
    }
}

fn run_thin(args: &CliThinArgs) -> CliResult<()> {
    tracing::info!("Loading volume: {}", args.input.display());
    let (mut volume, header) = analyze::read_volume(&args.input)?;
    let [nx, ny, nz] = volume.dims();
    tracing::info!(
        "Volume size: {nx}x{ny}x{nz}, {} foreground voxels",
        volume.foreground_count()
    );

    let engine = Skeletonizer::from_lut_dir(&args.lut_dir)?;
    let report = engine.skeletonize_volume(&mut volume);
    tracing::info!(
        "Converged after {} iterations: {} deleted, {} protected, {} remaining",
        report.iterations,
        report.deleted,
        report.protected,
        report.remaining
    );

    analyze::write_volume(&args.out, &volume, &header)?;
    tracing::info!("Skeleton written to {}", args.out.display());

    if let Some(report_path) = &args.report {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(report_path, &json)?;
        tracing::info!("Report written to {}", report_path.display());
    }
    Ok(())
}

fn run_info(input: &PathBuf) -> CliResult<()> {
    let (volume, header) = analyze::read_volume(input)?;
    let [nx, ny, nz] = volume.dims();
    println!("dimensions:  {nx} x {ny} x {nz}");
    println!("byte order:  {}", if header.byte_swapped() { "swapped" } else { "native" });
    println!("foreground:  {}", volume.foreground_count());
    println!("background:  {}", nx * ny * nz - volume.foreground_count());
    Ok(())
}

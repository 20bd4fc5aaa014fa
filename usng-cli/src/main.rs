//! Point d'entrée CLI pour usng

use anyhow::Result;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;

use cli::Commands;

/// Convertir des coordonnées entre lat/lon, UTM et USNG/MGRS
#[derive(Parser)]
#[command(name = "usng")]
#[command(author, version)]
#[command(about = "Convertir des coordonnées entre lat/lon, UTM et USNG/MGRS")]
#[command(
    long_about = "Codec de coordonnées géodésiques : projette des points lat/lon en UTM, \
les formate en désignations USNG/MGRS, et reconvertit les chaînes USNG en positions \
géographiques.\n\nDatums supportés : nad83 (défaut) et nad27."
)]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::ToUsng {
            lat,
            lon,
            precision,
            datum,
            mgrs,
        } => cli::cmd_to_usng(lat, lon, precision, datum, mgrs),
        Commands::ToLl {
            usng,
            center,
            datum,
            json,
        } => cli::cmd_to_ll(&usng, center, datum, json),
        Commands::ToUtm {
            lat,
            lon,
            zone,
            datum,
            json,
        } => cli::cmd_to_utm(lat, lon, zone, datum, json),
        Commands::Batch {
            input,
            output,
            precision,
            datum,
            jobs,
        } => cli::cmd_batch(&input, output.as_deref(), precision, datum, jobs),
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// This module governs the command line application around the band structure calculation
mod configuration;
mod error;
mod output;
mod telemetry;

pub(crate) use configuration::Configuration;
pub(crate) use error::KkrError;

use crate::band_structure::BandStructureBuilder;
use crate::partition::Cancellation;
use clap::{ArgEnum, Parser};
use std::path::PathBuf;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct App {
    /// A configuration file layered over the defaults in `.config`
    file_path: Option<PathBuf>,
    #[clap(arg_enum, short, long, default_value = "info")]
    log_level: LogLevel,
    /// Overrides the number of worker threads
    #[clap(short, long)]
    threads: Option<usize>,
    /// Overrides the symmetry path with one of the predefined paths
    #[clap(short, long)]
    path: Option<usize>,
    /// The directory receiving the results and the log file
    #[clap(short, long, default_value = "results")]
    output: PathBuf,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ArgEnum)]
enum LogLevel {
    Trace,
    Info,
    Debug,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let level = match self {
            LogLevel::Trace => "trace",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Error => "error",
        };
        write!(f, "{}", level)
    }
}

pub fn run() -> color_eyre::Result<()> {
    let cli = App::parse();

    std::fs::create_dir_all(&cli.output)?;
    let (subscriber, _guard) = telemetry::get_subscriber(cli.log_level, &cli.output);
    telemetry::init_subscriber(subscriber)?;

    let configuration = Configuration::build(cli.file_path.as_deref())?;
    let mut options = configuration.options().map_err(KkrError::from)?;
    if let Some(threads) = cli.threads {
        options.threads = threads;
    }
    if let Some(index) = cli.path {
        options.path = kkr_lattice::predefined_path(index)
            .map_err(|e| KkrError::from(crate::error::BuildError::from(e)))?;
    }
    tracing::info!(
        "Scanning [{}, {}) Ha in steps of {} Ha with l_max = {} along {}",
        options.minimum_energy,
        options.maximum_energy,
        options.energy_step,
        options.l_max,
        options.path.join("-")
    );

    let cancellation = Cancellation::new();
    let band_structure = BandStructureBuilder::new()
        .with_options(&options)
        .with_potential(&configuration.potential)
        .with_cancellation(&cancellation)
        .build()
        .map_err(KkrError::from)?;
    let bands = band_structure.compute();

    output::write_bands(&bands, &cli.output).map_err(KkrError::from)?;
    tracing::info!("Results written to {}", cli.output.display());
    Ok(())
}

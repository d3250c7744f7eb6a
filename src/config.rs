use crate::coins::{FIRST_YEAR, LAST_YEAR};
use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::fs::File;
use std::path::{Path, PathBuf};

/// Map name of the country selected at startup
pub const DEFAULT_COUNTRY: &str = "Slovensko";

/// Eurozone commemorative coins on a terminal map
#[derive(Parser, Debug)]
#[command(name = "euro-coin-map", version, about)]
pub struct Config {
    /// Directory holding dataset.csv, datasetAreaCoins.csv and myMap.json
    #[arg(long, default_value = "public")]
    pub data_dir: PathBuf,

    /// Year selected at startup
    #[arg(
        long,
        default_value_t = LAST_YEAR,
        value_parser = clap::value_parser!(u16).range(FIRST_YEAR as i64..=LAST_YEAR as i64)
    )]
    pub year: u16,

    /// Country (map name) whose coins are listed at startup
    #[arg(long, default_value = DEFAULT_COUNTRY)]
    pub country: String,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Set up the `log` backend. The terminal belongs to the UI, so logs only
/// go to stderr when RUST_LOG asks for them; a log file defaults to info.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::new();

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder
                .filter_level(LevelFilter::Info)
                .parse_default_env()
                .target(env_logger::Target::Pipe(Box::new(file)));
        }
        None => {
            builder.filter_level(LevelFilter::Off).parse_default_env();
        }
    }

    builder.try_init()?;
    Ok(())
}

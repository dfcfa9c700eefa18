//! Command-line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Closest departures CLI
#[derive(Debug, Parser)]
#[command(name = "departures-cli")]
#[command(author, version, about = "Find the public transport departures closest to you", long_about = None)]
pub struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Configuration file (default: departures.toml if present)
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Search departures between two typed-in points
    ///
    /// Example: departures-cli search --start-lat 51.1 --start-lon 17.0
    ///          --end-lat 51.2 --end-lon 17.1 --limit 5
    Search(SearchArgs),

    /// Pick the points as map clicks and search
    ///
    /// The first click sets the start, the second the destination, a third
    /// one starts over.
    /// Example: departures-cli pick --click 51.1,17.0 --click 51.2,17.1
    Pick(PickArgs),

    /// Print the effective configuration as TOML
    Config,
}

/// Coordinates typed into the form
#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Start latitude (-90 to 90)
    #[arg(long, allow_hyphen_values = true)]
    pub start_lat: String,

    /// Start longitude (-180 to 180)
    #[arg(long, allow_hyphen_values = true)]
    pub start_lon: String,

    /// Destination latitude (-90 to 90)
    #[arg(long, allow_hyphen_values = true)]
    pub end_lat: String,

    /// Destination longitude (-180 to 180)
    #[arg(long, allow_hyphen_values = true)]
    pub end_lon: String,

    #[command(flatten)]
    pub query: QueryOptions,
}

/// Map clicks to replay
#[derive(Debug, Args)]
pub struct PickArgs {
    /// Map click as "lat,lon" (repeatable)
    #[arg(
        long = "click",
        value_name = "LAT,LON",
        value_parser = parse_click,
        allow_hyphen_values = true,
        required = true
    )]
    pub clicks: Vec<(f64, f64)>,

    #[command(flatten)]
    pub query: QueryOptions,
}

/// Form fields shared by both search paths
#[derive(Debug, Args)]
pub struct QueryOptions {
    /// Departure time (default: now), e.g. 2024-01-01T10:00
    #[arg(short, long)]
    pub time: Option<String>,

    /// Maximum number of departures, 1 to 20 (default from config)
    #[arg(short, long)]
    pub limit: Option<String>,

    /// Also print the raw JSON response
    #[arg(long)]
    pub raw: bool,
}

/// Parse a "lat,lon" map click
pub fn parse_click(value: &str) -> Result<(f64, f64), String> {
    let (lat, lon) = value
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON but got '{value}'"))?;
    let lat = lat
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid latitude '{}': {e}", lat.trim()))?;
    let lon = lon
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid longitude '{}': {e}", lon.trim()))?;
    Ok((lat, lon))
}

/// Determine log filter level from verbosity count
pub const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

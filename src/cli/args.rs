use clap::Parser;
use crate::cli::literal::{date_filter, key_filter, parse_literal, LiteralError};
use crate::models::FilterSpec;

/// CLI arguments for agenda-algo
#[derive(Debug, Parser)]
#[command(
    name = "agenda-algo",
    version,
    about = "Lists agenda events with the nearest bike-share stations and parkings"
)]
pub struct CliArgs {
    /// Text filter: 'word', [all, of, these] or (any, of, these), nestable
    #[arg(long = "key", value_name = "EXPR")]
    pub key: Option<String>,

    /// Date filter: 'dd/mm/yyyy', [any, of, these] or ('dd/mm/yyyy', days_before, days_after)
    #[arg(long = "date", value_name = "EXPR")]
    pub date: Option<String>,

    /// Configuration file (defaults to config/default.toml and config/local.toml)
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<String>,

    /// Events feed URL or file
    #[arg(long = "events", value_name = "SRC")]
    pub events: Option<String>,

    /// Bike-share stations feed URL or file
    #[arg(long = "stations", value_name = "SRC")]
    pub stations: Option<String>,

    /// Parkings feed URL or file
    #[arg(long = "parkings", value_name = "SRC")]
    pub parkings: Option<String>,

    /// Search radius in meters
    #[arg(long = "radius", value_name = "METERS")]
    pub radius: Option<f64>,

    /// Neighbors kept per category
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,

    /// Pretty-print the JSON report
    #[arg(long = "pretty")]
    pub pretty: bool,
}

impl CliArgs {
    /// Combined filter from `--key` and `--date`, `None` when neither is set
    pub fn filter_spec(&self) -> Result<Option<FilterSpec>, LiteralError> {
        let key = self
            .key
            .as_deref()
            .map(|expr| parse_literal(expr).map(|l| key_filter(&l)))
            .transpose()?;
        let date = self
            .date
            .as_deref()
            .map(|expr| parse_literal(expr).map(|l| date_filter(&l)))
            .transpose()?;

        Ok(FilterSpec::combine(key, date))
    }
}

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use crate::core::{ProximityMatcher, DEFAULT_RADIUS_M, DEFAULT_TOP_N};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub feeds: FeedSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FeedSettings {
    #[serde(default = "default_events_source")]
    pub events: String,
    #[serde(default = "default_stations_source")]
    pub stations: String,
    #[serde(default = "default_parkings_source")]
    pub parkings: String,
    pub timeout_secs: Option<u64>,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            events: default_events_source(),
            stations: default_stations_source(),
            parkings: default_parkings_source(),
            timeout_secs: None,
        }
    }
}

impl FeedSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.unwrap_or(30))
    }
}

fn default_events_source() -> String { "http://www.bcn.cat/tercerlloc/agenda_cultural.xml".to_string() }
fn default_stations_source() -> String { "http://wservice.viabicing.cat/getstations.php?v=1".to_string() }
fn default_parkings_source() -> String { "http://www.bcn.cat/tercerlloc/Aparcaments.xml".to_string() }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub radius_m: Option<f64>,
    pub top_n: Option<usize>,
}

impl MatchingSettings {
    pub fn matcher(&self) -> ProximityMatcher {
        ProximityMatcher::new(
            self.radius_m.unwrap_or(DEFAULT_RADIUS_M),
            self.top_n.unwrap_or(DEFAULT_TOP_N),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with AGENDA__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., AGENDA__MATCHING__RADIUS_M -> matching.radius_m
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("AGENDA")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

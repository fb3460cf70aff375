//! Layered configuration.
//!
//! Values are resolved in order: built-in defaults, then a TOML file
//! (`bordertraffic.toml` in the working directory, or an explicit
//! `--config` path), then `BORDERTRAFFIC_*` environment variables, then
//! command-line flags.
//!
//! ```toml
//! base_path = "https://example.github.io/bordertraffic/"
//! data_file = "waitTimes.json"
//! refresh_secs = 300
//! layout = "by-vehicle"   # or "by-bridge"
//! on_error = "panel"      # or "retain"
//! log_file = "bordertraffic.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::data::TableLayout;
use crate::source::Location;

/// Config file looked up in the working directory when none is given.
const DEFAULT_CONFIG: &str = "bordertraffic";

/// What the page does when a poll fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorPolicy {
    /// Replace the tables with an error panel.
    #[default]
    Panel,
    /// Keep showing the last good snapshot and only log the failure.
    Retain,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Public prefix the data file is served under: a URL or a directory.
    pub base_path: String,
    /// Name of the data file under `base_path`.
    pub data_file: String,
    /// Seconds between polls; zero fetches once.
    pub refresh_secs: u64,
    pub layout: TableLayout,
    pub on_error: ErrorPolicy,
    /// HTTP timeout in seconds; zero keeps the client default.
    pub request_timeout_secs: u64,
    /// Diagnostic log destination. Logging is off when unset.
    pub log_file: Option<PathBuf>,
    /// Default log filter when `RUST_LOG` is not set.
    pub log_level: String,
}

/// Values given on the command line, applied last.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub base_path: Option<String>,
    pub data_file: Option<String>,
    pub refresh_secs: Option<u64>,
    pub layout: Option<String>,
    pub on_error: Option<String>,
    pub log_file: Option<String>,
}

impl Settings {
    /// Load settings from all layers.
    ///
    /// An explicit `config_path` must exist; the default file is optional.
    pub fn load(config_path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut builder = Config::builder()
            .set_default("base_path", "./public/")?
            .set_default("data_file", "waitTimes.json")?
            .set_default("refresh_secs", 300_i64)?
            .set_default("layout", "by-vehicle")?
            .set_default("on_error", "panel")?
            .set_default("request_timeout_secs", 0_i64)?
            .set_default("log_level", "info")?;

        builder = match config_path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG).required(false)),
        };

        let config = builder
            .add_source(Environment::with_prefix("BORDERTRAFFIC").try_parsing(true))
            .set_override_option("base_path", overrides.base_path)?
            .set_override_option("data_file", overrides.data_file)?
            .set_override_option("refresh_secs", overrides.refresh_secs.map(|s| s as i64))?
            .set_override_option("layout", overrides.layout)?
            .set_override_option("on_error", overrides.on_error)?
            .set_override_option("log_file", overrides.log_file)?
            .build()?;

        config.try_deserialize().context("invalid configuration")
    }

    /// Where the document is fetched from.
    pub fn location(&self) -> Result<Location> {
        Location::resolve(&self.base_path, &self.data_file)
            .with_context(|| format!("invalid base_path '{}'", self.base_path))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

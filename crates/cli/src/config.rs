//! Configuration file loading and merging with command-line overrides.
//!
//! Every setting has a default, so the file is optional and may hold any
//! subset of keys:
//!
//! ```toml
//! poll_interval_secs = 2
//!
//! [vsts]
//! accounts_base_url = "https://app.vssps.visualstudio.com"
//! portalext_url_template = "https://{account}.portalext.visualstudio.com"
//! continuous_delivery_api_version = "3.2-preview.1"
//!
//! [log]
//! format = "json"
//! filter = "info,vsts=debug"
//! otlp_endpoint = "http://localhost:4317"
//! ```

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use vsts::VstsConfig;

use crate::args::{Cli, Command, LogFormat};

const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;
const DEFAULT_LOG_FILTER: &str = "info";

/// Contents of the configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub vsts: VstsConfig,
    pub poll_interval_secs: u64,
    pub log: LogConfig,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            vsts: VstsConfig::default(),
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            log: LogConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub format: LogFormat,
    pub filter: String,
    pub otlp_endpoint: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: DEFAULT_LOG_FILTER.to_string(),
            otlp_endpoint: None,
        }
    }
}

impl FileConfig {
    /// Reads and parses the file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

/// Effective settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub vsts: VstsConfig,
    pub poll_interval: Duration,
    pub log: LogConfig,
}

impl Settings {
    /// Loads the configuration file named on the command line, if any, and
    /// applies the command-line overrides.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::merge(file, cli))
    }

    fn merge(file: FileConfig, cli: &Cli) -> Self {
        let FileConfig {
            vsts,
            poll_interval_secs,
            mut log,
        } = file;

        if let Some(format) = cli.log_format {
            log.format = format;
        }
        if let Some(filter) = &cli.log_filter {
            log.filter = filter.clone();
        }
        if let Some(endpoint) = &cli.otlp_endpoint {
            log.otlp_endpoint = Some(endpoint.clone());
        }

        let poll_interval_secs = match &cli.command {
            Command::Setup(args) => {
                args.poll_interval_secs.unwrap_or(poll_interval_secs)
            }
            Command::AppId => poll_interval_secs,
        };

        Self {
            vsts,
            poll_interval: Duration::from_secs(poll_interval_secs),
            log,
        }
    }
}

use anyhow::{Context, Result};
use clap::ValueEnum;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use crate::locale::grouper::FALLBACK_PRIORITY;

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Run configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Preferred locales, most preferred first
    pub priority: Vec<String>,

    /// Directory for log files; logs go to stderr when unset
    pub log_dir: Option<String>,

    /// Output format for results
    pub output: OutputFormat,

    /// Rank group members with the scorer instead of the plain priority lookup
    pub scored: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            priority: vec![FALLBACK_PRIORITY.to_string()],
            log_dir: None,
            output: OutputFormat::Text,
            scored: false,
        }
    }
}

impl Settings {
    /// Layers an optional config file and `URLOCALE_*` environment variables
    /// over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = path {
            debug!("Loading settings from {}", path.display());
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("URLOCALE")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("priority"),
        );

        let settings: Settings = builder
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")?;

        Ok(settings)
    }

    /// Priority list cleaned up for matching against detected locales:
    /// trimmed, lowercased, empties dropped, `["en"]` when nothing is left.
    pub fn priority(&self) -> Vec<String> {
        let priority: Vec<String> = self
            .priority
            .iter()
            .map(|code| code.trim().to_lowercase())
            .filter(|code| !code.is_empty())
            .collect();

        if priority.is_empty() {
            vec![FALLBACK_PRIORITY.to_string()]
        } else {
            priority
        }
    }
}

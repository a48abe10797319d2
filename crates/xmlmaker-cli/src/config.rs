//! Command-line configuration for the `xmlmaker` binary.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `XMLMAKER_INPUT` | stdin | JSON file to read |
//! | `XMLMAKER_ROOT` | root | Root element name |
//! | `XMLMAKER_FORMAT` | xml | Output format: xml, pretty, json |
//! | `XMLMAKER_LOG_LEVEL` | warn | Log level |

use clap::{Parser, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use xmlmaker::xml::is_valid_name;

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// What to print for the input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Compact XML document.
    #[default]
    Xml,
    /// Indented XML document.
    Pretty,
    /// Plain JSON form of the tree.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Xml => "xml",
            OutputFormat::Pretty => "pretty",
            OutputFormat::Json => "json",
        };
        f.write_str(name)
    }
}

/// Converts a JSON document into XML.
#[derive(Debug, Clone, Parser)]
#[command(name = "xmlmaker")]
#[command(about = "Convert JSON documents into XML")]
pub struct CliConfig {
    /// JSON file to read; stdin when omitted.
    #[arg(short, long, env = "XMLMAKER_INPUT")]
    pub input: Option<PathBuf>,

    /// Name of the root element.
    #[arg(short, long, env = "XMLMAKER_ROOT", default_value = "root")]
    pub root: String,

    /// Output format.
    #[arg(short, long, env = "XMLMAKER_FORMAT", value_enum, default_value_t = OutputFormat::Xml)]
    pub format: OutputFormat,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "XMLMAKER_LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            input: None,
            root: xmlmaker::DEFAULT_ROOT_NAME.to_string(),
            format: OutputFormat::Xml,
            log_level: "warn".to_string(),
        }
    }
}

impl CliConfig {
    /// Builds a configuration from environment variables only.
    pub fn from_env() -> Self {
        Self::try_parse_from(["xmlmaker"]).unwrap_or_default()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !is_valid_name(&self.root) {
            errors.push(format!("Root name {:?} is not a valid XML name", self.root));
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            errors.push(format!(
                "Unknown log level {:?} (expected one of {})",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

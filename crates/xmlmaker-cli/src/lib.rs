//! Command-line front end for `xmlmaker`.
//!
//! Reads a JSON document, pours it into a [`Node`] and renders it as XML,
//! indented XML or the plain JSON form of the tree.

pub mod config;

pub use config::{CliConfig, OutputFormat};

use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing::debug;
use xmlmaker::{Node, Result};

/// Initializes tracing output on stderr.
///
/// `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("xmlmaker={},xmlmaker_cli={}", level, level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

/// Reads the whole input, from `path` or stdin.
pub fn read_input(path: Option<&Path>) -> Result<String> {
    let text = match path {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };
    debug!(bytes = text.len(), source = ?path, "read input document");
    Ok(text)
}

/// Builds the tree for a JSON document.
pub fn build(root: &str, json: &str) -> Result<Node> {
    Node::from_json_str(root, json)
}

/// Renders a tree in the requested format, always ending with a newline.
pub fn render(node: &Node, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Xml => node.to_xml(),
        OutputFormat::Pretty => node.to_pretty_xml(),
        OutputFormat::Json => {
            let mut json = node.to_json_string_pretty()?;
            json.push('\n');
            Ok(json)
        }
    }
}

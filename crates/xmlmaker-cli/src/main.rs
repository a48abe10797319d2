//! xmlmaker
//!
//! Converts a JSON document into XML.

use anyhow::Context;
use clap::Parser;
use std::io::{self, Write};
use tracing::info;
use xmlmaker_cli::{CliConfig, build, init_logging, read_input, render};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    info!(
        root = %config.root,
        format = %config.format,
        input = ?config.input,
        "Converting document"
    );

    let text = read_input(config.input.as_deref()).context("Failed to read input")?;
    let node = build(&config.root, &text).context("Input is not a valid JSON document")?;
    let output = render(&node, config.format)?;

    io::stdout().write_all(output.as_bytes())?;
    Ok(())
}

//! Command-line argument definitions for the Slidegraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, the output format,
//! configuration file selection, and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Slidegraph slide renderer
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a JSON file holding one slide structure or an array of them
    #[arg(help = "Path to the input JSON file")]
    pub input: String,

    /// Path to the output SVG file (single-slide input only)
    #[arg(short, long, conflicts_with = "out_dir")]
    pub output: Option<String>,

    /// Directory receiving `slide-NN.svg` files
    #[arg(long)]
    pub out_dir: Option<String>,

    /// Print render results as JSON instead of writing SVG files
    #[arg(long)]
    pub json: bool,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Arguments for rendering `input` with every other option at its default.
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: None,
            out_dir: None,
            json: false,
            config: None,
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from([
            "slidegraph",
            "deck.json",
            "--out-dir",
            "build",
            "--json",
            "-c",
            "slidegraph.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.input, "deck.json");
        assert_eq!(args.out_dir.as_deref(), Some("build"));
        assert!(args.json);
        assert_eq!(args.config.as_deref(), Some("slidegraph.toml"));
        assert_eq!(args.log_level, "debug");
        assert!(args.output.is_none());
    }

    #[test]
    fn test_output_conflicts_with_out_dir() {
        let result =
            Args::try_parse_from(["slidegraph", "deck.json", "-o", "a.svg", "--out-dir", "b"]);
        assert!(result.is_err());
    }
}

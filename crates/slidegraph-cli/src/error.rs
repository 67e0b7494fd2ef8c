//! Errors reported by the CLI.
//!
//! [`CliError`] wraps I/O, configuration and engine failures and carries
//! enough context (paths, slide positions) for miette to render a useful
//! report.

use std::{io, path::PathBuf};

use miette::Diagnostic;
use thiserror::Error;

use slidegraph::SlideError;

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    #[error("failed to read `{}`", path.display())]
    #[diagnostic(code(slidegraph::io))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write `{}`", path.display())]
    #[diagnostic(code(slidegraph::io))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("missing configuration file `{}`", .0.display())]
    #[diagnostic(
        code(slidegraph::config),
        help("pass an existing file to --config, or omit it to use the defaults")
    )]
    MissingConfig(PathBuf),

    #[error("failed to parse TOML configuration `{}`: {message}", path.display())]
    #[diagnostic(code(slidegraph::config))]
    Config { path: PathBuf, message: String },

    #[error("input is not valid JSON: {0}")]
    #[diagnostic(
        code(slidegraph::input),
        help("the input must be one slide object or an array of slide objects")
    )]
    Json(#[source] serde_json::Error),

    #[error("slide {index} could not be rendered")]
    #[diagnostic(code(slidegraph::render))]
    Render {
        /// 1-based position in the input.
        index: usize,
        #[source]
        source: SlideError,
    },

    #[error("{0}")]
    #[diagnostic(code(slidegraph::usage))]
    Usage(String),
}

//! CLI logic for the Slidegraph slide renderer.
//!
//! The input file holds either one slide structure or an array of them.
//! Each slide is rendered to its own SVG file, or, with `--json`, to a
//! `RenderResult` document printed on standard output.

pub mod config;

mod args;
mod error;

pub use args::Args;
pub use error::CliError;

use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

use log::{debug, info, warn};
use serde_json::Value;

use slidegraph::{SlideError, SlideRenderer, model::SlideStructure};

/// Output file used for single-slide input when no path is given.
pub const DEFAULT_OUTPUT: &str = "out.svg";

/// Run the Slidegraph CLI application, printing JSON results to stdout.
///
/// # Errors
///
/// See [`run_with_output`].
pub fn run(args: &Args) -> Result<(), CliError> {
    run_with_output(args, &mut std::io::stdout().lock())
}

/// Run the CLI, writing any `--json` output to `out`.
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Input that is not JSON
/// - Slides that fail to render (SVG mode only; `--json` reports failures
///   inside the printed results)
pub fn run_with_output(args: &Args, out: &mut impl Write) -> Result<(), CliError> {
    info!(input_path = args.input, json = args.json; "Processing slides");

    let app_config = config::load_config(args.config.as_ref())?;
    let input = Path::new(&args.input);
    let source = fs::read_to_string(input).map_err(|source| CliError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let document: Value = serde_json::from_str(&source).map_err(CliError::Json)?;

    let (slides, is_deck) = match document {
        Value::Array(slides) => (slides, true),
        single => (vec![single], false),
    };
    info!(slides = slides.len(); "Input parsed");

    let renderer = SlideRenderer::new(app_config);
    if args.json {
        return write_results(&renderer, &slides, is_deck, out);
    }

    if is_deck && args.output.is_some() {
        return Err(CliError::Usage(
            "--output takes a single slide; use --out-dir for an array of slides".to_string(),
        ));
    }

    for (position, slide) in slides.iter().enumerate() {
        let index = position + 1;
        let svg = render_svg(&renderer, slide)
            .map_err(|source| CliError::Render { index, source })?;
        let path = output_path(args, index, is_deck);
        write_file(&path, &svg)?;
        info!(output_file = path.display().to_string(); "SVG exported successfully");
    }
    Ok(())
}

fn render_svg(renderer: &SlideRenderer, slide: &Value) -> Result<String, SlideError> {
    if slide.is_null() {
        return Err(SlideError::MissingStructure);
    }
    let structure: SlideStructure = serde_json::from_value(slide.clone())
        .map_err(|err| SlideError::InvalidStructure(err.to_string()))?;
    renderer.render_guarded(&structure)
}

fn write_results(
    renderer: &SlideRenderer,
    slides: &[Value],
    is_deck: bool,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let results: Vec<_> = slides
        .iter()
        .map(|slide| renderer.render_value(Some(slide)))
        .collect();
    let failed = results.iter().filter(|r| !r.success).count();
    if failed > 0 {
        warn!(failed = failed, total = results.len(); "Some slides failed to render");
    }

    let text = if is_deck {
        serde_json::to_string_pretty(&results)
    } else {
        serde_json::to_string_pretty(&results[0])
    }
    .map_err(CliError::Json)?;

    let stdout = PathBuf::from("<stdout>");
    writeln!(out, "{text}").map_err(|source| CliError::Write {
        path: stdout,
        source,
    })
}

/// Where slide `index` (1-based) is written.
///
/// A single slide goes to `--output`, then `--out-dir/slide-01.svg`, then
/// [`DEFAULT_OUTPUT`]; every slide of an array goes to
/// `<out-dir>/slide-NN.svg`, the directory defaulting to the current one.
pub fn output_path(args: &Args, index: usize, is_deck: bool) -> PathBuf {
    if !is_deck {
        if let Some(output) = &args.output {
            return PathBuf::from(output);
        }
        if args.out_dir.is_none() {
            return PathBuf::from(DEFAULT_OUTPUT);
        }
    }
    let dir = args.out_dir.as_deref().unwrap_or(".");
    Path::new(dir).join(format!("slide-{index:02}.svg"))
}

fn write_file(path: &Path, contents: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| CliError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    debug!(path = path.display().to_string(), bytes = contents.len(); "Writing file");
    fs::write(path, contents).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_single_slide() {
        let mut args = Args::new("slide.json");
        assert_eq!(output_path(&args, 1, false), PathBuf::from("out.svg"));

        args.out_dir = Some("build".to_string());
        assert_eq!(output_path(&args, 1, false), Path::new("build").join("slide-01.svg"));

        args.out_dir = None;
        args.output = Some("title.svg".to_string());
        assert_eq!(output_path(&args, 1, false), PathBuf::from("title.svg"));
    }

    #[test]
    fn test_output_path_deck() {
        let mut args = Args::new("deck.json");
        assert_eq!(output_path(&args, 3, true), Path::new(".").join("slide-03.svg"));

        args.out_dir = Some("build".to_string());
        assert_eq!(output_path(&args, 12, true), Path::new("build").join("slide-12.svg"));
    }

    #[test]
    fn test_render_svg_null_slide() {
        let renderer = SlideRenderer::default();
        assert_eq!(
            render_svg(&renderer, &Value::Null).unwrap_err(),
            SlideError::MissingStructure
        );
    }

    #[test]
    fn test_render_svg_goes_through_guarded_render() {
        let renderer = SlideRenderer::default();
        let slide = serde_json::json!({ "title": "Kickoff", "layout": "title-only" });
        let svg = render_svg(&renderer, &slide).unwrap();
        assert!(svg.contains("Kickoff"));

        let bad = serde_json::json!({ "title": "Kickoff", "layout": "mosaic" });
        assert!(matches!(
            render_svg(&renderer, &bad).unwrap_err(),
            SlideError::InvalidStructure(_)
        ));
    }
}

use std::{fs, path::Path};

use tempfile::tempdir;

use slidegraph::SlideError;
use slidegraph_cli::{Args, CliError, run, run_with_output};

const TITLE_SLIDE: &str = r#"{ "title": "Welcome", "layout": "title-only" }"#;

const DECK: &str = r#"[
    { "title": "Agenda", "layout": "title-bullets",
      "elements": [{ "type": "bullet-list", "items": ["Context", "Plan"] }] },
    { "title": "Revenue", "layout": "chart",
      "elements": [{ "type": "waterfall-chart", "deltas": [{ "label": "Q1", "value": 4 }] }] }
]"#;

fn args_for(input: &Path) -> Args {
    let mut args = Args::new(input.to_string_lossy());
    args.log_level = "off".to_string();
    args
}

#[test]
fn test_single_slide_to_output_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("slide.json");
    fs::write(&input, TITLE_SLIDE).unwrap();
    let output = dir.path().join("nested").join("welcome.svg");

    let mut args = args_for(&input);
    args.output = Some(output.to_string_lossy().to_string());
    run(&args).expect("render should succeed");

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Welcome"));
}

#[test]
fn test_deck_to_numbered_files() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("deck.json");
    fs::write(&input, DECK).unwrap();
    let out_dir = dir.path().join("svg");

    let mut args = args_for(&input);
    args.out_dir = Some(out_dir.to_string_lossy().to_string());
    run(&args).expect("render should succeed");

    let first = fs::read_to_string(out_dir.join("slide-01.svg")).unwrap();
    let second = fs::read_to_string(out_dir.join("slide-02.svg")).unwrap();
    assert!(first.contains("Agenda"));
    assert!(second.contains("Revenue"));
    assert!(!out_dir.join("slide-03.svg").exists());
}

#[test]
fn test_deck_rejects_single_output() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("deck.json");
    fs::write(&input, DECK).unwrap();

    let mut args = args_for(&input);
    args.output = Some(dir.path().join("one.svg").to_string_lossy().to_string());
    assert!(matches!(run(&args), Err(CliError::Usage(_))));
}

#[test]
fn test_json_mode_reports_each_slide() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("deck.json");
    fs::write(
        &input,
        r#"[ { "title": "Fine", "layout": "title-only" }, null, { "layout": "chart" } ]"#,
    )
    .unwrap();

    let mut args = args_for(&input);
    args.json = true;
    let mut out = Vec::new();
    run_with_output(&args, &mut out).expect("json mode reports failures in-band");

    let results: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let results = results.as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(results[0]["success"], true);
    assert!(results[0]["svgData"].as_str().unwrap().contains("Fine"));
    assert_eq!(results[1]["error"], "structure が必要です");
    assert_eq!(results[2]["error"], "title が必要です");
}

#[test]
fn test_failed_slide_is_reported_with_position() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("deck.json");
    fs::write(
        &input,
        r#"[ { "title": "Ok", "layout": "title-only" },
            { "title": "Crowded", "layout": "title-content", "elements": [
                { "type": "text-block", "text": "a" }, { "type": "text-block", "text": "b" } ] } ]"#,
    )
    .unwrap();

    let mut args = args_for(&input);
    args.out_dir = Some(dir.path().to_string_lossy().to_string());
    match run(&args) {
        Err(CliError::Render { index, source }) => {
            assert_eq!(index, 2);
            assert!(matches!(source, SlideError::SlotCapacity { .. }));
        }
        other => panic!("expected render error, got {other:?}"),
    }
}

#[test]
fn test_invalid_json_input() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("broken.json");
    fs::write(&input, "{ not json").unwrap();
    assert!(matches!(run(&args_for(&input)), Err(CliError::Json(_))));
}

#[test]
fn test_missing_input_file() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("absent.json");
    assert!(matches!(run(&args_for(&input)), Err(CliError::Read { .. })));
}

#[test]
fn test_explicit_config_is_applied() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("slide.json");
    fs::write(
        &input,
        r#"{ "title": "Framed", "layout": "chart",
             "elements": [{ "type": "text-block", "text": "Body" }] }"#,
    )
    .unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[render]\nshow_slot_frames = true\n").unwrap();
    let output = dir.path().join("framed.svg");

    let mut args = args_for(&input);
    args.config = Some(config.to_string_lossy().to_string());
    args.output = Some(output.to_string_lossy().to_string());
    run(&args).expect("render should succeed");

    assert!(fs::read_to_string(&output).unwrap().contains("slot-frames"));
}

#[test]
fn test_broken_config_is_reported() {
    let dir = tempdir().expect("Failed to create temp directory");
    let input = dir.path().join("slide.json");
    fs::write(&input, TITLE_SLIDE).unwrap();
    let config = dir.path().join("config.toml");
    fs::write(&config, "[render\nshow_slot_frames = true").unwrap();

    let mut args = args_for(&input);
    args.config = Some(config.to_string_lossy().to_string());
    assert!(matches!(run(&args), Err(CliError::Config { .. })));
}

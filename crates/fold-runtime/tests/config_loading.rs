//! Loading `FoldConfig` from TOML and JSON.

use fold_core::Edge;
use fold_render::CaptureQuality;
use fold_runtime::{FoldConfig, FoldConfigError};
use std::io::Write;

#[test]
fn empty_toml_is_default() {
    let config = FoldConfig::from_toml_str("").expect("parse");
    assert_eq!(config, FoldConfig::default());
}

#[test]
fn toml_overrides_selected_fields() {
    let src = r#"
edge_scroll_width = 24.0
tick_interval_ms = 16
capture_quality = "full"

[thresholds]
left = 0.5
right = 0.25
top = 0.3
bottom = 0.3

[restore]
divisor = 6.0
tolerance = 1.0
"#;
    let config = FoldConfig::from_toml_str(src).expect("parse");
    assert_eq!(config.edge_scroll_width, 24.0);
    assert_eq!(config.tick_interval_ms, 16);
    assert_eq!(config.capture_quality, CaptureQuality::Full);
    assert_eq!(config.thresholds.get(Edge::Left), 0.5);
    assert_eq!(config.restore.divisor, 6.0);
    // Untouched sections keep their defaults.
    assert_eq!(config.easing, FoldConfig::default().easing);
    assert!(config.validate().is_empty());
}

#[test]
fn partial_threshold_section_keeps_other_edges() {
    let config = FoldConfig::from_toml_str("[thresholds]\nleft = 0.5\n").expect("parse");
    assert_eq!(config.thresholds.left, 0.5);
    assert_eq!(config.thresholds.get(Edge::Right), 0.3);
    assert_eq!(config.thresholds.get(Edge::Top), 0.3);
    assert_eq!(config.thresholds.get(Edge::Bottom), 0.3);
    assert!(config.validate().is_empty());
}

#[test]
fn partial_easing_profiles_fill_missing_keys() {
    let src = r#"
[restore]
divisor = 6.0

[easing.top]
tolerance = 1.5
"#;
    let config = FoldConfig::from_toml_str(src).expect("parse");
    let defaults = FoldConfig::default();
    assert_eq!(config.restore.divisor, 6.0);
    assert_eq!(config.restore.tolerance, 5.0);
    assert_eq!(config.easing.top.divisor, 4.0);
    assert_eq!(config.easing.top.tolerance, 1.5);
    // Edges not named keep their built-in profile.
    assert_eq!(config.easing_for(Edge::Left), defaults.easing_for(Edge::Left));
    assert_eq!(config.easing.bottom, defaults.easing.bottom);
}

#[test]
fn partial_json_sections_load() {
    let config = FoldConfig::from_json_str(r#"{"thresholds": {"bottom": 0.6}}"#).expect("parse");
    assert_eq!(config.thresholds.bottom, 0.6);
    assert_eq!(config.thresholds.left, 0.3);
}

#[test]
fn json_round_trips_through_file() {
    let mut config = FoldConfig::default();
    config.horizontal_edge_dragging = true;
    let json = serde_json::to_string(&config).expect("serialize");

    let mut file = tempfile::NamedTempFile::new().expect("tempfile");
    file.write_all(json.as_bytes()).expect("write");
    let loaded = FoldConfig::from_json_file(file.path()).expect("load");
    assert_eq!(loaded, config);
}

#[test]
fn toml_file_missing_is_io_error() {
    let err = FoldConfig::from_toml_file("/nonexistent/paperfold.toml").expect_err("missing");
    assert!(matches!(err, FoldConfigError::Io(_)));
}

#[test]
fn malformed_toml_is_parse_error() {
    let err = FoldConfig::from_toml_str("tick_interval_ms = \"soon\"").expect_err("bad type");
    assert!(matches!(err, FoldConfigError::Toml(_)));
}

#[test]
fn loaded_values_are_validated() {
    let err = FoldConfig::from_toml_str("tick_interval_ms = 0")
        .and_then(FoldConfig::validated)
        .expect_err("zero tick");
    assert!(matches!(err, FoldConfigError::Validation(ref errors) if errors.len() == 1));
}

#[test]
fn toml_string_round_trip() {
    let config = FoldConfig::default();
    let text = config.to_toml_string().expect("serialize");
    assert_eq!(FoldConfig::from_toml_str(&text).expect("parse"), config);
}

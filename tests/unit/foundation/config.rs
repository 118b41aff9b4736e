use super::*;

#[test]
fn partial_json_keeps_defaults() {
    let cfg = LayoutConfig::from_json_str(r#"{ "frame_margin": 0.1, "code_window": 4 }"#).unwrap();
    assert_eq!(cfg.frame_margin, 0.1);
    assert_eq!(cfg.code_window, 4);
    assert_eq!(cfg.max_radius_ratio, LayoutConfig::default().max_radius_ratio);
}

#[test]
fn invalid_values_are_rejected() {
    let err = LayoutConfig::from_json_str(r#"{ "node_radius": 0.0 }"#).unwrap_err();
    assert!(matches!(err, LayoutError::DegenerateGeometry(_)));

    let err = LayoutConfig::from_json_str(r#"{ "max_radius_ratio": 0.5 }"#).unwrap_err();
    assert!(matches!(err, LayoutError::DegenerateGeometry(_)));

    let err = LayoutConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, LayoutError::Serde(_)));
}

#[test]
fn style_roundtrips_through_json() {
    let style = Style {
        creation: CreationStyle::Write,
        highlighting: false,
        ..Style::default()
    };
    let json = serde_json::to_string(&style).unwrap();
    let back: Style = serde_json::from_str(&json).unwrap();
    assert_eq!(back, style);
}

#[test]
fn with_colors_overrides_only_box_and_text() {
    let style = Style::default().with_colors(Rgba8::RED, Rgba8::BLACK);
    assert_eq!(style.color, Rgba8::RED);
    assert_eq!(style.text_color, Rgba8::BLACK);
    assert_eq!(style.line_color, Style::default().line_color);
}

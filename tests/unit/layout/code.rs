use super::*;
use crate::foundation::core::{Anchor, Rect};

fn viewport(scene: &mut Scene, lines: &[Vec<&str>], cfg: LayoutConfig) -> CodeViewport {
    let frame = Frame::new(
        scene,
        Rect::new(0.0, 0.0, 6.0, 8.0),
        Anchor::Center,
        cfg.frame_margin,
    )
    .unwrap();
    CodeViewport::new(scene, lines, frame, Style::default(), cfg).unwrap()
}

fn numbered(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("line {i}")).collect()
}

fn tops(scene: &Scene, rows: &[ElementId]) -> Vec<f64> {
    rows.iter()
        .map(|&r| scene.require_bounds(r).unwrap().top())
        .collect()
}

#[test]
fn scrolls_down_to_reach_a_line_below_the_window() {
    let mut scene = Scene::new();
    let cfg = LayoutConfig::default();
    let frame = Frame::new(
        &mut scene,
        Rect::new(0.0, 0.0, 6.0, 8.0),
        Anchor::Center,
        cfg.frame_margin,
    )
    .unwrap();
    let mut code =
        CodeViewport::from_plain(&mut scene, &numbered(12), frame, Style::default(), cfg).unwrap();
    assert_eq!(code.window(), 0..10);
    let before = tops(&scene, code.visible_rows());

    let batches = code.move_indicator_to_line(&mut scene, 12).unwrap();
    assert_eq!(batches.len(), 3);
    for step in &batches[..2] {
        assert_eq!(step.count("fade_out"), 1);
        assert_eq!(step.count("fade_in"), 1);
        assert_eq!(step.count("move"), 10);
        assert!((step.run_time - 0.1).abs() < 1e-12);
    }
    assert!(matches!(
        batches[2].transitions[0],
        Transition::FadeIn { target } if target == code.pointer()
    ));
    assert_eq!(code.window(), 2..12);

    let after = tops(&scene, code.visible_rows());
    for (a, b) in before.iter().zip(&after) {
        assert!((a - b).abs() < 1e-9);
    }
    let row = scene.require_bounds(code.rows()[11]).unwrap();
    let pointer = scene.require_bounds(code.pointer()).unwrap();
    assert!((pointer.center().y - row.center().y).abs() < 1e-9);
    assert!((row.left() - pointer.right() - 0.25).abs() < 1e-9);
    assert!(code.frame().contains_content(&scene, 0.0).unwrap());
    assert_eq!(scene.parent(code.rows()[0]).unwrap(), None);
}

#[test]
fn scrolling_up_hides_the_pointer_first() {
    let mut scene = Scene::new();
    let lines: Vec<Vec<&str>> = vec![vec!["a"], vec!["b1", "b2"], vec!["c"]];
    let cfg = LayoutConfig {
        code_window: 2,
        ..LayoutConfig::default()
    };
    let mut code = viewport(&mut scene, &lines, cfg);
    assert_eq!(code.total_rows(), 4);
    assert_eq!(code.line_rows(2).unwrap(), 1..3);

    let down = code.move_indicator_to_line(&mut scene, 2).unwrap();
    assert_eq!(down.len(), 2);
    assert_eq!(code.window(), 1..3);

    let up = code.move_indicator_to_line(&mut scene, 1).unwrap();
    assert_eq!(up.len(), 3);
    assert_eq!(up[0].count("fade_out"), 1);
    assert_eq!(up[1].count("move"), 2);
    assert_eq!(up[2].count("fade_in"), 1);
    assert_eq!(code.window(), 0..2);
    assert!(code.pointer_shown());
}

#[test]
fn moving_inside_the_window_slides_the_pointer() {
    let mut scene = Scene::new();
    let lines: Vec<Vec<&str>> = vec![vec!["x = 1"], vec!["y = 2"], vec!["z = 3"]];
    let mut code = viewport(&mut scene, &lines, LayoutConfig::default());
    assert_eq!(code.build()[0].count("fade_in"), 3);

    code.move_indicator_to_line(&mut scene, 1).unwrap();
    let batches = code.move_indicator_to_line(&mut scene, 3).unwrap();
    assert_eq!(batches.len(), 1);
    let Transition::Move {
        to: MoveTarget::By(d),
        ..
    } = batches[0].transitions[0]
    else {
        panic!("expected a pointer move");
    };
    assert!(d.y < 0.0 && d.x.abs() < 1e-9);
    assert!(code.move_indicator_to_line(&mut scene, 3).unwrap().is_empty());
}

#[test]
fn wide_code_is_scaled_into_the_frame() {
    let mut scene = Scene::new();
    let long = "x".repeat(60);
    let lines: Vec<Vec<&str>> = vec![vec![long.as_str()], vec!["y"]];
    let code = viewport(&mut scene, &lines, LayoutConfig::default());
    assert!(code.scale() < 1.0);
    assert!(code.frame().contains_content(&scene, 0.0).unwrap());
}

#[test]
fn bad_lines_are_rejected() {
    let mut scene = Scene::new();
    let frame = Frame::new(&mut scene, Rect::new(0.0, 0.0, 6.0, 8.0), Anchor::Center, 0.0).unwrap();
    let empty: Vec<Vec<&str>> = Vec::new();
    assert!(matches!(
        CodeViewport::new(
            &mut scene,
            &empty,
            frame.clone(),
            Style::default(),
            LayoutConfig::default()
        ),
        Err(LayoutError::DegenerateGeometry(_))
    ));
    let hollow: Vec<Vec<&str>> = vec![vec!["a"], vec![]];
    assert!(matches!(
        CodeViewport::new(
            &mut scene,
            &hollow,
            frame,
            Style::default(),
            LayoutConfig::default()
        ),
        Err(LayoutError::DegenerateGeometry(_))
    ));

    let lines: Vec<Vec<&str>> = vec![vec!["a"]];
    let mut code = viewport(&mut scene, &lines, LayoutConfig::default());
    assert!(matches!(
        code.move_indicator_to_line(&mut scene, 0),
        Err(LayoutError::Precondition(_))
    ));
    assert!(matches!(
        code.move_indicator_to_line(&mut scene, 2),
        Err(LayoutError::Precondition(_))
    ));
}

use super::*;
use crate::foundation::core::Rgba8;

fn grid(scene: &mut Scene) -> Array2D {
    let frame = Frame::new(scene, Rect::new(0.0, 0.0, 8.0, 6.0), Anchor::Center, 0.0).unwrap();
    Array2D::new(
        scene,
        &[vec![1, 2, 3], vec![4, 5, 6]],
        "grid",
        frame,
        Style::default(),
        LayoutConfig::default(),
    )
    .unwrap()
}

#[test]
fn rows_stack_top_down_inside_the_frame() {
    let mut scene = Scene::new();
    let g = grid(&mut scene);
    assert_eq!(g.values(), vec![vec!["1", "2", "3"], vec!["4", "5", "6"]]);

    let top = g.rows()[0].cells()[0].box_rect(&scene).unwrap();
    let bottom = g.rows()[1].cells()[0].box_rect(&scene).unwrap();
    assert!(top.bottom() >= bottom.top() - 1e-9);
    assert!((top.width() - g.side()).abs() < 1e-9);
    // Both rows share a left edge.
    assert!((top.left() - bottom.left()).abs() < 1e-9);

    // The title sits centred in the strip between the top row and the frame top.
    let title = scene.require_bounds(g.title().unwrap()).unwrap();
    assert!((title.center().y - (top.top() + 6.0) / 2.0).abs() < 1e-9);
    assert!(title.bottom() > top.top());
    assert!(g.frame().contains_content(&scene, 0.0).unwrap());
}

#[test]
fn short_title_is_capped_to_the_strip_above_the_rows() {
    let mut scene = Scene::new();
    let frame = Frame::new(&mut scene, Rect::new(0.0, 0.0, 6.0, 4.0), Anchor::Center, 0.0).unwrap();
    let g = Array2D::new(
        &mut scene,
        &[vec![1, 2], vec![3, 4]],
        "A",
        frame,
        Style::default(),
        LayoutConfig::default(),
    )
    .unwrap();

    let title = scene.require_bounds(g.title().unwrap()).unwrap();
    let top_row = g.rows()[0].frame().content_bounds(&scene).unwrap().unwrap();
    assert!(g.frame().contains_content(&scene, 0.0).unwrap());
    assert!(title.top() <= 4.0 + 1e-9);
    assert!(title.bottom() >= top_row.top() - 1e-9);
    // Height-bound: the strip is 0.75 tall, so the title is narrower than its slot.
    assert!((title.height() - 0.75).abs() < 1e-9);
    assert!(title.width() < LayoutConfig::default().title_width);
}

#[test]
fn ragged_or_empty_grids_are_degenerate() {
    let mut scene = Scene::new();
    let frame = Frame::new(&mut scene, Rect::new(0.0, 0.0, 8.0, 6.0), Anchor::Center, 0.0).unwrap();
    let ragged = Array2D::new(
        &mut scene,
        &[vec![1, 2], vec![3]],
        "",
        frame.clone(),
        Style::default(),
        LayoutConfig::default(),
    );
    assert!(matches!(ragged, Err(LayoutError::DegenerateGeometry(_))));

    let empty: Vec<Vec<i32>> = Vec::new();
    let none = Array2D::new(
        &mut scene,
        &empty,
        "",
        frame,
        Style::default(),
        LayoutConfig::default(),
    );
    assert!(matches!(none, Err(LayoutError::DegenerateGeometry(_))));
}

#[test]
fn build_creates_every_cell_and_the_title() {
    let mut scene = Scene::new();
    let g = grid(&mut scene);
    let batches = g.build();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].count("fade_in"), 7);
}

#[test]
fn swap_dims_bystanders_then_restores_them() {
    let mut scene = Scene::new();
    let mut g = grid(&mut scene);
    let batches = g.swap(&mut scene, (1, 2), (0, 0)).unwrap();
    assert_eq!(batches.len(), 3);
    assert_eq!(batches[0].count("recolor"), 4);
    assert!(batches[0].transitions.iter().all(|t| matches!(
        t,
        Transition::Recolor { color, .. } if *color == Rgba8::GREY
    )));
    assert_eq!(batches[1].count("rotate"), 2);
    assert!(batches[1].transitions.iter().all(|t| matches!(
        t,
        Transition::Rotate {
            rotation: Rotation::CounterClockwise,
            ..
        }
    )));
    assert_eq!(batches[2].count("recolor"), 4);
    assert_eq!(g.values(), vec![vec!["6", "2", "3"], vec!["4", "5", "1"]]);
}

#[test]
fn swap_within_one_row() {
    let mut scene = Scene::new();
    let mut g = grid(&mut scene);
    g.swap(&mut scene, (1, 0), (1, 1)).unwrap();
    assert_eq!(g.values()[1], vec!["5", "4", "6"]);
    assert!(g.swap(&mut scene, (0, 0), (0, 0)).unwrap().is_empty());
    assert!(matches!(
        g.swap(&mut scene, (0, 0), (2, 0)),
        Err(LayoutError::Precondition(_))
    ));
}

#[test]
fn replace_row_checks_its_length() {
    let mut scene = Scene::new();
    let mut g = grid(&mut scene);
    assert!(matches!(
        g.replace_row(&mut scene, 0, &[7, 8]),
        Err(LayoutError::Precondition(_))
    ));
    let batches = g.replace_row(&mut scene, 0, &[7, 8, 9]).unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].count("transform"), 3);
    g.replace_value(&mut scene, 1, 1, "0").unwrap();
    assert_eq!(g.values(), vec![vec!["7", "8", "9"], vec!["4", "0", "6"]]);
}

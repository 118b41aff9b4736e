use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn short_values_keep_natural_size() {
    let mut scene = Scene::new();
    let cell = Cell::new(
        &mut scene,
        "7",
        1.5,
        0.75,
        &Style::default(),
        &LayoutConfig::default(),
    )
    .unwrap();
    let text = scene.require_bounds(cell.text()).unwrap();
    assert!(close(text.width(), 0.25));
    assert!(close(text.height(), 0.4));
    assert_eq!(cell.box_rect(&scene).unwrap(), Rect::new(-0.75, -0.375, 0.75, 0.375));
    assert_eq!(cell.center(&scene).unwrap(), Point::ORIGIN);
}

#[test]
fn long_values_are_scaled_into_the_box() {
    let mut scene = Scene::new();
    let cfg = LayoutConfig::default();
    let cell = Cell::new(&mut scene, "12345678", 1.5, 0.75, &Style::default(), &cfg).unwrap();
    let text = scene.require_bounds(cell.text()).unwrap();
    assert!(close(text.width(), cfg.cell_text_width_ratio * 1.5));
    assert!(text.height() <= cfg.cell_text_height_ratio * 0.75 + 1e-9);
    assert_eq!(text.center(), Point::ORIGIN);
}

#[test]
fn illegible_text_is_unfittable() {
    let mut scene = Scene::new();
    let err = Cell::new(
        &mut scene,
        "1",
        0.01,
        0.01,
        &Style::default(),
        &LayoutConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, LayoutError::UnfittableContent(_)));
}

#[test]
fn replace_value_transforms_text_in_place() {
    let mut scene = Scene::new();
    let style = Style::default();
    let cfg = LayoutConfig::default();
    let mut cell = Cell::new(&mut scene, "1", 1.0, 1.0, &style, &cfg).unwrap();
    scene
        .translate(cell.group(), crate::foundation::core::Vec2::new(2.0, 3.0))
        .unwrap();
    let old = cell.text();
    let t = cell.replace_value(&mut scene, "42", &style, &cfg).unwrap();
    assert_eq!(
        t,
        Transition::Transform {
            from: old,
            into: cell.text()
        }
    );
    assert_eq!(cell.value(), "42");
    assert_eq!(scene.text_content(cell.text()).unwrap(), "42");
    assert_eq!(
        scene.require_bounds(cell.text()).unwrap().center(),
        Point::new(2.0, 3.0)
    );
    assert_eq!(scene.parent(old).unwrap(), None);
    assert_eq!(scene.parent(cell.text()).unwrap(), Some(cell.group()));
}

#[test]
fn recolor_touches_box_and_text() {
    let mut scene = Scene::new();
    let mut cell = Cell::new(
        &mut scene,
        "1",
        1.0,
        1.0,
        &Style::default(),
        &LayoutConfig::default(),
    )
    .unwrap();
    let ts = cell
        .recolor(&mut scene, Rgba8::YELLOW, Rgba8::BLACK)
        .unwrap();
    assert_eq!(ts.len(), 2);
    assert_eq!(cell.color(), Rgba8::YELLOW);
    assert_eq!(cell.text_color(), Rgba8::BLACK);
}

#[test]
fn scale_to_width_scales_uniformly() {
    let mut scene = Scene::new();
    let mut cell = Cell::new(
        &mut scene,
        "1",
        1.5,
        0.75,
        &Style::default(),
        &LayoutConfig::default(),
    )
    .unwrap();
    let f = cell.scale_to_width(&mut scene, 3.0).unwrap();
    assert!(close(f, 2.0));
    assert!(close(cell.width(&scene).unwrap(), 3.0));
    assert!(close(cell.height(&scene).unwrap(), 1.5));
}

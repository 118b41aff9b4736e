use super::*;
use crate::foundation::core::Rect;

fn block(scene: &mut Scene, variables: &[&str]) -> VariableBlock {
    let frame = Frame::new(scene, Rect::new(0.0, 0.0, 5.0, 3.0), Anchor::Center, 0.0).unwrap();
    VariableBlock::new(
        scene,
        variables,
        frame,
        Style::default(),
        LayoutConfig::default(),
    )
    .unwrap()
}

#[test]
fn rows_are_left_aligned_and_centred() {
    let mut scene = Scene::new();
    let long = format!("s = {}", "x".repeat(40));
    let b = block(&mut scene, &["i = 0", long.as_str()]);
    let listing = b.listing().unwrap();
    let rows = scene.children(listing).unwrap().to_vec();
    let first = scene.require_bounds(rows[0]).unwrap();
    let second = scene.require_bounds(rows[1]).unwrap();
    assert!((first.left() - second.left()).abs() < 1e-9);
    assert!((first.bottom() - second.top() - 0.25).abs() < 1e-9);
    assert!((second.width() - 4.0).abs() < 1e-9);

    let whole = scene.require_bounds(listing).unwrap();
    assert!((whole.center() - Rect::new(0.0, 0.0, 5.0, 3.0).center()).hypot() < 1e-9);
    assert_eq!(b.build()[0].count("fade_in"), 1);
}

#[test]
fn update_morphs_appears_and_fades() {
    let mut scene = Scene::new();
    let mut b = block(&mut scene, &[]);
    assert!(b.build().is_empty());
    assert!(b.update(&mut scene, &[] as &[&str]).unwrap().is_empty());

    let appear = b.update(&mut scene, &["i = 0"]).unwrap();
    assert_eq!(appear[0].count("fade_in"), 1);

    let morph = b.update(&mut scene, &["i = 1", "j = 2"]).unwrap();
    assert_eq!(morph[0].count("transform"), 1);
    assert_eq!(b.entries(), ["i = 1", "j = 2"]);

    let old = b.listing().unwrap();
    let gone = b.update(&mut scene, &[] as &[&str]).unwrap();
    assert!(matches!(
        gone[0].transitions[0],
        Transition::FadeOut { target } if target == old
    ));
    assert_eq!(b.listing(), None);
    assert_eq!(b.frame().content_bounds(&scene).unwrap(), None);
}

#[test]
fn long_listings_shrink_into_the_panel() {
    let mut scene = Scene::new();
    let names: Vec<String> = (0..20).map(|i| format!("v{i} = {i}")).collect();
    let refs: Vec<&str> = names.iter().map(String::as_str).collect();
    let b = block(&mut scene, &refs);
    assert!(b.frame().contains_content(&scene, 0.0).unwrap());
}

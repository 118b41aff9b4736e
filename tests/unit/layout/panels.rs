use super::*;

fn close(a: Rect, b: Rect) -> bool {
    (a.x0 - b.x0).abs() < 1e-9
        && (a.y0 - b.y0).abs() < 1e-9
        && (a.x1 - b.x1).abs() < 1e-9
        && (a.y1 - b.y1).abs() < 1e-9
}

#[test]
fn default_split_has_three_panels() {
    let t = PanelTemplate::new(Rect::new(0.0, 0.0, 12.0, 9.0), PanelOptions::default()).unwrap();
    assert!(close(t.rect(Panel::Variables).unwrap(), Rect::new(0.0, 6.0, 4.0, 9.0)));
    assert!(close(t.rect(Panel::Code).unwrap(), Rect::new(0.0, 0.0, 4.0, 6.0)));
    assert!(close(t.rect(Panel::Structures).unwrap(), Rect::new(4.0, 0.0, 12.0, 9.0)));
    assert_eq!(t.rect(Panel::Subtitles), None);
}

#[test]
fn optional_panels_reshape_the_rest() {
    let full = PanelTemplate::new(
        Rect::new(0.0, 0.0, 12.0, 8.0),
        PanelOptions {
            code: false,
            variables: false,
            subtitles: true,
        },
    )
    .unwrap();
    assert_eq!(full.rect(Panel::Code), None);
    assert!(close(full.rect(Panel::Subtitles).unwrap(), Rect::new(0.0, 0.0, 12.0, 1.0)));
    assert!(close(full.rect(Panel::Structures).unwrap(), Rect::new(0.0, 1.0, 12.0, 8.0)));

    let tall_code = PanelTemplate::new(
        Rect::new(0.0, 0.0, 12.0, 8.0),
        PanelOptions {
            variables: false,
            ..PanelOptions::default()
        },
    )
    .unwrap();
    assert!(close(tall_code.rect(Panel::Code).unwrap(), Rect::new(0.0, 0.0, 4.0, 8.0)));
    assert_eq!(tall_code.rect(Panel::Variables), None);
}

#[test]
fn frames_cover_their_panels() {
    let mut scene = Scene::new();
    let t = PanelTemplate::standard(PanelOptions::default()).unwrap();
    let frame = t
        .frame(&mut scene, Panel::Code, Anchor::Center, 0.25)
        .unwrap()
        .unwrap();
    assert!(close(frame.rect(), t.rect(Panel::Code).unwrap()));
    assert!(t
        .frame(&mut scene, Panel::Subtitles, Anchor::Center, 0.0)
        .unwrap()
        .is_none());
    assert!(PanelTemplate::new(Rect::new(0.0, 0.0, 0.0, 4.0), PanelOptions::default()).is_err());
}

use super::*;

#[test]
fn creation_style_maps_to_a_closed_variant() {
    let id = ElementId(3);
    assert_eq!(
        CreationStyle::FadeIn.transition(id),
        Transition::FadeIn { target: id }
    );
    assert_eq!(
        CreationStyle::Write.transition(id),
        Transition::Write { target: id }
    );
    assert_eq!(
        CreationStyle::GrowFromCenter.transition(id),
        Transition::GrowFromCenter { target: id }
    );
}

#[test]
fn target_of_a_morph_is_its_source() {
    let t = Transition::Rotate {
        from: ElementId(1),
        into: ElementId(2),
        rotation: Rotation::CounterClockwise,
    };
    assert_eq!(t.target(), ElementId(1));
    assert_eq!(t.kind_name(), "rotate");
}

#[test]
fn batch_counts_by_kind() {
    let b = Batch::new(
        vec![
            Transition::FadeIn {
                target: ElementId(0),
            },
            Transition::Move {
                target: ElementId(1),
                to: MoveTarget::By(Vec2::new(1.0, 0.0)),
            },
            Transition::Move {
                target: ElementId(2),
                to: MoveTarget::By(Vec2::new(-1.0, 0.0)),
            },
        ],
        1.0,
    );
    assert_eq!(b.len(), 3);
    assert_eq!(b.count("move"), 2);
    assert_eq!(b.count("scale"), 0);
}

#[test]
fn push_batch_skips_empty_batches() {
    let mut out = Vec::new();
    push_batch(&mut out, Batch::new(Vec::new(), 1.0));
    assert!(out.is_empty());
    push_batch(
        &mut out,
        Batch::single(
            Transition::FadeOut {
                target: ElementId(0),
            },
            1.0,
        ),
    );
    assert_eq!(out.len(), 1);
}

#[test]
fn transitions_serialize_with_a_kind_tag() {
    let t = Transition::Scale {
        target: ElementId(4),
        factor: 0.5,
        about: Point::new(1.0, 2.0),
    };
    let v = serde_json::to_value(&t).unwrap();
    assert_eq!(v["kind"], "scale");
    assert_eq!(v["factor"], 0.5);
    let back: Transition = serde_json::from_value(v).unwrap();
    assert_eq!(back, t);
}

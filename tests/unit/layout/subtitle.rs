use super::*;
use crate::animation::sequencer::{RecordingPlayback, Sequencer};
use crate::foundation::core::Rect;

fn strip(scene: &mut Scene) -> SubtitleBlock {
    let frame = Frame::new(scene, Rect::new(0.0, 0.0, 4.0, 1.0), Anchor::Center, 0.1).unwrap();
    SubtitleBlock::new(frame, Style::default(), LayoutConfig::default())
}

#[test]
fn display_fits_and_schedules_the_hide() {
    let mut scene = Scene::new();
    let mut sub = strip(&mut scene);
    let caption = "a caption far too long for this strip";
    let (show, hide) = sub.display(&mut scene, caption, 3.0).unwrap();
    assert_eq!(show.count("write"), 1);
    assert_eq!(hide.at, 3.0);
    assert!(matches!(
        hide.transition,
        Transition::Uncreate { target } if Some(target) == sub.text()
    ));
    let b = scene.require_bounds(sub.text().unwrap()).unwrap();
    assert!((b.width() - 3.8).abs() < 1e-9);
    assert!(sub.frame().contains_content(&scene, 0.0).unwrap());
}

#[test]
fn replacing_a_caption_uncreates_the_old_one() {
    let mut scene = Scene::new();
    let mut sub = strip(&mut scene);
    sub.display(&mut scene, "one", 1.0).unwrap();
    let (show, _) = sub.display(&mut scene, "two", 2.0).unwrap();
    assert_eq!(show.count("uncreate"), 1);
    assert_eq!(show.count("write"), 1);
    assert_eq!(sub.end_time(), 2.0);

    assert_eq!(sub.clear(&mut scene).unwrap().len(), 1);
    assert!(!sub.is_showing());
    assert!(sub.clear(&mut scene).unwrap().is_empty());
    assert!(matches!(
        sub.display(&mut scene, "x", f64::NAN),
        Err(LayoutError::Precondition(_))
    ));
}

#[test]
fn hide_event_fires_between_batches() {
    let mut scene = Scene::new();
    let mut sub = strip(&mut scene);
    let (show, hide) = sub.display(&mut scene, "hello", 1.5).unwrap();

    let mut seq = Sequencer::new();
    seq.schedule_overlay(hide).unwrap();
    let filler = Batch::single(Transition::FadeIn { target: sub.text().unwrap() }, 1.0);
    seq.linear([show, filler.clone(), filler]);
    let mut playback = RecordingPlayback::new();
    assert_eq!(seq.play(&mut playback).unwrap(), 4);
    assert_eq!(playback.timeline[2].batch.count("uncreate"), 1);
    assert_eq!(playback.timeline[2].start, 2.0);
}

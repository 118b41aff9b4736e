use super::*;
use crate::scene::element::ElementId;

fn fade(id: u32, run_time: f64) -> Batch {
    Batch::single(
        Transition::FadeIn {
            target: ElementId(id),
        },
        run_time,
    )
}

struct FailingPlayback;

impl Playback for FailingPlayback {
    fn play(&mut self, _batch: &Batch) -> LayoutResult<()> {
        Err(LayoutError::Other(anyhow::anyhow!("renderer gone")))
    }

    fn elapsed(&self) -> f64 {
        0.0
    }
}

#[test]
fn linear_batches_play_in_order_on_the_clock() {
    let mut seq = Sequencer::new();
    seq.linear([fade(0, 1.0), fade(1, 0.5), Batch::new(Vec::new(), 3.0)]);
    let mut pb = RecordingPlayback::new();
    assert_eq!(seq.play(&mut pb).unwrap(), 2);
    assert_eq!(pb.timeline[0].start, 0.0);
    assert_eq!(pb.timeline[1].start, 1.0);
    assert_eq!(pb.elapsed(), 1.5);
    assert!(seq.pending().is_empty());
}

#[test]
fn atomic_merges_into_one_concurrent_batch() {
    let mut seq = Sequencer::new();
    seq.atomic([fade(0, 1.0), fade(1, 2.0)]);
    assert_eq!(seq.pending().len(), 1);
    assert_eq!(seq.pending()[0].len(), 2);
    assert_eq!(seq.pending()[0].run_time, 2.0);
}

#[test]
fn due_overlays_are_spliced_between_batches() {
    let mut seq = Sequencer::new();
    seq.linear([fade(0, 1.0), fade(1, 1.0), fade(2, 1.0)]);
    seq.schedule_overlay(OverlayEvent {
        at: 1.5,
        transition: Transition::Uncreate {
            target: ElementId(9),
        },
        run_time: 0.25,
    })
    .unwrap();
    seq.schedule_overlay(OverlayEvent {
        at: 100.0,
        transition: Transition::Uncreate {
            target: ElementId(10),
        },
        run_time: 0.25,
    })
    .unwrap();

    let mut pb = RecordingPlayback::new();
    assert_eq!(seq.play(&mut pb).unwrap(), 4);
    let targets: Vec<_> = pb
        .timeline
        .iter()
        .map(|p| p.batch.transitions[0].target())
        .collect();
    // Elapsed is 2.0 when batch 2 is requested, so the overlay goes first.
    assert_eq!(
        targets,
        vec![ElementId(0), ElementId(1), ElementId(9), ElementId(2)]
    );
    assert_eq!(seq.pending_overlays().len(), 1);
}

#[test]
fn overlays_with_equal_times_keep_insertion_order() {
    let mut seq = Sequencer::new();
    for id in [5, 6, 7] {
        seq.schedule_overlay(OverlayEvent {
            at: 0.0,
            transition: Transition::FadeOut {
                target: ElementId(id),
            },
            run_time: 0.1,
        })
        .unwrap();
    }
    seq.linear([fade(0, 1.0)]);
    let mut pb = RecordingPlayback::new();
    seq.play(&mut pb).unwrap();
    let targets: Vec<_> = pb
        .timeline
        .iter()
        .map(|p| p.batch.transitions[0].target().0)
        .collect();
    assert_eq!(targets, vec![5, 6, 7, 0]);
}

#[test]
fn non_finite_overlay_time_is_rejected() {
    let mut seq = Sequencer::new();
    let err = seq
        .schedule_overlay(OverlayEvent {
            at: f64::NAN,
            transition: Transition::FadeOut {
                target: ElementId(0),
            },
            run_time: 0.1,
        })
        .unwrap_err();
    assert!(matches!(err, LayoutError::Precondition(_)));
}

#[test]
fn playback_failure_propagates() {
    let mut seq = Sequencer::new();
    seq.linear([fade(0, 1.0)]);
    let err = seq.play(&mut FailingPlayback).unwrap_err();
    assert!(err.to_string().contains("renderer gone"));
}

#[test]
fn recording_serializes_to_json() {
    let mut pb = RecordingPlayback::new();
    pb.play(&fade(3, 1.0)).unwrap();
    let json = pb.to_json().unwrap();
    assert!(json.contains("\"fade_in\""));
}

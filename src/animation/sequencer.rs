use crate::{
    animation::transition::{Batch, Transition},
    foundation::error::{LayoutError, LayoutResult},
};

/// Playback collaborator.
///
/// `play` must not return until the batch has finished; the sequencer never
/// issues the next batch before that.
pub trait Playback {
    /// Play `batch` to completion.
    fn play(&mut self, batch: &Batch) -> LayoutResult<()>;

    /// Seconds of scene time elapsed so far.
    fn elapsed(&self) -> f64;
}

/// Overlay show/hide transition due at a given elapsed time.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayEvent {
    /// Elapsed scene time at which the event becomes due.
    pub at: f64,
    /// Show or hide transition to play.
    pub transition: Transition,
    /// Duration hint in seconds.
    pub run_time: f64,
}

/// Orders transition batches into a single linear timeline.
#[derive(Clone, Debug, Default)]
pub struct Sequencer {
    queue: Vec<Batch>,
    overlays: Vec<OverlayEvent>,
}

impl Sequencer {
    /// Empty sequencer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue batches that play one after another.
    pub fn linear(&mut self, batches: impl IntoIterator<Item = Batch>) -> &mut Self {
        self.queue
            .extend(batches.into_iter().filter(|b| !b.is_empty()));
        self
    }

    /// Queue the union of several batches as one concurrent batch.
    pub fn atomic(&mut self, batches: impl IntoIterator<Item = Batch>) -> &mut Self {
        let mut merged = Batch::new(Vec::new(), 0.0);
        for b in batches {
            merged.run_time = merged.run_time.max(b.run_time);
            merged.transitions.extend(b.transitions);
        }
        if !merged.is_empty() {
            self.queue.push(merged);
        }
        self
    }

    /// Schedule `event`, keeping overlays ordered by due time.
    ///
    /// A non-finite `at` is a [`LayoutError::Precondition`].
    pub fn schedule_overlay(&mut self, event: OverlayEvent) -> LayoutResult<&mut Self> {
        if !event.at.is_finite() {
            return Err(LayoutError::precondition(
                "overlay time must be finite",
            ));
        }
        // Stable by time so events sharing a timestamp keep insertion order.
        let idx = self.overlays.partition_point(|e| e.at <= event.at);
        self.overlays.insert(idx, event);
        Ok(self)
    }

    /// Batches queued but not yet played.
    pub fn pending(&self) -> &[Batch] {
        &self.queue
    }

    /// Overlay events not yet issued.
    pub fn pending_overlays(&self) -> &[OverlayEvent] {
        &self.overlays
    }

    /// Play every queued batch in order, splicing in due overlay events
    /// before each one. Returns the number of batches issued.
    #[tracing::instrument(skip_all, fields(queued = self.queue.len()))]
    pub fn play<P: Playback + ?Sized>(&mut self, playback: &mut P) -> LayoutResult<usize> {
        let queue = std::mem::take(&mut self.queue);
        let mut issued = 0;
        for batch in &queue {
            issued += self.flush_due_overlays(playback)?;
            playback.play(batch)?;
            issued += 1;
        }
        Ok(issued)
    }

    fn flush_due_overlays<P: Playback + ?Sized>(&mut self, playback: &mut P) -> LayoutResult<usize> {
        let now = playback.elapsed();
        let due = self.overlays.partition_point(|e| e.at <= now);
        let mut issued = 0;
        for event in self.overlays.drain(..due).collect::<Vec<_>>() {
            tracing::debug!(at = event.at, now, kind = event.transition.kind_name(), "overlay due");
            playback.play(&Batch::single(event.transition, event.run_time))?;
            issued += 1;
        }
        Ok(issued)
    }
}

/// A batch as it landed on the recorded timeline.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct PlayedBatch {
    /// Virtual clock reading when the batch started.
    pub start: f64,
    /// The batch itself.
    pub batch: Batch,
}

/// Deterministic playback that records batches on a virtual clock.
#[derive(Clone, Debug, Default, serde::Serialize)]
pub struct RecordingPlayback {
    /// Every batch played so far, in order.
    pub timeline: Vec<PlayedBatch>,
    clock: f64,
}

impl RecordingPlayback {
    /// Recorder with the clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pretty JSON dump of the timeline.
    pub fn to_json(&self) -> LayoutResult<String> {
        serde_json::to_string_pretty(&self.timeline).map_err(|e| LayoutError::serde(e.to_string()))
    }
}

impl Playback for RecordingPlayback {
    fn play(&mut self, batch: &Batch) -> LayoutResult<()> {
        self.timeline.push(PlayedBatch {
            start: self.clock,
            batch: batch.clone(),
        });
        self.clock += batch.run_time.max(0.0);
        Ok(())
    }

    fn elapsed(&self) -> f64 {
        self.clock
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/sequencer.rs"]
mod tests;

use crate::{
    animation::sequencer::OverlayEvent,
    animation::transition::{Batch, Transition},
    foundation::config::{LayoutConfig, Style},
    foundation::core::Anchor,
    foundation::error::{LayoutError, LayoutResult},
    foundation::math::fit_factor,
    layout::frame::Frame,
    scene::element::ElementId,
    scene::store::Scene,
};

/// Timed caption strip.
///
/// [`SubtitleBlock::display`] shows a caption immediately and hands back the
/// event that hides it, for the sequencer to fire once playback passes
/// `end_time`.
#[derive(Clone, Debug)]
pub struct SubtitleBlock {
    frame: Frame,
    text: Option<ElementId>,
    end_time: f64,
    style: Style,
    cfg: LayoutConfig,
}

impl SubtitleBlock {
    /// Empty caption strip.
    pub fn new(frame: Frame, style: Style, cfg: LayoutConfig) -> Self {
        Self {
            frame,
            text: None,
            end_time: 0.0,
            style,
            cfg,
        }
    }

    /// Strip the captions are fitted into.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Caption on screen, if any.
    pub fn text(&self) -> Option<ElementId> {
        self.text
    }

    /// Whether a caption is on screen.
    pub fn is_showing(&self) -> bool {
        self.text.is_some()
    }

    /// Scene time at which the current caption is due to leave.
    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    /// Write `caption`, uncreating the previous one.
    ///
    /// Returns the appearance batch and the overlay event that hides the caption
    /// at `end_time`.
    #[tracing::instrument(skip(self, scene))]
    pub fn display(
        &mut self,
        scene: &mut Scene,
        caption: &str,
        end_time: f64,
    ) -> LayoutResult<(Batch, OverlayEvent)> {
        if !end_time.is_finite() {
            return Err(LayoutError::precondition("subtitle end time must be finite"));
        }
        let text = scene.text(caption, self.style.text_color, &self.style)?;
        let natural = scene.require_bounds(text)?;
        let r = self.frame.rect();
        let m = self.frame.margin();
        let factor = fit_factor(
            (r.width() - 2.0 * m, r.height() - 2.0 * m),
            (natural.width().max(f64::MIN_POSITIVE), natural.height()),
        )?
        .min(1.0);
        if natural.height() * factor < self.cfg.min_legible {
            return Err(LayoutError::unfittable(format!(
                "caption would be {:.4} tall",
                natural.height() * factor
            )));
        }
        scene.scale_about(text, factor, natural.center())?;
        scene.move_to(text, r.center(), Anchor::Center)?;

        let mut ts = Vec::with_capacity(2);
        if let Some(old) = self.text.take() {
            scene.detach(old)?;
            ts.push(Transition::Uncreate { target: old });
        }
        scene.push_child(self.frame.group(), text)?;
        ts.push(Transition::Write { target: text });
        self.text = Some(text);
        self.end_time = end_time;

        let hide = OverlayEvent {
            at: end_time,
            transition: Transition::Uncreate { target: text },
            run_time: self.cfg.run_time,
        };
        Ok((Batch::new(ts, self.cfg.run_time), hide))
    }

    /// Uncreate the caption now; nothing when none is showing.
    pub fn clear(&mut self, scene: &mut Scene) -> LayoutResult<Vec<Batch>> {
        let Some(text) = self.text.take() else {
            return Ok(Vec::new());
        };
        scene.detach(text)?;
        Ok(vec![Batch::single(
            Transition::Uncreate { target: text },
            self.cfg.run_time,
        )])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/subtitle.rs"]
mod tests;

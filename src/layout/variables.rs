use crate::{
    animation::transition::{Batch, Transition},
    foundation::config::{LayoutConfig, Style},
    foundation::core::{Anchor, BoxEdges, Edge, Vec2},
    foundation::error::{LayoutError, LayoutResult},
    layout::{bounded::BoundedLayout, frame::Frame},
    scene::element::ElementId,
    scene::store::{Scene, StructureHandle, StructureKind},
};

/// Gap between consecutive variable rows.
const ROW_BUFF: f64 = 0.25;

/// Panel listing the current variable bindings, one text row each.
#[derive(Clone, Debug)]
pub struct VariableBlock {
    frame: Frame,
    entries: Vec<String>,
    listing: Option<ElementId>,
    style: Style,
    cfg: LayoutConfig,
}

impl VariableBlock {
    /// Lay out `variables` (one `name = value` string each) in `frame`.
    pub fn new<S: AsRef<str>>(
        scene: &mut Scene,
        variables: &[S],
        frame: Frame,
        style: Style,
        cfg: LayoutConfig,
    ) -> LayoutResult<Self> {
        let mut block = Self {
            frame,
            entries: Vec::new(),
            listing: None,
            style,
            cfg,
        };
        block.listing = block.lay_out(scene, variables)?;
        if let Some(listing) = block.listing {
            scene.push_child(block.frame.group(), listing)?;
        }
        block.entries = variables.iter().map(|v| v.as_ref().to_string()).collect();
        Ok(block)
    }

    /// Lines currently listed.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Group of listed rows; `None` when empty.
    pub fn listing(&self) -> Option<ElementId> {
        self.listing
    }

    /// Handle for the identifier table.
    pub fn handle(&self) -> StructureHandle {
        StructureHandle {
            kind: StructureKind::Variables,
            group: self.frame.group(),
        }
    }

    /// Rows left-aligned top-down and centred in the frame. Each row is at
    /// most `variable_width_ratio` of the frame wide; a listing taller than
    /// the frame is shrunk as a whole.
    fn lay_out<S: AsRef<str>>(
        &self,
        scene: &mut Scene,
        variables: &[S],
    ) -> LayoutResult<Option<ElementId>> {
        if variables.is_empty() {
            return Ok(None);
        }
        let limit = self.cfg.variable_width_ratio * self.frame.max_width();
        let mut rows = Vec::with_capacity(variables.len());
        for v in variables {
            let text = scene.text(v.as_ref(), self.style.text_color, &self.style)?;
            let b = scene.require_bounds(text)?;
            if b.width() > limit {
                scene.scale_to_width(text, limit)?;
            }
            if let Some(&above) = rows.last() {
                let prev = scene.require_bounds(above)?;
                scene.next_to(text, prev, Edge::Bottom, ROW_BUFF)?;
                let left = scene.require_bounds(text)?.left();
                scene.translate(text, Vec2::new(prev.left() - left, 0.0))?;
            }
            rows.push(text);
        }
        let listing = scene.group(&rows)?;

        let height = scene.require_bounds(listing)?.height();
        let room = self.frame.max_height() - 2.0 * self.frame.margin();
        if height > room {
            let factor = room / height;
            let smallest = rows
                .iter()
                .map(|&r| scene.require_bounds(r).map(|b| b.height()))
                .collect::<LayoutResult<Vec<_>>>()?
                .into_iter()
                .fold(f64::INFINITY, f64::min);
            if smallest * factor < self.cfg.min_legible {
                return Err(LayoutError::unfittable(format!(
                    "{} variables do not fit a panel {room:.3} tall",
                    variables.len()
                )));
            }
            let about = scene.require_bounds(listing)?.center();
            scene.scale_about(listing, factor, about)?;
        }
        scene.move_to(listing, self.frame.rect().center(), Anchor::Center)?;
        Ok(Some(listing))
    }

    /// Appearance of the listing; empty when there is nothing to list.
    pub fn build(&self) -> Vec<Batch> {
        self.listing
            .map(|l| vec![Batch::single(self.style.creation.transition(l), self.cfg.run_time)])
            .unwrap_or_default()
    }

    /// Replace the listing: a single morph from old to new, an appearance
    /// when there was nothing listed, or a fade-out when the list empties.
    #[tracing::instrument(skip(self, scene, variables), fields(count = variables.len()))]
    pub fn update<S: AsRef<str>>(
        &mut self,
        scene: &mut Scene,
        variables: &[S],
    ) -> LayoutResult<Vec<Batch>> {
        let next = self.lay_out(scene, variables)?;
        let previous = self.listing.take();
        if let Some(old) = previous {
            scene.detach(old)?;
        }
        if let Some(new) = next {
            scene.push_child(self.frame.group(), new)?;
        }
        self.listing = next;
        self.entries = variables.iter().map(|v| v.as_ref().to_string()).collect();

        let t = match (previous, next) {
            (Some(from), Some(into)) => Transition::Transform { from, into },
            (None, Some(into)) => self.style.creation.transition(into),
            (Some(target), None) => Transition::FadeOut { target },
            (None, None) => return Ok(Vec::new()),
        };
        Ok(vec![Batch::single(t, self.cfg.run_time)])
    }
}

impl BoundedLayout for VariableBlock {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn clean_up(&mut self, _scene: &mut Scene) -> LayoutResult<Vec<Batch>> {
        Ok(vec![Batch::single(
            Transition::FadeOut {
                target: self.frame.group(),
            },
            self.cfg.run_time,
        )])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/variables.rs"]
mod tests;

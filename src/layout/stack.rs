use crate::{
    animation::transition::{Batch, MoveTarget, Transition, push_batch},
    foundation::config::{LayoutConfig, Style},
    foundation::core::{Anchor, BoxEdges, Edge, Point, Vec2},
    foundation::error::{LayoutError, LayoutResult},
    foundation::math::{EPS, approx_eq},
    layout::{bounded::BoundedLayout, cell::Cell, frame::Frame},
    scene::element::ElementId,
    scene::store::{Scene, StructureHandle, StructureKind},
};

/// Gap between the stack base line and its label.
const LABEL_BUFF: f64 = 0.1;

/// LIFO column of cells resting on the bottom of its frame.
///
/// Cells enter from the top edge of the frame and slide down onto the current
/// top. When a push would cross the top edge the whole column is shrunk about
/// its base; popping grows it back through the same fit computation, so a
/// push followed by a pop restores the previous extent.
#[derive(Clone, Debug)]
pub struct Stack {
    frame: Frame,
    cells: Vec<Cell>,
    base: Option<ElementId>,
    style: Style,
    cfg: LayoutConfig,
}

impl Stack {
    /// Empty stack; call [`Stack::create_init`] to draw its base.
    pub fn new(frame: Frame, style: Style, cfg: LayoutConfig) -> Self {
        Self {
            frame,
            cells: Vec::new(),
            base: None,
            style,
            cfg,
        }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` when no cell is stacked.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells, bottom first.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Topmost cell.
    pub fn top(&self) -> Option<&Cell> {
        self.cells.last()
    }

    /// Values, bottom first.
    pub fn values(&self) -> Vec<&str> {
        self.cells.iter().map(Cell::value).collect()
    }

    /// Base line group, once drawn.
    pub fn base(&self) -> Option<ElementId> {
        self.base
    }

    /// Handle for the identifier table.
    pub fn handle(&self) -> StructureHandle {
        StructureHandle {
            kind: StructureKind::Stack,
            group: self.frame.group(),
        }
    }

    /// Draw the base line, with an optional label under it, on the bottom
    /// edge of the frame.
    #[tracing::instrument(skip(self, scene))]
    pub fn create_init(
        &mut self,
        scene: &mut Scene,
        label: Option<&str>,
    ) -> LayoutResult<Vec<Batch>> {
        if self.base.is_some() {
            return Err(LayoutError::precondition("stack base already drawn"));
        }
        let half = (self.frame.max_width() - 2.0 * self.frame.margin()) * self.frame.scale() / 2.0;
        let line = scene.line(
            Point::new(-half, 0.0),
            Point::new(half, 0.0),
            self.style.color,
        )?;
        let mut members = Vec::with_capacity(2);
        let mut out = Vec::new();
        let mut appear = Vec::with_capacity(2);
        if let Some(label) = label {
            let text = scene.text(label, self.style.text_color, &self.style)?;
            let under = scene.require_bounds(line)?;
            scene.next_to(text, under, Edge::Bottom, LABEL_BUFF)?;
            members.push(text);
            appear.push(self.style.creation.transition(text));
        }
        members.push(line);
        appear.push(Transition::ShowLine { target: line });

        let base = scene.group(&members)?;
        let r = self.frame.rect();
        scene.move_to(
            base,
            Point::new(self.frame.width_center(), r.bottom()),
            Anchor::Edge(Edge::Bottom),
        )?;
        scene.push_child(self.frame.group(), base)?;
        self.base = Some(base);
        push_batch(&mut out, Batch::new(appear, self.cfg.run_time));
        Ok(out)
    }

    fn gap(&self) -> f64 {
        self.cfg.stack_gap * self.frame.scale()
    }

    fn content_width(&self, scene: &Scene) -> LayoutResult<f64> {
        match self.frame.content_bounds(scene)? {
            Some(b) if b.width() > EPS => Ok(b.width()),
            _ => Ok((self.frame.max_width() - 2.0 * self.frame.margin()) * self.frame.scale()),
        }
    }

    /// Put `id` at the entry point: top edge on the frame's top edge.
    fn reveal(&self, scene: &mut Scene, id: ElementId) -> LayoutResult<Vec2> {
        scene.move_to(
            id,
            Point::new(self.frame.width_center(), self.frame.rect().top()),
            Anchor::Edge(Edge::Top),
        )
    }

    /// Move `id` onto the current top, or onto the frame bottom when empty.
    fn land(&self, scene: &mut Scene, id: ElementId) -> LayoutResult<Vec2> {
        match self.frame.content_bounds(scene)? {
            Some(b) => scene.next_to(id, b, Edge::Top, self.gap()),
            None => scene.move_to(id, self.frame.anchor_point(), Anchor::Edge(Edge::Bottom)),
        }
    }

    /// Shrink the column if `cell` would cross the top edge once resized to
    /// the column width. Returns the shrink and the width the cell must take.
    fn make_room(
        &mut self,
        scene: &mut Scene,
        cell: &Cell,
    ) -> LayoutResult<(Option<Transition>, f64)> {
        let width = self.content_width(scene)?;
        let cell_width = cell.width(scene)?;
        let incoming = cell.height(scene)? * width / cell_width + self.gap();
        // The column rests on the frame bottom, so both margins stay clear above it.
        let headroom = 2.0 * self.frame.margin();
        if !self.frame.will_cross(scene, incoming + headroom, Edge::Top)? {
            return Ok((None, width));
        }

        let height = self
            .frame
            .content_bounds(scene)?
            .map_or(0.0, |b| b.height());
        let factor = self.frame.fit_factor(width, height + incoming)?;
        let text_height = scene.require_bounds(cell.text())?.height() * width * factor / cell_width;
        if text_height < self.cfg.min_legible {
            return Err(LayoutError::unfittable(format!(
                "stack cell '{}' would be {text_height:.4} tall",
                cell.value()
            )));
        }
        let (factor, shrink) = self.frame.shrink_to_fit(scene, width, height + incoming)?;
        Ok((shrink, width * factor))
    }

    /// Grow the column back after a cell has left.
    fn regrow(&mut self, scene: &mut Scene) -> LayoutResult<Option<Transition>> {
        let Some(b) = self.frame.content_bounds(scene)? else {
            return Ok(None);
        };
        let (_, grow) = self
            .frame
            .shrink_to_fit(scene, b.width().max(EPS), b.height().max(EPS))?;
        Ok(grow)
    }

    /// Push `value`.
    ///
    /// Batches: an optional shrink of the column, the new cell appearing at the
    /// frame's top edge, then its slide onto the current top.
    #[tracing::instrument(skip(self, scene))]
    pub fn push(&mut self, scene: &mut Scene, value: &str) -> LayoutResult<Vec<Batch>> {
        let mut cell = Cell::new(
            scene,
            value,
            self.cfg.cell_width,
            self.cfg.cell_height,
            &self.style,
            &self.cfg,
        )?;
        let (shrink, width) = self.make_room(scene, &cell)?;
        cell.scale_to_width(scene, width)?;
        self.reveal(scene, cell.group())?;
        let slide = self.land(scene, cell.group())?;
        scene.push_child(self.frame.group(), cell.group())?;

        let run_time = self.cfg.run_time;
        let mut out = Vec::new();
        if let Some(t) = shrink {
            out.push(Batch::single(t, run_time));
        }
        out.push(Batch::single(
            self.style.creation.transition(cell.group()),
            run_time,
        ));
        out.push(Batch::single(
            Transition::Move {
                target: cell.group(),
                to: MoveTarget::By(slide),
            },
            run_time,
        ));
        self.cells.push(cell);
        Ok(out)
    }

    /// Pop the top cell.
    ///
    /// Batches: lift to the top edge, fade out, then an optional regrow. Popping
    /// an empty stack is a [`LayoutError::Precondition`].
    #[tracing::instrument(skip(self, scene))]
    pub fn pop(&mut self, scene: &mut Scene) -> LayoutResult<Vec<Batch>> {
        let Some(cell) = self.cells.pop() else {
            return Err(LayoutError::precondition("pop on an empty stack"));
        };
        scene.detach(cell.group())?;
        let lift = self.reveal(scene, cell.group())?;
        let run_time = self.cfg.run_time;
        let mut out = vec![
            Batch::single(
                Transition::Move {
                    target: cell.group(),
                    to: MoveTarget::By(lift),
                },
                run_time,
            ),
            Batch::single(
                Transition::FadeOut {
                    target: cell.group(),
                },
                run_time,
            ),
        ];
        if let Some(grow) = self.regrow(scene)? {
            out.push(Batch::single(grow, run_time));
        }
        Ok(out)
    }

    /// Move the top cell onto `target` without fading it: lift it to the
    /// target's entry point, resize it to the target's width while both
    /// columns refit, then land it.
    #[tracing::instrument(skip_all, fields(from = self.cells.len(), to = target.cells.len()))]
    pub fn transfer_to_other_stack(
        &mut self,
        scene: &mut Scene,
        target: &mut Stack,
    ) -> LayoutResult<Vec<Batch>> {
        let Some(cell) = self.cells.pop() else {
            return Err(LayoutError::precondition("transfer from an empty stack"));
        };
        scene.detach(cell.group())?;
        let lift = target.reveal(scene, cell.group())?;

        let mut refit = Vec::new();
        if let Some(grow) = self.regrow(scene)? {
            refit.push(grow);
        }
        let (shrink, width) = target.make_room(scene, &cell)?;
        refit.extend(shrink);
        let factor = width / cell.width(scene)?;
        if !approx_eq(factor, 1.0) {
            let about = cell.box_rect(scene)?.edge_midpoint(Edge::Top);
            scene.scale_about(cell.group(), factor, about)?;
            refit.push(Transition::Scale {
                target: cell.group(),
                factor,
                about,
            });
        }

        let slide = target.land(scene, cell.group())?;
        scene.push_child(target.frame.group(), cell.group())?;

        let run_time = self.cfg.run_time;
        let mut out = vec![Batch::single(
            Transition::Move {
                target: cell.group(),
                to: MoveTarget::By(lift),
            },
            run_time,
        )];
        push_batch(&mut out, Batch::new(refit, run_time));
        out.push(Batch::single(
            Transition::Move {
                target: cell.group(),
                to: MoveTarget::By(slide),
            },
            run_time,
        ));
        target.cells.push(cell);
        Ok(out)
    }
}

impl BoundedLayout for Stack {
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
#[path = "../../tests/unit/layout/stack.rs"]
mod tests;

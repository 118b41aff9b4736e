use crate::{
    animation::transition::{Batch, MoveTarget, Rotation, Transition, push_batch},
    foundation::config::{LayoutConfig, Style},
    foundation::core::{Anchor, BoxEdges, Edge, Point, Rect, Rgba8, Vec2},
    foundation::error::{LayoutError, LayoutResult},
    foundation::math::{approx_eq, centre_offset, ensure_positive},
    layout::{bounded::BoundedLayout, cell::Cell, frame::Frame},
    scene::element::ElementId,
    scene::store::{Scene, StructureHandle, StructureKind},
};

/// Left-to-right row of equally sized cells, optionally preceded by a title.
#[derive(Clone, Debug)]
pub struct Array {
    frame: Frame,
    cells: Vec<Cell>,
    title: Option<ElementId>,
    title_width: f64,
    padding: f64,
    side: f64,
    offset: f64,
    style: Style,
    cfg: LayoutConfig,
}

#[derive(Clone, Copy, Debug)]
struct RowMetrics {
    side: f64,
    offset: f64,
}

fn row_metrics(
    frame: &Frame,
    count: usize,
    title_width: f64,
    padding: f64,
) -> LayoutResult<RowMetrics> {
    if count == 0 {
        return Err(LayoutError::degenerate("array needs at least one value"));
    }
    let per_element = (frame.max_width() - title_width - padding) / count as f64;
    let side = per_element.min(frame.max_height() - padding);
    let side = ensure_positive("array cell side", side)?;
    let used = side * count as f64 + title_width + padding;
    Ok(RowMetrics {
        side,
        offset: centre_offset(frame.max_width(), used),
    })
}

impl Array {
    /// Lay out `values` inside `frame`, leaving a title slot on the left when
    /// `title` is non-empty.
    pub fn new<T: ToString>(
        scene: &mut Scene,
        values: &[T],
        title: &str,
        frame: Frame,
        style: Style,
        cfg: LayoutConfig,
    ) -> LayoutResult<Self> {
        let padding = cfg.array_padding;
        Self::with_padding(scene, values, title, frame, padding, style, cfg)
    }

    pub(crate) fn with_padding<T: ToString>(
        scene: &mut Scene,
        values: &[T],
        title: &str,
        frame: Frame,
        padding: f64,
        style: Style,
        cfg: LayoutConfig,
    ) -> LayoutResult<Self> {
        let title_width = if title.is_empty() {
            0.0
        } else {
            cfg.title_width
        };
        let m = row_metrics(&frame, values.len(), title_width, padding)?;

        let mut array = Self {
            frame,
            cells: Vec::with_capacity(values.len()),
            title: None,
            title_width,
            padding,
            side: m.side,
            offset: m.offset,
            style,
            cfg,
        };

        if title_width > 0.0 {
            let t = scene.text(title, array.style.text_color, &array.style)?;
            scene.scale_to_width(t, title_width)?;
            let b = scene.require_bounds(t)?;
            let limit = 0.5 * array.frame.max_height();
            if b.height() > limit {
                scene.scale_about(t, limit / b.height(), b.center())?;
            }
            scene.move_to(t, array.title_center(), Anchor::Center)?;
            scene.push_child(array.frame.group(), t)?;
            array.title = Some(t);
        }

        for v in values {
            let cell = array.make_cell(scene, &v.to_string())?;
            scene.push_child(array.frame.group(), cell.group())?;
            array.cells.push(cell);
        }
        array.reflow(scene)?;
        Ok(array)
    }

    fn make_cell(&self, scene: &mut Scene, value: &str) -> LayoutResult<Cell> {
        Cell::new(scene, value, self.side, self.side, &self.style, &self.cfg)
    }

    fn title_center(&self) -> Point {
        let r = self.frame.rect();
        Point::new(
            r.left() + self.offset + self.title_width / 2.0,
            r.center().y,
        )
    }

    fn title_slot(&self) -> Rect {
        let c = self.title_center();
        Rect::new(
            c.x - self.title_width / 2.0,
            c.y,
            c.x + self.title_width / 2.0,
            c.y,
        )
    }

    /// Place every cell from the title outward; returns each cell's offset.
    fn reflow(&self, scene: &mut Scene) -> LayoutResult<Vec<Vec2>> {
        let mut prev = self.title_slot();
        let mut buff = self.padding;
        let mut deltas = Vec::with_capacity(self.cells.len());
        for cell in &self.cells {
            deltas.push(scene.next_to(cell.group(), prev, Edge::Right, buff)?);
            prev = cell.box_rect(scene)?;
            buff = 0.0;
        }
        Ok(deltas)
    }

    fn check_index(&self, index: usize) -> LayoutResult<()> {
        if index >= self.cells.len() {
            return Err(LayoutError::precondition(format!(
                "array index {index} out of range (len {})",
                self.cells.len()
            )));
        }
        Ok(())
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` when the row has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells, left to right.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Values, left to right.
    pub fn values(&self) -> Vec<&str> {
        self.cells.iter().map(Cell::value).collect()
    }

    /// Current side length of every cell.
    pub fn side(&self) -> f64 {
        self.side
    }

    /// Title text, when one was given.
    pub fn title(&self) -> Option<ElementId> {
        self.title
    }

    /// Handle for the identifier table.
    pub fn handle(&self) -> StructureHandle {
        StructureHandle {
            kind: StructureKind::Array,
            group: self.frame.group(),
        }
    }

    /// Appearance of the title and every cell, in one batch.
    pub fn build(&self) -> Vec<Batch> {
        let creation = self.style.creation;
        let transitions = self
            .title
            .into_iter()
            .chain(self.cells.iter().map(Cell::group))
            .map(|id| creation.transition(id))
            .collect();
        let mut out = Vec::new();
        push_batch(&mut out, Batch::new(transitions, self.cfg.run_time));
        out
    }

    /// Morph the value at `index` into `value`.
    #[tracing::instrument(skip(self, scene))]
    pub fn replace_value(
        &mut self,
        scene: &mut Scene,
        index: usize,
        value: &str,
    ) -> LayoutResult<Vec<Batch>> {
        self.check_index(index)?;
        let t = self.cells[index].replace_value(scene, value, &self.style, &self.cfg)?;
        Ok(vec![Batch::single(t, self.cfg.run_time)])
    }

    /// Exchange the values shown in two cells; both travel counterclockwise,
    /// lower index first.
    #[tracing::instrument(skip(self, scene))]
    pub fn swap(&mut self, scene: &mut Scene, i: usize, j: usize) -> LayoutResult<Vec<Batch>> {
        self.check_index(i)?;
        self.check_index(j)?;
        if i == j {
            return Ok(Vec::new());
        }
        let (lo, hi) = (i.min(j), i.max(j));
        let (a, b) = pair_mut(&mut self.cells, lo, hi)?;
        let ts = swap_cell_texts(scene, a, b, Rotation::CounterClockwise)?;
        Ok(vec![Batch::new(ts.to_vec(), self.cfg.run_time)])
    }

    /// Three-step exchange through a visible temporary: lift a copy of `i`,
    /// rotate `j` into slot `i`, then rotate the copy into slot `j`.
    #[tracing::instrument(skip(self, scene))]
    pub fn clone_and_swap(
        &mut self,
        scene: &mut Scene,
        i: usize,
        j: usize,
    ) -> LayoutResult<Vec<Batch>> {
        self.check_index(i)?;
        self.check_index(j)?;
        if i == j {
            return Ok(Vec::new());
        }
        let group = self.frame.group();
        let run_time = self.cfg.run_time;
        let box_i = self.cells[i].box_rect(scene)?;
        let box_j = self.cells[j].box_rect(scene)?;
        let (text_i, text_j) = (self.cells[i].text(), self.cells[j].text());

        let temp = scene.deep_clone(text_i)?;
        scene.push_child(group, temp)?;
        let lift = scene.next_to(temp, box_i, Edge::Top, self.cfg.clone_lift)?;

        let travelling = scene.deep_clone(text_j)?;
        scene.push_child(group, travelling)?;
        let into_i = scene.deep_clone(text_j)?;
        scene.move_to(into_i, box_i.center(), Anchor::Center)?;
        self.cells[i].swap_text(scene, into_i)?;
        scene.detach(travelling)?;

        let into_j = scene.deep_clone(temp)?;
        scene.move_to(into_j, box_j.center(), Anchor::Center)?;
        self.cells[j].swap_text(scene, into_j)?;
        scene.detach(temp)?;

        let value_i = self.cells[i].value().to_string();
        let value_j = self.cells[j].value().to_string();
        self.cells[i].set_value(value_j);
        self.cells[j].set_value(value_i);

        Ok(vec![
            Batch::single(
                Transition::Move {
                    target: temp,
                    to: MoveTarget::By(lift),
                },
                run_time,
            ),
            Batch::new(
                vec![
                    Transition::Rotate {
                        from: travelling,
                        into: into_i,
                        rotation: Rotation::Clockwise,
                    },
                    Transition::FadeOut { target: text_i },
                ],
                run_time,
            ),
            Batch::new(
                vec![
                    Transition::Rotate {
                        from: temp,
                        into: into_j,
                        rotation: Rotation::Clockwise,
                    },
                    Transition::FadeOut { target: text_j },
                ],
                run_time,
            ),
        ])
    }

    /// Add a cell at the end, shrinking and re-flowing the existing row
    /// first when the new count needs smaller cells.
    #[tracing::instrument(skip(self, scene))]
    pub fn append(&mut self, scene: &mut Scene, value: &str) -> LayoutResult<Vec<Batch>> {
        let m = row_metrics(
            &self.frame,
            self.cells.len() + 1,
            self.title_width,
            self.padding,
        )?;
        let factor = m.side / self.side;
        let run_time = self.cfg.run_time;
        let mut out = Vec::new();

        let mut resize = Vec::new();
        if !approx_eq(factor, 1.0) {
            tracing::debug!(factor, side = m.side, "array cells resized for append");
            for cell in &self.cells {
                let about = cell.center(scene)?;
                scene.scale_about(cell.group(), factor, about)?;
                resize.push(Transition::Scale {
                    target: cell.group(),
                    factor,
                    about,
                });
            }
        }
        let old_title = self.title_center();
        self.side = m.side;
        self.offset = m.offset;
        let shift = self.title_center() - old_title;
        if let Some(t) = self.title
            && shift.hypot() > 0.0
        {
            scene.translate(t, shift)?;
            resize.push(Transition::Move {
                target: t,
                to: MoveTarget::By(shift),
            });
        }
        push_batch(&mut out, Batch::new(resize, run_time));

        let cell = self.make_cell(scene, value)?;
        scene.push_child(self.frame.group(), cell.group())?;
        let fresh = cell.group();
        self.cells.push(cell);
        let deltas = self.reflow(scene)?;

        let mut flow: Vec<Transition> = self
            .cells
            .iter()
            .zip(&deltas)
            .filter(|(c, d)| c.group() != fresh && d.hypot() > 0.0)
            .map(|(c, d)| Transition::Move {
                target: c.group(),
                to: MoveTarget::By(*d),
            })
            .collect();
        flow.push(Transition::FadeIn { target: fresh });
        push_batch(&mut out, Batch::new(flow, run_time));
        Ok(out)
    }

    /// Recolour the box at `index`; nothing when highlighting is off.
    pub fn highlight(&mut self, scene: &mut Scene, index: usize) -> LayoutResult<Vec<Batch>> {
        let color = self.style.highlight_color;
        self.recolor_box(scene, index, color)
    }

    /// Restore the resting colour of the box at `index`.
    pub fn unhighlight(&mut self, scene: &mut Scene, index: usize) -> LayoutResult<Vec<Batch>> {
        let color = self.style.color;
        self.recolor_box(scene, index, color)
    }

    fn recolor_box(
        &mut self,
        scene: &mut Scene,
        index: usize,
        color: Rgba8,
    ) -> LayoutResult<Vec<Batch>> {
        self.check_index(index)?;
        if !self.style.highlighting {
            return Ok(Vec::new());
        }
        let cell = &mut self.cells[index];
        let text_color = cell.text_color();
        let ts = cell.recolor(scene, color, text_color)?;
        Ok(vec![Batch::new(ts, self.cfg.run_time)])
    }
}

impl BoundedLayout for Array {
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

/// Disjoint mutable borrows of two slots.
pub(crate) fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> LayoutResult<(&mut T, &mut T)> {
    if i == j || i.max(j) >= items.len() {
        return Err(LayoutError::precondition(format!(
            "cannot borrow slots {i} and {j} of {}",
            items.len()
        )));
    }
    if i < j {
        let (l, r) = items.split_at_mut(j);
        Ok((&mut l[i], &mut r[0]))
    } else {
        let (l, r) = items.split_at_mut(i);
        Ok((&mut r[0], &mut l[j]))
    }
}

/// Cross the value texts of two cells. Each text is replaced by a copy
/// placed in the other cell, reached through a rotational transform.
pub(crate) fn swap_cell_texts(
    scene: &mut Scene,
    a: &mut Cell,
    b: &mut Cell,
    rotation: Rotation,
) -> LayoutResult<[Transition; 2]> {
    let (text_a, text_b) = (a.text(), b.text());
    let into_b = scene.deep_clone(text_a)?;
    scene.move_to(into_b, b.center(scene)?, Anchor::Center)?;
    let into_a = scene.deep_clone(text_b)?;
    scene.move_to(into_a, a.center(scene)?, Anchor::Center)?;
    a.swap_text(scene, into_a)?;
    b.swap_text(scene, into_b)?;

    let value_a = a.value().to_string();
    a.set_value(b.value().to_string());
    b.set_value(value_a);

    Ok([
        Transition::Rotate {
            from: text_a,
            into: into_b,
            rotation,
        },
        Transition::Rotate {
            from: text_b,
            into: into_a,
            rotation,
        },
    ])
}

#[cfg(test)]
#[path = "../../tests/unit/layout/array.rs"]
mod tests;

use crate::{
    animation::transition::{Batch, Rotation, Transition, push_batch},
    foundation::config::{LayoutConfig, Style},
    foundation::core::{Anchor, BoxEdges, Point, Rect},
    foundation::error::{LayoutError, LayoutResult},
    foundation::math::{ensure_positive, fit_factor},
    layout::{
        array::{Array, pair_mut, swap_cell_texts},
        bounded::BoundedLayout,
        cell::Cell,
        frame::Frame,
    },
    scene::element::ElementId,
    scene::store::{Scene, StructureHandle, StructureKind},
};

/// Grid of equally sized cells; `rows()[0]` is the top row.
#[derive(Clone, Debug)]
pub struct Array2D {
    frame: Frame,
    rows: Vec<Array>,
    title: Option<ElementId>,
    side: f64,
    style: Style,
    cfg: LayoutConfig,
}

impl Array2D {
    /// Lay out `values` as rows of equal cells, top row first.
    ///
    /// Every row must have the same length. A non-empty `title` is fitted into
    /// the strip between the top row and the frame's top edge.
    pub fn new<T: ToString>(
        scene: &mut Scene,
        values: &[Vec<T>],
        title: &str,
        frame: Frame,
        style: Style,
        cfg: LayoutConfig,
    ) -> LayoutResult<Self> {
        let rows = values.len();
        let cols = values.first().map_or(0, Vec::len);
        if rows == 0 || cols == 0 {
            return Err(LayoutError::degenerate("grid needs at least one value"));
        }
        if values.iter().any(|r| r.len() != cols) {
            return Err(LayoutError::degenerate(format!(
                "grid rows must all have {cols} values"
            )));
        }

        let bounds = frame.rect();
        let title_width = if title.is_empty() {
            0.0
        } else {
            cfg.title_width
        };
        let per_element = (frame.max_width() - title_width - cfg.array_padding) / cols as f64;
        let side = ((frame.max_height() - cfg.grid_title_band) / rows as f64).min(per_element);
        let side = ensure_positive("grid cell side", side)?;
        let row_width = side * cols as f64;
        let from_bottom = (frame.max_height() - side * rows as f64) / 2.0;
        let left = bounds.left() + (frame.max_width() - row_width) / 2.0;

        let mut grid = Self {
            frame,
            rows: Vec::with_capacity(rows),
            title: None,
            side,
            style,
            cfg,
        };

        for (r, row_values) in values.iter().enumerate() {
            let level = (rows - 1 - r) as f64;
            let bottom = bounds.bottom() + level * side + from_bottom - grid.cfg.grid_row_drop;
            let row_frame = Frame::new(
                scene,
                Rect::new(left, bottom, left + row_width, bottom + side),
                Anchor::Center,
                0.0,
            )?;
            let row = Array::with_padding(
                scene,
                row_values,
                "",
                row_frame,
                0.0,
                grid.style.clone(),
                grid.cfg.clone(),
            )?;
            scene.push_child(grid.frame.group(), row.frame().group())?;
            grid.rows.push(row);
        }

        if title_width > 0.0 {
            // Strip between the top row and the frame top.
            let band = from_bottom + grid.cfg.grid_row_drop;
            let t = scene.text(title, grid.style.text_color, &grid.style)?;
            let b = scene.require_bounds(t)?;
            let factor = fit_factor((title_width, band), (b.width(), b.height()))?;
            scene.scale_about(t, factor, b.center())?;
            scene.move_to(
                t,
                Point::new(bounds.center().x, bounds.top() - band / 2.0),
                Anchor::Center,
            )?;
            scene.push_child(grid.frame.group(), t)?;
            grid.title = Some(t);
        }
        Ok(grid)
    }

    /// Rows, top first.
    pub fn rows(&self) -> &[Array] {
        &self.rows
    }

    /// Side length shared by every cell.
    pub fn side(&self) -> f64 {
        self.side
    }

    /// Title text, when one was given.
    pub fn title(&self) -> Option<ElementId> {
        self.title
    }

    /// Values row by row.
    pub fn values(&self) -> Vec<Vec<&str>> {
        self.rows.iter().map(Array::values).collect()
    }

    /// Handle for the identifier table.
    pub fn handle(&self) -> StructureHandle {
        StructureHandle {
            kind: StructureKind::Array2D,
            group: self.frame.group(),
        }
    }

    fn cell(&self, row: usize, col: usize) -> LayoutResult<&Cell> {
        self.rows
            .get(row)
            .and_then(|r| r.cells().get(col))
            .ok_or_else(|| {
                LayoutError::precondition(format!("grid position ({row}, {col}) out of range"))
            })
    }

    fn row_mut(&mut self, row: usize) -> LayoutResult<&mut Array> {
        let rows = self.rows.len();
        self.rows.get_mut(row).ok_or_else(|| {
            LayoutError::precondition(format!("grid row {row} out of range ({rows} rows)"))
        })
    }

    /// Appearance of the title and every cell, in one batch.
    pub fn build(&self) -> Vec<Batch> {
        let creation = self.style.creation;
        let transitions = self
            .title
            .into_iter()
            .chain(
                self.rows
                    .iter()
                    .flat_map(|r| r.cells().iter().map(Cell::group)),
            )
            .map(|id| creation.transition(id))
            .collect();
        let mut out = Vec::new();
        push_batch(&mut out, Batch::new(transitions, self.cfg.run_time));
        out
    }

    /// Replace a whole row's values in one batch.
    #[tracing::instrument(skip(self, scene, values))]
    pub fn replace_row<T: ToString>(
        &mut self,
        scene: &mut Scene,
        row: usize,
        values: &[T],
    ) -> LayoutResult<Vec<Batch>> {
        let run_time = self.cfg.run_time;
        let target = self.row_mut(row)?;
        if values.len() != target.len() {
            return Err(LayoutError::precondition(format!(
                "row {row} holds {} values, got {}",
                target.len(),
                values.len()
            )));
        }
        let mut transitions = Vec::with_capacity(values.len());
        for (col, v) in values.iter().enumerate() {
            let batches = target.replace_value(scene, col, &v.to_string())?;
            transitions.extend(batches.into_iter().flat_map(|b| b.transitions));
        }
        let mut out = Vec::new();
        push_batch(&mut out, Batch::new(transitions, run_time));
        Ok(out)
    }

    /// Morph the value at (`row`, `col`) into `value`.
    pub fn replace_value(
        &mut self,
        scene: &mut Scene,
        row: usize,
        col: usize,
        value: &str,
    ) -> LayoutResult<Vec<Batch>> {
        self.row_mut(row)?.replace_value(scene, col, value)
    }

    /// Swap two cells' values while every other value is dimmed.
    ///
    /// Three batches: dim the bystanders, rotate the pair counterclockwise
    /// (earlier position first), restore the bystanders.
    #[tracing::instrument(skip(self, scene))]
    pub fn swap(
        &mut self,
        scene: &mut Scene,
        a: (usize, usize),
        b: (usize, usize),
    ) -> LayoutResult<Vec<Batch>> {
        self.cell(a.0, a.1)?;
        self.cell(b.0, b.1)?;
        if a == b {
            return Ok(Vec::new());
        }
        let (first, second) = (a.min(b), a.max(b));
        let run_time = self.cfg.run_time;

        let mut dim = Vec::new();
        let mut restore = Vec::new();
        for (r, row) in self.rows.iter().enumerate() {
            for (c, cell) in row.cells().iter().enumerate() {
                if (r, c) == first || (r, c) == second {
                    continue;
                }
                dim.push(Transition::Recolor {
                    target: cell.text(),
                    color: self.style.dim_color,
                });
                restore.push(Transition::Recolor {
                    target: cell.text(),
                    color: cell.text_color(),
                });
            }
        }

        let swap = if first.0 == second.0 {
            let cells = self.rows[first.0].cells_mut();
            let (x, y) = pair_mut(cells, first.1, second.1)?;
            swap_cell_texts(scene, x, y, Rotation::CounterClockwise)?
        } else {
            let (upper, lower) = pair_mut(&mut self.rows, first.0, second.0)?;
            swap_cell_texts(
                scene,
                &mut upper.cells_mut()[first.1],
                &mut lower.cells_mut()[second.1],
                Rotation::CounterClockwise,
            )?
        };

        let mut out = Vec::new();
        push_batch(&mut out, Batch::new(dim, run_time));
        push_batch(&mut out, Batch::new(swap.to_vec(), run_time));
        push_batch(&mut out, Batch::new(restore, run_time));
        Ok(out)
    }
}

impl BoundedLayout for Array2D {
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
#[path = "../../tests/unit/layout/array2d.rs"]
mod tests;

use std::ops::Range;

use crate::{
    animation::transition::{Batch, MoveTarget, Transition},
    foundation::config::{LayoutConfig, Style},
    foundation::core::{BoxEdges, Edge, Point, Vec2},
    foundation::error::{LayoutError, LayoutResult},
    foundation::math::{EPS, ensure_positive, fit_factor},
    layout::{bounded::BoundedLayout, frame::Frame},
    scene::element::ElementId,
    scene::store::{Scene, StructureHandle, StructureKind},
};

/// Scrolling window over source lines with a pointer glyph.
///
/// A logical line may be split into several fragments, each drawn as its own
/// row. The visible slice of rows is `[start, end)`; rows outside it exist in
/// the scene but are not attached to the frame.
#[derive(Clone, Debug)]
pub struct CodeViewport {
    frame: Frame,
    lines: Vec<Vec<String>>,
    rows: Vec<ElementId>,
    /// Cumulative fragment counts: line `n` ends at flat row `line_ends[n - 1]`.
    line_ends: Vec<usize>,
    start: usize,
    end: usize,
    pitch: f64,
    scale: f64,
    pointer: ElementId,
    pointer_shown: bool,
    style: Style,
    cfg: LayoutConfig,
}

impl CodeViewport {
    /// Lay out `lines` top-down, left-aligned, scaled so the first window and
    /// the pointer gutter fit inside the frame margins.
    pub fn new<S: AsRef<str>>(
        scene: &mut Scene,
        lines: &[Vec<S>],
        frame: Frame,
        style: Style,
        cfg: LayoutConfig,
    ) -> LayoutResult<Self> {
        if lines.is_empty() {
            return Err(LayoutError::degenerate("code viewport needs at least one line"));
        }
        let mut owned = Vec::with_capacity(lines.len());
        let mut rows = Vec::new();
        let mut line_ends = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                return Err(LayoutError::degenerate(format!(
                    "code line {} has no fragments",
                    i + 1
                )));
            }
            for fragment in line {
                rows.push(scene.text(fragment.as_ref(), style.text_color, &style)?);
            }
            line_ends.push(rows.len());
            owned.push(line.iter().map(|f| f.as_ref().to_string()).collect());
        }

        let (mut row_width, mut row_height) = (0.0_f64, 0.0_f64);
        for &row in &rows {
            let b = scene.require_bounds(row)?;
            row_width = row_width.max(b.width());
            row_height = row_height.max(b.height());
        }
        ensure_positive("code row height", row_height)?;
        let natural_pitch = row_height * (1.0 + cfg.code_line_spacing);
        let end = cfg.code_window.min(rows.len());
        let window_height = (end - 1) as f64 * natural_pitch + row_height;
        let gutter = cfg.pointer_size + cfg.pointer_buff;

        let r = frame.rect();
        let m = frame.margin();
        let scale = fit_factor(
            (r.width() - 2.0 * m, r.height() - 2.0 * m),
            (row_width + gutter, window_height),
        )?
        .min(1.0);
        if row_height * scale < cfg.min_legible {
            return Err(LayoutError::unfittable(format!(
                "code rows would be {:.4} tall",
                row_height * scale
            )));
        }

        let pitch = natural_pitch * scale;
        let origin = Point::new(r.left() + m + gutter * scale, r.top() - m);
        for (k, &row) in rows.iter().enumerate() {
            scene.scale_about(row, scale, Point::ORIGIN)?;
            let b = scene.require_bounds(row)?;
            let goal = Point::new(origin.x, origin.y - k as f64 * pitch);
            scene.translate(row, goal - b.top_left())?;
        }
        for &row in &rows[..end] {
            scene.push_child(frame.group(), row)?;
        }
        let pointer = scene.glyph(cfg.pointer_size * scale, style.highlight_color)?;
        tracing::debug!(scale, rows = rows.len(), window = end, "code viewport laid out");

        Ok(Self {
            frame,
            lines: owned,
            rows,
            line_ends,
            start: 0,
            end,
            pitch,
            scale,
            pointer,
            pointer_shown: false,
            style,
            cfg,
        })
    }

    /// One fragment per logical line.
    pub fn from_plain<S: AsRef<str>>(
        scene: &mut Scene,
        lines: &[S],
        frame: Frame,
        style: Style,
        cfg: LayoutConfig,
    ) -> LayoutResult<Self> {
        let lines: Vec<Vec<&str>> = lines.iter().map(|l| vec![l.as_ref()]).collect();
        Self::new(scene, &lines, frame, style, cfg)
    }

    /// Number of logical lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Number of flat rows across all lines.
    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    /// Fragments of 1-based line `n`.
    pub fn line(&self, n: usize) -> Option<&[String]> {
        n.checked_sub(1)
            .and_then(|i| self.lines.get(i))
            .map(Vec::as_slice)
    }

    /// Visible flat rows as `start..end`.
    pub fn window(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Every flat row, visible or not.
    pub fn rows(&self) -> &[ElementId] {
        &self.rows
    }

    /// Rows inside the window.
    pub fn visible_rows(&self) -> &[ElementId] {
        &self.rows[self.start..self.end]
    }

    /// The line pointer glyph.
    pub fn pointer(&self) -> ElementId {
        self.pointer
    }

    /// Whether the pointer is on screen.
    pub fn pointer_shown(&self) -> bool {
        self.pointer_shown
    }

    /// Factor applied to the rows to fit the frame.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Handle for the identifier table.
    pub fn handle(&self) -> StructureHandle {
        StructureHandle {
            kind: StructureKind::Code,
            group: self.frame.group(),
        }
    }

    /// Flat rows of 1-based logical line `n`.
    pub fn line_rows(&self, n: usize) -> LayoutResult<Range<usize>> {
        if n == 0 || n > self.lines.len() {
            return Err(LayoutError::precondition(format!(
                "line {n} is outside 1..={}",
                self.lines.len()
            )));
        }
        let first = if n == 1 { 0 } else { self.line_ends[n - 2] };
        Ok(first..self.line_ends[n - 1])
    }

    /// Appearance of the visible rows, in one batch.
    pub fn build(&self) -> Vec<Batch> {
        let appear = self
            .visible_rows()
            .iter()
            .map(|&row| self.style.creation.transition(row))
            .collect();
        vec![Batch::new(appear, self.cfg.run_time)]
    }

    /// Scroll until line `n` is visible, then point at it.
    #[tracing::instrument(skip(self, scene))]
    pub fn move_indicator_to_line(
        &mut self,
        scene: &mut Scene,
        n: usize,
    ) -> LayoutResult<Vec<Batch>> {
        let target = self.line_rows(n)?;
        let index = target.end;
        let mut out = Vec::new();

        if index > self.end {
            out.extend(self.hide_indicator(scene)?);
            self.scroll_down(scene, index - self.end, &mut out)?;
        } else if index - 1 < self.start {
            out.extend(self.hide_indicator(scene)?);
            self.scroll_up(scene, self.start - target.start, &mut out)?;
        }

        let row = self.rows[target.start.max(self.start)];
        let beside = scene.require_bounds(row)?;
        let buff = self.cfg.pointer_buff * self.scale;
        let delta = scene.next_to(self.pointer, beside, Edge::Left, buff)?;
        if !self.pointer_shown {
            scene.push_child(self.frame.group(), self.pointer)?;
            self.pointer_shown = true;
            out.push(Batch::single(
                Transition::FadeIn {
                    target: self.pointer,
                },
                self.cfg.run_time,
            ));
        } else if delta.hypot() > EPS {
            out.push(Batch::single(
                Transition::Move {
                    target: self.pointer,
                    to: MoveTarget::By(delta),
                },
                self.cfg.run_time,
            ));
        }
        Ok(out)
    }

    /// Fade the pointer out if it is showing.
    pub fn hide_indicator(&mut self, scene: &mut Scene) -> LayoutResult<Vec<Batch>> {
        if !self.pointer_shown {
            return Ok(Vec::new());
        }
        scene.detach(self.pointer)?;
        self.pointer_shown = false;
        Ok(vec![Batch::single(
            Transition::FadeOut {
                target: self.pointer,
            },
            self.cfg.scroll_run_time,
        )])
    }

    /// Distance between consecutive visible rows.
    fn row_pitch(&self, scene: &Scene) -> LayoutResult<f64> {
        if self.end - self.start < 2 {
            return Ok(self.pitch);
        }
        let a = scene.require_bounds(self.rows[self.start])?;
        let b = scene.require_bounds(self.rows[self.start + 1])?;
        Ok(a.top() - b.top())
    }

    /// Put `row`'s top-left corner `dy` above `neighbour`'s.
    fn place_beside(
        &self,
        scene: &mut Scene,
        row: ElementId,
        neighbour: ElementId,
        dy: f64,
    ) -> LayoutResult<()> {
        let goal = scene.require_bounds(neighbour)?.top_left() + Vec2::new(0.0, dy);
        let at = scene.require_bounds(row)?.top_left();
        scene.translate(row, goal - at)
    }

    fn scroll_step(
        &self,
        scene: &mut Scene,
        leaving: ElementId,
        entering: ElementId,
        moving: Range<usize>,
        shift: Vec2,
    ) -> LayoutResult<Batch> {
        scene.detach(leaving)?;
        scene.push_child(self.frame.group(), entering)?;
        let mut ts = vec![
            Transition::FadeOut { target: leaving },
            Transition::FadeIn { target: entering },
        ];
        for &row in &self.rows[moving] {
            scene.translate(row, shift)?;
            ts.push(Transition::Move {
                target: row,
                to: MoveTarget::By(shift),
            });
        }
        Ok(Batch::new(ts, self.cfg.scroll_run_time))
    }

    fn scroll_down(&mut self, scene: &mut Scene, steps: usize, out: &mut Vec<Batch>) -> LayoutResult<()> {
        let pitch = self.row_pitch(scene)?;
        for _ in 0..steps {
            let entering = self.rows[self.end];
            self.place_beside(scene, entering, self.rows[self.end - 1], -pitch)?;
            out.push(self.scroll_step(
                scene,
                self.rows[self.start],
                entering,
                self.start + 1..self.end + 1,
                Vec2::new(0.0, pitch),
            )?);
            self.start += 1;
            self.end += 1;
        }
        tracing::debug!(steps, start = self.start, end = self.end, "code scrolled down");
        Ok(())
    }

    fn scroll_up(&mut self, scene: &mut Scene, steps: usize, out: &mut Vec<Batch>) -> LayoutResult<()> {
        let pitch = self.row_pitch(scene)?;
        for _ in 0..steps {
            let entering = self.rows[self.start - 1];
            self.place_beside(scene, entering, self.rows[self.start], pitch)?;
            out.push(self.scroll_step(
                scene,
                self.rows[self.end - 1],
                entering,
                self.start - 1..self.end - 1,
                Vec2::new(0.0, -pitch),
            )?);
            self.start -= 1;
            self.end -= 1;
        }
        tracing::debug!(steps, start = self.start, end = self.end, "code scrolled up");
        Ok(())
    }
}

impl BoundedLayout for CodeViewport {
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
#[path = "../../tests/unit/layout/code.rs"]
mod tests;

use crate::{
    animation::transition::Transition,
    foundation::core::{Anchor, BoxEdges, Edge, Point, Rect},
    foundation::error::{LayoutError, LayoutResult},
    foundation::math::{EPS, approx_eq, ensure_positive, fit_factor},
    scene::element::ElementId,
    scene::store::Scene,
};

/// Fixed rectangular panel that bounds and owns a group of elements.
///
/// The frame's corners never move. Its group is scaled and translated as
/// content is added and removed; [`Frame::scale`] tracks the cumulative
/// factor applied through [`Frame::shrink_to_fit`].
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    top_left: Point,
    top_right: Point,
    bottom_left: Point,
    bottom_right: Point,
    anchor: Anchor,
    max_width: f64,
    max_height: f64,
    margin: f64,
    group: ElementId,
    scale: f64,
}

impl Frame {
    /// Frame covering `bounds`, with a fresh empty group.
    pub fn new(scene: &mut Scene, bounds: Rect, anchor: Anchor, margin: f64) -> LayoutResult<Self> {
        let bounds = bounds.abs();
        ensure_positive("frame width", bounds.width())?;
        ensure_positive("frame height", bounds.height())?;
        if !(margin.is_finite() && margin >= 0.0) {
            return Err(LayoutError::degenerate("frame margin must be >= 0"));
        }
        let group = scene.group(&[])?;
        Ok(Self {
            top_left: Point::new(bounds.left(), bounds.top()),
            top_right: Point::new(bounds.right(), bounds.top()),
            bottom_left: Point::new(bounds.left(), bounds.bottom()),
            bottom_right: Point::new(bounds.right(), bounds.bottom()),
            anchor,
            max_width: bounds.width(),
            max_height: bounds.height(),
            margin,
            group,
            scale: 1.0,
        })
    }

    /// Frame from four explicit corners, which must form an axis-aligned box.
    pub fn from_corners(
        scene: &mut Scene,
        corners: [Point; 4],
        anchor: Anchor,
        margin: f64,
    ) -> LayoutResult<Self> {
        let [ul, ur, ll, lr] = corners;
        let aligned = approx_eq(ul.y, ur.y)
            && approx_eq(ll.y, lr.y)
            && approx_eq(ul.x, ll.x)
            && approx_eq(ur.x, lr.x);
        if !aligned {
            return Err(LayoutError::degenerate(
                "frame corners must form an axis-aligned rectangle",
            ));
        }
        if lr.x <= ul.x || ul.y <= lr.y {
            return Err(LayoutError::degenerate(format!(
                "frame corners are inverted or empty: {ul:?} .. {lr:?}"
            )));
        }
        Self::new(scene, Rect::new(ul.x, lr.y, lr.x, ul.y), anchor, margin)
    }

    /// Same corners inset by `inset` on every side, with a new group.
    pub fn inset(&self, scene: &mut Scene, inset: f64, anchor: Anchor) -> LayoutResult<Self> {
        Self::new(scene, self.rect().inset(-inset), anchor, self.margin)
    }

    /// Fixed panel rectangle.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.top_left.x,
            self.bottom_right.y,
            self.bottom_right.x,
            self.top_left.y,
        )
    }

    /// Top-left, top-right, bottom-left, bottom-right.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    /// Group that holds everything laid out in this frame.
    pub fn group(&self) -> ElementId {
        self.group
    }

    /// Where content is pinned when it is rescaled.
    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// The anchor resolved against the frame's own rectangle.
    pub fn anchor_point(&self) -> Point {
        self.anchor.point_on(self.rect())
    }

    /// Panel width.
    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    /// Panel height.
    pub fn max_height(&self) -> f64 {
        self.max_height
    }

    /// Inset kept clear when fitting.
    pub fn margin(&self) -> f64 {
        self.margin
    }

    /// x of the panel's vertical centre line.
    pub fn width_center(&self) -> f64 {
        self.top_left.x + self.max_width / 2.0
    }

    /// Cumulative factor applied to the group relative to natural size.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Extent of the content; `None` when the frame is empty.
    pub fn content_bounds(&self, scene: &Scene) -> LayoutResult<Option<Rect>> {
        scene.bounds(self.group)
    }

    /// Whether growing the group by `dimension` past `edge` would leave the
    /// frame. Pure query.
    pub fn will_cross(&self, scene: &Scene, dimension: f64, edge: Edge) -> LayoutResult<bool> {
        let content = match self.content_bounds(scene)? {
            Some(b) => b,
            None => {
                let p = self.anchor_point();
                Rect::from_points(p, p)
            }
        };
        let frame = self.rect();
        Ok(match edge {
            Edge::Top => content.top() + dimension > frame.top() + EPS,
            Edge::Bottom => content.bottom() - dimension < frame.bottom() - EPS,
            Edge::Right => content.right() + dimension > frame.right() + EPS,
            Edge::Left => content.left() - dimension < frame.left() - EPS,
        })
    }

    /// Whether the group lies inside the frame, allowing `tolerance` slack.
    pub fn contains_content(&self, scene: &Scene, tolerance: f64) -> LayoutResult<bool> {
        let Some(b) = self.content_bounds(scene)? else {
            return Ok(true);
        };
        let f = self.rect().inset(tolerance);
        Ok(b.left() >= f.left() - EPS
            && b.right() <= f.right() + EPS
            && b.bottom() >= f.bottom() - EPS
            && b.top() <= f.top() + EPS)
    }

    /// Factor [`Frame::shrink_to_fit`] would apply for the given extent. Pure
    /// query.
    pub fn fit_factor(&self, new_width: f64, new_height: f64) -> LayoutResult<f64> {
        let avail = (
            self.max_width - 2.0 * self.margin,
            self.max_height - 2.0 * self.margin,
        );
        let fit = fit_factor(avail, (new_width, new_height))?;
        Ok(fit.min(1.0 / self.scale))
    }

    /// Scale the group so content of `new_width × new_height` fits inside the
    /// margins.
    ///
    /// The factor is capped so the cumulative scale never exceeds 1: content is
    /// shrunk, or grown back only as far as its natural size. A factor of 1 is
    /// a no-op and emits no transition.
    pub fn shrink_to_fit(
        &mut self,
        scene: &mut Scene,
        new_width: f64,
        new_height: f64,
    ) -> LayoutResult<(f64, Option<Transition>)> {
        let factor = self.fit_factor(new_width, new_height)?;
        let Some(content) = self.content_bounds(scene)? else {
            return Ok((1.0, None));
        };
        if approx_eq(factor, 1.0) {
            return Ok((1.0, None));
        }

        let about = self.anchor.point_on(content);
        scene.scale_about(self.group, factor, about)?;
        self.scale *= factor;
        tracing::debug!(factor, scale = self.scale, "frame rescaled to fit");
        Ok((
            factor,
            Some(Transition::Scale {
                target: self.group,
                factor,
                about,
            }),
        ))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/frame.rs"]
mod tests;

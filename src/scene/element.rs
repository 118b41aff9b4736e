use crate::foundation::core::{Point, Rect, Rgba8};

/// Stable handle to an element in a [`crate::Scene`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId(pub u32);

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Geometry of a single visual element, in absolute y-up scene coordinates.
pub enum Shape {
    /// Outlined box.
    Rect {
        /// Box extent.
        rect: Rect,
        /// Outline colour.
        stroke: Rgba8,
    },
    /// Outlined circle.
    Circle {
        /// Centre point.
        center: Point,
        /// Radius in scene units.
        radius: f64,
        /// Outline colour.
        stroke: Rgba8,
    },
    /// Straight segment.
    Line {
        /// Start point.
        from: Point,
        /// End point.
        to: Point,
        /// Line colour.
        stroke: Rgba8,
    },
    /// Text fitted into `rect`; the renderer scales its glyph run to the box.
    Text {
        /// String shown.
        content: String,
        /// Box the glyph run is scaled into.
        rect: Rect,
        /// Fill colour.
        color: Rgba8,
    },
    /// Filled pointer tip (right-pointing triangle inscribed in `rect`).
    Glyph {
        /// Bounding box of the triangle.
        rect: Rect,
        /// Fill colour.
        color: Rgba8,
    },
    /// Ordered container; insertion order is z-order.
    Group {
        /// Members, back to front.
        children: Vec<ElementId>,
    },
}

/// Arena entry: a shape and the group that owns it.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Element {
    /// Geometry and colour.
    pub shape: Shape,
    /// Owning group; `None` while detached.
    pub parent: Option<ElementId>,
}

impl Shape {
    /// Bounding box of a leaf shape; `None` for groups.
    pub(crate) fn leaf_bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect { rect, .. } | Self::Text { rect, .. } | Self::Glyph { rect, .. } => {
                Some(*rect)
            }
            Self::Circle { center, radius, .. } => Some(Rect::new(
                center.x - radius,
                center.y - radius,
                center.x + radius,
                center.y + radius,
            )),
            Self::Line { from, to, .. } => Some(Rect::from_points(*from, *to)),
            Self::Group { .. } => None,
        }
    }

    /// Apply `p -> about + (p - about) * factor + offset` to every coordinate.
    pub(crate) fn map_points(&mut self, about: Point, factor: f64, offset: kurbo::Vec2) {
        let map = |p: Point| about + (p - about) * factor + offset;
        let map_rect = |r: Rect| Rect::from_points(map(r.origin()), map(Point::new(r.x1, r.y1)));
        match self {
            Self::Rect { rect, .. } | Self::Text { rect, .. } | Self::Glyph { rect, .. } => {
                *rect = map_rect(*rect);
            }
            Self::Circle { center, radius, .. } => {
                *center = map(*center);
                *radius *= factor.abs();
            }
            Self::Line { from, to, .. } => {
                *from = map(*from);
                *to = map(*to);
            }
            Self::Group { .. } => {}
        }
    }

    pub(crate) fn set_color(&mut self, color: Rgba8) {
        match self {
            Self::Rect { stroke, .. } | Self::Circle { stroke, .. } | Self::Line { stroke, .. } => {
                *stroke = color;
            }
            Self::Text { color: c, .. } | Self::Glyph { color: c, .. } => *c = color,
            Self::Group { .. } => {}
        }
    }
}

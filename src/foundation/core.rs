use crate::foundation::error::{LayoutError, LayoutResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Straight-alpha RGBA8 colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Rgba8 {
    /// Opaque white.
    pub const WHITE: Self = Self::opaque(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    /// Default stroke blue.
    pub const BLUE: Self = Self::opaque(0x58, 0xC4, 0xDD);
    /// Accent red.
    pub const RED: Self = Self::opaque(0xFC, 0x62, 0x55);
    /// Default line green.
    pub const GREEN: Self = Self::opaque(0x83, 0xC1, 0x67);
    /// Default highlight yellow.
    pub const YELLOW: Self = Self::opaque(0xFF, 0xFF, 0x00);
    /// Dimmed grey.
    pub const GREY: Self = Self::opaque(0x88, 0x88, 0x88);

    /// Colour with full alpha.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(s: &str) -> LayoutResult<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() || (hex.len() != 6 && hex.len() != 8) {
            return Err(LayoutError::serde(format!("invalid colour '{s}'")));
        }
        let byte = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| LayoutError::serde(format!("invalid colour '{s}'")))
        };
        let a = if hex.len() == 8 { byte(6)? } else { 255 };
        Ok(Self {
            r: byte(0)?,
            g: byte(2)?,
            b: byte(4)?,
            a,
        })
    }
}

/// One side of an axis-aligned box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Edge {
    /// Largest y.
    Top,
    /// Smallest y.
    Bottom,
    /// Smallest x.
    Left,
    /// Largest x.
    Right,
}

impl Edge {
    /// Unit vector pointing out of the box through this edge (y-up).
    pub fn direction(self) -> Vec2 {
        match self {
            Self::Top => Vec2::new(0.0, 1.0),
            Self::Bottom => Vec2::new(0.0, -1.0),
            Self::Left => Vec2::new(-1.0, 0.0),
            Self::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// The edge across the box.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Point on a box that a layout is anchored to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Anchor {
    /// Centre of the box.
    #[default]
    Center,
    /// Midpoint of one edge.
    Edge(Edge),
}

impl Anchor {
    /// Resolve the anchor against a box.
    pub fn point_on(self, rect: Rect) -> Point {
        match self {
            Self::Center => rect.center(),
            Self::Edge(edge) => rect.edge_midpoint(edge),
        }
    }
}

/// Edge accessors for boxes in y-up scene space.
///
/// Every `Rect` produced by the scene keeps `x0 <= x1` and `y0 <= y1`, with
/// `y1` the top edge.
pub trait BoxEdges {
    /// Top edge y.
    fn top(&self) -> f64;
    /// Bottom edge y.
    fn bottom(&self) -> f64;
    /// Left edge x.
    fn left(&self) -> f64;
    /// Right edge x.
    fn right(&self) -> f64;

    /// Coordinate of `edge`: a y for top and bottom, an x for left and right.
    fn edge(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Top => self.top(),
            Edge::Bottom => self.bottom(),
            Edge::Left => self.left(),
            Edge::Right => self.right(),
        }
    }

    /// Midpoint of `edge`.
    fn edge_midpoint(&self, edge: Edge) -> Point;

    /// Top-left corner.
    fn top_left(&self) -> Point {
        Point::new(self.left(), self.top())
    }
}

impl BoxEdges for Rect {
    fn top(&self) -> f64 {
        self.y1
    }

    fn bottom(&self) -> f64 {
        self.y0
    }

    fn left(&self) -> f64 {
        self.x0
    }

    fn right(&self) -> f64 {
        self.x1
    }

    fn edge_midpoint(&self, edge: Edge) -> Point {
        let c = self.center();
        match edge {
            Edge::Top => Point::new(c.x, self.y1),
            Edge::Bottom => Point::new(c.x, self.y0),
            Edge::Left => Point::new(self.x0, c.y),
            Edge::Right => Point::new(self.x1, c.y),
        }
    }
}

/// Build a normalized box from its centre and size.
pub fn rect_centered(center: Point, width: f64, height: f64) -> Rect {
    Rect::from_center_size(center, (width, height))
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

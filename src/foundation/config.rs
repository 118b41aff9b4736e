use crate::foundation::{
    core::Rgba8,
    error::{LayoutError, LayoutResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Tunable constants shared by every layout component.
///
/// All lengths are in scene units. Every field has a default, so a partial JSON
/// document only needs the values it overrides.
pub struct LayoutConfig {
    /// Inset kept between a frame's edges and its content when fitting.
    pub frame_margin: f64,
    /// Vertical gap between stacked cells.
    pub stack_gap: f64,
    /// Gap between the array title and its first cell.
    pub array_padding: f64,
    /// Width reserved for an array title (0 when the title is empty).
    pub title_width: f64,
    /// Height reserved above a 2-D grid for its title.
    pub grid_title_band: f64,
    /// Extra downward shift applied to every 2-D grid row.
    pub grid_row_drop: f64,
    /// Inset applied to a tree's frame on every side.
    pub tree_margin: f64,
    /// Minimum horizontal clearance between sibling subtrees (at scale 1).
    pub sibling_margin: f64,
    /// Horizontal offset from a parent to its child (at scale 1).
    pub child_dx: f64,
    /// Vertical offset from a parent to its child (at scale 1).
    pub child_dy: f64,
    /// Largest node radius, as a multiple of the initial radius.
    pub max_radius_ratio: f64,
    /// Initial node radius.
    pub node_radius: f64,
    /// Gap between the root and the tree identifier above it.
    pub label_padding: f64,
    /// Largest text width as a fraction of its cell width.
    pub cell_text_width_ratio: f64,
    /// Largest text height as a fraction of its cell height.
    pub cell_text_height_ratio: f64,
    /// Natural cell width for stack and reference cells.
    pub cell_width: f64,
    /// Natural cell height for stack and reference cells.
    pub cell_height: f64,
    /// Number of flat code rows visible at once.
    pub code_window: usize,
    /// Extra spacing between code rows, as a fraction of the row height.
    pub code_line_spacing: f64,
    /// Gap between the line pointer and the row it points at.
    pub pointer_buff: f64,
    /// Side length of the line pointer glyph.
    pub pointer_size: f64,
    /// Vertical lift applied to a temporary clone during clone-and-swap.
    pub clone_lift: f64,
    /// Largest variable text width as a fraction of the variable panel width.
    pub variable_width_ratio: f64,
    /// Smallest text height or node radius still considered legible.
    pub min_legible: f64,
    /// Default duration hint for a batch, in seconds.
    pub run_time: f64,
    /// Duration hint for a single scroll step, in seconds.
    pub scroll_run_time: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            frame_margin: 0.25,
            stack_gap: 0.25,
            array_padding: 0.2,
            title_width: 1.0,
            grid_title_band: 1.0,
            grid_row_drop: 0.25,
            tree_margin: 0.2,
            sibling_margin: 0.2,
            child_dx: 1.5,
            child_dy: 2.0,
            max_radius_ratio: 1.3,
            node_radius: 0.6,
            label_padding: 0.3,
            cell_text_width_ratio: 0.7,
            cell_text_height_ratio: 0.6,
            cell_width: 1.5,
            cell_height: 0.75,
            code_window: 10,
            code_line_spacing: 0.2,
            pointer_buff: 0.25,
            pointer_size: 0.2,
            clone_lift: 0.4,
            variable_width_ratio: 0.8,
            min_legible: 0.02,
            run_time: 1.0,
            scroll_run_time: 0.1,
        }
    }
}

impl LayoutConfig {
    /// Parse a (possibly partial) JSON document and validate it.
    pub fn from_json_str(s: &str) -> LayoutResult<Self> {
        let cfg: Self = serde_json::from_str(s).map_err(|e| LayoutError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values that would make fitting degenerate.
    pub fn validate(&self) -> LayoutResult<()> {
        let positive = [
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
            ("node_radius", self.node_radius),
            ("child_dx", self.child_dx),
            ("child_dy", self.child_dy),
            ("cell_text_width_ratio", self.cell_text_width_ratio),
            ("cell_text_height_ratio", self.cell_text_height_ratio),
            ("variable_width_ratio", self.variable_width_ratio),
            ("min_legible", self.min_legible),
        ];
        for (name, v) in positive {
            if !(v.is_finite() && v > 0.0) {
                return Err(LayoutError::degenerate(format!("{name} must be > 0")));
            }
        }
        let non_negative = [
            ("frame_margin", self.frame_margin),
            ("stack_gap", self.stack_gap),
            ("array_padding", self.array_padding),
            ("title_width", self.title_width),
            ("tree_margin", self.tree_margin),
            ("sibling_margin", self.sibling_margin),
        ];
        for (name, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return Err(LayoutError::degenerate(format!("{name} must be >= 0")));
            }
        }
        if self.max_radius_ratio < 1.0 {
            return Err(LayoutError::degenerate("max_radius_ratio must be >= 1"));
        }
        if self.code_window == 0 {
            return Err(LayoutError::degenerate("code_window must be > 0"));
        }
        Ok(())
    }
}

/// Weight handed to the text metrics collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FontWeight {
    /// Regular weight.
    #[default]
    Normal,
    /// Bold weight; wider advance.
    Bold,
}

/// How a freshly built structure appears on screen.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CreationStyle {
    /// Opacity ramp.
    #[default]
    FadeIn,
    /// Stroke-by-stroke drawing.
    Write,
    /// Scale up from the centre.
    GrowFromCenter,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Visual styling record shared by a structure's elements.
pub struct Style {
    /// Stroke colour of boxes and circles.
    pub color: Rgba8,
    /// Text colour.
    pub text_color: Rgba8,
    /// Colour of connecting lines.
    pub line_color: Rgba8,
    /// Colour used when highlighting is enabled.
    pub highlight_color: Rgba8,
    /// Colour non-participating cells fade to during an emphasised swap.
    pub dim_color: Rgba8,
    /// Font family passed to the text metrics collaborator.
    pub font: String,
    /// Font weight passed to the text metrics collaborator.
    pub weight: FontWeight,
    /// Appearance transition used by `build`.
    pub creation: CreationStyle,
    /// When off, highlight requests produce no transitions.
    pub highlighting: bool,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            color: Rgba8::BLUE,
            text_color: Rgba8::WHITE,
            line_color: Rgba8::GREEN,
            highlight_color: Rgba8::YELLOW,
            dim_color: Rgba8::GREY,
            font: "Times New Roman".to_string(),
            weight: FontWeight::Normal,
            creation: CreationStyle::FadeIn,
            highlighting: true,
        }
    }
}

impl Style {
    /// Same style with new stroke and text colours.
    pub fn with_colors(mut self, color: Rgba8, text_color: Rgba8) -> Self {
        self.color = color;
        self.text_color = text_color;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;

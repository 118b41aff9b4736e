use crate::{
    foundation::core::{Anchor, BoxEdges, Rect},
    foundation::error::LayoutResult,
    foundation::math::ensure_positive,
    layout::frame::Frame,
    scene::store::Scene,
};

/// Share of the structures panel height given to the subtitle strip.
const SUBTITLE_SHARE: f64 = 1.0 / 8.0;

/// Which optional panels the template reserves room for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PanelOptions {
    /// Reserve a code column.
    pub code: bool,
    /// Reserve a variable panel above the code.
    pub variables: bool,
    /// Reserve a subtitle strip under the structures.
    pub subtitles: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            code: true,
            variables: true,
            subtitles: false,
        }
    }
}

/// One region of a [`PanelTemplate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Panel {
    /// Variable listing, top left.
    Variables,
    /// Code column, bottom left.
    Code,
    /// Data structures, right.
    Structures,
    /// Caption strip along the bottom of the structures.
    Subtitles,
}

/// Fixed split of the screen into the variable, code, structure and
/// subtitle panels.
///
/// The left third holds variables above code (one third and two thirds of
/// the height). Without code the structures take the whole screen; without
/// variables the code column takes the full height. The subtitle strip sits
/// along the bottom of the structures panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanelTemplate {
    screen: Rect,
    variables: Option<Rect>,
    code: Option<Rect>,
    structures: Rect,
    subtitles: Option<Rect>,
}

impl PanelTemplate {
    /// Split `screen`; degenerate when it has no area.
    pub fn new(screen: Rect, options: PanelOptions) -> LayoutResult<Self> {
        let screen = screen.abs();
        let w = ensure_positive("screen width", screen.width())?;
        let h = ensure_positive("screen height", screen.height())?;

        let (mut variables, mut code) = (None, None);
        let mut structures = screen;
        if options.code {
            let split = screen.left() + w / 3.0;
            structures = Rect::new(split, screen.bottom(), screen.right(), screen.top());
            if options.variables {
                let divide = screen.bottom() + h * 2.0 / 3.0;
                code = Some(Rect::new(screen.left(), screen.bottom(), split, divide));
                variables = Some(Rect::new(screen.left(), divide, split, screen.top()));
            } else {
                code = Some(Rect::new(screen.left(), screen.bottom(), split, screen.top()));
            }
        }

        let mut subtitles = None;
        if options.subtitles {
            let strip = structures.bottom() + structures.height() * SUBTITLE_SHARE;
            subtitles = Some(Rect::new(
                structures.left(),
                structures.bottom(),
                structures.right(),
                strip,
            ));
            structures.y0 = strip;
        }

        Ok(Self {
            screen,
            variables,
            code,
            structures,
            subtitles,
        })
    }

    /// The default 14 × 8 screen centred on the origin.
    pub fn standard(options: PanelOptions) -> LayoutResult<Self> {
        Self::new(Rect::new(-7.0, -4.0, 7.0, 4.0), options)
    }

    /// Whole screen rectangle.
    pub fn screen(&self) -> Rect {
        self.screen
    }

    /// Rectangle of `panel`; `None` when it was not reserved.
    pub fn rect(&self, panel: Panel) -> Option<Rect> {
        match panel {
            Panel::Variables => self.variables,
            Panel::Code => self.code,
            Panel::Structures => Some(self.structures),
            Panel::Subtitles => self.subtitles,
        }
    }

    /// Frame over `panel`, or `None` when the template has no such panel.
    pub fn frame(
        &self,
        scene: &mut Scene,
        panel: Panel,
        anchor: Anchor,
        margin: f64,
    ) -> LayoutResult<Option<Frame>> {
        self.rect(panel)
            .map(|r| Frame::new(scene, r, anchor, margin))
            .transpose()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/panels.rs"]
mod tests;

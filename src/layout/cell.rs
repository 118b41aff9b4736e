use crate::{
    animation::transition::Transition,
    foundation::config::{LayoutConfig, Style},
    foundation::core::{Anchor, Point, Rect, Rgba8},
    foundation::error::{LayoutError, LayoutResult},
    foundation::math::ensure_positive,
    scene::element::ElementId,
    scene::store::Scene,
};

/// Labeled box holding one value: the base element of arrays and stacks.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    value: String,
    color: Rgba8,
    text_color: Rgba8,
    group: ElementId,
    shape: ElementId,
    text: ElementId,
}

impl Cell {
    /// Box of `width × height` centred on the origin, with `value` fitted inside.
    pub fn new(
        scene: &mut Scene,
        value: &str,
        width: f64,
        height: f64,
        style: &Style,
        cfg: &LayoutConfig,
    ) -> LayoutResult<Self> {
        let shape = scene.rect(width, height, style.color)?;
        let text = fitted_text(scene, value, style.text_color, width, height, style, cfg)?;
        let group = scene.group(&[shape, text])?;
        Ok(Self {
            value: value.to_string(),
            color: style.color,
            text_color: style.text_color,
            group,
            shape,
            text,
        })
    }

    /// Value currently shown.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Group holding the box and the text.
    pub fn group(&self) -> ElementId {
        self.group
    }

    /// The box outline.
    pub fn shape(&self) -> ElementId {
        self.shape
    }

    /// The value text.
    pub fn text(&self) -> ElementId {
        self.text
    }

    /// Resting outline colour.
    pub fn color(&self) -> Rgba8 {
        self.color
    }

    /// Resting text colour.
    pub fn text_color(&self) -> Rgba8 {
        self.text_color
    }

    /// Current extent of the box.
    pub fn box_rect(&self, scene: &Scene) -> LayoutResult<Rect> {
        scene.require_bounds(self.shape)
    }

    /// Box width.
    pub fn width(&self, scene: &Scene) -> LayoutResult<f64> {
        Ok(self.box_rect(scene)?.width())
    }

    /// Box height.
    pub fn height(&self, scene: &Scene) -> LayoutResult<f64> {
        Ok(self.box_rect(scene)?.height())
    }

    /// Box centre.
    pub fn center(&self, scene: &Scene) -> LayoutResult<Point> {
        Ok(self.box_rect(scene)?.center())
    }

    /// Re-render the value text in place.
    pub fn replace_value(
        &mut self,
        scene: &mut Scene,
        value: &str,
        style: &Style,
        cfg: &LayoutConfig,
    ) -> LayoutResult<Transition> {
        let rect = self.box_rect(scene)?;
        let text = fitted_text(
            scene,
            value,
            self.text_color,
            rect.width(),
            rect.height(),
            style,
            cfg,
        )?;
        scene.move_to(text, rect.center(), Anchor::Center)?;
        let old = self.swap_text(scene, text)?;
        self.value = value.to_string();
        Ok(Transition::Transform {
            from: old,
            into: text,
        })
    }

    /// Install `text` as this cell's value glyphs; returns the previous text,
    /// now detached.
    pub(crate) fn swap_text(&mut self, scene: &mut Scene, text: ElementId) -> LayoutResult<ElementId> {
        let old = self.text;
        scene.detach(old)?;
        scene.push_child(self.group, text)?;
        self.text = text;
        Ok(old)
    }

    pub(crate) fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// Recolour box and text.
    pub fn recolor(
        &mut self,
        scene: &mut Scene,
        color: Rgba8,
        text_color: Rgba8,
    ) -> LayoutResult<Vec<Transition>> {
        scene.set_color(self.shape, color)?;
        scene.set_color(self.text, text_color)?;
        self.color = color;
        self.text_color = text_color;
        Ok(vec![
            Transition::Recolor {
                target: self.shape,
                color,
            },
            Transition::Recolor {
                target: self.text,
                color: text_color,
            },
        ])
    }

    /// Uniformly scale so the box is `width` wide; returns the factor.
    pub fn scale_to_width(&mut self, scene: &mut Scene, width: f64) -> LayoutResult<f64> {
        let rect = self.box_rect(scene)?;
        let factor = ensure_positive("cell width", width)? / rect.width();
        scene.scale_about(self.group, factor, rect.center())?;
        Ok(factor)
    }
}

/// Text for `value`, scaled so it spans at most the configured fraction of
/// the box on each axis. Never scaled above natural size.
pub(crate) fn fitted_text(
    scene: &mut Scene,
    value: &str,
    color: Rgba8,
    width: f64,
    height: f64,
    style: &Style,
    cfg: &LayoutConfig,
) -> LayoutResult<ElementId> {
    let text = scene.text(value, color, style)?;
    let natural = scene.require_bounds(text)?;
    let mut factor = 1.0_f64;
    if natural.width() > 0.0 {
        factor = factor.min(cfg.cell_text_width_ratio * width / natural.width());
    }
    if natural.height() > 0.0 {
        factor = factor.min(cfg.cell_text_height_ratio * height / natural.height());
    }
    if natural.height() * factor < cfg.min_legible {
        return Err(LayoutError::unfittable(format!(
            "'{value}' would be {:.4} tall in a {width:.3}×{height:.3} box",
            natural.height() * factor
        )));
    }
    if factor < 1.0 {
        scene.scale_about(text, factor, natural.center())?;
    }
    Ok(text)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/cell.rs"]
mod tests;

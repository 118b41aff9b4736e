use crate::foundation::{config::FontWeight, core::Size};

/// Text measurement collaborator.
///
/// Layout never rasterises glyphs; it only needs the natural extent of a
/// string so it can scale the text into its box.
pub trait TextMetrics: std::fmt::Debug {
    /// Natural width and height of `text` at unit scale.
    fn measure(&self, text: &str, font: &str, weight: FontWeight) -> Size;
}

/// Deterministic fixed-advance metrics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MonospaceMetrics {
    /// Horizontal advance per character.
    pub advance: f64,
    /// Height of one line of text.
    pub line_height: f64,
    /// Advance multiplier for bold text.
    pub bold_factor: f64,
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self {
            advance: 0.25,
            line_height: 0.4,
            bold_factor: 1.1,
        }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn measure(&self, text: &str, _font: &str, weight: FontWeight) -> Size {
        let advance = match weight {
            FontWeight::Normal => self.advance,
            FontWeight::Bold => self.advance * self.bold_factor,
        };
        Size::new(text.chars().count() as f64 * advance, self.line_height)
    }
}

use crate::{
    animation::transition::{Batch, Transition},
    foundation::core::Edge,
    foundation::error::LayoutResult,
    layout::frame::Frame,
    scene::store::Scene,
};

/// Boundary queries shared by every layout bound to a [`Frame`].
pub trait BoundedLayout {
    /// Panel the layout lives in.
    fn frame(&self) -> &Frame;

    /// Mutable access to the panel.
    fn frame_mut(&mut self) -> &mut Frame;

    /// Whether growing the content by `dimension` past `edge` would leave the frame.
    fn will_cross(&self, scene: &Scene, dimension: f64, edge: Edge) -> LayoutResult<bool> {
        self.frame().will_cross(scene, dimension, edge)
    }

    /// Rescale the content so an extent of `new_width` × `new_height` fits.
    ///
    /// Returns the applied factor and the matching transition, if any.
    fn shrink_to_fit(
        &mut self,
        scene: &mut Scene,
        new_width: f64,
        new_height: f64,
    ) -> LayoutResult<(f64, Option<Transition>)> {
        self.frame_mut().shrink_to_fit(scene, new_width, new_height)
    }

    /// Fade out everything the layout placed; the frame stays.
    fn clean_up(&mut self, scene: &mut Scene) -> LayoutResult<Vec<Batch>>;
}

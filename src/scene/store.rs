use std::collections::BTreeMap;

use crate::{
    foundation::config::Style,
    foundation::core::{Anchor, BoxEdges, Edge, Point, Rect, Rgba8, Size, Vec2, rect_centered},
    foundation::error::{LayoutError, LayoutResult},
    foundation::math::ensure_positive,
    scene::element::{Element, ElementId, Shape},
    scene::metrics::{MonospaceMetrics, TextMetrics},
};

/// Kind of structure registered under an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StructureKind {
    /// [`crate::Array`].
    Array,
    /// [`crate::Array2D`].
    Array2D,
    /// [`crate::Stack`].
    Stack,
    /// [`crate::Tree`].
    Tree,
    /// [`crate::CodeViewport`].
    Code,
    /// [`crate::VariableBlock`].
    Variables,
}

/// Entry in the identifier lookup table.
///
/// Holding a handle never transfers ownership of the structure's visual group.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct StructureHandle {
    /// What the identifier names.
    pub kind: StructureKind,
    /// The structure's visual group.
    pub group: ElementId,
}

/// Arena of visual elements shared by every layout in a scene.
///
/// Elements are addressed by [`ElementId`]. Groups own their children for
/// placement purposes: translating or scaling a group moves its whole subtree.
#[derive(Debug)]
pub struct Scene {
    elements: Vec<Option<Element>>,
    metrics: Box<dyn TextMetrics>,
    registry: BTreeMap<String, StructureHandle>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Empty scene with [`MonospaceMetrics`].
    pub fn new() -> Self {
        Self::with_metrics(MonospaceMetrics::default())
    }

    /// Empty scene measuring text with `metrics`.
    pub fn with_metrics(metrics: impl TextMetrics + 'static) -> Self {
        Self {
            elements: Vec::new(),
            metrics: Box::new(metrics),
            registry: BTreeMap::new(),
        }
    }

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.elements.iter().filter(|e| e.is_some()).count()
    }

    /// `true` when no element is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `id` names a live element.
    pub fn contains(&self, id: ElementId) -> bool {
        self.get(id).is_ok()
    }

    /// Look up a live element.
    pub fn get(&self, id: ElementId) -> LayoutResult<&Element> {
        self.elements
            .get(id.0 as usize)
            .and_then(Option::as_ref)
            .ok_or(LayoutError::UnknownElement(id))
    }

    fn get_mut(&mut self, id: ElementId) -> LayoutResult<&mut Element> {
        self.elements
            .get_mut(id.0 as usize)
            .and_then(Option::as_mut)
            .ok_or(LayoutError::UnknownElement(id))
    }

    /// Live elements in creation order.
    pub fn elements(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.elements
            .iter()
            .enumerate()
            .filter_map(|(idx, e)| e.as_ref().map(|e| (ElementId(idx as u32), e)))
    }

    fn insert(&mut self, shape: Shape) -> LayoutResult<ElementId> {
        let id = ElementId(
            self.elements
                .len()
                .try_into()
                .map_err(|_| LayoutError::degenerate("element id overflow"))?,
        );
        self.elements.push(Some(Element {
            shape,
            parent: None,
        }));
        Ok(id)
    }

    // Primitive construction. New elements are centred on the origin.

    /// Outlined box.
    pub fn rect(&mut self, width: f64, height: f64, stroke: Rgba8) -> LayoutResult<ElementId> {
        let w = ensure_positive("rectangle width", width)?;
        let h = ensure_positive("rectangle height", height)?;
        self.insert(Shape::Rect {
            rect: rect_centered(Point::ORIGIN, w, h),
            stroke,
        })
    }

    /// Outlined circle.
    pub fn circle(&mut self, radius: f64, stroke: Rgba8) -> LayoutResult<ElementId> {
        if !(radius.is_finite() && radius >= 0.0) {
            return Err(LayoutError::degenerate(format!(
                "circle radius must be finite and >= 0 (got {radius})"
            )));
        }
        self.insert(Shape::Circle {
            center: Point::ORIGIN,
            radius,
            stroke,
        })
    }

    /// Segment between two absolute points.
    pub fn line(&mut self, from: Point, to: Point, stroke: Rgba8) -> LayoutResult<ElementId> {
        self.insert(Shape::Line { from, to, stroke })
    }

    /// Natural extent of `content` in `style`.
    pub fn measure(&self, content: &str, style: &Style) -> Size {
        self.metrics.measure(content, &style.font, style.weight)
    }

    /// Text at its natural measured size.
    pub fn text(&mut self, content: &str, color: Rgba8, style: &Style) -> LayoutResult<ElementId> {
        let size = self.measure(content, style);
        self.insert(Shape::Text {
            content: content.to_string(),
            rect: rect_centered(Point::ORIGIN, size.width, size.height),
            color,
        })
    }

    /// Square pointer glyph of side `size`.
    pub fn glyph(&mut self, size: f64, color: Rgba8) -> LayoutResult<ElementId> {
        let s = ensure_positive("glyph size", size)?;
        self.insert(Shape::Glyph {
            rect: rect_centered(Point::ORIGIN, s, s),
            color,
        })
    }

    /// Group adopting `children` in order.
    pub fn group(&mut self, children: &[ElementId]) -> LayoutResult<ElementId> {
        let id = self.insert(Shape::Group {
            children: Vec::new(),
        })?;
        for &child in children {
            self.push_child(id, child)?;
        }
        Ok(id)
    }

    // Group composition.

    /// Append `child` to `group`, detaching it from any previous parent.
    pub fn push_child(&mut self, group: ElementId, child: ElementId) -> LayoutResult<()> {
        let mut cursor = Some(group);
        while let Some(c) = cursor {
            if c == child {
                return Err(LayoutError::precondition(format!(
                    "adding {child:?} to {group:?} would create a cycle"
                )));
            }
            cursor = self.get(c)?.parent;
        }
        self.get(child)?;
        if !matches!(self.get(group)?.shape, Shape::Group { .. }) {
            return Err(LayoutError::precondition(format!(
                "{group:?} is not a group"
            )));
        }

        self.detach(child)?;
        if let Shape::Group { children } = &mut self.get_mut(group)?.shape {
            children.push(child);
        }
        self.get_mut(child)?.parent = Some(group);
        Ok(())
    }

    /// Remove `child` from its parent group; the element stays alive.
    pub fn detach(&mut self, child: ElementId) -> LayoutResult<()> {
        let Some(parent) = self.get(child)?.parent else {
            return Ok(());
        };
        if let Shape::Group { children } = &mut self.get_mut(parent)?.shape {
            children.retain(|c| *c != child);
        }
        self.get_mut(child)?.parent = None;
        Ok(())
    }

    /// Detach and drop `id` together with its whole subtree.
    pub fn remove(&mut self, id: ElementId) -> LayoutResult<()> {
        self.detach(id)?;
        for e in self.subtree(id)? {
            self.elements[e.0 as usize] = None;
        }
        Ok(())
    }

    /// Members of a group; empty for leaves.
    pub fn children(&self, id: ElementId) -> LayoutResult<&[ElementId]> {
        match &self.get(id)?.shape {
            Shape::Group { children } => Ok(children.as_slice()),
            _ => Ok(&[]),
        }
    }

    /// Owning group of `id`, if attached.
    pub fn parent(&self, id: ElementId) -> LayoutResult<Option<ElementId>> {
        Ok(self.get(id)?.parent)
    }

    fn subtree(&self, id: ElementId) -> LayoutResult<Vec<ElementId>> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(e) = stack.pop() {
            out.push(e);
            if let Shape::Group { children } = &self.get(e)?.shape {
                stack.extend(children.iter().rev().copied());
            }
        }
        Ok(out)
    }

    // Geometry queries.

    /// Union of every leaf box under `id`; `None` for an empty group.
    pub fn bounds(&self, id: ElementId) -> LayoutResult<Option<Rect>> {
        let mut acc: Option<Rect> = None;
        for e in self.subtree(id)? {
            if let Some(r) = self.get(e)?.shape.leaf_bounds() {
                acc = Some(acc.map_or(r, |a| a.union(r)));
            }
        }
        Ok(acc)
    }

    /// Like [`Scene::bounds`], failing on an empty group.
    pub fn require_bounds(&self, id: ElementId) -> LayoutResult<Rect> {
        self.bounds(id)?
            .ok_or_else(|| LayoutError::degenerate(format!("{id:?} has no extent")))
    }

    /// Start and end of a line element.
    pub fn line_endpoints(&self, id: ElementId) -> LayoutResult<(Point, Point)> {
        match self.get(id)?.shape {
            Shape::Line { from, to, .. } => Ok((from, to)),
            _ => Err(LayoutError::precondition(format!("{id:?} is not a line"))),
        }
    }

    /// Centre and radius of a circle element.
    pub fn circle_geometry(&self, id: ElementId) -> LayoutResult<(Point, f64)> {
        match self.get(id)?.shape {
            Shape::Circle { center, radius, .. } => Ok((center, radius)),
            _ => Err(LayoutError::precondition(format!("{id:?} is not a circle"))),
        }
    }

    /// Point on a circle's outline, angle in degrees counterclockwise from +x.
    pub fn point_on_circle(&self, id: ElementId, degrees: f64) -> LayoutResult<Point> {
        let (c, r) = self.circle_geometry(id)?;
        let a = degrees.to_radians();
        Ok(Point::new(c.x + r * a.cos(), c.y + r * a.sin()))
    }

    /// String shown by a text element.
    pub fn text_content(&self, id: ElementId) -> LayoutResult<&str> {
        match &self.get(id)?.shape {
            Shape::Text { content, .. } => Ok(content.as_str()),
            _ => Err(LayoutError::precondition(format!("{id:?} is not text"))),
        }
    }

    // Mutation.

    fn map_subtree(
        &mut self,
        id: ElementId,
        about: Point,
        factor: f64,
        offset: Vec2,
    ) -> LayoutResult<()> {
        for e in self.subtree(id)? {
            self.get_mut(e)?.shape.map_points(about, factor, offset);
        }
        Ok(())
    }

    /// Shift `id` and its subtree by `by`.
    pub fn translate(&mut self, id: ElementId, by: Vec2) -> LayoutResult<()> {
        self.map_subtree(id, Point::ORIGIN, 1.0, by)
    }

    /// Scale `id` and its subtree about `about`.
    pub fn scale_about(&mut self, id: ElementId, factor: f64, about: Point) -> LayoutResult<()> {
        let f = ensure_positive("scale factor", factor)?;
        self.map_subtree(id, about, f, Vec2::ZERO)
    }

    /// Translate `id` so that its `anchor` point lands on `target`.
    pub fn move_to(&mut self, id: ElementId, target: Point, anchor: Anchor) -> LayoutResult<Vec2> {
        let b = self.require_bounds(id)?;
        let delta = target - anchor.point_on(b);
        self.translate(id, delta)?;
        Ok(delta)
    }

    /// Place `id` beside `target`, `buff` away from its `edge`, centred on the
    /// other axis.
    pub fn next_to(
        &mut self,
        id: ElementId,
        target: Rect,
        edge: Edge,
        buff: f64,
    ) -> LayoutResult<Vec2> {
        let b = self.require_bounds(id)?;
        let goal = target.edge_midpoint(edge) + edge.direction() * buff;
        let delta = goal - b.edge_midpoint(edge.opposite());
        self.translate(id, delta)?;
        Ok(delta)
    }

    /// Uniformly scale `id` about its centre so its width becomes `width`.
    pub fn scale_to_width(&mut self, id: ElementId, width: f64) -> LayoutResult<f64> {
        let target = ensure_positive("target width", width)?;
        let b = self.require_bounds(id)?;
        let current = ensure_positive("element width", b.width())?;
        let factor = target / current;
        self.scale_about(id, factor, b.center())?;
        Ok(factor)
    }

    /// Recolour every element under `id`.
    pub fn set_color(&mut self, id: ElementId, color: Rgba8) -> LayoutResult<()> {
        for e in self.subtree(id)? {
            self.get_mut(e)?.shape.set_color(color);
        }
        Ok(())
    }

    /// Replace a line's endpoints.
    pub fn set_line(&mut self, id: ElementId, from: Point, to: Point) -> LayoutResult<()> {
        match &mut self.get_mut(id)?.shape {
            Shape::Line { from: f, to: t, .. } => {
                *f = from;
                *t = to;
                Ok(())
            }
            _ => Err(LayoutError::precondition(format!("{id:?} is not a line"))),
        }
    }

    /// Copy `id` and its subtree; the copy has no parent.
    pub fn deep_clone(&mut self, id: ElementId) -> LayoutResult<ElementId> {
        let shape = self.get(id)?.shape.clone();
        match shape {
            Shape::Group { children } => {
                let copy = self.insert(Shape::Group {
                    children: Vec::new(),
                })?;
                for child in children {
                    let c = self.deep_clone(child)?;
                    self.push_child(copy, c)?;
                }
                Ok(copy)
            }
            leaf => self.insert(leaf),
        }
    }

    // Identifier lookup table.

    /// Record `handle` under `identifier`; duplicates are a precondition error.
    pub fn register(
        &mut self,
        identifier: impl Into<String>,
        handle: StructureHandle,
    ) -> LayoutResult<()> {
        let identifier = identifier.into();
        if self.registry.contains_key(&identifier) {
            return Err(LayoutError::precondition(format!(
                "duplicate structure identifier '{identifier}'"
            )));
        }
        self.registry.insert(identifier, handle);
        Ok(())
    }

    /// Handle registered under `identifier`.
    pub fn lookup(&self, identifier: &str) -> Option<StructureHandle> {
        self.registry.get(identifier).copied()
    }

    /// Forget `identifier`, returning its handle.
    pub fn unregister(&mut self, identifier: &str) -> Option<StructureHandle> {
        self.registry.remove(identifier)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/store.rs"]
mod tests;

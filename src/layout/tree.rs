use crate::{
    animation::transition::{Batch, MoveTarget, Transition, push_batch},
    foundation::config::{LayoutConfig, Style},
    foundation::core::{Anchor, BoxEdges, Edge, Point, Rgba8, Vec2},
    foundation::error::{LayoutError, LayoutResult},
    foundation::math::{EPS, approx_eq},
    layout::{
        bounded::BoundedLayout,
        cell::{Cell, fitted_text},
        frame::Frame,
    },
    scene::element::ElementId,
    scene::store::{Scene, StructureHandle, StructureKind},
};

/// Handle to a node of a [`Tree`]. Stays valid until the node is deleted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct NodeId(usize);

/// Which child slot of a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Side {
    /// Lower-left slot.
    Left,
    /// Lower-right slot.
    Right,
}

impl Side {
    /// Angle on the parent's outline where the connecting line starts.
    fn port_degrees(self) -> f64 {
        match self {
            Self::Left => 225.0,
            Self::Right => 315.0,
        }
    }

    fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(Clone, Debug)]
enum NodeBody {
    Value {
        circle: ElementId,
        text: ElementId,
    },
    /// Labelled box standing in for the structure registered under
    /// `identifier`. Always a leaf.
    Reference { cell: Cell, identifier: String },
}

#[derive(Clone, Debug)]
struct Node {
    value: String,
    body: NodeBody,
    /// Owns the node's visuals, its outgoing lines and both child subtrees.
    group: ElementId,
    left: Option<NodeId>,
    right: Option<NodeId>,
    left_line: Option<ElementId>,
    right_line: Option<ElementId>,
}

impl Node {
    fn child(&self, side: Side) -> Option<NodeId> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    fn line(&self, side: Side) -> Option<ElementId> {
        match side {
            Side::Left => self.left_line,
            Side::Right => self.right_line,
        }
    }

    fn set_child(&mut self, side: Side, child: Option<NodeId>, line: Option<ElementId>) {
        match side {
            Side::Left => {
                self.left = child;
                self.left_line = line;
            }
            Side::Right => {
                self.right = child;
                self.right_line = line;
            }
        }
    }
}

/// Binary tree drawn inside a frame inset from its panel.
///
/// Every structural edit is followed by [`Tree::settle`]: sibling subtrees are
/// pushed apart where they collide, the tree is shrunk back inside the frame
/// when it crosses an edge, and otherwise grown into free space until nodes
/// reach their largest radius.
#[derive(Clone, Debug)]
pub struct Tree {
    identifier: String,
    frame: Frame,
    nodes: Vec<Option<Node>>,
    root: NodeId,
    label: Option<ElementId>,
    initial_radius: f64,
    radius: f64,
    style: Style,
    cfg: LayoutConfig,
}

impl Tree {
    /// Root node `root_value` centred in `panel`, registered in the scene
    /// under `identifier`.
    pub fn new(
        scene: &mut Scene,
        identifier: &str,
        root_value: &str,
        panel: Frame,
        style: Style,
        cfg: LayoutConfig,
    ) -> LayoutResult<Self> {
        let frame = panel.inset(scene, cfg.tree_margin, Anchor::Center)?;
        scene.push_child(panel.group(), frame.group())?;
        let radius = cfg.node_radius;
        if radius < cfg.min_legible {
            return Err(LayoutError::unfittable(format!(
                "node radius {radius} is below the legible minimum"
            )));
        }

        let mut tree = Self {
            identifier: identifier.to_string(),
            frame,
            nodes: Vec::new(),
            root: NodeId(0),
            label: None,
            initial_radius: radius,
            radius,
            style,
            cfg,
        };
        let (circle, text) = tree.value_body(scene, root_value)?;
        let group = scene.group(&[circle, text])?;
        scene.move_to(group, tree.frame.rect().center(), Anchor::Center)?;
        scene.push_child(tree.frame.group(), group)?;
        tree.root = tree.insert(Node {
            value: root_value.to_string(),
            body: NodeBody::Value { circle, text },
            group,
            left: None,
            right: None,
            left_line: None,
            right_line: None,
        });
        scene.register(identifier, tree.handle())?;
        Ok(tree)
    }

    fn insert(&mut self, node: Node) -> NodeId {
        self.nodes.push(Some(node));
        NodeId(self.nodes.len() - 1)
    }

    fn node(&self, id: NodeId) -> LayoutResult<&Node> {
        self.nodes
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or_else(|| LayoutError::precondition(format!("unknown tree node {id:?}")))
    }

    fn node_mut(&mut self, id: NodeId) -> LayoutResult<&mut Node> {
        self.nodes
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or_else(|| LayoutError::precondition(format!("unknown tree node {id:?}")))
    }

    fn value_body(&self, scene: &mut Scene, value: &str) -> LayoutResult<(ElementId, ElementId)> {
        let circle = scene.circle(self.radius, self.style.color)?;
        let diameter = 2.0 * self.radius;
        let text = fitted_text(
            scene,
            value,
            self.style.text_color,
            diameter,
            diameter,
            &self.style,
            &self.cfg,
        )?;
        Ok((circle, text))
    }

    /// Name the tree is registered under.
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Identifier label above the root, once drawn.
    pub fn label(&self) -> Option<ElementId> {
        self.label
    }

    /// Current node radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Largest radius growth may reach.
    pub fn max_radius(&self) -> f64 {
        self.initial_radius * self.cfg.max_radius_ratio
    }

    /// Current radius relative to the initial one.
    pub fn scale(&self) -> f64 {
        self.radius / self.initial_radius
    }

    /// Value shown by node `id`.
    pub fn value(&self, id: NodeId) -> LayoutResult<&str> {
        Ok(&self.node(id)?.value)
    }

    /// Child of `id` on `side`.
    pub fn child(&self, id: NodeId, side: Side) -> LayoutResult<Option<NodeId>> {
        Ok(self.node(id)?.child(side))
    }

    /// Line from `id` to its child on `side`.
    pub fn line(&self, id: NodeId, side: Side) -> LayoutResult<Option<ElementId>> {
        Ok(self.node(id)?.line(side))
    }

    /// Group holding the node and its whole subtree.
    pub fn node_group(&self, id: NodeId) -> LayoutResult<ElementId> {
        Ok(self.node(id)?.group)
    }

    /// Whether `id` is a reference box rather than a value node.
    pub fn is_reference(&self, id: NodeId) -> LayoutResult<bool> {
        Ok(matches!(self.node(id)?.body, NodeBody::Reference { .. }))
    }

    /// Identifier a reference node points at.
    pub fn reference_target(&self, id: NodeId) -> LayoutResult<Option<&str>> {
        Ok(match &self.node(id)?.body {
            NodeBody::Reference { identifier, .. } => Some(identifier.as_str()),
            NodeBody::Value { .. } => None,
        })
    }

    /// Live nodes, parents before children.
    pub fn node_ids(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            let Ok(node) = self.node(id) else { continue };
            out.push(id);
            stack.extend(node.right);
            stack.extend(node.left);
        }
        out
    }

    /// Handle for the identifier table.
    pub fn handle(&self) -> StructureHandle {
        StructureHandle {
            kind: StructureKind::Tree,
            group: self.frame.group(),
        }
    }

    fn circle_of(&self, id: NodeId) -> LayoutResult<ElementId> {
        match self.node(id)?.body {
            NodeBody::Value { circle, .. } => Ok(circle),
            NodeBody::Reference { .. } => Err(LayoutError::precondition(format!(
                "reference node {id:?} cannot have children"
            ))),
        }
    }

    fn parent_port(&self, scene: &Scene, parent: NodeId, side: Side) -> LayoutResult<Point> {
        scene.point_on_circle(self.circle_of(parent)?, side.port_degrees())
    }

    fn child_port(&self, scene: &Scene, child: NodeId) -> LayoutResult<Point> {
        match &self.node(child)?.body {
            NodeBody::Value { circle, .. } => scene.point_on_circle(*circle, 90.0),
            NodeBody::Reference { cell, .. } => Ok(cell.box_rect(scene)?.edge_midpoint(Edge::Top)),
        }
    }

    /// Where a new child's centre goes, relative to its parent's centre.
    fn child_point(&self, scene: &Scene, parent: NodeId, side: Side) -> LayoutResult<Point> {
        let (center, _) = scene.circle_geometry(self.circle_of(parent)?)?;
        let s = self.scale();
        Ok(center + Vec2::new(side.sign() * self.cfg.child_dx * s, -self.cfg.child_dy * s))
    }

    fn free_slot(&self, parent: NodeId, side: Side) -> LayoutResult<()> {
        self.circle_of(parent)?;
        if self.node(parent)?.child(side).is_some() {
            return Err(LayoutError::precondition(format!(
                "{side:?} child of {parent:?} is already set"
            )));
        }
        Ok(())
    }

    /// Wire `group` under `parent` on `side` with a fresh line.
    fn attach(
        &mut self,
        scene: &mut Scene,
        parent: NodeId,
        side: Side,
        node: Node,
    ) -> LayoutResult<(NodeId, Vec<Transition>)> {
        let group = node.group;
        let parent_group = self.node(parent)?.group;
        let id = self.insert(node);
        let from = self.parent_port(scene, parent, side)?;
        let to = self.child_port(scene, id)?;
        let line = scene.line(from, to, self.style.line_color)?;
        scene.push_child(parent_group, line)?;
        scene.push_child(parent_group, group)?;
        self.node_mut(parent)?.set_child(side, Some(id), Some(line));
        Ok((
            id,
            vec![
                self.style.creation.transition(group),
                Transition::ShowLine { target: line },
            ],
        ))
    }

    /// Attach a value node under `parent` on `side`, then settle.
    ///
    /// The slot must be free and `parent` must be a value node.
    #[tracing::instrument(skip(self, scene))]
    pub fn set_child(
        &mut self,
        scene: &mut Scene,
        parent: NodeId,
        side: Side,
        value: &str,
    ) -> LayoutResult<(NodeId, Vec<Batch>)> {
        self.free_slot(parent, side)?;
        let (circle, text) = self.value_body(scene, value)?;
        let group = scene.group(&[circle, text])?;
        let at = self.child_point(scene, parent, side)?;
        scene.move_to(group, at, Anchor::Center)?;
        let node = Node {
            value: value.to_string(),
            body: NodeBody::Value { circle, text },
            group,
            left: None,
            right: None,
            left_line: None,
            right_line: None,
        };
        let (id, appear) = self.attach(scene, parent, side, node)?;
        let mut out = vec![Batch::new(appear, self.cfg.run_time)];
        out.extend(self.settle(scene)?);
        Ok((id, out))
    }

    /// [`Tree::set_child`] on the left.
    pub fn set_left(
        &mut self,
        scene: &mut Scene,
        parent: NodeId,
        value: &str,
    ) -> LayoutResult<(NodeId, Vec<Batch>)> {
        self.set_child(scene, parent, Side::Left, value)
    }

    /// [`Tree::set_child`] on the right.
    pub fn set_right(
        &mut self,
        scene: &mut Scene,
        parent: NodeId,
        value: &str,
    ) -> LayoutResult<(NodeId, Vec<Batch>)> {
        self.set_child(scene, parent, Side::Right, value)
    }

    /// Attach a box standing in for the structure registered as
    /// `identifier`, with its top edge where a child node would be centred.
    #[tracing::instrument(skip(self, scene))]
    pub fn set_reference(
        &mut self,
        scene: &mut Scene,
        parent: NodeId,
        side: Side,
        identifier: &str,
    ) -> LayoutResult<(NodeId, Vec<Batch>)> {
        self.free_slot(parent, side)?;
        if scene.lookup(identifier).is_none() {
            return Err(LayoutError::precondition(format!(
                "no structure registered as '{identifier}'"
            )));
        }
        let cell = Cell::new(
            scene,
            identifier,
            self.cfg.cell_width,
            self.cfg.cell_height,
            &self.style,
            &self.cfg,
        )?;
        scene.scale_about(cell.group(), self.scale(), Point::ORIGIN)?;
        let at = self.child_point(scene, parent, side)?;
        scene.move_to(cell.group(), at, Anchor::Edge(Edge::Top))?;
        let node = Node {
            value: identifier.to_string(),
            group: cell.group(),
            body: NodeBody::Reference {
                cell,
                identifier: identifier.to_string(),
            },
            left: None,
            right: None,
            left_line: None,
            right_line: None,
        };
        let (id, appear) = self.attach(scene, parent, side, node)?;
        let mut out = vec![Batch::new(appear, self.cfg.run_time)];
        out.extend(self.settle(scene)?);
        Ok((id, out))
    }

    /// [`Tree::set_reference`] on the left.
    pub fn set_reference_left(
        &mut self,
        scene: &mut Scene,
        parent: NodeId,
        identifier: &str,
    ) -> LayoutResult<(NodeId, Vec<Batch>)> {
        self.set_reference(scene, parent, Side::Left, identifier)
    }

    /// [`Tree::set_reference`] on the right.
    pub fn set_reference_right(
        &mut self,
        scene: &mut Scene,
        parent: NodeId,
        identifier: &str,
    ) -> LayoutResult<(NodeId, Vec<Batch>)> {
        self.set_reference(scene, parent, Side::Right, identifier)
    }

    /// Fade out a child subtree together with its line. Empty when there is
    /// no such child.
    fn detach_child(
        &mut self,
        scene: &mut Scene,
        parent: NodeId,
        side: Side,
    ) -> LayoutResult<Option<Batch>> {
        let node = self.node(parent)?;
        let (Some(child), Some(line)) = (node.child(side), node.line(side)) else {
            return Ok(None);
        };
        let group = self.node(child)?.group;
        scene.detach(group)?;
        scene.detach(line)?;
        self.node_mut(parent)?.set_child(side, None, None);

        let mut doomed = vec![child];
        while let Some(id) = doomed.pop() {
            if let Some(node) = self.nodes.get_mut(id.0).and_then(Option::take) {
                doomed.extend(node.left);
                doomed.extend(node.right);
            }
        }
        Ok(Some(Batch::new(
            vec![
                Transition::FadeOut { target: group },
                Transition::RemoveLine { target: line },
            ],
            self.cfg.run_time,
        )))
    }

    /// Fade out the child subtree on `side` with its line, then settle.
    ///
    /// An empty slot yields no batches.
    #[tracing::instrument(skip(self, scene))]
    pub fn delete_child(
        &mut self,
        scene: &mut Scene,
        parent: NodeId,
        side: Side,
    ) -> LayoutResult<Vec<Batch>> {
        let Some(removal) = self.detach_child(scene, parent, side)? else {
            return Ok(Vec::new());
        };
        let mut out = vec![removal];
        out.extend(self.settle(scene)?);
        Ok(out)
    }

    /// [`Tree::delete_child`] on the left.
    pub fn delete_left(&mut self, scene: &mut Scene, parent: NodeId) -> LayoutResult<Vec<Batch>> {
        self.delete_child(scene, parent, Side::Left)
    }

    /// [`Tree::delete_child`] on the right.
    pub fn delete_right(&mut self, scene: &mut Scene, parent: NodeId) -> LayoutResult<Vec<Batch>> {
        self.delete_child(scene, parent, Side::Right)
    }

    /// Drop both subtrees of the root, morph the root into `value`, then fade
    /// the whole root node in so it reads as a fresh node.
    #[tracing::instrument(skip(self, scene))]
    pub fn update_root(&mut self, scene: &mut Scene, value: &str) -> LayoutResult<Vec<Batch>> {
        let root = self.root;
        let mut out = Vec::new();
        for side in [Side::Left, Side::Right] {
            if let Some(b) = self.detach_child(scene, root, side)? {
                out.push(b);
            }
        }
        let run_time = self.cfg.run_time;
        out.push(Batch::single(self.replace_text(scene, root, value)?, run_time));
        out.push(Batch::single(
            Transition::FadeIn {
                target: self.node(root)?.group,
            },
            run_time,
        ));
        out.extend(self.settle(scene)?);
        Ok(out)
    }

    fn replace_text(&mut self, scene: &mut Scene, id: NodeId, value: &str) -> LayoutResult<Transition> {
        let (circle, old, group) = match self.node(id)?.body {
            NodeBody::Value { circle, text } => (circle, text, self.node(id)?.group),
            NodeBody::Reference { .. } => {
                return Err(LayoutError::precondition(format!(
                    "reference node {id:?} has no editable value"
                )));
            }
        };
        let (center, radius) = scene.circle_geometry(circle)?;
        let text = fitted_text(
            scene,
            value,
            self.style.text_color,
            2.0 * radius,
            2.0 * radius,
            &self.style,
            &self.cfg,
        )?;
        scene.move_to(text, center, Anchor::Center)?;
        scene.detach(old)?;
        scene.push_child(group, text)?;
        let node = self.node_mut(id)?;
        node.body = NodeBody::Value { circle, text };
        node.value = value.to_string();
        Ok(Transition::Transform {
            from: old,
            into: text,
        })
    }

    /// Morph the value of node `id` into `value`.
    pub fn edit_node_value(
        &mut self,
        scene: &mut Scene,
        id: NodeId,
        value: &str,
    ) -> LayoutResult<Vec<Batch>> {
        let t = self.replace_text(scene, id, value)?;
        Ok(vec![Batch::single(t, self.cfg.run_time)])
    }

    /// Recolour the outline of `id`; nothing when highlighting is off.
    pub fn highlight(&mut self, scene: &mut Scene, id: NodeId) -> LayoutResult<Vec<Batch>> {
        let color = self.style.highlight_color;
        self.recolor_outline(scene, id, color)
    }

    /// Restore the resting outline colour of `id`.
    pub fn unhighlight(&mut self, scene: &mut Scene, id: NodeId) -> LayoutResult<Vec<Batch>> {
        let color = self.style.color;
        self.recolor_outline(scene, id, color)
    }

    fn recolor_outline(
        &mut self,
        scene: &mut Scene,
        id: NodeId,
        color: Rgba8,
    ) -> LayoutResult<Vec<Batch>> {
        let outline = match &self.node(id)?.body {
            NodeBody::Value { circle, .. } => *circle,
            NodeBody::Reference { cell, .. } => cell.shape(),
        };
        if !self.style.highlighting {
            return Ok(Vec::new());
        }
        scene.set_color(outline, color)?;
        Ok(vec![Batch::single(
            Transition::Recolor {
                target: outline,
                color,
            },
            self.cfg.run_time,
        )])
    }

    /// Show the root with the identifier above it, then fit the tree.
    #[tracing::instrument(skip(self, scene))]
    pub fn create_init(&mut self, scene: &mut Scene) -> LayoutResult<Vec<Batch>> {
        if self.label.is_some() {
            return Err(LayoutError::precondition("tree label already drawn"));
        }
        let label = scene.text(&self.identifier, self.style.text_color, &self.style)?;
        scene.scale_about(label, self.scale(), Point::ORIGIN)?;
        let root_box = scene.require_bounds(self.circle_of(self.root)?)?;
        scene.next_to(
            label,
            root_box,
            Edge::Top,
            self.cfg.label_padding * self.scale(),
        )?;
        scene.push_child(self.frame.group(), label)?;
        self.label = Some(label);

        let creation = self.style.creation;
        let mut out = vec![Batch::new(
            vec![
                creation.transition(self.node(self.root)?.group),
                creation.transition(label),
            ],
            self.cfg.run_time,
        )];
        out.extend(self.settle(scene)?);
        Ok(out)
    }

    /// Run the overlap, boundary and growth passes.
    ///
    /// Growth is considered only when neither the overlap pass nor the
    /// boundary pass moved anything. Growth held back that way is picked up
    /// by the next call; after that, a call with no edit in between returns
    /// no batches.
    #[tracing::instrument(skip_all, fields(tree = %self.identifier))]
    pub fn settle(&mut self, scene: &mut Scene) -> LayoutResult<Vec<Batch>> {
        let mut out = Vec::new();
        self.separate_subtrees(scene, self.root, &mut out)?;
        let separated = !out.is_empty();
        let shrunk = self.fit_to_frame(scene, &mut out)?;
        if !separated && !shrunk {
            self.grow_into_frame(scene, &mut out)?;
        }
        Ok(out)
    }

    /// Post-order walk pushing colliding sibling subtrees apart, one batch
    /// per corrected node.
    fn separate_subtrees(
        &self,
        scene: &mut Scene,
        id: NodeId,
        out: &mut Vec<Batch>,
    ) -> LayoutResult<()> {
        let node = self.node(id)?;
        let (left, right) = (node.left, node.right);
        let (left_line, right_line) = (node.left_line, node.right_line);
        for child in left.into_iter().chain(right) {
            self.separate_subtrees(scene, child, out)?;
        }
        let (Some(l), Some(r), Some(ll), Some(rl)) = (left, right, left_line, right_line) else {
            return Ok(());
        };

        let (lg, rg) = (self.node(l)?.group, self.node(r)?.group);
        let lb = scene.require_bounds(lg)?;
        let rb = scene.require_bounds(rg)?;
        let overlap = lb.right() - rb.left() + 2.0 * self.cfg.sibling_margin * self.scale();
        if overlap <= EPS {
            return Ok(());
        }

        let half = Vec2::new(overlap / 2.0, 0.0);
        scene.translate(lg, -half)?;
        scene.translate(rg, half)?;
        let (lf, lt) = (self.parent_port(scene, id, Side::Left)?, self.child_port(scene, l)?);
        let (rf, rt) = (self.parent_port(scene, id, Side::Right)?, self.child_port(scene, r)?);
        scene.set_line(ll, lf, lt)?;
        scene.set_line(rl, rf, rt)?;
        tracing::debug!(overlap, node = id.0, "sibling subtrees pushed apart");

        out.push(Batch::new(
            vec![
                Transition::Move {
                    target: lg,
                    to: MoveTarget::By(-half),
                },
                Transition::RedrawLine {
                    target: ll,
                    from: lf,
                    to: lt,
                },
                Transition::Move {
                    target: rg,
                    to: MoveTarget::By(half),
                },
                Transition::RedrawLine {
                    target: rl,
                    from: rf,
                    to: rt,
                },
            ],
            self.cfg.run_time,
        ));
        Ok(())
    }

    /// Shrink and re-centre when the tree crosses any frame edge. Returns
    /// whether a shrink was applied.
    fn fit_to_frame(&mut self, scene: &mut Scene, out: &mut Vec<Batch>) -> LayoutResult<bool> {
        if self.frame.contains_content(scene, 0.0)? {
            return Ok(false);
        }
        let group = self.frame.group();
        let content = scene.require_bounds(group)?;
        let target = self.frame.rect();
        let factor = 1.0_f64
            .min(target.width() / content.width())
            .min(target.height() / content.height());
        let shrink = factor < 1.0 && !approx_eq(factor, 1.0);
        if shrink && self.radius * factor < self.cfg.min_legible {
            return Err(LayoutError::unfittable(format!(
                "tree '{}' needs radius {:.4} to fit its frame",
                self.identifier,
                self.radius * factor
            )));
        }

        let mut ts = Vec::new();
        if shrink {
            scene.scale_about(group, factor, content.center())?;
            self.radius *= factor;
            ts.push(Transition::Scale {
                target: group,
                factor,
                about: content.center(),
            });
        }
        let delta = target.center() - content.center();
        if delta.hypot() > EPS {
            scene.translate(group, delta)?;
            ts.push(Transition::Move {
                target: group,
                to: MoveTarget::By(delta),
            });
        }
        tracing::debug!(factor, radius = self.radius, "tree refitted to its frame");
        push_batch(out, Batch::new(ts, self.cfg.run_time));
        Ok(shrink)
    }

    /// Grow into free space, never past the largest radius.
    fn grow_into_frame(&mut self, scene: &mut Scene, out: &mut Vec<Batch>) -> LayoutResult<()> {
        let group = self.frame.group();
        let content = scene.require_bounds(group)?;
        let target = self.frame.rect();
        let room = (target.width() / content.width()).min(target.height() / content.height());
        let factor = room.min(self.max_radius() / self.radius);
        if factor <= 1.0 || approx_eq(factor, 1.0) {
            return Ok(());
        }

        let about = content.center();
        scene.scale_about(group, factor, about)?;
        self.radius *= factor;
        let mut ts = vec![Transition::Scale {
            target: group,
            factor,
            about,
        }];
        let delta = target.center() - about;
        if delta.hypot() > EPS {
            scene.translate(group, delta)?;
            ts.push(Transition::Move {
                target: group,
                to: MoveTarget::By(delta),
            });
        }
        tracing::debug!(factor, radius = self.radius, "tree grown into free space");
        out.push(Batch::new(ts, self.cfg.run_time));
        Ok(())
    }
}

impl BoundedLayout for Tree {
    fn frame(&self) -> &Frame {
        &self.frame
    }

    fn frame_mut(&mut self) -> &mut Frame {
        &mut self.frame
    }

    fn shrink_to_fit(
        &mut self,
        scene: &mut Scene,
        new_width: f64,
        new_height: f64,
    ) -> LayoutResult<(f64, Option<Transition>)> {
        let (factor, t) = self.frame.shrink_to_fit(scene, new_width, new_height)?;
        self.radius *= factor;
        Ok((factor, t))
    }

    fn clean_up(&mut self, scene: &mut Scene) -> LayoutResult<Vec<Batch>> {
        scene.unregister(&self.identifier);
        Ok(vec![Batch::single(
            Transition::FadeOut {
                target: self.frame.group(),
            },
            self.cfg.run_time,
        )])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/tree.rs"]
mod tests;

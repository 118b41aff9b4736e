use crate::{
    foundation::config::CreationStyle,
    foundation::core::{Point, Rgba8, Vec2},
    scene::element::ElementId,
};

/// Angular sense of a rotational transform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Rotation {
    /// Arc over the top, left to right.
    Clockwise,
    /// Arc under the bottom, left to right.
    CounterClockwise,
}

/// Destination of a [`Transition::Move`].
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum MoveTarget {
    /// Relative offset.
    By(Vec2),
    /// Absolute position of the element's centre.
    To(Point),
}

/// A single visual change, produced as data for the playback collaborator.
///
/// The scene already reflects the end state of every transition; playback
/// interpolates from the previous state to it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Transition {
    /// Opacity from 0 to 1.
    FadeIn {
        /// Element that appears.
        target: ElementId,
    },
    /// Opacity from 1 to 0; the element is gone afterwards.
    FadeOut {
        /// Element that disappears.
        target: ElementId,
    },
    /// Stroke-by-stroke creation.
    Write {
        /// Element being drawn.
        target: ElementId,
    },
    /// Scale up from a point at the element's centre.
    GrowFromCenter {
        /// Element that appears.
        target: ElementId,
    },
    /// Reverse of a creation; used to clear overlays.
    Uncreate {
        /// Element being erased.
        target: ElementId,
    },
    /// Translation.
    Move {
        /// Element being moved, with all of its children.
        target: ElementId,
        /// Where it ends up.
        to: MoveTarget,
    },
    /// Uniform scale about a fixed point.
    Scale {
        /// Element being scaled, with all of its children.
        target: ElementId,
        /// Ratio of the end size to the start size.
        factor: f64,
        /// Point that stays put.
        about: Point,
    },
    /// Morph `from` into `into`; afterwards `into` takes `from`'s place.
    Transform {
        /// Outgoing element.
        from: ElementId,
        /// Incoming element, already at its end position.
        into: ElementId,
    },
    /// Like `Transform`, travelling along an arc.
    Rotate {
        /// Outgoing element.
        from: ElementId,
        /// Incoming element, already at its end position.
        into: ElementId,
        /// Side of the arc.
        rotation: Rotation,
    },
    /// Colour change of strokes or text.
    Recolor {
        /// Element whose colour changes.
        target: ElementId,
        /// End colour.
        color: Rgba8,
    },
    /// Draw a connecting line from its start point.
    ShowLine {
        /// Line element.
        target: ElementId,
    },
    /// Retract a connecting line.
    RemoveLine {
        /// Line element.
        target: ElementId,
    },
    /// Move a line's endpoints to new absolute positions.
    RedrawLine {
        /// Line element.
        target: ElementId,
        /// New start point.
        from: Point,
        /// New end point.
        to: Point,
    },
}

impl Transition {
    /// Primary element the transition acts on.
    pub fn target(&self) -> ElementId {
        match *self {
            Self::FadeIn { target }
            | Self::FadeOut { target }
            | Self::Write { target }
            | Self::GrowFromCenter { target }
            | Self::Uncreate { target }
            | Self::Move { target, .. }
            | Self::Scale { target, .. }
            | Self::Recolor { target, .. }
            | Self::ShowLine { target }
            | Self::RemoveLine { target }
            | Self::RedrawLine { target, .. } => target,
            Self::Transform { from, .. } | Self::Rotate { from, .. } => from,
        }
    }

    /// Snake-case tag used in serialized timelines.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::FadeIn { .. } => "fade_in",
            Self::FadeOut { .. } => "fade_out",
            Self::Write { .. } => "write",
            Self::GrowFromCenter { .. } => "grow_from_center",
            Self::Uncreate { .. } => "uncreate",
            Self::Move { .. } => "move",
            Self::Scale { .. } => "scale",
            Self::Transform { .. } => "transform",
            Self::Rotate { .. } => "rotate",
            Self::Recolor { .. } => "recolor",
            Self::ShowLine { .. } => "show_line",
            Self::RemoveLine { .. } => "remove_line",
            Self::RedrawLine { .. } => "redraw_line",
        }
    }
}

impl CreationStyle {
    /// Appearance transition of this style for `target`.
    pub fn transition(self, target: ElementId) -> Transition {
        match self {
            Self::FadeIn => Transition::FadeIn { target },
            Self::Write => Transition::Write { target },
            Self::GrowFromCenter => Transition::GrowFromCenter { target },
        }
    }
}

/// Transitions that play concurrently.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Batch {
    /// Members, in emission order.
    pub transitions: Vec<Transition>,
    /// Duration hint in seconds.
    pub run_time: f64,
}

impl Batch {
    /// Batch of `transitions` sharing one duration.
    pub fn new(transitions: Vec<Transition>, run_time: f64) -> Self {
        Self {
            transitions,
            run_time,
        }
    }

    /// Batch holding one transition.
    pub fn single(transition: Transition, run_time: f64) -> Self {
        Self::new(vec![transition], run_time)
    }

    /// `true` when the batch has nothing to play.
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Number of transitions.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    /// Number of transitions of the given kind (see [`Transition::kind_name`]).
    pub fn count(&self, kind: &str) -> usize {
        self.transitions
            .iter()
            .filter(|t| t.kind_name() == kind)
            .count()
    }
}

/// Append `batch` unless it carries no transitions.
pub(crate) fn push_batch(out: &mut Vec<Batch>, batch: Batch) {
    if !batch.is_empty() {
        out.push(batch);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/transition.rs"]
mod tests;

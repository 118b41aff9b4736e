//! algoframe lays out and choreographs step-by-step data-structure animations.
//!
//! Every visual panel is a fixed [`Frame`]. Layout components bound to a frame
//! (arrays, 2-D grids, stacks, binary trees, a scrolling code pane) place their
//! elements in a [`Scene`] and answer each structural operation with an ordered
//! list of [`Batch`]es: transitions meant to play together, one beat at a time.
//!
//! # Guarantees
//!
//! - **Containment**: after every operation a component's content lies inside
//!   its frame. Components shrink to make room and grow back when room frees up.
//! - **No sibling overlap** in trees once [`Tree::settle`] has run.
//! - **Errors at the call**: degenerate geometry, unfittable content and
//!   broken preconditions surface as [`LayoutError`] before any batch exists.
//!
//! # Playback
//!
//! The scene always holds the end state. Feed batches to a [`Playback`]
//! implementation through a [`Sequencer`], which also splices in timed
//! overlay events (subtitles) between batches. [`RecordingPlayback`] is a
//! deterministic recorder with a virtual clock.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod layout;
mod scene;

pub use animation::sequencer::{
    OverlayEvent, Playback, PlayedBatch, RecordingPlayback, Sequencer,
};
pub use animation::transition::{Batch, MoveTarget, Rotation, Transition};
pub use foundation::config::{CreationStyle, FontWeight, LayoutConfig, Style};
pub use foundation::core::{
    Anchor, BoxEdges, Edge, Point, Rect, Rgba8, Size, Vec2, rect_centered,
};
pub use foundation::error::{LayoutError, LayoutResult};
pub use layout::array::Array;
pub use layout::array2d::Array2D;
pub use layout::bounded::BoundedLayout;
pub use layout::cell::Cell;
pub use layout::code::CodeViewport;
pub use layout::frame::Frame;
pub use layout::panels::{Panel, PanelOptions, PanelTemplate};
pub use layout::stack::Stack;
pub use layout::subtitle::SubtitleBlock;
pub use layout::tree::{NodeId, Side, Tree};
pub use layout::variables::VariableBlock;
pub use scene::element::{Element, ElementId, Shape};
pub use scene::metrics::{MonospaceMetrics, TextMetrics};
pub use scene::store::{Scene, StructureHandle, StructureKind};

use crate::scene::element::ElementId;

/// Convenience result type used across algoframe.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Top-level error taxonomy used by layout operations.
///
/// Errors are raised at the operation call. A failed operation never returns
/// a partial batch list.
#[derive(thiserror::Error, Debug)]
pub enum LayoutError {
    /// Zero or negative panel extents, empty value sequences, and similar
    /// inputs that would otherwise produce NaN or infinite scale factors.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// Content that cannot be shrunk to fit its panel without dropping below
    /// the minimum legible size.
    #[error("unfittable content: {0}")]
    UnfittableContent(String),

    /// Caller contract violated (pop on an empty stack, index out of range).
    #[error("precondition violated: {0}")]
    Precondition(String),

    /// An element handle that is not (or no longer) present in the scene.
    #[error("unknown element {0:?}")]
    UnknownElement(ElementId),

    /// Errors when serializing or deserializing configuration or timelines.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped error from a collaborator (playback, text metrics).
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LayoutError {
    /// Build a [`LayoutError::DegenerateGeometry`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::DegenerateGeometry(msg.into())
    }

    /// Build a [`LayoutError::UnfittableContent`] value.
    pub fn unfittable(msg: impl Into<String>) -> Self {
        Self::UnfittableContent(msg.into())
    }

    /// Build a [`LayoutError::Precondition`] value.
    pub fn precondition(msg: impl Into<String>) -> Self {
        Self::Precondition(msg.into())
    }

    /// Build a [`LayoutError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

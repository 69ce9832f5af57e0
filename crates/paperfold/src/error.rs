#![forbid(unsafe_code)]

use fold_core::{Edge, PaperFoldState};
use fold_runtime::FoldConfigError;
use thiserror::Error;

/// Standard result type for PaperFold APIs.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("fold count must be at least 1 for the {edge:?} edge, got {count}")]
    InvalidFoldCount { edge: Edge, count: usize },

    #[error("no content attached to the {edge:?} edge")]
    EdgeNotAttached { edge: Edge },

    #[error("{state:?} is not a state the surface can settle into")]
    NotARestState { state: PaperFoldState },

    #[error(transparent)]
    Config(#[from] FoldConfigError),
}

impl Error {
    #[must_use]
    pub fn not_attached(edge: Edge) -> Self {
        Self::EdgeNotAttached { edge }
    }

    /// The edge this error concerns, if any.
    #[must_use]
    pub fn edge(&self) -> Option<Edge> {
        match self {
            Self::InvalidFoldCount { edge, .. } | Self::EdgeNotAttached { edge } => Some(*edge),
            Self::NotARestState { .. } | Self::Config(_) => None,
        }
    }
}

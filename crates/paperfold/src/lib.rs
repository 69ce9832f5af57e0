#![forbid(unsafe_code)]

//! PaperFold public facade crate.
//!
//! A content surface that peels open like folded paper. Attach content to
//! any of the four edges, then drag the surface or command it, and the edge
//! unfolds as a chain of hinged panels showing slices of that content.
//!
//! ```rust,ignore
//! use paperfold::prelude::*;
//!
//! let mut fold = PaperFold::new(Size::new(320.0, 480.0));
//! fold.set_left_content(Box::new(menu), 3, 0.5)?;
//! fold.unfold_left(true, None)?;
//! while fold.is_animating() {
//!     fold.poll(Instant::now());
//! }
//! ```
//!
//! The orchestrator lives here; the layers it composes are re-exported from
//! `fold-core`, `fold-render`, `fold-runtime`, and `fold-widgets`.

pub mod delegate;
pub mod error;
pub mod orchestrator;
pub mod surface;

// --- Core re-exports -------------------------------------------------------

pub use fold_core::{
    AffineTranslation, Axis, DragEdges, EaseStep, EasingAnimator, EasingProfile, Edge,
    FoldDirection, FoldEvent, FoldState, GestureSession, PanContext, PanEvent, PanOutcome,
    PanPhase, PaperFoldState, PerEdge, Point, Rect, ReleaseDecision, Size, Transform3D,
};

// --- Render re-exports -----------------------------------------------------

pub use fold_render::{CaptureQuality, PackedRgba, Raster, Renderable};

// --- Runtime re-exports ----------------------------------------------------

pub use fold_runtime::{
    Duration, EasingConfig, FixedTicker, FoldConfig, FoldConfigError, Instant, ThresholdConfig,
    TickSource,
};

// --- Widget re-exports -----------------------------------------------------

pub use fold_widgets::{
    CascadeStack, FaceRole, FoldPanel, HintMode, HintPhase, HitTestable, SwipeHint, Transformable,
};

// --- Facade ----------------------------------------------------------------

pub use delegate::{Completion, PanDelegate, PaperFoldDelegate};
pub use error::{Error, Result};
pub use orchestrator::{HitTarget, PaperFold};
pub use surface::ContentSurface;

/// Everything a host needs to drive a surface.
pub mod prelude {
    pub use crate::{
        Completion, Edge, FoldConfig, HitTarget, Instant, PanDelegate, PanEvent, PanPhase,
        PaperFold, PaperFoldDelegate, PaperFoldState, Point, Rect, Renderable, Size,
    };
}

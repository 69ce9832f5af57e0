#![forbid(unsafe_code)]

//! Core: geometry, transforms, fold states, pan gestures, and easing.
//!
//! # Role in PaperFold
//! `fold-core` is the leaf layer. It owns the value types every other crate
//! speaks (points, rects, 3D transforms), the fold lifecycle enums, the
//! axis-locking [`gesture::GestureSession`], and the geometric
//! [`animation::EasingAnimator`] that settles the content surface.
//!
//! # How it fits in the system
//! `fold-widgets` builds hinge panels and cascades on top of these types, and
//! the `paperfold` orchestrator feeds pan events through the gesture session
//! and ticks the easing animator from the `fold-runtime` ticker. Nothing in
//! this crate performs I/O or keeps global state.

pub mod animation;
pub mod fold_state;
pub mod geometry;
pub mod gesture;
pub mod transform;

pub use animation::{EaseStep, EasingAnimator, EasingProfile};
pub use fold_state::{
    DragEdges, Edge, FoldDirection, FoldEvent, FoldState, PaperFoldState, PerEdge,
};
pub use geometry::{Axis, Point, Rect, Size};
pub use gesture::{
    GestureSession, PanContext, PanEvent, PanOutcome, PanPhase, ReleaseDecision, SessionState,
};
pub use transform::{AffineTranslation, Transform3D};

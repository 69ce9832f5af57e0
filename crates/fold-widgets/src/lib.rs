#![forbid(unsafe_code)]

//! Widgets: hinge panels, their faces, and cascading fold stacks.
//!
//! # Role in PaperFold
//! A [`FoldPanel`] is the smallest folding unit: two faces meeting at a
//! crease, posed by one unfold fraction. A [`CascadeStack`] chains several
//! panels along one axis and drives them all from a single drag offset.
//!
//! # How it fits in the system
//! The `paperfold` orchestrator owns up to four cascades (one per edge) and
//! calls [`CascadeStack::unfold`] with the content surface's offset on every
//! pan update and animation tick. Snapshots come from `fold-render`.

pub mod capability;
pub mod cascade;
pub mod face;
pub mod hint;
pub mod panel;

pub use capability::{HitTestable, Transformable};
pub use cascade::CascadeStack;
pub use face::{Face, FaceRole, GradientDirection, Shadow};
pub use hint::{DEFAULT_HINT_FADE, HintMode, HintPhase, SwipeHint};
pub use panel::{FoldPanel, hinge_angle};

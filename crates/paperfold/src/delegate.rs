#![forbid(unsafe_code)]

//! Host-facing callbacks and the weak pan-recognition delegate.
//!
//! [`PaperFoldDelegate`] is the observer surface: every method has an empty
//! default so hosts implement only what they care about.
//!
//! [`PanDelegate`] answers the gesture collaborator's questions about a
//! surface it does not own. It holds a [`Weak`] handle, so a recognizer that
//! outlives its surface simply stops recognizing.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use fold_core::{PaperFoldState, Point};

use crate::orchestrator::PaperFold;

/// Called once when a settle completes, whether or not the state changed.
pub type Completion = Box<dyn FnOnce()>;

/// Observer of a [`PaperFold`] surface.
pub trait PaperFoldDelegate {
    /// The content surface moved. `offset` is the raw offset applied.
    fn on_offset_changed(&mut self, _offset: Point) {}

    /// The surface reached `state`.
    ///
    /// `was_automated` is true for programmatic transitions and false for
    /// ones that finished a user drag.
    fn on_folded_automatically(&mut self, _was_automated: bool, _state: PaperFoldState) {}
}

/// Non-owning gesture delegate for a shared [`PaperFold`].
#[derive(Clone)]
pub struct PanDelegate {
    fold: Weak<RefCell<PaperFold>>,
}

impl fmt::Debug for PanDelegate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanDelegate")
            .field("alive", &self.is_alive())
            .finish()
    }
}

impl PanDelegate {
    #[must_use]
    pub fn new(fold: &Rc<RefCell<PaperFold>>) -> Self {
        Self {
            fold: Rc::downgrade(fold),
        }
    }

    /// Whether the surface still exists.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.fold.strong_count() > 0
    }

    /// Whether a pan at `location` (container coordinates) may run alongside
    /// other recognizers.
    ///
    /// False once the surface is gone, while it is mutably borrowed, or when
    /// a restricted dragging rect is set and does not contain `location`.
    #[must_use]
    pub fn should_recognize_simultaneously(&self, location: Point) -> bool {
        let Some(fold) = self.fold.upgrade() else {
            return false;
        };
        let Ok(fold) = fold.try_borrow() else {
            tracing::trace!("pan delegate queried while surface is busy");
            return false;
        };
        fold.restricted_dragging_rect()
            .is_none_or(|rect| rect.contains(location))
    }
}

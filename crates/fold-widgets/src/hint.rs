#![forbid(unsafe_code)]

//! Swipe hint: a centred guide image that fades in and out over the content.
//!
//! The hint carries no pixels. It tracks which direction it points, where its
//! image sits inside the container, and its current opacity. Hosts draw the
//! guide image themselves at [`SwipeHint::image_frame`] with
//! [`SwipeHint::alpha`].
//!
//! # State Machine
//!
//! ```text
//! Hidden --show--> FadingIn --tick--> Shown --hide--> FadingOut --tick--> Hidden
//! ```
//!
//! `hide` during `FadingIn` fades out from the current opacity.
//!
//! # Invariants
//!
//! 1. `alpha()` is always in `[0, 1]`.
//! 2. The hint never accepts touches.
//!
//! # Failure Modes
//!
//! - Zero fade duration completes a fade on the next tick.
//! - An image larger than the container is still centred (negative origin).

use std::time::Duration;

use fold_core::geometry::{Point, Rect, Size};

use crate::capability::HitTestable;

/// Fade duration for showing and hiding a hint.
pub const DEFAULT_HINT_FADE: Duration = Duration::from_millis(200);

/// Which way the hint tells the user to swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HintMode {
    SwipeLeft,
    SwipeRight,
}

/// Where a hint is in its fade lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HintPhase {
    #[default]
    Hidden,
    FadingIn,
    Shown,
    FadingOut,
}

impl HintPhase {
    #[inline]
    pub fn is_visible(self) -> bool {
        !matches!(self, Self::Hidden)
    }

    #[inline]
    pub fn is_animating(self) -> bool {
        matches!(self, Self::FadingIn | Self::FadingOut)
    }
}

/// A swipe guide overlay.
#[derive(Debug, Clone)]
pub struct SwipeHint {
    mode: HintMode,
    phase: HintPhase,
    alpha: f64,
    fade: Duration,
    container: Rect,
    image_size: Size,
}

impl SwipeHint {
    /// A hidden hint whose guide image is `image_size`.
    #[must_use]
    pub fn new(mode: HintMode, image_size: Size) -> Self {
        Self {
            mode,
            phase: HintPhase::Hidden,
            alpha: 0.0,
            fade: DEFAULT_HINT_FADE,
            container: Rect::default(),
            image_size,
        }
    }

    #[must_use]
    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.fade = fade;
        self
    }

    /// Cover `container` and fade in from transparent.
    pub fn show(&mut self, container: Size) {
        self.container = Rect::from_size(container);
        self.alpha = 0.0;
        self.phase = HintPhase::FadingIn;
        tracing::debug!(mode = ?self.mode, "swipe hint shown");
    }

    /// Fade out from the current opacity. No-op while hidden.
    pub fn hide(&mut self) {
        if self.phase.is_visible() {
            self.phase = HintPhase::FadingOut;
            tracing::debug!(mode = ?self.mode, "swipe hint hiding");
        }
    }

    /// Advance the fade by `delta`. Returns whether the hint is still visible.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let step = if self.fade.is_zero() {
            1.0
        } else {
            delta.as_secs_f64() / self.fade.as_secs_f64()
        };
        match self.phase {
            HintPhase::FadingIn => {
                self.alpha = (self.alpha + step).min(1.0);
                if self.alpha >= 1.0 {
                    self.phase = HintPhase::Shown;
                }
            }
            HintPhase::FadingOut => {
                self.alpha = (self.alpha - step).max(0.0);
                if self.alpha <= 0.0 {
                    self.phase = HintPhase::Hidden;
                }
            }
            HintPhase::Hidden | HintPhase::Shown => {}
        }
        self.phase.is_visible()
    }

    #[must_use]
    pub fn mode(&self) -> HintMode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> HintPhase {
        self.phase
    }

    #[must_use]
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// The guide image, centred in the container.
    #[must_use]
    pub fn image_frame(&self) -> Rect {
        let size = self.container.size();
        Rect::new(
            (size.width - self.image_size.width) / 2.0,
            (size.height - self.image_size.height) / 2.0,
            self.image_size.width,
            self.image_size.height,
        )
    }
}

impl HitTestable for SwipeHint {
    fn frame(&self) -> Rect {
        self.container
    }

    fn hit_test(&self, _point: Point) -> bool {
        false
    }
}

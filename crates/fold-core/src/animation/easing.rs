#![forbid(unsafe_code)]

//! Geometric settle-to-target easing.
//!
//! An [`EasingAnimator`] moves a scalar offset toward a target by
//! `remaining / divisor` on every [`step`](EasingAnimator::step). Once the
//! remaining distance drops below the profile's tolerance, the value snaps to
//! the target exactly and the animator reports [`EaseStep::Settled`].
//!
//! # Invariants
//!
//! 1. `Settled` is reported exactly once; later steps return [`EaseStep::Idle`].
//! 2. The value never overshoots the target (divisor is clamped to `>= 1`).
//! 3. After settling, `value() == target()` exactly.
//!
//! # Failure Modes
//!
//! - Divisor below 1 would overshoot: clamped to 1 (single-step snap).
//! - Non-positive tolerance would never converge: clamped to
//!   [`MIN_TOLERANCE`].

/// Smallest accepted convergence tolerance.
pub const MIN_TOLERANCE: f64 = 1e-6;

/// Per-edge easing parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EasingProfile {
    /// Each tick covers `1 / divisor` of the remaining distance.
    pub divisor: f64,
    /// Absolute distance below which the value snaps to the target.
    pub tolerance: f64,
}

impl EasingProfile {
    #[must_use]
    pub const fn new(divisor: f64, tolerance: f64) -> Self {
        Self { divisor, tolerance }
    }

    /// Remaining distance kept after one tick (`1 - 1/divisor`).
    #[must_use]
    pub fn retention(&self) -> f64 {
        1.0 - 1.0 / self.divisor.max(1.0)
    }

    /// Upper bound on ticks needed to settle from `distance` away.
    #[must_use]
    pub fn ticks_to_settle(&self, distance: f64) -> u32 {
        let distance = distance.abs();
        let tolerance = self.tolerance.max(MIN_TOLERANCE);
        if distance < tolerance {
            return 1;
        }
        let keep = self.retention();
        if keep <= 0.0 {
            return 1;
        }
        // Smallest n with distance * keep^n < tolerance.
        let n = ((tolerance / distance).ln() / keep.ln()).floor() + 1.0;
        n.max(1.0) as u32
    }
}

impl Default for EasingProfile {
    fn default() -> Self {
        Self {
            divisor: 4.0,
            tolerance: 5.0,
        }
    }
}

/// Result of one easing tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EaseStep {
    /// Moved to the contained value; not yet within tolerance.
    Moving(f64),
    /// Converged on this tick; the contained value is the exact target.
    Settled(f64),
    /// Already settled on an earlier tick.
    Idle,
}

/// Settles a scalar toward a target one tick at a time.
#[derive(Debug, Clone)]
pub struct EasingAnimator {
    value: f64,
    target: f64,
    divisor: f64,
    tolerance: f64,
    ticks: u32,
    settled: bool,
}

impl EasingAnimator {
    /// Create an animator at `from` heading for `target`.
    #[must_use]
    pub fn new(from: f64, target: f64, profile: EasingProfile) -> Self {
        Self {
            value: from,
            target,
            divisor: profile.divisor.max(1.0),
            tolerance: profile.tolerance.max(MIN_TOLERANCE),
            ticks: 0,
            settled: false,
        }
    }

    /// Advance one tick.
    pub fn step(&mut self) -> EaseStep {
        if self.settled {
            return EaseStep::Idle;
        }
        self.ticks += 1;
        self.value += (self.target - self.value) / self.divisor;
        if (self.target - self.value).abs() < self.tolerance {
            self.value = self.target;
            self.settled = true;
            tracing::trace!(target = self.target, ticks = self.ticks, "easing settled");
            EaseStep::Settled(self.target)
        } else {
            EaseStep::Moving(self.value)
        }
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[inline]
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    #[inline]
    #[must_use]
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    #[inline]
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.settled
    }
}

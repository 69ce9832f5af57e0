#![forbid(unsafe_code)]

//! Tick-driven animation primitives.
//!
//! The paper-fold surface settles with a geometric ease: every tick covers a
//! fixed fraction of the remaining distance. Timing lives in `fold-runtime`;
//! this module only knows about ticks.

pub mod easing;

pub use easing::{EaseStep, EasingAnimator, EasingProfile};

#![forbid(unsafe_code)]

//! Runtime: cooperative ticking and configuration.
//!
//! # Role in PaperFold
//! `fold-runtime` owns time. The orchestrator never sleeps or spawns; it
//! asks a [`TickSource`] how many animation ticks are due and steps its
//! easing animator that many times. [`FoldConfig`] gathers every tunable the
//! surface uses so hosts can load them from TOML or JSON (`config` feature).

pub mod config;
pub mod ticker;

pub use config::{EasingConfig, FoldConfig, FoldConfigError, ThresholdConfig};
pub use ticker::{DEFAULT_TICK_INTERVAL, FixedTicker, TickSource};
pub use web_time::{Duration, Instant};

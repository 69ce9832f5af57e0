#![forbid(unsafe_code)]

//! Render: raster images, tile slicing, and surface capture.
//!
//! # Role in PaperFold
//! Folding panels show snapshots, not live content. This crate owns the
//! snapshot type ([`Raster`]), the slicing that turns one snapshot into a tile
//! per panel, and the [`Renderable`] capability a content surface implements
//! so it can be captured.
//!
//! # How it fits in the system
//! `fold-widgets` captures content through [`Renderable::capture`] when an edge
//! is attached and right before a cascade closes, then hands the tiles to its
//! panels' faces.

pub mod capture;
pub mod pixel;
pub mod raster;

pub use capture::{CaptureQuality, Renderable, capture_tiles};
pub use pixel::PackedRgba;
pub use raster::Raster;

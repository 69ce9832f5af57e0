#![forbid(unsafe_code)]

//! Snapshot capability for content surfaces.
//!
//! Panels never draw live content while folding; they show a raster captured
//! from the content surface. Anything that can paint itself into a
//! [`Raster`] implements [`Renderable`].
//!
//! # Failure Modes
//!
//! - A surface with zero width or height cannot be captured: `capture`
//!   returns `None` and logs a warning. Callers keep their previous tile.

use fold_core::geometry::{Axis, Size};

use crate::raster::Raster;

/// Capture resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CaptureQuality {
    /// One pixel per point; cheap, used for live folding.
    #[default]
    Optimized,
    /// The surface's native pixel density.
    Full,
}

/// A content surface that can paint itself into a raster.
pub trait Renderable {
    /// Logical size in points.
    fn size(&self) -> Size;

    /// Paint into `target`, which is `size() * scale` pixels.
    fn draw(&self, target: &mut Raster, scale: f64);

    /// Pixels per point at [`CaptureQuality::Full`].
    fn native_scale(&self) -> f64 {
        1.0
    }

    /// Snapshot the surface.
    fn capture(&self, quality: CaptureQuality) -> Option<Raster> {
        let scale = match quality {
            CaptureQuality::Optimized => 1.0,
            CaptureQuality::Full => self.native_scale().max(1.0),
        };
        let size = self.size();
        let width = (size.width * scale).round();
        let height = (size.height * scale).round();
        if !(width >= 1.0 && height >= 1.0) {
            tracing::warn!(
                width = size.width,
                height = size.height,
                "capture skipped: surface has zero size"
            );
            return None;
        }
        let mut raster = Raster::new(width as u32, height as u32);
        self.draw(&mut raster, scale);
        tracing::trace!(width, height, ?quality, "surface captured");
        Some(raster)
    }
}

impl<T: Renderable + ?Sized> Renderable for Box<T> {
    fn size(&self) -> Size {
        (**self).size()
    }

    fn draw(&self, target: &mut Raster, scale: f64) {
        (**self).draw(target, scale);
    }

    fn native_scale(&self) -> f64 {
        (**self).native_scale()
    }

    fn capture(&self, quality: CaptureQuality) -> Option<Raster> {
        (**self).capture(quality)
    }
}

/// Capture `surface` and cut it into `count` tiles along `axis`.
#[must_use]
pub fn capture_tiles(
    surface: &dyn Renderable,
    quality: CaptureQuality,
    axis: Axis,
    count: usize,
) -> Option<(Raster, Vec<Raster>)> {
    let raster = surface.capture(quality)?;
    let tiles = raster.slice(axis, count);
    Some((raster, tiles))
}

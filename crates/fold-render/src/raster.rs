#![forbid(unsafe_code)]

//! Owned pixel images and tile slicing.
//!
//! # Invariants
//!
//! 1. `pixels.len() == width * height` at all times.
//! 2. [`Raster::slice`] returns exactly `count` tiles whose extents along the
//!    slicing axis sum to the source extent; tiles are in reading order
//!    (left to right, or top to bottom).
//! 3. Slicing never allocates a tile with a zero cross-axis extent.
//!
//! # Failure Modes
//!
//! - Out-of-bounds crops are clipped; a crop with no overlap yields `None`.
//! - `slice` with `count == 0`, or on an empty raster, returns no tiles.

use fold_core::geometry::Axis;

use crate::pixel::PackedRgba;

/// An owned RGBA image.
#[derive(Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    pixels: Vec<PackedRgba>,
}

impl std::fmt::Debug for Raster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Raster")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Raster {
    /// A transparent raster.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, PackedRgba::TRANSPARENT)
    }

    /// A raster filled with one color.
    #[must_use]
    pub fn filled(width: u32, height: u32, color: PackedRgba) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Wrap existing pixel data. Returns `None` if the length does not match.
    #[must_use]
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<PackedRgba>) -> Option<Self> {
        (pixels.len() == width as usize * height as usize).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Extent along `axis` in pixels.
    #[inline]
    #[must_use]
    pub const fn extent(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    #[must_use]
    pub fn pixels(&self) -> &[PackedRgba] {
        &self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y as usize * self.width as usize + x as usize)
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<PackedRgba> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Set one pixel; out-of-bounds writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: PackedRgba) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fill a rectangle (clipped to bounds).
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, color: PackedRgba) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        if x >= x_end {
            return;
        }
        for row in y..y_end {
            let start = row as usize * self.width as usize;
            self.pixels[start + x as usize..start + x_end as usize].fill(color);
        }
    }

    /// Copy out a sub-rectangle, clipped to bounds.
    #[must_use]
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> Option<Raster> {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        if x >= x_end || y >= y_end {
            return None;
        }
        let w = x_end - x;
        let mut pixels = Vec::with_capacity(w as usize * (y_end - y) as usize);
        for row in y..y_end {
            let start = row as usize * self.width as usize;
            pixels.extend_from_slice(&self.pixels[start + x as usize..start + x_end as usize]);
        }
        Some(Raster {
            width: w,
            height: y_end - y,
            pixels,
        })
    }

    /// Cut into `count` tiles along `axis`, in reading order.
    ///
    /// Tile `i` spans `[i·extent/count, (i+1)·extent/count)`, so any
    /// remainder pixels are spread across the tiles.
    #[must_use]
    pub fn slice(&self, axis: Axis, count: usize) -> Vec<Raster> {
        if count == 0 || self.is_empty() {
            return Vec::new();
        }
        let extent = u64::from(self.extent(axis));
        let n = count as u64;
        (0..n)
            .map(|i| {
                let start = (i * extent / n) as u32;
                let end = ((i + 1) * extent / n) as u32;
                let len = end - start;
                let tile = match axis {
                    Axis::Horizontal => self.crop(start, 0, len, self.height),
                    Axis::Vertical => self.crop(0, start, self.width, len),
                };
                // Narrower than `count` pixels: pad with an empty strip so the count holds.
                tile.unwrap_or_else(|| match axis {
                    Axis::Horizontal => Raster::new(0, self.height),
                    Axis::Vertical => Raster::new(self.width, 0),
                })
            })
            .collect()
    }

    /// The two halves along `axis`, in reading order.
    #[must_use]
    pub fn halves(&self, axis: Axis) -> Option<(Raster, Raster)> {
        let mut tiles = self.slice(axis, 2).into_iter();
        Some((tiles.next()?, tiles.next()?))
    }
}

#![forbid(unsafe_code)]

//! The centre content surface that slides to reveal the edges.

use std::fmt;

use fold_core::{AffineTranslation, Point, Rect, Size};
use fold_render::{CaptureQuality, Raster, Renderable};
use fold_widgets::HitTestable;

/// Container-sized surface carrying the host's centre content.
///
/// Its frame is the container rect shifted by [`ContentSurface::translation`].
/// Touches are accepted anywhere right of its left edge, including the right
/// fold slot that rides along with it.
pub struct ContentSurface {
    size: Size,
    translation: AffineTranslation,
    content: Option<Box<dyn Renderable>>,
}

impl fmt::Debug for ContentSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentSurface")
            .field("size", &self.size)
            .field("translation", &self.translation)
            .field("has_content", &self.content.is_some())
            .finish()
    }
}

impl ContentSurface {
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            size,
            translation: AffineTranslation::IDENTITY,
            content: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn translation(&self) -> AffineTranslation {
        self.translation
    }

    /// Current offset of the surface from its rest position.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> Point {
        self.translation.offset()
    }

    pub fn set_translation(&mut self, translation: AffineTranslation) {
        self.translation = translation;
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    pub fn set_content(&mut self, content: Box<dyn Renderable>) {
        self.content = Some(content);
    }

    #[must_use]
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Snapshot the centre content.
    #[must_use]
    pub fn capture(&self, quality: CaptureQuality) -> Option<Raster> {
        self.content.as_ref()?.capture(quality)
    }
}

impl HitTestable for ContentSurface {
    fn frame(&self) -> Rect {
        Rect::from_size(self.size).with_origin(self.offset())
    }

    fn hit_test(&self, point: Point) -> bool {
        point.x >= self.frame().x
    }
}

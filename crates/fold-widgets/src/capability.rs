#![forbid(unsafe_code)]

//! Small capability traits composed by panels, stacks, and surfaces.
//!
//! A fold surface is a handful of flat layers. Rather than a class hierarchy,
//! each layer type implements just the capabilities it has:
//!
//! - [`Transformable`]: carries a 3D layer transform.
//! - [`HitTestable`]: answers whether a point lands on it.
//! - [`fold_render::Renderable`]: can be captured to a raster.

use fold_core::geometry::{Point, Rect};
use fold_core::transform::Transform3D;

/// A layer with a 3D transform.
pub trait Transformable {
    fn transform(&self) -> Transform3D;

    fn set_transform(&mut self, transform: Transform3D);
}

/// A layer that accepts or rejects touches.
pub trait HitTestable {
    /// Bounds in the parent's coordinate space.
    fn frame(&self) -> Rect;

    /// Whether `point` (parent coordinates) lands on this layer.
    fn hit_test(&self, point: Point) -> bool {
        self.frame().contains(point)
    }
}

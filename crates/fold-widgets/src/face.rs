#![forbid(unsafe_code)]

//! The two facing half-surfaces of a hinge panel and their shadows.
//!
//! Every panel is split along its fold axis into a **near** face and a **far**
//! face. Each face shows half of the panel's tile and carries a gradient
//! shadow whose opacity tracks how closed the panel is.
//!
//! Face-local geometry (y grows downward):
//!
//! | direction  | near face                       | far face                         |
//! |------------|---------------------------------|----------------------------------|
//! | horizontal | hinge at its left edge, spans `[0, half]` | hinge at its right edge, spans `[-half, 0]` |
//! | vertical   | hinge at its bottom edge, spans `[-half, 0]` | hinge at its top edge, spans `[0, half]` |

use fold_core::fold_state::FoldDirection;
use fold_core::transform::Transform3D;
use fold_render::{PackedRgba, Raster};

use crate::capability::Transformable;

/// Which half of a panel a face is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceRole {
    /// The half adjacent to the hinge that stays put.
    Near,
    /// The half that swings out and is carried by the near face's edge.
    Far,
}

/// Direction a shadow gradient runs across its face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GradientDirection {
    /// First color at the top, second at the bottom.
    TopToBottom,
    /// First color at the bottom, second at the top.
    BottomToTop,
}

/// A two-stop gradient overlay darkening a folded face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub colors: [PackedRgba; 2],
    pub direction: GradientDirection,
    /// Overlay opacity, `1 - fraction`.
    pub alpha: f64,
}

impl Shadow {
    /// Shadow for a face of a panel folding in `direction`.
    #[must_use]
    pub fn for_face(direction: FoldDirection, role: FaceRole) -> Self {
        let black = |a: f64| PackedRgba::from_unit(0.0, 0.0, 0.0, a);
        let (colors, gradient) = match (direction.is_horizontal(), role) {
            (true, FaceRole::Near) => ([black(0.05), black(0.06)], GradientDirection::TopToBottom),
            (true, FaceRole::Far) => ([black(0.9), black(0.55)], GradientDirection::TopToBottom),
            (false, FaceRole::Near) => ([black(0.5), black(0.6)], GradientDirection::BottomToTop),
            (false, FaceRole::Far) => ([black(0.9), black(0.55)], GradientDirection::BottomToTop),
        };
        Self {
            colors,
            direction: gradient,
            alpha: 1.0,
        }
    }

    /// Effective overlay color at `t` along the gradient (0 = first stop).
    #[must_use]
    pub fn color_at(&self, t: f64) -> PackedRgba {
        self.colors[0].lerp(self.colors[1], t).with_opacity(self.alpha)
    }
}

/// One half of a hinge panel.
#[derive(Debug, Clone)]
pub struct Face {
    role: FaceRole,
    tile: Option<Raster>,
    transform: Transform3D,
    hidden: bool,
    shadow: Shadow,
}

impl Face {
    /// A face in the closed pose (quarter turn, edge-on).
    #[must_use]
    pub fn new(direction: FoldDirection, role: FaceRole, closed_pose: Transform3D) -> Self {
        Self {
            role,
            tile: None,
            transform: closed_pose,
            hidden: false,
            shadow: Shadow::for_face(direction, role),
        }
    }

    #[inline]
    #[must_use]
    pub fn role(&self) -> FaceRole {
        self.role
    }

    #[must_use]
    pub fn tile(&self) -> Option<&Raster> {
        self.tile.as_ref()
    }

    pub fn set_tile(&mut self, tile: Raster) {
        self.tile = Some(tile);
    }

    #[inline]
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    #[must_use]
    pub fn shadow(&self) -> &Shadow {
        &self.shadow
    }

    pub fn set_shadow_alpha(&mut self, alpha: f64) {
        self.shadow.alpha = alpha.clamp(0.0, 1.0);
    }
}

impl Transformable for Face {
    fn transform(&self) -> Transform3D {
        self.transform
    }

    fn set_transform(&mut self, transform: Transform3D) {
        self.transform = transform;
    }
}

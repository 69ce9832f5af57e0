#![forbid(unsafe_code)]

//! A single hinge panel.
//!
//! A [`FoldPanel`] is two facing half-surfaces joined at a crease. An unfold
//! fraction `f ∈ [0, 1]` maps to a hinge angle `θ = π/2 − asin(f)`: at `f = 0`
//! both faces stand edge-on (fully folded), at `f = 1` they lie flat.
//!
//! The near face rotates by `θ` about the fold axis. The far face rotates by
//! `θ` about the negated axis and is carried along by twice the near face's
//! projected extent, so the two faces always meet at the crease and the
//! panel's visible extent is `extent · f`.
//!
//! # State Machine
//!
//! ```text
//!            f > 0 (WillOpen)           f == 1 (DidOpen)
//! Closed ──────────────────▶ Transitioning ──────────────▶ Opened
//!   ▲                          │      ▲                       │
//!   └──────────────────────────┘      └───────────────────────┘
//!        f == 0 (DidClose)                f < 1 (WillClose)
//! ```
//!
//! # Invariants
//!
//! 1. Shadow alpha on both faces is `1 − f` after every unfold.
//! 2. At most one [`FoldEvent`] fires per [`FoldPanel::calculate_state`] call.
//! 3. `DidOpen` and `DidClose` fire once per full sweep no matter how many
//!    intermediate offsets are applied.
//!
//! # Failure Modes
//!
//! - Zero-extent panel: every offset reads as fraction 0.
//! - `asin` input outside `[-1, 1]` is clamped.
//! - Capturing zero-size content yields no raster; faces keep their tiles.

use std::f64::consts::FRAC_PI_2;
use std::fmt;

use fold_core::fold_state::{FoldDirection, FoldEvent, FoldState};
use fold_core::geometry::{Axis, Point, Rect};
use fold_core::transform::{DEFAULT_EYE_DISTANCE, Transform3D};
use fold_render::{CaptureQuality, Raster, Renderable};

use crate::capability::{HitTestable, Transformable};
use crate::face::{Face, FaceRole};

/// Hinge angle (radians) for an unfold fraction.
#[inline]
#[must_use]
pub fn hinge_angle(fraction: f64) -> f64 {
    FRAC_PI_2 - fraction.clamp(-1.0, 1.0).asin()
}

/// One hinge unit: near face, far face, and optionally its own content.
pub struct FoldPanel {
    frame: Rect,
    direction: FoldDirection,
    fraction: f64,
    state: FoldState,
    near: Face,
    far: Face,
    hidden: bool,
    content: Option<Box<dyn Renderable>>,
    content_hidden: bool,
    capture_quality: CaptureQuality,
    perspective: Transform3D,
}

impl fmt::Debug for FoldPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FoldPanel")
            .field("frame", &self.frame)
            .field("direction", &self.direction)
            .field("fraction", &self.fraction)
            .field("state", &self.state)
            .field("hidden", &self.hidden)
            .field("has_content", &self.content.is_some())
            .finish_non_exhaustive()
    }
}

impl FoldPanel {
    /// A closed panel occupying `frame`.
    #[must_use]
    pub fn new(frame: Rect, direction: FoldDirection) -> Self {
        let closed = hinge_angle(0.0);
        let (near_pose, far_pose) = face_poses(direction, closed, 0.0, 0.0);
        Self {
            frame,
            direction,
            fraction: 0.0,
            state: FoldState::Closed,
            near: Face::new(direction, FaceRole::Near, near_pose),
            far: Face::new(direction, FaceRole::Far, far_pose),
            hidden: false,
            content: None,
            content_hidden: false,
            capture_quality: CaptureQuality::Optimized,
            perspective: Transform3D::perspective(DEFAULT_EYE_DISTANCE),
        }
    }

    // -----------------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------------

    /// Extent along the fold axis.
    #[inline]
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.axis().extent(self.frame.size())
    }

    #[inline]
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.direction.axis()
    }

    /// Projected extent along the fold axis, `extent · fraction`.
    #[inline]
    #[must_use]
    pub fn visible_extent(&self) -> f64 {
        self.extent() * self.fraction
    }

    /// Current hinge angle in radians (`π/2` closed, `0` flat).
    #[must_use]
    pub fn hinge_angle(&self) -> f64 {
        hinge_angle(self.fraction)
    }

    /// Fraction implied by a driving offset.
    ///
    /// Horizontal panels read negative offsets as 0; vertical panels use the
    /// magnitude. The result is clamped to `[0, 1]`.
    #[must_use]
    pub fn fraction_for_offset(&self, offset: f64) -> f64 {
        let extent = self.extent();
        if extent <= 0.0 {
            return 0.0;
        }
        let offset = match self.axis() {
            Axis::Horizontal => offset.max(0.0),
            Axis::Vertical => offset.abs(),
        };
        (offset / extent).clamp(0.0, 1.0)
    }

    // -----------------------------------------------------------------------
    // Unfolding
    // -----------------------------------------------------------------------

    /// Pose both faces for `fraction` and update the shadows.
    pub fn unfold_to_fraction(&mut self, fraction: f64) {
        let theta = hinge_angle(fraction);
        self.fraction = fraction.clamp(0.0, 1.0);
        let half = self.extent() / 2.0;
        let (near, far) = face_poses(self.direction, theta, half, self.fraction);
        self.near.set_transform(near);
        self.far.set_transform(far);
        let alpha = 1.0 - self.fraction;
        self.near.set_shadow_alpha(alpha);
        self.far.set_shadow_alpha(alpha);
    }

    /// Advance the lifecycle for a driving offset and run the matching hook.
    pub fn calculate_state(&mut self, offset: f64) -> Option<FoldEvent> {
        let fraction = self.fraction_for_offset(offset);
        let event = match self.state {
            FoldState::Closed if fraction > 0.0 => Some(FoldEvent::WillOpen),
            FoldState::Opened if fraction < 1.0 => Some(FoldEvent::WillClose),
            FoldState::Transitioning if fraction == 0.0 => Some(FoldEvent::DidClose),
            FoldState::Transitioning if fraction == 1.0 => Some(FoldEvent::DidOpen),
            _ => None,
        }?;
        self.state = match event {
            FoldEvent::WillOpen | FoldEvent::WillClose => FoldState::Transitioning,
            FoldEvent::DidOpen => FoldState::Opened,
            FoldEvent::DidClose => FoldState::Closed,
        };
        tracing::debug!(?event, fraction, direction = ?self.direction, "fold panel state changed");
        self.apply_hook(event);
        Some(event)
    }

    /// Drive the panel from an offset: lifecycle first, then geometry.
    pub fn unfold(&mut self, offset: f64) -> Option<FoldEvent> {
        let event = self.calculate_state(offset);
        self.unfold_to_fraction(self.fraction_for_offset(offset));
        event
    }

    fn apply_hook(&mut self, event: FoldEvent) {
        match event {
            FoldEvent::WillOpen => {
                self.content_hidden = true;
                self.show_faces(true);
            }
            FoldEvent::WillClose => {
                self.redraw();
                self.content_hidden = true;
                self.show_faces(true);
            }
            FoldEvent::DidOpen => {
                self.content_hidden = false;
                self.show_faces(false);
            }
            FoldEvent::DidClose => {
                self.content_hidden = false;
                self.show_faces(true);
            }
        }
    }

    fn show_faces(&mut self, show: bool) {
        self.near.set_hidden(!show);
        self.far.set_hidden(!show);
    }

    // -----------------------------------------------------------------------
    // Tiles and content
    // -----------------------------------------------------------------------

    /// Assign a tile to one face. Transforms are untouched.
    pub fn set_tile(&mut self, tile: Raster, role: FaceRole) {
        self.face_mut(role).set_tile(tile);
    }

    /// Split `image` into halves along the fold axis and assign them.
    ///
    /// Horizontal: left half on the near face, right half on the far face.
    /// Vertical: bottom half on the near face, top half on the far face.
    pub fn set_image(&mut self, image: &Raster) {
        let Some((first, second)) = image.halves(self.axis()) else {
            tracing::warn!("fold panel image has no pixels; tiles unchanged");
            return;
        };
        let (near, far) = match self.axis() {
            Axis::Horizontal => (first, second),
            Axis::Vertical => (second, first),
        };
        self.near.set_tile(near);
        self.far.set_tile(far);
    }

    /// Install the panel's own content and capture it onto the faces.
    pub fn set_content(&mut self, content: Box<dyn Renderable>) {
        self.content = Some(content);
        self.redraw();
    }

    /// Re-capture the content onto the faces. Returns whether a capture happened.
    pub fn redraw(&mut self) -> bool {
        let Some(raster) = self
            .content
            .as_ref()
            .and_then(|content| content.capture(self.capture_quality))
        else {
            return false;
        };
        self.set_image(&raster);
        true
    }

    pub fn set_capture_quality(&mut self, quality: CaptureQuality) {
        self.capture_quality = quality;
    }

    /// Perspective applied to both faces (`m34 = -1 / distance`).
    pub fn set_perspective_distance(&mut self, distance: f64) {
        self.perspective = Transform3D::perspective(distance);
    }

    #[must_use]
    pub fn perspective(&self) -> Transform3D {
        self.perspective
    }

    /// A face's transform composed with the panel perspective.
    #[must_use]
    pub fn projected_transform(&self, role: FaceRole) -> Transform3D {
        self.face(role).transform().concat(&self.perspective)
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn face(&self, role: FaceRole) -> &Face {
        match role {
            FaceRole::Near => &self.near,
            FaceRole::Far => &self.far,
        }
    }

    fn face_mut(&mut self, role: FaceRole) -> &mut Face {
        match role {
            FaceRole::Near => &mut self.near,
            FaceRole::Far => &mut self.far,
        }
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        let fraction = self.fraction;
        self.unfold_to_fraction(fraction);
    }

    /// Move the panel without resizing it.
    pub fn set_origin(&mut self, origin: Point) {
        self.frame = self.frame.with_origin(origin);
    }

    #[inline]
    #[must_use]
    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> FoldState {
        self.state
    }

    #[inline]
    #[must_use]
    pub fn direction(&self) -> FoldDirection {
        self.direction
    }

    #[inline]
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Whether the panel's own content is hidden behind the faces.
    #[inline]
    #[must_use]
    pub fn is_content_hidden(&self) -> bool {
        self.content_hidden
    }

    #[must_use]
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }
}

impl HitTestable for FoldPanel {
    fn frame(&self) -> Rect {
        self.frame
    }

    fn hit_test(&self, point: Point) -> bool {
        !self.hidden && self.frame.contains(point)
    }
}

/// Near and far face transforms for hinge angle `theta`.
fn face_poses(direction: FoldDirection, theta: f64, half: f64, fraction: f64) -> (Transform3D, Transform3D) {
    let carry = 2.0 * half * fraction;
    match direction.axis() {
        Axis::Horizontal => (
            Transform3D::rotation(theta, 0.0, 1.0, 0.0),
            Transform3D::rotation(theta, 0.0, -1.0, 0.0).concat(&Transform3D::translation(carry, 0.0, 0.0)),
        ),
        Axis::Vertical => (
            Transform3D::rotation(theta, 1.0, 0.0, 0.0),
            Transform3D::rotation(theta, -1.0, 0.0, 0.0).concat(&Transform3D::translation(0.0, -carry, 0.0)),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fold_core::geometry::Size;
    use fold_render::PackedRgba;

    const EPS: f64 = 1e-9;

    fn horizontal() -> FoldPanel {
        FoldPanel::new(Rect::new(0.0, 0.0, 100.0, 50.0), FoldDirection::HorizontalRightToLeft)
    }

    fn vertical() -> FoldPanel {
        FoldPanel::new(Rect::new(0.0, 0.0, 80.0, 60.0), FoldDirection::Vertical)
    }

    struct Striped(Size);

    impl Renderable for Striped {
        fn size(&self) -> Size {
            self.0
        }

        fn draw(&self, target: &mut Raster, _scale: f64) {
            let (w, h) = (target.width(), target.height());
            target.fill_rect(0, 0, w / 2, h, PackedRgba::BLACK);
            target.fill_rect(w / 2, 0, w - w / 2, h, PackedRgba::WHITE);
        }
    }

    #[test]
    fn closed_panel_is_edge_on() {
        let p = horizontal();
        assert!((p.hinge_angle() - FRAC_PI_2).abs() < EPS);
        assert_eq!(p.visible_extent(), 0.0);
        assert_eq!(p.state(), FoldState::Closed);
        assert_eq!(p.face(FaceRole::Near).shadow().alpha, 1.0);
    }

    #[test]
    fn faces_meet_at_the_crease() {
        let mut p = horizontal();
        p.unfold_to_fraction(0.6);
        let near = p.face(FaceRole::Near).transform();
        let far = p.face(FaceRole::Far).transform();
        let (nx, _, nz) = near.apply(50.0, 0.0, 0.0);
        let (fx, _, fz) = far.apply(-50.0, 0.0, 0.0);
        assert!((nx - 30.0).abs() < EPS, "near edge at {nx}");
        assert!((fx - nx).abs() < EPS && (fz - nz).abs() < EPS);
        let (trail, _, _) = far.apply(0.0, 0.0, 0.0);
        assert!((trail - p.visible_extent()).abs() < EPS);
    }

    #[test]
    fn vertical_faces_meet_at_the_crease() {
        let mut p = vertical();
        p.unfold_to_fraction(0.5);
        let (_, ny, nz) = p.face(FaceRole::Near).transform().apply(0.0, -30.0, 0.0);
        let (_, fy, fz) = p.face(FaceRole::Far).transform().apply(0.0, 30.0, 0.0);
        assert!((ny + 15.0).abs() < EPS);
        assert!((fy - ny).abs() < EPS && (fz - nz).abs() < EPS);
    }

    #[test]
    fn flat_panel_has_no_shadow() {
        let mut p = horizontal();
        p.unfold_to_fraction(1.0);
        assert!(p.hinge_angle().abs() < EPS);
        assert_eq!(p.face(FaceRole::Far).shadow().alpha, 0.0);
        assert_eq!(p.visible_extent(), 100.0);
    }

    #[test]
    fn offsets_map_to_fractions() {
        let h = horizontal();
        assert_eq!(h.fraction_for_offset(-40.0), 0.0);
        assert_eq!(h.fraction_for_offset(40.0), 0.4);
        assert_eq!(h.fraction_for_offset(400.0), 1.0);
        let v = vertical();
        assert_eq!(v.fraction_for_offset(-30.0), 0.5);
    }

    #[test]
    fn full_sweep_fires_each_hook_once() {
        let mut p = horizontal();
        let mut events = Vec::new();
        for step in (0..=20).chain((0..20).rev()) {
            if let Some(e) = p.unfold(f64::from(step) * 5.0) {
                events.push(e);
            }
        }
        assert_eq!(
            events,
            vec![FoldEvent::WillOpen, FoldEvent::DidOpen, FoldEvent::WillClose, FoldEvent::DidClose]
        );
        assert_eq!(p.state(), FoldState::Closed);
    }

    #[test]
    fn hooks_toggle_content_and_faces() {
        let mut p = horizontal();
        p.unfold(10.0);
        assert!(p.is_content_hidden());
        assert!(!p.face(FaceRole::Near).is_hidden());
        p.unfold(100.0);
        assert!(!p.is_content_hidden());
        assert!(p.face(FaceRole::Far).is_hidden());
        p.unfold(50.0);
        assert!(p.is_content_hidden());
        p.unfold(0.0);
        assert!(!p.is_content_hidden());
        assert!(!p.face(FaceRole::Near).is_hidden());
    }

    #[test]
    fn set_image_splits_horizontally() {
        let mut p = horizontal();
        p.set_content(Box::new(Striped(Size::new(100.0, 50.0))));
        let near = p.face(FaceRole::Near).tile().expect("near tile");
        let far = p.face(FaceRole::Far).tile().expect("far tile");
        assert_eq!(near.width(), 50);
        assert_eq!(near.get(0, 0), Some(PackedRgba::BLACK));
        assert_eq!(far.get(0, 0), Some(PackedRgba::WHITE));
    }

    #[test]
    fn set_image_vertical_bottom_half_is_near() {
        let mut p = vertical();
        let mut image = Raster::new(80, 60);
        image.fill_rect(0, 30, 80, 30, PackedRgba::WHITE);
        p.set_image(&image);
        assert_eq!(p.face(FaceRole::Near).tile().and_then(|t| t.get(0, 0)), Some(PackedRgba::WHITE));
        assert_eq!(
            p.face(FaceRole::Far).tile().and_then(|t| t.get(0, 0)),
            Some(PackedRgba::TRANSPARENT)
        );
    }

    #[test]
    fn redraw_without_content_is_noop() {
        let mut p = horizontal();
        assert!(!p.redraw());
        assert!(p.face(FaceRole::Near).tile().is_none());
    }

    #[test]
    fn perspective_composes_with_face() {
        let mut p = horizontal();
        p.set_perspective_distance(250.0);
        let t = p.projected_transform(FaceRole::Near);
        assert!((t.m[2][3] - (-1.0 / 250.0) * p.face(FaceRole::Near).transform().m[2][2]).abs() < EPS);
    }

    #[test]
    fn hidden_panel_rejects_hits() {
        let mut p = horizontal();
        assert!(p.hit_test(Point::new(10.0, 10.0)));
        p.set_hidden(true);
        assert!(!p.hit_test(Point::new(10.0, 10.0)));
    }
}

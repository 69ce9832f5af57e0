#![forbid(unsafe_code)]

//! A chain of hinge panels that open in sequence from one drag offset.
//!
//! Panel 0 sits against the centre content; higher indices sit further out.
//! A single scalar offset drives the whole chain:
//!
//! ```text
//! d₀ = |offset|                              f₀ = clamp(d₀ / (w·(1+pull)))
//! dᵢ = |offset| − Σⱼ<ᵢ w·fⱼ                  fᵢ = clamp(dᵢ / (w·(1+pull)))   (i < N−1)
//!                                            f_N−1 = clamp(d_N−1 / w)        (terminal)
//! ```
//!
//! where `w` is one panel's extent. With a pull factor above zero a panel has
//! to be dragged past its own width before it is flat, which lets the next
//! panel start opening while its predecessor is still creased.
//!
//! Panel frames are laid out in the stack's own coordinates so each panel's
//! visible region trails its predecessor's:
//!
//! | direction        | content edge          | panel `i` origin along the axis     |
//! |------------------|-----------------------|-------------------------------------|
//! | left-to-right    | at the offset         | `edge − leadᵢ − visibleᵢ`           |
//! | right-to-left    | at 0                  | `leadᵢ`                             |
//! | vertical         | at the stack's bottom | `extent − leadᵢ − w`                |
//!
//! # Invariants
//!
//! 1. Exactly `fold_count` panels, each `total_extent / fold_count` long.
//! 2. `pull_factor` is 0 when `fold_count == 1`.
//! 3. Panel fractions are non-increasing from panel 0 outward while the
//!    pull factor is at most 1.
//! 4. At full offset (`total_extent`) every panel is flat, again for pull
//!    factors up to 1.
//!
//! # Failure Modes
//!
//! - `fold_count == 0` is clamped to 1 (debug builds assert).
//! - Negative or NaN pull factors are treated as 0.
//! - A failed capture keeps the previous tiles.

use std::fmt;

use fold_core::fold_state::{FoldDirection, FoldEvent, FoldState};
use fold_core::geometry::{Axis, Point, Rect};
use fold_core::transform::DEFAULT_EYE_DISTANCE;
use fold_render::{CaptureQuality, Raster, Renderable, capture_tiles};

use crate::capability::HitTestable;
use crate::panel::FoldPanel;

/// An ordered chain of [`FoldPanel`]s sharing one axis and direction.
pub struct CascadeStack {
    frame: Rect,
    direction: FoldDirection,
    fold_count: usize,
    pull_factor: f64,
    panels: Vec<FoldPanel>,
    state: FoldState,
    offset: f64,
    hidden: bool,
    content: Option<Box<dyn Renderable>>,
    content_hidden: bool,
    capture_before_unfold: bool,
    capture_quality: CaptureQuality,
    perspective_distance: f64,
    last_raster: Option<Raster>,
}

impl fmt::Debug for CascadeStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CascadeStack")
            .field("frame", &self.frame)
            .field("direction", &self.direction)
            .field("fold_count", &self.fold_count)
            .field("pull_factor", &self.pull_factor)
            .field("state", &self.state)
            .field("offset", &self.offset)
            .field("fractions", &self.panel_fractions())
            .finish_non_exhaustive()
    }
}

impl CascadeStack {
    /// A closed stack of `fold_count` panels filling `frame`.
    #[must_use]
    pub fn new(frame: Rect, direction: FoldDirection, fold_count: usize, pull_factor: f64) -> Self {
        debug_assert!(fold_count >= 1, "a cascade needs at least one panel");
        let fold_count = fold_count.max(1);
        let pull_factor = if fold_count == 1 || pull_factor.is_nan() {
            0.0
        } else {
            pull_factor.max(0.0)
        };
        let mut stack = Self {
            frame,
            direction,
            fold_count,
            pull_factor,
            panels: Vec::with_capacity(fold_count),
            state: FoldState::Closed,
            offset: 0.0,
            hidden: false,
            content: None,
            content_hidden: false,
            capture_before_unfold: false,
            capture_quality: CaptureQuality::Optimized,
            perspective_distance: DEFAULT_EYE_DISTANCE,
            last_raster: None,
        };
        stack.create_panels();
        stack
    }

    fn create_panels(&mut self) {
        let slots = Rect::from_size(self.frame.size()).split(self.axis(), self.fold_count);
        self.panels = slots
            .into_iter()
            .map(|slot| {
                let mut panel = FoldPanel::new(slot, self.direction);
                panel.set_capture_quality(self.capture_quality);
                panel.set_perspective_distance(self.perspective_distance);
                panel
            })
            .collect();
        self.propagate(self.offset);
    }

    // -----------------------------------------------------------------------
    // Geometry
    // -----------------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.direction.axis()
    }

    /// Extent of the whole stack along its axis.
    #[inline]
    #[must_use]
    pub fn total_extent(&self) -> f64 {
        self.axis().extent(self.frame.size())
    }

    /// Extent of one panel along the axis.
    #[inline]
    #[must_use]
    pub fn panel_extent(&self) -> f64 {
        self.total_extent() / self.fold_count as f64
    }

    /// Sum of the panels' visible extents.
    #[must_use]
    pub fn visible_extent(&self) -> f64 {
        self.panels.iter().map(FoldPanel::visible_extent).sum()
    }

    /// Offset magnitude driving the chain.
    fn driving_offset(&self, offset: f64) -> f64 {
        match self.direction {
            FoldDirection::HorizontalLeftToRight => offset.max(0.0),
            FoldDirection::HorizontalRightToLeft | FoldDirection::Vertical => offset.abs(),
        }
    }

    // -----------------------------------------------------------------------
    // Unfolding
    // -----------------------------------------------------------------------

    /// Drive the whole chain from one offset.
    pub fn unfold(&mut self, offset: f64) -> Option<FoldEvent> {
        let event = self.calculate_state(offset);
        self.propagate(offset);
        event
    }

    fn propagate(&mut self, offset: f64) {
        self.offset = offset;
        let driving = self.driving_offset(offset);
        let w = self.panel_extent();
        let total = self.total_extent();
        let last = self.fold_count - 1;
        let pulled = w * (1.0 + self.pull_factor);

        let mut lead = 0.0;
        for (i, panel) in self.panels.iter_mut().enumerate() {
            let denominator = if i == last { w } else { pulled };
            let fraction = if denominator > 0.0 {
                ((driving - lead) / denominator).clamp(0.0, 1.0)
            } else {
                0.0
            };
            panel.unfold_to_fraction(fraction);
            let visible = panel.visible_extent();

            let along = match self.direction {
                FoldDirection::HorizontalLeftToRight => driving.min(total) - lead - visible,
                FoldDirection::HorizontalRightToLeft => lead,
                FoldDirection::Vertical => total - lead - w,
            };
            let origin = match self.direction.axis() {
                Axis::Horizontal => Point::new(along, 0.0),
                Axis::Vertical => Point::new(0.0, along),
            };
            panel.set_origin(origin);
            lead += visible;
        }
        tracing::trace!(offset, fractions = ?self.panel_fractions(), "cascade propagated");
    }

    /// Advance the aggregate lifecycle for `offset` and run the matching hook.
    pub fn calculate_state(&mut self, offset: f64) -> Option<FoldEvent> {
        let total = self.total_extent();
        let fraction = if total > 0.0 {
            self.driving_offset(offset) / total
        } else {
            0.0
        };
        let event = match self.state {
            FoldState::Closed if fraction > 0.0 => Some(FoldEvent::WillOpen),
            FoldState::Opened if fraction < 1.0 => Some(FoldEvent::WillClose),
            FoldState::Transitioning if fraction == 0.0 => Some(FoldEvent::DidClose),
            FoldState::Transitioning if fraction >= 1.0 => Some(FoldEvent::DidOpen),
            _ => None,
        }?;
        self.state = match event {
            FoldEvent::WillOpen | FoldEvent::WillClose => FoldState::Transitioning,
            FoldEvent::DidOpen => FoldState::Opened,
            FoldEvent::DidClose => FoldState::Closed,
        };
        tracing::debug!(?event, fraction, direction = ?self.direction, "cascade state changed");
        self.apply_hook(event);
        Some(event)
    }

    /// Jump straight to fully open.
    pub fn unfold_instant(&mut self) {
        let total = self.total_extent();
        self.unfold(total);
        self.apply_hook(FoldEvent::DidOpen);
        self.state = FoldState::Opened;
    }

    fn apply_hook(&mut self, event: FoldEvent) {
        match event {
            FoldEvent::WillOpen => {
                if self.capture_before_unfold {
                    self.content_hidden = false;
                    self.redraw();
                }
                self.content_hidden = true;
                self.show_panels(true);
            }
            FoldEvent::WillClose => {
                self.redraw();
                self.content_hidden = true;
                self.show_panels(true);
            }
            FoldEvent::DidOpen => {
                self.content_hidden = false;
                self.show_panels(false);
            }
            FoldEvent::DidClose => {
                self.content_hidden = true;
                self.show_panels(true);
            }
        }
    }

    fn show_panels(&mut self, show: bool) {
        for panel in &mut self.panels {
            panel.set_hidden(!show);
        }
    }

    // -----------------------------------------------------------------------
    // Content and tiles
    // -----------------------------------------------------------------------

    /// Install the content holder, capture it, and slice it onto the panels.
    pub fn set_content(&mut self, content: Box<dyn Renderable>) {
        self.content = Some(content);
        self.redraw();
        self.content_hidden = true;
    }

    /// Re-capture the content and re-slice it. Returns whether a capture happened.
    pub fn redraw(&mut self) -> bool {
        let (axis, count, quality) = (self.axis(), self.fold_count, self.capture_quality);
        let Some((raster, tiles)) = self
            .content
            .as_deref()
            .and_then(|content| capture_tiles(content, quality, axis, count))
        else {
            return false;
        };
        self.distribute(&tiles);
        self.last_raster = Some(raster);
        true
    }

    /// Hand one tile to each panel, adjacent-to-content first.
    fn distribute(&mut self, tiles: &[Raster]) {
        let n = self.fold_count;
        for (k, tile) in tiles.iter().enumerate() {
            let index = match self.direction {
                FoldDirection::HorizontalLeftToRight | FoldDirection::Vertical => n - 1 - k,
                FoldDirection::HorizontalRightToLeft => k,
            };
            if let Some(panel) = self.panels.get_mut(index) {
                panel.set_image(tile);
            }
        }
    }

    /// Resize the stack: rebuild panels, re-slice the last capture, re-apply the offset.
    pub fn set_frame(&mut self, frame: Rect) {
        if frame.size() == self.frame.size() {
            self.frame = frame;
            return;
        }
        self.frame = frame;
        let hidden = self.panels.first().is_some_and(FoldPanel::is_hidden);
        self.create_panels();
        self.show_panels(!hidden);
        let tiles = self
            .last_raster
            .as_ref()
            .map(|raster| raster.slice(self.axis(), self.fold_count));
        if let Some(tiles) = tiles {
            self.distribute(&tiles);
        }
        tracing::debug!(width = frame.width, height = frame.height, "cascade resized");
    }

    pub fn set_capture_before_unfold(&mut self, capture: bool) {
        self.capture_before_unfold = capture;
    }

    #[must_use]
    pub fn capture_before_unfold(&self) -> bool {
        self.capture_before_unfold
    }

    pub fn set_capture_quality(&mut self, quality: CaptureQuality) {
        self.capture_quality = quality;
        for panel in &mut self.panels {
            panel.set_capture_quality(quality);
        }
    }

    pub fn set_perspective_distance(&mut self, distance: f64) {
        self.perspective_distance = distance;
        for panel in &mut self.panels {
            panel.set_perspective_distance(distance);
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn panels(&self) -> &[FoldPanel] {
        &self.panels
    }

    /// Each panel's unfold fraction, panel 0 first.
    #[must_use]
    pub fn panel_fractions(&self) -> Vec<f64> {
        self.panels.iter().map(FoldPanel::fraction).collect()
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
    pub fn fold_count(&self) -> usize {
        self.fold_count
    }

    #[inline]
    #[must_use]
    pub fn pull_factor(&self) -> f64 {
        self.pull_factor
    }

    /// The last offset applied.
    #[inline]
    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Whether the live content holder is hidden behind the panels.
    #[inline]
    #[must_use]
    pub fn is_content_hidden(&self) -> bool {
        self.content_hidden
    }

    #[must_use]
    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    #[must_use]
    pub fn last_raster(&self) -> Option<&Raster> {
        self.last_raster.as_ref()
    }

    #[inline]
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }
}

impl HitTestable for CascadeStack {
    fn frame(&self) -> Rect {
        self.frame
    }

    fn hit_test(&self, point: Point) -> bool {
        !self.hidden && self.frame.contains(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fold_core::geometry::Size;
    use fold_render::PackedRgba;
    use tracing_test::traced_test;

    const EPS: f64 = 1e-9;

    fn stack(direction: FoldDirection, count: usize, pull: f64) -> CascadeStack {
        let w = 100.0 * count as f64;
        let frame = match direction.axis() {
            Axis::Horizontal => Rect::new(0.0, 0.0, w, 40.0),
            Axis::Vertical => Rect::new(0.0, 0.0, 40.0, w),
        };
        CascadeStack::new(frame, direction, count, pull)
    }

    /// Content whose pixel column (or row) index is encoded in red.
    struct Ramp(Size);

    impl Renderable for Ramp {
        fn size(&self) -> Size {
            self.0
        }

        fn draw(&self, target: &mut Raster, _scale: f64) {
            for y in 0..target.height() {
                for x in 0..target.width() {
                    target.set(x, y, PackedRgba::rgb((x / 10) as u8, (y / 10) as u8, 0));
                }
            }
        }
    }

    #[test]
    fn single_panel_forces_zero_pull() {
        assert_eq!(stack(FoldDirection::HorizontalRightToLeft, 1, 0.7).pull_factor(), 0.0);
        assert_eq!(stack(FoldDirection::HorizontalRightToLeft, 2, -1.0).pull_factor(), 0.0);
        assert_eq!(stack(FoldDirection::Vertical, 3, 0.5).panels().len(), 3);
    }

    #[test]
    fn three_panels_with_pull() {
        let mut s = stack(FoldDirection::HorizontalRightToLeft, 3, 0.5);
        s.unfold(-150.0);
        let f = s.panel_fractions();
        assert!((f[0] - 1.0).abs() < EPS);
        assert!((f[1] - 50.0 / 150.0).abs() < EPS);
        assert!((f[2] - (150.0 - 100.0 - 100.0 / 3.0) / 100.0).abs() < EPS);

        s.unfold(-75.0);
        let f = s.panel_fractions();
        assert!((f[0] - 0.5).abs() < EPS);
        assert!((f[1] - 25.0 / 150.0).abs() < EPS);
    }

    #[test]
    fn full_offset_opens_every_panel() {
        for direction in [
            FoldDirection::HorizontalLeftToRight,
            FoldDirection::HorizontalRightToLeft,
            FoldDirection::Vertical,
        ] {
            let mut s = stack(direction, 3, 0.5);
            s.unfold(300.0 * if direction == FoldDirection::HorizontalLeftToRight { 1.0 } else { -1.0 });
            assert!(s.panel_fractions().iter().all(|f| (f - 1.0).abs() < EPS), "{direction:?}");
            assert!((s.visible_extent() - 300.0).abs() < EPS);
        }
    }

    #[test]
    fn left_to_right_ignores_negative_offsets() {
        let mut s = stack(FoldDirection::HorizontalLeftToRight, 2, 0.0);
        assert_eq!(s.unfold(-50.0), None);
        assert_eq!(s.panel_fractions(), vec![0.0, 0.0]);
        assert_eq!(s.state(), FoldState::Closed);
    }

    #[test]
    fn panels_trail_predecessor() {
        let mut s = stack(FoldDirection::HorizontalLeftToRight, 3, 0.0);
        s.unfold(150.0);
        let xs: Vec<f64> = s.panels().iter().map(|p| p.frame().x).collect();
        assert!((xs[0] - 50.0).abs() < EPS);
        assert!((xs[1] - 0.0).abs() < EPS);

        let mut s = stack(FoldDirection::HorizontalRightToLeft, 3, 0.0);
        s.unfold(-150.0);
        let xs: Vec<f64> = s.panels().iter().map(|p| p.frame().x).collect();
        assert_eq!(xs[0], 0.0);
        assert!((xs[1] - 100.0).abs() < EPS);
        assert!((xs[2] - 150.0).abs() < EPS);

        let mut s = stack(FoldDirection::Vertical, 2, 0.0);
        s.unfold(-150.0);
        let ys: Vec<f64> = s.panels().iter().map(|p| p.frame().y).collect();
        assert!((ys[0] - 100.0).abs() < EPS);
        assert!((ys[1] - 0.0).abs() < EPS);
    }

    #[test]
    fn aggregate_hooks() {
        let mut s = stack(FoldDirection::HorizontalRightToLeft, 2, 0.0);
        s.set_content(Box::new(Ramp(Size::new(200.0, 40.0))));
        assert!(s.is_content_hidden());

        assert_eq!(s.unfold(-10.0), Some(FoldEvent::WillOpen));
        assert!(s.panels().iter().all(|p| !p.is_hidden()));
        assert_eq!(s.unfold(-200.0), Some(FoldEvent::DidOpen));
        assert!(!s.is_content_hidden());
        assert!(s.panels().iter().all(FoldPanel::is_hidden));
        assert_eq!(s.unfold(-190.0), Some(FoldEvent::WillClose));
        assert!(s.is_content_hidden());
        assert_eq!(s.unfold(0.0), Some(FoldEvent::DidClose));
        assert!(s.panels().iter().all(|p| !p.is_hidden()));
    }

    /// Counts its captures.
    struct Counted(std::rc::Rc<std::cell::Cell<u32>>);

    impl Renderable for Counted {
        fn size(&self) -> Size {
            Size::new(200.0, 40.0)
        }

        fn draw(&self, _target: &mut Raster, _scale: f64) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn capture_before_unfold_recaptures_on_open() {
        use std::cell::Cell;
        use std::rc::Rc;

        let lazy_draws = Rc::new(Cell::new(0));
        let mut lazy = stack(FoldDirection::HorizontalRightToLeft, 2, 0.0);
        lazy.set_content(Box::new(Counted(Rc::clone(&lazy_draws))));
        lazy.unfold(-10.0);
        assert_eq!(lazy_draws.get(), 1);

        let draws = Rc::new(Cell::new(0));
        let mut eager = stack(FoldDirection::HorizontalRightToLeft, 2, 0.0);
        eager.set_capture_before_unfold(true);
        eager.set_content(Box::new(Counted(Rc::clone(&draws))));
        assert_eq!(draws.get(), 1);
        assert_eq!(eager.unfold(-10.0), Some(FoldEvent::WillOpen));
        assert_eq!(draws.get(), 2);
        assert!(eager.is_content_hidden());

        eager.unfold(-200.0);
        assert_eq!(draws.get(), 2);
        // Closing always recaptures.
        assert_eq!(eager.unfold(-100.0), Some(FoldEvent::WillClose));
        assert_eq!(draws.get(), 3);
    }

    #[test]
    fn unfold_instant_opens() {
        let mut s = stack(FoldDirection::Vertical, 2, 0.3);
        s.unfold_instant();
        assert_eq!(s.state(), FoldState::Opened);
        assert!(!s.is_content_hidden());
        assert!(s.panel_fractions().iter().all(|f| (f - 1.0).abs() < EPS));
    }

    #[test]
    fn tiles_assigned_adjacent_first() {
        use crate::face::FaceRole;

        let mut ltr = stack(FoldDirection::HorizontalLeftToRight, 2, 0.0);
        ltr.set_content(Box::new(Ramp(Size::new(200.0, 40.0))));
        // Panel 0 touches the content, so it shows the rightmost slice.
        let near = ltr.panels()[0].face(FaceRole::Near).tile().expect("tile");
        assert_eq!(near.get(0, 0).map(PackedRgba::r), Some(10));

        let mut rtl = stack(FoldDirection::HorizontalRightToLeft, 2, 0.0);
        rtl.set_content(Box::new(Ramp(Size::new(200.0, 40.0))));
        let near = rtl.panels()[0].face(FaceRole::Near).tile().expect("tile");
        assert_eq!(near.get(0, 0).map(PackedRgba::r), Some(0));
    }

    #[test]
    #[traced_test]
    fn state_changes_are_logged() {
        let mut s = stack(FoldDirection::Vertical, 2, 0.0);
        s.unfold(-20.0);
        assert!(logs_contain("cascade state changed"));
        assert!(logs_contain("WillOpen"));
    }

    #[test]
    fn resize_reslices_last_capture() {
        let mut s = stack(FoldDirection::HorizontalRightToLeft, 2, 0.0);
        s.set_content(Box::new(Ramp(Size::new(200.0, 40.0))));
        s.set_frame(Rect::new(0.0, 0.0, 300.0, 40.0));
        assert_eq!(s.panel_extent(), 150.0);
        assert!(s.panels().iter().all(|p| p.face(crate::face::FaceRole::Far).tile().is_some()));
    }
}

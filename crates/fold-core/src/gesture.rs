#![forbid(unsafe_code)]

//! Pan gesture session: axis lock, live offsets, and release decisions.
//!
//! [`GestureSession`] interprets a pan gesture delivered by the host's
//! gesture collaborator as a sequence of [`PanEvent`]s. It does not touch any
//! panel; it only answers three questions:
//!
//! - on `Began`: which axis is this drag locked to?
//! - on `Changed`: what content offset should be animated?
//! - on `Ended`/`Cancelled`: which edge should open, or should the surface restore?
//!
//! # State Machine
//!
//! ```text
//! Idle --Began--> Locked(axis) --Changed*--> Locked(axis) --Ended|Cancelled--> Idle
//! ```
//!
//! # Invariants
//!
//! 1. The axis chosen at `Began` is immutable until `Ended`/`Cancelled`.
//! 2. While an edge is unfolded, the lock always matches that edge's axis.
//! 3. A release never opens an edge whose drag permission is off.
//!
//! # Failure Modes
//!
//! - `Changed`/`Ended` without a preceding `Began` lock the axis lazily from
//!   that event, as if it had been `Began`.
//! - An edge with zero extent (nothing attached) is never chosen on release.

use crate::fold_state::{DragEdges, Edge, PaperFoldState, PerEdge};
use crate::geometry::{Axis, Point, Size};

/// Default distance from the left/right margin that forces a horizontal lock.
pub const DEFAULT_EDGE_SCROLL_WIDTH: f64 = 40.0;

/// Default fraction of an edge's extent a release must pass to open it.
pub const DEFAULT_UNFOLD_THRESHOLD: f64 = 0.3;

/// Phase of a pan gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PanPhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

/// One pan update from the gesture collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanEvent {
    pub phase: PanPhase,
    /// Cumulative translation since the gesture began.
    pub translation: Point,
    /// Instantaneous velocity (points per second).
    pub velocity: Point,
    /// Touch location in content coordinates.
    pub location: Point,
}

impl PanEvent {
    #[must_use]
    pub const fn new(phase: PanPhase, translation: Point, velocity: Point, location: Point) -> Self {
        Self {
            phase,
            translation,
            velocity,
            location,
        }
    }

    /// A `Began` event with the given velocity and location.
    #[must_use]
    pub const fn began(velocity: Point, location: Point) -> Self {
        Self::new(PanPhase::Began, Point::ZERO, velocity, location)
    }

    /// A `Changed` event with the given translation.
    #[must_use]
    pub const fn changed(translation: Point) -> Self {
        Self::new(PanPhase::Changed, translation, Point::ZERO, Point::ZERO)
    }

    /// An `Ended` event with the given translation.
    #[must_use]
    pub const fn ended(translation: Point) -> Self {
        Self::new(PanPhase::Ended, translation, Point::ZERO, Point::ZERO)
    }

    /// A `Cancelled` event with the given translation.
    #[must_use]
    pub const fn cancelled(translation: Point) -> Self {
        Self::new(PanPhase::Cancelled, translation, Point::ZERO, Point::ZERO)
    }
}

/// Snapshot of orchestrator state the session needs to decide.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanContext {
    /// Current rest state.
    pub state: PaperFoldState,
    /// Current content translation.
    pub content_offset: Point,
    /// Size of the content surface.
    pub container: Size,
    /// Fold extent of each edge along its axis (0 when nothing is attached).
    pub extents: PerEdge<f64>,
    /// Fraction of each extent a release must exceed to open that edge.
    pub thresholds: PerEdge<f64>,
    /// Edges the user may open by dragging.
    pub drag_edges: DragEdges,
    /// Force a horizontal lock when the touch starts near a side margin.
    pub horizontal_edge_dragging: bool,
    /// Width of the side margin zone.
    pub edge_scroll_width: f64,
}

impl PanContext {
    /// Context with no attached edges at rest.
    #[must_use]
    pub fn new(container: Size) -> Self {
        Self {
            state: PaperFoldState::Default,
            content_offset: Point::ZERO,
            container,
            extents: PerEdge::splat(0.0),
            thresholds: PerEdge::splat(DEFAULT_UNFOLD_THRESHOLD),
            drag_edges: DragEdges::empty(),
            horizontal_edge_dragging: false,
            edge_scroll_width: DEFAULT_EDGE_SCROLL_WIDTH,
        }
    }

    /// Whether the content is resting exactly at `edge`'s full extent.
    #[must_use]
    pub fn is_pinned_at(&self, edge: Edge) -> bool {
        let extent = self.extents.get(edge);
        let offset = edge.axis().component(self.content_offset);
        extent > 0.0 && (offset - edge.sign() * extent).abs() <= f64::EPSILON * extent.max(1.0)
    }

    fn in_edge_zone(&self, location: Point) -> bool {
        location.x < self.edge_scroll_width
            || location.x > self.container.width - self.edge_scroll_width
    }
}

/// What the surface should do once the finger lifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseDecision {
    /// Animate `edge` to fully unfolded.
    Unfold(Edge),
    /// Animate back to the centred default state.
    Restore,
}

impl ReleaseDecision {
    /// The rest state this decision settles into.
    #[must_use]
    pub const fn target_state(self) -> PaperFoldState {
        match self {
            Self::Unfold(edge) => edge.unfolded_state(),
            Self::Restore => PaperFoldState::Default,
        }
    }
}

/// Outcome of feeding one [`PanEvent`] to the session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanOutcome {
    /// The gesture began and is now locked to this axis.
    Locked(Axis),
    /// Animate the content to this offset.
    Offset(Point),
    /// The gesture finished.
    Released(ReleaseDecision),
}

/// Lock state of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Locked(Axis),
}

/// Axis-locking interpreter for one pan gesture at a time.
#[derive(Debug, Clone, Default)]
pub struct GestureSession {
    state: SessionState,
    last_axis: Axis,
}

impl GestureSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one event.
    pub fn handle(&mut self, event: &PanEvent, ctx: &PanContext) -> PanOutcome {
        match event.phase {
            PanPhase::Began => PanOutcome::Locked(self.begin(event, ctx)),
            PanPhase::Changed => {
                if self.state == SessionState::Idle {
                    self.begin(event, ctx);
                }
                PanOutcome::Offset(self.changed(event.translation, ctx))
            }
            PanPhase::Ended | PanPhase::Cancelled => {
                if self.state == SessionState::Idle {
                    self.begin(event, ctx);
                }
                PanOutcome::Released(self.release(event.translation, ctx))
            }
        }
    }

    /// Choose and lock the drag axis.
    pub fn begin(&mut self, event: &PanEvent, ctx: &PanContext) -> Axis {
        let axis = if let Some(edge) = ctx.state.edge() {
            edge.axis()
        } else if ctx.horizontal_edge_dragging && ctx.in_edge_zone(event.location) {
            Axis::Horizontal
        } else if event.velocity.x.abs() > event.velocity.y.abs() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        };
        tracing::debug!(?axis, state = ?ctx.state, "pan axis locked");
        self.state = SessionState::Locked(axis);
        self.last_axis = axis;
        axis
    }

    /// Content offset for a live translation, continuing from any open edge.
    #[must_use]
    pub fn changed(&self, translation: Point, ctx: &PanContext) -> Point {
        let e = &ctx.extents;
        let offset = match ctx.state {
            PaperFoldState::LeftUnfolded => translation.offset(e.left, 0.0),
            PaperFoldState::RightUnfolded => translation.offset(-e.right, 0.0),
            PaperFoldState::TopUnfolded => translation.offset(0.0, e.top),
            PaperFoldState::BottomUnfolded => translation.offset(0.0, -e.bottom),
            PaperFoldState::Default | PaperFoldState::Transitioning => translation,
        };
        match self.axis().unwrap_or(self.last_axis) {
            Axis::Horizontal => Point::new(offset.x, 0.0),
            Axis::Vertical => Point::new(0.0, offset.y),
        }
    }

    /// Decide the terminal state and return to idle.
    pub fn release(&mut self, translation: Point, ctx: &PanContext) -> ReleaseDecision {
        let axis = self.axis().unwrap_or(self.last_axis);
        self.state = SessionState::Idle;

        let value = axis.component(translation);
        let (positive, negative) = match axis {
            Axis::Horizontal => (Edge::Left, Edge::Right),
            Axis::Vertical => (Edge::Top, Edge::Bottom),
        };
        // Horizontal treats zero as a (failed) left pull, vertical as a bottom pull.
        let edge = match axis {
            Axis::Horizontal if value >= 0.0 => positive,
            Axis::Horizontal => negative,
            Axis::Vertical if value > 0.0 => positive,
            Axis::Vertical => negative,
        };

        let extent = ctx.extents.get(edge);
        let passed = value.abs() >= ctx.thresholds.get(edge) * extent
            && ctx.state == PaperFoldState::Default;
        let decision = if extent > 0.0
            && (passed || ctx.is_pinned_at(edge))
            && ctx.drag_edges.allows(edge)
        {
            ReleaseDecision::Unfold(edge)
        } else {
            ReleaseDecision::Restore
        };
        tracing::debug!(?axis, value, ?decision, "pan released");
        decision
    }

    /// The locked axis, if a gesture is in progress.
    #[must_use]
    pub fn axis(&self) -> Option<Axis> {
        match self.state {
            SessionState::Idle => None,
            SessionState::Locked(axis) => Some(axis),
        }
    }

    /// The axis of the most recent gesture (kept after release).
    #[must_use]
    pub fn last_axis(&self) -> Axis {
        self.last_axis
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drop any lock without a release decision.
    pub fn reset(&mut self) {
        self.state = SessionState::Idle;
    }
}

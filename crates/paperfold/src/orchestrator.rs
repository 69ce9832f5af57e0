#![forbid(unsafe_code)]

//! The paper-fold orchestrator.
//!
//! [`PaperFold`] owns the centre [`ContentSurface`] and up to four edge slots:
//! cascades on the left, right, and top, and a single hinge panel at the
//! bottom. Drags and commands both move the content along one axis at a time
//! and every movement funnels through [`PaperFold::animate`], which positions
//! the content and unfolds the slot it uncovers.
//!
//! # Slot Placement
//!
//! | slot   | frame (container coordinates)                  |
//! |--------|------------------------------------------------|
//! | left   | `(0, 0, w, H)`, fixed                          |
//! | right  | `(W + content.x, 0, w, H)`, rides the content  |
//! | top    | `(0, content.y − h, w, h)`, rides the content  |
//! | bottom | `(0, H − h, w, h)`, fixed                      |
//!
//! # State Machine
//!
//! ```text
//!                 drag / command                settle
//! Default ───────────────────────▶ Transitioning ───────▶ {Left,Right,Top,Bottom}Unfolded
//!    ▲                                                         │
//!    └──────────── settle ◀── Transitioning ◀── restore ───────┘
//! ```
//!
//! `Transitioning` is only ever reported by [`PaperFold::state`] while an
//! animation is alive; the stored state is always a rest state.
//!
//! # Invariants
//!
//! 1. At most one edge is unfolded, and at most one animation is alive.
//! 2. The content offset along the active axis never exceeds the revealed
//!    edge's extent.
//! 3. A settle runs `finish(state)` exactly when the state it settles into
//!    differs from the last recorded one, and always runs the completion.
//! 4. Pan input is dropped while an animation is alive.
//!
//! # Failure Modes
//!
//! - Commanding an edge with nothing attached, or commanding `Transitioning`,
//!   logs an error, returns it, and changes nothing.
//! - Offsets toward an edge with nothing attached are ignored.
//! - Delegates and completions run while the surface is borrowed; calling
//!   back into a shared `Rc<RefCell<PaperFold>>` from them panics.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use fold_core::{
    AffineTranslation, Axis, DragEdges, EaseStep, EasingAnimator, Edge, FoldDirection, FoldState,
    GestureSession, PanContext, PanEvent, PanOutcome, PaperFoldState, PerEdge, Point, Rect, Size,
};
use fold_render::Renderable;
use fold_runtime::{Duration, FixedTicker, FoldConfig, Instant, TickSource};
use fold_widgets::{CascadeStack, FoldPanel, HintMode, HitTestable, SwipeHint};

use crate::delegate::{Completion, PaperFoldDelegate, PanDelegate};
use crate::error::{Error, Result};
use crate::surface::ContentSurface;

/// What a point in the container lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HitTarget {
    Content,
    Edge(Edge),
}

/// The live settle animation.
#[derive(Debug, Clone)]
struct AnimationTask {
    target: PaperFoldState,
    axis: Axis,
    animator: EasingAnimator,
}

/// A content surface that folds open on up to four edges.
pub struct PaperFold {
    config: FoldConfig,
    surface: ContentSurface,
    left: Option<CascadeStack>,
    right: Option<CascadeStack>,
    top: Option<CascadeStack>,
    bottom: Option<FoldPanel>,
    state: PaperFoldState,
    last_state: PaperFoldState,
    axis: Axis,
    drag_edges: DragEdges,
    horizontal_edge_dragging: bool,
    restricted_dragging_rect: Option<Rect>,
    is_automated: bool,
    session: GestureSession,
    animation: Option<AnimationTask>,
    completion: Option<Completion>,
    ticker: Box<dyn TickSource>,
    hint: Option<SwipeHint>,
    delegate: Option<Box<dyn PaperFoldDelegate>>,
}

impl fmt::Debug for PaperFold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaperFold")
            .field("size", &self.size())
            .field("offset", &self.content_offset())
            .field("state", &self.state)
            .field("last_state", &self.last_state)
            .field("axis", &self.axis)
            .field("drag_edges", &self.drag_edges)
            .field("animating", &self.animation.is_some())
            .finish_non_exhaustive()
    }
}

impl PaperFold {
    /// A surface of `size` with the built-in configuration.
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self::build(size, FoldConfig::default())
    }

    /// A surface of `size` with a validated `config`.
    pub fn with_config(size: Size, config: FoldConfig) -> Result<Self> {
        Ok(Self::build(size, config.validated()?))
    }

    fn build(size: Size, config: FoldConfig) -> Self {
        let ticker = FixedTicker::new(config.tick_interval());
        Self {
            horizontal_edge_dragging: config.horizontal_edge_dragging,
            config,
            surface: ContentSurface::new(size),
            left: None,
            right: None,
            top: None,
            bottom: None,
            state: PaperFoldState::Default,
            last_state: PaperFoldState::Default,
            axis: Axis::Horizontal,
            drag_edges: DragEdges::empty(),
            restricted_dragging_rect: None,
            is_automated: false,
            session: GestureSession::new(),
            animation: None,
            completion: None,
            ticker: Box::new(ticker),
            hint: None,
            delegate: None,
        }
    }

    /// Replace the tick source driving animations.
    #[must_use]
    pub fn with_ticker(mut self, ticker: Box<dyn TickSource>) -> Self {
        self.ticker = ticker;
        self
    }

    /// Wrap in a shared handle and hand out a weak pan delegate for it.
    #[must_use]
    pub fn into_shared(self) -> (Rc<RefCell<Self>>, PanDelegate) {
        let shared = Rc::new(RefCell::new(self));
        let delegate = PanDelegate::new(&shared);
        (shared, delegate)
    }

    pub fn set_delegate(&mut self, delegate: Box<dyn PaperFoldDelegate>) {
        self.delegate = Some(delegate);
    }

    // -----------------------------------------------------------------------
    // Attaching content
    // -----------------------------------------------------------------------

    pub fn set_center_content(&mut self, content: Box<dyn Renderable>) {
        self.surface.set_content(content);
    }

    /// Attach a left-edge cascade sized to `content`'s width.
    pub fn set_left_content(
        &mut self,
        content: Box<dyn Renderable>,
        fold_count: usize,
        pull_factor: f64,
    ) -> Result<()> {
        let frame = Rect::new(0.0, 0.0, content.size().width, self.size().height);
        let stack = self.build_stack(
            Edge::Left,
            frame,
            FoldDirection::HorizontalLeftToRight,
            content,
            fold_count,
            pull_factor,
        )?;
        self.left = Some(stack);
        self.attached(Edge::Left);
        Ok(())
    }

    /// Attach a right-edge cascade sized to `content`'s width.
    pub fn set_right_content(
        &mut self,
        content: Box<dyn Renderable>,
        fold_count: usize,
        pull_factor: f64,
    ) -> Result<()> {
        let size = self.size();
        let x = size.width + self.content_offset().x;
        let frame = Rect::new(x, 0.0, content.size().width, size.height);
        let stack = self.build_stack(
            Edge::Right,
            frame,
            FoldDirection::HorizontalRightToLeft,
            content,
            fold_count,
            pull_factor,
        )?;
        self.right = Some(stack);
        self.attached(Edge::Right);
        Ok(())
    }

    /// Attach a top-edge cascade sized to `content`.
    pub fn set_top_content(
        &mut self,
        content: Box<dyn Renderable>,
        fold_count: usize,
        pull_factor: f64,
    ) -> Result<()> {
        let size = content.size();
        let y = self.content_offset().y - size.height;
        let frame = Rect::new(0.0, y, size.width, size.height);
        let stack = self.build_stack(
            Edge::Top,
            frame,
            FoldDirection::Vertical,
            content,
            fold_count,
            pull_factor,
        )?;
        self.top = Some(stack);
        self.attached(Edge::Top);
        Ok(())
    }

    /// Attach a single bottom-edge panel sized to `content`.
    pub fn set_bottom_content(&mut self, content: Box<dyn Renderable>) {
        let size = content.size();
        let y = self.size().height - size.height;
        let mut panel = FoldPanel::new(
            Rect::new(0.0, y, size.width, size.height),
            FoldDirection::Vertical,
        );
        panel.set_capture_quality(self.config.capture_quality);
        panel.set_perspective_distance(self.config.perspective_distance);
        panel.set_content(content);
        panel.set_hidden(true);
        self.bottom = Some(panel);
        self.attached(Edge::Bottom);
    }

    fn build_stack(
        &self,
        edge: Edge,
        frame: Rect,
        direction: FoldDirection,
        content: Box<dyn Renderable>,
        fold_count: usize,
        pull_factor: f64,
    ) -> Result<CascadeStack> {
        if fold_count == 0 {
            return Err(Error::InvalidFoldCount {
                edge,
                count: fold_count,
            });
        }
        let mut stack = CascadeStack::new(frame, direction, fold_count, pull_factor);
        stack.set_capture_quality(self.config.capture_quality);
        stack.set_perspective_distance(self.config.perspective_distance);
        stack.set_content(content);
        stack.set_hidden(true);
        Ok(stack)
    }

    fn attached(&mut self, edge: Edge) {
        self.drag_edges.insert(edge.drag_flag());
        tracing::debug!(?edge, extent = self.extent(edge), "edge content attached");
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    pub fn unfold_left(&mut self, animated: bool, completion: Option<Completion>) -> Result<()> {
        self.set_state(PaperFoldState::LeftUnfolded, animated, completion)
    }

    pub fn unfold_right(&mut self, animated: bool, completion: Option<Completion>) -> Result<()> {
        self.set_state(PaperFoldState::RightUnfolded, animated, completion)
    }

    pub fn unfold_top(&mut self, animated: bool, completion: Option<Completion>) -> Result<()> {
        self.set_state(PaperFoldState::TopUnfolded, animated, completion)
    }

    pub fn unfold_bottom(&mut self, animated: bool, completion: Option<Completion>) -> Result<()> {
        self.set_state(PaperFoldState::BottomUnfolded, animated, completion)
    }

    pub fn restore_to_center(
        &mut self,
        animated: bool,
        completion: Option<Completion>,
    ) -> Result<()> {
        self.set_state(PaperFoldState::Default, animated, completion)
    }

    /// Move to `target`, eased or at once.
    ///
    /// Drag permissions do not apply. A live animation is cancelled and its
    /// completion dropped.
    pub fn set_state(
        &mut self,
        target: PaperFoldState,
        animated: bool,
        completion: Option<Completion>,
    ) -> Result<()> {
        if !target.is_rest_state() {
            tracing::error!(state = ?target, "cannot settle into a transitional state");
            return Err(Error::NotARestState { state: target });
        }
        if let Some(edge) = target.edge() {
            if !self.is_attached(edge) {
                tracing::error!(?edge, "no content attached to edge");
                return Err(Error::not_attached(edge));
            }
        }

        self.cancel_animation();
        self.completion = completion;
        self.is_automated = true;

        if animated {
            self.start_animation(target);
        } else {
            let axis = target.edge().map_or(self.axis, Edge::axis);
            self.prepare_axis(axis);
            self.settle(target, axis);
            self.open_instantly(target);
        }
        Ok(())
    }

    /// Stop the live animation where it is. The transform is not rolled back.
    pub fn cancel_animation(&mut self) {
        if let Some(task) = self.animation.take() {
            self.ticker.cancel();
            tracing::debug!(target = ?task.target, ticks = task.animator.ticks(), "animation cancelled");
        }
        self.completion = None;
    }

    fn start_animation(&mut self, target: PaperFoldState) {
        let axis = target.edge().map_or(self.axis, Edge::axis);
        self.prepare_axis(axis);

        let from = axis.component(self.content_offset());
        let (to, profile) = match target.edge() {
            Some(edge) => (edge.sign() * self.extent(edge), self.config.easing_for(edge)),
            None => (0.0, self.config.restore),
        };
        tracing::debug!(target = ?target, ?axis, from, to, automated = self.is_automated, "animation started");
        self.animation = Some(AnimationTask {
            target,
            axis,
            animator: EasingAnimator::new(from, to, profile),
        });
        // Armed by the next `poll`, on the host's clock.
        self.ticker.cancel();
    }

    /// Advance the live animation by one step.
    ///
    /// Returns whether an animation is still alive afterwards.
    pub fn tick(&mut self) -> bool {
        let Some(task) = self.animation.as_mut() else {
            return false;
        };
        let step = task.animator.step();
        let (target, axis) = (task.target, task.axis);
        match step {
            EaseStep::Moving(value) => {
                self.axis = axis;
                self.animate(axis.point(value), false);
                true
            }
            EaseStep::Settled(_) | EaseStep::Idle => {
                self.animation = None;
                self.ticker.cancel();
                self.settle(target, axis);
                false
            }
        }
    }

    /// Run every tick that came due by `now`. Returns how many ran.
    ///
    /// The first poll after an animation starts anchors the tick schedule at
    /// `now` and runs nothing; ticks then fall due one interval apart.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if self.animation.is_none() {
            return 0;
        }
        if !self.ticker.is_active() {
            self.ticker.start(now);
            return 0;
        }
        let due = self.ticker.poll(now);
        let mut ran = 0;
        for _ in 0..due {
            ran += 1;
            if !self.tick() {
                break;
            }
        }
        ran
    }

    /// Time until the next animation tick, if an animation is alive.
    ///
    /// Before the schedule is anchored this is one full interval.
    #[must_use]
    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.animation.as_ref().map(|_| {
            self.ticker
                .next_deadline(now)
                .unwrap_or_else(|| self.ticker.interval())
        })
    }

    /// Snap to `target` and record it.
    fn settle(&mut self, target: PaperFoldState, axis: Axis) {
        self.sync_last_state();
        self.axis = axis;
        match target.edge() {
            Some(edge) => {
                let offset = axis.point(edge.sign() * self.extent(edge));
                self.set_content_offset(offset);
                if self.last_state != target {
                    self.finish(target);
                }
                self.state = target;
                self.animate(offset, false);
            }
            None => {
                self.set_content_offset(Point::ZERO);
                self.animate(Point::ZERO, false);
                if self.last_state != PaperFoldState::Default {
                    self.finish(PaperFoldState::Default);
                }
                self.state = PaperFoldState::Default;
            }
        }
        if let Some(completion) = self.completion.take() {
            completion();
        }
        self.is_automated = false;
    }

    fn open_instantly(&mut self, target: PaperFoldState) {
        match target.edge() {
            Some(Edge::Left) => self.left.as_mut().map(CascadeStack::unfold_instant),
            Some(Edge::Right) => self.right.as_mut().map(CascadeStack::unfold_instant),
            Some(Edge::Top) => self.top.as_mut().map(CascadeStack::unfold_instant),
            Some(Edge::Bottom) => self.bottom.as_mut().map(|panel| {
                let extent = panel.extent();
                panel.unfold(-extent);
            }),
            None => None,
        };
    }

    fn finish(&mut self, state: PaperFoldState) {
        let _span = tracing::debug_span!("paperfold.finish", state = ?state, automated = self.is_automated)
            .entered();
        tracing::info!(state = ?state, automated = self.is_automated, "fold finished");
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.on_folded_automatically(self.is_automated, state);
        }
        if let Some(completion) = self.completion.take() {
            completion();
        }
        self.is_automated = false;
    }

    // -----------------------------------------------------------------------
    // Offsets
    // -----------------------------------------------------------------------

    /// Position the content at `offset` along the active axis and unfold the
    /// edge it uncovers.
    ///
    /// Drags (`panned`) respect per-edge drag permissions; animation ticks
    /// and commands do not.
    pub fn animate(&mut self, offset: Point, panned: bool) {
        self.sync_last_state();
        match self.axis {
            Axis::Horizontal => self.animate_horizontal(offset.x, panned),
            Axis::Vertical => self.animate_vertical(offset.y, panned),
        }
    }

    fn animate_horizontal(&mut self, x: f64, panned: bool) {
        if x > 0.0 {
            if !self.may_move_toward(Edge::Left, panned) {
                return;
            }
            let extent = self.extent(Edge::Left);
            let mut x = x;
            if x >= extent {
                self.reach(Edge::Left);
                x = extent;
            }
            self.set_content_offset(Point::new(x, 0.0));
            close_stack(self.right.as_mut());
            if let Some(left) = self.left.as_mut() {
                left.unfold(x);
            }
            self.notify_offset(Point::new(x, 0.0));
        } else if x < 0.0 {
            if !self.may_move_toward(Edge::Right, panned) {
                return;
            }
            let extent = self.extent(Edge::Right);
            let mut clamped = x;
            if clamped <= -extent {
                self.reach(Edge::Right);
                clamped = -extent;
            }
            self.set_content_offset(Point::new(clamped, 0.0));
            close_stack(self.left.as_mut());
            if let Some(right) = self.right.as_mut() {
                right.unfold(x);
            }
            self.notify_offset(Point::new(x, 0.0));
        } else {
            self.set_content_offset(Point::ZERO);
            close_stack(self.left.as_mut());
            close_stack(self.right.as_mut());
            self.state = PaperFoldState::Default;
            self.notify_offset(Point::ZERO);
        }
    }

    fn animate_vertical(&mut self, y: f64, panned: bool) {
        if y < 0.0 {
            if !self.may_move_toward(Edge::Bottom, panned) {
                return;
            }
            let extent = self.extent(Edge::Bottom);
            let mut y = y;
            if -y >= extent {
                self.reach(Edge::Bottom);
                y = -extent;
            }
            self.set_content_offset(Point::new(0.0, y));
            close_stack(self.top.as_mut());
            if let Some(bottom) = self.bottom.as_mut() {
                bottom.unfold(y);
            }
            self.notify_offset(Point::new(0.0, y));
        } else if y > 0.0 {
            if !self.may_move_toward(Edge::Top, panned) {
                return;
            }
            let extent = self.extent(Edge::Top);
            let mut clamped = y;
            if clamped >= extent {
                self.reach(Edge::Top);
                clamped = extent;
            }
            self.set_content_offset(Point::new(0.0, clamped));
            close_panel(self.bottom.as_mut());
            if let Some(top) = self.top.as_mut() {
                top.unfold(y);
            }
            self.notify_offset(Point::new(0.0, y));
        } else {
            self.set_content_offset(Point::ZERO);
            close_panel(self.bottom.as_mut());
            close_stack(self.top.as_mut());
            self.state = PaperFoldState::Default;
            self.notify_offset(Point::ZERO);
        }
    }

    fn sync_last_state(&mut self) {
        if self.state != self.last_state {
            self.last_state = self.state;
        }
    }

    fn may_move_toward(&self, edge: Edge, panned: bool) -> bool {
        if panned && !self.drag_edges.allows(edge) {
            return false;
        }
        if !self.is_attached(edge) {
            tracing::trace!(?edge, "offset toward an empty edge ignored");
            return false;
        }
        true
    }

    /// The content reached `edge`'s full extent.
    fn reach(&mut self, edge: Edge) {
        let target = edge.unfolded_state();
        if self.last_state != target {
            self.finish(target);
        }
        self.last_state = self.state;
        self.state = target;
    }

    fn set_content_offset(&mut self, offset: Point) {
        self.surface
            .set_translation(AffineTranslation::new(offset.x, offset.y));
        self.position_moving_slots();
    }

    fn notify_offset(&mut self, offset: Point) {
        if let Some(delegate) = self.delegate.as_mut() {
            delegate.on_offset_changed(offset);
        }
    }

    /// Show the slots on `axis`, hide the others, and fold the other axis
    /// away if the content is still displaced along it.
    fn prepare_axis(&mut self, axis: Axis) {
        let offset = self.content_offset();
        let (other, displaced) = match axis {
            Axis::Horizontal => (Axis::Vertical, offset.y),
            Axis::Vertical => (Axis::Horizontal, offset.x),
        };
        if displaced != 0.0 {
            tracing::debug!(from = ?other, to = ?axis, "collapsing displaced axis");
            match other {
                Axis::Horizontal => {
                    close_stack(self.left.as_mut());
                    close_stack(self.right.as_mut());
                }
                Axis::Vertical => {
                    close_stack(self.top.as_mut());
                    close_panel(self.bottom.as_mut());
                }
            }
            let kept = axis.point(axis.component(offset));
            self.set_content_offset(kept);
        }
        self.axis = axis;
        self.show_axis(axis);
    }

    fn show_axis(&mut self, axis: Axis) {
        let horizontal = axis == Axis::Horizontal;
        for stack in [self.left.as_mut(), self.right.as_mut()].into_iter().flatten() {
            stack.set_hidden(!horizontal);
        }
        if let Some(top) = self.top.as_mut() {
            top.set_hidden(horizontal);
        }
        if let Some(bottom) = self.bottom.as_mut() {
            bottom.set_hidden(horizontal);
        }
    }

    // -----------------------------------------------------------------------
    // Gestures
    // -----------------------------------------------------------------------

    /// Feed one pan event. Dropped while an animation is alive.
    pub fn handle_pan(&mut self, event: &PanEvent) {
        if self.animation.is_some() {
            tracing::trace!(phase = ?event.phase, "pan ignored while animating");
            return;
        }
        let ctx = self.pan_context();
        let outcome = self.session.handle(event, &ctx);
        self.axis = self.session.last_axis();
        match outcome {
            PanOutcome::Locked(axis) => self.show_axis(axis),
            PanOutcome::Offset(offset) => {
                self.show_axis(self.axis);
                self.animate(offset, true);
            }
            PanOutcome::Released(decision) => {
                self.is_automated = false;
                self.start_animation(decision.target_state());
            }
        }
    }

    /// What the gesture session needs to know about the surface right now.
    #[must_use]
    pub fn pan_context(&self) -> PanContext {
        PanContext {
            state: self.state,
            content_offset: self.content_offset(),
            container: self.size(),
            extents: PerEdge {
                left: self.extent(Edge::Left),
                right: self.extent(Edge::Right),
                top: self.extent(Edge::Top),
                bottom: self.extent(Edge::Bottom),
            },
            thresholds: self.config.thresholds.per_edge(),
            drag_edges: self.drag_edges,
            horizontal_edge_dragging: self.horizontal_edge_dragging,
            edge_scroll_width: self.config.edge_scroll_width,
        }
    }

    // -----------------------------------------------------------------------
    // Swipe hint
    // -----------------------------------------------------------------------

    /// Show a swipe guide over the container, replacing any current one.
    pub fn show_swipe_hint(&mut self, mode: HintMode, image_size: Size) {
        let mut hint = SwipeHint::new(mode, image_size);
        hint.show(self.size());
        self.hint = Some(hint);
    }

    /// Fade the current swipe guide out.
    pub fn hide_swipe_hint(&mut self) {
        if let Some(hint) = self.hint.as_mut() {
            hint.hide();
        }
    }

    /// Advance the guide's fade. The guide is dropped once fully hidden.
    pub fn tick_swipe_hint(&mut self, delta: Duration) {
        if let Some(hint) = self.hint.as_mut() {
            if !hint.tick(delta) {
                self.hint = None;
            }
        }
    }

    #[must_use]
    pub fn swipe_hint(&self) -> Option<&SwipeHint> {
        self.hint.as_ref()
    }

    // -----------------------------------------------------------------------
    // Layout and hit testing
    // -----------------------------------------------------------------------

    /// Resize the container and re-place every slot.
    pub fn resize(&mut self, size: Size) {
        self.surface.set_size(size);
        if let Some(left) = self.left.as_mut() {
            let width = left.frame().width;
            left.set_frame(Rect::new(0.0, 0.0, width, size.height));
        }
        if let Some(right) = self.right.as_mut() {
            let frame = right.frame();
            right.set_frame(Rect::new(frame.x, 0.0, frame.width, size.height));
        }
        if let Some(bottom) = self.bottom.as_mut() {
            let height = bottom.frame().height;
            bottom.set_origin(Point::new(0.0, size.height - height));
        }
        self.position_moving_slots();
        tracing::debug!(width = size.width, height = size.height, "paperfold resized");
    }

    fn position_moving_slots(&mut self) {
        let size = self.surface.size();
        let offset = self.surface.offset();
        if let Some(right) = self.right.as_mut() {
            let frame = right.frame();
            right.set_frame(frame.with_origin(Point::new(size.width + offset.x, 0.0)));
        }
        if let Some(top) = self.top.as_mut() {
            let frame = top.frame();
            top.set_frame(frame.with_origin(Point::new(0.0, offset.y - frame.height)));
        }
    }

    /// Which layer a container point lands on.
    ///
    /// The right slot rides above the content; the content wins over every
    /// other slot within its own vertical span.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        if self.right.as_ref().is_some_and(|s| s.hit_test(point)) {
            return Some(HitTarget::Edge(Edge::Right));
        }
        let content = self.surface.frame();
        if self.surface.hit_test(point) && point.y >= content.y && point.y < content.bottom() {
            return Some(HitTarget::Content);
        }
        if self.left.as_ref().is_some_and(|s| s.hit_test(point)) {
            return Some(HitTarget::Edge(Edge::Left));
        }
        if self.top.as_ref().is_some_and(|s| s.hit_test(point)) {
            return Some(HitTarget::Edge(Edge::Top));
        }
        if self.bottom.as_ref().is_some_and(|p| p.hit_test(point)) {
            return Some(HitTarget::Edge(Edge::Bottom));
        }
        None
    }

    // -----------------------------------------------------------------------
    // Flags and accessors
    // -----------------------------------------------------------------------

    /// Allow or forbid opening `edge` by dragging.
    pub fn set_drag_enabled(&mut self, edge: Edge, enabled: bool) {
        self.drag_edges.set(edge.drag_flag(), enabled);
    }

    #[must_use]
    pub fn is_drag_enabled(&self, edge: Edge) -> bool {
        self.drag_edges.allows(edge)
    }

    #[must_use]
    pub fn drag_edges(&self) -> DragEdges {
        self.drag_edges
    }

    pub fn set_horizontal_edge_dragging(&mut self, enabled: bool) {
        self.horizontal_edge_dragging = enabled;
    }

    #[must_use]
    pub fn horizontal_edge_dragging(&self) -> bool {
        self.horizontal_edge_dragging
    }

    /// Limit simultaneous pan recognition to `rect` (container coordinates).
    pub fn set_restricted_dragging_rect(&mut self, rect: Option<Rect>) {
        self.restricted_dragging_rect = rect;
    }

    #[must_use]
    pub fn restricted_dragging_rect(&self) -> Option<Rect> {
        self.restricted_dragging_rect
    }

    /// Current state; `Transitioning` while an animation is alive.
    #[must_use]
    pub fn state(&self) -> PaperFoldState {
        if self.animation.is_some() {
            PaperFoldState::Transitioning
        } else {
            self.state
        }
    }

    /// The last state recorded before the current one.
    #[must_use]
    pub fn last_state(&self) -> PaperFoldState {
        self.last_state
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Axis the surface is currently moving along.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    #[must_use]
    pub fn content_offset(&self) -> Point {
        self.surface.offset()
    }

    #[must_use]
    pub fn size(&self) -> Size {
        self.surface.size()
    }

    #[must_use]
    pub fn surface(&self) -> &ContentSurface {
        &self.surface
    }

    #[must_use]
    pub fn config(&self) -> &FoldConfig {
        &self.config
    }

    /// Whether content is attached to `edge`.
    #[must_use]
    pub fn is_attached(&self, edge: Edge) -> bool {
        match edge {
            Edge::Bottom => self.bottom.is_some(),
            _ => self.stack(edge).is_some(),
        }
    }

    /// Fold extent of `edge` along its axis; 0 when nothing is attached.
    #[must_use]
    pub fn extent(&self, edge: Edge) -> f64 {
        match edge {
            Edge::Bottom => self.bottom.as_ref().map_or(0.0, FoldPanel::extent),
            _ => self.stack(edge).map_or(0.0, CascadeStack::total_extent),
        }
    }

    /// The cascade on `edge`. The bottom edge holds a single panel instead.
    #[must_use]
    pub fn stack(&self, edge: Edge) -> Option<&CascadeStack> {
        match edge {
            Edge::Left => self.left.as_ref(),
            Edge::Right => self.right.as_ref(),
            Edge::Top => self.top.as_ref(),
            Edge::Bottom => None,
        }
    }

    pub fn stack_mut(&mut self, edge: Edge) -> Option<&mut CascadeStack> {
        match edge {
            Edge::Left => self.left.as_mut(),
            Edge::Right => self.right.as_mut(),
            Edge::Top => self.top.as_mut(),
            Edge::Bottom => None,
        }
    }

    #[must_use]
    pub fn bottom_panel(&self) -> Option<&FoldPanel> {
        self.bottom.as_ref()
    }
}

/// Drive a cascade back to closed, through `WillClose` if it was open.
fn close_stack(stack: Option<&mut CascadeStack>) {
    let Some(stack) = stack else {
        return;
    };
    if stack.offset() != 0.0 || stack.state() != FoldState::Closed {
        stack.unfold(0.0);
    }
    if stack.state() == FoldState::Transitioning {
        stack.unfold(0.0);
    }
}

fn close_panel(panel: Option<&mut FoldPanel>) {
    let Some(panel) = panel else {
        return;
    };
    if panel.fraction() != 0.0 || panel.state() != FoldState::Closed {
        panel.unfold(0.0);
    }
    if panel.state() == FoldState::Transitioning {
        panel.unfold(0.0);
    }
}

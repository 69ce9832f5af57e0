//! Property-based invariant tests for the core value types.
//!
//! 1. Easing never overshoots and always settles exactly on target
//! 2. `ticks_to_settle` agrees with the simulated animator
//! 3. A release decision never opens an edge whose drag bit is off
//! 4. `Rect::split` tiles cover the source rect without gaps

use fold_core::gesture::PanOutcome;
use fold_core::{
    Axis, DragEdges, EaseStep, EasingAnimator, EasingProfile, GestureSession, PanContext, PanEvent,
    PerEdge, Point, Rect, ReleaseDecision, Size,
};
use proptest::prelude::*;

// ── Strategies ──────────────────────────────────────────────────────────

fn profile_strategy() -> impl Strategy<Value = EasingProfile> {
    (1.0f64..16.0, 0.5f64..10.0).prop_map(|(d, t)| EasingProfile::new(d, t))
}

fn drag_strategy() -> impl Strategy<Value = DragEdges> {
    (0u8..16).prop_map(DragEdges::from_bits_truncate)
}

// ═══════════════════════════════════════════════════════════════════════
// 1-2. Easing
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn easing_is_monotone_and_exact(
        from in -1000.0f64..1000.0,
        target in -1000.0f64..1000.0,
        profile in profile_strategy(),
    ) {
        let mut anim = EasingAnimator::new(from, target, profile);
        let mut last_gap = (target - from).abs();
        let mut settled = false;
        for _ in 0..10_000 {
            match anim.step() {
                EaseStep::Moving(v) => {
                    let gap = (target - v).abs();
                    prop_assert!(gap <= last_gap);
                    prop_assert!((v - from).abs() <= (target - from).abs() + 1e-9);
                    last_gap = gap;
                }
                EaseStep::Settled(v) => {
                    prop_assert_eq!(v, target);
                    settled = true;
                    break;
                }
                EaseStep::Idle => prop_assert!(false, "idle before settle"),
            }
        }
        prop_assert!(settled);
        prop_assert_eq!(anim.step(), EaseStep::Idle);
    }

    #[test]
    fn ticks_to_settle_is_an_upper_bound(
        distance in 0.0f64..2000.0,
        profile in profile_strategy(),
    ) {
        let mut anim = EasingAnimator::new(distance, 0.0, profile);
        while !anim.is_settled() {
            anim.step();
        }
        // One tick of slack for rounding at exact boundaries.
        prop_assert!(anim.ticks() <= profile.ticks_to_settle(distance) + 1);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 3. Release respects drag permissions
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn release_never_opens_forbidden_edge(
        drag in drag_strategy(),
        vx in -500.0f64..500.0,
        vy in -500.0f64..500.0,
        tx in -400.0f64..400.0,
        ty in -400.0f64..400.0,
    ) {
        let mut ctx = PanContext::new(Size::new(320.0, 480.0));
        ctx.extents = PerEdge { left: 100.0, right: 120.0, top: 90.0, bottom: 60.0 };
        ctx.drag_edges = drag;

        let mut session = GestureSession::new();
        session.begin(&PanEvent::began(Point::new(vx, vy), Point::new(160.0, 240.0)), &ctx);
        let out = session.handle(&PanEvent::ended(Point::new(tx, ty)), &ctx);
        match out {
            PanOutcome::Released(ReleaseDecision::Unfold(edge)) => prop_assert!(drag.allows(edge)),
            PanOutcome::Released(ReleaseDecision::Restore) => {}
            other => prop_assert!(false, "unexpected outcome {other:?}"),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// 4. Split tiling
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn split_tiles_cover_rect(
        w in 1.0f64..2000.0,
        h in 1.0f64..2000.0,
        count in 1usize..12,
        vertical in any::<bool>(),
    ) {
        let axis = if vertical { Axis::Vertical } else { Axis::Horizontal };
        let rect = Rect::new(0.0, 0.0, w, h);
        let tiles = rect.split(axis, count);
        prop_assert_eq!(tiles.len(), count);
        let total: f64 = tiles.iter().map(|t| axis.extent(t.size())).sum();
        prop_assert!((total - axis.extent(rect.size())).abs() < 1e-6);
        for pair in tiles.windows(2) {
            let end = match axis {
                Axis::Horizontal => pair[0].right(),
                Axis::Vertical => pair[0].bottom(),
            };
            let start = axis.component(pair[1].origin());
            prop_assert!((end - start).abs() < 1e-6);
        }
    }
}

//! Property-based invariants for arbitrary drags on a fully attached surface.
//!
//! 1. The content only ever moves along one axis.
//! 2. The offset never exceeds the extent of the edge it reveals.
//! 3. At most one edge on an axis is unfolded at a time.
//! 4. A disabled edge never opens by dragging.
//! 5. After release the surface settles into a rest state whose offset is
//!    exactly that state's extent (or zero for `Default`).

use paperfold::prelude::*;
use paperfold::{Axis, PackedRgba, Raster};
use proptest::prelude::*;

const LEFT: f64 = 90.0;
const RIGHT: f64 = 140.0;
const TOP: f64 = 70.0;
const BOTTOM: f64 = 50.0;

struct Solid(Size);

impl Renderable for Solid {
    fn size(&self) -> Size {
        self.0
    }

    fn draw(&self, target: &mut Raster, _scale: f64) {
        target.fill_rect(0, 0, target.width(), target.height(), PackedRgba::WHITE);
    }
}

fn surface(left_enabled: bool) -> PaperFold {
    let mut fold = PaperFold::new(Size::new(300.0, 400.0));
    fold.set_left_content(Box::new(Solid(Size::new(LEFT, 400.0))), 2, 0.4)
        .expect("left");
    fold.set_right_content(Box::new(Solid(Size::new(RIGHT, 400.0))), 4, 1.0)
        .expect("right");
    fold.set_top_content(Box::new(Solid(Size::new(300.0, TOP))), 3, 0.2)
        .expect("top");
    fold.set_bottom_content(Box::new(Solid(Size::new(300.0, BOTTOM))));
    fold.set_drag_enabled(Edge::Left, left_enabled);
    fold
}

fn stack_offset(fold: &PaperFold, edge: Edge) -> f64 {
    fold.stack(edge).map_or(0.0, |s| s.offset())
}

fn check_live(fold: &PaperFold, left_enabled: bool) -> Result<(), TestCaseError> {
    let offset = fold.content_offset();
    prop_assert!(offset.x == 0.0 || offset.y == 0.0, "moved diagonally: {offset:?}");
    prop_assert!(offset.x <= LEFT && offset.x >= -RIGHT, "x out of range: {offset:?}");
    prop_assert!(offset.y <= TOP && offset.y >= -BOTTOM, "y out of range: {offset:?}");
    prop_assert!(stack_offset(fold, Edge::Left) == 0.0 || stack_offset(fold, Edge::Right) == 0.0);
    if !left_enabled {
        prop_assert!(offset.x <= 0.0);
    }
    Ok(())
}

// ── Strategies ──────────────────────────────────────────────────────────

fn translation() -> impl Strategy<Value = Point> {
    (-300.0f64..300.0, -300.0f64..300.0).prop_map(|(x, y)| Point::new(x, y))
}

// ═══════════════════════════════════════════════════════════════════════
// 1-5. Drags
// ═══════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn drags_stay_bounded_and_settle(
        velocity in translation(),
        moves in proptest::collection::vec(translation(), 1..8),
        left_enabled in any::<bool>(),
    ) {
        let mut fold = surface(left_enabled);
        fold.handle_pan(&PanEvent::began(velocity, Point::new(150.0, 200.0)));
        let axis = fold.axis();
        for &translation in &moves {
            fold.handle_pan(&PanEvent::changed(translation));
            check_live(&fold, left_enabled)?;
            match axis {
                Axis::Horizontal => prop_assert_eq!(fold.content_offset().y, 0.0),
                Axis::Vertical => prop_assert_eq!(fold.content_offset().x, 0.0),
            }
        }

        let last = moves[moves.len() - 1];
        fold.handle_pan(&PanEvent::ended(last));
        let mut ticks = 0;
        while fold.tick() {
            ticks += 1;
            prop_assert!(ticks < 200, "never settled");
            check_live(&fold, left_enabled)?;
        }

        let state = fold.state();
        prop_assert!(state.is_rest_state());
        let expected = match state {
            PaperFoldState::LeftUnfolded => Point::new(LEFT, 0.0),
            PaperFoldState::RightUnfolded => Point::new(-RIGHT, 0.0),
            PaperFoldState::TopUnfolded => Point::new(0.0, TOP),
            PaperFoldState::BottomUnfolded => Point::new(0.0, -BOTTOM),
            PaperFoldState::Default | PaperFoldState::Transitioning => Point::ZERO,
        };
        prop_assert_eq!(fold.content_offset(), expected);
        if !left_enabled {
            prop_assert_ne!(state, PaperFoldState::LeftUnfolded);
        }
    }
}

#![forbid(unsafe_code)]

//! Fold lifecycle and global fold-state enums.
//!
//! # Invariants
//!
//! 1. [`FoldState`] only moves `Closed ↔ Transitioning ↔ Opened`; there is no
//!    direct `Closed → Opened` edge when driven through offsets.
//! 2. [`PaperFoldState::Transitioning`] is never a rest state.
//! 3. Each edge belongs to exactly one [`Axis`].

use bitflags::bitflags;

use crate::geometry::Axis;

/// Lifecycle of a single hinge panel or of a whole cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FoldState {
    /// Fully folded; fraction is exactly 0.
    #[default]
    Closed,
    /// Fully unfolded; fraction is exactly 1.
    Opened,
    /// Somewhere in between.
    Transitioning,
}

/// Hook fired when a lifecycle edge is crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FoldEvent {
    /// `Closed → Transitioning`.
    WillOpen,
    /// `Opened → Transitioning`.
    WillClose,
    /// `Transitioning → Opened`.
    DidOpen,
    /// `Transitioning → Closed`.
    DidClose,
}

/// Which way a panel (or cascade) folds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FoldDirection {
    /// Revealed on the right edge; content moves left (negative offsets).
    #[default]
    HorizontalRightToLeft,
    /// Revealed on the left edge; content moves right (positive offsets).
    HorizontalLeftToRight,
    /// Revealed on the top or bottom edge.
    Vertical,
}

impl FoldDirection {
    /// The axis this direction folds along.
    #[inline]
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::HorizontalRightToLeft | Self::HorizontalLeftToRight => Axis::Horizontal,
            Self::Vertical => Axis::Vertical,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self.axis(), Axis::Horizontal)
    }
}

/// One of the four container edges that can host a fold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    /// All edges in declaration order.
    pub const ALL: [Edge; 4] = [Edge::Left, Edge::Right, Edge::Top, Edge::Bottom];

    #[inline]
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Self::Left | Self::Right => Axis::Horizontal,
            Self::Top | Self::Bottom => Axis::Vertical,
        }
    }

    /// Sign of the content offset that reveals this edge.
    ///
    /// Left and top are revealed by positive offsets; right and bottom by
    /// negative ones.
    #[inline]
    #[must_use]
    pub const fn sign(self) -> f64 {
        match self {
            Self::Left | Self::Top => 1.0,
            Self::Right | Self::Bottom => -1.0,
        }
    }

    /// The global state reached when this edge is fully unfolded.
    #[inline]
    #[must_use]
    pub const fn unfolded_state(self) -> PaperFoldState {
        match self {
            Self::Left => PaperFoldState::LeftUnfolded,
            Self::Right => PaperFoldState::RightUnfolded,
            Self::Top => PaperFoldState::TopUnfolded,
            Self::Bottom => PaperFoldState::BottomUnfolded,
        }
    }

    /// The drag-permission bit for this edge.
    #[inline]
    #[must_use]
    pub const fn drag_flag(self) -> DragEdges {
        match self {
            Self::Left => DragEdges::LEFT,
            Self::Right => DragEdges::RIGHT,
            Self::Top => DragEdges::TOP,
            Self::Bottom => DragEdges::BOTTOM,
        }
    }
}

/// Global state of the whole paper-fold surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperFoldState {
    /// Content centred, every edge folded away.
    #[default]
    Default,
    LeftUnfolded,
    RightUnfolded,
    TopUnfolded,
    BottomUnfolded,
    /// An animation is settling the surface.
    Transitioning,
}

impl PaperFoldState {
    /// The edge this state leaves open, if any.
    #[inline]
    #[must_use]
    pub const fn edge(self) -> Option<Edge> {
        match self {
            Self::LeftUnfolded => Some(Edge::Left),
            Self::RightUnfolded => Some(Edge::Right),
            Self::TopUnfolded => Some(Edge::Top),
            Self::BottomUnfolded => Some(Edge::Bottom),
            Self::Default | Self::Transitioning => None,
        }
    }

    /// Whether this is a state the surface can rest in.
    #[inline]
    #[must_use]
    pub const fn is_rest_state(self) -> bool {
        !matches!(self, Self::Transitioning)
    }
}

/// One value per edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerEdge<T> {
    pub left: T,
    pub right: T,
    pub top: T,
    pub bottom: T,
}

impl<T: Copy> PerEdge<T> {
    /// Same value on every edge.
    #[must_use]
    pub const fn splat(value: T) -> Self {
        Self {
            left: value,
            right: value,
            top: value,
            bottom: value,
        }
    }

    #[inline]
    #[must_use]
    pub const fn get(&self, edge: Edge) -> T {
        match edge {
            Edge::Left => self.left,
            Edge::Right => self.right,
            Edge::Top => self.top,
            Edge::Bottom => self.bottom,
        }
    }

    pub fn set(&mut self, edge: Edge, value: T) {
        match edge {
            Edge::Left => self.left = value,
            Edge::Right => self.right = value,
            Edge::Top => self.top = value,
            Edge::Bottom => self.bottom = value,
        }
    }
}

bitflags! {
    /// Set of edges the user may open by dragging.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DragEdges: u8 {
        const LEFT   = 0b0001;
        const RIGHT  = 0b0010;
        const TOP    = 0b0100;
        const BOTTOM = 0b1000;
    }
}

impl DragEdges {
    /// Whether dragging may open `edge`.
    #[inline]
    #[must_use]
    pub const fn allows(self, edge: Edge) -> bool {
        self.contains(edge.drag_flag())
    }
}

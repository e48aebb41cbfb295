//! Room coordinates and extents

use serde::{Deserialize, Serialize};

/// A grid position supplied by the layout provider
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset by (dx, dy)
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Inclusive bounding box over a set of coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    /// Smallest box containing every coordinate, `None` when empty
    pub fn enclosing<I: IntoIterator<Item = Coord>>(coords: I) -> Option<Self> {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds {
            left: first.x,
            top: first.y,
            right: first.x,
            bottom: first.y,
        };
        for c in iter {
            bounds.left = bounds.left.min(c.x);
            bounds.top = bounds.top.min(c.y);
            bounds.right = bounds.right.max(c.x);
            bounds.bottom = bounds.bottom.max(c.y);
        }
        Some(bounds)
    }

    pub fn width(&self) -> u32 {
        self.left.abs_diff(self.right) + 1
    }

    pub fn height(&self) -> u32 {
        self.top.abs_diff(self.bottom) + 1
    }

    pub fn contains(&self, c: Coord) -> bool {
        c.x >= self.left && c.x <= self.right && c.y >= self.top && c.y <= self.bottom
    }
}

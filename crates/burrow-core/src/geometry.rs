//! Axis-aligned rectangles on a world that wraps horizontally.
//!
//! The world is a cylinder: x wraps at `world_width`, y is bounded by a
//! floor and a ceiling. A rectangle carries the world width so every
//! comparison can do its own wrap math. `x` may be negative or past the
//! world width during intermediate movement; only stored positions are
//! normalized.

use serde::{Deserialize, Serialize};

/// Axis-aligned box in world-pixel space. `(x, y)` is the bottom-left
/// corner; the box covers `[x, x + w) × [y, y + h)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
    /// Horizontal span of the world in pixels. Always positive.
    pub world_width: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32, world_width: i32) -> Self {
        debug_assert!(w >= 0 && h >= 0, "negative rect size {w}x{h}");
        debug_assert!(world_width > 0, "world width must be positive");
        Self {
            x,
            y,
            w,
            h,
            world_width,
        }
    }

    /// Exclusive right edge (unwrapped).
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Exclusive top edge.
    pub fn top(&self) -> i32 {
        self.y + self.h
    }

    /// Copy moved by `(dx, dy)`. No wrapping is applied.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Copy moved horizontally by `dx`.
    pub fn translate_x(&self, dx: i32) -> Self {
        self.translated(dx, 0)
    }

    /// `x` reduced into `[0, world_width)`.
    pub fn wrapped_x(&self) -> i32 {
        self.x.rem_euclid(self.world_width)
    }

    /// Copy shifted by a whole number of world widths so that its center is
    /// as close as possible to `other`'s center. Gaps and clamp targets
    /// measured against the result are valid across the wrap seam.
    pub fn aligned_to(&self, other: &Rect) -> Rect {
        // Doubled centers keep the math integral.
        let span = self.world_width * 2;
        let this_mid = self.x * 2 + self.w;
        let that_mid = other.x * 2 + other.w;
        let mut d = (this_mid - that_mid).rem_euclid(span);
        if d > span / 2 {
            d -= span;
        }
        self.translate_x((that_mid + d - this_mid) / 2)
    }

    /// True if the horizontal spans overlap somewhere on the cylinder.
    ///
    /// Both starts are reduced into `[0, world_width)`; the offset of each
    /// start from the other, walking rightwards around the seam, must fall
    /// inside the other's span. Empty spans never overlap.
    pub fn intersects_x(&self, other: &Rect) -> bool {
        debug_assert_eq!(
            self.world_width, other.world_width,
            "comparing rects from different worlds"
        );
        if self.w <= 0 || other.w <= 0 {
            return false;
        }
        let width = self.world_width;
        let this_x = self.wrapped_x();
        let that_x = other.wrapped_x();
        let ahead = (that_x - this_x).rem_euclid(width);
        let behind = (this_x - that_x).rem_euclid(width);
        ahead < self.w || behind < other.w
    }

    /// Ordinary interval overlap on `[y, y + h)`. The vertical axis does not
    /// wrap.
    pub fn intersects_y(&self, other: &Rect) -> bool {
        if self.h <= 0 || other.h <= 0 {
            return false;
        }
        self.top() > other.y && self.y < other.top()
    }

    /// True if the rectangles overlap, taking horizontal wrap into account.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersects_x(other) && self.intersects_y(other)
    }
}

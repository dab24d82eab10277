//! Shared geometry primitives.
//!
//! Small value types used across the simulation and packing engines, plus
//! the numeric guard that keeps coincident points from producing NaN.

use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

/// A point in layout space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Canvas bounds a layout is computed for.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent {
    /// Canvas width in layout units.
    pub width: f32,
    /// Canvas height in layout units.
    pub height: f32,
}

impl Extent {
    /// Create a new extent.
    #[inline]
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The canvas midpoint.
    #[inline]
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A tiny non-zero offset for coincident points.
///
/// Every distance computation in the forces floors through this instead of
/// dividing by zero. The magnitude (~1e-6) is far below any visible
/// displacement but enough to break the symmetry of stacked nodes.
#[inline]
pub(crate) fn jiggle(rng: &mut SmallRng) -> f32 {
    (rng.random::<f32>() - 0.5) * 1e-6
}

//! Centroid centering force.
//!
//! Keeps the mean position of all nodes on a fixed point so the layout
//! cannot drift off-canvas. The correction is the same for every node,
//! which leaves relative spacing untouched.

use rand::rngs::SmallRng;

use super::Force;
use crate::geometry::Point;
use crate::graph::ForceBuffers;

/// Default centering strength.
pub const DEFAULT_CENTER_STRENGTH: f32 = 1.0;

/// Force that nudges the node centroid toward a target point.
#[derive(Debug, Clone, Copy)]
pub struct CenterForce {
    target: Point,
    strength: f32,
}

impl CenterForce {
    /// Create a centering force toward the given point.
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            target: Point::new(x, y),
            strength: DEFAULT_CENTER_STRENGTH,
        }
    }

    /// Override the strength (1.0 = full correction per tick).
    pub fn with_strength(mut self, strength: f32) -> Self {
        self.strength = strength;
        self
    }
}

impl Force for CenterForce {
    fn name(&self) -> &'static str {
        "center"
    }

    fn apply(&self, buffers: &mut ForceBuffers<'_>, _alpha: f32, _rng: &mut SmallRng) {
        let n = buffers.pos_x.len();
        if n == 0 {
            return;
        }

        let mut sx = 0.0f32;
        let mut sy = 0.0f32;
        for i in 0..n {
            sx += buffers.pos_x[i];
            sy += buffers.pos_y[i];
        }
        let shift_x = (sx / n as f32 - self.target.x) * self.strength;
        let shift_y = (sy / n as f32 - self.target.y) * self.strength;

        for i in 0..n {
            buffers.vel_x[i] -= shift_x;
            buffers.vel_y[i] -= shift_y;
        }
    }
}

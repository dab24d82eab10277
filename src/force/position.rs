//! Per-axis positioning force.
//!
//! Pulls every node toward a target coordinate on one axis, scaled by
//! alpha. The word cloud registers one of these per axis at low strength
//! so words drift toward the canvas middle while collision spreads them.

use rand::rngs::SmallRng;

use super::Force;
use crate::graph::ForceBuffers;

/// Which axis the force acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Y,
}

/// Axis pull toward a fixed coordinate.
#[derive(Debug, Clone, Copy)]
pub struct PositionForce {
    axis: Axis,
    target: f32,
    strength: f32,
}

impl PositionForce {
    /// Pull X coordinates toward `target` with the given strength.
    pub fn x(target: f32, strength: f32) -> Self {
        Self {
            axis: Axis::X,
            target,
            strength,
        }
    }

    /// Pull Y coordinates toward `target` with the given strength.
    pub fn y(target: f32, strength: f32) -> Self {
        Self {
            axis: Axis::Y,
            target,
            strength,
        }
    }
}

impl Force for PositionForce {
    fn name(&self) -> &'static str {
        match self.axis {
            Axis::X => "x",
            Axis::Y => "y",
        }
    }

    fn apply(&self, buffers: &mut ForceBuffers<'_>, alpha: f32, _rng: &mut SmallRng) {
        match self.axis {
            Axis::X => {
                for i in 0..buffers.pos_x.len() {
                    buffers.vel_x[i] += (self.target - buffers.pos_x[i]) * self.strength * alpha;
                }
            }
            Axis::Y => {
                for i in 0..buffers.pos_y.len() {
                    buffers.vel_y[i] += (self.target - buffers.pos_y[i]) * self.strength * alpha;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::force::test_support::{graph_at, rng};

    #[test]
    fn test_pulls_toward_target_x() {
        let mut graph = graph_at(&[(0.0, 0.0, 10.0), (300.0, 0.0, 10.0)], &[]);
        let force = PositionForce::x(150.0, 0.05);

        let mut r = rng();
        force.apply(&mut graph.force_buffers(), 1.0, &mut r);

        let buffers = graph.force_buffers();
        assert!(buffers.vel_x[0] > 0.0);
        assert!(buffers.vel_x[1] < 0.0);
        assert_eq!(buffers.vel_y[0], 0.0);
    }

    #[test]
    fn test_pulls_toward_target_y() {
        let mut graph = graph_at(&[(0.0, 40.0, 10.0)], &[]);
        let force = PositionForce::y(150.0, 0.05);

        let mut r = rng();
        force.apply(&mut graph.force_buffers(), 1.0, &mut r);

        let buffers = graph.force_buffers();
        assert!(buffers.vel_y[0] > 0.0);
        assert_eq!(buffers.vel_x[0], 0.0);
    }

    #[test]
    fn test_scaled_by_alpha() {
        let mut hot = graph_at(&[(0.0, 0.0, 10.0)], &[]);
        let mut cool = graph_at(&[(0.0, 0.0, 10.0)], &[]);
        let force = PositionForce::x(100.0, 0.05);

        let mut r = rng();
        force.apply(&mut hot.force_buffers(), 1.0, &mut r);
        force.apply(&mut cool.force_buffers(), 0.1, &mut r);

        assert!(hot.force_buffers().vel_x[0] > cool.force_buffers().vel_x[0]);
    }
}

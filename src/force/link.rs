//! Spring force along links.
//!
//! Each link pulls its endpoints toward a rest distance. Strength defaults
//! to `weight / min(deg(source), deg(target))` so that hub nodes are not
//! over-pulled by their many links, and the displacement is split between
//! the endpoints by a degree bias: the better-connected end moves less.

use rand::rngs::SmallRng;

use super::Force;
use crate::geometry::jiggle;
use crate::graph::{ForceBuffers, SimGraph};

/// Default rest distance when neither the force nor the link sets one.
pub const DEFAULT_LINK_DISTANCE: f32 = 30.0;

/// One link with its force parameters resolved against the graph.
#[derive(Debug, Clone, Copy)]
struct Spring {
    source: usize,
    target: usize,
    strength: f32,
    bias: f32,
    distance: f32,
}

/// Spring force over the graph's links.
#[derive(Debug, Default)]
pub struct LinkForce {
    /// Rest distance applied to links without a per-link override.
    distance: f32,
    /// Resolved per-link parameters, filled in `bind`.
    springs: Vec<Spring>,
}

impl LinkForce {
    /// Create a link force with the given default rest distance.
    pub fn new(distance: f32) -> Self {
        Self {
            distance,
            springs: Vec::new(),
        }
    }
}

impl Force for LinkForce {
    fn name(&self) -> &'static str {
        "link"
    }

    fn bind(&mut self, graph: &SimGraph) {
        self.springs = graph
            .links()
            .iter()
            .map(|link| {
                // Degree is at least 1 for both endpoints (this link), but
                // guard anyway so a degenerate graph cannot divide by zero.
                let deg_s = graph.degree(link.source).max(1) as f32;
                let deg_t = graph.degree(link.target).max(1) as f32;
                Spring {
                    source: link.source,
                    target: link.target,
                    strength: link.weight / deg_s.min(deg_t),
                    bias: deg_s / (deg_s + deg_t),
                    distance: link.distance.unwrap_or(self.distance),
                }
            })
            .collect();
    }

    fn apply(&self, buffers: &mut ForceBuffers<'_>, alpha: f32, rng: &mut SmallRng) {
        for spring in &self.springs {
            let mut dx = buffers.pos_x[spring.target] - buffers.pos_x[spring.source];
            let mut dy = buffers.pos_y[spring.target] - buffers.pos_y[spring.source];
            if dx == 0.0 {
                dx = jiggle(rng);
            }
            if dy == 0.0 {
                dy = jiggle(rng);
            }

            let len = (dx * dx + dy * dy).sqrt();
            let pull = (len - spring.distance) / len * alpha * spring.strength;
            let fx = dx * pull;
            let fy = dy * pull;

            buffers.vel_x[spring.target] -= fx * spring.bias;
            buffers.vel_y[spring.target] -= fy * spring.bias;
            buffers.vel_x[spring.source] += fx * (1.0 - spring.bias);
            buffers.vel_y[spring.source] += fy * (1.0 - spring.bias);
        }
    }
}

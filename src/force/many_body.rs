//! Charge-like many-body force.
//!
//! Every pair of nodes repels (negative strength) or attracts (positive)
//! with magnitude inversely proportional to squared distance. Below
//! [`PAIRWISE_CUTOFF`] nodes the exact O(n²) pass is cheaper than building
//! a tree; at or above it the force switches to Barnes-Hut approximation
//! over the quadtree, treating distant cells as single aggregated charges
//! when `size² / theta² < d²`.

use rand::rngs::SmallRng;

use super::Force;
use crate::geometry::jiggle;
use crate::graph::ForceBuffers;
use crate::spatial::QuadTree;

/// Node count at which the quadtree pays for itself.
pub const PAIRWISE_CUTOFF: usize = 200;

/// Default charge strength (negative = repulsion).
pub const DEFAULT_CHARGE_STRENGTH: f32 = -30.0;

/// Many-body repulsion/attraction force.
#[derive(Debug, Clone, Copy)]
pub struct ManyBodyForce {
    /// Per-node charge. Negative repels.
    strength: f32,
    /// Squared Barnes-Hut accuracy parameter.
    theta2: f32,
    /// Squared minimum distance; closer pairs are clamped to this.
    distance_min2: f32,
}

impl Default for ManyBodyForce {
    fn default() -> Self {
        Self::new(DEFAULT_CHARGE_STRENGTH)
    }
}

impl ManyBodyForce {
    /// Create a many-body force with the given charge strength.
    pub fn new(strength: f32) -> Self {
        Self {
            strength,
            theta2: 0.81,
            distance_min2: 1.0,
        }
    }

    /// Override the Barnes-Hut accuracy parameter (squared).
    pub fn with_theta2(mut self, theta2: f32) -> Self {
        self.theta2 = theta2;
        self
    }

    fn apply_pairwise(&self, buffers: &mut ForceBuffers<'_>, alpha: f32, rng: &mut SmallRng) {
        let n = buffers.pos_x.len();
        for i in 0..n {
            for j in (i + 1)..n {
                let mut dx = buffers.pos_x[j] - buffers.pos_x[i];
                let mut dy = buffers.pos_y[j] - buffers.pos_y[i];
                if dx == 0.0 && dy == 0.0 {
                    dx = jiggle(rng);
                    dy = jiggle(rng);
                }
                let d2 = (dx * dx + dy * dy).max(self.distance_min2);
                let w = self.strength * alpha / d2;

                buffers.vel_x[i] += dx * w;
                buffers.vel_y[i] += dy * w;
                buffers.vel_x[j] -= dx * w;
                buffers.vel_y[j] -= dy * w;
            }
        }
    }

    fn apply_barnes_hut(&self, buffers: &mut ForceBuffers<'_>, alpha: f32, rng: &mut SmallRng) {
        let n = buffers.pos_x.len();
        let charges = vec![self.strength; n];
        let tree = QuadTree::build(buffers.pos_x, buffers.pos_y, &charges);

        for i in 0..n {
            let x = buffers.pos_x[i];
            let y = buffers.pos_y[i];
            let mut fx = 0.0f32;
            let mut fy = 0.0f32;

            tree.visit(|cell| {
                let (cx, cy) = cell.center();
                let dx = cx - x;
                let dy = cy - y;
                let d2 = dx * dx + dy * dy;
                let size = cell.size();

                if size * size < self.theta2 * d2 {
                    // Far enough: the whole cell acts as one charge.
                    let d2 = d2.max(self.distance_min2);
                    let w = cell.charge() * alpha / d2;
                    fx += dx * w;
                    fy += dy * w;
                    return false;
                }
                if cell.is_leaf() {
                    for &p in cell.points() {
                        if p as usize == i {
                            continue;
                        }
                        let mut dx = buffers.pos_x[p as usize] - x;
                        let mut dy = buffers.pos_y[p as usize] - y;
                        if dx == 0.0 && dy == 0.0 {
                            dx = jiggle(rng);
                            dy = jiggle(rng);
                        }
                        let d2 = (dx * dx + dy * dy).max(self.distance_min2);
                        let w = self.strength * alpha / d2;
                        fx += dx * w;
                        fy += dy * w;
                    }
                    return false;
                }
                true
            });

            buffers.vel_x[i] += fx;
            buffers.vel_y[i] += fy;
        }
    }
}

impl Force for ManyBodyForce {
    fn name(&self) -> &'static str {
        "charge"
    }

    fn apply(&self, buffers: &mut ForceBuffers<'_>, alpha: f32, rng: &mut SmallRng) {
        if buffers.pos_x.len() < PAIRWISE_CUTOFF {
            self.apply_pairwise(buffers, alpha, rng);
        } else {
            self.apply_barnes_hut(buffers, alpha, rng);
        }
    }
}

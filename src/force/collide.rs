//! Collision force between circular node footprints.
//!
//! Overlapping pairs are pushed apart along their center line, each node
//! taking a share inversely proportional to its footprint area. The
//! displacement is damped (a fraction of the overlap per pass, never the
//! full separation) so repeated application settles instead of
//! oscillating.
//!
//! Unlike the other forces, collision resolves against the positions plus
//! the velocity already accumulated this tick: it has to see in-flight
//! corrections, both its own across iterations and those of forces
//! registered before it. Adapters therefore register it last.
//!
//! Nodes with radius ≤ 0 have no footprint and are skipped entirely.

use rand::rngs::SmallRng;

use super::Force;
use crate::geometry::jiggle;
use crate::graph::ForceBuffers;
use crate::spatial::{CircleEntry, CircleIndex};

/// Fraction of each overlap corrected per pass.
const COLLIDE_STRENGTH: f32 = 0.7;

/// Overlap resolution between node footprints.
#[derive(Debug, Clone, Copy)]
pub struct CollideForce {
    /// Extra separation enforced between footprints.
    padding: f32,
    /// Resolution passes per tick.
    iterations: u32,
}

impl Default for CollideForce {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl CollideForce {
    /// Create a collision force with the given padding between footprints.
    pub fn new(padding: f32) -> Self {
        Self {
            padding,
            iterations: 1,
        }
    }

    /// Run more resolution passes per tick (tighter packing per tick at
    /// more cost).
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations.max(1);
        self
    }
}

impl Force for CollideForce {
    fn name(&self) -> &'static str {
        "collide"
    }

    fn apply(&self, buffers: &mut ForceBuffers<'_>, _alpha: f32, rng: &mut SmallRng) {
        let n = buffers.pos_x.len();

        for _ in 0..self.iterations {
            // Effective positions: where each node would land right now.
            let entries: Vec<CircleEntry> = (0..n)
                .filter(|&i| buffers.radius[i] > 0.0)
                .map(|i| {
                    CircleEntry::new(
                        i,
                        buffers.pos_x[i] + buffers.vel_x[i],
                        buffers.pos_y[i] + buffers.vel_y[i],
                        buffers.radius[i],
                    )
                })
                .collect();
            if entries.len() < 2 {
                return;
            }
            let index = CircleIndex::bulk(entries.clone());

            for entry in &entries {
                let i = entry.index;
                let ri = entry.radius;

                // Each overlapping pair is handled once, from its lower index.
                let hits: Vec<CircleEntry> = index
                    .overlapping(entry.x, entry.y, ri + self.padding)
                    .filter(|other| other.index > i)
                    .copied()
                    .collect();

                for other in hits {
                    let j = other.index;
                    let rj = other.radius;
                    let mut dx = other.x - entry.x;
                    let mut dy = other.y - entry.y;
                    if dx == 0.0 && dy == 0.0 {
                        dx = jiggle(rng);
                        dy = jiggle(rng);
                    }
                    let d = (dx * dx + dy * dy).sqrt().max(1e-6);
                    let separation = ri + rj + self.padding;
                    if d >= separation {
                        continue;
                    }

                    let push = (separation - d) / d * COLLIDE_STRENGTH;
                    let share_i = rj * rj / (ri * ri + rj * rj);

                    buffers.vel_x[i] -= dx * push * share_i;
                    buffers.vel_y[i] -= dy * push * share_i;
                    buffers.vel_x[j] += dx * push * (1.0 - share_i);
                    buffers.vel_y[j] += dy * push * (1.0 - share_i);
                }
            }
        }
    }
}

//! Composable forces for the simulation engine.
//!
//! A force reads the tick's positions and writes velocity adjustments;
//! it never moves a node directly. Velocities are zeroed at the start of
//! every tick, so the forces registered on a simulation compose
//! order-independently within a tick (collision being the documented
//! exception — see `collide`).
//!
//! Available forces:
//! - [`LinkForce`]: springs along links, degree-weighted
//! - [`ManyBodyForce`]: charge-like repulsion, Barnes-Hut accelerated
//! - [`CenterForce`]: keeps the centroid on a fixed point
//! - [`PositionForce`]: per-axis pull toward a coordinate
//! - [`CollideForce`]: overlap resolution between circular footprints

mod center;
mod collide;
mod link;
mod many_body;
mod position;

pub use center::CenterForce;
pub use collide::CollideForce;
pub use link::LinkForce;
pub use many_body::ManyBodyForce;
pub use position::PositionForce;

use rand::rngs::SmallRng;

use crate::graph::{ForceBuffers, SimGraph};

/// A per-tick velocity adjustment rule.
pub trait Force {
    /// Name used in diagnostics.
    fn name(&self) -> &'static str;

    /// Called once when the force is attached to a graph. Forces that
    /// precompute per-link or per-node parameters do it here.
    fn bind(&mut self, _graph: &SimGraph) {}

    /// Apply one tick's adjustments.
    ///
    /// `rng` is the simulation's seeded generator, used only to break
    /// ties between coincident nodes.
    fn apply(&self, buffers: &mut ForceBuffers<'_>, alpha: f32, rng: &mut SmallRng);
}

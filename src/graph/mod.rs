//! Simulation graph: input specs and the node/link store.
//!
//! Topology is kept in petgraph's StableGraph (degree queries for the link
//! force), positions and velocities in SoA (Structure of Arrays) buffers
//! for cache-friendly tick iteration.

mod engine;
mod link;
mod node;

pub use engine::{ForceBuffers, InitialPlacement, SimGraph};
pub use link::{Link, LinkSpec};
pub use node::{DEFAULT_NODE_SIZE, NodeSpec};

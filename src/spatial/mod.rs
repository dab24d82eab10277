//! Spatial acceleration structures.
//!
//! - `quadtree`: Barnes-Hut aggregation for the many-body force
//! - `rtree`: rstar-backed footprint index for collision queries and
//!   pointer hit testing

mod quadtree;
mod rtree;

pub use quadtree::{QuadCell, QuadTree};
pub use rtree::{CircleEntry, CircleIndex};

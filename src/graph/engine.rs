//! SimGraph - the node/link store a simulation runs over.
//!
//! Topology lives in petgraph's StableGraph (used for degree queries by the
//! link force), while positions and velocities sit in SoA (Structure of
//! Arrays) buffers for cache-friendly per-tick iteration and zero-copy
//! export to the rendering layer.
//!
//! All input validation happens in [`SimGraph::build`]: dangling link
//! references and non-finite coordinates are rejected here so the tick loop
//! never has to.

use petgraph::Undirected;
use petgraph::stable_graph::{NodeIndex, StableGraph};
use rand::Rng;
use rand::rngs::SmallRng;
use std::collections::HashMap;

use super::link::{Link, LinkSpec};
use super::node::NodeSpec;
use crate::error::LayoutError;
use crate::geometry::{Extent, Point};

/// Spacing constant for the phyllotaxis spiral.
const SPIRAL_RADIUS: f32 = 10.0;

/// Golden angle, in radians.
const SPIRAL_ANGLE: f32 = std::f32::consts::PI * (3.0 - 2.236_068);

/// Where nodes without an explicit starting position go.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitialPlacement {
    /// Deterministic phyllotaxis spiral around a center point. Used by the
    /// network profile: nearby indices land near each other and no two
    /// nodes coincide, without consuming any randomness.
    Spiral(Point),
    /// Seeded-uniform positions inside the canvas. Used by the word cloud.
    Uniform(Extent),
}

/// The node/link store for one simulation run.
#[derive(Debug)]
pub struct SimGraph {
    /// Topology. Node weights are the buffer indices; edge weights are the
    /// link weights. Undirected because degree and adjacency are symmetric
    /// for layout purposes.
    topology: StableGraph<usize, f32, Undirected>,

    /// Map from caller id to buffer index.
    id_to_index: HashMap<String, usize>,

    /// Caller ids in buffer order.
    ids: Vec<String>,

    /// X positions (SoA layout).
    pos_x: Vec<f32>,

    /// Y positions (SoA layout).
    pos_y: Vec<f32>,

    /// X velocities (SoA layout).
    vel_x: Vec<f32>,

    /// Y velocities (SoA layout).
    vel_y: Vec<f32>,

    /// Collision footprint radii.
    radius: Vec<f32>,

    /// Fixed positions for pinned nodes (None = free).
    fixed: Vec<Option<Point>>,

    /// Resolved links in input order.
    links: Vec<Link>,
}

impl SimGraph {
    /// Build a graph from caller specs.
    ///
    /// Validates every input: explicit coordinates must be finite and link
    /// endpoints must resolve. Nodes without coordinates are placed by
    /// `placement`, which is the only consumer of `rng` here.
    pub fn build(
        nodes: &[NodeSpec],
        links: &[LinkSpec],
        placement: InitialPlacement,
        rng: &mut SmallRng,
    ) -> Result<Self, LayoutError> {
        let n = nodes.len();
        let mut topology = StableGraph::with_capacity(n, links.len());
        let mut id_to_index = HashMap::with_capacity(n);
        let mut ids = Vec::with_capacity(n);
        let mut pos_x = Vec::with_capacity(n);
        let mut pos_y = Vec::with_capacity(n);
        let mut radius = Vec::with_capacity(n);
        let mut fixed = Vec::with_capacity(n);

        for (i, spec) in nodes.iter().enumerate() {
            for coord in [spec.x, spec.y, spec.fx, spec.fy].into_iter().flatten() {
                if !coord.is_finite() {
                    return Err(LayoutError::NonFinitePosition {
                        id: spec.id.clone(),
                    });
                }
            }

            let start = match (spec.fx, spec.fy) {
                (Some(fx), Some(fy)) => Point::new(fx, fy),
                _ => match (spec.x, spec.y) {
                    (Some(x), Some(y)) => Point::new(x, y),
                    _ => Self::place(i, placement, rng),
                },
            };

            topology.add_node(i);
            id_to_index.insert(spec.id.clone(), i);
            ids.push(spec.id.clone());
            pos_x.push(start.x);
            pos_y.push(start.y);
            radius.push(spec.size);
            fixed.push(match (spec.fx, spec.fy) {
                (Some(fx), Some(fy)) => Some(Point::new(fx, fy)),
                _ => None,
            });
        }

        let mut resolved = Vec::with_capacity(links.len());
        for (index, spec) in links.iter().enumerate() {
            let source = *id_to_index.get(&spec.source).ok_or_else(|| {
                LayoutError::DanglingLink {
                    index,
                    id: spec.source.clone(),
                }
            })?;
            let target = *id_to_index.get(&spec.target).ok_or_else(|| {
                LayoutError::DanglingLink {
                    index,
                    id: spec.target.clone(),
                }
            })?;

            topology.add_edge(NodeIndex::new(source), NodeIndex::new(target), spec.weight);
            resolved.push(Link {
                source,
                target,
                weight: spec.weight,
                distance: spec.distance,
            });
        }

        Ok(Self {
            topology,
            id_to_index,
            ids,
            pos_x,
            pos_y,
            vel_x: vec![0.0; n],
            vel_y: vec![0.0; n],
            radius,
            fixed,
            links: resolved,
        })
    }

    /// Initial position for node `i` under the chosen placement.
    fn place(i: usize, placement: InitialPlacement, rng: &mut SmallRng) -> Point {
        match placement {
            InitialPlacement::Spiral(center) => {
                let r = SPIRAL_RADIUS * (0.5 + i as f32).sqrt();
                let angle = i as f32 * SPIRAL_ANGLE;
                Point::new(center.x + r * angle.cos(), center.y + r * angle.sin())
            }
            InitialPlacement::Uniform(extent) => Point::new(
                rng.random::<f32>() * extent.width,
                rng.random::<f32>() * extent.height,
            ),
        }
    }

    // =========================================================================
    // Tick support
    // =========================================================================

    /// Reset every velocity accumulator. Called at the start of each tick.
    pub fn zero_velocities(&mut self) {
        self.vel_x.fill(0.0);
        self.vel_y.fill(0.0);
    }

    /// Apply friction and fold velocities into positions.
    ///
    /// Pinned nodes are snapped to their fixed position with velocity
    /// zeroed. Panics if any resulting coordinate is non-finite — that is a
    /// contract violation in a force, not an input error.
    pub fn integrate(&mut self, velocity_decay: f32) {
        for i in 0..self.pos_x.len() {
            if let Some(pin) = self.fixed[i] {
                self.vel_x[i] = 0.0;
                self.vel_y[i] = 0.0;
                self.pos_x[i] = pin.x;
                self.pos_y[i] = pin.y;
                continue;
            }
            self.vel_x[i] *= velocity_decay;
            self.vel_y[i] *= velocity_decay;
            self.pos_x[i] += self.vel_x[i];
            self.pos_y[i] += self.vel_y[i];
            assert!(
                self.pos_x[i].is_finite() && self.pos_y[i].is_finite(),
                "non-finite position for node `{}` after integration",
                self.ids[i]
            );
        }
    }

    // =========================================================================
    // Pinning
    // =========================================================================

    /// Pin a node at a fixed position, excluding it from integration.
    ///
    /// Returns false if the id is unknown.
    pub fn pin(&mut self, id: &str, x: f32, y: f32) -> bool {
        match self.id_to_index.get(id) {
            Some(&i) => {
                self.fixed[i] = Some(Point::new(x, y));
                self.pos_x[i] = x;
                self.pos_y[i] = y;
                true
            }
            None => false,
        }
    }

    /// Free a pinned node. Returns false if the id is unknown.
    pub fn unpin(&mut self, id: &str) -> bool {
        match self.id_to_index.get(id) {
            Some(&i) => {
                self.fixed[i] = None;
                true
            }
            None => false,
        }
    }

    /// Whether a node is currently pinned.
    pub fn is_pinned(&self, id: &str) -> bool {
        self.id_to_index
            .get(id)
            .map(|&i| self.fixed[i].is_some())
            .unwrap_or(false)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.pos_x.len()
    }

    /// X positions slice.
    pub fn positions_x(&self) -> &[f32] {
        &self.pos_x
    }

    /// Y positions slice.
    pub fn positions_y(&self) -> &[f32] {
        &self.pos_y
    }

    /// Collision radii slice.
    pub fn radii(&self) -> &[f32] {
        &self.radius
    }

    /// Resolved links in input order.
    pub fn links(&self) -> &[Link] {
        &self.links
    }

    /// Caller ids in buffer order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Buffer index for a caller id.
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.id_to_index.get(id).copied()
    }

    /// Number of links incident to node `i`.
    pub fn degree(&self, i: usize) -> usize {
        self.topology.edges(NodeIndex::new(i)).count()
    }

    /// Split borrows for force application: positions, radii, and pin
    /// states read-only, velocities writable.
    pub(crate) fn force_buffers(&mut self) -> ForceBuffers<'_> {
        ForceBuffers {
            pos_x: &self.pos_x,
            pos_y: &self.pos_y,
            radius: &self.radius,
            fixed: &self.fixed,
            vel_x: &mut self.vel_x,
            vel_y: &mut self.vel_y,
        }
    }

    /// Bounding box of all nodes, or None when empty.
    pub fn bounds(&self) -> Option<(f32, f32, f32, f32)> {
        if self.pos_x.is_empty() {
            return None;
        }
        let mut min_x = f32::INFINITY;
        let mut max_x = f32::NEG_INFINITY;
        let mut min_y = f32::INFINITY;
        let mut max_y = f32::NEG_INFINITY;
        for i in 0..self.pos_x.len() {
            min_x = min_x.min(self.pos_x[i]);
            max_x = max_x.max(self.pos_x[i]);
            min_y = min_y.min(self.pos_y[i]);
            max_y = max_y.max(self.pos_y[i]);
        }
        Some((min_x, min_y, max_x, max_y))
    }
}

/// Borrow-split view of the graph buffers handed to forces each tick.
///
/// Forces read positions and write velocities; handing out the fields
/// separately keeps that contract enforced by the borrow checker.
pub struct ForceBuffers<'a> {
    /// X positions, read-only for forces.
    pub pos_x: &'a [f32],
    /// Y positions, read-only for forces.
    pub pos_y: &'a [f32],
    /// Collision radii.
    pub radius: &'a [f32],
    /// Pin states (Some = pinned).
    pub fixed: &'a [Option<Point>],
    /// X velocity accumulators.
    pub vel_x: &'a mut [f32],
    /// Y velocity accumulators.
    pub vel_y: &'a mut [f32],
}

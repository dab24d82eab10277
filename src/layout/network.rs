//! Force-directed layout for the relationship network diagram.
//!
//! Springs along links (distance 70), charge repulsion (-150), centroid
//! centering on the canvas midpoint, and collision sized from each node's
//! own size attribute. Runs with alpha cooling to quiescence.

use serde::{Deserialize, Serialize};

use crate::error::Convergence;
use crate::force::{CenterForce, CollideForce, Force, LinkForce, ManyBodyForce};
use crate::geometry::Point;
use crate::graph::{InitialPlacement, LinkSpec, NodeSpec};
use crate::sim::{
    DEFAULT_ALPHA, DEFAULT_ALPHA_DECAY, DEFAULT_ALPHA_MIN, DEFAULT_MAX_TICKS, Simulation,
    SimulationConfig, TerminationMode,
};

/// Tuning for the network profile. Every field has a default matching the
/// dashboard's network diagram.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NetworkConfig {
    /// Canvas width.
    pub width: f32,
    /// Canvas height.
    pub height: f32,
    /// Spring rest distance.
    pub link_distance: f32,
    /// Charge strength (negative = repulsion).
    pub charge_strength: f32,
    /// Centroid centering strength.
    pub center_strength: f32,
    /// Extra separation between collision footprints.
    pub collide_padding: f32,
    /// Starting temperature.
    pub alpha: f32,
    /// Quiescence threshold.
    pub alpha_min: f32,
    /// Per-tick alpha multiplier.
    pub alpha_decay: f32,
    /// Friction factor per tick.
    pub velocity_decay: f32,
    /// Tick budget before the run reports non-convergence.
    pub max_ticks: u32,
    /// Seed for tie-breaking; the spiral placement itself is deterministic.
    pub seed: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
            link_distance: 70.0,
            charge_strength: -150.0,
            center_strength: 1.0,
            collide_padding: 0.0,
            alpha: DEFAULT_ALPHA,
            alpha_min: DEFAULT_ALPHA_MIN,
            alpha_decay: DEFAULT_ALPHA_DECAY,
            velocity_decay: 0.6,
            max_ticks: DEFAULT_MAX_TICKS,
            seed: 0,
        }
    }
}

/// One laid-out node, payload carried through from the spec.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    /// Caller id.
    pub id: String,
    /// Display label.
    pub label: Option<String>,
    /// Domain category.
    pub group: Option<String>,
    /// Rendering radius.
    pub size: f32,
    /// Final X.
    pub x: f32,
    /// Final Y.
    pub y: f32,
}

/// Result of a network layout run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkResult {
    /// Laid-out nodes in input order.
    pub nodes: Vec<PositionedNode>,
    /// Whether alpha reached the minimum within the tick budget.
    pub converged: bool,
    /// Ticks executed.
    pub ticks: u32,
}

/// The network profile.
pub struct NetworkLayout {
    config: NetworkConfig,
}

impl NetworkLayout {
    /// Create the profile with the given config.
    pub fn new(config: NetworkConfig) -> Self {
        Self { config }
    }

    /// Create the profile with dashboard defaults.
    pub fn with_defaults() -> Self {
        Self::new(NetworkConfig::default())
    }

    /// Build the simulation without running it, for callers that drive
    /// ticks themselves (progressive rendering, dragging).
    pub fn simulation(
        &self,
        nodes: &[NodeSpec],
        links: &[LinkSpec],
    ) -> Result<Simulation, crate::error::LayoutError> {
        let c = &self.config;
        let center = Point::new(c.width / 2.0, c.height / 2.0);
        let forces: Vec<Box<dyn Force>> = vec![
            Box::new(LinkForce::new(c.link_distance)),
            Box::new(ManyBodyForce::new(c.charge_strength)),
            Box::new(CenterForce::new(center.x, center.y).with_strength(c.center_strength)),
            Box::new(CollideForce::new(c.collide_padding)),
        ];
        Simulation::new(
            nodes,
            links,
            InitialPlacement::Spiral(center),
            forces,
            SimulationConfig {
                alpha: c.alpha,
                alpha_min: c.alpha_min,
                alpha_decay: c.alpha_decay,
                velocity_decay: c.velocity_decay,
                max_ticks: c.max_ticks,
                seed: c.seed,
                termination: TerminationMode::AlphaThreshold,
            },
        )
    }

    /// Run the layout to quiescence and return final positions.
    pub fn compute(
        &self,
        nodes: &[NodeSpec],
        links: &[LinkSpec],
    ) -> Result<NetworkResult, crate::error::LayoutError> {
        let mut sim = self.simulation(nodes, links)?;
        let outcome = sim.run_to_quiescence(|_, _| true);

        let graph = sim.graph();
        let positioned = nodes
            .iter()
            .enumerate()
            .map(|(i, spec)| PositionedNode {
                id: spec.id.clone(),
                label: spec.label.clone(),
                group: spec.group.clone(),
                size: spec.size,
                x: graph.positions_x()[i],
                y: graph.positions_y()[i],
            })
            .collect();

        Ok(NetworkResult {
            nodes: positioned,
            converged: matches!(outcome, Convergence::Settled { .. }),
            ticks: outcome.ticks(),
        })
    }
}

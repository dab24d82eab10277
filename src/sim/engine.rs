//! The tick integrator.
//!
//! Each tick: zero the velocity accumulators, apply every registered force
//! in order, apply friction, fold velocities into positions, cool alpha.
//! Alpha is the simulation temperature: it starts at 1, decays
//! geometrically, and the run is quiescent once it crosses `alpha_min`.
//!
//! Determinism: the only randomness is the seeded generator handed to
//! forces for coincident-point tie-breaking and to the initial placement.
//! Two simulations built from the same inputs and seed produce
//! bit-identical tick sequences.

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::error::{Convergence, LayoutError};
use crate::force::Force;
use crate::graph::{InitialPlacement, LinkSpec, NodeSpec, SimGraph};

/// Default starting temperature.
pub const DEFAULT_ALPHA: f32 = 1.0;

/// Default termination threshold.
pub const DEFAULT_ALPHA_MIN: f32 = 0.001;

/// Default per-tick alpha multiplier: 0.001^(1/300), so roughly 300 ticks
/// take alpha from 1 to the default minimum.
pub const DEFAULT_ALPHA_DECAY: f32 = 0.977_237_2;

/// Default friction factor applied to summed velocities.
pub const DEFAULT_VELOCITY_DECAY: f32 = 0.6;

/// Default tick budget guarding non-convergent configurations.
pub const DEFAULT_MAX_TICKS: u32 = 500;

/// When a run stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationMode {
    /// Cool alpha each tick; quiescent when alpha ≤ alpha_min.
    AlphaThreshold,
    /// Run exactly this many relaxation passes with alpha held constant.
    FixedIterations(u32),
}

/// Simulation tuning knobs. Every field has a default, so zero-config use
/// is valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationConfig {
    /// Starting temperature.
    pub alpha: f32,
    /// Quiescence threshold.
    pub alpha_min: f32,
    /// Per-tick alpha multiplier.
    pub alpha_decay: f32,
    /// Friction factor applied after forces are summed.
    pub velocity_decay: f32,
    /// Tick budget for `run_to_quiescence` in `AlphaThreshold` mode.
    pub max_ticks: u32,
    /// Seed for placement and tie-breaking.
    pub seed: u64,
    /// Termination policy.
    pub termination: TerminationMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            alpha_min: DEFAULT_ALPHA_MIN,
            alpha_decay: DEFAULT_ALPHA_DECAY,
            velocity_decay: DEFAULT_VELOCITY_DECAY,
            max_ticks: DEFAULT_MAX_TICKS,
            seed: 0,
            termination: TerminationMode::AlphaThreshold,
        }
    }
}

/// A running force simulation over one node/link set.
pub struct Simulation {
    graph: SimGraph,
    forces: Vec<Box<dyn Force>>,
    config: SimulationConfig,
    alpha: f32,
    ticks: u32,
    rng: SmallRng,
}

impl std::fmt::Debug for Simulation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Simulation")
            .field("graph", &self.graph)
            .field("forces", &self.forces.iter().map(|f| f.name()).collect::<Vec<_>>())
            .field("config", &self.config)
            .field("alpha", &self.alpha)
            .field("ticks", &self.ticks)
            .finish()
    }
}

impl Simulation {
    /// Build a simulation from caller specs.
    ///
    /// Fails on dangling link references or non-finite coordinates; a
    /// constructed simulation never fails at tick time.
    pub fn new(
        nodes: &[NodeSpec],
        links: &[LinkSpec],
        placement: InitialPlacement,
        mut forces: Vec<Box<dyn Force>>,
        config: SimulationConfig,
    ) -> Result<Self, LayoutError> {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        let graph = SimGraph::build(nodes, links, placement, &mut rng)?;
        for force in &mut forces {
            force.bind(&graph);
        }
        log::debug!(
            "simulation created: {} nodes, {} links, {} forces",
            graph.node_count(),
            graph.links().len(),
            forces.len()
        );
        Ok(Self {
            graph,
            forces,
            alpha: config.alpha,
            ticks: 0,
            rng,
            config,
        })
    }

    /// Advance exactly one tick and return the new alpha.
    pub fn step(&mut self) -> f32 {
        self.graph.zero_velocities();
        {
            let mut buffers = self.graph.force_buffers();
            for force in &self.forces {
                force.apply(&mut buffers, self.alpha, &mut self.rng);
            }
        }
        self.graph.integrate(self.config.velocity_decay);
        if self.config.termination == TerminationMode::AlphaThreshold {
            self.alpha *= self.config.alpha_decay;
        }
        self.ticks += 1;
        self.alpha
    }

    /// Run until quiescent, the budget runs out, or the callback cancels.
    ///
    /// `on_tick(tick, alpha)` runs after every step — the cooperative
    /// cancellation point; return false to stop between ticks. In
    /// `AlphaThreshold` mode the budget is `max_ticks` and exhausting it
    /// reports [`Convergence::Incomplete`]; in `FixedIterations` mode the
    /// run always settles when the pass count is spent.
    pub fn run_to_quiescence<F>(&mut self, mut on_tick: F) -> Convergence
    where
        F: FnMut(u32, f32) -> bool,
    {
        if self.graph.node_count() == 0 {
            return Convergence::Settled { ticks: 0 };
        }

        let budget = match self.config.termination {
            TerminationMode::AlphaThreshold => self.config.max_ticks,
            TerminationMode::FixedIterations(n) => n,
        };

        let mut executed = 0u32;
        while executed < budget {
            let alpha = self.step();
            executed += 1;
            if !on_tick(self.ticks, alpha) {
                return Convergence::Cancelled { ticks: executed };
            }
            if self.config.termination == TerminationMode::AlphaThreshold
                && alpha <= self.config.alpha_min
            {
                return Convergence::Settled { ticks: executed };
            }
        }

        match self.config.termination {
            TerminationMode::FixedIterations(_) => Convergence::Settled { ticks: executed },
            TerminationMode::AlphaThreshold => {
                log::warn!(
                    "simulation stopped after {executed} ticks with alpha {} > {}",
                    self.alpha,
                    self.config.alpha_min
                );
                Convergence::Incomplete { ticks: executed }
            }
        }
    }

    /// Pin a node at a fixed position. Returns false for unknown ids.
    pub fn pin(&mut self, id: &str, x: f32, y: f32) -> bool {
        self.graph.pin(id, x, y)
    }

    /// Free a pinned node. Returns false for unknown ids.
    pub fn unpin(&mut self, id: &str) -> bool {
        self.graph.unpin(id)
    }

    /// Reheat the simulation, e.g. after the user grabs a node.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    /// Current temperature.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Ticks advanced so far.
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// The node/link store.
    pub fn graph(&self) -> &SimGraph {
        &self.graph
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::force::{CenterForce, CollideForce, LinkForce, ManyBodyForce};
    use crate::geometry::Point;

    fn spiral() -> InitialPlacement {
        InitialPlacement::Spiral(Point::new(0.0, 0.0))
    }

    fn network_forces() -> Vec<Box<dyn Force>> {
        vec![
            Box::new(LinkForce::new(70.0)),
            Box::new(ManyBodyForce::new(-150.0)),
            Box::new(CenterForce::new(0.0, 0.0)),
            Box::new(CollideForce::new(0.0)),
        ]
    }

    /// A connected ring of n nodes with some chords.
    fn ring(n: usize) -> (Vec<NodeSpec>, Vec<LinkSpec>) {
        let nodes: Vec<NodeSpec> = (0..n).map(|i| NodeSpec::new(format!("n{i}"))).collect();
        let mut links: Vec<LinkSpec> = (0..n)
            .map(|i| LinkSpec::new(format!("n{i}"), format!("n{}", (i + 1) % n)))
            .collect();
        for i in (0..n).step_by(7) {
            links.push(LinkSpec::new(format!("n{i}"), format!("n{}", (i + n / 2) % n)));
        }
        (nodes, links)
    }

    #[test]
    fn test_step_decays_alpha() {
        let (nodes, links) = ring(5);
        let mut sim = Simulation::new(
            &nodes,
            &links,
            spiral(),
            network_forces(),
            SimulationConfig::default(),
        )
        .unwrap();

        let alpha = sim.step();
        assert!((alpha - DEFAULT_ALPHA_DECAY).abs() < 1e-6);
        assert_eq!(sim.ticks(), 1);
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let (nodes, links) = ring(20);
        let config = SimulationConfig {
            seed: 99,
            ..Default::default()
        };

        let run = |config: SimulationConfig| {
            let mut sim =
                Simulation::new(&nodes, &links, spiral(), network_forces(), config).unwrap();
            sim.run_to_quiescence(|_, _| true);
            (
                sim.graph().positions_x().to_vec(),
                sim.graph().positions_y().to_vec(),
            )
        };

        let (ax, ay) = run(config);
        let (bx, by) = run(config);
        assert_eq!(ax, bx, "x positions must be bit-identical");
        assert_eq!(ay, by, "y positions must be bit-identical");
    }

    #[test]
    fn test_connected_graph_converges_within_budget() {
        let (nodes, links) = ring(50);
        let mut sim = Simulation::new(
            &nodes,
            &links,
            spiral(),
            network_forces(),
            SimulationConfig::default(),
        )
        .unwrap();

        let outcome = sim.run_to_quiescence(|_, _| true);
        assert!(outcome.is_settled(), "outcome: {outcome:?}");
        assert!(outcome.ticks() <= 500);
    }

    #[test]
    fn test_empty_node_set_settles_immediately() {
        let mut sim = Simulation::new(
            &[],
            &[],
            spiral(),
            network_forces(),
            SimulationConfig::default(),
        )
        .unwrap();

        let outcome = sim.run_to_quiescence(|_, _| true);
        assert_eq!(outcome, Convergence::Settled { ticks: 0 });
    }

    #[test]
    fn test_two_linked_nodes_settle_at_rest_distance() {
        let nodes = vec![NodeSpec::new("a"), NodeSpec::new("b")];
        let links = vec![LinkSpec::new("a", "b")];
        let forces: Vec<Box<dyn Force>> = vec![Box::new(LinkForce::new(70.0))];
        let mut sim = Simulation::new(
            &nodes,
            &links,
            spiral(),
            forces,
            SimulationConfig::default(),
        )
        .unwrap();

        sim.run_to_quiescence(|_, _| true);

        let dx = sim.graph().positions_x()[1] - sim.graph().positions_x()[0];
        let dy = sim.graph().positions_y()[1] - sim.graph().positions_y()[0];
        let distance = (dx * dx + dy * dy).sqrt();
        assert!(
            (distance - 70.0).abs() < 1.0,
            "settled at distance {distance}"
        );
    }

    #[test]
    fn test_fixed_iterations_runs_exact_count_with_constant_alpha() {
        let (nodes, _) = ring(10);
        let config = SimulationConfig {
            termination: TerminationMode::FixedIterations(100),
            ..Default::default()
        };
        let mut sim = Simulation::new(&nodes, &[], spiral(), network_forces(), config).unwrap();

        let outcome = sim.run_to_quiescence(|_, _| true);
        assert_eq!(outcome, Convergence::Settled { ticks: 100 });
        assert_eq!(sim.alpha(), DEFAULT_ALPHA);
        assert_eq!(sim.ticks(), 100);
    }

    #[test]
    fn test_callback_cancels_between_ticks() {
        let (nodes, links) = ring(10);
        let mut sim = Simulation::new(
            &nodes,
            &links,
            spiral(),
            network_forces(),
            SimulationConfig::default(),
        )
        .unwrap();

        let outcome = sim.run_to_quiescence(|tick, _| tick < 3);
        assert_eq!(outcome, Convergence::Cancelled { ticks: 3 });
    }

    #[test]
    fn test_exhausted_budget_reports_incomplete() {
        let (nodes, links) = ring(10);
        let config = SimulationConfig {
            max_ticks: 5,
            ..Default::default()
        };
        let mut sim =
            Simulation::new(&nodes, &links, spiral(), network_forces(), config).unwrap();

        let outcome = sim.run_to_quiescence(|_, _| true);
        assert_eq!(outcome, Convergence::Incomplete { ticks: 5 });
    }

    #[test]
    fn test_pinned_node_does_not_move() {
        let nodes = vec![
            NodeSpec::new("a").pinned_at(10.0, 20.0),
            NodeSpec::new("b"),
        ];
        let links = vec![LinkSpec::new("a", "b")];
        let mut sim = Simulation::new(
            &nodes,
            &links,
            spiral(),
            network_forces(),
            SimulationConfig::default(),
        )
        .unwrap();

        sim.run_to_quiescence(|_, _| true);
        assert_eq!(sim.graph().positions_x()[0], 10.0);
        assert_eq!(sim.graph().positions_y()[0], 20.0);
    }

    #[test]
    fn test_pin_then_unpin_frees_node() {
        let nodes = vec![NodeSpec::new("a"), NodeSpec::new("b")];
        let links = vec![LinkSpec::new("a", "b")];
        let forces: Vec<Box<dyn Force>> = vec![Box::new(LinkForce::new(70.0))];
        let mut sim = Simulation::new(
            &nodes,
            &links,
            spiral(),
            forces,
            SimulationConfig::default(),
        )
        .unwrap();

        sim.pin("a", 0.0, 0.0);
        for _ in 0..10 {
            sim.step();
        }
        assert_eq!(sim.graph().positions_x()[0], 0.0);

        sim.unpin("a");
        sim.set_alpha(1.0);
        let before = sim.graph().positions_x()[0];
        for _ in 0..10 {
            sim.step();
        }
        // Freed node participates again (link pulls it).
        assert_ne!(sim.graph().positions_x()[0], before);
    }

    #[test]
    fn test_dangling_link_fails_construction() {
        let nodes = vec![NodeSpec::new("a")];
        let links = vec![LinkSpec::new("a", "missing")];
        let err = Simulation::new(
            &nodes,
            &links,
            spiral(),
            network_forces(),
            SimulationConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, LayoutError::DanglingLink { .. }));
    }
}

//! Veracity Layout - WASM Module
//!
//! The spatial layout engine behind the Veracity dashboard's
//! visualizations. It turns relational or hierarchical domain data into
//! non-overlapping 2-D coordinates; rendering is the caller's job. The
//! crate compiles to WebAssembly for the dashboard client and exposes a
//! JavaScript-friendly API via wasm-bindgen, while the engine modules stay
//! pure Rust and are tested natively.
//!
//! # Architecture
//!
//! - `graph`: node/link specs and the SoA simulation store
//! - `force`: composable velocity-adjustment rules (link, charge, center,
//!   axis, collision)
//! - `sim`: the tick integrator with alpha cooling and fixed-budget modes
//! - `pack`: hierarchical circle packing
//! - `layout`: the three dashboard profiles (network, word cloud, topic
//!   clusters)
//! - `spatial`: Barnes-Hut quadtree and rstar footprint index

use js_sys::Float32Array;
use wasm_bindgen::prelude::*;

pub mod error;
pub mod force;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod pack;
pub mod sim;
pub mod spatial;

pub use error::{Convergence, LayoutError};
pub use graph::{LinkSpec, NodeSpec};
pub use layout::{
    NetworkConfig, NetworkLayout, TopicClustersConfig, TopicClustersLayout, TopicSpec,
    WordCloudConfig, WordCloudLayout, WordSpec,
};
pub use pack::TreeSpec;
pub use sim::Simulation;

use spatial::{CircleEntry, CircleIndex};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    web_sys::console::debug_1(&"veracity-layout initialized".into());
}

fn js_error(err: impl std::fmt::Display) -> JsError {
    JsError::new(&err.to_string())
}

/// Deserialize a config value, treating undefined/null as "use defaults".
fn config_or_default<T>(value: JsValue) -> Result<T, JsError>
where
    T: Default + serde::de::DeserializeOwned,
{
    if value.is_undefined() || value.is_null() {
        Ok(T::default())
    } else {
        serde_wasm_bindgen::from_value(value).map_err(js_error)
    }
}

// =============================================================================
// One-Shot Layouts
// =============================================================================

/// Lay out a relationship network, running the simulation to quiescence.
///
/// `nodes` is an array of `{id, size?, label?, group?, x?, y?, fx?, fy?}`,
/// `links` an array of `{source, target, weight?, distance?}`, `config` an
/// optional options object. Returns `{nodes, converged, ticks}`.
#[wasm_bindgen(js_name = layoutNetwork)]
pub fn layout_network(nodes: JsValue, links: JsValue, config: JsValue) -> Result<JsValue, JsError> {
    let nodes: Vec<NodeSpec> = serde_wasm_bindgen::from_value(nodes).map_err(js_error)?;
    let links: Vec<LinkSpec> = serde_wasm_bindgen::from_value(links).map_err(js_error)?;
    let config: NetworkConfig = config_or_default(config)?;

    let result = NetworkLayout::new(config).compute(&nodes, &links)?;
    serde_wasm_bindgen::to_value(&result).map_err(js_error)
}

/// Lay out a word cloud with a fixed relaxation budget.
///
/// `words` is an array of `{text, frequency}`. Returns an array of
/// `{text, frequency, fontSize, x, y}`.
#[wasm_bindgen(js_name = layoutWordCloud)]
pub fn layout_word_cloud(words: JsValue, config: JsValue) -> Result<JsValue, JsError> {
    let words: Vec<WordSpec> = serde_wasm_bindgen::from_value(words).map_err(js_error)?;
    let config: WordCloudConfig = config_or_default(config)?;

    let placed = WordCloudLayout::new(config).compute(&words)?;
    serde_wasm_bindgen::to_value(&placed).map_err(js_error)
}

/// Pack flat topics into nested circles on the canvas.
///
/// `topics` is an array of `{name, value, category?}`. Returns an array of
/// circles `{name, category, value, x, y, r, depth, parent}`, root dropped.
#[wasm_bindgen(js_name = layoutTopicClusters)]
pub fn layout_topic_clusters(topics: JsValue, config: JsValue) -> Result<JsValue, JsError> {
    let topics: Vec<TopicSpec> = serde_wasm_bindgen::from_value(topics).map_err(js_error)?;
    let config: TopicClustersConfig = config_or_default(config)?;

    let circles = TopicClustersLayout::new(config).compute(&topics)?;
    serde_wasm_bindgen::to_value(&circles).map_err(js_error)
}

// =============================================================================
// Progressive Simulation
// =============================================================================

/// A network simulation driven tick-by-tick from JavaScript.
///
/// For progressive/animated rendering: the caller ticks from its frame
/// loop, reads positions through zero-copy views, and pins nodes while the
/// user drags them.
#[wasm_bindgen]
pub struct NetworkSimulation {
    sim: Simulation,
}

#[wasm_bindgen]
impl NetworkSimulation {
    /// Build a simulation from nodes, links, and an optional config.
    #[wasm_bindgen(constructor)]
    pub fn new(nodes: JsValue, links: JsValue, config: JsValue) -> Result<NetworkSimulation, JsError> {
        let nodes: Vec<NodeSpec> = serde_wasm_bindgen::from_value(nodes).map_err(js_error)?;
        let links: Vec<LinkSpec> = serde_wasm_bindgen::from_value(links).map_err(js_error)?;
        let config: NetworkConfig = config_or_default(config)?;

        let sim = NetworkLayout::new(config).simulation(&nodes, &links)?;
        Ok(Self { sim })
    }

    /// Advance one tick and return the new alpha.
    pub fn tick(&mut self) -> f32 {
        self.sim.step()
    }

    /// Current temperature.
    pub fn alpha(&self) -> f32 {
        self.sim.alpha()
    }

    /// Whether the simulation has cooled to quiescence.
    #[wasm_bindgen(js_name = isQuiescent)]
    pub fn is_quiescent(&self) -> bool {
        self.sim.alpha() <= sim::DEFAULT_ALPHA_MIN
    }

    /// Run the remaining ticks synchronously. Returns true if the run
    /// settled, false if the tick budget ran out first.
    #[wasm_bindgen(js_name = runToQuiescence)]
    pub fn run_to_quiescence(&mut self) -> bool {
        self.sim.run_to_quiescence(|_, _| true).is_settled()
    }

    /// Number of nodes.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.sim.graph().node_count()
    }

    /// Node ids in buffer order, matching the position views.
    #[wasm_bindgen(js_name = nodeIds)]
    pub fn node_ids(&self) -> Vec<String> {
        self.sim.graph().ids().to_vec()
    }

    /// Get a zero-copy view of X positions.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Use immediately, do not store.
    #[wasm_bindgen(js_name = getPositionsXView)]
    pub fn get_positions_x_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.sim.graph().positions_x()) }
    }

    /// Get a zero-copy view of Y positions.
    ///
    /// # Safety
    ///
    /// The returned view is invalidated if any Rust allocation occurs.
    /// Use immediately, do not store.
    #[wasm_bindgen(js_name = getPositionsYView)]
    pub fn get_positions_y_view(&self) -> Float32Array {
        unsafe { Float32Array::view(self.sim.graph().positions_y()) }
    }

    /// Pin a node under the pointer and reheat so neighbors adjust.
    #[wasm_bindgen(js_name = pinNode)]
    pub fn pin_node(&mut self, id: &str, x: f32, y: f32) -> bool {
        let pinned = self.sim.pin(id, x, y);
        if pinned {
            self.sim.set_alpha(0.3);
        }
        pinned
    }

    /// Release a pinned node.
    #[wasm_bindgen(js_name = unpinNode)]
    pub fn unpin_node(&mut self, id: &str) -> bool {
        self.sim.unpin(id)
    }

    /// Find the node whose center is nearest to a point, within a maximum
    /// distance. Returns its id, or undefined if nothing is close enough.
    #[wasm_bindgen(js_name = findNodeAt)]
    pub fn find_node_at(&self, x: f32, y: f32, max_distance: f32) -> Option<String> {
        let graph = self.sim.graph();
        let entries: Vec<CircleEntry> = (0..graph.node_count())
            .map(|i| {
                CircleEntry::new(
                    i,
                    graph.positions_x()[i],
                    graph.positions_y()[i],
                    graph.radii()[i],
                )
            })
            .collect();
        CircleIndex::bulk(entries)
            .nearest_within(x, y, max_distance)
            .map(|i| graph.ids()[i].clone())
    }

    /// Bounding box of the current layout as [min_x, min_y, max_x, max_y].
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Option<Vec<f32>> {
        self.sim
            .graph()
            .bounds()
            .map(|(min_x, min_y, max_x, max_y)| vec![min_x, min_y, max_x, max_y])
    }
}

#[cfg(test)]
mod integration_tests {
    use super::*;

    /// The full pipeline the facade drives, without wasm_bindgen JS types:
    /// build the network profile's simulation, tick it progressively, pin
    /// and drag a node, and hit-test against the settled layout.
    #[test]
    fn test_progressive_network_pipeline() {
        let nodes = vec![
            NodeSpec::new("outlet").with_size(18.0),
            NodeSpec::new("bot").with_size(12.0),
            NodeSpec::new("reader").with_size(8.0),
        ];
        let links = vec![LinkSpec::new("outlet", "bot"), LinkSpec::new("bot", "reader")];

        let mut sim = NetworkLayout::with_defaults()
            .simulation(&nodes, &links)
            .unwrap();

        // Progressive ticks from a frame loop.
        for _ in 0..10 {
            sim.step();
        }
        assert!(sim.alpha() < 1.0);

        // Drag: pin, settle, release.
        assert!(sim.pin("outlet", 100.0, 100.0));
        for _ in 0..10 {
            sim.step();
        }
        assert_eq!(sim.graph().positions_x()[0], 100.0);
        assert!(sim.unpin("outlet"));

        let outcome = sim.run_to_quiescence(|_, _| true);
        assert!(outcome.is_settled());

        // Hit test against the settled layout.
        let graph = sim.graph();
        let entries: Vec<CircleEntry> = (0..graph.node_count())
            .map(|i| {
                CircleEntry::new(
                    i,
                    graph.positions_x()[i],
                    graph.positions_y()[i],
                    graph.radii()[i],
                )
            })
            .collect();
        let index = CircleIndex::bulk(entries);
        let hit = index.nearest_within(graph.positions_x()[1], graph.positions_y()[1], 1.0);
        assert_eq!(hit, Some(1));
    }

    /// All three profiles run end to end on dashboard-shaped data.
    #[test]
    fn test_all_profiles_end_to_end() {
        let nodes = vec![NodeSpec::new("a"), NodeSpec::new("b")];
        let links = vec![LinkSpec::new("a", "b")];
        let network = NetworkLayout::with_defaults().compute(&nodes, &links).unwrap();
        assert_eq!(network.nodes.len(), 2);

        let words = vec![WordSpec::new("viral", 10.0), WordSpec::new("bot", 4.0)];
        let cloud = WordCloudLayout::with_defaults().compute(&words).unwrap();
        assert_eq!(cloud.len(), 2);

        let topics = vec![TopicSpec::new("politics", 30.0), TopicSpec::new("health", 20.0)];
        let clusters = TopicClustersLayout::with_defaults().compute(&topics).unwrap();
        assert_eq!(clusters.len(), 2);
    }
}

//! Node input spec.
//!
//! Nodes enter the engine as caller-supplied specs keyed by a stable string
//! id. Position and velocity live in the simulation graph's SoA buffers,
//! not here; the spec only carries what the caller knows up front:
//! - An optional starting position (validated finite at construction)
//! - An optional fixed position (the node is pinned and excluded from
//!   integration while set)
//! - A size used as the collision footprint radius
//! - Domain payload (label, group) passed through to the output untouched

use serde::{Deserialize, Serialize};

/// Default collision footprint radius when the caller supplies none.
pub const DEFAULT_NODE_SIZE: f32 = 10.0;

/// Caller-supplied description of one node.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeSpec {
    /// Stable key. Links reference nodes by this id.
    pub id: String,
    /// Optional starting X. Unset positions come from the seeded placement.
    #[serde(default)]
    pub x: Option<f32>,
    /// Optional starting Y.
    #[serde(default)]
    pub y: Option<f32>,
    /// Optional pinned X. Setting both fx and fy pins the node.
    #[serde(default)]
    pub fx: Option<f32>,
    /// Optional pinned Y.
    #[serde(default)]
    pub fy: Option<f32>,
    /// Collision/rendering radius.
    #[serde(default = "default_size")]
    pub size: f32,
    /// Display label, passed through.
    #[serde(default)]
    pub label: Option<String>,
    /// Domain category (e.g. "source", "amplifier", "consumer"), passed through.
    #[serde(default)]
    pub group: Option<String>,
}

fn default_size() -> f32 {
    DEFAULT_NODE_SIZE
}

impl NodeSpec {
    /// Create a spec with defaults for everything but the id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            x: None,
            y: None,
            fx: None,
            fy: None,
            size: DEFAULT_NODE_SIZE,
            label: None,
            group: None,
        }
    }

    /// Set the starting position.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Pin the node at a fixed position.
    pub fn pinned_at(mut self, fx: f32, fy: f32) -> Self {
        self.fx = Some(fx);
        self.fy = Some(fy);
        self
    }

    /// Set the collision/rendering radius.
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Set the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the domain category.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}

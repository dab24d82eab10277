//! Topic cluster layout.
//!
//! Hierarchical circle packing over the canvas: topics become circles with
//! area proportional to their value, grouped under a synthetic root that is
//! fitted to the canvas. The root wrapper is dropped from the output, the
//! way the dashboard renders only the topic circles.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::pack::{PackedCircle, PackedTree, TreeSpec, pack};

/// One topic with its weight.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopicSpec {
    /// Topic name.
    pub name: String,
    /// Weight; drives circle area.
    pub value: f32,
    /// Color/category key (e.g. "politics", "health").
    #[serde(default)]
    pub category: Option<String>,
}

impl TopicSpec {
    /// Create a topic spec.
    pub fn new(name: impl Into<String>, value: f32) -> Self {
        Self {
            name: name.into(),
            value,
            category: None,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// Tuning for the topic cluster profile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopicClustersConfig {
    /// Canvas width.
    pub width: f32,
    /// Canvas height.
    pub height: f32,
    /// Separation between sibling circles, in canvas units.
    pub padding: f32,
    /// Seed for the enclosing-circle shuffle.
    pub seed: u64,
}

impl Default for TopicClustersConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 300.0,
            padding: 3.0,
            seed: 0,
        }
    }
}

/// The topic cluster profile.
pub struct TopicClustersLayout {
    config: TopicClustersConfig,
}

impl TopicClustersLayout {
    /// Create the profile with the given config.
    pub fn new(config: TopicClustersConfig) -> Self {
        Self { config }
    }

    /// Create the profile with dashboard defaults.
    pub fn with_defaults() -> Self {
        Self::new(TopicClustersConfig::default())
    }

    /// Pack a flat topic list. Returns the topic circles, root dropped.
    pub fn compute(&self, topics: &[TopicSpec]) -> Result<Vec<PackedCircle>, LayoutError> {
        if topics.is_empty() {
            return Ok(Vec::new());
        }
        let tree = TreeSpec::branch(
            "",
            topics
                .iter()
                .map(|t| {
                    let mut leaf = TreeSpec::leaf(&t.name, t.value);
                    leaf.category = t.category.clone();
                    leaf
                })
                .collect(),
        );
        let packed = self.compute_tree(&tree)?;
        Ok(packed.descendants().to_vec())
    }

    /// Pack an arbitrary weighted tree, keeping the full hierarchy.
    pub fn compute_tree(&self, tree: &TreeSpec) -> Result<PackedTree, LayoutError> {
        let c = &self.config;
        pack(tree, c.width, c.height, c.padding, c.seed)
    }
}

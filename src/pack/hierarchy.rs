//! Weighted-tree circle packing.
//!
//! Bottom-up, each leaf gets an area-proportional radius (sqrt of its
//! weight) and each internal node the smallest circle enclosing its
//! front-chain-packed children. The tree is packed twice: once unpadded to
//! learn the natural root radius, then again with the requested padding
//! rescaled into packing units, so padding is expressed in output canvas
//! units. Finally the root is fitted to `min(width, height) / 2` and
//! centered on the canvas.
//!
//! Weights are validated up front: a negative or non-finite leaf value is
//! an input error, never a NaN that surfaces mid-layout.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use super::Circle;
use super::siblings::pack_siblings;
use crate::error::LayoutError;

/// Caller-supplied weighted tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeSpec {
    /// Display name, passed through.
    #[serde(default)]
    pub name: String,
    /// Domain category (e.g. "politics", "health"), passed through.
    #[serde(default)]
    pub category: Option<String>,
    /// Leaf weight. Ignored on internal nodes, whose weight is the sum of
    /// their children's.
    #[serde(default)]
    pub value: Option<f32>,
    /// Child subtrees. Empty = leaf.
    #[serde(default)]
    pub children: Vec<TreeSpec>,
}

impl TreeSpec {
    /// A leaf with a weight.
    pub fn leaf(name: impl Into<String>, value: f32) -> Self {
        Self {
            name: name.into(),
            category: None,
            value: Some(value),
            children: Vec::new(),
        }
    }

    /// An internal node over children.
    pub fn branch(name: impl Into<String>, children: Vec<TreeSpec>) -> Self {
        Self {
            name: name.into(),
            category: None,
            value: None,
            children,
        }
    }

    /// Set the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}

/// One positioned circle of a packed tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackedCircle {
    /// Display name from the spec.
    pub name: String,
    /// Category from the spec.
    pub category: Option<String>,
    /// Computed weight (leaf value or sum of children).
    pub value: f32,
    /// Center X in canvas units.
    pub x: f32,
    /// Center Y in canvas units.
    pub y: f32,
    /// Radius in canvas units.
    pub r: f32,
    /// Depth in the tree (root = 0).
    pub depth: u32,
    /// Index of the parent circle in the output, None for the root.
    pub parent: Option<usize>,
}

/// A packed tree, flattened in pre-order (root first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackedTree {
    /// All circles, root at index 0.
    pub circles: Vec<PackedCircle>,
}

impl PackedTree {
    /// Circles below the root (the root wrapper is usually synthetic).
    pub fn descendants(&self) -> &[PackedCircle] {
        &self.circles[1..]
    }
}

/// Arena node used during packing.
struct PackNode {
    name: String,
    category: Option<String>,
    parent: Option<usize>,
    children: Vec<usize>,
    depth: u32,
    weight: f64,
    circle: Circle,
}

/// Pack a weighted tree onto a canvas.
///
/// `padding` is the separation enforced between sibling circles, in canvas
/// units. The seed drives the enclosing-circle shuffle, making the layout
/// reproducible.
pub fn pack(
    tree: &TreeSpec,
    width: f32,
    height: f32,
    padding: f32,
    seed: u64,
) -> Result<PackedTree, LayoutError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut nodes = Vec::new();
    flatten(tree, None, 0, &mut nodes)?;

    // Bottom-up weights. Children follow parents in pre-order, so a
    // reverse scan sees every child before its parent.
    for i in (0..nodes.len()).rev() {
        if !nodes[i].children.is_empty() {
            nodes[i].weight = nodes[i].children.iter().map(|&c| nodes[c].weight).sum();
        }
        nodes[i].circle.r = nodes[i].weight.sqrt();
    }

    // First pass, unpadded: learn the natural root radius.
    pack_level(&mut nodes, 0.0, &mut rng);

    // Second pass with padding rescaled into packing units.
    let min_side = f64::from(width.min(height));
    let root_r = nodes[0].circle.r;
    if padding > 0.0 && root_r > 0.0 && min_side > 0.0 {
        let pad = f64::from(padding) * root_r / min_side;
        pack_level(&mut nodes, pad, &mut rng);
    }

    // Fit the root to the canvas and convert local child offsets to
    // absolute coordinates, parents before children.
    let root_r = nodes[0].circle.r;
    let k = if root_r > 0.0 { min_side / (2.0 * root_r) } else { 1.0 };
    nodes[0].circle.x = f64::from(width) / 2.0;
    nodes[0].circle.y = f64::from(height) / 2.0;
    nodes[0].circle.r *= k;
    for i in 1..nodes.len() {
        let parent = nodes[i].parent.expect("non-root node has a parent");
        let px = nodes[parent].circle.x;
        let py = nodes[parent].circle.y;
        let c = &mut nodes[i].circle;
        c.x = px + k * c.x;
        c.y = py + k * c.y;
        c.r *= k;
    }

    Ok(PackedTree {
        circles: nodes
            .into_iter()
            .map(|node| PackedCircle {
                name: node.name,
                category: node.category,
                value: node.weight as f32,
                x: node.circle.x as f32,
                y: node.circle.y as f32,
                r: node.circle.r as f32,
                depth: node.depth,
                parent: node.parent,
            })
            .collect(),
    })
}

/// Flatten the spec into the arena, validating leaf weights.
fn flatten(
    spec: &TreeSpec,
    parent: Option<usize>,
    depth: u32,
    nodes: &mut Vec<PackNode>,
) -> Result<usize, LayoutError> {
    let weight = if spec.children.is_empty() {
        let value = spec.value.unwrap_or(0.0);
        if !value.is_finite() {
            return Err(LayoutError::NonFiniteWeight {
                name: spec.name.clone(),
            });
        }
        if value < 0.0 {
            return Err(LayoutError::NegativeWeight {
                name: spec.name.clone(),
                value,
            });
        }
        f64::from(value)
    } else {
        0.0
    };

    let index = nodes.len();
    nodes.push(PackNode {
        name: spec.name.clone(),
        category: spec.category.clone(),
        parent,
        children: Vec::new(),
        depth,
        weight,
        circle: Circle::default(),
    });

    for child in &spec.children {
        let child_index = flatten(child, Some(index), depth + 1, nodes)?;
        nodes[index].children.push(child_index);
    }
    Ok(index)
}

/// One packing pass: children of every internal node, bottom-up.
///
/// Leaf radii are reset from weights first so repeated passes start from
/// the same base; `pad` inflates children during placement and widens the
/// parent by the same margin.
fn pack_level(nodes: &mut Vec<PackNode>, pad: f64, rng: &mut SmallRng) {
    for i in 0..nodes.len() {
        if nodes[i].children.is_empty() {
            nodes[i].circle.r = nodes[i].weight.sqrt();
        }
    }

    for i in (0..nodes.len()).rev() {
        if nodes[i].children.is_empty() {
            continue;
        }
        let children = nodes[i].children.clone();
        let mut circles: Vec<Circle> = children.iter().map(|&c| nodes[c].circle).collect();
        if pad > 0.0 {
            for c in &mut circles {
                c.r += pad;
            }
        }
        let enclosure = pack_siblings(&mut circles, rng);
        for (&child, mut circle) in children.iter().zip(circles) {
            if pad > 0.0 {
                circle.r -= pad;
            }
            nodes[child].circle = circle;
        }
        nodes[i].circle.r = enclosure + pad;
    }
}

//! Link input spec and its resolved form.
//!
//! Links reference nodes by string id. Resolution to buffer indices happens
//! once, when the simulation graph is built; a dangling reference is a
//! construction-time error, never a tick-time one. The resolved link keeps
//! no ownership of either endpoint — just indices into the node buffers.

use serde::{Deserialize, Serialize};

/// Caller-supplied description of one link.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSpec {
    /// Id of the source node.
    pub source: String,
    /// Id of the target node.
    pub target: String,
    /// Spring weight. Zero is valid and yields an inert spring.
    #[serde(default = "default_weight")]
    pub weight: f32,
    /// Optional per-link rest distance, overriding the force default.
    #[serde(default)]
    pub distance: Option<f32>,
}

fn default_weight() -> f32 {
    1.0
}

impl LinkSpec {
    /// Create a link with weight 1 and the force's default distance.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            weight: 1.0,
            distance: None,
        }
    }

    /// Set the spring weight.
    pub fn with_weight(mut self, weight: f32) -> Self {
        self.weight = weight;
        self
    }

    /// Set the rest distance.
    pub fn with_distance(mut self, distance: f32) -> Self {
        self.distance = Some(distance);
        self
    }
}

/// A link with both endpoints resolved to node buffer indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Index of the source node.
    pub source: usize,
    /// Index of the target node.
    pub target: usize,
    /// Spring weight from the spec.
    pub weight: f32,
    /// Per-link rest distance override.
    pub distance: Option<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_defaults() {
        let spec = LinkSpec::new("a", "b");
        assert_eq!(spec.weight, 1.0);
        assert!(spec.distance.is_none());
    }

    #[test]
    fn test_spec_builders() {
        let spec = LinkSpec::new("a", "b").with_weight(0.5).with_distance(40.0);
        assert_eq!(spec.weight, 0.5);
        assert_eq!(spec.distance, Some(40.0));
    }

    #[test]
    fn test_spec_deserializes_with_defaults() {
        let spec: LinkSpec = serde_json::from_str(r#"{"source": "a", "target": "b"}"#).unwrap();
        assert_eq!(spec.weight, 1.0);
    }
}

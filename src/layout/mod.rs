//! Layout profiles for the dashboard visualizations.
//!
//! Each profile is configuration, not mechanism: it declares which forces
//! (or which packing) apply and with what parameters, wires domain data
//! into the engines, and shapes the output for the renderer.
//!
//! - [`NetworkLayout`]: force-directed relationship graph, runs to quiescence
//! - [`WordCloudLayout`]: axis centering + collision, fixed relaxation budget
//! - [`TopicClustersLayout`]: hierarchical circle packing

mod network;
mod topic_clusters;
mod word_cloud;

pub use network::{NetworkConfig, NetworkLayout, NetworkResult, PositionedNode};
pub use topic_clusters::{TopicClustersConfig, TopicClustersLayout, TopicSpec};
pub use word_cloud::{WordCloudConfig, WordCloudLayout, WordPlacement, WordSpec};

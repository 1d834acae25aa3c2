//! Graph data structures supplied by the owning feature.

use serde::Deserialize;

fn default_value() -> f64 {
	1.0
}

/// A node descriptor.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphNode {
	/// Unique identifier for this node. Used to reference nodes in links and
	/// as the payload of activation events.
	pub id: String,
	/// Optional display label. Falls back to `id` when drawn.
	#[serde(default)]
	pub label: Option<String>,
	/// Small category index used to pick the node colour from the palette.
	#[serde(default)]
	pub group: u32,
	/// Weight of the node; drives its rendered radius. Must be positive.
	#[serde(default = "default_value")]
	pub value: f64,
}

impl GraphNode {
	/// Node with default group and value.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: None,
			group: 0,
			value: default_value(),
		}
	}

	/// Set the palette group.
	pub fn with_group(mut self, group: u32) -> Self {
		self.group = group;
		self
	}

	/// Set the size weight.
	pub fn with_value(mut self, value: f64) -> Self {
		self.value = value;
		self
	}

	/// Set the display label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}
}

/// An edge between two nodes, referenced by id.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GraphLink {
	/// Source node ID.
	pub source: String,
	/// Target node ID.
	pub target: String,
}

impl GraphLink {
	/// Link from `source` to `target`.
	pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			source: source.into(),
			target: target.into(),
		}
	}
}

/// Complete graph data: nodes and links.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct GraphData {
	/// Nodes in the order they should be hit-tested.
	#[serde(default)]
	pub nodes: Vec<GraphNode>,
	/// Links by node id; unknown ids are dropped at load.
	#[serde(default)]
	pub links: Vec<GraphLink>,
}

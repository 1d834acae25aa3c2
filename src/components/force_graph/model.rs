//! In-memory node/edge store with spatial hit-testing.
//!
//! Built once from caller-supplied [`GraphData`]. Inconsistent input (dangling
//! edges, duplicate ids, non-positive values) is repaired or dropped here and
//! reported as [`LoadWarning`]s, so nothing downstream has to re-check it.

use std::collections::HashMap;

use log::warn;
use rand::Rng;
use thiserror::Error;

use super::config::LayoutConfig;
use super::types::GraphData;

/// Position of a node in the model's insertion order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIdx(usize);

impl NodeIdx {
	/// Raw position, usable to index [`GraphModel::nodes`].
	pub fn index(self) -> usize {
		self.0
	}
}

/// A simulated node.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Caller-supplied unique id.
	pub id: String,
	/// Display text, falls back to the id.
	pub label: Option<String>,
	/// Palette index.
	pub group: u32,
	/// Size weight, always positive.
	pub value: f64,
	/// Rendered and picked radius in world units.
	pub radius: f64,
	/// World x.
	pub x: f64,
	/// World y.
	pub y: f64,
	/// Horizontal velocity in world units per reference frame.
	pub vx: f64,
	/// Vertical velocity in world units per reference frame.
	pub vy: f64,
	/// Excluded from physics integration while set.
	pub pinned: bool,
}

impl Node {
	/// Text drawn next to the node.
	pub fn display_name(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.id)
	}

	/// Euclidean distance from the node centre to a world point.
	pub fn distance_to(&self, x: f64, y: f64) -> f64 {
		(self.x - x).hypot(self.y - y)
	}
}

/// An edge between two live nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	/// Index of the `source` endpoint.
	pub source: NodeIdx,
	/// Index of the `target` endpoint.
	pub target: NodeIdx,
}

impl Edge {
	/// Whether `idx` is one of the endpoints.
	pub fn touches(&self, idx: NodeIdx) -> bool {
		self.source == idx || self.target == idx
	}
}

/// Something in the input data that had to be dropped or repaired.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum LoadWarning {
	/// A link names a node that does not exist.
	#[error("edge {source_id} -> {target_id} dropped: unknown node {missing}")]
	DanglingEdge {
		/// Source id as given.
		source_id: String,
		/// Target id as given.
		target_id: String,
		/// Whichever of the two is unknown.
		missing: String,
	},
	/// A second node reused an id; the first one is kept.
	#[error("duplicate node id {0} skipped")]
	DuplicateNode(String),
	/// A value that is zero, negative or not finite.
	#[error("node {id} has invalid value {value}, using 1.0")]
	InvalidValue {
		/// Node carrying the value.
		id: String,
		/// Value found.
		value: f64,
	},
}

/// Everything `initialize` had to fix up.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
	/// In the order they were found.
	pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
	/// No input had to be repaired.
	pub fn is_clean(&self) -> bool {
		self.warnings.is_empty()
	}

	fn push(&mut self, warning: LoadWarning) {
		warn!("focus-graph: {warning}");
		self.warnings.push(warning);
	}
}

/// Node and edge storage.
#[derive(Clone, Debug, Default)]
pub struct GraphModel {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	ids: HashMap<String, NodeIdx>,
}

impl GraphModel {
	/// Build the model from caller data, placing every node at a random point
	/// in the configured square with zero velocity.
	pub fn initialize<R: Rng + ?Sized>(
		data: &GraphData,
		layout: &LayoutConfig,
		rng: &mut R,
	) -> (Self, LoadReport) {
		let mut model = GraphModel::default();
		let mut report = LoadReport::default();
		let extent = layout.initial_extent;

		for node in &data.nodes {
			if model.ids.contains_key(&node.id) {
				report.push(LoadWarning::DuplicateNode(node.id.clone()));
				continue;
			}
			let value = if node.value.is_finite() && node.value > 0.0 {
				node.value
			} else {
				report.push(LoadWarning::InvalidValue {
					id: node.id.clone(),
					value: node.value,
				});
				1.0
			};

			let idx = NodeIdx(model.nodes.len());
			model.nodes.push(Node {
				id: node.id.clone(),
				label: node.label.clone(),
				group: node.group,
				value,
				radius: layout.base_radius * value.sqrt(),
				x: rng.random_range(-extent..=extent),
				y: rng.random_range(-extent..=extent),
				vx: 0.0,
				vy: 0.0,
				pinned: false,
			});
			model.ids.insert(node.id.clone(), idx);
		}

		for link in &data.links {
			match (model.index_of(&link.source), model.index_of(&link.target)) {
				(Some(source), Some(target)) => model.edges.push(Edge { source, target }),
				(source, _) => {
					let missing = if source.is_none() {
						&link.source
					} else {
						&link.target
					};
					report.push(LoadWarning::DanglingEdge {
						source_id: link.source.clone(),
						target_id: link.target.clone(),
						missing: missing.clone(),
					});
				}
			}
		}

		(model, report)
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether the model has no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// All nodes in insertion order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub(crate) fn nodes_mut(&mut self) -> &mut [Node] {
		&mut self.nodes
	}

	/// Edges that survived loading.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Node at `idx`.
	pub fn node(&self, idx: NodeIdx) -> &Node {
		&self.nodes[idx.0]
	}

	/// Look a node up by its id.
	pub fn index_of(&self, id: &str) -> Option<NodeIdx> {
		self.ids.get(id).copied()
	}

	/// Every valid index, in insertion order.
	pub fn indices(&self) -> impl Iterator<Item = NodeIdx> + use<> {
		(0..self.nodes.len()).map(NodeIdx)
	}

	/// Nodes sharing an edge with `idx`.
	pub fn neighbors(&self, idx: NodeIdx) -> impl Iterator<Item = NodeIdx> + '_ {
		self.edges.iter().filter_map(move |e| {
			if e.source == idx {
				Some(e.target)
			} else if e.target == idx {
				Some(e.source)
			} else {
				None
			}
		})
	}

	/// First node in insertion order whose disc, widened by `pick_tolerance`
	/// screen pixels, contains the world point.
	///
	/// The tolerance is divided by the zoom `scale` so the pickable ring keeps
	/// the same on-screen width at any zoom.
	pub fn find_node_at(&self, wx: f64, wy: f64, scale: f64, pick_tolerance: f64) -> Option<NodeIdx> {
		let slack = pick_tolerance / scale;
		self.nodes
			.iter()
			.position(|node| node.distance_to(wx, wy) <= node.radius + slack)
			.map(NodeIdx)
	}

	/// Freeze a node where it is.
	pub fn pin(&mut self, idx: NodeIdx) {
		self.nodes[idx.0].pinned = true;
	}

	/// Hand a node back to the physics engine.
	pub fn unpin(&mut self, idx: NodeIdx) {
		self.nodes[idx.0].pinned = false;
	}

	/// Overwrite a node's position from a drag: pins it and kills its momentum.
	pub fn place(&mut self, idx: NodeIdx, wx: f64, wy: f64) {
		let node = &mut self.nodes[idx.0];
		node.x = wx;
		node.y = wy;
		node.vx = 0.0;
		node.vy = 0.0;
		node.pinned = true;
	}
}

#[cfg(test)]
pub(crate) mod tests {
	use super::*;
	use crate::components::force_graph::types::{GraphLink, GraphNode};
	use pretty_assertions::assert_eq;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	pub(crate) fn load(data: &GraphData) -> (GraphModel, LoadReport) {
		let mut rng = SmallRng::seed_from_u64(11);
		GraphModel::initialize(data, &LayoutConfig::default(), &mut rng)
	}

	fn abc() -> GraphData {
		GraphData {
			nodes: vec![GraphNode::new("a"), GraphNode::new("b"), GraphNode::new("c")],
			links: vec![GraphLink::new("a", "b"), GraphLink::new("b", "c")],
		}
	}

	#[test]
	fn nodes_start_inside_extent_at_rest() {
		let (model, report) = load(&abc());
		assert!(report.is_clean());
		assert_eq!(model.len(), 3);
		assert_eq!(model.edges().len(), 2);
		for node in model.nodes() {
			assert!(node.x.abs() <= 200.0 && node.y.abs() <= 200.0);
			assert_eq!((node.vx, node.vy), (0.0, 0.0));
			assert!(!node.pinned);
		}
	}

	#[test]
	fn dangling_edges_are_dropped_not_fatal() {
		let mut data = abc();
		data.links.push(GraphLink::new("a", "ghost"));
		data.links.push(GraphLink::new("nobody", "c"));

		let (model, report) = load(&data);

		assert_eq!(model.edges().len(), 2);
		assert_eq!(
			report.warnings,
			vec![
				LoadWarning::DanglingEdge {
					source_id: "a".into(),
					target_id: "ghost".into(),
					missing: "ghost".into(),
				},
				LoadWarning::DanglingEdge {
					source_id: "nobody".into(),
					target_id: "c".into(),
					missing: "nobody".into(),
				},
			]
		);
	}

	#[test]
	fn duplicate_ids_keep_the_first_node() {
		let mut data = abc();
		data.nodes.push(GraphNode::new("a").with_group(9));

		let (model, report) = load(&data);

		assert_eq!(model.len(), 3);
		assert_eq!(model.node(model.index_of("a").unwrap()).group, 0);
		assert_eq!(report.warnings, vec![LoadWarning::DuplicateNode("a".into())]);
	}

	#[test]
	fn non_positive_values_are_repaired() {
		let data = GraphData {
			nodes: vec![GraphNode::new("z").with_value(0.0), GraphNode::new("n").with_value(f64::NAN)],
			links: vec![],
		};
		let (model, report) = load(&data);

		assert_eq!(report.warnings.len(), 2);
		for node in model.nodes() {
			assert_eq!(node.value, 1.0);
			assert!(node.radius > 0.0);
		}
	}

	#[test]
	fn radius_grows_with_value() {
		let data = GraphData {
			nodes: vec![GraphNode::new("s"), GraphNode::new("l").with_value(4.0)],
			links: vec![],
		};
		let (model, _) = load(&data);
		assert_eq!(model.nodes()[0].radius, 5.0);
		assert_eq!(model.nodes()[1].radius, 10.0);
	}

	#[test]
	fn empty_graph_loads() {
		let (model, report) = load(&GraphData::default());
		assert!(model.is_empty());
		assert!(report.is_clean());
		assert_eq!(model.find_node_at(0.0, 0.0, 1.0, 4.0), None);
	}

	#[test]
	fn hit_test_prefers_insertion_order() {
		let (mut model, _) = load(&abc());
		for idx in model.indices().collect::<Vec<_>>() {
			model.place(idx, 10.0, 10.0);
		}
		assert_eq!(model.find_node_at(10.0, 10.0, 1.0, 4.0), model.index_of("a"));
	}

	#[test]
	fn pick_tolerance_is_constant_on_screen() {
		let (mut model, _) = load(&abc());
		let a = model.index_of("a").unwrap();
		model.place(a, 0.0, 0.0);
		model.place(model.index_of("b").unwrap(), 1000.0, 0.0);
		model.place(model.index_of("c").unwrap(), -1000.0, 0.0);

		// radius 5 + 4px tolerance: 9 world units at k = 1, 5 + 0.4 at k = 10.
		assert_eq!(model.find_node_at(8.5, 0.0, 1.0, 4.0), Some(a));
		assert_eq!(model.find_node_at(8.5, 0.0, 10.0, 4.0), None);
		assert_eq!(model.find_node_at(5.3, 0.0, 10.0, 4.0), Some(a));
	}

	#[test]
	fn place_pins_and_stops_the_node() {
		let (mut model, _) = load(&abc());
		let b = model.index_of("b").unwrap();
		model.nodes_mut()[b.index()].vx = 3.0;

		model.place(b, 42.0, -7.0);

		let node = model.node(b);
		assert_eq!((node.x, node.y, node.vx, node.vy, node.pinned), (42.0, -7.0, 0.0, 0.0, true));
		model.unpin(b);
		assert!(!model.node(b).pinned);
	}

	#[test]
	fn neighbors_follow_edges_both_ways() {
		let (model, _) = load(&abc());
		let b = model.index_of("b").unwrap();
		let mut found: Vec<_> = model.neighbors(b).collect();
		found.sort();
		assert_eq!(found, vec![model.index_of("a").unwrap(), model.index_of("c").unwrap()]);
	}
}

//! Per-frame force computation and explicit Euler integration.
//!
//! Each step accumulates pairwise repulsion, edge springs and a weak pull
//! towards the origin, then damps and integrates the velocities of every free
//! node. Pinned and dragged nodes act as fixed anchors: they push and pull
//! their neighbours but are never moved here.
//!
//! Velocities are expressed in world units per reference frame (1/60 s by
//! default). A frame of `dt` seconds advances `dt * reference_fps` reference
//! frames, so the constants in [`PhysicsConfig`] behave the same at any
//! display rate up to the `max_dt` clamp.

use super::config::PhysicsConfig;
use super::model::{GraphModel, NodeIdx};

/// Magnitude of the repulsion between two nodes `sqrt(dist_sq)` apart.
///
/// `epsilon` keeps the result finite for coincident nodes.
pub fn repulsion_magnitude(strength: f64, epsilon: f64, dist_sq: f64) -> f64 {
	strength / (dist_sq + epsilon)
}

/// Unit vector from `b` to `a`. Coincident points get a direction derived
/// from the pair so they separate instead of sticking together.
fn separation_axis(dx: f64, dy: f64, dist: f64, i: usize, j: usize) -> (f64, f64) {
	if dist > f64::EPSILON {
		(dx / dist, dy / dist)
	} else {
		let angle = (i * 31 + j * 17) as f64 * 0.7;
		(angle.cos(), angle.sin())
	}
}

/// Force-directed layout integrator.
#[derive(Clone, Debug)]
pub struct PhysicsEngine {
	config: PhysicsConfig,
	forces: Vec<(f64, f64)>,
}

impl PhysicsEngine {
	/// Engine with the given constants.
	pub fn new(config: PhysicsConfig) -> Self {
		Self {
			config,
			forces: Vec::new(),
		}
	}

	/// Constants in use.
	pub fn config(&self) -> &PhysicsConfig {
		&self.config
	}

	/// Advance the layout by `dt` seconds (clamped to `max_dt`).
	pub fn step(&mut self, model: &mut GraphModel, dragged: Option<NodeIdx>, dt: f64) {
		if model.is_empty() || !(dt > 0.0) {
			return;
		}
		let frames = dt.min(self.config.max_dt) * self.config.reference_fps;

		self.accumulate(model);
		self.integrate(model, dragged, frames);
	}

	fn accumulate(&mut self, model: &GraphModel) {
		let cfg = &self.config;
		let nodes = model.nodes();
		self.forces.clear();
		self.forces.resize(nodes.len(), (0.0, 0.0));
		let forces = &mut self.forces;

		for i in 0..nodes.len() {
			for j in (i + 1)..nodes.len() {
				let (dx, dy) = (nodes[i].x - nodes[j].x, nodes[i].y - nodes[j].y);
				let dist_sq = dx * dx + dy * dy;
				let magnitude = repulsion_magnitude(cfg.repulsion, cfg.epsilon, dist_sq);
				let (ux, uy) = separation_axis(dx, dy, dist_sq.sqrt(), i, j);
				forces[i].0 += ux * magnitude;
				forces[i].1 += uy * magnitude;
				forces[j].0 -= ux * magnitude;
				forces[j].1 -= uy * magnitude;
			}
		}

		for edge in model.edges() {
			let (s, t) = (edge.source.index(), edge.target.index());
			let (dx, dy) = (nodes[t].x - nodes[s].x, nodes[t].y - nodes[s].y);
			let dist = dx.hypot(dy);
			if dist <= f64::EPSILON {
				// Repulsion separates them first; a spring has no direction here.
				continue;
			}
			let magnitude = cfg.spring_strength * (dist - cfg.rest_length);
			let (ux, uy) = (dx / dist, dy / dist);
			forces[s].0 += ux * magnitude;
			forces[s].1 += uy * magnitude;
			forces[t].0 -= ux * magnitude;
			forces[t].1 -= uy * magnitude;
		}

		for (force, node) in forces.iter_mut().zip(nodes) {
			force.0 -= cfg.centering * node.x;
			force.1 -= cfg.centering * node.y;
		}
	}

	fn integrate(&self, model: &mut GraphModel, dragged: Option<NodeIdx>, frames: f64) {
		let cfg = &self.config;
		let dragged = dragged.map(NodeIdx::index);

		for (i, (node, &(fx, fy))) in model.nodes_mut().iter_mut().zip(&self.forces).enumerate() {
			if node.pinned || dragged == Some(i) {
				continue;
			}

			node.vx = (node.vx + fx * frames) * cfg.damping;
			node.vy = (node.vy + fy * frames) * cfg.damping;

			let speed = node.vx.hypot(node.vy);
			if speed > cfg.max_speed {
				let s = cfg.max_speed / speed;
				node.vx *= s;
				node.vy *= s;
			}

			node.x += node.vx * frames;
			node.y += node.vy * frames;
		}
	}
}

/// Total kinetic energy `Σ|v|²` of the layout; near zero once it has settled.
pub fn kinetic_energy(model: &GraphModel) -> f64 {
	model
		.nodes()
		.iter()
		.map(|n| n.vx * n.vx + n.vy * n.vy)
		.sum()
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::force_graph::model::tests::load;
	use crate::components::force_graph::types::{GraphData, GraphLink, GraphNode};
	use proptest::prelude::*;

	const FRAME: f64 = 1.0 / 60.0;

	fn graph(ids: &[&str], links: &[(&str, &str)]) -> GraphModel {
		let data = GraphData {
			nodes: ids.iter().map(|id| GraphNode::new(*id)).collect(),
			links: links.iter().map(|(s, t)| GraphLink::new(*s, *t)).collect(),
		};
		load(&data).0
	}

	proptest! {
		#[test]
		fn repulsion_decreases_with_distance(near in 0.0f64..5000.0, gap in 0.001f64..5000.0) {
			let cfg = PhysicsConfig::default();
			let far = near + gap;
			prop_assert!(
				repulsion_magnitude(cfg.repulsion, cfg.epsilon, far * far)
					< repulsion_magnitude(cfg.repulsion, cfg.epsilon, near * near)
			);
		}
	}

	#[test]
	fn repulsion_is_finite_at_zero_distance() {
		let cfg = PhysicsConfig::default();
		assert!(repulsion_magnitude(cfg.repulsion, cfg.epsilon, 0.0).is_finite());
	}

	#[test]
	fn coincident_nodes_separate_without_nan() {
		let mut model = graph(&["a", "b"], &[]);
		for idx in model.indices().collect::<Vec<_>>() {
			model.place(idx, 0.0, 0.0);
			model.unpin(idx);
		}
		let mut engine = PhysicsEngine::new(PhysicsConfig::default());

		for _ in 0..10 {
			engine.step(&mut model, None, FRAME);
		}

		let (a, b) = (&model.nodes()[0], &model.nodes()[1]);
		assert!(a.x.is_finite() && a.y.is_finite() && b.x.is_finite() && b.y.is_finite());
		assert!(a.distance_to(b.x, b.y) > 1.0);
	}

	#[test]
	fn pinned_node_never_moves() {
		let mut model = graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]);
		let b = model.index_of("b").unwrap();
		model.place(b, 30.0, -40.0);
		let mut engine = PhysicsEngine::new(PhysicsConfig::default());

		for _ in 0..300 {
			engine.step(&mut model, None, FRAME);
		}

		let node = model.node(b);
		assert_eq!((node.x, node.y, node.vx, node.vy), (30.0, -40.0, 0.0, 0.0));
	}

	#[test]
	fn pinned_node_anchors_its_neighbours() {
		let mut model = graph(&["anchor", "free", "near"], &[("anchor", "free")]);
		let (anchor, free, near) = (
			model.index_of("anchor").unwrap(),
			model.index_of("free").unwrap(),
			model.index_of("near").unwrap(),
		);
		model.place(anchor, 0.0, 0.0);
		model.place(free, 600.0, 0.0);
		model.unpin(free);
		model.place(near, 0.0, 20.0);
		model.unpin(near);
		let mut engine = PhysicsEngine::new(PhysicsConfig::default());

		engine.step(&mut model, None, FRAME);

		assert_eq!((model.node(anchor).x, model.node(anchor).y), (0.0, 0.0));
		// The stretched spring pulls towards the pin, repulsion pushes away from it.
		assert!(model.node(free).x < 600.0);
		assert!(model.node(near).y > 20.0);
	}

	#[test]
	fn dragged_node_is_frozen_but_still_pulls() {
		let mut model = graph(&["a", "b"], &[("a", "b")]);
		let (a, b) = (model.index_of("a").unwrap(), model.index_of("b").unwrap());
		model.place(a, 0.0, 0.0);
		model.unpin(a);
		model.place(b, 600.0, 0.0);
		model.unpin(b);
		let mut engine = PhysicsEngine::new(PhysicsConfig::default());

		engine.step(&mut model, Some(a), FRAME);

		assert_eq!((model.node(a).x, model.node(a).y), (0.0, 0.0));
		// Stretched spring pulls b back towards the anchored a.
		assert!(model.node(b).x < 600.0);
	}

	#[test]
	fn long_frames_are_clamped() {
		let mut slow = graph(&["a", "b"], &[("a", "b")]);
		let mut clamped = slow.clone();
		let mut engine = PhysicsEngine::new(PhysicsConfig::default());

		engine.step(&mut slow, None, 2.0);
		engine.step(&mut clamped, None, 0.05);

		assert_eq!(slow.nodes(), clamped.nodes());
	}

	#[test]
	fn zero_dt_is_a_no_op() {
		let mut model = graph(&["a", "b"], &[("a", "b")]);
		let before = model.nodes().to_vec();
		PhysicsEngine::new(PhysicsConfig::default()).step(&mut model, None, 0.0);
		assert_eq!(model.nodes(), &before[..]);
	}

	#[test]
	fn lone_node_drifts_to_origin() {
		let mut model = graph(&["solo"], &[]);
		let mut engine = PhysicsEngine::new(PhysicsConfig::default());
		let start = model.nodes()[0].distance_to(0.0, 0.0);

		for _ in 0..600 {
			engine.step(&mut model, None, FRAME);
		}

		assert!(model.nodes()[0].distance_to(0.0, 0.0) < start.max(1.0));
	}

	#[test]
	fn empty_model_steps_quietly() {
		let mut model = graph(&[], &[]);
		PhysicsEngine::new(PhysicsConfig::default()).step(&mut model, None, FRAME);
		assert_eq!(kinetic_energy(&model), 0.0);
	}
}

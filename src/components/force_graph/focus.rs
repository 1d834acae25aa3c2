//! External "jump to node" entry point.
//!
//! Collaborating features (a citation chip, a search box) ask the view to
//! bring a node into the middle of the screen. The camera eases there on the
//! following frames. How long the node stays highlighted is up to the caller,
//! which clears it with [`Simulation::clear_focus`].

use log::debug;

use super::simulation::Simulation;

impl Simulation {
	/// Select `id` and aim the camera at it, keeping the current zoom.
	///
	/// Returns `false` and changes nothing when no node has that id.
	pub fn focus_node(&mut self, id: &str) -> bool {
		let Some(idx) = self.model.index_of(id) else {
			debug!("focus-graph: focus on unknown node {id} ignored");
			return false;
		};
		let (x, y) = {
			let node = self.model.node(idx);
			(node.x, node.y)
		};
		self.selected = Some(idx);
		self.camera.center_on(x, y);
		true
	}

	/// Drop the highlight left by a focus request.
	pub fn clear_focus(&mut self) {
		self.selected = None;
	}
}

#[cfg(test)]
mod tests {
	use crate::components::force_graph::config::GraphConfig;
	use crate::components::force_graph::simulation::Simulation;
	use crate::components::force_graph::types::{GraphData, GraphNode};
	use pretty_assertions::assert_eq;
	use rand::SeedableRng;
	use rand::rngs::SmallRng;

	fn sim() -> Simulation {
		let data = GraphData {
			nodes: vec![GraphNode::new("paper"), GraphNode::new("cite")],
			links: vec![],
		};
		let mut rng = SmallRng::seed_from_u64(5);
		Simulation::new(&data, &GraphConfig::default(), 800.0, 600.0, &mut rng)
	}

	#[test]
	fn unknown_id_is_a_no_op() {
		let mut sim = sim();
		let target = sim.camera.target();

		assert!(!sim.focus_node("does-not-exist"));

		assert_eq!(sim.camera.target(), target);
		assert_eq!(sim.selected, None);
	}

	#[test]
	fn focus_selects_and_centres() {
		let mut sim = sim();
		let idx = sim.model.index_of("cite").unwrap();
		sim.model.place(idx, 120.0, -80.0);

		assert!(sim.focus_node("cite"));
		assert_eq!(sim.selected, Some(idx));

		sim.camera.snap_to_target();
		let (sx, sy) = sim.camera.world_to_screen(120.0, -80.0);
		assert!((sx - 400.0).abs() < 1e-9 && (sy - 300.0).abs() < 1e-9);
		assert_eq!(sim.camera.scale(), 1.0);
	}

	#[test]
	fn focus_keeps_zoom_level() {
		let mut sim = sim();
		sim.camera.zoom_to(0.0, 0.0, 3.0);
		sim.focus_node("paper");
		assert_eq!(sim.camera.target().k, 3.0);
	}

	#[test]
	fn clear_focus_drops_selection_only() {
		let mut sim = sim();
		sim.focus_node("paper");
		let target = sim.camera.target();
		sim.clear_focus();
		assert_eq!(sim.selected, None);
		assert_eq!(sim.camera.target(), target);
	}
}

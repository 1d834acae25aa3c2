//! End-to-end behaviour of the graph engine without a browser.

use focus_graph::components::force_graph::{
	GraphConfig, GraphData, GraphEvent, GraphLink, GraphNode, InputEvent, InteractionState,
	LoadWarning, Simulation,
};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::SmallRng;

const FRAME: f64 = 1.0 / 60.0;

fn chain() -> GraphData {
	GraphData {
		nodes: vec![GraphNode::new("A"), GraphNode::new("B"), GraphNode::new("C")],
		links: vec![GraphLink::new("A", "B"), GraphLink::new("B", "C")],
	}
}

fn simulation(data: &GraphData, seed: u64) -> Simulation {
	let mut rng = SmallRng::seed_from_u64(seed);
	Simulation::new(data, &GraphConfig::default(), 800.0, 600.0, &mut rng)
}

fn distance(sim: &Simulation, a: &str, b: &str) -> f64 {
	let a = sim.model.node(sim.model.index_of(a).unwrap());
	let b = sim.model.node(sim.model.index_of(b).unwrap());
	a.distance_to(b.x, b.y)
}

#[test]
fn chain_settles_near_rest_length() {
	let rest = GraphConfig::default().physics.rest_length;

	for seed in 0..8 {
		let mut sim = simulation(&chain(), seed);
		for _ in 0..500 {
			sim.tick(FRAME);
		}

		let (ab, bc) = (distance(&sim, "A", "B"), distance(&sim, "B", "C"));
		assert!((ab - rest).abs() <= 20.0, "seed {seed}: |AB| = {ab}");
		assert!((bc - rest).abs() <= 20.0, "seed {seed}: |BC| = {bc}");
		assert!(sim.kinetic_energy() < 0.5, "seed {seed}: energy {}", sim.kinetic_energy());
	}
}

#[test]
fn dropped_node_stays_under_the_pointer() {
	let mut sim = simulation(&chain(), 42);
	for (id, x) in [("A", -150.0), ("B", 0.0), ("C", 150.0)] {
		let idx = sim.model.index_of(id).unwrap();
		sim.model.place(idx, x, 10.0);
		sim.model.unpin(idx);
	}
	let b = sim.model.index_of("B").unwrap();
	sim.camera.zoom_to(100.0, 50.0, 2.0);
	sim.camera.pan_by(-30.0, 20.0);
	sim.camera.snap_to_target();

	let (sx, sy) = {
		let node = sim.model.node(b);
		sim.camera.world_to_screen(node.x, node.y)
	};
	sim.handle_input(InputEvent::PointerDown { x: sx, y: sy });
	assert!(matches!(sim.interaction(), InteractionState::DraggingNode { node, .. } if node == b));

	let (ux, uy) = (sx + 80.0, sy - 35.0);
	sim.handle_input(InputEvent::PointerMove { x: sx + 40.0, y: sy - 10.0 });
	sim.tick(FRAME);
	sim.handle_input(InputEvent::PointerMove { x: ux, y: uy });
	assert_eq!(sim.handle_input(InputEvent::PointerUp { x: ux, y: uy }), None);

	let (wx, wy) = sim.camera.screen_to_world(ux, uy);
	let node = sim.model.node(b).clone();
	assert!(node.pinned);
	assert!((node.x - wx).abs() < 1e-9 && (node.y - wy).abs() < 1e-9);

	for _ in 0..240 {
		sim.tick(FRAME);
	}
	let after = sim.model.node(b);
	assert_eq!((after.x, after.y), (node.x, node.y));
}

#[test]
fn released_node_rejoins_the_layout() {
	let mut sim = simulation(&chain(), 9);
	let a = sim.model.index_of("A").unwrap();
	sim.model.place(a, 900.0, 900.0);
	let (sx, sy) = sim.camera.world_to_screen(900.0, 900.0);

	sim.handle_input(InputEvent::DoubleClick { x: sx, y: sy });
	assert!(!sim.model.node(a).pinned);

	for _ in 0..60 {
		sim.tick(FRAME);
	}
	assert!(sim.model.node(a).distance_to(900.0, 900.0) > 1.0);
}

#[test]
fn clicking_a_node_reports_it() {
	let mut sim = simulation(&chain(), 1);
	let c = sim.model.index_of("C").unwrap();
	sim.model.place(c, 250.0, 250.0);
	sim.model.unpin(c);
	let (sx, sy) = {
		let node = sim.model.node(c);
		sim.camera.world_to_screen(node.x, node.y)
	};

	sim.handle_input(InputEvent::PointerDown { x: sx, y: sy });
	sim.handle_input(InputEvent::PointerMove { x: sx + 2.0, y: sy + 1.0 });
	let event = sim.handle_input(InputEvent::PointerUp { x: sx + 2.0, y: sy + 1.0 });

	assert_eq!(event, Some(GraphEvent::NodeActivated { id: "C".into() }));
	// The press alone grabbed the node.
	assert!(sim.model.node(c).pinned);
}

#[test]
fn focus_glides_camera_onto_node() {
	let mut sim = simulation(&chain(), 5);
	sim.running = false;
	let b = sim.model.index_of("B").unwrap();
	sim.model.place(b, 350.0, -275.0);

	assert!(sim.focus_node("B"));
	assert_eq!(sim.selected, Some(b));
	for _ in 0..300 {
		sim.tick(FRAME);
	}

	let (sx, sy) = sim.camera.world_to_screen(350.0, -275.0);
	assert!((sx - 400.0).abs() < 0.5 && (sy - 300.0).abs() < 0.5);
	assert!(!sim.camera.is_moving());
}

#[test]
fn focus_on_missing_node_changes_nothing() {
	let mut sim = simulation(&chain(), 5);
	sim.selected = sim.model.index_of("A");
	let before = (sim.camera.current(), sim.camera.target());

	assert!(!sim.focus_node("Z"));

	assert_eq!((sim.camera.current(), sim.camera.target()), before);
	assert_eq!(sim.selected, sim.model.index_of("A"));
}

#[test]
fn empty_graph_runs_quietly() {
	let mut sim = simulation(&GraphData::default(), 0);
	for _ in 0..10 {
		sim.tick(FRAME);
	}
	sim.handle_input(InputEvent::PointerDown { x: 10.0, y: 10.0 });
	sim.handle_input(InputEvent::PointerMove { x: 60.0, y: 10.0 });
	sim.handle_input(InputEvent::PointerUp { x: 60.0, y: 10.0 });
	sim.handle_input(InputEvent::Wheel {
		x: 10.0,
		y: 10.0,
		delta_y: -100.0,
	});

	assert_eq!(sim.kinetic_energy(), 0.0);
	assert!(sim.model.is_empty());
	assert!(!sim.focus_node("anything"));
}

#[test]
fn broken_links_are_reported_not_fatal() {
	let data = GraphData {
		nodes: vec![GraphNode::new("A"), GraphNode::new("B")],
		links: vec![GraphLink::new("A", "B"), GraphLink::new("B", "ghost")],
	};
	let mut sim = simulation(&data, 3);

	assert_eq!(sim.model.edges().len(), 1);
	assert_eq!(
		sim.load_report().warnings,
		vec![LoadWarning::DanglingEdge {
			source_id: "B".into(),
			target_id: "ghost".into(),
			missing: "ghost".into(),
		}]
	);
	sim.tick(FRAME);
}

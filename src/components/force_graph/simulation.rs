//! The owned simulation: model, physics, camera and interaction in one place.
//!
//! Created once when the view mounts and dropped when it is torn down. The
//! frame loop calls [`Simulation::tick`] then renders; DOM event handlers call
//! [`Simulation::handle_input`] between frames. There is a single writer at any
//! time, so no locking is involved.

use log::{debug, info};
use rand::Rng;

use super::camera::Camera;
use super::config::GraphConfig;
use super::input::{InputController, InputEvent, InputOutcome, InputTarget, InteractionState};
use super::model::{GraphModel, LoadReport, NodeIdx};
use super::physics::{PhysicsEngine, kinetic_energy};
use super::types::GraphData;

/// Notification for the feature embedding the graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphEvent {
	/// A node was clicked.
	NodeActivated {
		/// Id of the clicked node.
		id: String,
	},
}

/// Complete state of one graph view.
#[derive(Clone, Debug)]
pub struct Simulation {
	/// Nodes and edges.
	pub model: GraphModel,
	/// View onto the model.
	pub camera: Camera,
	physics: PhysicsEngine,
	input: InputController,
	/// Node emphasised by a click or a focus request.
	pub selected: Option<NodeIdx>,
	/// Node under the pointer.
	pub hovered: Option<NodeIdx>,
	/// Seconds of animation time, drives decorative effects.
	pub clock: f64,
	/// When cleared, physics stops but the camera keeps easing and input
	/// still works. Driven by the component's `paused` prop.
	pub running: bool,
	report: LoadReport,
}

impl Simulation {
	/// Load `data` and frame it in a `width` × `height` viewport.
	pub fn new<R: Rng + ?Sized>(
		data: &GraphData,
		config: &GraphConfig,
		width: f64,
		height: f64,
		rng: &mut R,
	) -> Self {
		let (model, report) = GraphModel::initialize(data, &config.layout, rng);
		info!(
			"focus-graph: loaded {} nodes, {} edges ({} warnings)",
			model.len(),
			model.edges().len(),
			report.warnings.len()
		);

		Self {
			model,
			camera: Camera::new(config.camera.clone(), width, height),
			physics: PhysicsEngine::new(config.physics.clone()),
			input: InputController::new(config.interaction.clone()),
			selected: None,
			hovered: None,
			clock: 0.0,
			running: true,
			report,
		}
	}

	/// What had to be dropped or repaired while loading.
	pub fn load_report(&self) -> &LoadReport {
		&self.report
	}

	/// Gesture in progress.
	pub fn interaction(&self) -> InteractionState {
		self.input.state()
	}

	/// Node held by the pointer.
	pub fn dragged_node(&self) -> Option<NodeIdx> {
		self.input.dragged_node()
	}

	/// Advance one frame of `dt` seconds.
	pub fn tick(&mut self, dt: f64) {
		if self.running {
			self.physics
				.step(&mut self.model, self.input.dragged_node(), dt);
		}
		self.camera.ease();
		self.clock += dt.max(0.0);
	}

	/// Total kinetic energy of the layout.
	pub fn kinetic_energy(&self) -> f64 {
		kinetic_energy(&self.model)
	}

	/// Feed one pointer event through the interaction state machine.
	pub fn handle_input(&mut self, event: InputEvent) -> Option<GraphEvent> {
		let outcome = self.input.handle(
			event,
			InputTarget {
				model: &mut self.model,
				camera: &mut self.camera,
				hovered: &mut self.hovered,
			},
		)?;

		match outcome {
			InputOutcome::NodeClicked(idx) => {
				self.selected = Some(idx);
				Some(GraphEvent::NodeActivated {
					id: self.model.node(idx).id.clone(),
				})
			}
			InputOutcome::BackgroundClicked => {
				self.selected = None;
				None
			}
			InputOutcome::NodeReleased(idx) => {
				debug!("focus-graph: released {}", self.model.node(idx).id);
				None
			}
		}
	}

	/// Follow a canvas resize.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.camera.resize(width, height);
	}

	/// Whether `idx` is the selected node.
	pub fn is_selected(&self, idx: NodeIdx) -> bool {
		self.selected == Some(idx)
	}

	/// Whether `idx` is under the pointer.
	pub fn is_hovered(&self, idx: NodeIdx) -> bool {
		self.hovered == Some(idx)
	}

	/// CSS cursor matching the current gesture.
	pub fn cursor(&self) -> &'static str {
		match self.input.state() {
			InteractionState::DraggingNode { .. } | InteractionState::PanningCamera { .. } => {
				"grabbing"
			}
			InteractionState::Idle if self.hovered.is_some() => "pointer",
			InteractionState::Idle => "grab",
		}
	}

	/// Whether `idx` is the selected node or one of its neighbours.
	pub fn is_near_selection(&self, idx: NodeIdx) -> bool {
		match self.selected {
			Some(sel) => sel == idx || self.model.neighbors(sel).any(|n| n == idx),
			None => false,
		}
	}
}

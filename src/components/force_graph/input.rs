//! Pointer and wheel interpretation.
//!
//! DOM events are normalized into [`InputEvent`]s (screen coordinates in CSS
//! pixels relative to the canvas) and fed through a small state machine:
//!
//! ```text
//! Idle --down on node--> DraggingNode --up--> Idle
//! Idle --down on background--> PanningCamera --up--> Idle
//! ```
//!
//! Hover tracking and wheel zoom run in every state.

use super::camera::Camera;
use super::config::InteractionConfig;
use super::model::{GraphModel, NodeIdx};

/// A normalized pointer event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
	/// Primary button pressed.
	PointerDown { x: f64, y: f64 },
	/// Pointer moved, with or without a button held.
	PointerMove { x: f64, y: f64 },
	/// Primary button released.
	PointerUp { x: f64, y: f64 },
	/// Scroll wheel; negative `delta_y` zooms in.
	Wheel { x: f64, y: f64, delta_y: f64 },
	/// Pointer left the canvas; any gesture is abandoned.
	PointerLeave,
	/// Double click; releases a pinned node under the pointer.
	DoubleClick { x: f64, y: f64 },
}

/// Current gesture.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InteractionState {
	/// No button held.
	#[default]
	Idle,
	/// A node follows the pointer.
	DraggingNode {
		/// Node being dragged.
		node: NodeIdx,
		/// Screen position of the press.
		press: (f64, f64),
		/// Set once the pointer left the click tolerance.
		moved: bool,
	},
	/// The view follows the pointer.
	PanningCamera {
		/// Screen position of the previous move.
		last: (f64, f64),
		/// Screen position of the press.
		press: (f64, f64),
		/// Set once the pointer left the click tolerance.
		moved: bool,
	},
}

/// Something the owner of the simulation may want to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputOutcome {
	/// Press and release on a node without dragging it.
	NodeClicked(NodeIdx),
	/// Press and release on empty canvas without panning.
	BackgroundClicked,
	/// A pinned node was released back into the simulation.
	NodeReleased(NodeIdx),
}

/// The state an input event is allowed to touch.
pub struct InputTarget<'a> {
	/// Nodes to pick, pin and move.
	pub model: &'a mut GraphModel,
	/// View to pan and zoom.
	pub camera: &'a mut Camera,
	/// Node under the pointer, updated on every move.
	pub hovered: &'a mut Option<NodeIdx>,
}

/// Interaction state machine.
#[derive(Clone, Debug, Default)]
pub struct InputController {
	state: InteractionState,
	config: InteractionConfig,
}

impl InputController {
	/// Idle controller with the given tolerances.
	pub fn new(config: InteractionConfig) -> Self {
		Self {
			state: InteractionState::Idle,
			config,
		}
	}

	/// Current gesture.
	pub fn state(&self) -> InteractionState {
		self.state
	}

	/// Node currently held by the pointer, frozen for the physics engine.
	pub fn dragged_node(&self) -> Option<NodeIdx> {
		match self.state {
			InteractionState::DraggingNode { node, .. } => Some(node),
			_ => None,
		}
	}

	fn pick(&self, target: &InputTarget<'_>, x: f64, y: f64) -> Option<NodeIdx> {
		let (wx, wy) = target.camera.screen_to_world(x, y);
		target
			.model
			.find_node_at(wx, wy, target.camera.scale(), self.config.pick_tolerance)
	}

	fn travelled(&self, press: (f64, f64), x: f64, y: f64) -> bool {
		(x - press.0).hypot(y - press.1) > self.config.click_tolerance
	}

	/// Apply one event to the model and camera.
	pub fn handle(&mut self, event: InputEvent, target: InputTarget<'_>) -> Option<InputOutcome> {
		match event {
			InputEvent::PointerDown { x, y } => {
				self.state = match self.pick(&target, x, y) {
					Some(node) => {
						// Entering a drag pins the node and kills its momentum.
						let (nx, ny) = {
							let n = target.model.node(node);
							(n.x, n.y)
						};
						target.model.place(node, nx, ny);
						*target.hovered = Some(node);
						InteractionState::DraggingNode {
							node,
							press: (x, y),
							moved: false,
						}
					}
					None => InteractionState::PanningCamera {
						last: (x, y),
						press: (x, y),
						moved: false,
					},
				};
				None
			}
			InputEvent::PointerMove { x, y } => {
				match &mut self.state {
					InteractionState::Idle => {}
					InteractionState::DraggingNode { node, press, moved } => {
						*moved |= (x - press.0).hypot(y - press.1) > self.config.click_tolerance;
						// Jitter inside the click tolerance leaves the node where it was.
						if *moved {
							let (wx, wy) = target.camera.screen_to_world(x, y);
							target.model.place(*node, wx, wy);
						}
					}
					InteractionState::PanningCamera { last, press, moved } => {
						*moved |= (x - press.0).hypot(y - press.1) > self.config.click_tolerance;
						target.camera.pan_by(x - last.0, y - last.1);
						*last = (x, y);
					}
				}
				*target.hovered = match self.dragged_node() {
					Some(node) => Some(node),
					None => self.pick(&target, x, y),
				};
				None
			}
			InputEvent::PointerUp { x, y } => {
				let outcome = match self.state {
					InteractionState::Idle => None,
					InteractionState::DraggingNode { node, press, moved } => {
						if moved || self.travelled(press, x, y) {
							let (wx, wy) = target.camera.screen_to_world(x, y);
							target.model.place(node, wx, wy);
							None
						} else {
							Some(InputOutcome::NodeClicked(node))
						}
					}
					InteractionState::PanningCamera { press, moved, .. } => {
						if moved || self.travelled(press, x, y) {
							None
						} else {
							Some(InputOutcome::BackgroundClicked)
						}
					}
				};
				self.state = InteractionState::Idle;
				outcome
			}
			InputEvent::Wheel { x, y, delta_y } => {
				target.camera.zoom_at(x, y, delta_y);
				None
			}
			InputEvent::PointerLeave => {
				self.state = InteractionState::Idle;
				*target.hovered = None;
				None
			}
			InputEvent::DoubleClick { x, y } => {
				let node = self.pick(&target, x, y)?;
				if !target.model.node(node).pinned {
					return None;
				}
				target.model.unpin(node);
				Some(InputOutcome::NodeReleased(node))
			}
		}
	}
}

//! Force-directed graph visualization component.
//!
//! Renders an interactive force-directed graph on an HTML canvas with:
//! - Physics-based node positioning (repulsion, springs, centering)
//! - Pan, eased zoom, and node dragging that pins nodes where they are dropped
//! - Focus requests that select a node and glide the camera onto it
//! - Configurable theming and visual scaling
//!
//! The engine ([`Simulation`] and the modules it is built from) is plain Rust
//! and runs without a browser; only the component and renderer touch the DOM.
//!
//! # Example
//!
//! ```ignore
//! use focus_graph::{ForceGraphCanvas, GraphData, GraphNode, GraphLink};
//!
//! let data = GraphData {
//!     nodes: vec![GraphNode::new("a").with_label("Node A"), GraphNode::new("b")],
//!     links: vec![GraphLink::new("a", "b")],
//! };
//! let focus = RwSignal::new(None::<String>);
//!
//! view! {
//!     <ForceGraphCanvas
//!         data=Signal::stored(data)
//!         focus=Signal::derive(move || focus.get())
//!         on_node_activate=Callback::new(|id: String| log::info!("clicked {id}"))
//!         fullscreen=true
//!     />
//! }
//! ```

pub mod camera;
mod component;
pub mod config;
mod focus;
mod frame;
pub mod input;
pub mod model;
pub mod physics;
mod render;
pub mod scale;
pub mod simulation;
pub mod theme;
mod types;

pub use camera::{Camera, ViewTransform};
pub use component::ForceGraphCanvas;
pub use config::{CameraConfig, ConfigError, GraphConfig, InteractionConfig, LayoutConfig, PhysicsConfig};
pub use input::{InputEvent, InteractionState};
pub use model::{GraphModel, LoadReport, LoadWarning, NodeIdx};
pub use physics::PhysicsEngine;
pub use simulation::{GraphEvent, Simulation};
pub use theme::Theme;
pub use types::{GraphData, GraphLink, GraphNode};

//! Tunable parameters for layout, physics, camera and interaction.
//!
//! Every struct deserializes with `#[serde(default)]`, so a host page can ship a
//! partial JSON object (e.g. only `{"physics": {"rest_length": 120}}`) and keep
//! the defaults for everything else.

use serde::Deserialize;
use thiserror::Error;

/// Initial placement and node sizing.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
	/// Half-width of the square (centred on the origin) that initial positions are drawn from.
	pub initial_extent: f64,
	/// Radius in world units of a node with `value == 1.0`. Radius grows with `sqrt(value)`.
	pub base_radius: f64,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			initial_extent: 200.0,
			base_radius: 5.0,
		}
	}
}

/// Force model constants. Velocities are in world units per reference frame.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
	/// Numerator of the pairwise repulsion `repulsion / (dist² + epsilon)`.
	pub repulsion: f64,
	/// Keeps repulsion finite when two nodes coincide.
	pub epsilon: f64,
	/// Hooke constant of each edge spring.
	pub spring_strength: f64,
	/// Length at which an edge spring exerts no force.
	pub rest_length: f64,
	/// Pull of every free node towards the origin, proportional to its distance.
	pub centering: f64,
	/// Velocity multiplier applied once per step. Must be below 1.
	pub damping: f64,
	/// Upper bound on a single step, in seconds.
	pub max_dt: f64,
	/// Speed cap in world units per reference frame.
	pub max_speed: f64,
	/// Frame rate the constants above are tuned for.
	pub reference_fps: f64,
}

impl Default for PhysicsConfig {
	fn default() -> Self {
		Self {
			repulsion: 8000.0,
			epsilon: 1.0,
			spring_strength: 0.02,
			rest_length: 150.0,
			centering: 0.002,
			damping: 0.85,
			max_dt: 0.05,
			max_speed: 50.0,
			reference_fps: 60.0,
		}
	}
}

/// Camera limits and easing.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
	/// Smallest scale the wheel can reach.
	pub min_zoom: f64,
	/// Largest scale the wheel can reach.
	pub max_zoom: f64,
	/// Scale at mount.
	pub initial_zoom: f64,
	/// Fraction of the remaining distance to the target covered per frame.
	pub easing: f64,
	/// Zoom multiplier per wheel notch.
	pub zoom_step: f64,
}

impl Default for CameraConfig {
	fn default() -> Self {
		Self {
			min_zoom: 0.1,
			max_zoom: 10.0,
			initial_zoom: 1.0,
			easing: 0.1,
			zoom_step: 1.1,
		}
	}
}

/// Pointer handling thresholds, in screen pixels.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct InteractionConfig {
	/// Extra pick radius around each node, constant on screen at any zoom.
	pub pick_tolerance: f64,
	/// Pointer travel below which a press/release counts as a click.
	pub click_tolerance: f64,
}

impl Default for InteractionConfig {
	fn default() -> Self {
		Self {
			pick_tolerance: 4.0,
			click_tolerance: 4.0,
		}
	}
}

/// Complete configuration of a graph view.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GraphConfig {
	/// Seed for initial positions. `None` draws a fresh seed per mount.
	pub seed: Option<u64>,
	/// Theme name, see [`Theme::by_name`](super::theme::Theme::by_name).
	pub theme: String,
	/// Initial placement and node sizes.
	pub layout: LayoutConfig,
	/// Force constants.
	pub physics: PhysicsConfig,
	/// Zoom limits and easing.
	pub camera: CameraConfig,
	/// Pointer tolerances.
	pub interaction: InteractionConfig,
}

impl Default for GraphConfig {
	fn default() -> Self {
		Self {
			seed: None,
			theme: "default".into(),
			layout: LayoutConfig::default(),
			physics: PhysicsConfig::default(),
			camera: CameraConfig::default(),
			interaction: InteractionConfig::default(),
		}
	}
}

/// A configuration value outside the range the engine can work with.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
	/// A size, rate or limit that must be above zero.
	#[error("{field} must be a positive finite number, got {value}")]
	NotPositive {
		/// Dotted path of the offending field.
		field: &'static str,
		/// Value found.
		value: f64,
	},
	/// A strength or tolerance below zero.
	#[error("{field} must be a finite number no less than zero, got {value}")]
	Negative {
		/// Dotted path of the offending field.
		field: &'static str,
		/// Value found.
		value: f64,
	},
	/// Damping that would not dissipate energy.
	#[error("{field} must be in [0, 1), got {value}")]
	Damping {
		/// Dotted path of the offending field.
		field: &'static str,
		/// Value found.
		value: f64,
	},
	/// Easing outside `(0, 1]`.
	#[error("camera.easing must be in (0, 1], got {0}")]
	Easing(f64),
	/// Zoom limits in the wrong order.
	#[error("camera.min_zoom ({min}) must not exceed camera.max_zoom ({max})")]
	ZoomBounds {
		/// Configured minimum.
		min: f64,
		/// Configured maximum.
		max: f64,
	},
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
	if value.is_finite() && value > 0.0 {
		Ok(())
	} else {
		Err(ConfigError::NotPositive { field, value })
	}
}

fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
	if value.is_finite() && value >= 0.0 {
		Ok(())
	} else {
		Err(ConfigError::Negative { field, value })
	}
}

impl GraphConfig {
	/// Check every parameter the engine divides by or iterates on.
	pub fn validate(&self) -> Result<(), ConfigError> {
		positive("layout.initial_extent", self.layout.initial_extent)?;
		positive("layout.base_radius", self.layout.base_radius)?;

		let p = &self.physics;
		non_negative("physics.repulsion", p.repulsion)?;
		non_negative("physics.spring_strength", p.spring_strength)?;
		non_negative("physics.centering", p.centering)?;
		positive("physics.epsilon", p.epsilon)?;
		positive("physics.rest_length", p.rest_length)?;
		positive("physics.max_dt", p.max_dt)?;
		positive("physics.max_speed", p.max_speed)?;
		positive("physics.reference_fps", p.reference_fps)?;
		if !(0.0..1.0).contains(&p.damping) {
			return Err(ConfigError::Damping {
				field: "physics.damping",
				value: p.damping,
			});
		}

		let c = &self.camera;
		positive("camera.min_zoom", c.min_zoom)?;
		positive("camera.max_zoom", c.max_zoom)?;
		positive("camera.initial_zoom", c.initial_zoom)?;
		positive("camera.zoom_step", c.zoom_step)?;
		if c.min_zoom > c.max_zoom {
			return Err(ConfigError::ZoomBounds {
				min: c.min_zoom,
				max: c.max_zoom,
			});
		}
		if !(c.easing > 0.0 && c.easing <= 1.0) {
			return Err(ConfigError::Easing(c.easing));
		}

		non_negative("interaction.pick_tolerance", self.interaction.pick_tolerance)?;
		non_negative("interaction.click_tolerance", self.interaction.click_tolerance)?;
		Ok(())
	}

	/// Returns `self` when valid, otherwise logs the problem and falls back to defaults.
	pub fn or_default_on_error(self) -> Self {
		match self.validate() {
			Ok(()) => self,
			Err(e) => {
				log::warn!("focus-graph: invalid config ({e}), using defaults");
				Self::default()
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn defaults_are_valid() {
		assert_eq!(GraphConfig::default().validate(), Ok(()));
	}

	#[test]
	fn partial_json_keeps_other_defaults() {
		let config: GraphConfig =
			serde_json::from_str(r#"{ "seed": 7, "physics": { "rest_length": 120.0 } }"#).unwrap();

		assert_eq!(config.seed, Some(7));
		assert_eq!(config.physics.rest_length, 120.0);
		assert_eq!(config.physics.damping, PhysicsConfig::default().damping);
		assert_eq!(config.camera, CameraConfig::default());
	}

	#[test]
	fn rejects_undamped_physics() {
		let mut config = GraphConfig::default();
		config.physics.damping = 1.0;
		assert_eq!(
			config.validate(),
			Err(ConfigError::Damping {
				field: "physics.damping",
				value: 1.0
			})
		);
	}

	#[test]
	fn rejects_inverted_zoom_bounds() {
		let mut config = GraphConfig::default();
		config.camera.min_zoom = 5.0;
		config.camera.max_zoom = 2.0;
		assert!(matches!(
			config.validate(),
			Err(ConfigError::ZoomBounds { .. })
		));
	}

	#[test]
	fn rejects_negative_strengths_and_tolerances() {
		let mut config = GraphConfig::default();
		config.physics.spring_strength = -0.02;
		assert_eq!(
			config.validate(),
			Err(ConfigError::Negative {
				field: "physics.spring_strength",
				value: -0.02
			})
		);

		let mut config = GraphConfig::default();
		config.interaction.click_tolerance = -1.0;
		assert_eq!(
			config.validate(),
			Err(ConfigError::Negative {
				field: "interaction.click_tolerance",
				value: -1.0
			})
		);

		let mut config = GraphConfig::default();
		config.physics.centering = 0.0;
		config.interaction.pick_tolerance = 0.0;
		assert_eq!(config.validate(), Ok(()));
	}

	#[test]
	fn invalid_config_falls_back_to_defaults() {
		let mut config = GraphConfig::default();
		config.physics.epsilon = 0.0;
		assert_eq!(config.or_default_on_error(), GraphConfig::default());
	}
}

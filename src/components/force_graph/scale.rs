//! How stroke widths, dot sizes and fonts respond to zoom.
//!
//! Drawing happens after the camera transform is applied, so a value given in
//! world units grows on screen as the user zooms in. Each visual picks one of
//! three rules:
//!
//! - [`ScaleBehavior::World`] keeps the world size, so it zooms like the nodes do.
//! - [`ScaleBehavior::Screen`] keeps the pixel size by dividing out `k`.
//! - [`ScaleBehavior::Clamped`] zooms with the world until it would drop below
//!   or rise above a pixel range.
//!
//! [`ScaledValues`] resolves all of them for one zoom level.

/// Zoom rule for a size.
#[derive(Clone, Debug)]
pub enum ScaleBehavior {
	/// Size is in world units.
	World,
	/// Size is in screen pixels.
	Screen,
	/// World size held within a pixel range.
	Clamped {
		/// Smallest on-screen size.
		min_screen: f64,
		/// Largest on-screen size.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// World-space size to draw with at zoom `k`.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match *self {
			Self::World => base,
			Self::Screen => base / k,
			Self::Clamped {
				min_screen,
				max_screen,
			} => base.max(min_screen / k).min(max_screen / k),
		}
	}
}

/// Zoom rule for an opacity multiplier.
#[derive(Clone, Debug)]
pub enum AlphaBehavior {
	/// Always opaque.
	Constant,
	/// Linear ramp from invisible at `zero_alpha_k` to opaque at `full_alpha_k`.
	Fade {
		/// Zoom at and below which the element is hidden.
		zero_alpha_k: f64,
		/// Zoom at and above which the element is fully drawn.
		full_alpha_k: f64,
	},
}

impl AlphaBehavior {
	/// Opacity multiplier at zoom `k`.
	pub fn apply(&self, k: f64) -> f64 {
		match *self {
			Self::Constant => 1.0,
			Self::Fade {
				zero_alpha_k,
				full_alpha_k,
			} if full_alpha_k > zero_alpha_k => {
				((k - zero_alpha_k) / (full_alpha_k - zero_alpha_k)).clamp(0.0, 1.0)
			}
			Self::Fade { .. } => 1.0,
		}
	}
}

/// Base sizes and zoom rules for every drawn element.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node outline width in screen pixels.
	pub outline_width: f64,
	/// How the outline responds to zoom.
	pub outline_behavior: ScaleBehavior,
	/// Edge stroke width in world units.
	pub edge_width: f64,
	/// How edge strokes respond to zoom.
	pub edge_behavior: ScaleBehavior,
	/// Width multiplier for edges touching the selected node.
	pub emphasis_factor: f64,
	/// Traveling dot radius in world units.
	pub dot_radius: f64,
	/// How dots respond to zoom.
	pub dot_behavior: ScaleBehavior,
	/// Dot fade-out when zoomed far out.
	pub dot_alpha: AlphaBehavior,
	/// Pixel font size.
	pub label_size: f64,
	/// Zoom at and above which every node is labelled.
	pub label_min_zoom: f64,
	/// Hover ring stroke, in pixels.
	pub ring_width: f64,
	/// Pixel gap between a node and its hover ring or label.
	pub ring_offset: f64,
	/// Grid lines closer than this on screen are thinned out.
	pub grid_min_gap: f64,
	/// Grid fade-out when zoomed far out.
	pub grid_alpha: AlphaBehavior,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			outline_width: 1.5,
			outline_behavior: ScaleBehavior::Screen,
			edge_width: 1.2,
			edge_behavior: ScaleBehavior::Clamped {
				min_screen: 0.75,
				max_screen: 3.0,
			},
			emphasis_factor: 2.0,
			dot_radius: 2.5,
			dot_behavior: ScaleBehavior::Clamped {
				min_screen: 1.5,
				max_screen: 6.0,
			},
			dot_alpha: AlphaBehavior::Fade {
				zero_alpha_k: 0.3,
				full_alpha_k: 0.7,
			},
			label_size: 11.0,
			label_min_zoom: 0.8,
			ring_width: 1.25,
			ring_offset: 3.0,
			grid_min_gap: 24.0,
			grid_alpha: AlphaBehavior::Fade {
				zero_alpha_k: 0.1,
				full_alpha_k: 0.4,
			},
		}
	}
}

/// [`ScaleConfig`] resolved for one frame's zoom; sizes are in world units.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Zoom these values were resolved for.
	pub k: f64,
	/// Node outline width.
	pub outline_width: f64,
	/// Default edge width.
	pub edge_width: f64,
	/// Width of edges touching the selection.
	pub emphasis_edge_width: f64,
	/// Travelling dot radius.
	pub dot_radius: f64,
	/// Dot visibility [0, 1]; dots disappear when zoomed far out.
	pub dot_alpha: f64,
	/// CSS font shorthand sized so text renders at `label_size` pixels.
	pub label_font: String,
	/// Whether zoom alone is enough to show every label.
	pub labels_by_zoom: bool,
	/// Hover ring stroke.
	pub ring_width: f64,
	/// Gap between a node and its hover ring or label.
	pub ring_offset: f64,
	/// Grid opacity multiplier.
	pub grid_alpha: f64,
}

impl ScaledValues {
	/// Resolve every rule in `config` at zoom `k`.
	pub fn new(config: &ScaleConfig, k: f64, font_family: &str) -> Self {
		let edge_width = config.edge_behavior.apply(config.edge_width, k);
		Self {
			k,
			outline_width: config.outline_behavior.apply(config.outline_width, k),
			edge_width,
			emphasis_edge_width: edge_width * config.emphasis_factor,
			dot_radius: config.dot_behavior.apply(config.dot_radius, k),
			dot_alpha: config.dot_alpha.apply(k),
			label_font: format!("{}px {}", config.label_size / k, font_family),
			labels_by_zoom: k >= config.label_min_zoom,
			ring_width: config.ring_width / k,
			ring_offset: config.ring_offset / k,
			grid_alpha: config.grid_alpha.apply(k),
		}
	}
}

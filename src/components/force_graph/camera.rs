//! View transform with eased interpolation towards a target.
//!
//! # Coordinate Spaces
//!
//! - **World-space**: coordinates of the simulation. Node positions live here.
//! - **Screen-space**: CSS pixels on the canvas, origin at the top-left corner.
//!
//! A [`ViewTransform`] maps world to screen as `screen = world * k + (x, y)`.
//! The camera keeps two of them: the `current` one used for drawing and
//! picking, and a `target` that input and focus requests write to. Every frame
//! [`Camera::ease`] moves `current` a fixed fraction of the way to `target`.

use super::config::CameraConfig;

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewTransform {
	/// Screen x of the world origin.
	pub x: f64,
	/// Screen y of the world origin.
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

impl ViewTransform {
	/// Inverse of [`world_to_screen`](Self::world_to_screen).
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		((sx - self.x) / self.k, (sy - self.y) / self.k)
	}

	/// `world * k + (x, y)`.
	pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
		(wx * self.k + self.x, wy * self.k + self.y)
	}
}

/// Below this, eased components snap onto their target.
const SNAP: f64 = 1e-4;

fn approach(current: f64, target: f64, easing: f64) -> f64 {
	let next = current + (target - current) * easing;
	if (target - next).abs() < SNAP {
		target
	} else {
		next
	}
}

/// Pan/zoom state of the graph view.
#[derive(Clone, Debug)]
pub struct Camera {
	current: ViewTransform,
	target: ViewTransform,
	width: f64,
	height: f64,
	config: CameraConfig,
}

impl Camera {
	/// Camera with the world origin at the centre of a `width` × `height` viewport.
	pub fn new(config: CameraConfig, width: f64, height: f64) -> Self {
		let k = config.initial_zoom.clamp(config.min_zoom, config.max_zoom);
		let view = ViewTransform {
			x: width / 2.0,
			y: height / 2.0,
			k,
		};
		Self {
			current: view,
			target: view,
			width,
			height,
			config,
		}
	}

	/// Transform used for drawing and picking this frame.
	pub fn current(&self) -> ViewTransform {
		self.current
	}

	/// Transform the camera is easing towards.
	pub fn target(&self) -> ViewTransform {
		self.target
	}

	/// Zoom level used for drawing and picking.
	pub fn scale(&self) -> f64 {
		self.current.k
	}

	/// Canvas size in CSS pixels.
	pub fn viewport(&self) -> (f64, f64) {
		(self.width, self.height)
	}

	/// Screen to world through the current transform.
	pub fn screen_to_world(&self, sx: f64, sy: f64) -> (f64, f64) {
		self.current.screen_to_world(sx, sy)
	}

	/// World to screen through the current transform.
	pub fn world_to_screen(&self, wx: f64, wy: f64) -> (f64, f64) {
		self.current.world_to_screen(wx, wy)
	}

	/// World-space rectangle `(min_x, min_y, max_x, max_y)` currently on screen.
	pub fn visible_world_bounds(&self) -> (f64, f64, f64, f64) {
		let (x0, y0) = self.screen_to_world(0.0, 0.0);
		let (x1, y1) = self.screen_to_world(self.width, self.height);
		(x0, y0, x1, y1)
	}

	fn clamp_zoom(&self, k: f64) -> f64 {
		k.clamp(self.config.min_zoom, self.config.max_zoom)
	}

	/// Replace the target transform; zoom is clamped.
	pub fn set_target(&mut self, target: ViewTransform) {
		self.target = ViewTransform {
			k: self.clamp_zoom(target.k),
			..target
		};
	}

	/// Move one frame towards the target. Returns `true` while still moving.
	pub fn ease(&mut self) -> bool {
		let easing = self.config.easing;
		self.current = ViewTransform {
			x: approach(self.current.x, self.target.x, easing),
			y: approach(self.current.y, self.target.y, easing),
			k: approach(self.current.k, self.target.k, easing),
		};
		self.is_moving()
	}

	/// Whether the current transform has not reached the target yet.
	pub fn is_moving(&self) -> bool {
		self.current != self.target
	}

	/// Jump straight to the target.
	pub fn snap_to_target(&mut self) {
		self.current = self.target;
	}

	/// Zoom around the screen point `(sx, sy)` by one wheel notch.
	///
	/// Negative `delta_y` (wheel up) zooms in. The world point under the cursor
	/// is taken from the current transform before the scale changes, and the
	/// new target offset maps it back onto `(sx, sy)`.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		if delta_y == 0.0 {
			return;
		}
		let factor = if delta_y < 0.0 {
			self.config.zoom_step
		} else {
			1.0 / self.config.zoom_step
		};
		self.zoom_to(sx, sy, self.target.k * factor);
	}

	/// Set the target zoom to `k` (clamped), keeping the world point under `(sx, sy)` fixed.
	pub fn zoom_to(&mut self, sx: f64, sy: f64, k: f64) {
		let (wx, wy) = self.screen_to_world(sx, sy);
		let k = self.clamp_zoom(k);
		self.target = ViewTransform {
			x: sx - wx * k,
			y: sy - wy * k,
			k,
		};
	}

	/// Follow a live pan 1:1. Current and target shift together, so a zoom
	/// still easing stays anchored on the point the cursor was over.
	pub fn pan_by(&mut self, dx: f64, dy: f64) {
		for view in [&mut self.current, &mut self.target] {
			view.x += dx;
			view.y += dy;
		}
	}

	/// Aim the target so `(wx, wy)` ends up in the middle of the viewport at the target zoom.
	pub fn center_on(&mut self, wx: f64, wy: f64) {
		let k = self.target.k;
		self.target.x = self.width / 2.0 - wx * k;
		self.target.y = self.height / 2.0 - wy * k;
	}

	/// Track a viewport size change, keeping whatever was at the centre there.
	pub fn resize(&mut self, width: f64, height: f64) {
		let (dx, dy) = ((width - self.width) / 2.0, (height - self.height) / 2.0);
		for view in [&mut self.current, &mut self.target] {
			view.x += dx;
			view.y += dy;
		}
		self.width = width;
		self.height = height;
	}
}

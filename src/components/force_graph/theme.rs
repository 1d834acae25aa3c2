//! Colours and per-element styles.
//!
//! A [`Theme`] is picked by name from [`GraphConfig::theme`](super::config::GraphConfig)
//! and handed to the renderer once per frame.

/// An sRGB colour with straight alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Opacity in `[0, 1]`.
	pub a: f64,
}

impl Color {
	/// Opaque colour from a `0xRRGGBB` literal.
	pub const fn hex(rgb: u32) -> Self {
		Self {
			r: (rgb >> 16) as u8,
			g: (rgb >> 8) as u8,
			b: rgb as u8,
			a: 1.0,
		}
	}

	/// Colour from channels and opacity.
	pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
		Self { r, g, b, a }
	}

	/// Same colour with opacity replaced by `a`.
	pub const fn alpha(self, a: f64) -> Self {
		Self {
			r: self.r,
			g: self.g,
			b: self.b,
			a,
		}
	}

	/// Multiply the current alpha by `factor`.
	pub fn fade(self, factor: f64) -> Self {
		self.alpha(self.a * factor.clamp(0.0, 1.0))
	}

	/// Blend towards `other` by `t` in `[0, 1]`; alpha is kept.
	pub fn mix(self, other: Color, t: f64) -> Self {
		let t = t.clamp(0.0, 1.0);
		let channel = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
		Self {
			r: channel(self.r, other.r),
			g: channel(self.g, other.g),
			b: channel(self.b, other.b),
			a: self.a,
		}
	}

	/// Blend towards white by `t`.
	pub fn lighten(self, t: f64) -> Self {
		self.mix(Color::hex(0xffffff), t)
	}

	/// CSS colour string: `#rrggbb` when opaque, `rgba(..)` otherwise.
	pub fn to_css(self) -> String {
		if self.a >= 0.999 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Node fill colours, indexed by group.
#[derive(Clone, Debug)]
pub struct NodePalette {
	/// Never empty.
	pub colors: Vec<Color>,
}

impl NodePalette {
	fn from_hex(values: &[u32]) -> Self {
		Self {
			colors: values.iter().map(|&v| Color::hex(v)).collect(),
		}
	}

	/// Well-separated hues for dark backgrounds.
	pub fn categorical() -> Self {
		Self::from_hex(&[
			0x5e81ac, 0xd08770, 0xa3be8c, 0xb48ead, 0xebcb8b, 0x88c0d0, 0xbf616a, 0x8fbcbb,
		])
	}

	/// Cool blues and greens at similar lightness.
	pub fn tide() -> Self {
		Self::from_hex(&[
			0x4c8cbf, 0x3fa7a0, 0x6b7fd7, 0x58b368, 0x7aa6c2, 0x2f8f83, 0x8c9ed9,
		])
	}

	/// Saturated hues for print-like light backgrounds.
	pub fn ink() -> Self {
		Self::from_hex(&[0x1f5fa8, 0xb5472c, 0x2e7d32, 0x7b3fa0, 0xa57c00, 0x00838f])
	}

	/// Colour for `group`; groups past the end of the palette wrap around.
	pub fn get(&self, group: u32) -> Color {
		self.colors[group as usize % self.colors.len()]
	}
}

/// Canvas fill and grid.
#[derive(Clone, Debug)]
pub struct BackgroundStyle {
	/// Canvas fill.
	pub color: Color,
	/// Minor grid lines.
	pub grid_color: Color,
	/// Every fifth line.
	pub grid_major_color: Color,
	/// World units between lines before zoom thinning.
	pub grid_spacing: f64,
}

/// Edge strokes and travelling dots.
#[derive(Clone, Debug)]
pub struct EdgeStyle {
	/// Default stroke.
	pub color: Color,
	/// Edges incident to the selected node.
	pub emphasis_color: Color,
	/// Dots travelling along emphasised edges.
	pub dot_color: Color,
	/// World units per second.
	pub dot_speed: f64,
}

/// Node outlines and overlays. Fills come from the [`NodePalette`].
#[derive(Clone, Debug)]
pub struct NodeStyle {
	/// Outline of free nodes.
	pub outline_color: Color,
	/// Outline of pinned nodes.
	pub pinned_outline_color: Color,
	/// Pulsing halo around the selected node.
	pub halo_color: Color,
	/// Halo pulses per second.
	pub pulse_speed: f64,
	/// Ring around the hovered node.
	pub hover_ring_color: Color,
	/// Alpha for nodes outside the selection's neighbourhood.
	pub dim_alpha: f64,
}

/// Node labels.
#[derive(Clone, Debug)]
pub struct LabelStyle {
	/// Text fill.
	pub color: Color,
	/// CSS font family; size comes from the zoom rules.
	pub font_family: &'static str,
}

/// Everything the renderer needs to pick a colour.
#[derive(Clone, Debug)]
pub struct Theme {
	/// Name accepted by [`Theme::by_name`].
	pub name: &'static str,
	/// Canvas fill and grid.
	pub background: BackgroundStyle,
	/// Edge strokes.
	pub edge: EdgeStyle,
	/// Node outlines and overlays.
	pub node: NodeStyle,
	/// Label text.
	pub label: LabelStyle,
	/// Node fills by group.
	pub palette: NodePalette,
}

impl Theme {
	/// Slate background with muted categorical nodes.
	pub fn default_theme() -> Self {
		let line = Color::hex(0x8ca0b4);
		Self {
			name: "default",
			background: BackgroundStyle {
				color: Color::hex(0x161b22),
				grid_color: line.alpha(0.06),
				grid_major_color: line.alpha(0.12),
				grid_spacing: 50.0,
			},
			edge: EdgeStyle {
				color: line.alpha(0.45),
				emphasis_color: Color::hex(0xd2e1f0).alpha(0.9),
				dot_color: Color::hex(0xc8dcff).alpha(0.8),
				dot_speed: 60.0,
			},
			node: NodeStyle {
				outline_color: Color::hex(0xffffff).alpha(0.35),
				pinned_outline_color: Color::hex(0xebcb8b),
				halo_color: Color::hex(0x88c0d0).alpha(0.35),
				pulse_speed: 1.2,
				hover_ring_color: Color::hex(0xffffff).alpha(0.8),
				dim_alpha: 0.55,
			},
			label: LabelStyle {
				color: Color::hex(0xffffff).alpha(0.85),
				font_family: "sans-serif",
			},
			palette: NodePalette::categorical(),
		}
	}

	/// Near-black background with cool nodes.
	pub fn midnight() -> Self {
		let line = Color::hex(0x647896);
		Self {
			name: "midnight",
			background: BackgroundStyle {
				color: Color::hex(0x0e1118),
				grid_color: line.alpha(0.05),
				grid_major_color: line.alpha(0.11),
				grid_spacing: 60.0,
			},
			edge: EdgeStyle {
				color: line.alpha(0.5),
				emphasis_color: Color::hex(0xb4c8eb).alpha(0.9),
				dot_color: Color::hex(0xa0bef0).alpha(0.75),
				dot_speed: 50.0,
			},
			node: NodeStyle {
				outline_color: Color::hex(0xc8d2e6).alpha(0.3),
				pinned_outline_color: Color::hex(0xdcb478),
				halo_color: Color::hex(0x6b7fd7).alpha(0.4),
				pulse_speed: 1.0,
				hover_ring_color: Color::hex(0xdce6ff).alpha(0.8),
				dim_alpha: 0.45,
			},
			label: LabelStyle {
				color: Color::hex(0xdce4f0).alpha(0.85),
				font_family: "sans-serif",
			},
			palette: NodePalette::tide(),
		}
	}

	/// Light background for embedding next to documents.
	pub fn paper() -> Self {
		let line = Color::hex(0x5a6473);
		Self {
			name: "paper",
			background: BackgroundStyle {
				color: Color::hex(0xf7f5f0),
				grid_color: line.alpha(0.0),
				grid_major_color: line.alpha(0.08),
				grid_spacing: 80.0,
			},
			edge: EdgeStyle {
				color: line.alpha(0.35),
				emphasis_color: Color::hex(0x1e2630).alpha(0.85),
				dot_color: Color::hex(0x1f5fa8).alpha(0.6),
				dot_speed: 40.0,
			},
			node: NodeStyle {
				outline_color: Color::hex(0x1e2630).alpha(0.35),
				pinned_outline_color: Color::hex(0xa57c00),
				halo_color: Color::hex(0x1f5fa8).alpha(0.2),
				pulse_speed: 0.8,
				hover_ring_color: Color::hex(0x1e2630).alpha(0.7),
				dim_alpha: 0.35,
			},
			label: LabelStyle {
				color: Color::hex(0x1e2630).alpha(0.9),
				font_family: "serif",
			},
			palette: NodePalette::ink(),
		}
	}

	/// Preset called `name`, if there is one.
	pub fn by_name(name: &str) -> Option<Self> {
		match name {
			"default" => Some(Self::default_theme()),
			"midnight" => Some(Self::midnight()),
			"paper" => Some(Self::paper()),
			_ => None,
		}
	}
}

impl Default for Theme {
	fn default() -> Self {
		Self::default_theme()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn hex_literals_split_into_channels() {
		assert_eq!(Color::hex(0x5e81ac), Color::rgba(0x5e, 0x81, 0xac, 1.0));
	}

	#[test]
	fn groups_wrap_around_palette() {
		let palette = NodePalette::categorical();
		let n = palette.colors.len() as u32;
		assert_eq!(palette.get(1), palette.get(1 + n));
	}

	#[test]
	fn css_output() {
		assert_eq!(Color::hex(0xff0010).to_css(), "#ff0010");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).to_css(), "rgba(1, 2, 3, 0.5)");
		assert_eq!(Color::rgba(1, 2, 3, 0.5).fade(0.5).a, 0.25);
	}

	#[test]
	fn lighten_moves_towards_white() {
		let c = Color::hex(0x000000).alpha(0.5).lighten(0.5);
		assert_eq!((c.r, c.g, c.b, c.a), (128, 128, 128, 0.5));
		assert_eq!(Color::hex(0x123456).lighten(0.0), Color::hex(0x123456));
	}

	#[test]
	fn themes_resolve_by_name() {
		for name in ["default", "midnight", "paper"] {
			assert_eq!(Theme::by_name(name).map(|t| t.name), Some(name));
		}
		assert!(Theme::by_name("neon").is_none());
	}
}

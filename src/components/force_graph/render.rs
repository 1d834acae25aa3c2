//! Canvas rendering for the force graph.
//!
//! Handles all drawing operations: background, grid, edges, nodes and labels.
//! Rendering uses multiple passes for correct z-ordering:
//! 1. Background and grid (screen space)
//! 2. Edges, emphasised edges, then traveling dots (world space)
//! 3. Selection halo, nodes, hover ring, then labels on top
//!
//! Everything is drawn in CSS pixels; the device pixel ratio is folded into
//! the base transform so the canvas backing store can be larger than its box.

use std::f64::consts::{PI, TAU};

use web_sys::CanvasRenderingContext2d;

use super::model::{Node, NodeIdx};
use super::scale::{ScaleConfig, ScaledValues};
use super::simulation::Simulation;
use super::theme::Theme;

/// World-space grid spacing for zoom `k`: doubled or halved from `base` until
/// neighbouring lines are between `min_gap` and `8 * min_gap` pixels apart.
pub fn grid_step(base: f64, k: f64, min_gap: f64) -> f64 {
	let mut step = base;
	while step * k < min_gap {
		step *= 2.0;
	}
	while step * k > min_gap * 8.0 {
		step /= 2.0;
	}
	step
}

/// Grid line positions covering `[min, max]`, flagging every fifth as major.
pub fn grid_lines(min: f64, max: f64, step: f64) -> impl Iterator<Item = (f64, bool)> {
	let first = (min / step).floor() as i64;
	let last = (max / step).ceil() as i64;
	(first..=last).map(move |i| (i as f64 * step, i.rem_euclid(5) == 0))
}

/// Position of the decorative dot along an edge, as a fraction in `[0, 1)`.
///
/// The dot moves at `speed` world units per second; each edge is phase-shifted
/// by the golden ratio so dots do not march in lockstep.
pub fn travel_fraction(clock: f64, speed: f64, length: f64, edge_index: usize) -> f64 {
	let phase = (edge_index as f64 * 0.618_033_988_75).fract();
	(clock * speed / length.max(1.0) + phase).rem_euclid(1.0)
}

/// Radius of the pulsing halo drawn behind the selected node.
pub fn halo_radius(radius: f64, clock: f64, pulse_speed: f64) -> f64 {
	radius * (1.8 + 0.35 * (clock * pulse_speed * TAU).sin())
}

/// Labels show when zoomed in far enough, or for the node being pointed at or selected.
pub fn label_visible(labels_by_zoom: bool, hovered: bool, selected: bool) -> bool {
	labels_by_zoom || hovered || selected
}

/// Renders the complete graph to the canvas.
pub fn render(
	sim: &Simulation,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	theme: &Theme,
	pixel_ratio: f64,
) {
	let view = sim.camera.current();
	let (width, height) = sim.camera.viewport();
	let scale = ScaledValues::new(config, view.k, theme.label.font_family);

	let _ = ctx.set_transform(pixel_ratio, 0.0, 0.0, pixel_ratio, 0.0, 0.0);
	ctx.set_global_alpha(1.0);
	ctx.clear_rect(0.0, 0.0, width, height);
	ctx.set_fill_style_str(&theme.background.color.to_css());
	ctx.fill_rect(0.0, 0.0, width, height);

	draw_grid(sim, ctx, config, &scale, theme);

	ctx.save();
	let _ = ctx.translate(view.x, view.y);
	let _ = ctx.scale(view.k, view.k);

	draw_edges(sim, ctx, &scale, theme);
	draw_nodes(sim, ctx, &scale, theme);
	draw_labels(sim, ctx, &scale, theme);

	ctx.restore();
}

fn draw_grid(
	sim: &Simulation,
	ctx: &CanvasRenderingContext2d,
	config: &ScaleConfig,
	scale: &ScaledValues,
	theme: &Theme,
) {
	if scale.grid_alpha < 0.01 {
		return;
	}
	let view = sim.camera.current();
	let (width, height) = sim.camera.viewport();
	let (x0, y0, x1, y1) = sim.camera.visible_world_bounds();
	let step = grid_step(theme.background.grid_spacing, view.k, config.grid_min_gap);

	for (major, color) in [
		(false, theme.background.grid_color),
		(true, theme.background.grid_major_color),
	] {
		if color.a <= 0.0 {
			continue;
		}
		ctx.begin_path();
		for (wx, is_major) in grid_lines(x0, x1, step) {
			if is_major == major {
				let sx = (wx * view.k + view.x).round() + 0.5;
				ctx.move_to(sx, 0.0);
				ctx.line_to(sx, height);
			}
		}
		for (wy, is_major) in grid_lines(y0, y1, step) {
			if is_major == major {
				let sy = (wy * view.k + view.y).round() + 0.5;
				ctx.move_to(0.0, sy);
				ctx.line_to(width, sy);
			}
		}
		ctx.set_stroke_style_str(&color.fade(scale.grid_alpha).to_css());
		ctx.set_line_width(1.0);
		ctx.stroke();
	}
}

fn draw_edges(sim: &Simulation, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	let nodes = sim.model.nodes();
	let edges = sim.model.edges();
	let emphasised = |i: usize| sim.selected.is_some_and(|sel| edges[i].touches(sel));

	for emphasis in [false, true] {
		ctx.begin_path();
		let mut any = false;
		for (i, edge) in edges.iter().enumerate() {
			if emphasised(i) != emphasis {
				continue;
			}
			let (s, t) = (&nodes[edge.source.index()], &nodes[edge.target.index()]);
			ctx.move_to(s.x, s.y);
			ctx.line_to(t.x, t.y);
			any = true;
		}
		if !any {
			continue;
		}
		let (color, width) = if emphasis {
			(theme.edge.emphasis_color, scale.emphasis_edge_width)
		} else {
			(theme.edge.color, scale.edge_width)
		};
		ctx.set_stroke_style_str(&color.to_css());
		ctx.set_line_width(width);
		ctx.stroke();
	}

	if scale.dot_alpha < 0.01 || edges.is_empty() {
		return;
	}
	ctx.begin_path();
	for (i, edge) in edges.iter().enumerate() {
		let (s, t) = (&nodes[edge.source.index()], &nodes[edge.target.index()]);
		let length = s.distance_to(t.x, t.y);
		if length <= s.radius + t.radius {
			continue;
		}
		let f = travel_fraction(sim.clock, theme.edge.dot_speed, length, i);
		let (x, y) = (s.x + (t.x - s.x) * f, s.y + (t.y - s.y) * f);
		ctx.move_to(x + scale.dot_radius, y);
		let _ = ctx.arc(x, y, scale.dot_radius, 0.0, TAU);
	}
	ctx.set_fill_style_str(&theme.edge.dot_color.fade(scale.dot_alpha).to_css());
	ctx.fill();
}

fn node_alpha(sim: &Simulation, idx: NodeIdx, theme: &Theme) -> f64 {
	if sim.selected.is_none() || sim.is_near_selection(idx) || sim.is_hovered(idx) {
		1.0
	} else {
		theme.node.dim_alpha
	}
}

fn draw_nodes(sim: &Simulation, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	if let Some(sel) = sim.selected {
		let node = sim.model.node(sel);
		ctx.begin_path();
		let _ = ctx.arc(
			node.x,
			node.y,
			halo_radius(node.radius, sim.clock, theme.node.pulse_speed),
			0.0,
			2.0 * PI,
		);
		ctx.set_fill_style_str(&theme.node.halo_color.to_css());
		ctx.fill();
	}

	for (idx, node) in sim.model.indices().zip(sim.model.nodes()) {
		ctx.set_global_alpha(node_alpha(sim, idx, theme));
		draw_node(ctx, node, sim.is_selected(idx), scale, theme);
	}
	ctx.set_global_alpha(1.0);

	if let Some(idx) = sim.hovered {
		let node = sim.model.node(idx);
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, node.radius + scale.ring_offset, 0.0, 2.0 * PI);
		ctx.set_stroke_style_str(&theme.node.hover_ring_color.to_css());
		ctx.set_line_width(scale.ring_width);
		ctx.stroke();
	}
}

fn draw_node(
	ctx: &CanvasRenderingContext2d,
	node: &Node,
	selected: bool,
	scale: &ScaledValues,
	theme: &Theme,
) {
	let base = theme.palette.get(node.group);
	let fill = if selected { base.lighten(0.25) } else { base };

	ctx.begin_path();
	let _ = ctx.arc(node.x, node.y, node.radius, 0.0, 2.0 * PI);
	ctx.set_fill_style_str(&fill.to_css());
	ctx.fill();

	let (outline, width) = if node.pinned {
		(theme.node.pinned_outline_color, scale.outline_width * 1.5)
	} else {
		(theme.node.outline_color, scale.outline_width)
	};
	ctx.set_stroke_style_str(&outline.to_css());
	ctx.set_line_width(width);
	ctx.stroke();
}

fn draw_labels(sim: &Simulation, ctx: &CanvasRenderingContext2d, scale: &ScaledValues, theme: &Theme) {
	ctx.set_font(&scale.label_font);
	ctx.set_text_baseline("middle");
	ctx.set_fill_style_str(&theme.label.color.to_css());

	for (idx, node) in sim.model.indices().zip(sim.model.nodes()) {
		if !label_visible(scale.labels_by_zoom, sim.is_hovered(idx), sim.is_selected(idx)) {
			continue;
		}
		ctx.set_global_alpha(node_alpha(sim, idx, theme));
		let _ = ctx.fill_text(
			node.display_name(),
			node.x + node.radius + scale.ring_offset,
			node.y,
		);
	}
	ctx.set_global_alpha(1.0);
}

//! Leptos component wrapping the force-directed graph canvas.
//!
//! The component creates an HTML canvas element and wires up mouse/wheel event
//! handlers for node dragging, panning, and zooming. An animation loop runs via
//! `requestAnimationFrame`, stepping the simulation and rendering each frame.
//! The loop and the resize observer are torn down when the component unmounts.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{debug, error, warn};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent, ResizeObserver, WheelEvent,
	Window,
};

use super::config::GraphConfig;
use super::frame::FrameLoop;
use super::input::InputEvent;
use super::render;
use super::scale::ScaleConfig;
use super::simulation::{GraphEvent, Simulation};
use super::theme::Theme;
use super::types::GraphData;
use crate::error::GraphError;

/// Bundles the simulation with what is needed to draw it.
struct GraphContext {
	sim: Simulation,
	scale: ScaleConfig,
	theme: Theme,
	canvas: HtmlCanvasElement,
	ctx: CanvasRenderingContext2d,
	pixel_ratio: f64,
}

/// Browser resources that must be released on unmount.
struct Mounted {
	frames: Rc<FrameLoop>,
	observer: Option<ResizeObserver>,
	window: Window,
	on_resize: Closure<dyn FnMut()>,
	fullscreen: bool,
}

impl Mounted {
	fn teardown(self) {
		self.frames.cancel();
		if let Some(observer) = self.observer {
			observer.disconnect();
		}
		if self.fullscreen {
			let _ = self
				.window
				.remove_event_listener_with_callback("resize", self.on_resize.as_ref().unchecked_ref());
		}
		debug!("focus-graph: unmounted");
	}
}

type Shared<T> = Rc<RefCell<Option<T>>>;

/// Renders an interactive force-directed graph on a canvas element.
///
/// Pass graph data via the reactive `data` signal; a change rebuilds the
/// simulation in place. The component sizes itself to its parent container by
/// default; set `fullscreen = true` to fill the viewport and resize
/// automatically with the window. Explicit `width`/`height` override automatic
/// sizing.
///
/// `focus` carries the id of a node to bring to the centre of the view; setting
/// it back to `None` clears the highlight. Clicking a node reports its id
/// through `on_node_activate`. While `paused` is `Some(true)` the layout is
/// frozen; panning, zooming and dragging keep working.
#[component]
pub fn ForceGraphCanvas(
	#[prop(into)] data: Signal<GraphData>,
	#[prop(into, default = Signal::stored(GraphConfig::default()))] config: Signal<GraphConfig>,
	#[prop(into, optional)] focus: MaybeProp<String>,
	#[prop(optional)] on_node_activate: Option<Callback<String>>,
	#[prop(into, optional)] paused: MaybeProp<bool>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let context: Shared<GraphContext> = Rc::new(RefCell::new(None));
	let mounted: Shared<Mounted> = Rc::new(RefCell::new(None));

	let (context_init, mounted_init) = (context.clone(), mounted.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let data = data.get();
		let config = config.get().or_default_on_error();

		if let Some(ref mut c) = *context_init.borrow_mut() {
			let (w, h) = c.sim.camera.viewport();
			c.sim = build_simulation(&data, &config, w, h);
			c.theme = resolve_theme(&config.theme);
			c.sim.running = !paused.get_untracked().unwrap_or(false);
			if let Some(id) = focus.get_untracked() {
				c.sim.focus_node(&id);
			}
			return;
		}

		let sizing = Sizing {
			fullscreen,
			width,
			height,
		};
		match mount(&canvas, &data, &config, sizing, &context_init) {
			Ok(m) => {
				if let Some(ref mut c) = *context_init.borrow_mut() {
					c.sim.running = !paused.get_untracked().unwrap_or(false);
					if let Some(id) = focus.get_untracked() {
						c.sim.focus_node(&id);
					}
				}
				*mounted_init.borrow_mut() = Some(m);
			}
			Err(e) => error!("focus-graph: failed to start graph view: {e}"),
		}
	});

	let context_focus = context.clone();
	Effect::new(move |_| {
		let target = focus.get();
		if let Some(ref mut c) = *context_focus.borrow_mut() {
			match target {
				Some(id) => {
					c.sim.focus_node(&id);
				}
				None => c.sim.clear_focus(),
			}
		}
	});

	let context_pause = context.clone();
	Effect::new(move |_| {
		let running = !paused.get().unwrap_or(false);
		if let Some(ref mut c) = *context_pause.borrow_mut() {
			c.sim.running = running;
		}
	});

	let cleanup = SendWrapper::new((context.clone(), mounted));
	on_cleanup(move || {
		let (context, mounted) = cleanup.take();
		if let Some(m) = mounted.borrow_mut().take() {
			m.teardown();
		}
		context.borrow_mut().take();
	});

	let dispatch = {
		let context = context.clone();
		Rc::new(move |event: InputEvent| {
			let activated = {
				let mut guard = context.borrow_mut();
				let Some(c) = guard.as_mut() else {
					return;
				};
				let outcome = c.sim.handle_input(event);
				let _ = HtmlElement::style(&c.canvas).set_property("cursor", c.sim.cursor());
				outcome
			};
			if let (Some(GraphEvent::NodeActivated { id }), Some(callback)) =
				(activated, on_node_activate)
			{
				callback.run(id);
			}
		})
	};

	let local = move |ev: &MouseEvent| -> Option<(f64, f64)> {
		let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
		let rect = canvas.get_bounding_client_rect();
		Some((
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		))
	};

	let dispatch_md = dispatch.clone();
	let on_mousedown = move |ev: MouseEvent| {
		if ev.button() != 0 {
			return;
		}
		if let Some((x, y)) = local(&ev) {
			dispatch_md(InputEvent::PointerDown { x, y });
		}
	};

	let dispatch_mm = dispatch.clone();
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = local(&ev) {
			dispatch_mm(InputEvent::PointerMove { x, y });
		}
	};

	let dispatch_mu = dispatch.clone();
	let on_mouseup = move |ev: MouseEvent| {
		if let Some((x, y)) = local(&ev) {
			dispatch_mu(InputEvent::PointerUp { x, y });
		}
	};

	let dispatch_ml = dispatch.clone();
	let on_mouseleave = move |_: MouseEvent| {
		dispatch_ml(InputEvent::PointerLeave);
	};

	let dispatch_dc = dispatch.clone();
	let on_dblclick = move |ev: MouseEvent| {
		if let Some((x, y)) = local(&ev) {
			dispatch_dc(InputEvent::DoubleClick { x, y });
		}
	};

	let dispatch_wh = dispatch;
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let mouse: &MouseEvent = &ev;
		if let Some((x, y)) = local(mouse) {
			dispatch_wh(InputEvent::Wheel {
				x,
				y,
				delta_y: ev.delta_y(),
			});
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="force-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:dblclick=on_dblclick
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

#[derive(Clone, Copy)]
struct Sizing {
	fullscreen: bool,
	width: Option<f64>,
	height: Option<f64>,
}

impl Sizing {
	/// Canvas size in CSS pixels.
	fn measure(&self, window: &Window, canvas: &HtmlCanvasElement) -> Result<(f64, f64), GraphError> {
		if self.fullscreen {
			let w = window.inner_width()?.as_f64().unwrap_or(800.0);
			let h = window.inner_height()?.as_f64().unwrap_or(600.0);
			return Ok((w, h));
		}
		let parent = canvas.parent_element();
		let from_parent = |f: fn(&web_sys::Element) -> i32, fallback: f64| {
			parent
				.as_ref()
				.map(|p| f(p) as f64)
				.filter(|v| *v > 0.0)
				.unwrap_or(fallback)
		};
		Ok((
			self.width
				.unwrap_or_else(|| from_parent(web_sys::Element::client_width, 800.0)),
			self.height
				.unwrap_or_else(|| from_parent(web_sys::Element::client_height, 600.0)),
		))
	}
}

/// Size the backing store for the device pixel ratio while keeping the CSS box.
fn fit_canvas(canvas: &HtmlCanvasElement, w: f64, h: f64, pixel_ratio: f64) -> Result<(), GraphError> {
	canvas.set_width((w * pixel_ratio).round().max(1.0) as u32);
	canvas.set_height((h * pixel_ratio).round().max(1.0) as u32);
	let style = HtmlElement::style(canvas);
	style.set_property("width", &format!("{w}px"))?;
	style.set_property("height", &format!("{h}px"))?;
	Ok(())
}

fn resolve_theme(name: &str) -> Theme {
	Theme::by_name(name).unwrap_or_else(|| {
		warn!("focus-graph: unknown theme {name:?}, using default");
		Theme::default()
	})
}

fn build_simulation(data: &GraphData, config: &GraphConfig, w: f64, h: f64) -> Simulation {
	let seed = config
		.seed
		.unwrap_or_else(|| (js_sys::Math::random() * u32::MAX as f64) as u64);
	let mut rng = SmallRng::seed_from_u64(seed);
	debug!("focus-graph: layout seed {seed}");
	Simulation::new(data, config, w, h, &mut rng)
}

fn mount(
	canvas: &HtmlCanvasElement,
	data: &GraphData,
	config: &GraphConfig,
	sizing: Sizing,
	context: &Shared<GraphContext>,
) -> Result<Mounted, GraphError> {
	let window = web_sys::window().ok_or(GraphError::NoWindow)?;
	let pixel_ratio = window.device_pixel_ratio().max(1.0);
	let (w, h) = sizing.measure(&window, canvas)?;
	fit_canvas(canvas, w, h, pixel_ratio)?;

	let ctx: CanvasRenderingContext2d = canvas
		.get_context("2d")?
		.ok_or(GraphError::NoContext)?
		.dyn_into()
		.map_err(|_| GraphError::NoContext)?;

	*context.borrow_mut() = Some(GraphContext {
		sim: build_simulation(data, config, w, h),
		scale: ScaleConfig::default(),
		theme: resolve_theme(&config.theme),
		canvas: canvas.clone(),
		ctx,
		pixel_ratio,
	});

	let (context_resize, canvas_resize) = (context.clone(), canvas.clone());
	let on_resize: Closure<dyn FnMut()> = Closure::new(move || {
		let Some(win) = web_sys::window() else {
			return;
		};
		let (nw, nh) = match sizing.measure(&win, &canvas_resize) {
			Ok(size) => size,
			Err(e) => {
				warn!("focus-graph: resize failed: {e}");
				return;
			}
		};
		let ratio = win.device_pixel_ratio().max(1.0);
		if let Some(ref mut c) = *context_resize.borrow_mut() {
			if c.sim.camera.viewport() == (nw, nh) && c.pixel_ratio == ratio {
				return;
			}
			if let Err(e) = fit_canvas(&canvas_resize, nw, nh, ratio) {
				warn!("focus-graph: resize failed: {e}");
			}
			c.pixel_ratio = ratio;
			c.sim.resize(nw, nh);
		}
	});

	let observer = if sizing.fullscreen {
		window.add_event_listener_with_callback("resize", on_resize.as_ref().unchecked_ref())?;
		None
	} else {
		match canvas.parent_element() {
			Some(parent) => {
				let observer = ResizeObserver::new(on_resize.as_ref().unchecked_ref())?;
				observer.observe(&parent);
				Some(observer)
			}
			None => None,
		}
	};

	let (context_anim, canvas_anim) = (context.clone(), canvas.clone());
	let mut last_frame: Option<f64> = None;
	let frames = FrameLoop::start(window.clone(), move |timestamp| {
		if !canvas_anim.is_connected() {
			return false;
		}
		let dt = last_frame.map_or(0.0, |prev| ((timestamp - prev) / 1000.0).max(0.0));
		last_frame = Some(timestamp);
		if let Some(ref mut c) = *context_anim.borrow_mut() {
			c.sim.tick(dt);
			render::render(&c.sim, &c.ctx, &c.scale, &c.theme, c.pixel_ratio);
		}
		true
	});

	Ok(Mounted {
		frames,
		observer,
		window,
		on_resize,
		fullscreen: sizing.fullscreen,
	})
}

//! focus-graph: Interactive force-directed graph view with focus-on-node.
//!
//! This crate provides a WASM-based graph visualization component that renders
//! node-link data with physics-based layout, drag-to-pin, eased pan/zoom, and a
//! "jump to node" entry point for collaborating features.

use std::time::Duration;

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, error, info};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

pub mod components;
pub mod error;

pub use components::force_graph::{
	ForceGraphCanvas, GraphConfig, GraphData, GraphEvent, GraphLink, GraphNode, Simulation,
};
pub use error::GraphError;

/// How long a "jump to node" highlight stays before the app clears it.
const FOCUS_HIGHLIGHT: Duration = Duration::from_secs(3);

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("focus-graph: logging initialized");
}

fn parse_embedded<T: DeserializeOwned>(id: &str, text: &str) -> Result<T, GraphError> {
	serde_json::from_str(text).map_err(|source| GraphError::Json {
		id: id.to_string(),
		source,
	})
}

/// Read and parse the JSON body of `<script id="{id}">`.
///
/// Returns `Ok(None)` when the page has no such element.
pub fn load_json_element<T: DeserializeOwned>(id: &str) -> Result<Option<T>, GraphError> {
	let window = web_sys::window().ok_or(GraphError::NoWindow)?;
	let document = window.document().ok_or(GraphError::NoDocument)?;
	let Some(element) = document.get_element_by_id(id) else {
		return Ok(None);
	};
	let script: HtmlScriptElement = element
		.dyn_into()
		.map_err(|_| GraphError::NotAScript(id.to_string()))?;
	let text = script.text()?;
	parse_embedded(id, &text).map(Some)
}

fn load_or_default<T: DeserializeOwned + Default>(id: &str) -> T {
	match load_json_element(id) {
		Ok(Some(value)) => value,
		Ok(None) => {
			info!("focus-graph: no #{id} element, using defaults");
			T::default()
		}
		Err(e) => {
			error!("focus-graph: {e}");
			T::default()
		}
	}
}

/// Main application component.
/// Loads graph data and configuration from the DOM and renders the view with
/// a small "jump to node" form and a list of recently clicked nodes.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let graph_data: GraphData = load_or_default("graph-data");
	let config = load_or_default::<GraphConfig>("graph-config").or_default_on_error();
	let known_ids: Vec<String> = graph_data.nodes.iter().map(|n| n.id.clone()).collect();

	let graph_signal = Signal::stored(graph_data);
	let config_signal = Signal::stored(config);
	let focus = RwSignal::new(None::<String>);
	let query = RwSignal::new(String::new());
	let status = RwSignal::new(None::<String>);
	let activated = RwSignal::new(Vec::<String>::new());
	let paused = RwSignal::new(false);

	let jump = move |id: String| {
		focus.set(Some(id.clone()));
		set_timeout(
			move || {
				if focus.get_untracked().as_deref() == Some(id.as_str()) {
					focus.set(None);
				}
			},
			FOCUS_HIGHLIGHT,
		);
	};

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		let id = query.get_untracked().trim().to_string();
		if id.is_empty() {
			return;
		}
		if known_ids.contains(&id) {
			status.set(None);
			jump(id);
		} else {
			status.set(Some(format!("No node named \"{id}\"")));
		}
	};

	let on_node_activate = Callback::new(move |id: String| {
		activated.update(|list| {
			list.retain(|existing| existing != &id);
			list.insert(0, id);
			list.truncate(8);
		});
	});

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Focus Graph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<div class="fullscreen-graph">
			<ForceGraphCanvas
				data=graph_signal
				config=config_signal
				focus=Signal::derive(move || focus.get())
				on_node_activate=on_node_activate
				paused=Signal::derive(move || Some(paused.get()))
				fullscreen=true
			/>
			<div class="graph-overlay">
				<h1>"Focus Graph"</h1>
				<p class="subtitle">
					"Drag nodes to pin them. Double-click to release. Scroll to zoom. Drag background to pan."
				</p>
				<form class="jump-form" on:submit=on_submit>
					<input
						type="text"
						placeholder="Jump to node id"
						prop:value=move || query.get()
						on:input=move |ev| query.set(event_target_value(&ev))
					/>
					<button type="submit">"Go"</button>
				</form>
				<button class="pause" on:click=move |_| paused.update(|p| *p = !*p)>
					{move || if paused.get() { "Resume layout" } else { "Pause layout" }}
				</button>
				<Show when=move || status.with(Option::is_some)>
					<p class="status">{move || status.get().unwrap_or_default()}</p>
				</Show>
				<ul class="activated">
					<For
						each=move || activated.get()
						key=|id: &String| id.clone()
						children=move |id: String| {
							let target = id.clone();
							view! {
								<li>
									<button on:click=move |_| jump(target.clone())>{id}</button>
								</li>
							}
						}
					/>
				</ul>
			</div>
		</div>
	}
}

//! Error types for the browser-facing surface of the crate.
//!
//! The engine itself never fails: bad caller data degrades to warnings (see
//! [`LoadWarning`](crate::components::force_graph::LoadWarning)). Only talking
//! to the DOM can go wrong, and those failures end up here.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures while wiring the graph view into the page.
#[derive(Debug, Error)]
pub enum GraphError {
	/// `window` is missing, e.g. outside a browser.
	#[error("browser window is not available")]
	NoWindow,
	/// The window has no document.
	#[error("document is not available")]
	NoDocument,
	/// `getContext("2d")` returned nothing.
	#[error("canvas has no 2d rendering context")]
	NoContext,
	/// An embedded data element that is not a `<script>`.
	#[error("element #{0} is not a <script> element")]
	NotAScript(String),
	/// Embedded JSON that does not parse.
	#[error("invalid JSON in #{id}: {source}")]
	Json {
		/// Element id.
		id: String,
		/// Parser error.
		#[source]
		source: serde_json::Error,
	},
	/// Exception thrown by a browser API.
	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for GraphError {
	fn from(value: JsValue) -> Self {
		GraphError::Js(
			value
				.as_string()
				.unwrap_or_else(|| format!("{value:?}")),
		)
	}
}

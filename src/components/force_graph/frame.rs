//! `requestAnimationFrame` driver that can be stopped.
//!
//! The loop owns its JS closure and keeps only a weak reference to itself
//! inside it, so dropping or cancelling the [`FrameLoop`] ends the animation
//! instead of leaking a self-rescheduling callback.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use log::{debug, warn};
use wasm_bindgen::prelude::*;
use web_sys::Window;

type FrameCallback = Closure<dyn FnMut(f64)>;

pub(crate) struct FrameLoop {
	window: Window,
	handle: Cell<Option<i32>>,
	callback: RefCell<Option<FrameCallback>>,
	cancelled: Cell<bool>,
}

impl FrameLoop {
	/// Run `on_frame` with the frame timestamp (milliseconds) until it returns
	/// `false` or the loop is cancelled.
	pub(crate) fn start(window: Window, mut on_frame: impl FnMut(f64) -> bool + 'static) -> Rc<Self> {
		let frames = Rc::new(Self {
			window,
			handle: Cell::new(None),
			callback: RefCell::new(None),
			cancelled: Cell::new(false),
		});

		let weak: Weak<Self> = Rc::downgrade(&frames);
		let callback = Closure::new(move |timestamp: f64| {
			let Some(frames) = weak.upgrade() else {
				return;
			};
			frames.handle.set(None);
			if frames.cancelled.get() {
				return;
			}
			if on_frame(timestamp) {
				frames.schedule();
			} else {
				// The closure is still running, so it is released on drop rather than here.
				debug!("focus-graph: frame loop finished");
				frames.cancelled.set(true);
			}
		});
		*frames.callback.borrow_mut() = Some(callback);
		frames.schedule();
		frames
	}

	fn schedule(&self) {
		let callback = self.callback.borrow();
		let Some(cb) = callback.as_ref() else {
			return;
		};
		match self.window.request_animation_frame(cb.as_ref().unchecked_ref()) {
			Ok(handle) => self.handle.set(Some(handle)),
			Err(e) => {
				warn!("focus-graph: requestAnimationFrame failed: {e:?}");
				self.cancelled.set(true);
			}
		}
	}

	/// Stop the loop and release the JS callback. Must not be called from
	/// inside the frame callback itself.
	pub(crate) fn cancel(&self) {
		self.cancelled.set(true);
		if let Some(handle) = self.handle.take() {
			let _ = self.window.cancel_animation_frame(handle);
		}
		self.callback.borrow_mut().take();
	}
}

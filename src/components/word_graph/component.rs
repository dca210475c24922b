use std::cell::RefCell;
use std::rc::Rc;

use leptos::ev;
use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use web_sys::{
	CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, WheelEvent, Window,
};

use super::render;
use super::state::WordGraphState;
use super::viewport::Point;

/// Fixed frame step for camera animations, in milliseconds.
const FRAME_MS: f64 = 16.0;

/// Shared, `Copy` access to the editor state for the canvas and its panels.
///
/// The state itself is not reactive; views that read it through [`with`]
/// re-run whenever [`WordGraphState::revision`] moves.
///
/// [`with`]: WordGraphHandle::with
#[derive(Clone, Copy)]
pub struct WordGraphHandle {
	state: StoredValue<WordGraphState, LocalStorage>,
	revision: RwSignal<u64>,
}

impl WordGraphHandle {
	pub fn new(state: WordGraphState) -> Self {
		let revision = RwSignal::new(state.revision());
		Self {
			state: StoredValue::new_local(state),
			revision,
		}
	}

	/// Read the state and subscribe to its revision.
	pub fn with<U>(&self, f: impl FnOnce(&WordGraphState) -> U) -> U {
		self.revision.track();
		self.state.with_value(f)
	}

	/// Mutate the state, notifying readers if the revision moved. Returns
	/// `false` once the owning view has been disposed.
	pub fn update(&self, f: impl FnOnce(&mut WordGraphState)) -> bool {
		let Some(revision) = self.state.try_update_value(|s| {
			f(s);
			s.revision()
		}) else {
			return false;
		};
		if revision != self.revision.get_untracked() {
			self.revision.set(revision);
		}
		true
	}
}

fn parent_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.unwrap_or((800.0, 600.0))
}

/// Pointer position relative to the canvas' top-left corner.
fn local_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<Point> {
	let canvas: HtmlCanvasElement = canvas_ref.get_untracked()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some(Point::new(
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// The word graph drawing surface. Sizes itself to its parent and follows
/// window resizes; `Escape` anywhere in the window cancels dialogs and
/// connection drags. Window listeners are removed when the view is disposed.
#[component]
pub fn WordGraphCanvas(handle: WordGraphHandle) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window): Option<Window> = web_sys::window() else {
			return;
		};
		let Ok(Some(ctx)) = canvas.get_context("2d") else {
			return;
		};
		let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
			return;
		};

		let (w, h) = parent_size(&canvas);
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		handle.update(|s| {
			s.resize(w, h);
			s.snap_to_fit();
		});

		// Window listeners live only as long as the editor.
		let canvas_resize = canvas.clone();
		let resize = window_event_listener(ev::resize, move |_| {
			let (nw, nh) = parent_size(&canvas_resize);
			canvas_resize.set_width(nw as u32);
			canvas_resize.set_height(nh as u32);
			handle.update(|s| s.resize(nw, nh));
		});
		let keydown = window_event_listener(ev::keydown, move |ev: KeyboardEvent| {
			handle.update(|s| s.key_down(&ev.key()));
		});
		on_cleanup(move || {
			resize.remove();
			keydown.remove();
		});

		let animate_inner = animate.clone();
		*animate.borrow_mut() = Some(Closure::new(move || {
			let alive = handle.update(|s| {
				s.tick(FRAME_MS);
				render::render(s, &ctx);
			});
			if !alive {
				return;
			}
			if let (Some(win), Some(cb)) = (web_sys::window(), animate_inner.borrow().as_ref()) {
				let _ = win.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		}));
		if let Some(ref cb) = *animate.borrow() {
			let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
		}
	});

	let on_mousedown = move |ev: MouseEvent| {
		if let Some(p) = local_point(canvas_ref, &ev) {
			handle.update(|s| s.pointer_down(p));
		}
	};

	let on_mousemove = move |ev: MouseEvent| {
		if let Some(p) = local_point(canvas_ref, &ev) {
			handle.update(|s| s.pointer_move(p));
		}
	};

	let on_mouseup = move |ev: MouseEvent| {
		if let Some(p) = local_point(canvas_ref, &ev) {
			handle.update(|s| s.pointer_up(p));
		}
	};

	let on_mouseleave = move |_: MouseEvent| {
		handle.update(|s| s.pointer_leave());
	};

	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some(p) = local_point(canvas_ref, &ev) {
			handle.update(|s| s.wheel(p, ev.delta_y()));
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="word-graph-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::engine::{CanvasEngine, CanvasInstance};
use crate::graph::ValidatedModel;
use crate::viewer::{RenderConfig, SurfaceHandle, Viewer, ViewerSession};

type Shared<T> = Rc<RefCell<T>>;

fn window_size(window: &Window) -> (f64, f64) {
	let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
	(dim(window.inner_width()), dim(window.inner_height()))
}

fn canvas_point(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Renders a validated graph onto a canvas.
///
/// The engine instance is created when the canvas is attached and destroyed when the
/// component is cleaned up. A new model value unmounts the old session before mounting
/// the new one; re-renders that change nothing never create a second instance.
#[component]
pub fn GraphViewer(
	#[prop(into)] model: Signal<ValidatedModel>,
	#[prop(optional)] config: Option<RenderConfig>,
	#[prop(default = false)] fullscreen: bool,
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let config = config.unwrap_or_default();
	let viewer: Shared<Viewer<CanvasEngine>> = Rc::new(RefCell::new(Viewer::new(CanvasEngine::new())));
	let session: Shared<Option<ViewerSession<CanvasEngine>>> = Rc::new(RefCell::new(None));
	let surface: Shared<Option<SurfaceHandle<HtmlCanvasElement>>> = Rc::new(RefCell::new(None));
	let resize_cb: Shared<Option<Closure<dyn FnMut()>>> = Rc::new(RefCell::new(None));
	let error = RwSignal::new(None::<String>);

	let (viewer_init, session_init, resize_init) = (viewer.clone(), session.clone(), resize_cb.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let model = model.get();
		let canvas: HtmlCanvasElement = canvas.into();
		let Some(window) = web_sys::window() else {
			error.set(Some("no window available".into()));
			return;
		};

		if let Some(mut previous) = session_init.borrow_mut().take() {
			viewer_init.borrow_mut().unmount(&mut previous);
		}

		let (w, h) = if fullscreen {
			window_size(&window)
		} else {
			(
				width.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_width() as f64)
						.unwrap_or(800.0)
				}),
				height.unwrap_or_else(|| {
					canvas
						.parent_element()
						.map(|p| p.client_height() as f64)
						.unwrap_or(600.0)
				}),
			)
		};
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);

		// a replaced canvas element is a new surface
		let reused = surface
			.borrow()
			.as_ref()
			.filter(|existing| existing.surface() == &canvas)
			.cloned();
		let handle = match reused {
			Some(existing) => existing,
			None => {
				let fresh = SurfaceHandle::new(canvas.clone());
				*surface.borrow_mut() = Some(fresh.clone());
				fresh
			}
		};

		let mounted = match viewer_init.borrow_mut().mount(&handle, model, &config) {
			Ok(mounted) => mounted,
			Err(err) => {
				log::error!("graph viewer mount failed: {err}");
				error.set(Some(err.to_string()));
				return;
			}
		};
		*session_init.borrow_mut() = Some(mounted);
		error.set(None);

		if fullscreen && resize_init.borrow().is_none() {
			// reads the handle at fire time: the canvas may have been replaced since
			let (session_resize, surface_resize) = (session_init.clone(), surface.clone());
			*resize_init.borrow_mut() = Some(Closure::new(move || {
				let Some(win) = web_sys::window() else {
					return;
				};
				let (nw, nh) = window_size(&win);
				if let Some(handle) = surface_resize.borrow().as_ref() {
					handle.surface().set_width(nw as u32);
					handle.surface().set_height(nh as u32);
				}
				if let Some(s) = session_resize.borrow().as_ref() {
					if let Ok(instance) = s.engine() {
						instance.resize(nw, nh);
					}
				}
			}));
			if let Some(ref cb) = *resize_init.borrow() {
				let _ =
					window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	});

	let (viewer_drop, session_drop, resize_drop) = (
		SendWrapper::new(viewer.clone()),
		SendWrapper::new(session.clone()),
		SendWrapper::new(resize_cb.clone()),
	);
	on_cleanup(move || {
		if let Some(mut s) = session_drop.borrow_mut().take() {
			viewer_drop.borrow_mut().unmount(&mut s);
		}
		if let Some(cb) = resize_drop.borrow_mut().take() {
			if let Some(window) = web_sys::window() {
				let _ = window
					.remove_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
			}
		}
	});

	let with_instance = {
		let session = session.clone();
		move |f: &dyn Fn(&CanvasInstance)| {
			if let Some(s) = session.borrow().as_ref() {
				if let Ok(instance) = s.engine() {
					f(instance);
				}
			}
		}
	};
	let (on_down, on_move, on_up, on_leave, on_wheel) = (
		with_instance.clone(),
		with_instance.clone(),
		with_instance.clone(),
		with_instance.clone(),
		with_instance,
	);

	view! {
		<canvas
			node_ref=canvas_ref
			class="graph-viewer-canvas"
			on:mousedown=move |ev: MouseEvent| {
				if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
					on_down(&|i: &CanvasInstance| i.begin_pan(x, y));
				}
			}
			on:mousemove=move |ev: MouseEvent| {
				if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
					on_move(&|i: &CanvasInstance| i.pan_to(x, y));
				}
			}
			on:mouseup=move |_: MouseEvent| on_up(&|i: &CanvasInstance| i.end_pan())
			on:mouseleave=move |_: MouseEvent| on_leave(&|i: &CanvasInstance| i.end_pan())
			on:wheel=move |ev: WheelEvent| {
				ev.prevent_default();
				let delta = ev.delta_y();
				if let Some((x, y)) = canvas_point(canvas_ref, &ev) {
					on_wheel(&|i: &CanvasInstance| i.zoom_at(x, y, delta));
				}
			}
			style="display: block; cursor: grab;"
		/>
		{move || error.get().map(|message| view! { <p class="graph-viewer-error">{message}</p> })}
	}
}

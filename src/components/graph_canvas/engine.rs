use std::cell::{Cell, RefCell};
use std::rc::Rc;

use log::debug;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use super::render;
use super::state::CanvasState;
use crate::error::{Error, Result};
use crate::viewer::{LayoutMode, RenderConfig, RenderElements, RenderEngine};

const FRAME_DT: f32 = 0.016;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn js_error(context: &str, value: JsValue) -> Error {
	let detail = value.as_string().unwrap_or_else(|| format!("{value:?}"));
	Error::engine(format!("{context}: {detail}"))
}

/// Draws onto an `HtmlCanvasElement` with a 2D context, animating automatic layouts
/// through a force simulation.
#[derive(Debug, Default)]
pub struct CanvasEngine;

impl CanvasEngine {
	pub fn new() -> Self {
		Self
	}
}

/// A running canvas instance: state, context and the animation-frame loop driving it.
pub struct CanvasInstance {
	state: Rc<RefCell<CanvasState>>,
	ctx: CanvasRenderingContext2d,
	window: Window,
	frame: FrameCallback,
	frame_id: Rc<Cell<Option<i32>>>,
}

impl CanvasInstance {
	pub fn resize(&self, width: f64, height: f64) {
		self.state.borrow_mut().resize(width, height);
	}

	pub fn begin_pan(&self, x: f64, y: f64) {
		self.state.borrow_mut().begin_pan(x, y);
	}

	pub fn pan_to(&self, x: f64, y: f64) {
		self.state.borrow_mut().pan_to(x, y);
	}

	pub fn end_pan(&self) {
		self.state.borrow_mut().end_pan();
	}

	pub fn zoom_at(&self, x: f64, y: f64, delta: f64) {
		self.state.borrow_mut().zoom_at(x, y, delta);
	}
}

impl RenderEngine for CanvasEngine {
	type Surface = HtmlCanvasElement;
	type Instance = CanvasInstance;

	fn create_instance(
		&mut self,
		surface: &HtmlCanvasElement,
		elements: &RenderElements,
		config: &RenderConfig,
		layout: LayoutMode,
	) -> Result<CanvasInstance> {
		let window = web_sys::window().ok_or_else(|| Error::engine("no window available"))?;
		let ctx: CanvasRenderingContext2d = surface
			.get_context("2d")
			.map_err(|e| js_error("getContext failed", e))?
			.ok_or_else(|| Error::engine("canvas has no 2d context"))?
			.dyn_into()
			.map_err(|e| js_error("unexpected context type", e.into()))?;

		let (width, height) = (surface.width() as f64, surface.height() as f64);
		let state = Rc::new(RefCell::new(CanvasState::new(
			elements, config, layout, width, height,
		)));
		let frame: FrameCallback = Rc::new(RefCell::new(None));
		let frame_id = Rc::new(Cell::new(None));

		let (state_anim, ctx_anim, frame_inner, id_inner, window_inner) = (
			state.clone(),
			ctx.clone(),
			frame.clone(),
			frame_id.clone(),
			window.clone(),
		);
		*frame.borrow_mut() = Some(Closure::new(move || {
			{
				let mut s = state_anim.borrow_mut();
				s.tick(FRAME_DT);
				render::render(&s, &ctx_anim);
			}
			if let Some(ref cb) = *frame_inner.borrow() {
				id_inner.set(
					window_inner
						.request_animation_frame(cb.as_ref().unchecked_ref())
						.ok(),
				);
			}
		}));

		let first = match *frame.borrow() {
			Some(ref cb) => window.request_animation_frame(cb.as_ref().unchecked_ref()),
			None => Ok(0),
		};
		match first {
			Ok(id) => frame_id.set(Some(id)),
			Err(e) => {
				// break the closure's self-reference before bailing
				frame.borrow_mut().take();
				return Err(js_error("requestAnimationFrame failed", e));
			}
		}

		debug!(
			"canvas instance created: {}x{}, {} nodes, {} edges",
			width,
			height,
			elements.nodes.len(),
			elements.edges.len()
		);
		Ok(CanvasInstance {
			state,
			ctx,
			window,
			frame,
			frame_id,
		})
	}

	fn destroy(&mut self, instance: CanvasInstance) {
		if let Some(id) = instance.frame_id.take() {
			let _ = instance.window.cancel_animation_frame(id);
		}
		instance.frame.borrow_mut().take();
		let s = instance.state.borrow();
		render::clear(&instance.ctx, s.width, s.height);
		debug!("canvas instance destroyed");
	}
}

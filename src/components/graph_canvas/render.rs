use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasState, NodeShape};

const ARROW_SIZE: f64 = 8.0;
const LOOP_RADIUS: f64 = 12.0;
const DASH: f64 = 8.0;
const GAP: f64 = 4.0;

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(&state.background);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	draw_edges(state, ctx);
	draw_nodes(state, ctx);
	ctx.restore();
}

pub fn clear(ctx: &CanvasRenderingContext2d, width: f64, height: f64) {
	ctx.clear_rect(0.0, 0.0, width, height);
}

fn draw_edges(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	let positions = state.positions();
	let mut radii = HashMap::new();
	state.graph.visit_nodes(|node| {
		radii.insert(node.index(), node.data.user_data.size / 2.0);
	});
	let radius = |idx: DefaultNodeIdx| radii.get(&idx).copied().unwrap_or(0.0);

	for edge in &state.edges {
		let (Some(&(x1, y1)), Some(&(x2, y2))) =
			(positions.get(&edge.source), positions.get(&edge.target))
		else {
			continue;
		};
		ctx.set_stroke_style_str(&edge.info.color);
		ctx.set_fill_style_str(&edge.info.color);
		ctx.set_line_width(edge.info.width / k.max(0.5));

		if edge.source == edge.target {
			let r = radius(edge.source);
			ctx.begin_path();
			let _ = ctx.arc(x1, y1 - r - LOOP_RADIUS * 0.5, LOOP_RADIUS, 0.0, 2.0 * PI);
			ctx.stroke();
			continue;
		}

		let (dx, dy) = (x2 - x1, y2 - y1);
		let dist = (dx * dx + dy * dy).sqrt();
		if dist < 0.001 {
			continue;
		}
		let (ux, uy) = (dx / dist, dy / dist);
		let (r1, r2) = (radius(edge.source), radius(edge.target));
		let head = if edge.info.arrow { ARROW_SIZE } else { 0.0 };

		if edge.info.dashed {
			let _ = ctx.set_line_dash(&js_sys::Array::of2(
				&JsValue::from_f64(DASH / k),
				&JsValue::from_f64(GAP / k),
			));
		}
		ctx.begin_path();
		ctx.move_to(x1 + ux * r1, y1 + uy * r1);
		ctx.line_to(x2 - ux * (r2 + head), y2 - uy * (r2 + head));
		ctx.stroke();
		let _ = ctx.set_line_dash(&js_sys::Array::new());

		if edge.info.arrow {
			let (tip_x, tip_y) = (x2 - ux * r2, y2 - uy * r2);
			let (back_x, back_y) = (tip_x - ux * ARROW_SIZE, tip_y - uy * ARROW_SIZE);
			let (px, py) = (-uy * ARROW_SIZE * 0.5, ux * ARROW_SIZE * 0.5);
			ctx.begin_path();
			ctx.move_to(tip_x, tip_y);
			ctx.line_to(back_x + px, back_y + py);
			ctx.line_to(back_x - px, back_y - py);
			ctx.close_path();
			ctx.fill();
		}
	}
}

fn draw_nodes(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	ctx.set_font(&format!("{}px sans-serif", 10.0 / k.max(0.5)));

	state.graph.visit_nodes(|node| {
		let info = &node.data.user_data;
		let (x, y) = (node.x() as f64, node.y() as f64);
		let half = info.size / 2.0;

		ctx.set_fill_style_str(&info.fill);
		ctx.begin_path();
		match info.shape {
			NodeShape::Rectangle => ctx.rect(x - half, y - half, info.size, info.size),
			NodeShape::Ellipse => {
				let _ = ctx.arc(x, y, half, 0.0, 2.0 * PI);
			}
		}
		ctx.fill();

		if let Some(label) = &info.label {
			ctx.set_fill_style_str(&info.text_color);
			if info.centered_label {
				ctx.set_text_align("center");
				ctx.set_text_baseline("middle");
				let _ = ctx.fill_text(label, x, y);
			} else {
				ctx.set_text_align("start");
				ctx.set_text_baseline("alphabetic");
				let _ = ctx.fill_text(label, x + half + 3.0, y + 3.0);
			}
		}
	});
}

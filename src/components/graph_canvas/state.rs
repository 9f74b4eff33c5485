use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use crate::graph::Directionality;
use crate::viewer::{LayoutMode, RenderConfig, RenderEdge, RenderElements, RenderNode, ResolvedStyle};

pub const NODE_SIZE: f64 = 30.0;
const SEED_RADIUS: f64 = 100.0;
const DEFAULT_FILL: &str = "#999999";
const DEFAULT_LINE: &str = "#cccccc";
const DEFAULT_TEXT: &str = "#ffffff";
const MIN_ZOOM: f64 = 0.1;
const MAX_ZOOM: f64 = 10.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeShape {
	Rectangle,
	#[default]
	Ellipse,
}

#[derive(Clone, Debug, Default)]
pub struct NodeInfo {
	pub label: Option<String>,
	pub fill: String,
	pub text_color: String,
	pub shape: NodeShape,
	pub size: f64,
	pub centered_label: bool,
}

impl NodeInfo {
	fn from_render(node: &RenderNode) -> Self {
		let style = &node.style;
		let shape = match style.text("shape") {
			Some("rectangle") | Some("square") | Some("round-rectangle") => NodeShape::Rectangle,
			_ => NodeShape::Ellipse,
		};
		Self {
			label: label_for(node, style),
			fill: style.text("background-color").unwrap_or(DEFAULT_FILL).to_owned(),
			text_color: style.text("color").unwrap_or(DEFAULT_TEXT).to_owned(),
			shape,
			size: style.number("width").unwrap_or(NODE_SIZE),
			centered_label: style.text("text-valign") == Some("center"),
		}
	}
}

/// `label` may map element data (`data(id)`, `data(label)`) or be literal text.
fn label_for(node: &RenderNode, style: &ResolvedStyle) -> Option<String> {
	match style.text("label")? {
		"data(id)" => Some(node.id.clone()),
		"data(label)" => Some(node.label.clone()),
		"data(type)" => Some(node.kind.clone()),
		literal => Some(literal.to_owned()),
	}
}

#[derive(Clone, Debug)]
pub struct EdgeInfo {
	pub color: String,
	pub width: f64,
	pub arrow: bool,
	pub dashed: bool,
}

impl EdgeInfo {
	fn from_render(edge: &RenderEdge) -> Self {
		let style = &edge.style;
		let arrow_shape = style.text("target-arrow-shape").unwrap_or("none");
		Self {
			color: style.text("line-color").unwrap_or(DEFAULT_LINE).to_owned(),
			width: style.number("width").unwrap_or(1.5),
			arrow: edge.directionality == Directionality::Directed && arrow_shape != "none",
			dashed: style.text("line-style") == Some("dashed"),
		}
	}
}

#[derive(Clone, Debug)]
pub struct EdgeLink {
	pub source: DefaultNodeIdx,
	pub target: DefaultNodeIdx,
	pub info: EdgeInfo,
}

#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

pub struct CanvasState {
	pub graph: ForceGraph<NodeInfo, ()>,
	pub edges: Vec<EdgeLink>,
	pub transform: ViewTransform,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	pub background: String,
	/// False for preset layouts: positions are final.
	pub simulate: bool,
}

impl CanvasState {
	pub fn new(
		elements: &RenderElements,
		config: &RenderConfig,
		layout: LayoutMode,
		width: f64,
		height: f64,
	) -> Self {
		let sim = config.simulation;
		let mut graph = ForceGraph::new(SimulationParameters {
			force_charge: sim.force_charge,
			force_spring: sim.force_spring,
			force_max: sim.force_max,
			node_speed: sim.node_speed,
			damping_factor: sim.damping_factor,
		});
		let preset = layout == LayoutMode::Preset;
		let count = elements.nodes.len().max(1) as f64;
		let mut id_to_idx = HashMap::with_capacity(elements.nodes.len());

		for (i, node) in elements.nodes.iter().enumerate() {
			let (x, y) = match (preset, node.position) {
				(true, Some(p)) => (p.x, p.y),
				_ => {
					let angle = i as f64 * 2.0 * PI / count;
					(SEED_RADIUS * angle.cos(), SEED_RADIUS * angle.sin())
				}
			};
			let idx = graph.add_node(NodeData {
				// see LayoutMode::Preset for the precision this keeps
				x: x as f32,
				y: y as f32,
				mass: 10.0,
				is_anchor: preset,
				user_data: NodeInfo::from_render(node),
			});
			id_to_idx.insert(node.id.as_str(), idx);
		}

		let mut edges = Vec::with_capacity(elements.edges.len());
		for edge in &elements.edges {
			if let (Some(&src), Some(&tgt)) = (
				id_to_idx.get(edge.source.as_str()),
				id_to_idx.get(edge.target.as_str()),
			) {
				// self-loops have no length to spring against
				if src != tgt {
					graph.add_edge(src, tgt, EdgeData::default());
				}
				edges.push(EdgeLink {
					source: src,
					target: tgt,
					info: EdgeInfo::from_render(edge),
				});
			}
		}

		let mut state = Self {
			graph,
			edges,
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			pan: PanState::default(),
			width,
			height,
			background: config.background.clone(),
			simulate: !preset,
		};
		if preset {
			state.center_on_nodes();
		}
		state
	}

	/// Translate so the nodes' bounding box sits in the middle of the surface.
	pub fn center_on_nodes(&mut self) {
		let mut bounds: Option<(f64, f64, f64, f64)> = None;
		self.graph.visit_nodes(|node| {
			let (x, y) = (node.x() as f64, node.y() as f64);
			bounds = Some(match bounds {
				None => (x, y, x, y),
				Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
			});
		});
		if let Some((x0, y0, x1, y1)) = bounds {
			let k = self.transform.k;
			self.transform.x = self.width / 2.0 - (x0 + x1) / 2.0 * k;
			self.transform.y = self.height / 2.0 - (y0 + y1) / 2.0 * k;
		}
	}

	pub fn positions(&self) -> HashMap<DefaultNodeIdx, (f64, f64)> {
		let mut positions = HashMap::new();
		self.graph.visit_nodes(|node| {
			positions.insert(node.index(), (node.x() as f64, node.y() as f64));
		});
		positions
	}

	pub fn tick(&mut self, dt: f32) {
		if self.simulate {
			self.graph.update(dt);
		}
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.transform.x += (width - self.width) / 2.0;
		self.transform.y += (height - self.height) / 2.0;
		self.width = width;
		self.height = height;
	}

	pub fn begin_pan(&mut self, x: f64, y: f64) {
		self.pan = PanState {
			active: true,
			start_x: x,
			start_y: y,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, x: f64, y: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (x - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (y - self.pan.start_y);
		}
	}

	pub fn end_pan(&mut self) {
		self.pan.active = false;
	}

	/// Zoom around the screen point `(x, y)`; positive `delta` zooms out.
	pub fn zoom_at(&mut self, x: f64, y: f64, delta: f64) {
		let factor = if delta > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(MIN_ZOOM, MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = x - (x - self.transform.x) * ratio;
		self.transform.y = y - (y - self.transform.y) * ratio;
		self.transform.k = new_k;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{Edge, GraphModel, Node, validate};
	use crate::viewer::{RenderConfig, resolve_layout};

	fn state_for(model: GraphModel) -> CanvasState {
		let model = validate(&model).unwrap();
		let config = RenderConfig::default();
		let layout = resolve_layout(&model).unwrap();
		let elements = RenderElements::build(&model, &config.stylesheet);
		CanvasState::new(&elements, &config, layout, 400.0, 300.0)
	}

	#[test]
	fn preset_nodes_stay_where_they_were_put() {
		let mut state = state_for(GraphModel::new(
			vec![Node::new("base").at(0.0, 0.0), Node::new("x").at(10.0, 0.0)],
			vec![Edge::new("base-x", "base", "x")],
		));
		assert!(!state.simulate);
		state.tick(0.016);
		let mut placed: Vec<(f64, f64)> = state.positions().into_values().collect();
		placed.sort_by(|a, b| a.0.total_cmp(&b.0));
		assert_eq!(placed, vec![(0.0, 0.0), (10.0, 0.0)]);
		assert_eq!(state.transform.x, 195.0);
		assert_eq!(state.transform.y, 150.0);
	}

	#[test]
	fn preset_coordinates_are_held_at_single_precision() {
		let state = state_for(GraphModel::new(
			vec![
				Node::new("near").at(12.5, -3.25),
				Node::new("far").at(16_777_217.0, 0.1),
			],
			vec![],
		));
		let mut placed: Vec<(f64, f64)> = state.positions().into_values().collect();
		placed.sort_by(|a, b| a.0.total_cmp(&b.0));
		assert_eq!(placed[0], (12.5, -3.25));
		assert_eq!(placed[1], (16_777_216.0, 0.1f32 as f64));
	}

	#[test]
	fn automatic_layout_simulates() {
		let state = state_for(GraphModel::new(
			vec![Node::new("a"), Node::new("b")],
			vec![Edge::new("a-b", "a", "b").undirected()],
		));
		assert!(state.simulate);
		assert_eq!(state.edges.len(), 1);
		assert!(!state.edges[0].info.arrow);
	}

	#[test]
	fn styles_drive_node_appearance() {
		let state = state_for(GraphModel::new(
			vec![Node::new("a").with_label("Alpha").with_style("background-color", "red")],
			vec![Edge::new("loop", "a", "a")],
		));
		let mut infos = Vec::new();
		state.graph.visit_nodes(|n| infos.push(n.data.user_data.clone()));
		assert_eq!(infos[0].fill, "red");
		assert_eq!(infos[0].shape, NodeShape::Rectangle);
		assert_eq!(infos[0].label.as_deref(), Some("Alpha"));
		assert!(infos[0].centered_label);
		assert!(state.edges[0].info.arrow);
	}

	#[test]
	fn zoom_is_clamped_and_anchored() {
		let mut state = state_for(GraphModel::default());
		for _ in 0..100 {
			state.zoom_at(0.0, 0.0, -1.0);
		}
		assert_eq!(state.transform.k, MAX_ZOOM);

		state.begin_pan(10.0, 10.0);
		let start = state.transform.x;
		state.pan_to(30.0, 10.0);
		assert_eq!(state.transform.x, start + 20.0);
		state.end_pan();
		state.pan_to(100.0, 100.0);
		assert_eq!(state.transform.x, start + 20.0);
	}
}

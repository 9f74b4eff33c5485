use serde::Serialize;

use super::config::RenderConfig;
use super::layout::LayoutMode;
use super::style::{ResolvedStyle, StyleRule, resolve_style};
use crate::error::{ElementKind, Result};
use crate::graph::{Directionality, Position, ValidatedModel};

/// A node as handed to the engine: defaults applied and style resolved.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderNode {
	/// Node id.
	pub id: String,
	/// Label after normalization.
	pub label: String,
	/// The node's `type` tag.
	pub kind: String,
	/// Present for every node under a preset layout, absent for every node otherwise.
	pub position: Option<Position>,
	/// Stylesheet merged with the node's override.
	pub style: ResolvedStyle,
}

/// An edge as handed to the engine.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderEdge {
	/// Edge id.
	pub id: String,
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Resolved; never unspecified here.
	pub directionality: Directionality,
	/// Stylesheet merged with the edge's override.
	pub style: ResolvedStyle,
}

/// The element list an engine instance is created with, in model order.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct RenderElements {
	/// Nodes, in model order.
	pub nodes: Vec<RenderNode>,
	/// Edges, in model order.
	pub edges: Vec<RenderEdge>,
}

impl RenderElements {
	/// Resolve every element of `model` against `stylesheet`.
	pub fn build(model: &ValidatedModel, stylesheet: &[StyleRule]) -> Self {
		let nodes = model
			.nodes()
			.iter()
			.map(|node| RenderNode {
				id: node.id.clone(),
				label: node.display_label().to_owned(),
				kind: node.kind.clone(),
				position: node.position,
				style: resolve_style(ElementKind::Node, stylesheet, node.style_override.as_ref()),
			})
			.collect();
		let edges = model
			.edges()
			.iter()
			.map(|edge| RenderEdge {
				id: edge.id.clone(),
				source: edge.source.clone(),
				target: edge.target.clone(),
				directionality: edge.resolved_directionality(),
				style: resolve_style(ElementKind::Edge, stylesheet, edge.style_override.as_ref()),
			})
			.collect();
		Self { nodes, edges }
	}

	/// Resolved style of the node or edge with this id.
	pub fn style_of(&self, id: &str) -> Option<&ResolvedStyle> {
		self.nodes
			.iter()
			.find(|n| n.id == id)
			.map(|n| &n.style)
			.or_else(|| self.edges.iter().find(|e| e.id == id).map(|e| &e.style))
	}
}

/// The two capabilities the viewer needs from a rendering/layout engine.
pub trait RenderEngine {
	/// Drawing region an instance binds to.
	type Surface;
	/// A live engine instance. Holds the scarce resources until passed to `destroy`.
	type Instance;

	/// Create one instance drawing `elements` onto `surface`.
	///
	/// On error nothing may remain attached to the surface.
	fn create_instance(
		&mut self,
		surface: &Self::Surface,
		elements: &RenderElements,
		config: &RenderConfig,
		layout: LayoutMode,
	) -> Result<Self::Instance>;

	/// Release an instance and everything it holds.
	fn destroy(&mut self, instance: Self::Instance);
}

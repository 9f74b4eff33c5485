//! The element-definition form: each element wraps its identity in a `data` block and
//! encodes directionality as a class tag.
//!
//! ```json
//! { "nodes": [ { "data": { "id": "a", "type": "primario" },
//!                "position": { "x": 120, "y": 150 },
//!                "style": { "background-color": "red" } } ],
//!   "edges": [ { "data": { "id": "a-a", "source": "a", "target": "a" },
//!                "classes": "undirected" } ] }
//! ```

use serde::{Deserialize, Serialize};

use super::types::{Directionality, Edge, GraphModel, Node, Position, StyleMap};
use crate::error::Result;

const UNDIRECTED_CLASS: &str = "undirected";
const DIRECTED_CLASS: &str = "directed";

/// A graph in element-definition form.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementsDefinition {
	/// Node entries.
	#[serde(default)]
	pub nodes: Vec<NodeDefinition>,
	/// Edge entries.
	#[serde(default)]
	pub edges: Vec<EdgeDefinition>,
}

/// One node entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeDefinition {
	/// Identity, label and type.
	pub data: NodeFields,
	/// Fixed coordinate, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub position: Option<Position>,
	/// Style override.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub style: Option<StyleMap>,
	/// Space-separated class tags; ignored for nodes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub classes: Option<String>,
}

/// The `data` block of a node entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NodeFields {
	/// Node id.
	pub id: String,
	/// Display text.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Serialized as `type`.
	#[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
	pub kind: Option<String>,
}

/// One edge entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeDefinition {
	/// Identity and endpoints.
	pub data: EdgeFields,
	/// Space-separated class tags. `undirected` or `directed` set the directionality.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub classes: Option<String>,
	/// Style override.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub style: Option<StyleMap>,
}

/// The `data` block of an edge entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EdgeFields {
	/// Edge id.
	pub id: String,
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
}

fn directionality_from_classes(classes: Option<&str>) -> Option<Directionality> {
	let classes = classes?;
	// last matching class wins, mirroring how later class rules override earlier ones
	classes.split_whitespace().rev().find_map(|class| match class {
		UNDIRECTED_CLASS => Some(Directionality::Undirected),
		DIRECTED_CLASS => Some(Directionality::Directed),
		_ => None,
	})
}

impl ElementsDefinition {
	/// Parse the element-definition document.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Convert to the plain model. Unvalidated.
	pub fn into_model(self) -> GraphModel {
		let nodes = self
			.nodes
			.into_iter()
			.map(|def| Node {
				id: def.data.id,
				label: def.data.label,
				kind: def.data.kind.unwrap_or_default(),
				position: def.position,
				style_override: def.style,
			})
			.collect();
		let edges = self
			.edges
			.into_iter()
			.map(|def| Edge {
				directionality: directionality_from_classes(def.classes.as_deref()),
				id: def.data.id,
				source: def.data.source,
				target: def.data.target,
				style_override: def.style,
			})
			.collect();
		GraphModel { nodes, edges }
	}

	/// Inverse of [`into_model`](Self::into_model). Only undirected edges carry a class tag.
	pub fn from_model(model: &GraphModel) -> Self {
		let nodes = model
			.nodes
			.iter()
			.map(|node| NodeDefinition {
				data: NodeFields {
					id: node.id.clone(),
					label: node.label.clone(),
					kind: (!node.kind.is_empty()).then(|| node.kind.clone()),
				},
				position: node.position,
				style: node.style_override.clone(),
				classes: None,
			})
			.collect();
		let edges = model
			.edges
			.iter()
			.map(|edge| EdgeDefinition {
				data: EdgeFields {
					id: edge.id.clone(),
					source: edge.source.clone(),
					target: edge.target.clone(),
				},
				classes: (edge.directionality == Some(Directionality::Undirected))
					.then(|| UNDIRECTED_CLASS.to_owned()),
				style: edge.style_override.clone(),
			})
			.collect();
		Self { nodes, edges }
	}
}

impl From<ElementsDefinition> for GraphModel {
	fn from(def: ElementsDefinition) -> Self {
		def.into_model()
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::graph::{StyleValue, normalize};

	#[test]
	fn class_tag_selects_directionality() {
		let json = r#"{
			"nodes": [
				{ "data": { "id": "n1", "label": "n1", "type": "primario" }, "position": { "x": 40, "y": 130 } },
				{ "data": { "id": "base" }, "style": { "background-color": "red" } }
			],
			"edges": [
				{ "data": { "id": "base-n1", "source": "base", "target": "n1" } },
				{ "data": { "id": "n1-base", "source": "n1", "target": "base" }, "classes": "undirected" },
				{ "data": { "id": "both", "source": "n1", "target": "base" }, "classes": "thick directed" }
			]
		}"#;
		let model = ElementsDefinition::from_json(json).unwrap().into_model();

		assert_eq!(model.nodes[0].kind, "primario");
		assert_eq!(model.nodes[0].position, Some(Position::new(40.0, 130.0)));
		assert_eq!(
			model.nodes[1].style_override.as_ref().unwrap()["background-color"],
			StyleValue::from("red")
		);
		assert_eq!(model.edges[0].directionality, None);
		assert_eq!(
			model.edges[1].directionality,
			Some(Directionality::Undirected)
		);
		assert_eq!(model.edges[2].directionality, Some(Directionality::Directed));
	}

	#[test]
	fn model_converts_back_to_elements() {
		let model = normalize(&GraphModel::new(
			vec![Node::new("a").with_kind("primario"), Node::new("b")],
			vec![
				Edge::new("a-b", "a", "b"),
				Edge::new("b-a", "b", "a").undirected(),
			],
		));
		let def = ElementsDefinition::from_model(&model);
		assert_eq!(def.nodes[0].data.kind.as_deref(), Some("primario"));
		assert_eq!(def.nodes[1].data.kind, None);
		assert_eq!(def.edges[0].classes, None);
		assert_eq!(def.edges[1].classes.as_deref(), Some("undirected"));
		assert_eq!(normalize(&def.into_model()), model);
	}
}

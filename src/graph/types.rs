use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Style property name → value. Ordered so snapshots are stable.
pub type StyleMap = BTreeMap<String, StyleValue>;

/// A single style property value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StyleValue {
	/// Numeric values such as widths or opacities.
	Number(f64),
	/// Everything else: colours, shapes, mappers like `data(label)`.
	Text(String),
}

impl StyleValue {
	/// The textual value, if this is text.
	pub fn as_text(&self) -> Option<&str> {
		match self {
			StyleValue::Text(s) => Some(s),
			StyleValue::Number(_) => None,
		}
	}

	/// The numeric value; text that parses as a number counts too.
	pub fn as_number(&self) -> Option<f64> {
		match self {
			StyleValue::Number(n) => Some(*n),
			StyleValue::Text(s) => s.trim().trim_end_matches("px").parse().ok(),
		}
	}
}

impl fmt::Display for StyleValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			StyleValue::Number(n) => write!(f, "{n}"),
			StyleValue::Text(s) => f.write_str(s),
		}
	}
}

impl From<&str> for StyleValue {
	fn from(value: &str) -> Self {
		StyleValue::Text(value.to_owned())
	}
}

impl From<String> for StyleValue {
	fn from(value: String) -> Self {
		StyleValue::Text(value)
	}
}

impl From<f64> for StyleValue {
	fn from(value: f64) -> Self {
		StyleValue::Number(value)
	}
}

/// A fixed 2D coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
	/// Horizontal, growing rightwards.
	pub x: f64,
	/// Vertical, growing downwards.
	pub y: f64,
}

impl Position {
	/// A point at `(x, y)`.
	pub fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// Whether an edge is drawn with a direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Directionality {
	/// Drawn from source to target with an arrowhead.
	#[default]
	Directed,
	/// A plain line; source and target are interchangeable.
	Undirected,
}

/// A vertex of the graph.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
	/// Unique across all nodes and edges of a model.
	pub id: String,
	/// Display text; `None` until normalization copies the id in.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub label: Option<String>,
	/// Free-form classification tag, passed through untouched.
	#[serde(rename = "type", default)]
	pub kind: String,
	/// Fixed coordinate. Either every node of a model has one or none does.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub position: Option<Position>,
	/// Per-node properties applied over the stylesheet.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub style_override: Option<StyleMap>,
}

impl Node {
	/// A bare node: no label, no position, no style.
	pub fn new(id: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			label: None,
			kind: String::new(),
			position: None,
			style_override: None,
		}
	}

	/// Set the label.
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Set the `type` tag.
	pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
		self.kind = kind.into();
		self
	}

	/// Pin the node at `(x, y)`.
	pub fn at(mut self, x: f64, y: f64) -> Self {
		self.position = Some(Position::new(x, y));
		self
	}

	/// Override one style property.
	pub fn with_style(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
		self.style_override
			.get_or_insert_with(StyleMap::new)
			.insert(key.into(), value.into());
		self
	}

	/// Label to show; falls back to the id before normalization fills it in.
	pub fn display_label(&self) -> &str {
		self.label.as_deref().unwrap_or(&self.id)
	}
}

/// A connection between two nodes. Self-loops and parallel edges are allowed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
	/// Unique across all nodes and edges of a model.
	pub id: String,
	/// Id of the node the edge starts at.
	pub source: String,
	/// Id of the node the edge ends at.
	pub target: String,
	/// `None` means directed.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub directionality: Option<Directionality>,
	/// Per-edge properties applied over the stylesheet.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub style_override: Option<StyleMap>,
}

impl Edge {
	/// An edge with unspecified directionality and no style.
	pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			source: source.into(),
			target: target.into(),
			directionality: None,
			style_override: None,
		}
	}

	/// Mark the edge directed explicitly.
	pub fn directed(mut self) -> Self {
		self.directionality = Some(Directionality::Directed);
		self
	}

	/// Mark the edge undirected.
	pub fn undirected(mut self) -> Self {
		self.directionality = Some(Directionality::Undirected);
		self
	}

	/// Override one style property.
	pub fn with_style(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
		self.style_override
			.get_or_insert_with(StyleMap::new)
			.insert(key.into(), value.into());
		self
	}

	/// Effective directionality; unspecified means directed.
	pub fn resolved_directionality(&self) -> Directionality {
		self.directionality.unwrap_or_default()
	}
}

/// A static graph description. Build a new value instead of editing one in place.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphModel {
	/// All vertices, in input order.
	#[serde(default)]
	pub nodes: Vec<Node>,
	/// All connections, in input order.
	#[serde(default)]
	pub edges: Vec<Edge>,
}

impl GraphModel {
	/// A model from its parts. Nothing is checked; see [`validate`](super::validate).
	pub fn new(nodes: Vec<Node>, edges: Vec<Edge>) -> Self {
		Self { nodes, edges }
	}

	/// Parse the `{ "nodes": [...], "edges": [...] }` document form.
	pub fn from_json(json: &str) -> Result<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Pretty-printed document form.
	pub fn to_json(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	/// Look a node up by id.
	pub fn node(&self, id: &str) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Look an edge up by id.
	pub fn edge(&self, id: &str) -> Option<&Edge> {
		self.edges.iter().find(|e| e.id == id)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn document_uses_camel_case_and_type_keys() {
		let json = r#"{
			"nodes": [
				{ "id": "a", "type": "primario", "position": { "x": 1, "y": 2 },
				  "styleOverride": { "background-color": "red", "width": 30 } },
				{ "id": "b", "label": "B" }
			],
			"edges": [
				{ "id": "a-b", "source": "a", "target": "b", "directionality": "undirected" }
			]
		}"#;
		let model = GraphModel::from_json(json).unwrap();

		let a = model.node("a").unwrap();
		assert_eq!(a.kind, "primario");
		assert_eq!(a.position, Some(Position::new(1.0, 2.0)));
		let style = a.style_override.as_ref().unwrap();
		assert_eq!(style["background-color"], StyleValue::from("red"));
		assert_eq!(style["width"], StyleValue::Number(30.0));

		assert_eq!(model.node("b").unwrap().display_label(), "B");
		assert_eq!(
			model.edge("a-b").unwrap().directionality,
			Some(Directionality::Undirected)
		);
	}

	#[test]
	fn document_round_trips_and_preserves_order() {
		let model = GraphModel::new(
			vec![Node::new("z").at(0.0, 0.0), Node::new("a").with_label("first")],
			vec![Edge::new("z-a", "z", "a").with_style("line-color", "gray")],
		);
		let json = model.to_json().unwrap();
		assert!(json.find("\"z\"").unwrap() < json.find("\"a\"").unwrap());
		assert!(!json.contains("directionality"));
		assert_eq!(GraphModel::from_json(&json).unwrap(), model);
	}

	#[test]
	fn malformed_document_is_rejected() {
		let err = GraphModel::from_json(r#"{ "nodes": [ { "label": "no id" } ] }"#).unwrap_err();
		assert!(matches!(err, crate::Error::Json(_)));
	}

	#[test]
	fn style_values_read_as_numbers_and_text() {
		assert_eq!(StyleValue::from("12px").as_number(), Some(12.0));
		assert_eq!(StyleValue::Number(3.5).as_number(), Some(3.5));
		assert_eq!(StyleValue::from("red").as_text(), Some("red"));
		assert_eq!(StyleValue::Number(1.0).as_text(), None);
	}
}

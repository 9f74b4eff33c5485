use serde::{Deserialize, Serialize};

use crate::error::ElementKind;
use crate::graph::{StyleMap, StyleValue};

/// Which elements a base rule applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selector {
	/// Every node.
	Node,
	/// Every edge.
	Edge,
}

impl Selector {
	/// Whether an element of `kind` is selected.
	pub fn matches(self, kind: ElementKind) -> bool {
		matches!(
			(self, kind),
			(Selector::Node, ElementKind::Node) | (Selector::Edge, ElementKind::Edge)
		)
	}
}

/// A base stylesheet entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StyleRule {
	/// Elements the rule applies to.
	pub selector: Selector,
	/// Properties it sets.
	pub style: StyleMap,
}

impl StyleRule {
	/// A rule from `(property, value)` pairs.
	pub fn new<K, V>(selector: Selector, props: impl IntoIterator<Item = (K, V)>) -> Self
	where
		K: Into<String>,
		V: Into<StyleValue>,
	{
		Self {
			selector,
			style: props
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

/// Final property set for one element.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResolvedStyle(StyleMap);

impl ResolvedStyle {
	/// Raw value of a property.
	pub fn get(&self, key: &str) -> Option<&StyleValue> {
		self.0.get(key)
	}

	/// A text property.
	pub fn text(&self, key: &str) -> Option<&str> {
		self.get(key).and_then(StyleValue::as_text)
	}

	/// A numeric property; `"12px"` reads as 12.
	pub fn number(&self, key: &str) -> Option<f64> {
		self.get(key).and_then(StyleValue::as_number)
	}

	/// Every property, ordered by name.
	pub fn as_map(&self) -> &StyleMap {
		&self.0
	}
}

/// Merge every base rule matching `kind` in order, then the element's own override.
///
/// Merging is per key: a later source only shadows the properties it sets.
pub fn resolve_style(
	kind: ElementKind,
	base_rules: &[StyleRule],
	style_override: Option<&StyleMap>,
) -> ResolvedStyle {
	let mut resolved = StyleMap::new();
	for rule in base_rules.iter().filter(|r| r.selector.matches(kind)) {
		resolved.extend(rule.style.iter().map(|(k, v)| (k.clone(), v.clone())));
	}
	if let Some(overrides) = style_override {
		resolved.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
	}
	ResolvedStyle(resolved)
}

/// Labelled rectangles joined by bezier edges with filled arrowheads.
pub fn default_stylesheet() -> Vec<StyleRule> {
	vec![
		StyleRule::new(
			Selector::Node,
			[
				("label", "data(label)"),
				("text-valign", "center"),
				("text-halign", "center"),
				("shape", "rectangle"),
			],
		),
		StyleRule::new(
			Selector::Edge,
			[
				("curve-style", "bezier"),
				("target-arrow-shape", "triangle"),
				("target-arrow-fill", "filled"),
			],
		),
	]
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	fn map(pairs: &[(&str, &str)]) -> StyleMap {
		pairs.iter().map(|&(k, v)| (k.to_owned(), v.into())).collect()
	}

	#[test]
	fn override_merges_key_by_key() {
		let base = vec![StyleRule::new(
			Selector::Node,
			[("shape", "rectangle"), ("background-color", "blue")],
		)];
		let over = map(&[("background-color", "red")]);
		let resolved = resolve_style(ElementKind::Node, &base, Some(&over));
		assert_eq!(
			resolved.as_map(),
			&map(&[("shape", "rectangle"), ("background-color", "red")])
		);
	}

	#[test]
	fn rules_are_selected_by_kind() {
		let sheet = default_stylesheet();
		let node = resolve_style(ElementKind::Node, &sheet, None);
		let edge = resolve_style(ElementKind::Edge, &sheet, None);
		assert_eq!(node.text("shape"), Some("rectangle"));
		assert_eq!(node.get("target-arrow-shape"), None);
		assert_eq!(edge.text("target-arrow-shape"), Some("triangle"));
		assert_eq!(edge.get("shape"), None);
	}

	#[test]
	fn later_rules_shadow_earlier_ones() {
		let sheet = vec![
			StyleRule::new(Selector::Edge, [("line-color", "gray"), ("width", "1")]),
			StyleRule::new(Selector::Edge, [("line-color", "black")]),
		];
		let resolved = resolve_style(ElementKind::Edge, &sheet, None);
		assert_eq!(resolved.text("line-color"), Some("black"));
		assert_eq!(resolved.number("width"), Some(1.0));
	}

	#[test]
	fn override_without_base_rules() {
		let over = map(&[("background-color", "pink")]);
		let resolved = resolve_style(ElementKind::Node, &[], Some(&over));
		assert_eq!(resolved.as_map(), &over);
	}
}

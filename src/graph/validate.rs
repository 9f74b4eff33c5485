use std::collections::HashSet;
use std::ops::Deref;

use serde::Serialize;

use super::types::{Edge, GraphModel, Node};
use crate::error::{ElementKind, Error, Result};

/// A graph that passed [`validate`]: every id names exactly one element, every edge
/// endpoint exists, and defaults are filled in.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidatedModel(GraphModel);

impl ValidatedModel {
	/// Nodes in input order.
	pub fn nodes(&self) -> &[Node] {
		&self.0.nodes
	}

	/// Edges in input order.
	pub fn edges(&self) -> &[Edge] {
		&self.0.edges
	}

	/// Give up the validity guarantee and take the plain model back.
	pub fn into_model(self) -> GraphModel {
		self.0
	}
}

impl Deref for ValidatedModel {
	type Target = GraphModel;

	fn deref(&self) -> &GraphModel {
		&self.0
	}
}

/// Fill in defaults: a missing label becomes the id, a missing directionality
/// becomes directed. Idempotent.
pub fn normalize(model: &GraphModel) -> GraphModel {
	let nodes = model
		.nodes
		.iter()
		.map(|node| Node {
			label: Some(node.display_label().to_owned()),
			..node.clone()
		})
		.collect();
	let edges = model
		.edges
		.iter()
		.map(|edge| Edge {
			directionality: Some(edge.resolved_directionality()),
			..edge.clone()
		})
		.collect();
	GraphModel { nodes, edges }
}

/// Check uniqueness and referential integrity, then normalize.
///
/// Node and edge ids form one namespace. Node ids are checked first, then edge ids
/// against every id seen so far, then edge endpoints in edge order (source before
/// target). The first violation is reported; nothing is accepted
/// partially.
pub fn validate(model: &GraphModel) -> Result<ValidatedModel> {
	let mut node_ids = HashSet::with_capacity(model.nodes.len());
	for node in &model.nodes {
		if !node_ids.insert(node.id.as_str()) {
			return Err(Error::DuplicateId {
				kind: ElementKind::Node,
				id: node.id.clone(),
			});
		}
	}

	// edges share the node namespace: an id names at most one element
	let mut all_ids = node_ids.clone();
	for edge in &model.edges {
		if !all_ids.insert(edge.id.as_str()) {
			return Err(Error::DuplicateId {
				kind: ElementKind::Edge,
				id: edge.id.clone(),
			});
		}
	}

	for edge in &model.edges {
		for endpoint in [&edge.source, &edge.target] {
			if !node_ids.contains(endpoint.as_str()) {
				return Err(Error::DanglingReference {
					edge_id: edge.id.clone(),
					missing_node_id: endpoint.clone(),
				});
			}
		}
	}

	Ok(ValidatedModel(normalize(model)))
}


#[cfg(test)]
mod proptests {
	use proptest::prelude::*;

	use super::*;
	use crate::graph::{Directionality, Position};

	fn arb_directionality() -> impl Strategy<Value = Option<Directionality>> {
		prop_oneof![
			Just(None),
			Just(Some(Directionality::Directed)),
			Just(Some(Directionality::Undirected)),
		]
	}

	/// Well-formed models: ids `n*`/`e*` never clash and every endpoint exists.
	fn arb_model() -> impl Strategy<Value = GraphModel> {
		(1usize..8)
			.prop_flat_map(|n| {
				(
					prop::collection::vec(
						(
							prop::option::of("[a-z]{1,6}"),
							prop::option::of((-500.0f64..500.0, -500.0f64..500.0)),
						),
						n,
					),
					prop::collection::vec((0..n, 0..n, arb_directionality()), 0..12),
				)
			})
			.prop_map(|(nodes, edges)| {
				let nodes = nodes
					.into_iter()
					.enumerate()
					.map(|(i, (label, position))| Node {
						label,
						position: position.map(|(x, y)| Position::new(x, y)),
						..Node::new(format!("n{i}"))
					})
					.collect();
				let edges = edges
					.into_iter()
					.enumerate()
					.map(|(i, (source, target, directionality))| Edge {
						directionality,
						..Edge::new(format!("e{i}"), format!("n{source}"), format!("n{target}"))
					})
					.collect();
				GraphModel::new(nodes, edges)
			})
	}

	proptest! {
		#[test]
		fn normalized_models_validate(model in arb_model()) {
			prop_assert!(validate(&model).is_ok());
			prop_assert!(validate(&normalize(&model)).is_ok());
		}

		#[test]
		fn normalize_is_a_fixed_point(model in arb_model()) {
			let once = normalize(&model);
			prop_assert_eq!(normalize(&once), once.clone());
			prop_assert_eq!(validate(&model).unwrap().into_model(), once);
		}

		#[test]
		fn removed_endpoint_is_reported(model in arb_model()) {
			prop_assume!(!model.edges.is_empty());
			let mut broken = model.clone();
			let gone = broken.edges[0].target.clone();
			broken.nodes.retain(|n| n.id != gone);
			let first_hit = broken
				.edges
				.iter()
				.find(|e| e.source == gone || e.target == gone)
				.map(|e| e.id.clone());
			match validate(&broken) {
				Err(Error::DanglingReference { edge_id, missing_node_id }) => {
					prop_assert_eq!(Some(edge_id), first_hit);
					prop_assert_eq!(missing_node_id, gone);
				}
				other => prop_assert!(false, "expected a dangling reference, got {:?}", other),
			}
		}
	}
}

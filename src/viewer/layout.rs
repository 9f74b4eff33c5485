use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::ValidatedModel;

/// How node coordinates are obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
	/// Coordinates come verbatim from each node's position.
	///
	/// The canvas engine stores coordinates as `f32`, so a position is kept exactly only
	/// within single precision: integers up to 2^24 in magnitude, and fewer fractional
	/// digits the further a point lies from the origin. Larger values are rounded to the
	/// nearest representable `f32` when the instance is created.
	Preset,
	/// The engine places nodes itself.
	Automatic,
}

/// Preset when every node is positioned, automatic when none is.
///
/// A model with no nodes has nothing to place and resolves to automatic.
pub fn resolve_layout(model: &ValidatedModel) -> Result<LayoutMode> {
	let total = model.nodes().len();
	let positioned = model.nodes().iter().filter(|n| n.position.is_some()).count();
	match positioned {
		0 => Ok(LayoutMode::Automatic),
		p if p == total => Ok(LayoutMode::Preset),
		p => Err(Error::MixedLayout {
			positioned: p,
			unpositioned: total - p,
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::graph::{GraphModel, Node, validate};

	fn layout_of(nodes: Vec<Node>) -> Result<LayoutMode> {
		resolve_layout(&validate(&GraphModel::new(nodes, vec![]))?)
	}

	#[test]
	fn all_positioned_is_preset() {
		let mode = layout_of(vec![Node::new("a").at(0.0, 0.0), Node::new("b").at(1.0, 1.0)]);
		assert_eq!(mode.unwrap(), LayoutMode::Preset);
	}

	#[test]
	fn none_positioned_is_automatic() {
		assert_eq!(
			layout_of(vec![Node::new("a"), Node::new("b")]).unwrap(),
			LayoutMode::Automatic
		);
		assert_eq!(layout_of(vec![]).unwrap(), LayoutMode::Automatic);
	}

	#[test]
	fn partially_positioned_is_rejected() {
		let err = layout_of(vec![
			Node::new("a").at(0.0, 0.0),
			Node::new("b"),
			Node::new("c"),
		])
		.unwrap_err();
		assert!(matches!(
			err,
			Error::MixedLayout {
				positioned: 1,
				unpositioned: 2
			}
		));
	}
}

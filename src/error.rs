//! Errors raised at the graph and viewer boundaries.

use std::fmt;

use crate::viewer::SurfaceId;

/// Which collection of a graph an element lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
	/// A node.
	Node,
	/// An edge.
	Edge,
}

impl fmt::Display for ElementKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ElementKind::Node => f.write_str("node"),
			ElementKind::Edge => f.write_str("edge"),
		}
	}
}

/// Every way an operation in this crate can be rejected.
///
/// All variants are precondition failures: nothing is retried and nothing is left
/// half-built when one is returned.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// An id was used twice. `kind` is the collection of the second occurrence.
	#[error("duplicate {kind} id `{id}`")]
	DuplicateId {
		/// Collection of the offending element.
		kind: ElementKind,
		/// The repeated id.
		id: String,
	},

	/// An edge endpoint names no node.
	#[error("edge `{edge_id}` references missing node `{missing_node_id}`")]
	DanglingReference {
		/// The edge holding the bad reference.
		edge_id: String,
		/// The node id that does not exist.
		missing_node_id: String,
	},

	/// Some nodes are positioned and some are not.
	#[error(
		"{positioned} node(s) have a position and {unpositioned} do not; either every node is positioned or none is"
	)]
	MixedLayout {
		/// Nodes carrying a position.
		positioned: usize,
		/// Nodes without one.
		unpositioned: usize,
	},

	/// The session was unmounted.
	#[error("viewer session is closed")]
	SessionClosed,

	/// The surface already hosts a live session.
	#[error("surface {surface} is already bound to a live session")]
	DoubleMount {
		/// The contested surface.
		surface: SurfaceId,
	},

	/// The rendering engine could not create an instance.
	#[error("rendering engine failed: {message}")]
	Engine {
		/// What the engine reported.
		message: String,
	},

	/// A serialized graph could not be parsed.
	#[error("invalid graph document: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// Shorthand for an engine-side failure.
	pub fn engine(message: impl Into<String>) -> Self {
		Error::Engine {
			message: message.into(),
		}
	}
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

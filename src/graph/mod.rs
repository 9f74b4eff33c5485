//! Graph data model: nodes, edges, fixed positions and per-element style overrides.

pub mod datasets;
mod elements;
mod types;
mod validate;

pub use elements::{EdgeDefinition, EdgeFields, ElementsDefinition, NodeDefinition, NodeFields};
pub use types::{Directionality, Edge, GraphModel, Node, Position, StyleMap, StyleValue};
pub use validate::{ValidatedModel, normalize, validate};

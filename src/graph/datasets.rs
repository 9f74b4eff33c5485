//! Built-in sample graphs. All nodes carry fixed positions, so every dataset renders
//! with the preset layout.

use super::types::{Edge, GraphModel, Node};

const PRIMARY: &str = "primario";

fn primary(id: &str, x: f64, y: f64) -> Node {
	Node::new(id).with_label(id).with_kind(PRIMARY).at(x, y)
}

/// Seven nodes around a hub, all edges directed.
pub fn hello_example() -> GraphModel {
	let nodes = vec![
		primary("base_roja", 120.0, 150.0),
		primary("a", 210.0, 130.0),
		primary("b", 210.0, 160.0),
		primary("c", 210.0, 190.0),
		primary("n1", 40.0, 130.0),
		primary("n2", 40.0, 190.0),
		primary("n3", 40.0, 160.0),
	];
	let edges = vec![
		Edge::new("base-a", "base_roja", "a"),
		Edge::new("base-b", "base_roja", "b"),
		Edge::new("base-c", "base_roja", "c"),
		Edge::new("n1-base", "n1", "base_roja"),
		Edge::new("n2-base", "n2", "base_roja"),
		Edge::new("n3-base", "n3", "base_roja"),
	];
	GraphModel::new(nodes, edges)
}

/// A hub with directed fan-out, undirected feeder layers underneath and an external column.
pub fn layered_example() -> GraphModel {
	let mut nodes = vec![primary("base_roja", 120.0, 150.0).with_style("background-color", "red")];
	for (id, y) in [("ext1", 120.0), ("ext2", 160.0), ("ext3", 200.0)] {
		nodes.push(primary(id, 270.0, y));
	}
	for (id, y) in [("a", 120.0), ("b", 160.0), ("c", 200.0)] {
		nodes.push(primary(id, 210.0, y).with_style("background-color", "pink"));
	}
	let layers = [
		("n1", 40.0, 130.0),
		("n2", 40.0, 170.0),
		("n3", 40.0, 210.0),
		("n4", 10.0, 300.0),
		("n5", 45.0, 300.0),
		("n6", 80.0, 300.0),
		("n7", 60.0, 350.0),
		("n8", 100.0, 350.0),
		("n9", 60.0, 450.0),
		("n10", 100.0, 450.0),
		("n11", 150.0, 450.0),
	];
	for (id, x, y) in layers {
		nodes.push(primary(id, x, y).with_style("background-color", "green"));
	}

	let mut edges = vec![
		Edge::new("base-a", "base_roja", "a"),
		Edge::new("base-b", "base_roja", "b"),
		Edge::new("base-c", "base_roja", "c"),
	];
	let undirected = [
		("n1-base", "n1", "base_roja"),
		("n2-base", "n2", "base_roja"),
		("n3-base", "n3", "base_roja"),
		("n4-n3", "n4", "n3"),
		("n5-n3", "n5", "n3"),
		("n6-n3", "n6", "n3"),
		// ids kept from the source data although the edges attach to n6
		("n7-n3", "n7", "n6"),
		("n8-n3", "n8", "n6"),
		("n9-n8", "n9", "n8"),
		("n10-n8", "n10", "n8"),
		("n11-n8", "n11", "n8"),
		("ext1-a", "ext1", "a"),
		("ext2-b", "ext2", "b"),
		("ext3-c", "ext3", "c"),
	];
	edges.extend(
		undirected
			.into_iter()
			.map(|(id, source, target)| Edge::new(id, source, target).undirected()),
	);
	GraphModel::new(nodes, edges)
}

/// Two red nodes far apart, no edges.
pub fn root_model() -> GraphModel {
	let nodes = vec![
		Node::new("base_model")
			.with_label("Modelo de creación raíz")
			.with_kind(PRIMARY)
			.at(120.0, 150.0)
			.with_style("background-color", "red"),
		primary("a", 900.0, 150.0).with_style("background-color", "red"),
	];
	GraphModel::new(nodes, Vec::new())
}

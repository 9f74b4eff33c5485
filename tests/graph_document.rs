use graph_canvas_viewer::graph::{
	Directionality, ElementsDefinition, GraphModel, datasets, normalize, validate,
};
use graph_canvas_viewer::viewer::{LayoutMode, RenderConfig, RenderElements, resolve_layout};
use pretty_assertions::assert_eq;

const DOCUMENT: &str = r#"{
	"nodes": [
		{ "id": "base", "type": "primario", "position": { "x": 0, "y": 0 },
		  "styleOverride": { "background-color": "red" } },
		{ "id": "x", "label": "Ex", "position": { "x": 10, "y": 0 } }
	],
	"edges": [
		{ "id": "base-x", "source": "base", "target": "x" },
		{ "id": "x-base", "source": "x", "target": "base", "directionality": "undirected" }
	]
}"#;

#[test]
fn document_validates_into_a_preset_model() {
	let model = validate(&GraphModel::from_json(DOCUMENT).unwrap()).unwrap();
	assert_eq!(resolve_layout(&model).unwrap(), LayoutMode::Preset);

	let labels: Vec<_> = model.nodes().iter().map(|n| n.label.as_deref()).collect();
	assert_eq!(labels, vec![Some("base"), Some("Ex")]);

	let dirs: Vec<_> = model.edges().iter().map(|e| e.directionality).collect();
	assert_eq!(
		dirs,
		vec![
			Some(Directionality::Directed),
			Some(Directionality::Undirected)
		]
	);
}

#[test]
fn element_order_does_not_change_what_is_rendered() {
	let forward = GraphModel::from_json(DOCUMENT).unwrap();
	let mut reversed = forward.clone();
	reversed.nodes.reverse();
	reversed.edges.reverse();

	let config = RenderConfig::default();
	let render = |model: &GraphModel| {
		let mut elements = RenderElements::build(&validate(model).unwrap(), &config.stylesheet);
		elements.nodes.sort_by(|a, b| a.id.cmp(&b.id));
		elements.edges.sort_by(|a, b| a.id.cmp(&b.id));
		elements
	};
	assert_eq!(render(&forward), render(&reversed));
}

#[test]
fn sample_datasets_survive_both_serialized_forms() {
	for model in [
		datasets::hello_example(),
		datasets::layered_example(),
		datasets::root_model(),
	] {
		let normalized = normalize(&model);

		let document = GraphModel::from_json(&model.to_json().unwrap()).unwrap();
		assert_eq!(normalize(&document), normalized);

		let elements = ElementsDefinition::from_model(&model).into_model();
		assert_eq!(normalize(&elements), normalized);
	}
}

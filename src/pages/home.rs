use leptos::prelude::*;

use crate::components::graph_canvas::GraphViewer;
use crate::graph::{GraphModel, datasets, validate};

#[component]
fn DatasetView(title: &'static str, model: GraphModel) -> impl IntoView {
	let content = match validate(&model) {
		Ok(validated) => {
			let graph = Signal::derive(move || validated.clone());
			view! { <GraphViewer model=graph fullscreen=true /> }.into_any()
		}
		Err(err) => view! { <p class="graph-error">{err.to_string()}</p> }.into_any(),
	};

	view! {
		<div class="fullscreen-graph">
			{content}
			<div class="graph-overlay">
				<h1>{title}</h1>
				<p class="subtitle">"Scroll to zoom. Drag background to pan."</p>
			</div>
		</div>
	}
}

/// Default Home Page: the layered sample graph.
#[component]
pub fn Home() -> impl IntoView {
	view! { <DatasetView title="Layered Graph" model=datasets::layered_example() /> }
}

/// The seven-node hello graph.
#[component]
pub fn Hello() -> impl IntoView {
	view! { <DatasetView title="Hello, Graph" model=datasets::hello_example() /> }
}

/// Two fixed root nodes.
#[component]
pub fn RootModel() -> impl IntoView {
	view! { <DatasetView title="Root Model" model=datasets::root_model() /> }
}

//! Graph viewer: a validated graph data model, a viewer that binds exactly one
//! rendering-engine instance per mounted surface, and the Leptos client-side app
//! hosting it on a canvas.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

mod components;
pub mod error;
pub mod graph;
mod pages;
pub mod viewer;

pub use error::{ElementKind, Error, Result};

// Top-Level pages
use crate::pages::home::{Hello, Home, RootModel};
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// An app router which renders the sample graphs and handles 404's
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Graph Viewer" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Home />
				<Route path=path!("/hello") view=Hello />
				<Route path=path!("/root") view=RootModel />
			</Routes>
		</Router>
	}
}

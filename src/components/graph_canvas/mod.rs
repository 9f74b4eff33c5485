mod component;
mod engine;
mod render;
mod state;

pub use component::GraphViewer;

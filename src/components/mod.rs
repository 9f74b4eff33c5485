//! Browser-side pieces: the canvas engine and the component hosting it.

pub mod graph_canvas;

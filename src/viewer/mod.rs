//! Viewer lifecycle: binding exactly one rendering-engine instance to a mounted
//! surface and releasing it on unmount.
//!
//! ```text
//! UNMOUNTED --mount--> MOUNTED --unmount--> UNMOUNTED (terminal)
//! ```

mod config;
mod engine;
mod layout;
mod session;
mod style;

pub use config::{RenderConfig, SimulationConfig};
pub use engine::{RenderEdge, RenderElements, RenderEngine, RenderNode};
pub use layout::{LayoutMode, resolve_layout};
pub use session::{SessionId, SurfaceHandle, SurfaceId, Viewer, ViewerSession};
pub use style::{ResolvedStyle, Selector, StyleRule, default_stylesheet, resolve_style};

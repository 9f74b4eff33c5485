use std::cell::Cell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, info, warn};

use super::config::RenderConfig;
use super::engine::{RenderElements, RenderEngine};
use super::layout::{LayoutMode, resolve_layout};
use super::style::ResolvedStyle;
use crate::error::{Error, Result};
use crate::graph::ValidatedModel;

static NEXT_SURFACE: AtomicU64 = AtomicU64::new(1);
static NEXT_SESSION: AtomicU64 = AtomicU64::new(1);
static NEXT_VIEWER: AtomicU64 = AtomicU64::new(1);

/// Identity of a drawing surface, stable across clones of its handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SurfaceId(u64);

impl fmt::Display for SurfaceId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "surface#{}", self.0)
	}
}

/// Identity of one mount. Never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(u64);

impl fmt::Display for SessionId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "session#{}", self.0)
	}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct ViewerId(u64);

/// Which session, if any, currently holds a surface. Shared by every clone of its handle.
type Binding = Rc<Cell<Option<SessionId>>>;

/// An opaque drawing surface plus the identity sessions bind to.
///
/// Clones refer to the same surface and see the same binding, whichever viewer
/// mounted on it. A replaced surface needs a new handle.
#[derive(Clone, Debug)]
pub struct SurfaceHandle<S> {
	id: SurfaceId,
	surface: S,
	binding: Binding,
}

impl<S> SurfaceHandle<S> {
	/// Wrap `surface` under a fresh, process-unique identity.
	pub fn new(surface: S) -> Self {
		Self {
			id: SurfaceId(NEXT_SURFACE.fetch_add(1, Ordering::Relaxed)),
			surface,
			binding: Rc::new(Cell::new(None)),
		}
	}

	/// Identity shared by all clones of this handle.
	pub fn id(&self) -> SurfaceId {
		self.id
	}

	/// The underlying drawing region.
	pub fn surface(&self) -> &S {
		&self.surface
	}

	/// The session currently mounted here, if any.
	pub fn bound_session(&self) -> Option<SessionId> {
		self.binding.get()
	}

	/// True while a live session holds this surface.
	pub fn is_bound(&self) -> bool {
		self.binding.get().is_some()
	}
}

struct Mounted<I> {
	instance: I,
	model: ValidatedModel,
	layout: LayoutMode,
	elements: RenderElements,
}

/// One engine instance bound to one surface, from `mount` until `unmount`.
pub struct ViewerSession<E: RenderEngine> {
	id: SessionId,
	owner: ViewerId,
	surface: SurfaceId,
	binding: Binding,
	mounted: Option<Mounted<E::Instance>>,
}

impl<E: RenderEngine> ViewerSession<E> {
	/// Identity of this mount; stays readable after unmount.
	pub fn id(&self) -> SessionId {
		self.id
	}

	/// Whether the engine instance is still alive.
	pub fn is_mounted(&self) -> bool {
		self.mounted.is_some()
	}

	fn live(&self) -> Result<&Mounted<E::Instance>> {
		self.mounted.as_ref().ok_or(Error::SessionClosed)
	}

	/// Surface this session is bound to.
	pub fn surface(&self) -> Result<SurfaceId> {
		self.live().map(|_| self.surface)
	}

	/// Layout mode chosen at mount.
	pub fn layout_mode(&self) -> Result<LayoutMode> {
		self.live().map(|m| m.layout)
	}

	/// The model the instance was created from.
	pub fn model(&self) -> Result<&ValidatedModel> {
		self.live().map(|m| &m.model)
	}

	/// Elements as they were handed to the engine.
	pub fn elements(&self) -> Result<&RenderElements> {
		self.live().map(|m| &m.elements)
	}

	/// The live engine instance, for render-time calls the host makes on it.
	pub fn engine(&self) -> Result<&E::Instance> {
		self.live().map(|m| &m.instance)
	}

	/// Mutable access to the live engine instance.
	pub fn engine_mut(&mut self) -> Result<&mut E::Instance> {
		self.mounted
			.as_mut()
			.map(|m| &mut m.instance)
			.ok_or(Error::SessionClosed)
	}

	/// Style the element with `id` was created with, if such an element exists.
	pub fn resolved_style(&self, id: &str) -> Result<Option<&ResolvedStyle>> {
		self.live().map(|m| m.elements.style_of(id))
	}

	fn release_binding(&self) {
		if self.binding.get() == Some(self.id) {
			self.binding.set(None);
		}
	}
}

impl<E: RenderEngine> fmt::Debug for ViewerSession<E> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ViewerSession")
			.field("id", &self.id)
			.field("surface", &self.surface)
			.field("mounted", &self.is_mounted())
			.finish()
	}
}

impl<E: RenderEngine> Drop for ViewerSession<E> {
	fn drop(&mut self) {
		if self.mounted.is_some() {
			warn!(
				"{} dropped while still mounted on {}; engine instance leaked, surface released",
				self.id, self.surface
			);
			self.release_binding();
		}
	}
}

/// Creates and releases engine instances, one per bound surface.
pub struct Viewer<E: RenderEngine> {
	id: ViewerId,
	engine: E,
	live: HashMap<SessionId, Binding>,
}

impl<E: RenderEngine> Viewer<E> {
	/// A viewer driving `engine`.
	pub fn new(engine: E) -> Self {
		Self {
			id: ViewerId(NEXT_VIEWER.fetch_add(1, Ordering::Relaxed)),
			engine,
			live: HashMap::new(),
		}
	}

	/// The engine this viewer creates instances with.
	pub fn engine(&self) -> &E {
		&self.engine
	}

	/// Number of sessions mounted through this viewer that still hold their surface.
	pub fn live_sessions(&self) -> usize {
		self.live
			.iter()
			.filter(|(id, binding)| binding.get() == Some(**id))
			.count()
	}

	/// Bind a new engine instance to `surface`.
	///
	/// Every precondition is checked before the engine is touched, so a failed
	/// mount leaves the surface as it was. A surface held by any live session,
	/// from this viewer or another, is refused.
	pub fn mount(
		&mut self,
		surface: &SurfaceHandle<E::Surface>,
		model: ValidatedModel,
		config: &RenderConfig,
	) -> Result<ViewerSession<E>> {
		let surface_id = surface.id();
		if let Some(holder) = surface.bound_session() {
			warn!("refusing to mount on {surface_id}: held by {holder}");
			return Err(Error::DoubleMount {
				surface: surface_id,
			});
		}
		let layout = resolve_layout(&model)?;
		let elements = RenderElements::build(&model, &config.stylesheet);

		let instance =
			self.engine
				.create_instance(surface.surface(), &elements, config, layout)?;

		let id = SessionId(NEXT_SESSION.fetch_add(1, Ordering::Relaxed));
		surface.binding.set(Some(id));
		// sessions dropped without unmount have already released their binding
		self.live.retain(|id, binding| binding.get() == Some(*id));
		self.live.insert(id, surface.binding.clone());
		info!(
			"mounted {id} on {surface_id}: {} nodes, {} edges, {layout:?} layout",
			elements.nodes.len(),
			elements.edges.len()
		);
		Ok(ViewerSession {
			id,
			owner: self.id,
			surface: surface_id,
			binding: surface.binding.clone(),
			mounted: Some(Mounted {
				instance,
				model,
				layout,
				elements,
			}),
		})
	}

	/// Destroy the session's engine instance and free its surface.
	///
	/// A second call on the same session does nothing. Sessions mounted by another
	/// viewer are left untouched: only the engine that created an instance destroys it.
	pub fn unmount(&mut self, session: &mut ViewerSession<E>) {
		if session.owner != self.id {
			warn!("{} belongs to another viewer; not unmounting", session.id);
			return;
		}
		let Some(mounted) = session.mounted.take() else {
			debug!("{} already unmounted", session.id);
			return;
		};
		self.engine.destroy(mounted.instance);
		session.release_binding();
		self.live.remove(&session.id);
		info!("unmounted {} from {}", session.id, session.surface);
	}
}

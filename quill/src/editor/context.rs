//! Shared controller state and the plugin-facing context.

use super::measure::{InlineToolbar, Measurements};
use parking_lot::{Mutex, RwLock};
use quill_core::{
    EditorProps, EditorState, EditorSurface, LifecyclePhase, Plugin, PluginContext, PluginMethods,
    QuillError,
};
use quill_std::registry::resolve_plugins;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

pub(crate) struct Shared {
    props: RwLock<Arc<EditorProps>>,
    state: RwLock<EditorState>,
    read_only: AtomicBool,
    surface: RwLock<Option<Arc<dyn EditorSurface>>>,
    measurements: Mutex<Measurements>,
}

/// The controller's shared state. Every [`PluginMethods`] handle the
/// controller hands out is backed by a clone of this.
#[derive(Clone)]
pub struct EditorContext(Arc<Shared>);

impl EditorContext {
    pub(crate) fn new(props: EditorProps) -> Self {
        let state = props.editor_state.clone();
        Self(Arc::new(Shared {
            props: RwLock::new(Arc::new(props)),
            state: RwLock::new(state),
            read_only: AtomicBool::new(false),
            surface: RwLock::new(None),
            measurements: Mutex::new(Measurements::default()),
        }))
    }

    /// A plugin-methods handle backed by this context.
    pub fn methods(&self) -> PluginMethods {
        PluginMethods::new(Arc::new(self.clone()))
    }

    pub(crate) fn replace_props(&self, props: EditorProps) {
        *self.0.props.write() = Arc::new(props);
    }

    pub(crate) fn attach_surface(&self, surface: Option<Arc<dyn EditorSurface>>) {
        *self.0.surface.write() = surface;
    }

    pub(crate) fn measurements(&self) -> Measurements {
        self.0.measurements.lock().clone()
    }

    pub(crate) fn with_measurements<R>(&self, f: impl FnOnce(&mut Measurements) -> R) -> R {
        f(&mut *self.0.measurements.lock())
    }

    /// The single writer of the editing state.
    ///
    /// Runs every resolved plugin's `onChange` transformer in order, then
    /// stores the result along with the inline toolbar computed from the
    /// incoming selection, schedules a deferred selection measurement and
    /// finally notifies the host. A rejected commit changes nothing. No lock
    /// is held while plugin or host code runs, so transformers may read the
    /// state or commit again.
    pub(crate) fn on_change(&self, state: EditorState) -> Result<(), QuillError> {
        let props = self.props();
        let toolbar = InlineToolbar::for_selection(&state, props.geometry.as_deref());

        let methods = self.methods();
        let mut next = state;
        for plugin in resolve_plugins(&props) {
            let Some(transform) = plugin.on_change() else {
                continue;
            };
            next = transform(next, &methods).map_err(|source| QuillError::Lifecycle {
                phase: LifecyclePhase::OnChange,
                plugin: plugin.name().to_owned(),
                source,
            })?;
        }

        *self.0.state.write() = next.clone();
        self.with_measurements(|m| {
            m.inline_toolbar = toolbar;
            m.pending += 1;
        });

        #[cfg(feature = "tracing")]
        tracing::trace!(change = ?next.last_change_type(), "committed editor state");

        if let Some(notify) = &props.on_change {
            notify(&next, &methods);
        }
        Ok(())
    }

    /// Drop every reference the controller holds to plugins and the surface.
    pub(crate) fn release(&self) {
        *self.0.props.write() = Arc::new(EditorProps::new());
        *self.0.surface.write() = None;
    }
}

impl PluginContext for EditorContext {
    fn editor_state(&self) -> EditorState {
        self.0.state.read().clone()
    }

    fn set_editor_state(&self, state: EditorState) -> Result<(), QuillError> {
        self.on_change(state)
    }

    fn plugins(&self) -> Vec<Arc<Plugin>> {
        self.0.props.read().plugins.clone()
    }

    fn props(&self) -> Arc<EditorProps> {
        self.0.props.read().clone()
    }

    fn read_only(&self) -> bool {
        self.0.props.read().read_only || self.0.read_only.load(Ordering::SeqCst)
    }

    fn set_read_only(&self, read_only: bool) {
        self.0.read_only.store(read_only, Ordering::SeqCst);
    }

    fn editor_ref(&self) -> Option<Arc<dyn EditorSurface>> {
        self.0.surface.read().clone()
    }
}

impl std::fmt::Debug for EditorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorContext")
            .field("state", &*self.0.state.read())
            .field("read_only", &self.0.read_only.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

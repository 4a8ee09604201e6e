//! # Plugin Methods
//!
//! Every hook invocation, lifecycle callback and `onChange` transformer
//! receives a [`PluginMethods`] handle. It is the only way a plugin reaches
//! the shared editing state or the host configuration, so plugins never
//! couple to the state controller's internals.
//!
//! Reads always reflect the current state, and every write flows through
//! the controller's single `onChange` path.

use crate::{
    config::EditorProps,
    error::QuillError,
    plugin::Plugin,
    state::EditorState,
    surface::EditorSurface,
};
use std::{fmt, sync::Arc};

/// Accessors and mutators a state controller exposes to plugins.
///
/// This trait is object-safe; [`PluginMethods`] wraps it for cheap cloning.
pub trait PluginContext: Send + Sync {
    /// The current editing state.
    fn editor_state(&self) -> EditorState;

    /// Replace the editing state through the `onChange` path.
    fn set_editor_state(&self, state: EditorState) -> Result<(), QuillError>;

    /// The explicitly configured plugins, in priority order.
    fn plugins(&self) -> Vec<Arc<Plugin>>;

    /// The current host configuration.
    fn props(&self) -> Arc<EditorProps>;

    /// Whether the editor is read-only.
    fn read_only(&self) -> bool;

    /// Toggle the controller's read-only flag.
    fn set_read_only(&self, read_only: bool);

    /// The mounted editing surface, if one is attached.
    fn editor_ref(&self) -> Option<Arc<dyn EditorSurface>>;
}

/// The handle appended to every hook invocation.
#[derive(Clone)]
pub struct PluginMethods {
    context: Arc<dyn PluginContext>,
}

impl PluginMethods {
    /// Wrap a context.
    pub fn new(context: Arc<dyn PluginContext>) -> Self {
        Self { context }
    }

    /// See [`PluginContext::editor_state`].
    pub fn editor_state(&self) -> EditorState {
        self.context.editor_state()
    }

    /// See [`PluginContext::set_editor_state`].
    pub fn set_editor_state(&self, state: EditorState) -> Result<(), QuillError> {
        self.context.set_editor_state(state)
    }

    /// See [`PluginContext::plugins`].
    pub fn plugins(&self) -> Vec<Arc<Plugin>> {
        self.context.plugins()
    }

    /// See [`PluginContext::props`].
    pub fn props(&self) -> Arc<EditorProps> {
        self.context.props()
    }

    /// See [`PluginContext::read_only`].
    pub fn read_only(&self) -> bool {
        self.context.read_only()
    }

    /// See [`PluginContext::set_read_only`].
    pub fn set_read_only(&self, read_only: bool) {
        self.context.set_read_only(read_only)
    }

    /// See [`PluginContext::editor_ref`].
    pub fn editor_ref(&self) -> Option<Arc<dyn EditorSurface>> {
        self.context.editor_ref()
    }
}

impl fmt::Debug for PluginMethods {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PluginMethods").finish_non_exhaustive()
    }
}

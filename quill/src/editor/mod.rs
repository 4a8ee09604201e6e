//! # State Controller
//!
//! [`Editor`] owns the current [`EditorState`] and ties the engine together:
//!
//! 1. construction runs every `initialize` callback (host first), builds the
//!    decoration provider once and commits the initial state
//! 2. every write goes through the single `onChange` path
//! 3. every [`render`](Editor::render) recomputes the dispatch table and
//!    auxiliary maps from the current props
//! 4. [`unmount`](Editor::unmount) runs every `willUnmount` exactly once
//!
//! # Example
//!
//! ```rust,ignore
//! let editor = Editor::new(
//!     EditorProps::new()
//!         .with_plugin(image_block_plugin())
//!         .on_change(|state, _| println!("{}", state.current_content().plain_text())),
//! )?;
//!
//! let pass = editor.render();
//! editor.dispatch_handle("handleKeyCommand", &HookArgs::Command("bold".into()))?;
//! editor.unmount()?;
//! ```

mod context;
mod measure;
mod render;

pub use context::EditorContext;
pub use measure::{InlineToolbar, Measurements, SIDE_TOOLBAR_HEIGHT, SideToolbar};
pub use render::RenderPass;

use quill_core::{
    BlockRenderer, ContentBlock, EditorProps, EditorState, EditorSurface, HandleValue, HookArgs,
    HookValue, KeyEvent, LifecyclePhase, Plugin, PluginContext, PluginMethods, QuillError, names,
};
use quill_std::{
    compose::PluginHooks,
    decorators::build_decoration_provider,
    registry::{resolve_decorators, with_host},
    resolve::{resolve_accessibility_props, resolve_block_render_map, resolve_custom_style_map},
};
use std::sync::Arc;

/// The state controller.
pub struct Editor {
    ctx: EditorContext,
    mounted: bool,
}

impl Editor {
    /// Initialize plugins and commit the decorated initial state.
    ///
    /// # Errors
    ///
    /// Fails with [`QuillError::Lifecycle`] if an `initialize` callback or an
    /// `onChange` transformer fails. Plugins initialized before a failing
    /// `initialize` are unmounted again before the error is returned.
    pub fn new(props: EditorProps) -> Result<Self, QuillError> {
        let ctx = EditorContext::new(props);
        let methods = ctx.methods();
        let props = ctx.props();
        let plugins = with_host(&props);

        for (i, plugin) in plugins.iter().enumerate() {
            let Some(initialize) = plugin.initializer() else {
                continue;
            };
            if let Err(source) = initialize(&methods) {
                let _ = unmount_plugins(&plugins[..i], &methods);
                ctx.release();
                return Err(QuillError::Lifecycle {
                    phase: LifecyclePhase::Initialize,
                    plugin: plugin.name().to_owned(),
                    source,
                });
            }
        }

        let provider = build_decoration_provider(&resolve_decorators(&props));
        let initial = props
            .editor_state
            .with_decorator(provider)
            .move_selection_to_end();

        let editor = Self { ctx, mounted: true };
        editor.ctx.on_change(initial)?;

        #[cfg(feature = "tracing")]
        tracing::info!(plugins = props.plugins.len(), "editor mounted");

        Ok(editor)
    }

    /// The handle passed to every hook invocation.
    pub fn plugin_methods(&self) -> PluginMethods {
        self.ctx.methods()
    }

    /// The shared context backing [`plugin_methods`](Self::plugin_methods).
    pub fn context(&self) -> &EditorContext {
        &self.ctx
    }

    /// The current editing state.
    pub fn editor_state(&self) -> EditorState {
        self.ctx.editor_state()
    }

    /// Commit a new editing state through the `onChange` path.
    pub fn on_change(&self, state: EditorState) -> Result<(), QuillError> {
        self.ctx.on_change(state)
    }

    /// The current host configuration.
    pub fn props(&self) -> Arc<EditorProps> {
        self.ctx.props()
    }

    /// Replace the host configuration. Takes effect on the next dispatch or
    /// render pass; the decoration provider built at construction is kept.
    pub fn set_props(&self, props: EditorProps) {
        self.ctx.replace_props(props);
    }

    /// Whether the editor is read-only, by props or by a plugin's request.
    pub fn read_only(&self) -> bool {
        self.ctx.read_only()
    }

    /// Set the controller's read-only flag.
    pub fn set_read_only(&self, read_only: bool) {
        self.ctx.set_read_only(read_only);
    }

    /// Attach the mounted editing surface.
    pub fn attach_surface(&self, surface: Arc<dyn EditorSurface>) {
        self.ctx.attach_surface(Some(surface));
    }

    /// Detach the editing surface.
    pub fn detach_surface(&self) {
        self.ctx.attach_surface(None);
    }

    /// Focus the attached surface, if any.
    pub fn focus(&self) {
        if let Some(surface) = self.ctx.editor_ref() {
            surface.focus();
        }
    }

    /// Blur the attached surface, if any.
    pub fn blur(&self) {
        if let Some(surface) = self.ctx.editor_ref() {
            surface.blur();
        }
    }

    /// The dispatch table for the current plugin list.
    pub fn plugin_hooks(&self) -> PluginHooks {
        PluginHooks::build(with_host(&self.ctx.props()))
    }

    /// Dispatch an event hook.
    pub fn dispatch_event(&self, name: &str, args: &HookArgs) -> Result<bool, QuillError> {
        Ok(self.plugin_hooks().dispatch_event(name, args, &self.plugin_methods())?)
    }

    /// Dispatch a handle hook.
    pub fn dispatch_handle(&self, name: &str, args: &HookArgs) -> Result<HandleValue, QuillError> {
        Ok(self.plugin_hooks().dispatch_handle(name, args, &self.plugin_methods())?)
    }

    /// Call a generic function hook. `None` stands for `false`.
    pub fn call_fn(&self, name: &str, args: &HookArgs) -> Result<Option<HookValue>, QuillError> {
        Ok(self.plugin_hooks().call_fn(name, args, &self.plugin_methods())?)
    }

    /// The composed `blockRendererFn` answer for `block`.
    pub fn block_renderer(&self, block: &ContentBlock) -> Result<Option<BlockRenderer>, QuillError> {
        Ok(self.plugin_hooks().block_renderer(block, &self.plugin_methods())?)
    }

    /// The composed `blockStyleFn` answer for `block`.
    pub fn block_style(&self, block: &ContentBlock) -> Result<Option<String>, QuillError> {
        Ok(self.plugin_hooks().block_style(block, &self.plugin_methods())?)
    }

    /// Resolve `key` to a command with `keyBindingFn`, then offer the command
    /// to `handleKeyCommand`.
    ///
    /// Returns `None` when no binding exists.
    pub fn key_command(&self, key: &KeyEvent) -> Result<Option<(String, HandleValue)>, QuillError> {
        let hooks = self.plugin_hooks();
        let methods = self.plugin_methods();
        let Some(command) = hooks.key_binding(key, &methods)? else {
            return Ok(None);
        };
        let handled = hooks.dispatch_handle(
            names::HANDLE_KEY_COMMAND,
            &HookArgs::Command(command.clone()),
            &methods,
        )?;
        Ok(Some((command, handled)))
    }

    /// Compute everything the rendering layer needs for one pass.
    pub fn render(&self) -> RenderPass {
        let props = self.ctx.props();
        let measurements = self.ctx.measurements();
        RenderPass::new(
            PluginHooks::build(with_host(&props)),
            resolve_custom_style_map(&props),
            resolve_block_render_map(&props),
            resolve_accessibility_props(&props),
            self.ctx.editor_state(),
            self.ctx.read_only(),
            measurements.inline_toolbar(),
            measurements.side_toolbar(props.geometry.as_deref()),
            self.ctx.methods(),
        )
    }

    /// Run every scheduled selection measurement. Returns how many ran.
    pub fn run_deferred(&self) -> usize {
        let props = self.ctx.props();
        self.ctx.with_measurements(|m| {
            let ran = std::mem::take(&mut m.pending);
            for _ in 0..ran {
                m.measure(props.geometry.as_deref());
            }
            ran
        })
    }

    /// A snapshot of the latest measurements.
    pub fn measurements(&self) -> Measurements {
        self.ctx.measurements()
    }

    /// Run every `willUnmount` callback, in reverse initialize order.
    ///
    /// Every callback runs even if an earlier one fails; the first failure
    /// is returned.
    pub fn unmount(mut self) -> Result<(), QuillError> {
        self.teardown()
    }

    fn teardown(&mut self) -> Result<(), QuillError> {
        if !std::mem::replace(&mut self.mounted, false) {
            return Ok(());
        }
        let result = unmount_plugins(&with_host(&self.ctx.props()), &self.ctx.methods());
        self.ctx.release();

        #[cfg(feature = "tracing")]
        tracing::info!("editor unmounted");

        result
    }
}

/// Call `willUnmount` on `plugins` in reverse order. Every callback runs;
/// the first failure is returned.
fn unmount_plugins(plugins: &[Arc<Plugin>], methods: &PluginMethods) -> Result<(), QuillError> {
    let mut first_error = None;
    for plugin in plugins.iter().rev() {
        let Some(will_unmount) = plugin.will_unmount() else {
            continue;
        };
        if let Err(source) = will_unmount(methods) {
            #[cfg(feature = "tracing")]
            tracing::warn!(plugin = plugin.name(), error = %source, "willUnmount failed");
            first_error.get_or_insert(QuillError::Lifecycle {
                phase: LifecyclePhase::WillUnmount,
                plugin: plugin.name().to_owned(),
                source,
            });
        }
    }
    first_error.map_or(Ok(()), Err)
}

impl Drop for Editor {
    fn drop(&mut self) {
        if let Err(_err) = self.teardown() {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "teardown on drop failed");
        }
    }
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("ctx", &self.ctx)
            .field("mounted", &self.mounted)
            .finish()
    }
}

//! Hook composition.
//!
//! [`PluginHooks`] is the dispatch table handed to the editing surface: one
//! [`ComposedHook`] per classified name, rebuilt whenever the plugin list
//! changes. Each composed hook walks the plugin list in order and combines
//! the answers with its category's merge rule.
//!
//! Handler errors are not caught. The first failing plugin aborts the
//! dispatch and the error reaches the caller as [`HookError::Handler`].

use crate::classify::HookClassification;
use indexmap::IndexMap;
use quill_core::{
    BlockRenderer, Capability, ContentBlock, HandleValue, HookArgs, HookCategory, HookError,
    HookValue, KeyEvent, Plugin, PluginMethods, names,
};
use std::sync::Arc;

// ============================================================================
// Composed Hook
// ============================================================================

/// The single merged callback exposed for one hook name.
#[derive(Clone)]
pub struct ComposedHook {
    name: String,
    category: HookCategory,
    plugins: Arc<[Arc<Plugin>]>,
}

impl ComposedHook {
    /// Compose `name` over `plugins` with the given category's merge rule.
    pub fn new(name: impl Into<String>, category: HookCategory, plugins: Arc<[Arc<Plugin>]>) -> Self {
        Self {
            name: name.into(),
            category,
            plugins,
        }
    }

    /// The hook name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The dispatch category.
    pub fn category(&self) -> HookCategory {
        self.category
    }

    /// Invoke the composed hook, returning the merged answer as a value the
    /// surface consumes directly.
    ///
    /// - event hooks answer `Bool`
    /// - handle hooks answer `Str("handled" | "not-handled")`
    /// - `blockRendererFn` answers `Renderer` or `Bool(false)`
    /// - `blockStyleFn` answers `Str` or `Bool(false)`
    /// - other function hooks answer the first plugin's value or `Bool(false)`
    pub fn call(&self, args: &HookArgs, methods: &PluginMethods) -> Result<HookValue, HookError> {
        match self.category {
            HookCategory::Event => self.call_event(args, methods).map(HookValue::Bool),
            HookCategory::Handle => self.call_handle(args, methods).map(HookValue::from),
            HookCategory::Function => match self.name.as_str() {
                names::BLOCK_RENDERER_FN => Ok(self
                    .call_block_renderer(args, methods)?
                    .map_or(HookValue::Bool(false), HookValue::Renderer)),
                names::BLOCK_STYLE_FN => Ok(self
                    .call_block_style(args, methods)?
                    .map_or(HookValue::Bool(false), HookValue::Str)),
                _ => Ok(self
                    .call_first(args, methods)?
                    .unwrap_or(HookValue::Bool(false))),
            },
        }
    }

    /// Stop at the first plugin answering `true`.
    pub fn call_event(&self, args: &HookArgs, methods: &PluginMethods) -> Result<bool, HookError> {
        for plugin in self.plugins.iter() {
            let Some(value) = self.invoke(plugin, args, methods)? else {
                continue;
            };
            if value.is_true() {
                #[cfg(feature = "tracing")]
                tracing::trace!(hook = %self.name, plugin = plugin.name(), "event handled");
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Stop at the first plugin answering `"handled"`.
    pub fn call_handle(
        &self,
        args: &HookArgs,
        methods: &PluginMethods,
    ) -> Result<HandleValue, HookError> {
        for plugin in self.plugins.iter() {
            let Some(value) = self.invoke(plugin, args, methods)? else {
                continue;
            };
            if value.is_handled() {
                #[cfg(feature = "tracing")]
                tracing::trace!(hook = %self.name, plugin = plugin.name(), "command handled");
                return Ok(HandleValue::Handled);
            }
        }
        Ok(HandleValue::NotHandled)
    }

    /// Fold every plugin's descriptor into one.
    ///
    /// Returns the merged descriptor only if some contribution named a
    /// component.
    pub fn call_block_renderer(
        &self,
        args: &HookArgs,
        methods: &PluginMethods,
    ) -> Result<Option<BlockRenderer>, HookError> {
        let mut merged = BlockRenderer::props_only();
        for plugin in self.plugins.iter() {
            match self.invoke(plugin, args, methods)? {
                Some(HookValue::Renderer(contribution)) => merged.merge(contribution),
                Some(HookValue::Json(value)) => match serde_json::from_value(value) {
                    Ok(contribution) => merged.merge(contribution),
                    Err(_err) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(
                            hook = %self.name,
                            plugin = plugin.name(),
                            error = %_err,
                            "ignoring malformed block renderer"
                        );
                    }
                },
                _ => {}
            }
        }
        Ok(merged.component.is_some().then_some(merged))
    }

    /// Join every plugin's class name with a single space.
    pub fn call_block_style(
        &self,
        args: &HookArgs,
        methods: &PluginMethods,
    ) -> Result<Option<String>, HookError> {
        let mut joined = String::new();
        for plugin in self.plugins.iter() {
            let Some(HookValue::Str(class)) = self.invoke(plugin, args, methods)? else {
                continue;
            };
            if !joined.is_empty() {
                joined.push(' ');
            }
            joined.push_str(&class);
        }
        Ok((!joined.is_empty()).then_some(joined))
    }

    /// The first answer that is not [`HookValue::Pass`].
    pub fn call_first(
        &self,
        args: &HookArgs,
        methods: &PluginMethods,
    ) -> Result<Option<HookValue>, HookError> {
        for plugin in self.plugins.iter() {
            match self.invoke(plugin, args, methods)? {
                None | Some(HookValue::Pass) => continue,
                Some(value) => return Ok(Some(value)),
            }
        }
        Ok(None)
    }

    /// Invoke one plugin's implementation. `None` when the plugin does not
    /// implement the hook or the property is not invocable.
    fn invoke(
        &self,
        plugin: &Plugin,
        args: &HookArgs,
        methods: &PluginMethods,
    ) -> Result<Option<HookValue>, HookError> {
        let f = match plugin.capability(&self.name) {
            None => return Ok(None),
            Some(Capability::Callable(f)) => f,
            Some(Capability::Attribute(_)) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(hook = %self.name, plugin = plugin.name(), "skipping non-callable hook");
                return Ok(None);
            }
        };
        f(args, methods)
            .map(Some)
            .map_err(|source| HookError::Handler {
                hook: self.name.clone(),
                plugin: plugin.name().to_owned(),
                source,
            })
    }
}

impl std::fmt::Debug for ComposedHook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposedHook")
            .field("name", &self.name)
            .field("category", &self.category)
            .field("plugins", &self.plugins.len())
            .finish()
    }
}

// ============================================================================
// Dispatch Table
// ============================================================================

/// One composed hook per classified name.
#[derive(Debug, Clone, Default)]
pub struct PluginHooks {
    hooks: IndexMap<String, ComposedHook>,
}

impl PluginHooks {
    /// Classify `plugins` and compose every dispatched name.
    ///
    /// `plugins` is the full dispatch list, host first.
    pub fn build(plugins: Vec<Arc<Plugin>>) -> Self {
        let classification = HookClassification::classify(&plugins);
        Self::from_classification(&classification, plugins.into())
    }

    /// Compose every name of an existing classification over `plugins`.
    pub fn from_classification(
        classification: &HookClassification,
        plugins: Arc<[Arc<Plugin>]>,
    ) -> Self {
        let hooks = classification
            .iter()
            .map(|(name, category)| {
                (
                    name.to_owned(),
                    ComposedHook::new(name, category, plugins.clone()),
                )
            })
            .collect::<IndexMap<_, _>>();

        #[cfg(feature = "tracing")]
        tracing::debug!(hooks = hooks.len(), plugins = plugins.len(), "composed plugin hooks");

        Self { hooks }
    }

    /// The composed hook for `name`.
    pub fn get(&self, name: &str) -> Option<&ComposedHook> {
        self.hooks.get(name)
    }

    /// Whether `name` has a composed hook.
    pub fn contains(&self, name: &str) -> bool {
        self.hooks.contains_key(name)
    }

    /// The category `name` was classified into.
    pub fn category_of(&self, name: &str) -> Option<HookCategory> {
        self.hooks.get(name).map(ComposedHook::category)
    }

    /// Composed hook names, in classification order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.hooks.keys().map(String::as_str)
    }

    /// Iterate composed hooks in classification order.
    pub fn iter(&self) -> impl Iterator<Item = &ComposedHook> {
        self.hooks.values()
    }

    /// Number of composed hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Whether no hook was composed.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Invoke the composed hook `name`.
    pub fn call(
        &self,
        name: &str,
        args: &HookArgs,
        methods: &PluginMethods,
    ) -> Result<HookValue, HookError> {
        self.require(name)?.call(args, methods)
    }

    /// Invoke an event hook. A name nobody implements answers `false`.
    pub fn dispatch_event(
        &self,
        name: &str,
        args: &HookArgs,
        methods: &PluginMethods,
    ) -> Result<bool, HookError> {
        match self.expect(name, HookCategory::Event)? {
            Some(hook) => hook.call_event(args, methods),
            None => Ok(false),
        }
    }

    /// Invoke a handle hook. A name nobody implements answers
    /// [`HandleValue::NotHandled`].
    pub fn dispatch_handle(
        &self,
        name: &str,
        args: &HookArgs,
        methods: &PluginMethods,
    ) -> Result<HandleValue, HookError> {
        match self.expect(name, HookCategory::Handle)? {
            Some(hook) => hook.call_handle(args, methods),
            None => Ok(HandleValue::NotHandled),
        }
    }

    /// Invoke a generic function hook. `None` stands for `false`.
    pub fn call_fn(
        &self,
        name: &str,
        args: &HookArgs,
        methods: &PluginMethods,
    ) -> Result<Option<HookValue>, HookError> {
        match self.expect(name, HookCategory::Function)? {
            Some(hook) => hook.call_first(args, methods),
            None => Ok(None),
        }
    }

    /// Run the composed `blockRendererFn` for `block`.
    pub fn block_renderer(
        &self,
        block: &ContentBlock,
        methods: &PluginMethods,
    ) -> Result<Option<BlockRenderer>, HookError> {
        match self.hooks.get(names::BLOCK_RENDERER_FN) {
            Some(hook) => hook.call_block_renderer(&HookArgs::Block(block.clone()), methods),
            None => Ok(None),
        }
    }

    /// Run the composed `blockStyleFn` for `block`.
    pub fn block_style(
        &self,
        block: &ContentBlock,
        methods: &PluginMethods,
    ) -> Result<Option<String>, HookError> {
        match self.hooks.get(names::BLOCK_STYLE_FN) {
            Some(hook) => hook.call_block_style(&HookArgs::Block(block.clone()), methods),
            None => Ok(None),
        }
    }

    /// Run the composed `keyBindingFn`, returning the bound command.
    pub fn key_binding(
        &self,
        key: &KeyEvent,
        methods: &PluginMethods,
    ) -> Result<Option<String>, HookError> {
        let value = self.call_fn(names::KEY_BINDING_FN, &HookArgs::Key(key.clone()), methods)?;
        Ok(match value {
            Some(HookValue::Str(command)) => Some(command),
            _ => None,
        })
    }

    fn require(&self, name: &str) -> Result<&ComposedHook, HookError> {
        self.hooks
            .get(name)
            .ok_or_else(|| HookError::Missing(name.to_owned()))
    }

    fn expect(&self, name: &str, expected: HookCategory) -> Result<Option<&ComposedHook>, HookError> {
        match self.hooks.get(name) {
            None => Ok(None),
            Some(hook) if hook.category == expected => Ok(Some(hook)),
            Some(hook) => Err(HookError::WrongCategory {
                hook: name.to_owned(),
                actual: hook.category,
                expected,
            }),
        }
    }
}

//! # Plugins
//!
//! A plugin is a sparse bag of optional capabilities. Named hooks are kept
//! in declaration order and classified purely by their names; the special
//! mappings (`decorators`, `customStyleMap`, `blockRenderMap`) and lifecycle
//! callbacks are typed fields.
//!
//! Plugins are immutable once built. The engine reads them and never
//! mutates them.
//!
//! # Example
//!
//! ```rust,ignore
//! let plugin = Plugin::builder("emoji")
//!     .handle_key_command(|command, _methods| {
//!         Ok(if command == "insert-emoji" {
//!             HandleValue::Handled
//!         } else {
//!             HandleValue::NotHandled
//!         })
//!     })
//!     .custom_style("EMOJI", Style::from([("fontSize".into(), "1.2em".into())]))
//!     .build();
//! ```

use crate::{
    context::PluginMethods,
    decorator::Decorator,
    error::BoxError,
    hook::{HandleValue, HookArgs, HookFn, HookValue, names},
    key::KeyEvent,
    render::{AccessibilityProps, BlockRenderConfig, BlockRenderMap, BlockRenderer, CustomStyleMap, Style},
    state::{ContentBlock, EditorState},
};
use indexmap::IndexMap;
use std::{fmt, sync::Arc};

/// `initialize` / `willUnmount` callback.
pub type LifecycleFn = Arc<dyn Fn(&PluginMethods) -> Result<(), BoxError> + Send + Sync>;

/// `onChange` transformer: receives the next state and returns the state to
/// pass on.
pub type ChangeFn =
    Arc<dyn Fn(EditorState, &PluginMethods) -> Result<EditorState, BoxError> + Send + Sync>;

/// `getAccessibilityProps` provider.
pub type AccessibilityFn = Arc<dyn Fn() -> AccessibilityProps + Send + Sync>;

/// A named property on a plugin.
#[derive(Clone)]
pub enum Capability {
    /// An invocable hook.
    Callable(HookFn),
    /// A non-invocable value. Classified like any other name but skipped
    /// when the hook is dispatched.
    Attribute(serde_json::Value),
}

impl Capability {
    /// The hook function, if this property is invocable.
    pub fn as_callable(&self) -> Option<&HookFn> {
        match self {
            Capability::Callable(f) => Some(f),
            Capability::Attribute(_) => None,
        }
    }
}

impl fmt::Debug for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Capability::Callable(_) => f.write_str("Callable(..)"),
            Capability::Attribute(v) => f.debug_tuple("Attribute").field(v).finish(),
        }
    }
}

/// An optional-capability bundle.
#[derive(Clone, Default)]
pub struct Plugin {
    name: String,
    hooks: IndexMap<String, Capability>,
    decorators: Option<Vec<Decorator>>,
    custom_style_map: Option<CustomStyleMap>,
    block_render_map: Option<BlockRenderMap>,
    on_change: Option<ChangeFn>,
    initialize: Option<LifecycleFn>,
    will_unmount: Option<LifecycleFn>,
    accessibility_props: Option<AccessibilityFn>,
}

impl Plugin {
    /// Start building a plugin.
    pub fn builder(name: impl Into<String>) -> PluginBuilder {
        PluginBuilder::new(name)
    }

    /// Name used in logs and errors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every property this plugin sets, in declaration order.
    ///
    /// Named hooks come first, followed by the special properties.
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        let special = [
            (names::DECORATORS, self.decorators.is_some()),
            (names::CUSTOM_STYLE_MAP, self.custom_style_map.is_some()),
            (names::BLOCK_RENDER_MAP, self.block_render_map.is_some()),
            (names::ON_CHANGE, self.on_change.is_some()),
            (names::INITIALIZE, self.initialize.is_some()),
            (names::WILL_UNMOUNT, self.will_unmount.is_some()),
            (names::GET_ACCESSIBILITY_PROPS, self.accessibility_props.is_some()),
        ];
        self.hooks.keys().map(String::as_str).chain(
            special
                .into_iter()
                .filter_map(|(name, present)| present.then_some(name)),
        )
    }

    /// The named property, invocable or not.
    pub fn capability(&self, name: &str) -> Option<&Capability> {
        self.hooks.get(name)
    }

    /// The named hook, if present and invocable.
    pub fn hook(&self, name: &str) -> Option<&HookFn> {
        self.hooks.get(name).and_then(Capability::as_callable)
    }

    /// The named non-invocable property.
    pub fn attribute(&self, name: &str) -> Option<&serde_json::Value> {
        match self.hooks.get(name)? {
            Capability::Attribute(value) => Some(value),
            Capability::Callable(_) => None,
        }
    }

    /// Contributed decorator descriptors.
    pub fn decorators(&self) -> Option<&[Decorator]> {
        self.decorators.as_deref()
    }

    /// Contributed inline style map.
    pub fn custom_style_map(&self) -> Option<&CustomStyleMap> {
        self.custom_style_map.as_ref()
    }

    /// Contributed block render map.
    pub fn block_render_map(&self) -> Option<&BlockRenderMap> {
        self.block_render_map.as_ref()
    }

    /// The `onChange` transformer.
    pub fn on_change(&self) -> Option<&ChangeFn> {
        self.on_change.as_ref()
    }

    /// The `initialize` callback.
    pub fn initializer(&self) -> Option<&LifecycleFn> {
        self.initialize.as_ref()
    }

    /// The `willUnmount` callback.
    pub fn will_unmount(&self) -> Option<&LifecycleFn> {
        self.will_unmount.as_ref()
    }

    /// Accessibility attributes this plugin currently requests.
    pub fn accessibility_props(&self) -> Option<AccessibilityProps> {
        self.accessibility_props.as_ref().map(|f| f())
    }
}

impl fmt::Debug for Plugin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Plugin")
            .field("name", &self.name)
            .field("properties", &self.property_names().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`Plugin`].
///
/// Registering the same hook name twice replaces the earlier entry.
pub struct PluginBuilder {
    plugin: Plugin,
}

impl PluginBuilder {
    /// Create a new empty builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            plugin: Plugin {
                name: name.into(),
                ..Plugin::default()
            },
        }
    }

    /// Register a hook under `name`. The name decides its dispatch category.
    pub fn hook<F>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&HookArgs, &PluginMethods) -> Result<HookValue, BoxError> + Send + Sync + 'static,
    {
        self.plugin
            .hooks
            .insert(name.into(), Capability::Callable(Arc::new(f)));
        self
    }

    /// Register a non-invocable property under `name`.
    pub fn attribute(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.plugin
            .hooks
            .insert(name.into(), Capability::Attribute(value.into()));
        self
    }

    /// Register an event hook answering with a boolean.
    pub fn event<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&HookArgs, &PluginMethods) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        self.hook(name, move |args, methods| f(args, methods).map(HookValue::Bool))
    }

    /// Register a handle hook answering with a [`HandleValue`].
    pub fn handle<F>(self, name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&HookArgs, &PluginMethods) -> Result<HandleValue, BoxError> + Send + Sync + 'static,
    {
        self.hook(name, move |args, methods| f(args, methods).map(HookValue::from))
    }

    /// Register `handleKeyCommand`.
    pub fn handle_key_command<F>(self, f: F) -> Self
    where
        F: Fn(&str, &PluginMethods) -> Result<HandleValue, BoxError> + Send + Sync + 'static,
    {
        self.hook(names::HANDLE_KEY_COMMAND, move |args, methods| match args.command() {
            Some(command) => f(command, methods).map(HookValue::from),
            None => Ok(HookValue::Pass),
        })
    }

    /// Register `keyBindingFn`. `None` passes to the next plugin.
    pub fn key_binding_fn<F>(self, f: F) -> Self
    where
        F: Fn(&KeyEvent, &PluginMethods) -> Option<String> + Send + Sync + 'static,
    {
        self.hook(names::KEY_BINDING_FN, move |args, methods| {
            Ok(args
                .key()
                .and_then(|key| f(key, methods))
                .map_or(HookValue::Pass, HookValue::Str))
        })
    }

    /// Register `blockRendererFn`. `None` contributes nothing.
    pub fn block_renderer_fn<F>(self, f: F) -> Self
    where
        F: Fn(&ContentBlock, &PluginMethods) -> Option<BlockRenderer> + Send + Sync + 'static,
    {
        self.hook(names::BLOCK_RENDERER_FN, move |args, methods| {
            Ok(args
                .block()
                .and_then(|block| f(block, methods))
                .map_or(HookValue::Pass, HookValue::Renderer))
        })
    }

    /// Register `blockStyleFn`. `None` contributes nothing.
    pub fn block_style_fn<F>(self, f: F) -> Self
    where
        F: Fn(&ContentBlock, &PluginMethods) -> Option<String> + Send + Sync + 'static,
    {
        self.hook(names::BLOCK_STYLE_FN, move |args, methods| {
            Ok(args
                .block()
                .and_then(|block| f(block, methods))
                .map_or(HookValue::Pass, HookValue::Str))
        })
    }

    /// Contribute a decorator descriptor.
    pub fn decorator(mut self, decorator: impl Into<Decorator>) -> Self {
        self.plugin
            .decorators
            .get_or_insert_with(Vec::new)
            .push(decorator.into());
        self
    }

    /// Contribute one inline style.
    pub fn custom_style(mut self, name: impl Into<String>, style: Style) -> Self {
        self.plugin
            .custom_style_map
            .get_or_insert_with(CustomStyleMap::new)
            .insert(name.into(), style);
        self
    }

    /// Contribute a whole inline style map, merged over earlier entries.
    pub fn custom_style_map(mut self, map: CustomStyleMap) -> Self {
        self.plugin
            .custom_style_map
            .get_or_insert_with(CustomStyleMap::new)
            .extend(map);
        self
    }

    /// Contribute the render configuration for one block type.
    pub fn block_render(mut self, block_type: impl Into<String>, config: BlockRenderConfig) -> Self {
        self.plugin
            .block_render_map
            .get_or_insert_with(BlockRenderMap::new)
            .insert(block_type.into(), config);
        self
    }

    /// Contribute a whole block render map, merged over earlier entries.
    pub fn block_render_map(mut self, map: BlockRenderMap) -> Self {
        self.plugin
            .block_render_map
            .get_or_insert_with(BlockRenderMap::new)
            .extend(map);
        self
    }

    /// Set the `onChange` transformer.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(EditorState, &PluginMethods) -> Result<EditorState, BoxError> + Send + Sync + 'static,
    {
        self.plugin.on_change = Some(Arc::new(f));
        self
    }

    /// Set the `initialize` callback.
    pub fn initialize<F>(mut self, f: F) -> Self
    where
        F: Fn(&PluginMethods) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.plugin.initialize = Some(Arc::new(f));
        self
    }

    /// Set the `willUnmount` callback.
    pub fn will_unmount<F>(mut self, f: F) -> Self
    where
        F: Fn(&PluginMethods) -> Result<(), BoxError> + Send + Sync + 'static,
    {
        self.plugin.will_unmount = Some(Arc::new(f));
        self
    }

    /// Set the `getAccessibilityProps` provider.
    pub fn accessibility_props<F>(mut self, f: F) -> Self
    where
        F: Fn() -> AccessibilityProps + Send + Sync + 'static,
    {
        self.plugin.accessibility_props = Some(Arc::new(f));
        self
    }

    /// Build the plugin.
    pub fn build(self) -> Plugin {
        self.plugin
    }
}

impl From<Plugin> for PluginBuilder {
    fn from(plugin: Plugin) -> Self {
        Self { plugin }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_names_in_declaration_order() {
        let plugin = Plugin::builder("p")
            .hook("onTab", |_, _| Ok(HookValue::Pass))
            .attribute("handleReturn", "not callable")
            .custom_style("BOLD", Style::new())
            .on_change(|state, _| Ok(state))
            .build();

        let names: Vec<_> = plugin.property_names().collect();
        assert_eq!(names, vec!["onTab", "handleReturn", "customStyleMap", "onChange"]);
    }

    #[test]
    fn test_attribute_is_not_callable() {
        let plugin = Plugin::builder("p").attribute("onTab", true).build();
        assert!(plugin.capability("onTab").is_some());
        assert!(plugin.hook("onTab").is_none());
        assert_eq!(plugin.attribute("onTab"), Some(&serde_json::Value::Bool(true)));
    }

    #[test]
    fn test_reregistering_a_name_replaces_it() {
        let plugin = Plugin::builder("p")
            .attribute("onTab", 1)
            .hook("onTab", |_, _| Ok(HookValue::Bool(true)))
            .build();
        assert!(plugin.hook("onTab").is_some());
        assert_eq!(plugin.property_names().count(), 1);
    }
}

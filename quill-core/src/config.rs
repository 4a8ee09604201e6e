//! # Host Configuration
//!
//! [`EditorProps`] is the configuration surface the host application hands
//! to the state controller. The host's own hooks, decorators and maps live
//! on [`EditorProps::host`], a plugin like any other, so every composition
//! algorithm treats the host uniformly.
//!
//! [`EditorConfig`] is the serializable subset, loadable from JSON.

use crate::{
    context::PluginMethods,
    error::ConfigError,
    plugin::{Plugin, PluginBuilder},
    render::{BlockRenderMap, CustomStyleMap},
    state::EditorState,
    surface::GeometryProvider,
};
use serde::{Deserialize, Serialize};
use std::{fmt, io::Read, sync::Arc};

/// Name of the implicit host plugin.
pub const HOST_PLUGIN_NAME: &str = "host";

/// Host notification with the fully plugin-processed next state.
pub type ChangeCallback = Arc<dyn Fn(&EditorState, &PluginMethods) + Send + Sync>;

/// The host configuration surface.
#[derive(Clone)]
pub struct EditorProps {
    /// The host treated as a plugin.
    pub host: Arc<Plugin>,
    /// Explicit plugins, in priority order.
    pub plugins: Vec<Arc<Plugin>>,
    /// Append the built-in default key-binding plugin.
    pub default_key_bindings: bool,
    /// Use the default block render map as the lowest-priority layer.
    pub default_block_render_map: bool,
    /// Render read-only.
    pub read_only: bool,
    /// Host notification after each commit.
    pub on_change: Option<ChangeCallback>,
    /// The initial editing state.
    pub editor_state: EditorState,
    /// Geometry lookups for toolbar placement.
    pub geometry: Option<Arc<dyn GeometryProvider>>,
}

impl EditorProps {
    /// Default configuration: no plugins, default key bindings and default
    /// block render map on, editable.
    pub fn new() -> Self {
        Self {
            host: Arc::new(Plugin::builder(HOST_PLUGIN_NAME).build()),
            plugins: Vec::new(),
            default_key_bindings: true,
            default_block_render_map: true,
            read_only: false,
            on_change: None,
            editor_state: EditorState::create_empty(),
            geometry: None,
        }
    }

    /// Defaults overridden by a loaded [`EditorConfig`].
    pub fn from_config(config: EditorConfig) -> Self {
        Self::new().apply_config(config)
    }

    /// Apply toggles from `config` and fold its maps into the host plugin.
    pub fn apply_config(mut self, config: EditorConfig) -> Self {
        self.default_key_bindings = config.default_key_bindings;
        self.default_block_render_map = config.default_block_render_map;
        self.read_only = config.read_only;
        if !config.custom_style_map.is_empty() || !config.block_render_map.is_empty() {
            let host = PluginBuilder::from((*self.host).clone())
                .custom_style_map(config.custom_style_map)
                .block_render_map(config.block_render_map)
                .build();
            self.host = Arc::new(host);
        }
        self
    }

    /// Replace the host plugin.
    pub fn with_host(mut self, host: impl Into<Arc<Plugin>>) -> Self {
        self.host = host.into();
        self
    }

    /// Append one plugin.
    pub fn with_plugin(mut self, plugin: impl Into<Arc<Plugin>>) -> Self {
        self.plugins.push(plugin.into());
        self
    }

    /// Append several plugins.
    pub fn with_plugins<I, P>(mut self, plugins: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Arc<Plugin>>,
    {
        self.plugins.extend(plugins.into_iter().map(Into::into));
        self
    }

    /// Toggle the default key-binding plugin.
    pub fn default_key_bindings(mut self, enabled: bool) -> Self {
        self.default_key_bindings = enabled;
        self
    }

    /// Toggle the default block render map.
    pub fn default_block_render_map(mut self, enabled: bool) -> Self {
        self.default_block_render_map = enabled;
        self
    }

    /// Set the read-only flag.
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Set the host change notification.
    pub fn on_change<F>(mut self, f: F) -> Self
    where
        F: Fn(&EditorState, &PluginMethods) + Send + Sync + 'static,
    {
        self.on_change = Some(Arc::new(f));
        self
    }

    /// Set the initial editing state.
    pub fn editor_state(mut self, state: EditorState) -> Self {
        self.editor_state = state;
        self
    }

    /// Set the geometry provider.
    pub fn geometry(mut self, geometry: Arc<dyn GeometryProvider>) -> Self {
        self.geometry = Some(geometry);
        self
    }
}

impl Default for EditorProps {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EditorProps {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorProps")
            .field("host", &self.host)
            .field("plugins", &self.plugins)
            .field("default_key_bindings", &self.default_key_bindings)
            .field("default_block_render_map", &self.default_block_render_map)
            .field("read_only", &self.read_only)
            .field("editor_state", &self.editor_state)
            .finish_non_exhaustive()
    }
}

/// Serializable host configuration.
///
/// ```json
/// {
///   "defaultKeyBindings": true,
///   "readOnly": false,
///   "customStyleMap": { "HIGHLIGHT": { "background": "yellow" } },
///   "blockRenderMap": { "callout": { "element": "aside" } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct EditorConfig {
    /// Append the built-in default key-binding plugin.
    pub default_key_bindings: bool,
    /// Use the default block render map as the lowest-priority layer.
    pub default_block_render_map: bool,
    /// Render read-only.
    pub read_only: bool,
    /// Host inline style map (wins every collision).
    pub custom_style_map: CustomStyleMap,
    /// Host block render map (wins every collision).
    pub block_render_map: BlockRenderMap,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_key_bindings: true,
            default_block_render_map: true,
            read_only: false,
            custom_style_map: CustomStyleMap::new(),
            block_render_map: BlockRenderMap::new(),
        }
    }
}

impl EditorConfig {
    /// Parse a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON document.
    pub fn from_json_reader<R: Read>(mut reader: R) -> Result<Self, ConfigError> {
        let mut json = String::new();
        reader.read_to_string(&mut json)?;
        Self::from_json_str(&json)
    }
}

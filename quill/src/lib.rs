//! # quill - Plugin Composition for Rich-Text Editors
//!
//! `quill` lets an ordered set of independently written plugins cooperate on
//! a single editing state without knowing about each other. Overlapping
//! capabilities are composed by naming convention:
//!
//! - `on*` hooks stop at the first plugin answering `true`
//! - `handle*` hooks stop at the first plugin answering `"handled"`
//! - `*Fn` hooks take the first answer, except `blockRendererFn` (props
//!   merged across plugins) and `blockStyleFn` (class names joined)
//!
//! Decorators, style maps, block render maps and accessibility attributes
//! have their own merge rules; see [`resolve`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use quill::prelude::*;
//!
//! let emoji = Plugin::builder("emoji")
//!     .handle_key_command(|command, _| {
//!         Ok(if command == "insert-emoji" {
//!             HandleValue::Handled
//!         } else {
//!             HandleValue::NotHandled
//!         })
//!     })
//!     .build();
//!
//! let editor = Editor::new(EditorProps::new().with_plugin(emoji))?;
//! let pass = editor.render();
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod editor;

pub use editor::{
    Editor, EditorContext, InlineToolbar, Measurements, RenderPass, SIDE_TOOLBAR_HEIGHT,
    SideToolbar,
};

// Hooks and plugins
pub use quill_core::{
    Capability, HandleValue, HookArgs, HookCategory, HookFn, HookValue, KeyEvent, KeyModifiers,
    Plugin, PluginBuilder, PluginContext, PluginMethods, names,
};

// Configuration
pub use quill_core::{ChangeCallback, EditorConfig, EditorProps, HOST_PLUGIN_NAME};

// Editing state and collaborators
pub use quill_core::{
    BlockElement, ChangeType, ContentBlock, ContentState, Coords, EditorState, EditorSurface,
    EntityRange, GeometryProvider, Rect, SelectionRange, SelectionState,
};

// Decorations and render types
pub use quill_core::{
    AccessibilityProps, BlockRenderConfig, BlockRenderMap, BlockRenderer, Component,
    CustomStyleMap, DecorationProvider, Decorator, PatternDecorator, Props, Style,
};

// Errors
pub use quill_core::{BoxError, ConfigError, HookError, LifecyclePhase, QuillError};

// Engine
pub use quill_std::{
    classify::HookClassification,
    compose::{ComposedHook, PluginHooks},
};

/// Decorator composition and pattern strategies.
pub mod decorators {
    pub use quill_std::decorators::{
        CompositeDecorator, MultiDecorator, build_decoration_provider, entity_strategy,
        regex_decorator, regex_strategy,
    };
}

/// Auxiliary resolvers and plugin list resolution.
pub mod resolve {
    pub use quill_std::registry::{resolve_decorators, resolve_plugins, with_host};
    pub use quill_std::resolve::{
        default_block_render_map, resolve_accessibility_props, resolve_block_render_map,
        resolve_custom_style_map,
    };
}

/// Built-in plugins.
pub mod plugins {
    pub use quill_std::key_bindings::{
        DEFAULT_KEY_BINDING_PLUGIN, default_key_binding, default_key_binding_plugin,
    };
    pub use quill_std::presets::{
        IMAGE_COMPONENT, PARAGRAPH_CLASS, image_block_plugin, paragraph_style_plugin,
    };
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use quill_std::testing::*;
}

/// Prelude module - common imports for Quill.
///
/// # Usage
///
/// ```rust,ignore
/// use quill::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        BlockRenderer,
        BoxError,
        ContentBlock,
        Decorator,
        Editor,
        EditorProps,
        EditorState,
        HandleValue,
        HookArgs,
        HookValue,
        KeyEvent,
        Plugin,
        PluginMethods,
        QuillError,
        RenderPass,
        Style,
    };
}

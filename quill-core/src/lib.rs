//! # quill-core
//!
//! Core types for the Quill plugin composition engine.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! plugins that only need to describe their capabilities, without pulling
//! in the composition engine in `quill-std`.
//!
//! # Vocabulary
//!
//! ## Plugins ([`Plugin`])
//!
//! A sparse bag of optional callbacks, mappings and metadata. Plugins never
//! know about each other; the engine composes their overlapping capabilities.
//!
//! ## Hooks ([`HookCategory`], [`HookArgs`], [`HookValue`])
//!
//! Named extension points. A hook's name decides how the implementations of
//! every plugin are composed into the single callback the editing surface
//! calls.
//!
//! ## Editing state ([`EditorState`])
//!
//! The immutable document/selection snapshot every plugin observes and may
//! replace wholesale through [`PluginMethods::set_editor_state`].
//!
//! ## Decorations ([`DecorationProvider`], [`Decorator`])
//!
//! Range-based inline annotations contributed by plugins and composed into
//! one provider.
//!
//! # Error Types
//!
//! - [`QuillError`] - Top-level error type
//! - [`HookError`] - Hook dispatch errors
//! - [`ConfigError`] - Configuration loading errors

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod config;
mod context;
mod decorator;
mod error;
mod hook;
mod key;
mod plugin;
mod render;
mod state;
mod surface;

// Re-exports
pub use config::{ChangeCallback, EditorConfig, EditorProps, HOST_PLUGIN_NAME};
pub use context::{PluginContext, PluginMethods};
pub use decorator::{DecorationProvider, Decorator, PatternDecorator, StrategyFn};
pub use error::{BoxError, ConfigError, HookError, LifecyclePhase, QuillError};
pub use hook::{HandleValue, HookArgs, HookCategory, HookFn, HookValue, names};
pub use key::{KeyEvent, KeyModifiers};
pub use plugin::{AccessibilityFn, Capability, ChangeFn, LifecycleFn, Plugin, PluginBuilder};
pub use render::{
    AccessibilityProps, BlockRenderConfig, BlockRenderMap, BlockRenderer, Component,
    CustomStyleMap, Props, Style,
};
pub use state::{
    ChangeType, ContentBlock, ContentState, EditorState, EntityRange, SelectionState, gen_key,
};
pub use surface::{BlockElement, Coords, EditorSurface, GeometryProvider, Rect, SelectionRange};

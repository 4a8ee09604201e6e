//! # quill-std
//!
//! The composition engine for the Quill plugin framework.
//!
//! This crate provides:
//! - **Hook classification**: [`classify::HookClassification`]
//! - **Hook composition**: [`compose::PluginHooks`], [`compose::ComposedHook`]
//! - **Decorator composition**: [`decorators::build_decoration_provider`]
//! - **Auxiliary resolvers**: style map, block render map, accessibility props
//! - **Plugin registry**: [`registry::resolve_plugins`], [`registry::with_host`]
//! - **Built-in plugins**: default key bindings and presets

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core types
pub use quill_core;

// Modules
pub mod classify;
pub mod compose;
pub mod decorators;
pub mod key_bindings;
pub mod presets;
pub mod registry;
pub mod resolve;
pub mod testing;

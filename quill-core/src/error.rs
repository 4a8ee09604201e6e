//! Error types for Quill.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`QuillError`] - Top-level error type for all Quill operations
//! - [`HookError`] - Errors raised while dispatching a composed hook
//! - [`ConfigError`] - Errors loading host configuration

use crate::hook::HookCategory;
use std::fmt;
use thiserror::Error;

/// A boxed error type for dynamic error handling.
///
/// Plugin callbacks return this so that any error type can cross the
/// plugin boundary.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Quill operations.
#[derive(Error, Debug)]
pub enum QuillError {
    /// A composed hook failed.
    #[error("hook error: {0}")]
    Hook(#[from] HookError),

    /// Host configuration could not be loaded.
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// A lifecycle callback or `onChange` transformer failed.
    #[error("{phase} failed in plugin `{plugin}`")]
    Lifecycle {
        /// The phase that was running.
        phase: LifecyclePhase,
        /// Name of the plugin whose callback failed.
        plugin: String,
        /// The error returned by the callback.
        #[source]
        source: BoxError,
    },

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// The plugin callback phases that run outside the hook dispatch table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// `initialize`, run once at construction.
    Initialize,
    /// `onChange`, run on every state commit.
    OnChange,
    /// `willUnmount`, run once at teardown.
    WillUnmount,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            LifecyclePhase::Initialize => "initialize",
            LifecyclePhase::OnChange => "onChange",
            LifecyclePhase::WillUnmount => "willUnmount",
        })
    }
}

/// Errors that can occur while dispatching a composed hook.
#[derive(Error, Debug)]
pub enum HookError {
    /// A plugin's handler returned an error. Dispatch stops at the failing plugin.
    #[error("`{hook}` failed in plugin `{plugin}`")]
    Handler {
        /// The hook name being dispatched.
        hook: String,
        /// Name of the plugin whose handler failed.
        plugin: String,
        /// The error returned by the handler.
        #[source]
        source: BoxError,
    },

    /// No plugin defines a hook with this name.
    #[error("no composed hook named `{0}`")]
    Missing(String),

    /// The hook exists but belongs to a different dispatch category.
    #[error("`{hook}` is a {actual} hook, not a {expected} hook")]
    WrongCategory {
        /// The hook name.
        hook: String,
        /// The category the name was classified into.
        actual: HookCategory,
        /// The category the caller asked for.
        expected: HookCategory,
    },
}

/// Errors that can occur while loading host configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration document is not valid JSON for [`EditorConfig`].
    ///
    /// [`EditorConfig`]: crate::EditorConfig
    #[error("invalid editor config: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration source could not be read.
    #[error("failed to read editor config: {0}")]
    Io(#[from] std::io::Error),
}

// Convenience conversions
impl From<BoxError> for QuillError {
    fn from(err: BoxError) -> Self {
        QuillError::Custom(err)
    }
}

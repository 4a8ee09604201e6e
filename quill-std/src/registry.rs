//! Plugin list resolution.
//!
//! Every list is re-derived from the current [`EditorProps`] on each call,
//! so a changed plugin list takes effect on the next dispatch or render.

use crate::key_bindings::default_key_binding_plugin;
use quill_core::{Decorator, EditorProps, Plugin};
use std::sync::Arc;

/// The explicit plugins, followed by the default key-binding plugin when
/// enabled.
pub fn resolve_plugins(props: &EditorProps) -> Vec<Arc<Plugin>> {
    let mut plugins = props.plugins.clone();
    if props.default_key_bindings {
        plugins.push(default_key_binding_plugin());
    }
    plugins
}

/// The uniform dispatch list: the host first, then [`resolve_plugins`].
pub fn with_host(props: &EditorProps) -> Vec<Arc<Plugin>> {
    let mut plugins = Vec::with_capacity(props.plugins.len() + 2);
    plugins.push(props.host.clone());
    plugins.extend(resolve_plugins(props));
    plugins
}

/// The host's decorators followed by every explicit plugin's, each in its
/// own declaration order.
pub fn resolve_decorators(props: &EditorProps) -> Vec<Decorator> {
    std::iter::once(&props.host)
        .chain(props.plugins.iter())
        .filter_map(|plugin| plugin.decorators())
        .flat_map(|decorators| decorators.iter().cloned())
        .collect()
}

//! Built-in default key bindings.
//!
//! Appended as the lowest-priority plugin when
//! [`EditorProps::default_key_bindings`](quill_core::EditorProps) is set, so
//! any explicit plugin's `keyBindingFn` is consulted first.

use quill_core::{KeyEvent, Plugin};
use std::sync::{Arc, LazyLock};

/// Name of the default key-binding plugin.
pub const DEFAULT_KEY_BINDING_PLUGIN: &str = "default-key-bindings";

static DEFAULT_PLUGIN: LazyLock<Arc<Plugin>> = LazyLock::new(|| {
    Arc::new(
        Plugin::builder(DEFAULT_KEY_BINDING_PLUGIN)
            .key_binding_fn(|key, _| default_key_binding(key).map(str::to_owned))
            .build(),
    )
});

/// The editor command bound to `key` by default.
pub fn default_key_binding(key: &KeyEvent) -> Option<&'static str> {
    let command = key.has_command_modifier();
    match key.key.as_str() {
        "Enter" => Some("split-block"),
        "Backspace" if key.is_option_key() => Some("backspace-word"),
        "Backspace" if command => Some("backspace-to-start-of-line"),
        "Backspace" => Some("backspace"),
        "Delete" if key.is_option_key() => Some("delete-word"),
        "Delete" if command => Some("delete-to-end-of-block"),
        "Delete" => Some("delete"),
        _ if !command => None,
        k if k.eq_ignore_ascii_case("b") => Some("bold"),
        k if k.eq_ignore_ascii_case("i") => Some("italic"),
        k if k.eq_ignore_ascii_case("u") => Some("underline"),
        k if k.eq_ignore_ascii_case("j") => Some("code"),
        k if k.eq_ignore_ascii_case("z") && key.is_shift() => Some("redo"),
        k if k.eq_ignore_ascii_case("z") => Some("undo"),
        k if k.eq_ignore_ascii_case("y") => Some("redo"),
        _ => None,
    }
}

/// The shared default key-binding plugin.
pub fn default_key_binding_plugin() -> Arc<Plugin> {
    DEFAULT_PLUGIN.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::KeyModifiers;

    #[test]
    fn test_command_chords() {
        assert_eq!(default_key_binding(&KeyEvent::ctrl("b")), Some("bold"));
        assert_eq!(default_key_binding(&KeyEvent::meta("I")), Some("italic"));
        assert_eq!(default_key_binding(&KeyEvent::ctrl("u")), Some("underline"));
        assert_eq!(default_key_binding(&KeyEvent::ctrl("j")), Some("code"));
        assert_eq!(default_key_binding(&KeyEvent::ctrl("z")), Some("undo"));
        assert_eq!(
            default_key_binding(
                &KeyEvent::new("z").with_modifiers(KeyModifiers::META | KeyModifiers::SHIFT)
            ),
            Some("redo")
        );
        assert_eq!(default_key_binding(&KeyEvent::ctrl("y")), Some("redo"));
    }

    #[test]
    fn test_plain_letters_are_unbound() {
        assert_eq!(default_key_binding(&KeyEvent::new("b")), None);
        assert_eq!(default_key_binding(&KeyEvent::ctrl("q")), None);
    }

    #[test]
    fn test_deletion_variants() {
        assert_eq!(default_key_binding(&KeyEvent::new("Backspace")), Some("backspace"));
        assert_eq!(
            default_key_binding(&KeyEvent::new("Backspace").with_modifiers(KeyModifiers::ALT)),
            Some("backspace-word")
        );
        assert_eq!(
            default_key_binding(&KeyEvent::meta("Backspace")),
            Some("backspace-to-start-of-line")
        );
        assert_eq!(default_key_binding(&KeyEvent::new("Delete")), Some("delete"));
        assert_eq!(
            default_key_binding(&KeyEvent::ctrl("Delete")),
            Some("delete-to-end-of-block")
        );
        assert_eq!(default_key_binding(&KeyEvent::new("Enter")), Some("split-block"));
    }

    #[test]
    fn test_plugin_is_shared() {
        let a = default_key_binding_plugin();
        let b = default_key_binding_plugin();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(a.hook("keyBindingFn").is_some());
    }
}

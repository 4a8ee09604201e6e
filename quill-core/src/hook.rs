//! # Hooks
//!
//! A hook is a named extension point that any number of plugins may
//! implement. The name alone decides how the implementations are composed:
//!
//! | Name shape | Category | Composition |
//! |:-----------|:---------|:------------|
//! | `on*` | [`HookCategory::Event`] | stop at the first `true` |
//! | `handle*` | [`HookCategory::Handle`] | stop at the first `"handled"` |
//! | `*Fn` | [`HookCategory::Function`] | first answer wins, with merge rules for `blockRendererFn` and `blockStyleFn` |
//!
//! `onChange` is excluded; the state controller runs it as a state
//! transformer pipeline instead.

use crate::{
    context::PluginMethods,
    error::BoxError,
    key::KeyEvent,
    render::BlockRenderer,
    state::ContentBlock,
};
use std::{fmt, sync::Arc};

/// Well-known property names.
pub mod names {
    /// State transformer run on every commit; never dispatched as an event hook.
    pub const ON_CHANGE: &str = "onChange";
    /// Custom block renderer lookup.
    pub const BLOCK_RENDERER_FN: &str = "blockRendererFn";
    /// Block class-name lookup.
    pub const BLOCK_STYLE_FN: &str = "blockStyleFn";
    /// Key press → editor command.
    pub const KEY_BINDING_FN: &str = "keyBindingFn";
    /// Editor command handling.
    pub const HANDLE_KEY_COMMAND: &str = "handleKeyCommand";
    /// Decorator descriptors.
    pub const DECORATORS: &str = "decorators";
    /// Inline style map.
    pub const CUSTOM_STYLE_MAP: &str = "customStyleMap";
    /// Block render map.
    pub const BLOCK_RENDER_MAP: &str = "blockRenderMap";
    /// Construction callback.
    pub const INITIALIZE: &str = "initialize";
    /// Teardown callback.
    pub const WILL_UNMOUNT: &str = "willUnmount";
    /// Accessibility attribute provider.
    pub const GET_ACCESSIBILITY_PROPS: &str = "getAccessibilityProps";
}

/// A plugin's implementation of one hook.
///
/// The second argument is the plugin-methods handle appended to every hook
/// invocation.
pub type HookFn =
    Arc<dyn Fn(&HookArgs, &PluginMethods) -> Result<HookValue, BoxError> + Send + Sync>;

/// The dispatch category of a hook name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookCategory {
    /// `on*`: short-circuits on `true`.
    Event,
    /// `handle*`: short-circuits on `"handled"`.
    Handle,
    /// `*Fn`: first answer wins (with merge rules for block hooks).
    Function,
}

impl HookCategory {
    /// Prefix of event hook names.
    pub const EVENT_PREFIX: &'static str = "on";
    /// Prefix of handle hook names.
    pub const HANDLE_PREFIX: &'static str = "handle";
    /// Suffix of function hook names.
    pub const FUNCTION_SUFFIX: &'static str = "Fn";

    /// Classify a property name by naming convention.
    ///
    /// Pure and total: the same name always yields the same answer, and
    /// `None` means the name is not dispatched.
    pub fn classify(name: &str) -> Option<Self> {
        if name == names::ON_CHANGE {
            None
        } else if name.starts_with(Self::EVENT_PREFIX) {
            Some(HookCategory::Event)
        } else if name.starts_with(Self::HANDLE_PREFIX) {
            Some(HookCategory::Handle)
        } else if name.ends_with(Self::FUNCTION_SUFFIX) {
            Some(HookCategory::Function)
        } else {
            None
        }
    }

    /// Lower-case category name.
    pub const fn as_str(self) -> &'static str {
        match self {
            HookCategory::Event => "event",
            HookCategory::Handle => "handle",
            HookCategory::Function => "function",
        }
    }
}

impl fmt::Display for HookCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Arguments the editing surface passes to a hook.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HookArgs {
    /// No payload (focus, blur, ...).
    #[default]
    None,
    /// A key press (`keyBindingFn`, `onTab`, `onUpArrow`, ...).
    Key(KeyEvent),
    /// An editor command (`handleKeyCommand`).
    Command(String),
    /// A block (`blockRendererFn`, `blockStyleFn`).
    Block(ContentBlock),
    /// Typed text (`handleBeforeInput`).
    Text(String),
    /// Pasted content (`handlePastedText`).
    Paste {
        /// Plain-text flavour.
        text: String,
        /// HTML flavour, when the clipboard carried one.
        html: Option<String>,
    },
    /// Dropped or pasted files (`handleDroppedFiles`, `handlePastedFiles`).
    Files(Vec<String>),
    /// Anything else.
    Custom(serde_json::Value),
}

impl HookArgs {
    /// The key press, if this call carries one.
    pub fn key(&self) -> Option<&KeyEvent> {
        match self {
            HookArgs::Key(key) => Some(key),
            _ => None,
        }
    }

    /// The command, if this call carries one.
    pub fn command(&self) -> Option<&str> {
        match self {
            HookArgs::Command(command) => Some(command),
            _ => None,
        }
    }

    /// The block, if this call carries one.
    pub fn block(&self) -> Option<&ContentBlock> {
        match self {
            HookArgs::Block(block) => Some(block),
            _ => None,
        }
    }

    /// The text, if this call carries typed or pasted text.
    pub fn text(&self) -> Option<&str> {
        match self {
            HookArgs::Text(text) | HookArgs::Paste { text, .. } => Some(text),
            _ => None,
        }
    }
}

/// What a single plugin answered.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HookValue {
    /// No answer; composition moves on to the next plugin.
    #[default]
    Pass,
    /// An explicit empty answer. Counts as an answer for generic function
    /// hooks, but is skipped by the block renderer/style merges.
    Null,
    /// A boolean answer (`true` handles an event hook).
    Bool(bool),
    /// A string answer (`"handled"`, a command, a class name).
    Str(String),
    /// A block renderer descriptor.
    Renderer(BlockRenderer),
    /// Any other structured answer.
    Json(serde_json::Value),
}

impl HookValue {
    /// Whether the plugin declined to answer.
    pub fn is_pass(&self) -> bool {
        matches!(self, HookValue::Pass)
    }

    /// Whether this is exactly `true`.
    pub fn is_true(&self) -> bool {
        matches!(self, HookValue::Bool(true))
    }

    /// Whether this is exactly the `"handled"` sentinel.
    pub fn is_handled(&self) -> bool {
        matches!(self, HookValue::Str(s) if s == HandleValue::Handled.as_str())
    }

    /// The string answer, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HookValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for HookValue {
    fn from(value: bool) -> Self {
        HookValue::Bool(value)
    }
}

impl From<&str> for HookValue {
    fn from(value: &str) -> Self {
        HookValue::Str(value.to_owned())
    }
}

impl From<String> for HookValue {
    fn from(value: String) -> Self {
        HookValue::Str(value)
    }
}

impl From<HandleValue> for HookValue {
    fn from(value: HandleValue) -> Self {
        HookValue::Str(value.as_str().to_owned())
    }
}

impl From<BlockRenderer> for HookValue {
    fn from(value: BlockRenderer) -> Self {
        HookValue::Renderer(value)
    }
}

impl From<serde_json::Value> for HookValue {
    fn from(value: serde_json::Value) -> Self {
        HookValue::Json(value)
    }
}

/// The outcome of a handle hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleValue {
    /// A plugin committed to this command.
    Handled,
    /// Nobody handled it; the surface applies its default.
    NotHandled,
}

impl HandleValue {
    /// The sentinel string.
    pub const fn as_str(self) -> &'static str {
        match self {
            HandleValue::Handled => "handled",
            HandleValue::NotHandled => "not-handled",
        }
    }

    /// Whether a plugin handled the command.
    pub const fn is_handled(self) -> bool {
        matches!(self, HandleValue::Handled)
    }
}

impl fmt::Display for HandleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

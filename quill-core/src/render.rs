//! Types exchanged with the rendering collaborator.
//!
//! The engine never renders anything. It only decides which component,
//! style map and block configuration a rendering layer should use, so these
//! types name components instead of holding them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free-form properties handed to a rendered component.
pub type Props = IndexMap<String, serde_json::Value>;

/// CSS-like declarations for one inline style, e.g. `{"fontWeight": "bold"}`.
pub type Style = IndexMap<String, String>;

/// Inline style name → style declarations.
pub type CustomStyleMap = IndexMap<String, Style>;

/// Block type token → render configuration.
pub type BlockRenderMap = IndexMap<String, BlockRenderConfig>;

/// A reference to a component registered with the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Component(String);

impl Component {
    /// Reference a component by its registered name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The registered name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Component {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Component {
    fn from(name: String) -> Self {
        Self(name)
    }
}

/// The descriptor a `blockRendererFn` returns for a custom block renderer.
///
/// Several plugins may contribute to the same descriptor; see
/// [`BlockRenderer::merge`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockRenderer {
    /// The renderer component, if this contribution names one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<Component>,
    /// Whether the rendered block stays editable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,
    /// Properties passed to the renderer component.
    #[serde(default)]
    pub props: Props,
}

impl BlockRenderer {
    /// A descriptor naming a renderer component.
    pub fn new(component: impl Into<Component>) -> Self {
        Self {
            component: Some(component.into()),
            ..Self::default()
        }
    }

    /// A descriptor that only contributes props.
    pub fn props_only() -> Self {
        Self::default()
    }

    /// Set the editable flag.
    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = Some(editable);
        self
    }

    /// Add one renderer prop.
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Fold a later contribution into this descriptor.
    ///
    /// `props` merge key by key; top-level fields the later descriptor sets
    /// replace ours.
    pub fn merge(&mut self, later: BlockRenderer) {
        let BlockRenderer {
            component,
            editable,
            props,
        } = later;
        if component.is_some() {
            self.component = component;
        }
        if editable.is_some() {
            self.editable = editable;
        }
        self.props.extend(props);
    }
}

/// How the rendering layer draws one block type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRenderConfig {
    /// The element wrapping the block's text.
    pub element: String,
    /// An element grouping adjacent blocks of this type, e.g. `ul`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<String>,
    /// Pasted elements that should map onto this block type.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliased_elements: Vec<String>,
}

impl BlockRenderConfig {
    /// Render with the given element and no wrapper.
    pub fn element(element: impl Into<String>) -> Self {
        Self {
            element: element.into(),
            wrapper: None,
            aliased_elements: Vec::new(),
        }
    }

    /// Group adjacent blocks under `wrapper`.
    pub fn with_wrapper(mut self, wrapper: impl Into<String>) -> Self {
        self.wrapper = Some(wrapper.into());
        self
    }

    /// Map pasted `element`s onto this block type.
    pub fn with_alias(mut self, element: impl Into<String>) -> Self {
        self.aliased_elements.push(element.into());
        self
    }
}

/// Accessibility attributes applied to the editable element.
///
/// Keys follow the surface's attribute names (`ariaLabel`, `role`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessibilityProps(IndexMap<String, String>);

impl AccessibilityProps {
    /// Whether the editor currently owns a popup.
    pub const ARIA_HAS_POPUP: &'static str = "ariaHasPopup";
    /// Whether the popup owned by the editor is expanded.
    pub const ARIA_EXPANDED: &'static str = "ariaExpanded";

    /// An empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Set one attribute.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Read one attribute.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Iterate attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of attributes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no attribute is set.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AccessibilityProps {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

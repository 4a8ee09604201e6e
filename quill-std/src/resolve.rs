//! Auxiliary resolvers.
//!
//! Independent merges recomputed on every render pass. Each is a pure
//! function of the current [`EditorProps`]: resolving twice with unchanged
//! props yields identical maps.

use crate::registry::with_host;
use quill_core::{AccessibilityProps, BlockRenderConfig, BlockRenderMap, CustomStyleMap, EditorProps};

struct DefaultBlock {
    element: &'static str,
    wrapper: Option<&'static str>,
    aliases: &'static [&'static str],
}

const fn block(
    element: &'static str,
    wrapper: Option<&'static str>,
    aliases: &'static [&'static str],
) -> DefaultBlock {
    DefaultBlock {
        element,
        wrapper,
        aliases,
    }
}

static DEFAULT_BLOCK_RENDER_MAP: phf::OrderedMap<&'static str, DefaultBlock> = phf::phf_ordered_map! {
    "header-one" => block("h1", None, &[]),
    "header-two" => block("h2", None, &[]),
    "header-three" => block("h3", None, &[]),
    "header-four" => block("h4", None, &[]),
    "header-five" => block("h5", None, &[]),
    "header-six" => block("h6", None, &[]),
    "section" => block("section", None, &[]),
    "article" => block("article", None, &[]),
    "unordered-list-item" => block("li", Some("ul"), &[]),
    "ordered-list-item" => block("li", Some("ol"), &[]),
    "blockquote" => block("blockquote", None, &[]),
    "atomic" => block("figure", None, &[]),
    "code-block" => block("pre", Some("pre"), &[]),
    "unstyled" => block("div", None, &["p"]),
};

/// The baseline block render map.
pub fn default_block_render_map() -> BlockRenderMap {
    DEFAULT_BLOCK_RENDER_MAP
        .entries()
        .map(|(block_type, defaults)| {
            let mut config = BlockRenderConfig::element(defaults.element);
            if let Some(wrapper) = defaults.wrapper {
                config = config.with_wrapper(wrapper);
            }
            for alias in defaults.aliases {
                config = config.with_alias(*alias);
            }
            ((*block_type).to_owned(), config)
        })
        .collect()
}

/// Every plugin's style map in order, then the host's. Later keys win.
pub fn resolve_custom_style_map(props: &EditorProps) -> CustomStyleMap {
    let mut styles = CustomStyleMap::new();
    for map in props
        .plugins
        .iter()
        .chain(std::iter::once(&props.host))
        .filter_map(|plugin| plugin.custom_style_map())
    {
        styles.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    styles
}

/// The defaults (when enabled), then every plugin's map in order, then the
/// host's. Later keys win.
pub fn resolve_block_render_map(props: &EditorProps) -> BlockRenderMap {
    let mut map = if props.default_block_render_map {
        default_block_render_map()
    } else {
        BlockRenderMap::new()
    };
    for overrides in props
        .plugins
        .iter()
        .chain(std::iter::once(&props.host))
        .filter_map(|plugin| plugin.block_render_map())
    {
        map.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    map
}

/// The host's attributes, then every resolved plugin's, last write wins.
///
/// `ariaHasPopup` and `ariaExpanded` are sticky: once a contributor sets
/// one to `"true"`, later contributors cannot change it.
pub fn resolve_accessibility_props(props: &EditorProps) -> AccessibilityProps {
    let mut merged = AccessibilityProps::new();
    for contribution in with_host(props)
        .iter()
        .filter_map(|plugin| plugin.accessibility_props())
    {
        for (key, value) in contribution.iter() {
            if is_sticky(key) && merged.get(key) == Some("true") {
                continue;
            }
            merged.set(key, value);
        }
    }
    merged
}

fn is_sticky(key: &str) -> bool {
    key == AccessibilityProps::ARIA_HAS_POPUP || key == AccessibilityProps::ARIA_EXPANDED
}

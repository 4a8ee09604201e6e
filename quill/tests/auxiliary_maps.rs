//! Style maps, block render maps and accessibility props in a render pass.

use quill::{
    AccessibilityProps, BlockRenderConfig, BlockRenderer, ContentBlock, Editor, HOST_PLUGIN_NAME,
    Plugin, Style,
    plugins::{IMAGE_COMPONENT, image_block_plugin, paragraph_style_plugin},
};

mod common;
use common::{bare_props, doc_with};

fn style(weight: &str) -> Style {
    Style::from([("fontWeight".to_owned(), weight.to_owned())])
}

#[test]
fn test_render_pass_resolves_maps() {
    let editor = Editor::new(
        bare_props()
            .with_host(
                Plugin::builder(HOST_PLUGIN_NAME)
                    .custom_style("BOLD", style("800"))
                    .block_render("callout", BlockRenderConfig::element("aside"))
                    .build(),
            )
            .with_plugin(
                Plugin::builder("p")
                    .custom_style("BOLD", style("600"))
                    .custom_style("LIGHT", style("200"))
                    .block_render("callout", BlockRenderConfig::element("div"))
                    .build(),
            ),
    )
    .unwrap();

    let pass = editor.render();
    assert_eq!(pass.custom_style_map["BOLD"], style("800"));
    assert_eq!(pass.custom_style_map["LIGHT"], style("200"));
    assert_eq!(pass.block_render_map["callout"].element, "aside");
    assert_eq!(pass.block_render_map["blockquote"].element, "blockquote");
}

#[test]
fn test_render_passes_are_deterministic() {
    let editor = Editor::new(
        bare_props().with_plugin(Plugin::builder("p").custom_style("X", style("1")).build()),
    )
    .unwrap();

    let (a, b) = (editor.render(), editor.render());
    assert_eq!(a.custom_style_map, b.custom_style_map);
    assert_eq!(a.block_render_map, b.block_render_map);
    assert_eq!(a.accessibility_props, b.accessibility_props);
}

#[test]
fn test_accessibility_sticky_popup() {
    let popup = Plugin::builder("mentions")
        .accessibility_props(|| {
            AccessibilityProps::new()
                .with(AccessibilityProps::ARIA_HAS_POPUP, "true")
                .with(AccessibilityProps::ARIA_EXPANDED, "true")
        })
        .build();
    let unaware = Plugin::builder("unaware")
        .accessibility_props(|| {
            AccessibilityProps::new()
                .with(AccessibilityProps::ARIA_EXPANDED, "false")
                .with("ariaLabel", "Editor")
        })
        .build();
    let editor = Editor::new(bare_props().with_plugins([popup, unaware])).unwrap();

    let props = editor.render().accessibility_props;
    assert_eq!(props.get(AccessibilityProps::ARIA_HAS_POPUP), Some("true"));
    assert_eq!(props.get(AccessibilityProps::ARIA_EXPANDED), Some("true"));
    assert_eq!(props.get("ariaLabel"), Some("Editor"));
}

#[test]
fn test_block_hooks_per_visible_block() {
    let mut atomic = ContentBlock::new("img", "atomic", " ");
    atomic.data.insert("src".into(), "cat.png".into());
    let editor = Editor::new(
        bare_props()
            .with_plugins([image_block_plugin(), paragraph_style_plugin()])
            .editor_state(doc_with(vec![ContentBlock::unstyled("p", "hello"), atomic])),
    )
    .unwrap();

    let pass = editor.render();
    let renderers = pass.block_renderers().unwrap();
    assert_eq!(renderers[0], ("p".to_owned(), None));
    assert_eq!(
        renderers[1],
        (
            "img".to_owned(),
            Some(
                BlockRenderer::new(IMAGE_COMPONENT)
                    .editable(false)
                    .with_prop("src", "cat.png")
            )
        )
    );

    let styles = pass.block_styles().unwrap();
    assert_eq!(styles[0].1.as_deref(), Some("paragraph"));
    assert_eq!(styles[1].1, None);
}

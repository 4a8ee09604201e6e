//! Render-pass output.

use super::measure::{InlineToolbar, SideToolbar};
use quill_core::{
    AccessibilityProps, BlockRenderMap, BlockRenderer, ContentBlock, CustomStyleMap, EditorState,
    HookError, PluginMethods,
};
use quill_std::compose::PluginHooks;

/// Everything the rendering layer needs for one pass, recomputed from the
/// current props and plugins on every [`Editor::render`](super::Editor::render).
#[derive(Debug, Clone)]
pub struct RenderPass {
    /// The dispatch table, one composed hook per classified name.
    pub hooks: PluginHooks,
    /// Resolved inline style map.
    pub custom_style_map: CustomStyleMap,
    /// Resolved block render map.
    pub block_render_map: BlockRenderMap,
    /// Resolved accessibility attributes.
    pub accessibility_props: AccessibilityProps,
    /// The current editing state.
    pub editor_state: EditorState,
    /// Props flag or controller flag.
    pub read_only: bool,
    /// Inline toolbar visibility and placement.
    pub inline_toolbar: InlineToolbar,
    /// Side toolbar placement, present while a block is selected.
    pub side_toolbar: Option<SideToolbar>,
    methods: PluginMethods,
}

impl RenderPass {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        hooks: PluginHooks,
        custom_style_map: CustomStyleMap,
        block_render_map: BlockRenderMap,
        accessibility_props: AccessibilityProps,
        editor_state: EditorState,
        read_only: bool,
        inline_toolbar: InlineToolbar,
        side_toolbar: Option<SideToolbar>,
        methods: PluginMethods,
    ) -> Self {
        Self {
            hooks,
            custom_style_map,
            block_render_map,
            accessibility_props,
            editor_state,
            read_only,
            inline_toolbar,
            side_toolbar,
            methods,
        }
    }

    /// The composed `blockRendererFn` answer for every block, in document
    /// order.
    pub fn block_renderers(&self) -> Result<Vec<(String, Option<BlockRenderer>)>, HookError> {
        self.each_block(|hooks, block, methods| hooks.block_renderer(block, methods))
    }

    /// The composed `blockStyleFn` answer for every block, in document order.
    pub fn block_styles(&self) -> Result<Vec<(String, Option<String>)>, HookError> {
        self.each_block(|hooks, block, methods| hooks.block_style(block, methods))
    }

    fn each_block<T>(
        &self,
        f: impl Fn(&PluginHooks, &ContentBlock, &PluginMethods) -> Result<T, HookError>,
    ) -> Result<Vec<(String, T)>, HookError> {
        self.editor_state
            .current_content()
            .blocks()
            .iter()
            .map(|block| Ok((block.key.clone(), f(&self.hooks, block, &self.methods)?)))
            .collect()
    }
}

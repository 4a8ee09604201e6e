//! Ready-made plugins.
//!
//! ```rust,ignore
//! let props = EditorProps::new()
//!     .with_plugin(image_block_plugin())
//!     .with_plugin(paragraph_style_plugin());
//! ```

use quill_core::{BlockRenderer, Plugin};

/// Component name the image block renderer registers under.
pub const IMAGE_COMPONENT: &str = "image";

/// Class name given to `unstyled` blocks.
pub const PARAGRAPH_CLASS: &str = "paragraph";

/// Renders `atomic` blocks with the non-editable [`IMAGE_COMPONENT`].
///
/// The image source is read from the block's `src` data entry when present
/// and passed on as a renderer prop.
pub fn image_block_plugin() -> Plugin {
    Plugin::builder("image-block")
        .block_renderer_fn(|block, _| {
            if block.block_type != "atomic" {
                return None;
            }
            let mut renderer = BlockRenderer::new(IMAGE_COMPONENT).editable(false);
            if let Some(src) = block.data.get("src") {
                renderer = renderer.with_prop("src", src.clone());
            }
            Some(renderer)
        })
        .build()
}

/// Gives `unstyled` blocks the [`PARAGRAPH_CLASS`] class.
pub fn paragraph_style_plugin() -> Plugin {
    Plugin::builder("paragraph-style")
        .block_style_fn(|block, _| (block.block_type == "unstyled").then(|| PARAGRAPH_CLASS.to_owned()))
        .build()
}

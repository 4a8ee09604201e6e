//! Selection measurement for floating toolbars.
//!
//! Geometry is only valid after a render completes, so every commit
//! schedules one deferred measurement that [`Editor::run_deferred`] drains.
//! Missing geometry never fails; it yields an empty measurement.
//!
//! [`Editor::run_deferred`]: super::Editor::run_deferred

use quill_core::{
    BlockElement, Coords, EditorState, GeometryProvider, Rect, SelectionRange,
};
use serde::{Deserialize, Serialize};

/// Height of the side toolbar, subtracted so it aligns with the bottom of
/// the selected block.
pub const SIDE_TOOLBAR_HEIGHT: f64 = 31.0;

/// Visibility and placement of the inline formatting toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InlineToolbar {
    /// Whether the toolbar is shown.
    pub show: bool,
    /// Where to place it, relative to the editor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Coords>,
}

impl InlineToolbar {
    /// Shown over a non-collapsed selection, hidden otherwise.
    ///
    /// The position comes from the geometry provider; if it cannot place
    /// the selection the toolbar is shown at the editor origin.
    pub fn for_selection(state: &EditorState, geometry: Option<&dyn GeometryProvider>) -> Self {
        if state.selection().is_collapsed() {
            return Self::default();
        }
        let position = geometry
            .and_then(|g| {
                let range = g.selection_range()?;
                g.selection_coords(&range)
            })
            .unwrap_or_default();
        Self {
            show: true,
            position: Some(position),
        }
    }
}

/// Placement of the side toolbar next to the selected block.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SideToolbar {
    /// Vertical offset from the top of the editor.
    pub offset_top: f64,
}

impl SideToolbar {
    /// Align the toolbar's bottom with the block's bottom edge.
    pub fn for_bounds(editor: Rect, block: Rect) -> Self {
        Self {
            offset_top: (block.bottom - editor.top) - SIDE_TOOLBAR_HEIGHT,
        }
    }
}

/// The latest deferred measurement.
#[derive(Debug, Clone, Default)]
pub struct Measurements {
    pub(crate) inline_toolbar: InlineToolbar,
    pub(crate) selection_range: Option<SelectionRange>,
    pub(crate) selected_block: Option<BlockElement>,
    pub(crate) pending: usize,
}

impl Measurements {
    /// The inline toolbar computed at the last commit.
    pub fn inline_toolbar(&self) -> InlineToolbar {
        self.inline_toolbar
    }

    /// The live selection at the last measurement.
    pub fn selection_range(&self) -> Option<&SelectionRange> {
        self.selection_range.as_ref()
    }

    /// The block holding the selection at the last measurement.
    pub fn selected_block(&self) -> Option<&BlockElement> {
        self.selected_block.as_ref()
    }

    /// Measurements scheduled but not yet run.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Read the selection and its block from `geometry`.
    pub(crate) fn measure(&mut self, geometry: Option<&dyn GeometryProvider>) {
        self.selection_range = geometry.and_then(|g| g.selection_range());
        self.selected_block = match (geometry, &self.selection_range) {
            (Some(g), Some(range)) => g.selected_block(range),
            _ => None,
        };
    }

    /// Side toolbar placement, present while a block is selected.
    pub(crate) fn side_toolbar(&self, geometry: Option<&dyn GeometryProvider>) -> Option<SideToolbar> {
        let block = self.selected_block.as_ref()?;
        let bounds = geometry.and_then(|g| Some((g.editor_bounds()?, g.block_bounds(block)?)));
        Some(match bounds {
            Some((editor, block)) => SideToolbar::for_bounds(editor, block),
            None => SideToolbar::default(),
        })
    }
}

//! Collaborators provided by the rendering layer.
//!
//! Both traits isolate DOM/geometry access so the composition engine stays
//! testable without a rendering surface.

use serde::{Deserialize, Serialize};

/// The mounted editing surface (the "editor ref" plugins may reach for).
pub trait EditorSurface: Send + Sync {
    /// Give the editable element input focus.
    fn focus(&self);

    /// Remove input focus from the editable element.
    fn blur(&self);
}

/// The live selection as seen by the rendering layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    /// Key of the block holding the selection start.
    pub block_key: String,
    /// Start offset in characters.
    pub start: usize,
    /// End offset in characters.
    pub end: usize,
}

/// A rendered block element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockElement {
    /// Key of the block the element renders.
    pub block_key: String,
}

/// A bounding rectangle in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top edge.
    pub top: f64,
    /// Left edge.
    pub left: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Right edge.
    pub right: f64,
}

/// Offsets of the selection relative to the editor element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coords {
    /// Vertical offset.
    pub offset_top: f64,
    /// Horizontal offset.
    pub offset_left: f64,
}

/// Geometry lookups that are only valid after a render completes.
///
/// Every lookup may come back empty; callers fall back to a default
/// measurement instead of failing.
pub trait GeometryProvider: Send + Sync {
    /// The live selection, if the surface has one.
    fn selection_range(&self) -> Option<SelectionRange>;

    /// The element of the block holding `range`.
    fn selected_block(&self, range: &SelectionRange) -> Option<BlockElement>;

    /// Position of `range` relative to the editor.
    fn selection_coords(&self, range: &SelectionRange) -> Option<Coords>;

    /// Bounds of the editor element.
    fn editor_bounds(&self) -> Option<Rect>;

    /// Bounds of a rendered block.
    fn block_bounds(&self, block: &BlockElement) -> Option<Rect>;
}

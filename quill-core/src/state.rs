//! # Editing State
//!
//! The immutable document/selection snapshot owned by the state controller.
//!
//! Editing operations (insert, delete, split) belong to the document model
//! and are not provided here; the engine only reads a snapshot, builds a
//! replacement from content + selection + change type, and attaches a
//! decoration provider. Every replacement goes through the controller's
//! single `onChange` entry point.

use crate::{decorator::DecorationProvider, render::Props};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

static NEXT_KEY: AtomicU64 = AtomicU64::new(0);

/// Generate a block key unique within this process.
pub fn gen_key() -> String {
    let n = NEXT_KEY.fetch_add(1, Ordering::Relaxed);
    format!("k{n:x}")
}

/// A span of a block's text backed by an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRange {
    /// Start offset, in characters.
    pub offset: usize,
    /// Length, in characters.
    pub length: usize,
    /// The entity type, e.g. `LINK` or `MENTION`.
    pub entity: String,
}

/// One block of the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBlock {
    /// Stable block key.
    pub key: String,
    /// Block type token, e.g. `unstyled`, `header-one`, `atomic`.
    #[serde(rename = "type")]
    pub block_type: String,
    /// Plain text of the block.
    pub text: String,
    /// Nesting depth for list items.
    #[serde(default)]
    pub depth: u32,
    /// Entity-backed spans.
    #[serde(default)]
    pub entity_ranges: Vec<EntityRange>,
    /// Arbitrary block metadata.
    #[serde(default)]
    pub data: Props,
}

impl ContentBlock {
    /// A block with the given key, type and text.
    pub fn new(key: impl Into<String>, block_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            block_type: block_type.into(),
            text: text.into(),
            depth: 0,
            entity_ranges: Vec::new(),
            data: Props::new(),
        }
    }

    /// An `unstyled` block.
    pub fn unstyled(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(key, "unstyled", text)
    }

    /// Attach an entity-backed span.
    pub fn with_entity(mut self, offset: usize, length: usize, entity: impl Into<String>) -> Self {
        self.entity_ranges.push(EntityRange {
            offset,
            length,
            entity: entity.into(),
        });
        self
    }

    /// Text length in characters.
    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Whether the block has no text.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// The ordered blocks of a document.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentState {
    blocks: Vec<ContentBlock>,
}

impl ContentState {
    /// Content from explicit blocks.
    pub fn from_blocks(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }

    /// Content with one `unstyled` block per line of `text`.
    pub fn from_text(text: &str) -> Self {
        let blocks = text
            .split('\n')
            .map(|line| ContentBlock::unstyled(gen_key(), line))
            .collect();
        Self { blocks }
    }

    /// Blocks in document order.
    pub fn blocks(&self) -> &[ContentBlock] {
        &self.blocks
    }

    /// Look up a block by key.
    pub fn block_for_key(&self, key: &str) -> Option<&ContentBlock> {
        self.blocks.iter().find(|b| b.key == key)
    }

    /// The first block.
    pub fn first_block(&self) -> Option<&ContentBlock> {
        self.blocks.first()
    }

    /// The last block.
    pub fn last_block(&self) -> Option<&ContentBlock> {
        self.blocks.last()
    }

    /// The document text, one line per block.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether any block has text.
    pub fn has_text(&self) -> bool {
        self.blocks.iter().any(|b| !b.is_empty())
    }
}

/// Anchor/focus selection over block offsets.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    /// Block holding the anchor.
    pub anchor_key: String,
    /// Anchor offset in characters.
    pub anchor_offset: usize,
    /// Block holding the focus.
    pub focus_key: String,
    /// Focus offset in characters.
    pub focus_offset: usize,
    /// Whether focus precedes anchor.
    #[serde(default)]
    pub is_backward: bool,
    /// Whether the editor holds input focus.
    #[serde(default)]
    pub has_focus: bool,
}

impl SelectionState {
    /// A caret at `offset` in block `key`.
    pub fn collapsed(key: impl Into<String>, offset: usize) -> Self {
        let key = key.into();
        Self {
            anchor_key: key.clone(),
            anchor_offset: offset,
            focus_key: key,
            focus_offset: offset,
            is_backward: false,
            has_focus: false,
        }
    }

    /// A forward selection within one block.
    pub fn range(key: impl Into<String>, start: usize, end: usize) -> Self {
        let mut selection = Self::collapsed(key, start);
        selection.focus_offset = end;
        selection
    }

    /// Whether anchor and focus coincide.
    pub fn is_collapsed(&self) -> bool {
        self.anchor_key == self.focus_key && self.anchor_offset == self.focus_offset
    }

    /// Builder-style focus flag.
    pub fn with_focus(mut self, has_focus: bool) -> Self {
        self.has_focus = has_focus;
        self
    }
}

/// The kind of edit that produced a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChangeType {
    /// An entity was applied to a range.
    ApplyEntity,
    /// Block metadata changed.
    ChangeBlockData,
    /// A block's type changed.
    ChangeBlockType,
    /// Inline styles changed.
    ChangeInlineStyle,
    /// Characters were typed.
    InsertCharacters,
    /// A fragment was pasted or inserted.
    InsertFragment,
    /// A range was removed.
    RemoveRange,
    /// A block was split.
    SplitBlock,
    /// Undo.
    Undo,
    /// Redo.
    Redo,
}

impl ChangeType {
    /// The change-type tag.
    pub const fn as_str(self) -> &'static str {
        match self {
            ChangeType::ApplyEntity => "apply-entity",
            ChangeType::ChangeBlockData => "change-block-data",
            ChangeType::ChangeBlockType => "change-block-type",
            ChangeType::ChangeInlineStyle => "change-inline-style",
            ChangeType::InsertCharacters => "insert-characters",
            ChangeType::InsertFragment => "insert-fragment",
            ChangeType::RemoveRange => "remove-range",
            ChangeType::SplitBlock => "split-block",
            ChangeType::Undo => "undo",
            ChangeType::Redo => "redo",
        }
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct Snapshot {
    content: ContentState,
    selection: SelectionState,
    decorator: Option<Arc<dyn DecorationProvider>>,
    last_change: Option<ChangeType>,
}

/// An immutable editor snapshot: content, selection and decoration provider.
///
/// Cloning is O(1). Every "modification" returns a new snapshot and leaves
/// `self` untouched.
#[derive(Clone)]
pub struct EditorState {
    inner: Arc<Snapshot>,
}

impl EditorState {
    /// A snapshot holding one empty `unstyled` block.
    pub fn create_empty() -> Self {
        Self::create_with_content(ContentState::from_text(""))
    }

    /// A snapshot over `content` with the caret at the document start.
    pub fn create_with_content(content: ContentState) -> Self {
        let selection = content
            .first_block()
            .map(|b| SelectionState::collapsed(b.key.clone(), 0))
            .unwrap_or_default();
        Self::from_parts(content, selection, None, None)
    }

    fn from_parts(
        content: ContentState,
        selection: SelectionState,
        decorator: Option<Arc<dyn DecorationProvider>>,
        last_change: Option<ChangeType>,
    ) -> Self {
        Self {
            inner: Arc::new(Snapshot {
                content,
                selection,
                decorator,
                last_change,
            }),
        }
    }

    /// The document content.
    pub fn current_content(&self) -> &ContentState {
        &self.inner.content
    }

    /// The current selection.
    pub fn selection(&self) -> &SelectionState {
        &self.inner.selection
    }

    /// The change that produced this snapshot, if any.
    pub fn last_change_type(&self) -> Option<ChangeType> {
        self.inner.last_change
    }

    /// The attached decoration provider.
    pub fn decorator(&self) -> Option<&Arc<dyn DecorationProvider>> {
        self.inner.decorator.as_ref()
    }

    /// A replacement snapshot carrying new content, tagged with `change`.
    pub fn push(&self, content: ContentState, change: ChangeType) -> Self {
        Self::from_parts(
            content,
            self.inner.selection.clone(),
            self.inner.decorator.clone(),
            Some(change),
        )
    }

    /// A replacement snapshot with `selection`, which keeps its focus flag.
    pub fn accept_selection(&self, selection: SelectionState) -> Self {
        Self::from_parts(
            self.inner.content.clone(),
            selection,
            self.inner.decorator.clone(),
            self.inner.last_change,
        )
    }

    /// A replacement snapshot with `selection` and input focus.
    pub fn force_selection(&self, selection: SelectionState) -> Self {
        self.accept_selection(selection.with_focus(true))
    }

    /// A replacement snapshot with the caret after the last character.
    pub fn move_selection_to_end(&self) -> Self {
        let Some(last) = self.inner.content.last_block() else {
            return self.clone();
        };
        let selection = SelectionState::collapsed(last.key.clone(), last.len());
        self.force_selection(selection)
    }

    /// A replacement snapshot with `decorator` attached.
    pub fn with_decorator(&self, decorator: Arc<dyn DecorationProvider>) -> Self {
        Self::from_parts(
            self.inner.content.clone(),
            self.inner.selection.clone(),
            Some(decorator),
            self.inner.last_change,
        )
    }

    /// Per-character decoration keys for one block, from the attached provider.
    ///
    /// Returns `None` when the block does not exist or no provider is attached.
    pub fn block_decorations(&self, block_key: &str) -> Option<Vec<Option<String>>> {
        let decorator = self.inner.decorator.as_ref()?;
        let block = self.inner.content.block_for_key(block_key)?;
        Some(decorator.decorations(block, &self.inner.content))
    }

    /// Whether two handles point at the same snapshot.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::create_empty()
    }
}

impl fmt::Debug for EditorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorState")
            .field("content", &self.inner.content)
            .field("selection", &self.inner.selection)
            .field("decorated", &self.inner.decorator.is_some())
            .field("last_change", &self.inner.last_change)
            .finish()
    }
}

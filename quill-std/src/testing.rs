//! Testing utilities for Quill.
//!
//! This module provides utilities to make testing plugins and composed hooks easier.
//!
//! # Features
//!
//! - [`MockContext`]: An in-memory [`PluginContext`] recording every state write
//! - [`CallLog`]: A shared log of which plugins were invoked
//! - [`recording_plugin`]: A plugin answering a fixed value and logging its calls
//! - [`MockSurface`]: An editing surface counting focus/blur requests
//! - [`MockGeometry`]: A programmable geometry provider
//! - [`StaticDecorator`]: A custom decoration provider claiming fixed ranges

use quill_core::{
    BlockElement, Component, ContentBlock, ContentState, Coords, DecorationProvider, EditorProps,
    EditorState, EditorSurface, GeometryProvider, HookValue, Plugin, PluginContext, PluginMethods,
    Props, QuillError, Rect, SelectionRange,
};
use std::sync::{
    Arc, Mutex, MutexGuard, PoisonError,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ============================================================================
// Mock Context
// ============================================================================

/// An in-memory plugin context.
///
/// Writes replace the stored state directly and are recorded, so tests can
/// assert on what a plugin committed without a state controller.
///
/// # Example
///
/// ```rust,ignore
/// let ctx = MockContext::new();
/// hooks.dispatch_event("onTab", &HookArgs::None, &ctx.methods())?;
/// assert_eq!(ctx.commits().len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct MockContext {
    inner: Arc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    state: Mutex<EditorState>,
    commits: Mutex<Vec<EditorState>>,
    props: Mutex<Arc<EditorProps>>,
    read_only: AtomicBool,
    surface: Mutex<Option<Arc<dyn EditorSurface>>>,
}

impl MockContext {
    /// A context over an empty state and default props.
    pub fn new() -> Self {
        Self::default()
    }

    /// A context over `props`, starting from `props.editor_state`.
    pub fn with_props(props: EditorProps) -> Self {
        let ctx = Self::new();
        *lock(&ctx.inner.state) = props.editor_state.clone();
        *lock(&ctx.inner.props) = Arc::new(props);
        ctx
    }

    /// Attach an editing surface.
    pub fn with_surface(self, surface: Arc<dyn EditorSurface>) -> Self {
        *lock(&self.inner.surface) = Some(surface);
        self
    }

    /// A plugin-methods handle backed by this context.
    pub fn methods(&self) -> PluginMethods {
        PluginMethods::new(Arc::new(self.clone()))
    }

    /// Every state written through `set_editor_state`, oldest first.
    pub fn commits(&self) -> Vec<EditorState> {
        lock(&self.inner.commits).clone()
    }
}

impl PluginContext for MockContext {
    fn editor_state(&self) -> EditorState {
        lock(&self.inner.state).clone()
    }

    fn set_editor_state(&self, state: EditorState) -> Result<(), QuillError> {
        lock(&self.inner.commits).push(state.clone());
        *lock(&self.inner.state) = state;
        Ok(())
    }

    fn plugins(&self) -> Vec<Arc<Plugin>> {
        lock(&self.inner.props).plugins.clone()
    }

    fn props(&self) -> Arc<EditorProps> {
        lock(&self.inner.props).clone()
    }

    fn read_only(&self) -> bool {
        self.inner.read_only.load(Ordering::SeqCst)
    }

    fn set_read_only(&self, read_only: bool) {
        self.inner.read_only.store(read_only, Ordering::SeqCst);
    }

    fn editor_ref(&self) -> Option<Arc<dyn EditorSurface>> {
        lock(&self.inner.surface).clone()
    }
}

// ============================================================================
// Call Log
// ============================================================================

/// A shared, ordered log of plugin invocations.
#[derive(Clone, Default)]
pub struct CallLog {
    calls: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    /// An empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn record(&self, entry: impl Into<String>) {
        lock(&self.calls).push(entry.into());
    }

    /// Get a clone of the recorded entries.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    /// Get the number of recorded entries.
    pub fn len(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        lock(&self.calls).is_empty()
    }

    /// Clear all recorded entries.
    pub fn clear(&self) {
        lock(&self.calls).clear();
    }
}

// ============================================================================
// Recording Plugin
// ============================================================================

/// A plugin named `name` whose `hook` records `name` in `log` and answers
/// `value`.
///
/// # Example
///
/// ```rust,ignore
/// let log = CallLog::new();
/// let plugin = recording_plugin("first", "onTab", HookValue::Bool(true), &log);
/// ```
pub fn recording_plugin(name: &str, hook: &str, value: HookValue, log: &CallLog) -> Plugin {
    let log = log.clone();
    let entry = name.to_owned();
    Plugin::builder(name)
        .hook(hook, move |_, _| {
            log.record(entry.clone());
            Ok(value.clone())
        })
        .build()
}

// ============================================================================
// Mock Surface
// ============================================================================

/// An editing surface counting focus and blur requests.
#[derive(Debug, Default)]
pub struct MockSurface {
    focused: AtomicUsize,
    blurred: AtomicUsize,
}

impl MockSurface {
    /// A fresh surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `focus` was called.
    pub fn focus_count(&self) -> usize {
        self.focused.load(Ordering::SeqCst)
    }

    /// How many times `blur` was called.
    pub fn blur_count(&self) -> usize {
        self.blurred.load(Ordering::SeqCst)
    }
}

impl EditorSurface for MockSurface {
    fn focus(&self) {
        self.focused.fetch_add(1, Ordering::SeqCst);
    }

    fn blur(&self) {
        self.blurred.fetch_add(1, Ordering::SeqCst);
    }
}

// ============================================================================
// Mock Geometry
// ============================================================================

/// A geometry provider answering programmed values.
///
/// Every lookup answers `None` until programmed.
#[derive(Debug, Default)]
pub struct MockGeometry {
    selection: Mutex<Option<SelectionRange>>,
    block: Mutex<Option<BlockElement>>,
    coords: Mutex<Option<Coords>>,
    editor: Mutex<Option<Rect>>,
    block_bounds: Mutex<Option<Rect>>,
    reads: AtomicUsize,
}

impl MockGeometry {
    /// A provider with nothing to report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report a live selection inside the block `block_key`.
    pub fn with_selection(self, block_key: &str, start: usize, end: usize) -> Self {
        *lock(&self.selection) = Some(SelectionRange {
            block_key: block_key.to_owned(),
            start,
            end,
        });
        *lock(&self.block) = Some(BlockElement {
            block_key: block_key.to_owned(),
        });
        self
    }

    /// Report the selection position relative to the editor.
    pub fn with_coords(self, offset_top: f64, offset_left: f64) -> Self {
        *lock(&self.coords) = Some(Coords {
            offset_top,
            offset_left,
        });
        self
    }

    /// Report the editor and selected-block bounds.
    pub fn with_bounds(self, editor: Rect, block: Rect) -> Self {
        *lock(&self.editor) = Some(editor);
        *lock(&self.block_bounds) = Some(block);
        self
    }

    /// Forget the live selection.
    pub fn clear_selection(&self) {
        *lock(&self.selection) = None;
    }

    /// How many times the selection was looked up.
    pub fn selection_reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl GeometryProvider for MockGeometry {
    fn selection_range(&self) -> Option<SelectionRange> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        lock(&self.selection).clone()
    }

    fn selected_block(&self, range: &SelectionRange) -> Option<BlockElement> {
        lock(&self.block)
            .clone()
            .filter(|block| block.block_key == range.block_key)
    }

    fn selection_coords(&self, _range: &SelectionRange) -> Option<Coords> {
        *lock(&self.coords)
    }

    fn editor_bounds(&self) -> Option<Rect> {
        *lock(&self.editor)
    }

    fn block_bounds(&self, _block: &BlockElement) -> Option<Rect> {
        *lock(&self.block_bounds)
    }
}

// ============================================================================
// Static Decorator
// ============================================================================

/// A custom decoration provider claiming fixed character ranges.
///
/// Every range is decorated with its own key; the key's props carry the
/// key under `"key"`.
#[derive(Debug, Clone)]
pub struct StaticDecorator {
    component: Component,
    ranges: Vec<(usize, usize, String)>,
}

impl StaticDecorator {
    /// A provider rendering its ranges with `component`.
    pub fn new(component: impl Into<Component>) -> Self {
        Self {
            component: component.into(),
            ranges: Vec::new(),
        }
    }

    /// Claim `[start, end)` under `key` in every block.
    pub fn claim(mut self, start: usize, end: usize, key: impl Into<String>) -> Self {
        self.ranges.push((start, end, key.into()));
        self
    }

    fn knows(&self, key: &str) -> bool {
        self.ranges.iter().any(|(_, _, k)| k == key)
    }
}

impl DecorationProvider for StaticDecorator {
    fn decorations(&self, block: &ContentBlock, _content: &ContentState) -> Vec<Option<String>> {
        let mut out = vec![None; block.len()];
        for (start, end, key) in &self.ranges {
            let end = (*end).min(out.len());
            for slot in out.iter_mut().take(end).skip(*start) {
                if slot.is_none() {
                    *slot = Some(key.clone());
                }
            }
        }
        out
    }

    fn component_for_key(&self, key: &str) -> Option<Component> {
        self.knows(key).then(|| self.component.clone())
    }

    fn props_for_key(&self, key: &str) -> Option<Props> {
        self.knows(key)
            .then(|| Props::from([("key".to_owned(), serde_json::Value::from(key))]))
    }
}

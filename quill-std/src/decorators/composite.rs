//! Composite matching over pattern descriptors.

use quill_core::{Component, ContentBlock, ContentState, DecorationProvider, PatternDecorator, Props};

/// Applies every pattern descriptor's strategy to a block.
///
/// A range is decorated only if none of its positions is already claimed,
/// so earlier descriptors and earlier matches win overlaps. Keys have the
/// form `"{descriptor}.{occurrence}"`.
#[derive(Debug, Clone, Default)]
pub struct CompositeDecorator {
    decorators: Vec<PatternDecorator>,
}

impl CompositeDecorator {
    /// Compose `decorators`, highest priority first.
    pub fn new(decorators: Vec<PatternDecorator>) -> Self {
        Self { decorators }
    }

    /// Number of composed descriptors.
    pub fn len(&self) -> usize {
        self.decorators.len()
    }

    /// Whether nothing is composed.
    pub fn is_empty(&self) -> bool {
        self.decorators.is_empty()
    }

    fn descriptor_for_key(&self, key: &str) -> Option<&PatternDecorator> {
        let (index, _) = key.split_once('.')?;
        self.decorators.get(index.parse::<usize>().ok()?)
    }
}

impl DecorationProvider for CompositeDecorator {
    fn decorations(&self, block: &ContentBlock, content: &ContentState) -> Vec<Option<String>> {
        let mut slots: Vec<Option<String>> = vec![None; block.len()];
        for (index, decorator) in self.decorators.iter().enumerate() {
            let mut occurrence = 0usize;
            for (start, end) in decorator.find_ranges(block, content) {
                let end = end.min(slots.len());
                if start >= end || slots[start..end].iter().any(Option::is_some) {
                    continue;
                }
                let key = format!("{index}.{occurrence}");
                for slot in &mut slots[start..end] {
                    *slot = Some(key.clone());
                }
                occurrence += 1;
            }
        }
        slots
    }

    fn component_for_key(&self, key: &str) -> Option<Component> {
        self.descriptor_for_key(key).map(|d| d.component().clone())
    }

    fn props_for_key(&self, key: &str) -> Option<Props> {
        self.descriptor_for_key(key).map(|d| d.props().clone())
    }
}

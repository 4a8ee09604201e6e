//! Ordered fall-through over several providers.

use quill_core::{Component, ContentBlock, ContentState, DecorationProvider, Props};
use std::sync::Arc;

/// Tries each provider in order for every position; a position keeps the
/// first provider's claim.
///
/// Keys are namespaced as `"{provider}.{inner_key}"` so component and prop
/// lookups route back to the claiming provider.
#[derive(Clone, Default)]
pub struct MultiDecorator {
    providers: Vec<Arc<dyn DecorationProvider>>,
}

impl MultiDecorator {
    /// Compose `providers`, highest priority first.
    pub fn new(providers: Vec<Arc<dyn DecorationProvider>>) -> Self {
        Self { providers }
    }

    /// Number of composed providers.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether nothing is composed.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    fn route<'k>(&self, key: &'k str) -> Option<(&Arc<dyn DecorationProvider>, &'k str)> {
        let (index, inner) = key.split_once('.')?;
        let provider = self.providers.get(index.parse::<usize>().ok()?)?;
        Some((provider, inner))
    }
}

impl DecorationProvider for MultiDecorator {
    fn decorations(&self, block: &ContentBlock, content: &ContentState) -> Vec<Option<String>> {
        let mut slots: Vec<Option<String>> = vec![None; block.len()];
        for (index, provider) in self.providers.iter().enumerate() {
            if slots.iter().all(Option::is_some) {
                break;
            }
            let claims = provider.decorations(block, content);
            for (slot, claim) in slots.iter_mut().zip(claims) {
                if slot.is_none() {
                    *slot = claim.map(|key| format!("{index}.{key}"));
                }
            }
        }
        slots
    }

    fn component_for_key(&self, key: &str) -> Option<Component> {
        let (provider, inner) = self.route(key)?;
        provider.component_for_key(inner)
    }

    fn props_for_key(&self, key: &str) -> Option<Props> {
        let (provider, inner) = self.route(key)?;
        provider.props_for_key(inner)
    }
}

impl std::fmt::Debug for MultiDecorator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MultiDecorator")
            .field("providers", &self.providers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::StaticDecorator;

    #[test]
    fn test_first_provider_claims_position() {
        let multi = MultiDecorator::new(vec![
            Arc::new(StaticDecorator::new("A").claim(0, 2, "a")),
            Arc::new(StaticDecorator::new("B").claim(1, 4, "b")),
        ]);
        let block = ContentBlock::unstyled("k", "hello");
        let slots = multi.decorations(&block, &ContentState::default());

        assert_eq!(
            slots,
            vec![
                Some("0.a".to_owned()),
                Some("0.a".to_owned()),
                Some("1.b".to_owned()),
                Some("1.b".to_owned()),
                None,
            ]
        );
    }

    #[test]
    fn test_keys_route_back_to_provider() {
        let multi = MultiDecorator::new(vec![
            Arc::new(StaticDecorator::new("A").claim(0, 1, "a")),
            Arc::new(StaticDecorator::new("B").claim(1, 2, "x.y")),
        ]);
        assert_eq!(multi.component_for_key("1.x.y"), Some(Component::new("B")));
        assert_eq!(
            multi.props_for_key("1.x.y").unwrap().get("key"),
            Some(&serde_json::Value::from("x.y"))
        );
        assert_eq!(multi.component_for_key("0.x.y"), None);
        assert_eq!(multi.component_for_key("9.a"), None);
    }
}

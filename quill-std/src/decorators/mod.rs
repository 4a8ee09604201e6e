//! Decorator composition.
//!
//! Builds the single decoration provider attached to the editing state from
//! the flattened descriptor list of the host and every plugin:
//!
//! ```text
//! MultiDecorator [ custom_0, custom_1, ..., CompositeDecorator [ pattern_0, pattern_1, ... ] ]
//! ```
//!
//! Custom providers are tried first, in list order. Pattern descriptors only
//! decorate positions no custom provider claimed.

mod composite;
mod multi;
mod strategy;

pub use composite::CompositeDecorator;
pub use multi::MultiDecorator;
pub use strategy::{entity_strategy, regex_decorator, regex_strategy};

use quill_core::{DecorationProvider, Decorator};
use std::sync::Arc;

/// Split `decorators` into custom providers and pattern descriptors and
/// compose them into one provider.
pub fn build_decoration_provider(decorators: &[Decorator]) -> Arc<dyn DecorationProvider> {
    let mut providers: Vec<Arc<dyn DecorationProvider>> = Vec::new();
    let mut patterns = Vec::new();
    for decorator in decorators {
        match decorator {
            Decorator::Custom(provider) => providers.push(provider.clone()),
            Decorator::Pattern(pattern) => patterns.push(pattern.clone()),
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(
        custom = providers.len(),
        patterns = patterns.len(),
        "building decoration provider"
    );

    providers.push(Arc::new(CompositeDecorator::new(patterns)));
    Arc::new(MultiDecorator::new(providers))
}

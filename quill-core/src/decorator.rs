//! # Decoration Providers
//!
//! A decoration provider computes inline, range-based annotations over a
//! block's text. The engine composes every decorator contributed by the host
//! and the plugins into a single provider attached to the editing state.
//!
//! Two descriptor shapes exist:
//!
//! - **Custom**: anything implementing the full [`DecorationProvider`]
//!   capability (enumerate decorated ranges, resolve a component for a key,
//!   resolve props for a key).
//! - **Pattern**: a strategy/component pair matched by the composite
//!   provider. Anything that is not a complete provider is a pattern.

use crate::{
    render::{Component, Props},
    state::{ContentBlock, ContentState},
};
use std::{fmt, sync::Arc};

/// The three-method decoration capability.
pub trait DecorationProvider: Send + Sync {
    /// One entry per character of `block.text`: the decoration key covering
    /// that character, or `None`.
    fn decorations(&self, block: &ContentBlock, content: &ContentState) -> Vec<Option<String>>;

    /// The component rendering spans decorated with `key`.
    fn component_for_key(&self, key: &str) -> Option<Component>;

    /// Props for the component rendering spans decorated with `key`.
    fn props_for_key(&self, key: &str) -> Option<Props>;
}

/// A strategy reports decorated ranges as `(start, end)` character offsets
/// through the callback.
pub type StrategyFn =
    Arc<dyn Fn(&ContentBlock, &ContentState, &mut dyn FnMut(usize, usize)) + Send + Sync>;

/// A strategy/component pair consumed by composite matching.
#[derive(Clone)]
pub struct PatternDecorator {
    strategy: StrategyFn,
    component: Component,
    props: Props,
}

impl PatternDecorator {
    /// Pair a strategy with the component rendering its matches.
    pub fn new<F>(strategy: F, component: impl Into<Component>) -> Self
    where
        F: Fn(&ContentBlock, &ContentState, &mut dyn FnMut(usize, usize)) + Send + Sync + 'static,
    {
        Self {
            strategy: Arc::new(strategy),
            component: component.into(),
            props: Props::new(),
        }
    }

    /// Props passed to every match's component.
    pub fn with_props(mut self, props: Props) -> Self {
        self.props = props;
        self
    }

    /// The component rendering matches.
    pub fn component(&self) -> &Component {
        &self.component
    }

    /// Props for matches.
    pub fn props(&self) -> &Props {
        &self.props
    }

    /// Run the strategy over one block and collect the reported ranges.
    pub fn find_ranges(&self, block: &ContentBlock, content: &ContentState) -> Vec<(usize, usize)> {
        let mut ranges = Vec::new();
        (self.strategy)(block, content, &mut |start: usize, end: usize| {
            ranges.push((start, end))
        });
        ranges
    }
}

impl fmt::Debug for PatternDecorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatternDecorator")
            .field("component", &self.component)
            .field("props", &self.props)
            .finish_non_exhaustive()
    }
}

/// A decorator descriptor contributed by the host or a plugin.
#[derive(Clone)]
pub enum Decorator {
    /// A provider implementing the full decoration capability.
    Custom(Arc<dyn DecorationProvider>),
    /// A strategy/component pair.
    Pattern(PatternDecorator),
}

impl Decorator {
    /// Wrap a custom provider.
    pub fn custom<P: DecorationProvider + 'static>(provider: P) -> Self {
        Decorator::Custom(Arc::new(provider))
    }

    /// A pattern descriptor; see [`PatternDecorator::new`].
    pub fn pattern<F>(strategy: F, component: impl Into<Component>) -> Self
    where
        F: Fn(&ContentBlock, &ContentState, &mut dyn FnMut(usize, usize)) + Send + Sync + 'static,
    {
        Decorator::Pattern(PatternDecorator::new(strategy, component))
    }
}

impl From<PatternDecorator> for Decorator {
    fn from(pattern: PatternDecorator) -> Self {
        Decorator::Pattern(pattern)
    }
}

impl fmt::Debug for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decorator::Custom(_) => f.write_str("Decorator::Custom(..)"),
            Decorator::Pattern(p) => f.debug_tuple("Decorator::Pattern").field(p).finish(),
        }
    }
}

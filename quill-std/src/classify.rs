//! Hook classification.
//!
//! Buckets every property name found on a plugin list into exactly one
//! dispatch category. Names are visited in plugin order, then in each
//! plugin's declaration order; the first sighting decides the bucket.

use indexmap::{IndexMap, IndexSet};
use quill_core::{HookCategory, Plugin};
use std::sync::Arc;

/// The disjoint event/handle/function buckets plus the passthrough names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookClassification {
    buckets: IndexMap<String, HookCategory>,
    ignored: IndexSet<String>,
}

impl HookClassification {
    /// Classify every property name of `plugins`.
    pub fn classify(plugins: &[Arc<Plugin>]) -> Self {
        let mut classification = Self::default();
        classification.extend_with(plugins);
        classification
    }

    /// Add the names of more plugins. Names already seen keep their bucket.
    pub fn extend_with(&mut self, plugins: &[Arc<Plugin>]) {
        for plugin in plugins {
            for name in plugin.property_names() {
                if self.buckets.contains_key(name) || self.ignored.contains(name) {
                    continue;
                }
                match HookCategory::classify(name) {
                    Some(category) => {
                        self.buckets.insert(name.to_owned(), category);
                    }
                    None => {
                        self.ignored.insert(name.to_owned());
                    }
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            hooks = self.buckets.len(),
            ignored = self.ignored.len(),
            "classified plugin properties"
        );
    }

    /// The bucket of `name`, or `None` if it is not dispatched.
    pub fn category_of(&self, name: &str) -> Option<HookCategory> {
        self.buckets.get(name).copied()
    }

    /// Names in one bucket, in first-seen order.
    pub fn names(&self, category: HookCategory) -> impl Iterator<Item = &str> {
        self.buckets
            .iter()
            .filter(move |(_, c)| **c == category)
            .map(|(name, _)| name.as_str())
    }

    /// Every dispatched name with its bucket, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, HookCategory)> {
        self.buckets.iter().map(|(name, c)| (name.as_str(), *c))
    }

    /// Names seen but not dispatched (`decorators`, `onChange`, ...).
    pub fn ignored(&self) -> impl Iterator<Item = &str> {
        self.ignored.iter().map(String::as_str)
    }

    /// Number of dispatched names.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    /// Whether nothing is dispatched.
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::{HookValue, Style};

    fn plugin_with(names: &[&str]) -> Arc<Plugin> {
        let mut builder = Plugin::builder("p");
        for name in names {
            builder = builder.hook(*name, |_, _| Ok(HookValue::Pass));
        }
        Arc::new(builder.build())
    }

    #[test]
    fn test_every_name_lands_in_one_bucket() {
        let plugins = vec![
            plugin_with(&["onTab", "handleReturn", "blockStyleFn", "whatever"]),
            Arc::new(
                Plugin::builder("maps")
                    .custom_style("X", Style::new())
                    .on_change(|s, _| Ok(s))
                    .build(),
            ),
        ];
        let c = HookClassification::classify(&plugins);

        assert_eq!(c.category_of("onTab"), Some(HookCategory::Event));
        assert_eq!(c.category_of("handleReturn"), Some(HookCategory::Handle));
        assert_eq!(c.category_of("blockStyleFn"), Some(HookCategory::Function));
        assert_eq!(c.category_of("whatever"), None);
        assert_eq!(c.category_of("onChange"), None);
        assert_eq!(c.category_of("customStyleMap"), None);

        let ignored: Vec<_> = c.ignored().collect();
        assert_eq!(ignored, vec!["whatever", "customStyleMap", "onChange"]);
        for (name, _) in c.iter() {
            assert!(!ignored.contains(&name));
        }
    }

    #[test]
    fn test_names_are_deduplicated_in_first_seen_order() {
        let plugins = vec![
            plugin_with(&["onTab", "onFocus"]),
            plugin_with(&["onBlur", "onTab"]),
        ];
        let c = HookClassification::classify(&plugins);
        let events: Vec<_> = c.names(HookCategory::Event).collect();
        assert_eq!(events, vec!["onTab", "onFocus", "onBlur"]);
    }

    #[test]
    fn test_reclassification_is_stable() {
        let mut c = HookClassification::classify(&[plugin_with(&["handleReturn"])]);
        let before = c.clone();
        c.extend_with(&[plugin_with(&["handleReturn", "onTab"])]);

        assert_eq!(c.category_of("handleReturn"), before.category_of("handleReturn"));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_attributes_are_classified_like_hooks() {
        let plugin = Arc::new(Plugin::builder("p").attribute("onTab", "oops").build());
        let c = HookClassification::classify(&[plugin]);
        assert_eq!(c.category_of("onTab"), Some(HookCategory::Event));
    }
}

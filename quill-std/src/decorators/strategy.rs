//! Strategies for pattern descriptors.

use quill_core::{ContentBlock, ContentState, Decorator};
use regex::Regex;

/// Report every match of `pattern` in a block's text, as character offsets.
///
/// # Errors
///
/// Returns the regex compile error for an invalid pattern.
pub fn regex_strategy(
    pattern: &str,
) -> Result<
    impl Fn(&ContentBlock, &ContentState, &mut dyn FnMut(usize, usize)) + Send + Sync + 'static,
    regex::Error,
> {
    let regex = Regex::new(pattern)?;
    Ok(
        move |block: &ContentBlock, _: &ContentState, callback: &mut dyn FnMut(usize, usize)| {
            let text = block.text.as_str();
            let mut chars = 0usize;
            let mut cursor = 0usize;
            for m in regex.find_iter(text) {
                if m.start() == m.end() {
                    continue;
                }
                chars += text[cursor..m.start()].chars().count();
                let start = chars;
                chars += m.as_str().chars().count();
                cursor = m.end();
                callback(start, chars);
            }
        },
    )
}

/// Report every entity range of type `entity`.
pub fn entity_strategy(
    entity: impl Into<String>,
) -> impl Fn(&ContentBlock, &ContentState, &mut dyn FnMut(usize, usize)) + Send + Sync + 'static {
    let entity = entity.into();
    move |block: &ContentBlock, _: &ContentState, callback: &mut dyn FnMut(usize, usize)| {
        for range in block.entity_ranges.iter().filter(|r| r.entity == entity) {
            callback(range.offset, range.offset + range.length);
        }
    }
}

/// A pattern descriptor rendering every match of `pattern` with `component`.
pub fn regex_decorator(pattern: &str, component: &str) -> Result<Decorator, regex::Error> {
    Ok(Decorator::pattern(regex_strategy(pattern)?, component))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::PatternDecorator;

    #[test]
    fn test_regex_offsets_are_characters() {
        let decorator = PatternDecorator::new(regex_strategy(r"#\w+").unwrap(), "Hashtag");
        let block = ContentBlock::unstyled("b", "héllo #tag wörld #x");
        let ranges = decorator.find_ranges(&block, &ContentState::default());
        assert_eq!(ranges, vec![(6, 10), (17, 19)]);
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        assert!(regex_strategy("(").is_err());
    }

    #[test]
    fn test_entity_strategy_reports_matching_ranges() {
        let decorator = PatternDecorator::new(entity_strategy("LINK"), "Link");
        let block = ContentBlock::unstyled("b", "see docs and more")
            .with_entity(4, 4, "LINK")
            .with_entity(13, 4, "MENTION");
        assert_eq!(
            decorator.find_ranges(&block, &ContentState::default()),
            vec![(4, 8)]
        );
    }
}

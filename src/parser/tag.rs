//! Category tag matching for option text

use crate::Category;
use regex::Regex;
use std::sync::OnceLock;

/// Splits option content into visible text and an optional category.
///
/// Implement this to change how options are attributed to categories without
/// touching the line scanner or scoring.
pub trait CategoryMatcher {
    /// Returns the visible text and the category, if one was recognised
    fn split(&self, content: &str) -> (String, Option<Category>);
}

/// Default matcher: a trailing `(Vata)`, `(Pitta)` or `(Kapha)` group,
/// case-insensitive, at the very end of the content.
#[derive(Debug, Clone, Copy, Default)]
pub struct TrailingTagMatcher;

fn trailing_tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\((vata|pitta|kapha)\)$").expect("valid tag regex"))
}

impl CategoryMatcher for TrailingTagMatcher {
    fn split(&self, content: &str) -> (String, Option<Category>) {
        let content = content.trim();
        let Some(caps) = trailing_tag_regex().captures(content) else {
            return (content.to_string(), None);
        };
        let (Some(whole), Some(tag)) = (caps.get(0), caps.get(1)) else {
            return (content.to_string(), None);
        };
        match Category::from_tag(tag.as_str()) {
            Some(category) => (content[..whole.start()].trim().to_string(), Some(category)),
            None => (content.to_string(), None),
        }
    }
}

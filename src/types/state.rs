//! Block state strings.

use serde::Serialize;
use std::fmt;

/// Separator between `key=value` fragments of a state string.
const SEPARATOR: char = '&';

/// An ordered, `&`-joined set of `key=value` fragments identifying one
/// variant of a block, e.g. `"half=top&waterlogged=true"`.
///
/// The empty string is the block's only state when it has no variants.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct StateString(String);

impl StateString {
    /// The state of a block without variants.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// Build a state string from raw text, dropping empty fragments.
    pub fn new(raw: &str) -> Self {
        Self::from_fragments(raw.split(SEPARATOR))
    }

    fn from_fragments<'a>(fragments: impl Iterator<Item = &'a str>) -> Self {
        let joined = fragments
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect::<Vec<_>>()
            .join("&");
        Self(joined)
    }

    /// Append a fragment after the existing ones.
    ///
    /// `"" + "waterlogged=true"` is `"waterlogged=true"`, never `"&waterlogged=true"`.
    pub fn join(&self, fragment: &str) -> StateString {
        Self::from_fragments(self.fragments().chain(fragment.split(SEPARATOR)))
    }

    /// Iterate the `key=value` fragments in order.
    pub fn fragments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|f| !f.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateString {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for StateString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_onto_empty_state() {
        let joined = StateString::empty().join("waterlogged=true");
        assert_eq!(joined.as_str(), "waterlogged=true");
    }

    #[test]
    fn test_join_keeps_existing_first() {
        let state = StateString::new("half=top&facing=north");
        assert_eq!(
            state.join("waterlogged=true").as_str(),
            "half=top&facing=north&waterlogged=true"
        );
    }

    #[test]
    fn test_join_drops_empty_fragments() {
        let state = StateString::new("&half=bottom&&");
        assert_eq!(state.as_str(), "half=bottom");
        assert_eq!(state.join("").as_str(), "half=bottom");
        assert_eq!(state.join("&").as_str(), "half=bottom");
    }

    #[test]
    fn test_fragments() {
        let state = StateString::new("a=1&b=2");
        assert_eq!(state.fragments().collect::<Vec<_>>(), vec!["a=1", "b=2"]);
        assert_eq!(StateString::empty().fragments().count(), 0);
        assert!(StateString::empty().is_empty());
    }
}

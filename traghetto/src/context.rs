use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Attribute key of a context: one relative offset in one of the two windows.
///
/// Negative offsets address the left context, positive offsets the right
/// context, and `0` the current position.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Attribute {
    /// A lexical token at the given relative offset.
    Word(i8),

    /// A tag label at the given relative offset.
    Tag(i8),
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Word(offset) => write!(f, "word[{}]", offset),
            Self::Tag(offset) => write!(f, "tag[{}]", offset),
        }
    }
}

/// Windowed evidence surrounding a classification target.
///
/// A context consists of two independent windows keyed by relative offset: a
/// word window holding lexical tokens and a tag window holding tag labels.
/// Offset contiguity is not required; a missing offset simply means there is
/// no evidence at that position.
///
/// # Examples
///
/// ```
/// use traghetto::Context;
///
/// let context = Context::new()
///     .with_word(0, "dog".to_string())
///     .with_tag(-1, "DT".to_string());
/// assert_eq!(Some(&"dog".to_string()), context.word(0));
/// assert_eq!(None, context.tag(1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context<V> {
    word_window: BTreeMap<i8, V>,
    tag_window: BTreeMap<i8, V>,
}

impl<V> Default for Context<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> Context<V> {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self {
            word_window: BTreeMap::new(),
            tag_window: BTreeMap::new(),
        }
    }

    /// Sets the word at the given relative offset, replacing any previous one.
    pub fn set_word(&mut self, offset: i8, value: V) {
        self.word_window.insert(offset, value);
    }

    /// Sets the tag at the given relative offset, replacing any previous one.
    pub fn set_tag(&mut self, offset: i8, value: V) {
        self.tag_window.insert(offset, value);
    }

    /// Sets the word at the given relative offset and returns the context.
    #[must_use]
    pub fn with_word(mut self, offset: i8, value: V) -> Self {
        self.set_word(offset, value);
        self
    }

    /// Sets the tag at the given relative offset and returns the context.
    #[must_use]
    pub fn with_tag(mut self, offset: i8, value: V) -> Self {
        self.set_tag(offset, value);
        self
    }

    /// Gets the word at the given relative offset.
    pub fn word(&self, offset: i8) -> Option<&V> {
        self.word_window.get(&offset)
    }

    /// Gets the tag at the given relative offset.
    pub fn tag(&self, offset: i8) -> Option<&V> {
        self.tag_window.get(&offset)
    }

    /// Checks whether both windows are empty.
    pub fn is_empty(&self) -> bool {
        self.word_window.is_empty() && self.tag_window.is_empty()
    }

    /// Iterates over all attribute/value pairs of both windows.
    ///
    /// The order is deterministic: the word window first, then the tag window,
    /// offsets ascending within each.
    pub fn attributes(&self) -> impl Iterator<Item = (Attribute, &V)> {
        self.word_window
            .iter()
            .map(|(&offset, value)| (Attribute::Word(offset), value))
            .chain(
                self.tag_window
                    .iter()
                    .map(|(&offset, value)| (Attribute::Tag(offset), value)),
            )
    }

    pub(crate) fn word_window(&self) -> &BTreeMap<i8, V> {
        &self.word_window
    }

    pub(crate) fn tag_window(&self) -> &BTreeMap<i8, V> {
        &self.tag_window
    }
}

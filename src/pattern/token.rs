// src/pattern/token.rs

use std::collections::BTreeSet;

use super::SEPARATOR;

/// A single unit of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Exactly this character.
    Literal(char),
    /// The path separator `/`.
    Separator,
    /// `?`: exactly one non-separator character.
    SingleWildcard,
    /// `*`: zero or more non-separator characters.
    AnyWildcard,
    /// `**`: zero or more whole path segments.
    AnyDirectories,
    /// `[...]` / `[^...]`: one character from a set.
    Group(CharGroup),
}

/// Payload of a [`Token::Group`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharGroup {
    pub negated: bool,
    pub chars: BTreeSet<char>,
    /// Inclusive `(low, high)` pairs in pattern order.
    pub ranges: Vec<(char, char)>,
}

impl CharGroup {
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty() && self.ranges.is_empty()
    }

    /// Whether `c` is accepted by this group. A group never matches the
    /// separator, negated or not.
    pub fn matches(&self, c: char) -> bool {
        if c == SEPARATOR {
            return false;
        }

        let hit = self.chars.contains(&c)
            || self.ranges.iter().any(|&(lo, hi)| lo <= c && c <= hi);

        hit != self.negated
    }
}

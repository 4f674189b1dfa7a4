// src/pattern/mod.rs

//! Extended glob patterns for path names relative to some root.
//!
//! The language is conventional glob syntax plus a directory wildcard:
//!
//! ```text
//! pattern = segment { "/" segment }
//! segment = "**" | { literal | "?" | "*" | group | escaped }
//! group   = "[" [ "^" ] { member | member "-" member } "]"
//! member  = literal | escaped
//! escaped = "\" <any character>
//! ```
//!
//! - `*` matches any run of non-separator characters, including none.
//! - `?` matches exactly one non-separator character.
//! - `**` as a whole segment matches zero or more whole directories.
//! - `[...]` / `[^...]` match one character from (or not from) a set.
//! - `\` takes the next character literally.
//!
//! The separator is always `/`, whatever the host uses. Matching works on
//! Unicode code points.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

mod compiler;
pub mod glob;
mod matcher;
pub mod token;

pub use glob::enumerate;
pub use token::{CharGroup, Token};

pub const SEPARATOR: char = '/';
pub const SINGLE_WILDCARD: char = '?';
pub const ANY_WILDCARD: char = '*';
pub const ESCAPE: char = '\\';
pub const GROUP_OPEN: char = '[';
pub const GROUP_CLOSE: char = ']';
pub const GROUP_NEGATE: char = '^';
pub const GROUP_RANGE: char = '-';

/// Why a pattern failed to compile.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternErrorKind {
    #[error("unexpected `//`")]
    DoubleSeparator,
    #[error("`{0}` cannot follow the preceding wildcard")]
    AmbiguousWildcard(char),
    #[error("unexpected `{0}` after `**`")]
    MalformedRecursiveWildcard(char),
    #[error("`**` must make up a whole path segment")]
    RecursiveWildcardInSegment,
    #[error("escape at end of pattern")]
    DanglingEscape,
    #[error("unterminated character group")]
    UnterminatedGroup,
    #[error("empty character group")]
    EmptyGroup,
    #[error("unexpected `]` outside of a character group")]
    UnexpectedGroupClose,
    #[error("`-` without a range start")]
    RangeWithoutStart,
    #[error("range without an end")]
    RangeWithoutEnd,
    #[error("range `{0}-{1}` is inverted")]
    InvertedRange(char, char),
}

/// A malformed pattern. `position` counts code points from the start.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at position {position}")]
pub struct PatternError {
    pub position: usize,
    pub kind: PatternErrorKind,
}

/// A compiled pattern.
///
/// Immutable once built, so a single instance can be shared (e.g. behind an
/// `Arc`) by any number of concurrent matchers.
#[derive(Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Compile `pattern`, failing fast on the first malformed construct.
    pub fn new(pattern: &str) -> Result<Self, PatternError> {
        let tokens = compiler::compile(pattern)?;
        Ok(Self {
            source: pattern.to_string(),
            tokens,
        })
    }

    /// Whether `path` (relative, `/`-separated) matches this pattern in full.
    pub fn matches(&self, path: &str) -> bool {
        matcher::match_tokens(&self.tokens, path)
    }

    /// The pattern text this was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pattern::new(s)
    }
}

/// Convenience alias for [`Pattern::new`].
pub fn compile(pattern: &str) -> Result<Pattern, PatternError> {
    Pattern::new(pattern)
}

/// Convenience alias for [`Pattern::matches`].
pub fn matches(pattern: &Pattern, path: &str) -> bool {
    pattern.matches(path)
}

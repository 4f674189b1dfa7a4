// src/pattern/compiler.rs

//! Single pass, one-token-lookahead compiler from pattern text to tokens.

use super::token::{CharGroup, Token};
use super::{
    ANY_WILDCARD, ESCAPE, GROUP_CLOSE, GROUP_NEGATE, GROUP_OPEN, GROUP_RANGE,
    PatternError, PatternErrorKind, SEPARATOR, SINGLE_WILDCARD,
};

pub(super) fn compile(pattern: &str) -> Result<Vec<Token>, PatternError> {
    Compiler::new(pattern).run()
}

struct Compiler {
    chars: Vec<char>,
    /// Index of the next unread character.
    pos: usize,
    tokens: Vec<Token>,
}

impl Compiler {
    fn new(pattern: &str) -> Self {
        Self {
            chars: pattern.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Token>, PatternError> {
        while let Some(c) = self.bump() {
            let at = self.pos - 1;

            let token = match c {
                SEPARATOR => {
                    if self.last() == Some(&Token::Separator) {
                        return Err(error(at, PatternErrorKind::DoubleSeparator));
                    }
                    Token::Separator
                }
                SINGLE_WILDCARD => {
                    if matches!(
                        self.last(),
                        Some(Token::AnyWildcard | Token::AnyDirectories)
                    ) {
                        return Err(error(at, PatternErrorKind::AmbiguousWildcard(c)));
                    }
                    Token::SingleWildcard
                }
                ANY_WILDCARD => self.star(at)?,
                ESCAPE => Token::Literal(self.escaped(at)?),
                GROUP_OPEN => Token::Group(self.group(at)?),
                GROUP_CLOSE => return Err(error(at, PatternErrorKind::UnexpectedGroupClose)),
                other => Token::Literal(other),
            };

            self.tokens.push(token);
        }

        Ok(self.tokens)
    }

    /// `*` or, when doubled at a segment boundary, `**`.
    fn star(&mut self, at: usize) -> Result<Token, PatternError> {
        if matches!(
            self.last(),
            Some(Token::SingleWildcard | Token::AnyDirectories)
        ) {
            return Err(error(at, PatternErrorKind::AmbiguousWildcard(ANY_WILDCARD)));
        }

        if self.peek() != Some(ANY_WILDCARD) {
            return Ok(Token::AnyWildcard);
        }
        self.bump();

        if let Some(next) = self.peek() {
            if next != SEPARATOR {
                return Err(error(
                    self.pos,
                    PatternErrorKind::MalformedRecursiveWildcard(next),
                ));
            }
        }

        if !matches!(self.last(), None | Some(Token::Separator)) {
            return Err(error(at, PatternErrorKind::RecursiveWildcardInSegment));
        }

        Ok(Token::AnyDirectories)
    }

    /// Character following an escape, taken verbatim.
    fn escaped(&mut self, at: usize) -> Result<char, PatternError> {
        self.bump()
            .ok_or_else(|| error(at, PatternErrorKind::DanglingEscape))
    }

    /// Body of a `[...]` group; the opening bracket is already consumed.
    fn group(&mut self, open: usize) -> Result<CharGroup, PatternError> {
        let mut group = CharGroup::default();

        if self.peek() == Some(GROUP_NEGATE) {
            self.bump();
            group.negated = true;
        }

        loop {
            let c = self
                .bump()
                .ok_or_else(|| error(open, PatternErrorKind::UnterminatedGroup))?;
            let at = self.pos - 1;

            let low = match c {
                GROUP_CLOSE if group.is_empty() => {
                    return Err(error(open, PatternErrorKind::EmptyGroup));
                }
                GROUP_CLOSE => return Ok(group),
                GROUP_RANGE => return Err(error(at, PatternErrorKind::RangeWithoutStart)),
                ESCAPE => self.escaped(at)?,
                other => other,
            };

            if self.peek() != Some(GROUP_RANGE) {
                group.chars.insert(low);
                continue;
            }
            self.bump();

            let high = match self.bump() {
                Some(ESCAPE) => self.escaped(self.pos - 1)?,
                Some(c) if c != GROUP_CLOSE && c != GROUP_RANGE => c,
                _ => return Err(error(at, PatternErrorKind::RangeWithoutEnd)),
            };

            if low > high {
                return Err(error(at, PatternErrorKind::InvertedRange(low, high)));
            }
            group.ranges.push((low, high));
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.get(self.pos).copied()?;
        self.pos += 1;
        Some(c)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn last(&self) -> Option<&Token> {
        self.tokens.last()
    }
}

fn error(position: usize, kind: PatternErrorKind) -> PatternError {
    PatternError { position, kind }
}

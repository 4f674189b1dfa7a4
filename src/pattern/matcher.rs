// src/pattern/matcher.rs

//! Backtracking matcher over compiled tokens.
//!
//! Matching is anchored at both ends and walks the path one code point at a
//! time. `*` and `**` try the shortest consumption first and grow on failure.
//! Runtime is exponential in the number of wildcards for adversarial inputs;
//! real watch patterns stay far away from that.

use super::SEPARATOR;
use super::token::Token;

pub(super) fn match_tokens(mut tokens: &[Token], mut path: &str) -> bool {
    loop {
        let Some(c) = path.chars().next() else {
            // Only a lone trailing `*` can still match the empty remainder.
            return matches!(tokens, [] | [Token::AnyWildcard]);
        };
        let Some(token) = tokens.first() else {
            return false;
        };
        let rest = &path[c.len_utf8()..];

        match token {
            Token::Literal(l) if c != *l => return false,
            Token::Separator if c != SEPARATOR => return false,
            Token::SingleWildcard if c == SEPARATOR => return false,
            Token::Group(group) if !group.matches(c) => return false,
            Token::AnyWildcard => {
                if match_tokens(&tokens[1..], path) {
                    return true;
                }
                if c == SEPARATOR {
                    return false;
                }
                path = rest;
                continue;
            }
            Token::AnyDirectories => {
                let after = after_recursive(tokens);
                if match_tokens(after, path) {
                    return true;
                }
                match path.find(SEPARATOR) {
                    // Swallow one whole segment and try `**` again.
                    Some(idx) => {
                        path = &path[idx + 1..];
                        continue;
                    }
                    // Out of segments: only a bare trailing `**` is satisfied.
                    None => return matches!(tokens, [Token::AnyDirectories]),
                }
            }
            _ => {}
        }

        tokens = &tokens[1..];
        path = rest;
    }
}

/// Tokens following a leading `**`, skipping the separator that closes its
/// segment.
fn after_recursive(tokens: &[Token]) -> &[Token] {
    match tokens {
        [Token::AnyDirectories, Token::Separator, rest @ ..] => rest,
        [_, rest @ ..] => rest,
        [] => tokens,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::Pattern;

    fn m(pattern: &str, path: &str) -> bool {
        let pattern = Pattern::new(pattern).unwrap();
        match_tokens(pattern.tokens(), path)
    }

    #[test]
    fn anchored_at_both_ends() {
        assert!(m("foo/bar.go", "foo/bar.go"));
        assert!(!m("foo/bar.go", "foo/bar.go/x"));
        assert!(!m("bar.go", "foo/bar.go"));
    }

    #[test]
    fn single_wildcard_never_crosses_separator() {
        assert!(m("foo/m?.go", "foo/ma.go"));
        assert!(!m("foo/m?.go", "foo/m/"));
        assert!(!m("a?b", "a/b"));
    }

    #[test]
    fn any_wildcard_matches_empty_tail() {
        assert!(m("a*", "a"));
        assert!(m("a*", "abc"));
        assert!(!m("a*", "ab/c"));
        assert!(m("*x", "xxx"));
    }

    #[test]
    fn recursive_wildcard_matches_zero_or_more_segments() {
        for path in ["m.go", "a/m.go", "a/b/m.go"] {
            assert!(m("**/m.go", path), "{path}");
        }
        assert!(!m("**/m.go", "m.go.bak"));
        assert!(!m("**/m.go", "a/am.go"));
    }

    #[test]
    fn trailing_recursive_wildcard_matches_nested_files() {
        assert!(m("src/**", "src/lib.rs"));
        assert!(m("src/**", "src/a/b/lib.rs"));
        assert!(!m("src/**", "src"));
        assert!(!m("src/**", "other/lib.rs"));
    }

    #[test]
    fn trailing_separator_after_recursive_wildcard_is_required() {
        assert!(!m("**/", "x"));
        assert!(!m("src/**/", "src/lib.rs"));
        assert!(!m("a/**/", "a/b/c"));
        assert!(m("a/**/*", "a/b/c"));
    }

    #[test]
    fn recursive_wildcard_in_the_middle() {
        assert!(m("a/**/z", "a/z"));
        assert!(m("a/**/z", "a/b/c/z"));
        assert!(!m("a/**/z", "a/b/c/zz"));
    }
}

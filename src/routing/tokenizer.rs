//! Path tokenization.
//!
//! # Responsibilities
//! - Split a path into alternating separator and segment tokens
//! - Report whether the path ends in a separator (trailing wildcard)
//!
//! # Design Decisions
//! - The separator is a token of its own so every trie node maps to exactly one token
//! - No collapsing of empty segments: `"//"` yields two separator tokens
//! - Tokens borrow from the input; concatenating them reproduces it

/// Path separator, matched as a literal token.
pub const SEPARATOR: char = '/';

/// Prefix marking a named-parameter segment in a pattern.
pub const PARAM_PREFIX: char = ':';

/// Result of tokenizing a path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tokens<'a> {
    /// Ordered tokens, each either `"/"` or a non-empty segment.
    pub tokens: Vec<&'a str>,
    /// True when the last token is a separator.
    pub wildcard: bool,
}

impl<'a> Tokens<'a> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.tokens.iter().copied()
    }
}

/// Split `path` into tokens.
pub fn tokenize(path: &str) -> Tokens<'_> {
    let mut tokens = Vec::new();
    let mut start = 0;

    for (index, ch) in path.char_indices() {
        if ch == SEPARATOR {
            if index > start {
                tokens.push(&path[start..index]);
            }
            let end = index + ch.len_utf8();
            tokens.push(&path[index..end]);
            start = end;
        }
    }

    if start < path.len() {
        tokens.push(&path[start..]);
    }

    let wildcard = tokens.last().is_some_and(|t| is_separator(t));
    Tokens { tokens, wildcard }
}

/// True if `token` is the separator token.
pub fn is_separator(token: &str) -> bool {
    token.len() == SEPARATOR.len_utf8() && token.starts_with(SEPARATOR)
}

/// Parameter name for a named-parameter pattern token, or `None` for literals.
///
/// Strips the `:` prefix and any trailing separator decoration.
pub fn param_name(token: &str) -> Option<&str> {
    let name = token.strip_prefix(PARAM_PREFIX)?;
    Some(name.trim_end_matches(SEPARATOR))
}

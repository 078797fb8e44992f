//! Symbol types and utilities for context-free grammars.
//!
//! Symbol names are opaque non-empty strings. Whether a name denotes a
//! terminal or a nonterminal is decided by the grammar: a name is a
//! terminal iff it never appears as the left-hand side of any rule.

use std::cmp::Ordering;
use std::fmt;

/// The empty string, written `ε` in rule text (the loader also accepts `''`).
pub const EPSILON: &str = "ε";

/// The end-of-input marker. Never appears in a rule's right-hand side.
pub const END_MARKER: &str = "$";

/// A classified symbol in a context-free grammar.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A terminal symbol (atomic input token)
    Terminal(String),
    /// A nonterminal symbol (rewritable grammar variable)
    Nonterminal(String),
}

impl Symbol {
    /// Returns the symbol's name.
    pub fn name(&self) -> &str {
        match self {
            Symbol::Terminal(name) | Symbol::Nonterminal(name) => name,
        }
    }

    /// Checks if this symbol is a terminal.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Symbol::Terminal(_))
    }

    /// Checks if this symbol is a nonterminal.
    #[inline]
    pub const fn is_nonterminal(&self) -> bool {
        matches!(self, Symbol::Nonterminal(_))
    }

    /// Checks if this symbol is epsilon (ε).
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Terminal(name) if name == EPSILON)
    }

    /// Checks if this symbol is the end marker ($).
    pub fn is_end_marker(&self) -> bool {
        matches!(self, Symbol::Terminal(name) if name == END_MARKER)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Custom ordering for symbols to ensure consistent serialisation.
///
/// Order: terminals before nonterminals, then lexicographic by name.
impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Symbol::Terminal(a), Symbol::Terminal(b)) => a.cmp(b),
            (Symbol::Terminal(_), Symbol::Nonterminal(_)) => Ordering::Less,
            (Symbol::Nonterminal(_), Symbol::Terminal(_)) => Ordering::Greater,
            (Symbol::Nonterminal(a), Symbol::Nonterminal(b)) => a.cmp(b),
        }
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Normalises a raw rule token: strips one pair of balanced single quotes
/// (`'x'` → `x`) and maps both `''` and `ε` to [`EPSILON`].
pub fn normalize(token: &str) -> String {
    let token = token.trim();
    if token == "''" || token == EPSILON {
        return EPSILON.to_string();
    }
    if token.len() >= 2 && token.starts_with('\'') && token.ends_with('\'') {
        return token[1..token.len() - 1].to_string();
    }
    token.to_string()
}

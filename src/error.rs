//! Error types for the grammar toolkit.

use thiserror::Error;

/// Errors that can occur during grammar loading, table construction, and
/// parsing.
#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("empty grammar input")]
    EmptyGrammar,

    #[error("LL(1) conflict at M[{nonterminal}, {terminal}]:\n  {existing}\n  {candidate}")]
    LL1Conflict {
        nonterminal: String,
        terminal: String,
        existing: String,
        candidate: String,
    },

    #[error("LR(1) conflict at ACTION[{state}, {terminal}]: {existing} vs {candidate}")]
    LR1Conflict {
        state: usize,
        terminal: String,
        existing: String,
        candidate: String,
    },

    #[error("unknown token '{0}'")]
    UnknownToken(String),

    #[error("expected '{expected}' but found '{found}'")]
    UnexpectedToken { expected: String, found: String },

    #[error("no rule for {nonterminal} with lookahead '{lookahead}'")]
    NoRule {
        nonterminal: String,
        lookahead: String,
    },

    #[error("parse error in state {state} with lookahead '{lookahead}'")]
    ParseError { state: usize, lookahead: String },

    #[error("undefined GOTO from state {state} on {nonterminal}")]
    MissingGoto { state: usize, nonterminal: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results in this crate.
pub type Result<T> = std::result::Result<T, GrammarError>;

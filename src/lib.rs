//! Grammar analysis toolkit
//!
//! A library for analysing context-free grammars: FIRST/FOLLOW set
//! computation, LL(1) predictive tables, the LR(1) canonical-collection
//! automaton (with an equivalent item-NFA view), ACTION/GOTO table
//! synthesis with conflict detection, and table-driven LL(1)/LR(1)
//! parsers that emit step-by-step derivation traces.

pub mod cli;
pub mod error;
pub mod first_follow;
pub mod grammar;
pub mod ll1;
pub mod lr1;
pub mod nfa;
pub mod symbol;
pub mod trace;

// Re-export commonly used types
pub use error::{GrammarError, Result};
pub use grammar::{Grammar, Production};
pub use ll1::LL1Parser;
pub use lr1::{Action, ItemSet, LR1Parser, Lr1Automaton, Lr1Item};
pub use nfa::ItemNfa;
pub use symbol::{END_MARKER, EPSILON, Symbol};
pub use trace::{Trace, TraceStep};

//! Grammar analysis toolkit
//!
//! Computes FIRST/FOLLOW sets, LL(1) predictive tables, and LR(1)
//! canonical automata with ACTION/GOTO tables for a context-free grammar,
//! then drives step-by-step LL(1) and LR(1) parses of a token stream.

use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = grammar_lab::cli::run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

//! FIRST and FOLLOW set computation for context-free grammars.
//!
//! Both computations are monotone fixed points over finite sets of symbol
//! names; cyclic and self-referential grammars converge without any
//! explicit cycle handling.

use crate::grammar::Grammar;
use crate::symbol::{END_MARKER, EPSILON};
use log::debug;
use std::collections::{HashMap, HashSet};

/// FIRST sets keyed by symbol name. Terminal names map to themselves so
/// that [`first_of_string`] needs no grammar access; nonterminal entries
/// may contain `ε`.
pub type FirstSets = HashMap<String, HashSet<String>>;

/// FOLLOW sets keyed by nonterminal name. Never contain `ε`.
pub type FollowSets = HashMap<String, HashSet<String>>;

/// Computes the FIRST sets for all symbols in the grammar.
///
/// # Algorithm
/// Initialise FIRST(A) = ∅ for every nonterminal, FIRST(t) = {t} for every
/// terminal. Iterate to fixed point: for each production A → X₁X₂…Xₙ,
/// union FIRST of the right-hand-side sequence into FIRST(A).
pub fn compute_first_sets(grammar: &Grammar) -> FirstSets {
    let mut first_sets = FirstSets::new();

    for terminal in grammar.terminals() {
        first_sets.insert(terminal.clone(), HashSet::from([terminal.clone()]));
    }
    first_sets.insert(EPSILON.to_string(), HashSet::from([EPSILON.to_string()]));
    first_sets.insert(
        END_MARKER.to_string(),
        HashSet::from([END_MARKER.to_string()]),
    );
    for nonterminal in grammar.nonterminals() {
        first_sets.insert(nonterminal.clone(), HashSet::new());
    }

    let mut rounds = 0usize;
    let mut changed = true;
    while changed {
        changed = false;
        rounds += 1;

        for production in grammar.all_productions() {
            let rhs_first = first_of_string(&first_sets, &production.rhs);
            let first = first_sets
                .get_mut(&production.lhs)
                .expect("every LHS is a seeded nonterminal");
            for name in rhs_first {
                if first.insert(name) {
                    changed = true;
                }
            }
        }
    }
    debug!("FIRST converged after {rounds} rounds");

    first_sets
}

/// Computes FIRST of a sequence of symbol names, left to right.
///
/// Adds FIRST(Xᵢ)\{ε} and stops at the first non-nullable Xᵢ; if every Xᵢ
/// is nullable (or the sequence is empty), ε is included. A name missing
/// from the map is treated as a terminal literal.
pub fn first_of_string(first_sets: &FirstSets, symbols: &[String]) -> HashSet<String> {
    let mut result = HashSet::new();
    let mut nullable = true;

    for name in symbols {
        match first_sets.get(name) {
            Some(first) => {
                result.extend(first.iter().filter(|s| *s != EPSILON).cloned());
                if !first.contains(EPSILON) {
                    nullable = false;
                    break;
                }
            }
            None => {
                result.insert(name.clone());
                nullable = false;
                break;
            }
        }
    }

    if nullable {
        result.insert(EPSILON.to_string());
    }

    result
}

/// Computes the FOLLOW sets for all nonterminals in the grammar.
///
/// # Algorithm
/// Initialise FOLLOW(S) = {$}, all others ∅. Iterate to fixed point over
/// productions B → X₁…Xₙ: for each nonterminal Xᵢ with tail γ = Xᵢ₊₁…Xₙ,
/// add FIRST(γ)\{ε} to FOLLOW(Xᵢ); if γ is empty or ε ∈ FIRST(γ), add
/// FOLLOW(B) as well.
pub fn compute_follow_sets(grammar: &Grammar, first_sets: &FirstSets) -> FollowSets {
    let mut follow_sets: FollowSets = grammar
        .nonterminals()
        .iter()
        .map(|nt| (nt.clone(), HashSet::new()))
        .collect();

    if let Some(start) = follow_sets.get_mut(grammar.start_symbol()) {
        start.insert(END_MARKER.to_string());
    }

    let mut rounds = 0usize;
    let mut changed = true;
    while changed {
        changed = false;
        rounds += 1;

        for production in grammar.all_productions() {
            for (i, name) in production.rhs.iter().enumerate() {
                if !grammar.is_nonterminal(name) {
                    continue;
                }

                let beta = &production.rhs[i + 1..];
                let first_beta = first_of_string(first_sets, beta);
                let inherited = if beta.is_empty() || first_beta.contains(EPSILON) {
                    follow_sets
                        .get(&production.lhs)
                        .cloned()
                        .unwrap_or_default()
                } else {
                    HashSet::new()
                };

                let follow = follow_sets
                    .get_mut(name)
                    .expect("every nonterminal is seeded");
                for sym in first_beta {
                    if sym != EPSILON && follow.insert(sym) {
                        changed = true;
                    }
                }
                for sym in inherited {
                    if follow.insert(sym) {
                        changed = true;
                    }
                }
            }
        }
    }
    debug!("FOLLOW converged after {rounds} rounds");

    follow_sets
}

//! Unit tests for the LL(1) table builder and driver

use grammar_lab::error::GrammarError;
use grammar_lab::first_follow::{compute_first_sets, compute_follow_sets};
use grammar_lab::grammar::Grammar;
use grammar_lab::ll1::LL1Parser;

const ARITHMETIC: &str = "\
E  -> T E'
E' -> '+' T E' | ε
T  -> F T'
T' -> '*' F T' | ''
F  -> '(' E ')' | id
";

fn build(text: &str) -> Result<LL1Parser, GrammarError> {
    let grammar = Grammar::from_text(text).unwrap();
    let first_sets = compute_first_sets(&grammar);
    let follow_sets = compute_follow_sets(&grammar, &first_sets);
    LL1Parser::build(grammar, &first_sets, &follow_sets)
}

#[test]
fn test_arithmetic_table_cells() {
    let parser = build(ARITHMETIC).unwrap();
    let table = parser.table();

    let cell = |nt: &str, t: &str| table.get(&(nt.to_string(), t.to_string()));

    assert_eq!(
        cell("E", "id"),
        Some(&vec!["T".to_string(), "E'".to_string()])
    );
    // ε-cells hold the empty RHS, registered on FOLLOW members
    assert_eq!(cell("E'", ")"), Some(&vec![]));
    assert_eq!(cell("E'", "$"), Some(&vec![]));
    assert_eq!(cell("T'", "+"), Some(&vec![]));
    // no entry means error
    assert_eq!(cell("E", "+"), None);
}

#[test]
fn test_arithmetic_accepts_and_traces() {
    let parser = build(ARITHMETIC).unwrap();
    let trace = parser.parse("id + id * id");

    assert!(trace.accepted());
    assert_eq!(trace.steps[0].action, "E → T E'");
    assert_eq!(trace.steps[0].stack, "$ E");
    assert_eq!(trace.steps[0].input, "id + id * id $");

    let n = trace.steps.len();
    assert_eq!(trace.steps[n - 1].action, "accept");
    assert_eq!(trace.steps[n - 2].action, "Match $");
    assert_eq!(trace.steps[n - 3].action, "E' → ε");
    assert_eq!(trace.steps[n - 4].action, "T' → ε");
}

#[test]
fn test_arithmetic_rejects() {
    let parser = build(ARITHMETIC).unwrap();
    assert!(!parser.parse("id +").accepted());
    assert!(!parser.parse("+ id").accepted());
    assert!(!parser.parse("( id").accepted());
    assert!(parser.parse("( id + id ) * id").accepted());
}

#[test]
fn test_partial_trace_preserved_on_failure() {
    let parser = build(ARITHMETIC).unwrap();
    let trace = parser.parse("id +");

    assert!(!trace.accepted());
    // the failing configuration is the last recorded step
    assert_eq!(trace.steps.last().unwrap().action, "error");
    assert!(trace.steps.len() > 1);
    assert!(matches!(
        trace.result,
        Err(GrammarError::NoRule { .. })
    ));
}

#[test]
fn test_unknown_token_rejected_before_driving() {
    let parser = build(ARITHMETIC).unwrap();
    let trace = parser.parse("id + mystery");

    assert!(trace.steps.is_empty());
    assert!(matches!(
        trace.result,
        Err(GrammarError::UnknownToken(ref t)) if t == "mystery"
    ));
}

#[test]
fn test_non_ll1_grammar_conflict_cell() {
    // A a and d c both start with d; b A c and b d a both start with b.
    // Productions are processed in textual order, so (S, d) trips first.
    let result = build("S -> A a | b A c | d c | b d a\nA -> d");
    match result {
        Err(GrammarError::LL1Conflict {
            nonterminal,
            terminal,
            existing,
            candidate,
        }) => {
            assert_eq!(nonterminal, "S");
            assert_eq!(terminal, "d");
            assert_eq!(existing, "S → A a");
            assert_eq!(candidate, "S → d c");
        }
        other => panic!("expected LL(1) conflict, got {other:?}"),
    }
}

#[test]
fn test_left_recursion_is_conflict() {
    assert!(matches!(
        build("S -> S '+' T | T\nT -> i"),
        Err(GrammarError::LL1Conflict { .. })
    ));
}

#[test]
fn test_nullable_chain_accepts_empty_input() {
    let parser = build("S -> A B\nA -> a | ε\nB -> b | ε").unwrap();
    let trace = parser.parse("");

    assert!(trace.accepted());
    let actions: Vec<&str> = trace.steps.iter().map(|s| s.action.as_str()).collect();
    assert_eq!(actions, vec!["S → A B", "A → ε", "B → ε", "Match $", "accept"]);
}

#[test]
fn test_epsilon_only_grammar() {
    let parser = build("S -> ε").unwrap();
    assert!(parser.parse("").accepted());
    assert!(!parser.parse("x").accepted());
}

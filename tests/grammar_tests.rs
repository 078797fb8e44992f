//! Unit tests for the grammar loader

use grammar_lab::grammar::{Grammar, Production};

const ARITHMETIC: &str = "\
# classic LL(1) expression grammar
E  -> T E'
E' -> '+' T E' | ε
T  -> F T'
T' -> '*' F T' | ''
F  -> '(' E ')' | id
";

#[test]
fn test_load_arithmetic_grammar() {
    let grammar = Grammar::from_text(ARITHMETIC).unwrap();

    assert_eq!(grammar.start_symbol(), "E");
    assert_eq!(grammar.all_productions().len(), 8);
    assert_eq!(grammar.nonterminals().len(), 5);
    for nt in ["E", "E'", "T", "T'", "F"] {
        assert!(grammar.nonterminals().contains(nt), "missing {nt}");
    }
    for t in ["+", "*", "(", ")", "id", "$"] {
        assert!(grammar.terminals().contains(t), "missing {t}");
    }
}

#[test]
fn test_comments_and_blank_lines_ignored() {
    let grammar = Grammar::from_text("# header\n\nS -> a\n\n# trailer\n").unwrap();
    assert_eq!(grammar.all_productions().len(), 1);
    assert_eq!(grammar.rules().len(), 1);
}

#[test]
fn test_malformed_line_skipped() {
    let grammar = Grammar::from_text("S -> a\nnot a rule\nS -> b\n").unwrap();
    // the malformed line is reported and skipped, loading continues
    assert_eq!(grammar.all_productions().len(), 2);
    assert_eq!(grammar.get_productions("S").len(), 2);
}

#[test]
fn test_quoted_and_bare_terminals_coincide() {
    let grammar = Grammar::from_text("S -> '+' a | + b").unwrap();
    assert!(grammar.terminals().contains("+"));
    let productions = grammar.get_productions("S");
    assert_eq!(productions[0].rhs[0], "+");
    assert_eq!(productions[1].rhs[0], "+");
}

#[test]
fn test_both_epsilon_spellings() {
    let grammar = Grammar::from_text("S -> a | ε\nT -> b | ''").unwrap();
    assert_eq!(grammar.get_productions("S")[1].rhs.len(), 0);
    assert_eq!(grammar.get_productions("T")[1].rhs.len(), 0);
}

#[test]
fn test_terminal_inference_with_forward_reference() {
    // A is used before its defining rule; it must still be a nonterminal
    let grammar = Grammar::from_text("S -> A a\nA -> b").unwrap();
    assert!(grammar.nonterminals().contains("A"));
    assert!(!grammar.terminals().contains("A"));
    assert!(grammar.terminals().contains("a"));
    assert!(grammar.terminals().contains("b"));
}

#[test]
fn test_start_symbol_is_first_rule_lhs() {
    let grammar = Grammar::from_text("T -> b\nS -> a").unwrap();
    assert_eq!(grammar.start_symbol(), "T");
}

#[test]
fn test_end_marker_in_terminals() {
    let grammar = Grammar::from_text("S -> a").unwrap();
    assert!(grammar.terminals().contains("$"));
    assert!(!grammar.nonterminals().contains("$"));
}

#[test]
fn test_augmented_start_avoids_collisions() {
    let grammar = Grammar::from_text("S -> a").unwrap();
    assert_eq!(grammar.augmented_start(), "S'");

    let primed = Grammar::from_text("S -> S' a\nS' -> b").unwrap();
    assert_eq!(primed.augmented_start(), "S''");
}

#[test]
fn test_production_display() {
    assert_eq!(
        Production::new("E", vec!["T".to_string(), "E'".to_string()]).to_string(),
        "E → T E'"
    );
    assert_eq!(Production::new("E'", vec![]).to_string(), "E' → ε");
}

#[test]
fn test_productions_kept_in_textual_order() {
    let grammar = Grammar::from_text("S -> b | a\nS -> c").unwrap();
    let rhs: Vec<String> = grammar
        .all_productions()
        .iter()
        .map(|p| p.rhs_display())
        .collect();
    assert_eq!(rhs, vec!["b", "a", "c"]);
}

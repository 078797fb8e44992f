//! Unit tests for the symbol model and token normalisation

use grammar_lab::symbol::{END_MARKER, EPSILON, Symbol, normalize};

#[test]
fn test_normalize_strips_quotes() {
    assert_eq!(normalize("'+'"), "+");
    assert_eq!(normalize("'id'"), "id");
    assert_eq!(normalize("id"), "id");
}

#[test]
fn test_normalize_epsilon_forms() {
    assert_eq!(normalize("''"), EPSILON);
    assert_eq!(normalize("ε"), EPSILON);
}

#[test]
fn test_normalize_trims_whitespace() {
    assert_eq!(normalize("  E'  "), "E'");
}

#[test]
fn test_symbol_accessors() {
    let terminal = Symbol::Terminal("id".to_string());
    let nonterminal = Symbol::Nonterminal("E".to_string());

    assert!(terminal.is_terminal());
    assert!(!terminal.is_nonterminal());
    assert!(nonterminal.is_nonterminal());
    assert_eq!(terminal.name(), "id");
    assert_eq!(nonterminal.to_string(), "E");
}

#[test]
fn test_reserved_symbols() {
    assert!(Symbol::Terminal(EPSILON.to_string()).is_epsilon());
    assert!(Symbol::Terminal(END_MARKER.to_string()).is_end_marker());
    assert!(!Symbol::Terminal("a".to_string()).is_epsilon());
}

#[test]
fn test_symbol_ordering() {
    let mut symbols = vec![
        Symbol::Nonterminal("A".to_string()),
        Symbol::Terminal("b".to_string()),
        Symbol::Terminal("a".to_string()),
        Symbol::Nonterminal("B".to_string()),
    ];
    symbols.sort();

    // terminals sort before nonterminals, lexicographic within each kind
    assert_eq!(
        symbols,
        vec![
            Symbol::Terminal("a".to_string()),
            Symbol::Terminal("b".to_string()),
            Symbol::Nonterminal("A".to_string()),
            Symbol::Nonterminal("B".to_string()),
        ]
    );
}

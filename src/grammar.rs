//! Grammar representation and the textual rule loader.
//!
//! Rules are written one or more per line as `LHS -> ALT1 | ALT2 | …`.
//! `#` starts a comment line, blank lines are ignored, and `''`/`ε` denote
//! the empty alternative. Terminals may be quoted (`'+'`) or bare; a name
//! is a terminal iff it never appears as any rule's left-hand side.

use crate::error::{GrammarError, Result};
use crate::symbol::{END_MARKER, EPSILON, Symbol, normalize};
use log::warn;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs;
use std::path::Path;

/// A production rule `lhs → rhs`.
///
/// The right-hand side is an ordered sequence of symbol names; an empty
/// sequence denotes the ε-production. Productions are identified by
/// structural equality for reduction reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Production {
    /// Left-hand side (always a nonterminal name)
    pub lhs: String,
    /// Right-hand side symbol names (empty = ε)
    pub rhs: Vec<String>,
}

impl Production {
    /// Creates a new production.
    pub fn new(lhs: impl Into<String>, rhs: Vec<String>) -> Self {
        Self {
            lhs: lhs.into(),
            rhs,
        }
    }

    /// The right-hand side as display text, `ε` for the empty sequence.
    pub fn rhs_display(&self) -> String {
        if self.rhs.is_empty() {
            EPSILON.to_string()
        } else {
            self.rhs.join(" ")
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} → {}", self.lhs, self.rhs_display())
    }
}

/// A context-free grammar: productions in textual order plus the symbol
/// sets inferred from them.
///
/// Immutable after loading. The start symbol is the LHS of the first
/// well-formed rule encountered.
#[derive(Debug, Clone)]
pub struct Grammar {
    /// All productions, in textual order
    productions: Vec<Production>,
    /// Map from nonterminal name to its productions, in textual order
    production_map: HashMap<String, Vec<Production>>,
    /// All nonterminal names (every LHS)
    nonterminals: HashSet<String>,
    /// All terminal names, `$` included
    terminals: HashSet<String>,
    /// The start symbol
    start_symbol: String,
    /// Raw rule lines as read, kept for reproducibility
    rules: Vec<String>,
}

impl Grammar {
    /// Loads a grammar from a file. IO failures abort loading.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_text(&text)
    }

    /// Parses a grammar from rule text.
    ///
    /// Malformed lines (no `->`) are reported and skipped; only an input
    /// with no well-formed rule at all is an error.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut rules = Vec::new();
        let mut productions = Vec::new();
        let mut nonterminals = HashSet::new();
        let mut start_symbol = String::new();

        for raw in text.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            rules.push(line.to_string());

            let Some(pos) = line.find("->") else {
                warn!("skipping invalid rule: {line}");
                continue;
            };

            let lhs = normalize(&line[..pos]);
            if lhs.is_empty() {
                warn!("skipping rule with empty left-hand side: {line}");
                continue;
            }
            if start_symbol.is_empty() {
                start_symbol = lhs.clone();
            }
            nonterminals.insert(lhs.clone());

            for alt in line[pos + 2..].split('|') {
                let symbols: Vec<String> = alt
                    .split_whitespace()
                    .map(normalize)
                    .filter(|name| name != EPSILON)
                    .collect();
                // an empty or all-ε alternative is the ε-production
                productions.push(Production::new(lhs.clone(), symbols));
            }
        }

        if productions.is_empty() {
            return Err(GrammarError::EmptyGrammar);
        }

        // terminals are the RHS names that are never a LHS
        let mut terminals: HashSet<String> = productions
            .iter()
            .flat_map(|p| p.rhs.iter())
            .filter(|name| !nonterminals.contains(*name))
            .cloned()
            .collect();
        terminals.insert(END_MARKER.to_string());

        let mut production_map: HashMap<String, Vec<Production>> = HashMap::new();
        for production in &productions {
            production_map
                .entry(production.lhs.clone())
                .or_default()
                .push(production.clone());
        }

        Ok(Self {
            productions,
            production_map,
            nonterminals,
            terminals,
            start_symbol,
            rules,
        })
    }

    /// Returns all productions for a given nonterminal, in textual order.
    pub fn get_productions(&self, nt: &str) -> &[Production] {
        self.production_map
            .get(nt)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Returns all productions in the grammar, in textual order.
    pub fn all_productions(&self) -> &[Production] {
        &self.productions
    }

    /// Returns all nonterminal names.
    pub fn nonterminals(&self) -> &HashSet<String> {
        &self.nonterminals
    }

    /// Returns all terminal names, `$` included.
    pub fn terminals(&self) -> &HashSet<String> {
        &self.terminals
    }

    /// Returns the start symbol.
    pub fn start_symbol(&self) -> &str {
        &self.start_symbol
    }

    /// Returns the raw rule lines as read.
    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    /// Checks if a name is a declared nonterminal.
    pub fn is_nonterminal(&self, name: &str) -> bool {
        self.nonterminals.contains(name)
    }

    /// Classifies a symbol name. Names absent from the nonterminal set are
    /// terminals, declared or not.
    pub fn classify(&self, name: &str) -> Symbol {
        if self.nonterminals.contains(name) {
            Symbol::Nonterminal(name.to_string())
        } else {
            Symbol::Terminal(name.to_string())
        }
    }

    /// A fresh augmented start name: the start symbol suffixed with primes
    /// until unused.
    pub fn augmented_start(&self) -> String {
        let mut name = format!("{}'", self.start_symbol);
        while self.nonterminals.contains(&name) || self.terminals.contains(&name) {
            name.push('\'');
        }
        name
    }

    /// Nonterminal names in lexicographic order, for table display.
    pub fn sorted_nonterminals(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.nonterminals.iter().collect();
        names.sort();
        names
    }

    /// Terminal names in lexicographic order, for table display.
    pub fn sorted_terminals(&self) -> Vec<&String> {
        let mut names: Vec<&String> = self.terminals.iter().collect();
        names.sort();
        names
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Start symbol: {}", self.start_symbol)?;
        writeln!(
            f,
            "Nonterminals: {}",
            self.sorted_nonterminals()
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        )?;
        writeln!(
            f,
            "Terminals: {}",
            self.sorted_terminals()
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        )?;
        writeln!(f, "Rules:")?;
        for rule in &self.rules {
            writeln!(f, "  {rule}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_grammar() {
        let grammar = Grammar::from_text("S -> A b\nA -> a").unwrap();
        assert_eq!(grammar.all_productions().len(), 2);
        assert!(grammar.nonterminals().contains("S"));
        assert!(grammar.nonterminals().contains("A"));
        assert!(grammar.terminals().contains("a"));
        assert!(grammar.terminals().contains("b"));
        assert_eq!(grammar.start_symbol(), "S");
    }

    #[test]
    fn test_parse_alternatives() {
        let grammar = Grammar::from_text("S -> a | b | c").unwrap();
        assert_eq!(grammar.all_productions().len(), 3);
        assert_eq!(grammar.get_productions("S").len(), 3);
    }

    #[test]
    fn test_epsilon_alternative_is_empty_rhs() {
        let grammar = Grammar::from_text("S -> a | ε").unwrap();
        let productions = grammar.get_productions("S");
        assert_eq!(productions[1].rhs, Vec::<String>::new());
        assert_eq!(productions[1].to_string(), "S → ε");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(
            Grammar::from_text("# only a comment\n"),
            Err(GrammarError::EmptyGrammar)
        ));
    }
}

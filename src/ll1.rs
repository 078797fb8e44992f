//! LL(1) predictive table construction and the table-driven parser.

use crate::error::{GrammarError, Result};
use crate::first_follow::{FirstSets, FollowSets, first_of_string};
use crate::grammar::{Grammar, Production};
use crate::symbol::{END_MARKER, EPSILON, Symbol};
use crate::trace::{Trace, TraceStep};
use std::collections::HashMap;

/// LL(1) predictive parser: the cell map plus the stack driver.
#[derive(Debug)]
pub struct LL1Parser {
    grammar: Grammar,
    /// M[(nonterminal, terminal)] = RHS to expand; the empty RHS is ε
    table: HashMap<(String, String), Vec<String>>,
}

impl LL1Parser {
    /// Builds the LL(1) predictive table.
    ///
    /// # Algorithm
    /// For each production A → α:
    /// 1. For each terminal a ∈ FIRST(α)\{ε}, write α into M[A, a]
    /// 2. If ε ∈ FIRST(α), write α into M[A, b] for each b ∈ FOLLOW(A)
    ///
    /// Writing a cell that already holds a distinct RHS is a conflict and
    /// the grammar is rejected.
    pub fn build(
        grammar: Grammar,
        first_sets: &FirstSets,
        follow_sets: &FollowSets,
    ) -> Result<Self> {
        let mut table: HashMap<(String, String), Vec<String>> = HashMap::new();

        for production in grammar.all_productions() {
            let first_alpha = first_of_string(first_sets, &production.rhs);

            // sorted iteration keeps conflict reports deterministic
            let mut terminals: Vec<&String> =
                first_alpha.iter().filter(|t| *t != EPSILON).collect();
            terminals.sort();
            for terminal in terminals {
                Self::set_cell(&mut table, production, terminal)?;
            }

            if first_alpha.contains(EPSILON) {
                let mut follow: Vec<&String> = follow_sets
                    .get(&production.lhs)
                    .into_iter()
                    .flatten()
                    .collect();
                follow.sort();
                for terminal in follow {
                    Self::set_cell(&mut table, production, terminal)?;
                }
            }
        }

        Ok(Self { grammar, table })
    }

    fn set_cell(
        table: &mut HashMap<(String, String), Vec<String>>,
        production: &Production,
        terminal: &str,
    ) -> Result<()> {
        let key = (production.lhs.clone(), terminal.to_string());
        match table.get(&key) {
            Some(existing) if *existing != production.rhs => Err(GrammarError::LL1Conflict {
                nonterminal: production.lhs.clone(),
                terminal: terminal.to_string(),
                existing: Production::new(production.lhs.clone(), existing.clone()).to_string(),
                candidate: production.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                table.insert(key, production.rhs.clone());
                Ok(())
            }
        }
    }

    /// Parses a whitespace-delimited token stream, emitting a derivation
    /// trace. `$` is appended if absent; unknown tokens are rejected
    /// before driving begins.
    ///
    /// # Step semantics
    /// The stack starts as `[$, S]` (bottom to top). A terminal on top
    /// must match the lookahead; a nonterminal is expanded through the
    /// table, pushing the RHS reversed so its leftmost symbol ends on top
    /// (an ε-production pushes nothing). Accept when the stack and input
    /// are both exhausted.
    pub fn parse(&self, input: &str) -> Trace {
        let mut steps = Vec::new();

        let mut tokens: Vec<String> = input.split_whitespace().map(str::to_string).collect();
        if tokens.last().map(String::as_str) != Some(END_MARKER) {
            tokens.push(END_MARKER.to_string());
        }

        for token in &tokens {
            if !self.grammar.terminals().contains(token) {
                return Trace {
                    steps,
                    result: Err(GrammarError::UnknownToken(token.clone())),
                };
            }
        }

        let mut stack: Vec<Symbol> = vec![
            Symbol::Terminal(END_MARKER.to_string()),
            Symbol::Nonterminal(self.grammar.start_symbol().to_string()),
        ];
        let mut cursor = 0usize;

        while let Some(top) = stack.last().cloned() {
            let lookahead = tokens[cursor].clone();
            let stack_str = render_stack(&stack);
            let input_str = tokens[cursor..].join(" ");

            match top {
                Symbol::Terminal(name) => {
                    if name == lookahead {
                        steps.push(TraceStep::new(stack_str, input_str, format!("Match {name}")));
                        stack.pop();
                        cursor += 1;
                    } else {
                        steps.push(TraceStep::new(stack_str, input_str, "error"));
                        return Trace {
                            steps,
                            result: Err(GrammarError::UnexpectedToken {
                                expected: name,
                                found: lookahead,
                            }),
                        };
                    }
                }
                Symbol::Nonterminal(name) => {
                    let key = (name.clone(), lookahead.clone());
                    match self.table.get(&key) {
                        Some(rhs) => {
                            let rhs_str = if rhs.is_empty() {
                                EPSILON.to_string()
                            } else {
                                rhs.join(" ")
                            };
                            steps.push(TraceStep::new(
                                stack_str,
                                input_str,
                                format!("{name} → {rhs_str}"),
                            ));
                            stack.pop();
                            for symbol in rhs.iter().rev() {
                                stack.push(self.grammar.classify(symbol));
                            }
                        }
                        None => {
                            steps.push(TraceStep::new(stack_str, input_str, "error"));
                            return Trace {
                                steps,
                                result: Err(GrammarError::NoRule {
                                    nonterminal: name,
                                    lookahead,
                                }),
                            };
                        }
                    }
                }
            }
        }

        // the bottom `$` only leaves the stack by matching the final token
        steps.push(TraceStep::new("", "", "accept"));
        Trace {
            steps,
            result: Ok(()),
        }
    }

    /// Returns a reference to the predictive table.
    pub fn table(&self) -> &HashMap<(String, String), Vec<String>> {
        &self.table
    }
}

fn render_stack(stack: &[Symbol]) -> String {
    stack
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::first_follow::{compute_first_sets, compute_follow_sets};

    #[test]
    fn test_ll1_simple() {
        let grammar = Grammar::from_text("S -> A B\nA -> a A | d\nB -> b B c | ε").unwrap();
        let first_sets = compute_first_sets(&grammar);
        let follow_sets = compute_follow_sets(&grammar, &first_sets);

        let parser = LL1Parser::build(grammar, &first_sets, &follow_sets).unwrap();
        assert!(parser.parse("d").accepted());
        assert!(parser.parse("a d b c").accepted());
        assert!(!parser.parse("a").accepted());
    }
}

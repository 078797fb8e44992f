//! LR(1) items, the canonical-collection automaton, ACTION/GOTO table
//! synthesis, and the shift/reduce parser.

use crate::error::{GrammarError, Result};
use crate::first_follow::{FirstSets, first_of_string};
use crate::grammar::{Grammar, Production};
use crate::symbol::{END_MARKER, EPSILON};
use crate::trace::{Trace, TraceStep};
use std::collections::{BTreeSet, HashMap, VecDeque};
use std::fmt;

/// An LR(1) item `A → α·β , a`.
///
/// Equality, hashing, and ordering are structural over all four fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Lr1Item {
    /// Left-hand side of the production
    pub lhs: String,
    /// Full right-hand side (α β)
    pub rhs: Vec<String>,
    /// Dot position, in `0..=rhs.len()`
    pub dot: usize,
    /// The one-symbol lookahead (a terminal name, possibly `$`)
    pub lookahead: String,
}

impl Lr1Item {
    /// Creates a new item.
    pub fn new(
        lhs: impl Into<String>,
        rhs: Vec<String>,
        dot: usize,
        lookahead: impl Into<String>,
    ) -> Self {
        Self {
            lhs: lhs.into(),
            rhs,
            dot,
            lookahead: lookahead.into(),
        }
    }

    /// The symbol after the dot, or `None` at the end.
    pub fn next_symbol(&self) -> Option<&str> {
        self.rhs.get(self.dot).map(String::as_str)
    }

    /// Whether the dot is at the end (a reduce item).
    pub fn at_end(&self) -> bool {
        self.dot >= self.rhs.len()
    }

    /// A copy of this item with the dot advanced one position.
    pub fn advanced(&self) -> Self {
        Self {
            lhs: self.lhs.clone(),
            rhs: self.rhs.clone(),
            dot: self.dot + 1,
            lookahead: self.lookahead.clone(),
        }
    }

    /// The underlying production.
    pub fn production(&self) -> Production {
        Production::new(self.lhs.clone(), self.rhs.clone())
    }
}

impl fmt::Display for Lr1Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut body: Vec<&str> = self.rhs.iter().map(String::as_str).collect();
        body.insert(self.dot, "·");
        write!(f, "{} → {} , {}", self.lhs, body.join(" "), self.lookahead)
    }
}

/// A closed set of LR(1) items. Ordered, so that set equality and hashing
/// are canonical without sorting at comparison time.
pub type ItemSet = BTreeSet<Lr1Item>;

/// Computes the closure of an item set.
///
/// For each `[A → α·Bβ, a]` with B a nonterminal, adds `[B → ·γ, b]` for
/// every production B → γ and every b ∈ FIRST(βa); an ε in that FIRST
/// stands for the inherited lookahead `a`.
pub fn closure(grammar: &Grammar, first_sets: &FirstSets, items: ItemSet) -> ItemSet {
    let mut result = items;
    let mut work: Vec<Lr1Item> = result.iter().cloned().collect();

    while let Some(item) = work.pop() {
        let Some(next) = item.next_symbol() else {
            continue;
        };
        if !grammar.is_nonterminal(next) {
            continue;
        }
        let nt = next.to_string();

        let mut lookseq: Vec<String> = item.rhs[item.dot + 1..].to_vec();
        lookseq.push(item.lookahead.clone());
        let lookaheads = first_of_string(first_sets, &lookseq);

        for production in grammar.get_productions(&nt) {
            for b in &lookaheads {
                let lookahead = if b == EPSILON {
                    item.lookahead.clone()
                } else {
                    b.clone()
                };
                let new_item = Lr1Item::new(nt.clone(), production.rhs.clone(), 0, lookahead);
                if result.insert(new_item.clone()) {
                    work.push(new_item);
                }
            }
        }
    }

    result
}

/// Computes goto(I, X): the closure of all items of I with the dot
/// advanced over X. Empty if no item advances on X.
pub fn goto(grammar: &Grammar, first_sets: &FirstSets, items: &ItemSet, symbol: &str) -> ItemSet {
    let moved: ItemSet = items
        .iter()
        .filter(|item| item.next_symbol() == Some(symbol))
        .map(Lr1Item::advanced)
        .collect();

    if moved.is_empty() {
        return moved;
    }
    closure(grammar, first_sets, moved)
}

/// The canonical collection of LR(1) item sets and its transitions.
///
/// States carry small integer IDs in discovery order; state 0 is the
/// closure of the augmented start item `[S' → ·S, $]`. Two states are the
/// same iff their item sets are equal.
#[derive(Debug, Clone)]
pub struct Lr1Automaton {
    /// Item sets, indexed by state ID
    pub states: Vec<ItemSet>,
    /// `(state, symbol) → state` transition relation
    pub transitions: HashMap<(usize, String), usize>,
    /// The fresh augmented start nonterminal `S'`
    pub augmented_start: String,
}

impl Lr1Automaton {
    /// Builds the canonical collection by worklist.
    ///
    /// Transitions out of a state are explored in lexicographic symbol
    /// order and discovery is FIFO, so state numbering is reproducible.
    pub fn build(grammar: &Grammar, first_sets: &FirstSets) -> Self {
        let augmented_start = grammar.augmented_start();
        let start_item = Lr1Item::new(
            augmented_start.clone(),
            vec![grammar.start_symbol().to_string()],
            0,
            END_MARKER,
        );
        let start_state = closure(grammar, first_sets, ItemSet::from([start_item]));

        let mut states = vec![start_state.clone()];
        let mut index: HashMap<ItemSet, usize> = HashMap::from([(start_state, 0)]);
        let mut transitions: HashMap<(usize, String), usize> = HashMap::new();
        let mut worklist: VecDeque<usize> = VecDeque::from([0]);

        while let Some(state_id) = worklist.pop_front() {
            let state = states[state_id].clone();

            let symbols: BTreeSet<String> = state
                .iter()
                .filter_map(|item| item.next_symbol().map(str::to_string))
                .collect();

            for symbol in symbols {
                let next = goto(grammar, first_sets, &state, &symbol);
                if next.is_empty() {
                    continue;
                }
                let id = match index.get(&next) {
                    Some(&existing) => existing,
                    None => {
                        let id = states.len();
                        states.push(next.clone());
                        index.insert(next, id);
                        worklist.push_back(id);
                        id
                    }
                };
                transitions.insert((state_id, symbol), id);
            }
        }

        log::debug!(
            "canonical collection: {} states, {} transitions",
            states.len(),
            transitions.len()
        );

        Self {
            states,
            transitions,
            augmented_start,
        }
    }

    /// Renders a state's items, one per line, in canonical order.
    pub fn render_state(&self, id: usize) -> String {
        self.states[id]
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// One ACTION-table entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Shift the lookahead and enter the given state
    Shift(usize),
    /// Reduce by the given production
    Reduce(Production),
    /// Accept the input
    Accept,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Shift(state) => write!(f, "shift {state}"),
            Action::Reduce(production) => write!(f, "reduce {production}"),
            Action::Accept => write!(f, "accept"),
        }
    }
}

/// LR(1) shift/reduce parser: the canonical automaton plus its
/// ACTION/GOTO tables.
#[derive(Debug)]
pub struct LR1Parser {
    grammar: Grammar,
    automaton: Lr1Automaton,
    /// ACTION table: (state, terminal) → action
    action_table: HashMap<(usize, String), Action>,
    /// GOTO table: (state, nonterminal) → state
    goto_table: HashMap<(usize, String), usize>,
}

impl LR1Parser {
    /// Builds the automaton and synthesises the ACTION/GOTO tables.
    pub fn build(grammar: Grammar, first_sets: &FirstSets) -> Result<Self> {
        let automaton = Lr1Automaton::build(&grammar, first_sets);
        Self::from_automaton(grammar, automaton)
    }

    /// Synthesises ACTION/GOTO from an already-built automaton.
    ///
    /// # Cell rules
    /// 1. `[A → α·aβ, b]` with terminal a and a transition on a: Shift
    /// 2. `[S' → S·, $]`: Accept
    /// 3. `[A → α·, b]` with A ≠ S': Reduce(A → α) at (state, b)
    ///
    /// Any distinct overwrite is a conflict; shift/reduce and
    /// reduce/reduce are rejected identically.
    pub fn from_automaton(grammar: Grammar, automaton: Lr1Automaton) -> Result<Self> {
        let mut action_table: HashMap<(usize, String), Action> = HashMap::new();
        let mut goto_table: HashMap<(usize, String), usize> = HashMap::new();

        // sorted for deterministic conflict reports
        let mut transitions: Vec<(&(usize, String), &usize)> =
            automaton.transitions.iter().collect();
        transitions.sort();
        for ((state, symbol), &target) in transitions {
            if grammar.is_nonterminal(symbol) {
                goto_table.insert((*state, symbol.clone()), target);
            } else {
                Self::set_action(&mut action_table, *state, symbol, Action::Shift(target))?;
            }
        }

        for (state_id, state) in automaton.states.iter().enumerate() {
            for item in state {
                if !item.at_end() {
                    continue;
                }
                if item.lhs == automaton.augmented_start && item.lookahead == END_MARKER {
                    Self::set_action(&mut action_table, state_id, END_MARKER, Action::Accept)?;
                } else {
                    let action = Action::Reduce(item.production());
                    Self::set_action(&mut action_table, state_id, &item.lookahead, action)?;
                }
            }
        }

        Ok(Self {
            grammar,
            automaton,
            action_table,
            goto_table,
        })
    }

    fn set_action(
        table: &mut HashMap<(usize, String), Action>,
        state: usize,
        terminal: &str,
        action: Action,
    ) -> Result<()> {
        let key = (state, terminal.to_string());
        match table.get(&key) {
            Some(existing) if *existing != action => Err(GrammarError::LR1Conflict {
                state,
                terminal: terminal.to_string(),
                existing: existing.to_string(),
                candidate: action.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                table.insert(key, action);
                Ok(())
            }
        }
    }

    /// Parses a whitespace-delimited token stream by shift/reduce,
    /// emitting a trace of both stacks and each action. `$` is appended
    /// if absent; unknown tokens are rejected before driving begins.
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

        let mut state_stack: Vec<usize> = vec![0];
        let mut symbol_stack: Vec<String> = Vec::new();
        let mut cursor = 0usize;

        loop {
            let state = *state_stack.last().expect("state stack never drains");
            let lookahead = tokens[cursor].clone();
            let stack_str = render_stacks(&state_stack, &symbol_stack);
            let input_str = tokens[cursor..].join(" ");

            match self.action_table.get(&(state, lookahead.clone())) {
                Some(Action::Shift(target)) => {
                    steps.push(TraceStep::new(stack_str, input_str, format!("shift {target}")));
                    symbol_stack.push(lookahead);
                    state_stack.push(*target);
                    cursor += 1;
                }
                Some(Action::Reduce(production)) => {
                    steps.push(TraceStep::new(
                        stack_str,
                        input_str,
                        format!("reduce {production}"),
                    ));
                    for _ in 0..production.rhs.len() {
                        state_stack.pop();
                        symbol_stack.pop();
                    }
                    let top = *state_stack.last().expect("reduce pops at most |α| states");
                    match self.goto_table.get(&(top, production.lhs.clone())) {
                        Some(&target) => {
                            symbol_stack.push(production.lhs.clone());
                            state_stack.push(target);
                        }
                        None => {
                            return Trace {
                                steps,
                                result: Err(GrammarError::MissingGoto {
                                    state: top,
                                    nonterminal: production.lhs.clone(),
                                }),
                            };
                        }
                    }
                }
                Some(Action::Accept) => {
                    steps.push(TraceStep::new(stack_str, input_str, "accept"));
                    return Trace {
                        steps,
                        result: Ok(()),
                    };
                }
                None => {
                    steps.push(TraceStep::new(stack_str, input_str, "error"));
                    return Trace {
                        steps,
                        result: Err(GrammarError::ParseError { state, lookahead }),
                    };
                }
            }
        }
    }

    /// Returns the canonical automaton.
    pub fn automaton(&self) -> &Lr1Automaton {
        &self.automaton
    }

    /// Returns the ACTION table.
    pub fn action_table(&self) -> &HashMap<(usize, String), Action> {
        &self.action_table
    }

    /// Returns the GOTO table.
    pub fn goto_table(&self) -> &HashMap<(usize, String), usize> {
        &self.goto_table
    }
}

fn render_stacks(state_stack: &[usize], symbol_stack: &[String]) -> String {
    format!(
        "[{}] {}",
        state_stack
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        symbol_stack.join(" ")
    )
    .trim_end()
    .to_string()
}

//! Item-level NFA view of the LR(1) construction.
//!
//! Every LR(1) item is an NFA state. Advancing the dot over a symbol is a
//! transition labelled with that symbol; expanding a nonterminal after the
//! dot is an ε-transition to the fresh `[B → ·γ, b]` items. Subset
//! construction with ε-closure over this NFA yields the same item sets as
//! the direct closure/goto construction in [`crate::lr1`], possibly with a
//! different ID assignment.

use crate::first_follow::{FirstSets, first_of_string};
use crate::grammar::Grammar;
use crate::lr1::{ItemSet, Lr1Item};
use crate::symbol::{END_MARKER, EPSILON};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// The item NFA: one state per reachable LR(1) item.
#[derive(Debug, Clone)]
pub struct ItemNfa {
    /// All reachable items
    pub states: BTreeSet<Lr1Item>,
    /// Edges `(source, label, target)`; the label is a grammar symbol or ε
    pub edges: Vec<(Lr1Item, String, Lr1Item)>,
    /// The augmented start item `[S' → ·S, $]`
    pub start: Lr1Item,
}

impl ItemNfa {
    /// Builds the NFA from the augmented start item by worklist.
    pub fn build(grammar: &Grammar, first_sets: &FirstSets) -> Self {
        let start = Lr1Item::new(
            grammar.augmented_start(),
            vec![grammar.start_symbol().to_string()],
            0,
            END_MARKER,
        );

        let mut states = BTreeSet::from([start.clone()]);
        let mut edges = Vec::new();
        let mut work = vec![start.clone()];

        while let Some(item) = work.pop() {
            let Some(next) = item.next_symbol() else {
                continue;
            };
            let next = next.to_string();

            let advanced = item.advanced();
            edges.push((item.clone(), next.clone(), advanced.clone()));
            if states.insert(advanced.clone()) {
                work.push(advanced);
            }

            if grammar.is_nonterminal(&next) {
                let mut lookseq: Vec<String> = item.rhs[item.dot + 1..].to_vec();
                lookseq.push(item.lookahead.clone());
                let mut lookaheads: Vec<String> =
                    first_of_string(first_sets, &lookseq).into_iter().collect();
                lookaheads.sort();

                for b in &lookaheads {
                    let lookahead = if b == EPSILON {
                        item.lookahead.clone()
                    } else {
                        b.clone()
                    };
                    for production in grammar.get_productions(&next) {
                        let target = Lr1Item::new(
                            next.clone(),
                            production.rhs.clone(),
                            0,
                            lookahead.clone(),
                        );
                        edges.push((item.clone(), EPSILON.to_string(), target.clone()));
                        if states.insert(target.clone()) {
                            work.push(target);
                        }
                    }
                }
            }
        }

        Self {
            states,
            edges,
            start,
        }
    }

    /// Subset construction with ε-closure.
    ///
    /// Labels are explored in lexicographic order and discovery is FIFO,
    /// mirroring the direct construction's numbering discipline. Returns
    /// the DFA states (each an item set) and the transition relation.
    pub fn determinize(&self) -> (Vec<ItemSet>, HashMap<(usize, String), usize>) {
        let mut eps_map: HashMap<&Lr1Item, Vec<&Lr1Item>> = HashMap::new();
        let mut trans_map: HashMap<&str, HashMap<&Lr1Item, Vec<&Lr1Item>>> = HashMap::new();
        let mut labels: BTreeSet<&str> = BTreeSet::new();

        for (source, label, target) in &self.edges {
            if label == EPSILON {
                eps_map.entry(source).or_default().push(target);
            } else {
                trans_map
                    .entry(label.as_str())
                    .or_default()
                    .entry(source)
                    .or_default()
                    .push(target);
                labels.insert(label.as_str());
            }
        }

        let epsilon_closure = |seed: ItemSet| -> ItemSet {
            let mut closed = seed;
            let mut work: Vec<Lr1Item> = closed.iter().cloned().collect();
            while let Some(item) = work.pop() {
                for target in eps_map.get(&item).into_iter().flatten() {
                    if closed.insert((*target).clone()) {
                        work.push((*target).clone());
                    }
                }
            }
            closed
        };

        let start_state = epsilon_closure(ItemSet::from([self.start.clone()]));
        let mut states = vec![start_state.clone()];
        let mut index: HashMap<ItemSet, usize> = HashMap::from([(start_state, 0)]);
        let mut transitions: HashMap<(usize, String), usize> = HashMap::new();
        let mut worklist: VecDeque<usize> = VecDeque::from([0]);

        while let Some(state_id) = worklist.pop_front() {
            let state = states[state_id].clone();

            for label in &labels {
                let moved: ItemSet = state
                    .iter()
                    .flat_map(|item| {
                        trans_map
                            .get(*label)
                            .and_then(|m| m.get(item))
                            .into_iter()
                            .flatten()
                    })
                    .map(|item| (*item).clone())
                    .collect();
                if moved.is_empty() {
                    continue;
                }

                let closed = epsilon_closure(moved);
                let id = match index.get(&closed) {
                    Some(&existing) => existing,
                    None => {
                        let id = states.len();
                        states.push(closed.clone());
                        index.insert(closed, id);
                        worklist.push_back(id);
                        id
                    }
                };
                transitions.insert((state_id, label.to_string()), id);
            }
        }

        (states, transitions)
    }

    /// The distinct item sets of the determinized NFA, for set-level
    /// comparison against the canonical collection.
    pub fn determinized_state_sets(&self) -> HashSet<ItemSet> {
        self.determinize().0.into_iter().collect()
    }
}

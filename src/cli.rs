//! Command-line adapter over the analysis library.

use crate::error::Result;
use crate::first_follow::{FirstSets, FollowSets, compute_first_sets, compute_follow_sets};
use crate::grammar::Grammar;
use crate::ll1::LL1Parser;
use crate::lr1::LR1Parser;
use crate::symbol::EPSILON;
use crate::trace::Trace;
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;

/// Command line arguments accepted by the analyzer
#[derive(Clone, PartialEq, Eq, Parser)]
#[command(version, about = "Context-free grammar analysis and parsing traces")]
pub struct Args {
    /// Grammar file: one rule per line, `LHS -> ALT1 | ALT2`
    pub grammar: PathBuf,
    /// Whitespace-delimited token stream to parse
    #[arg(short, long)]
    pub tokens: Option<String>,
    /// Print FIRST and FOLLOW sets
    #[arg(long)]
    pub sets: bool,
    /// Print the LL(1) predictive table
    #[arg(long)]
    pub table: bool,
    /// Print the LR(1) canonical collection
    #[arg(long)]
    pub states: bool,
    /// Which parser drives the token stream
    #[arg(short, long, value_enum, default_value = "both")]
    pub engine: Engine,
}

/// Parser engines selectable from the command line
#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Engine {
    /// LL(1) predictive parser
    Ll1,
    /// LR(1) shift/reduce parser
    Lr1,
    /// Both parsers over the same input
    Both,
}

/// Main CLI runner for the grammar analyzer.
pub fn run() -> Result<()> {
    let args = Args::parse();

    let grammar = Grammar::from_file(&args.grammar)?;
    println!("{grammar}");

    let first_sets = compute_first_sets(&grammar);
    let follow_sets = compute_follow_sets(&grammar, &first_sets);
    if args.sets {
        print_sets(&grammar, &first_sets, &follow_sets);
    }

    let ll1 = LL1Parser::build(grammar.clone(), &first_sets, &follow_sets);
    match &ll1 {
        Ok(_) => println!("{}", "Grammar is LL(1).".green()),
        Err(e) => println!("{} {e}", "Grammar is not LL(1):".yellow()),
    }

    let lr1 = LR1Parser::build(grammar.clone(), &first_sets);
    match &lr1 {
        Ok(parser) => println!(
            "{} ({} states)",
            "Grammar is LR(1).".green(),
            parser.automaton().states.len()
        ),
        Err(e) => println!("{} {e}", "Grammar is not LR(1):".yellow()),
    }

    if args.table {
        if let Ok(parser) = &ll1 {
            print_ll1_table(&grammar, parser);
        }
    }

    if args.states {
        if let Ok(parser) = &lr1 {
            print_states(parser);
        }
    }

    if let Some(tokens) = &args.tokens {
        if matches!(args.engine, Engine::Ll1 | Engine::Both) {
            match &ll1 {
                Ok(parser) => {
                    println!("\n=== LL(1) derivation ===");
                    report(parser.parse(tokens));
                }
                Err(_) => println!("\n{}", "LL(1) parse skipped: no table.".yellow()),
            }
        }
        if matches!(args.engine, Engine::Lr1 | Engine::Both) {
            match &lr1 {
                Ok(parser) => {
                    println!("\n=== LR(1) derivation ===");
                    report(parser.parse(tokens));
                }
                Err(_) => println!("\n{}", "LR(1) parse skipped: no table.".yellow()),
            }
        }
    }

    Ok(())
}

/// Prints `First(X) = { … }` and `Follow(X) = { … }` with sorted members.
fn print_sets(grammar: &Grammar, first_sets: &FirstSets, follow_sets: &FollowSets) {
    for nt in grammar.sorted_nonterminals() {
        let mut members: Vec<&String> = first_sets[nt.as_str()].iter().collect();
        members.sort();
        println!(
            "First({nt}) = {{ {} }}",
            members
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    for nt in grammar.sorted_nonterminals() {
        let mut members: Vec<&String> = follow_sets[nt.as_str()].iter().collect();
        members.sort();
        println!(
            "Follow({nt}) = {{ {} }}",
            members
                .iter()
                .map(|s| s.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
}

/// Prints the predictive table as a grid: nonterminal rows, sorted
/// terminal columns, `-` for empty cells.
fn print_ll1_table(grammar: &Grammar, parser: &LL1Parser) {
    let terminals = grammar.sorted_terminals();

    println!("\n=== LL(1) table ===");
    print!("{:<8}", "NT/T");
    for terminal in &terminals {
        print!("{terminal:<12}");
    }
    println!();
    println!("{}", "-".repeat(8 + 12 * terminals.len()));

    for nt in grammar.sorted_nonterminals() {
        print!("{nt:<8}");
        for terminal in &terminals {
            let cell = parser
                .table()
                .get(&(nt.to_string(), terminal.to_string()))
                .map(|rhs| {
                    if rhs.is_empty() {
                        EPSILON.to_string()
                    } else {
                        rhs.join(" ")
                    }
                })
                .unwrap_or_else(|| "-".to_string());
            print!("{cell:<12}");
        }
        println!();
    }
}

/// Prints the canonical collection, one state per block.
fn print_states(parser: &LR1Parser) {
    println!("\n=== LR(1) canonical collection ===");
    for id in 0..parser.automaton().states.len() {
        println!("I{id}:");
        for line in parser.automaton().render_state(id).lines() {
            println!("  {line}");
        }
    }
}

/// Prints a derivation trace and its verdict.
fn report(trace: Trace) {
    print!("{trace}");
    match &trace.result {
        Ok(()) => println!("{}", "accepted".green()),
        Err(e) => println!("{} {e}", "rejected:".red()),
    }
}

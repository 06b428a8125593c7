//! Build the LL(1) predictive rule table and hold the frozen analysis.
//!
//! Rules:
//! 1. For each non-terminal A, the FIRST of each production of A must be disjoint.
//!
//! A -> B1 | B2 | ... | Bn
//! FIRST(Bj) union FIRST(Bk) = {} for all j != k
//!
//! 2. For each non-terminal A that can generate an empty string, the FIRST and
//!    the FOLLOW of A must be disjoint.
//!
//! Breaking either rule lands two productions in the same table cell. Instead
//! of rejecting such a grammar outright, the cell keeps every competing
//! production index and the conflict is recorded as a flag, so a full report
//! can still be printed before the verdict.

use std::collections::{HashMap, HashSet};

use log::debug;

use crate::{
    cfg::{self, Grammar, Terminal},
    compute::{self, compute_first, compute_follow, FirstSets},
};

/// Errors that abort analysis before a rule table can be built
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The grammar failed validation
    Grammar(cfg::Error),
    /// A FIRST set could not be computed
    Compute(compute::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Grammar(e) => e.fmt(f),
            Error::Compute(e) => e.fmt(f),
        }
    }
}

impl From<cfg::Error> for Error {
    fn from(value: cfg::Error) -> Self {
        Self::Grammar(value)
    }
}

impl From<compute::Error> for Error {
    fn from(value: compute::Error) -> Self {
        Self::Compute(value)
    }
}

/// One cell of the rule table
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// Production indices predicting the row's non-terminal on this
    /// lookahead. More than one index marks an LL(1) conflict.
    Rules(Vec<usize>),
    /// Panic-mode synchronization point: the non-terminal can be abandoned
    /// because the lookahead may follow it
    Synch,
}

/// A grammar analyzed for predictive parsing.
///
/// Owns the grammar together with the FIRST, FOLLOW, and rule tables, all
/// frozen once construction succeeds. The acceptor reads them through the
/// accessors and never mutates anything.
#[derive(Debug)]
pub struct Analysis {
    /// Definition of the grammar
    grammar: Grammar,
    /// FIRST of each non-terminal and of each production right-hand side
    first: FirstSets,
    /// FOLLOW of each non-terminal
    follows: HashMap<String, HashSet<Terminal>>,
    /// The predictive rule table
    rule_table: HashMap<String, HashMap<Terminal, Entry>>,
    /// Whether no table cell ended up with competing productions
    valid_ll1: bool,
}

impl Analysis {
    /// Analyze a grammar, consuming it.
    ///
    /// An LL(1) conflict is not an error; it is recorded and exposed through
    /// [Analysis::is_valid_ll1] so the full table can still be reported.
    ///
    /// # Errors
    ///
    /// Fails on an empty grammar, an undefined non-terminal, or left
    /// recursion.
    pub fn new(grammar: Grammar) -> Result<Self, Error> {
        grammar.validate()?;

        let first = compute_first(&grammar)?;
        let follows = compute_follow(&grammar, &first);
        let (rule_table, valid_ll1) = build_rule_table(&grammar, &first, &follows);

        Ok(Self {
            grammar,
            first,
            follows,
            rule_table,
            valid_ll1,
        })
    }

    /// Get the analyzed grammar
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    /// Left-hand side of the start rule
    #[allow(clippy::missing_panics_doc)] // validation guarantees production 0 exists
    pub fn start(&self) -> &str {
        self.grammar.start().unwrap()
    }

    /// Get the FIRST set of each non-terminal
    pub fn firsts(&self) -> &HashMap<String, HashSet<Terminal>> {
        &self.first.firsts
    }

    /// Get the FIRST set of each production's right-hand side
    pub fn right_firsts(&self) -> &[HashSet<Terminal>] {
        &self.first.right_firsts
    }

    /// Get the FOLLOW set of each non-terminal
    pub fn follows(&self) -> &HashMap<String, HashSet<Terminal>> {
        &self.follows
    }

    /// Get the rule table
    pub fn rule_table(&self) -> &HashMap<String, HashMap<Terminal, Entry>> {
        &self.rule_table
    }

    /// Look up the rule-table cell for a non-terminal and a lookahead
    pub fn entry(&self, nonterminal: &str, lookahead: Terminal) -> Option<&Entry> {
        self.rule_table
            .get(nonterminal)
            .and_then(|row| row.get(&lookahead))
    }

    /// Whether the grammar is LL(1)
    pub fn is_valid_ll1(&self) -> bool {
        self.valid_ll1
    }
}

/// Assign every production to the cells its right-hand side's FIRST (or, for
/// a nullable right-hand side, its left's FOLLOW) predicts, then mark the
/// remaining FOLLOW cells as synchronization points.
fn build_rule_table(
    grammar: &Grammar,
    first: &FirstSets,
    follows: &HashMap<String, HashSet<Terminal>>,
) -> (HashMap<String, HashMap<Terminal, Entry>>, bool) {
    let mut cells: HashMap<String, HashMap<Terminal, Vec<usize>>> = grammar
        .nonterminals()
        .into_iter()
        .map(|name| (name.to_string(), HashMap::new()))
        .collect();
    let mut valid_ll1 = true;

    for (index, (left, _)) in grammar.productions().iter().enumerate() {
        let row = cells.get_mut(left).unwrap();
        for t in &first.right_firsts[index] {
            if *t == Terminal::Epsilon {
                // a nullable right-hand side is predicted by whatever may
                // follow its left-hand side
                for follow in follows.get(left).unwrap() {
                    let cell = row.entry(*follow).or_default();
                    if !cell.is_empty() {
                        valid_ll1 = false;
                    }
                    cell.push(index);
                }
            } else {
                let cell = row.entry(*t).or_default();
                if !cell.is_empty() {
                    valid_ll1 = false;
                }
                cell.push(index);
            }
        }
    }

    let mut rule_table: HashMap<String, HashMap<Terminal, Entry>> = cells
        .into_iter()
        .map(|(name, row)| {
            let row = row
                .into_iter()
                .map(|(t, ids)| (t, Entry::Rules(ids)))
                .collect();
            (name, row)
        })
        .collect();

    // every FOLLOW terminal with no prediction becomes a recovery point
    for nonterminal in grammar.nonterminals() {
        let row = rule_table.get_mut(nonterminal).unwrap();
        for follow in follows.get(nonterminal).unwrap() {
            row.entry(*follow).or_insert(Entry::Synch);
        }
    }

    debug!("rule table: {:?}", rule_table);
    (rule_table, valid_ll1)
}

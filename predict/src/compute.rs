//! Compute the FIRST and FOLLOW sets of a grammar.
//!
//! FIRST is computed one production at a time by walking its right-hand side
//! left to right, recursing on demand into the FIRST of any non-terminal
//! prefix. A pending stack of non-terminals currently under computation
//! guards the recursion: a non-terminal showing up on its own pending stack
//! can only be reached through a left-recursive cycle, which predictive
//! parsing cannot handle.
//!
//! FOLLOW cannot be computed in one recursive pass because two FOLLOW sets
//! may each depend on the other, so it iterates over all productions until a
//! fixed point is reached. Termination is guaranteed because the sets only
//! grow and the terminal universe is finite.

use std::collections::{HashMap, HashSet};

use log::{debug, trace};

use crate::cfg::{Grammar, Symbol, Terminal};

/// Errors that can occur while computing the analysis sets
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// FIRST computation ran into a left-recursive cycle through this
    /// non-terminal
    LeftRecursion(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::LeftRecursion(name) => {
                write!(f, "grammar has left recursion in <{}> non-terminal", name)
            }
        }
    }
}

/// The FIRST sets of a grammar
#[derive(Debug, Default)]
pub struct FirstSets {
    /// FIRST of each non-terminal, possibly containing epsilon
    pub firsts: HashMap<String, HashSet<Terminal>>,
    /// FIRST of each production's full right-hand side, by production index
    pub right_firsts: Vec<HashSet<Terminal>>,
}

/// Compute the first sets of a grammar.
///
/// Expects [Grammar::validate] to have passed.
///
/// # Errors
///
/// Fails if the grammar is left-recursive.
pub fn compute_first(grammar: &Grammar) -> Result<FirstSets, Error> {
    let mut sets = FirstSets {
        firsts: HashMap::new(),
        right_firsts: vec![HashSet::new(); grammar.len()],
    };

    // every production is walked once from the top; recursion fills in the
    // prefixes a walk depends on before it continues
    let mut pending = Vec::new();
    for index in 0..grammar.len() {
        first_of_production(grammar, index, &mut pending, &mut sets)?;
    }

    debug!("first sets: {:?}", sets.firsts);
    Ok(sets)
}

/// Walk one production left to right, adding what it can start with to
/// FIRST of its left-hand side and FIRST of its right-hand side.
fn first_of_production(
    grammar: &Grammar,
    index: usize,
    pending: &mut Vec<String>,
    sets: &mut FirstSets,
) -> Result<(), Error> {
    let (left, right) = &grammar.productions()[index];

    if pending.iter().any(|name| name == left) {
        return Err(Error::LeftRecursion(left.clone()));
    }

    sets.firsts.entry(left.clone()).or_default();

    for symbol in right {
        match symbol {
            // epsilon in a right-hand side derives nothing; skip it
            Symbol::Terminal(Terminal::Epsilon) => continue,
            Symbol::Terminal(t) => {
                sets.right_firsts[index].insert(*t);
                sets.firsts.get_mut(left).unwrap().insert(*t);
                return Ok(());
            }
            Symbol::Nonterminal(name) => {
                pending.push(left.clone());
                first_of_nonterminal(grammar, name, pending, sets)?;
                pending.pop();

                let symbol_firsts = sets.firsts.get(name).unwrap().clone();
                let nullable = symbol_firsts.contains(&Terminal::Epsilon);

                // the prefix contributes everything except its epsilon; the
                // walk itself decides whether this production is nullable
                for t in symbol_firsts {
                    if t != Terminal::Epsilon {
                        sets.right_firsts[index].insert(t);
                        sets.firsts.get_mut(left).unwrap().insert(t);
                    }
                }

                if !nullable {
                    return Ok(());
                }
            }
        }
    }

    // the walk fell off the end, so the whole right-hand side can derive
    // the empty string
    sets.right_firsts[index].insert(Terminal::Epsilon);
    sets.firsts.get_mut(left).unwrap().insert(Terminal::Epsilon);
    Ok(())
}

/// Fill in FIRST for every production of one non-terminal.
fn first_of_nonterminal(
    grammar: &Grammar,
    name: &str,
    pending: &mut Vec<String>,
    sets: &mut FirstSets,
) -> Result<(), Error> {
    trace!("computing first of <{}>", name);

    for index in 0..grammar.len() {
        if grammar.productions()[index].0 == name {
            first_of_production(grammar, index, pending, sets)?;
        }
    }

    Ok(())
}

/// Calculate the FIRST set of a symbol sequence given the first sets
/// computed so far.
///
/// The result contains epsilon iff every symbol of the sequence can derive
/// the empty string (in particular, iff the sequence is empty).
pub fn sequence_first(
    sequence: &[Symbol],
    firsts: &HashMap<String, HashSet<Terminal>>,
) -> HashSet<Terminal> {
    let mut set = HashSet::new();

    for symbol in sequence {
        match symbol {
            Symbol::Terminal(Terminal::Epsilon) => continue,
            Symbol::Terminal(t) => {
                set.insert(*t);
                return set;
            }
            Symbol::Nonterminal(name) => {
                let symbol_firsts = firsts.get(name).unwrap();
                set.extend(
                    symbol_firsts
                        .iter()
                        .copied()
                        .filter(|t| *t != Terminal::Epsilon),
                );
                if !symbol_firsts.contains(&Terminal::Epsilon) {
                    return set;
                }
            }
        }
    }

    set.insert(Terminal::Epsilon);
    set
}

/// Compute the follow sets of a grammar.
///
/// FOLLOW of the start rule is seeded with the input-end sentinel before
/// propagation begins, and no FOLLOW set ever contains epsilon. Expects
/// [Grammar::validate] to have passed and FIRST to be computed.
pub fn compute_follow(
    grammar: &Grammar,
    first: &FirstSets,
) -> HashMap<String, HashSet<Terminal>> {
    // 1. initialize every FOLLOW with the empty set, seeding the start rule
    //    with the input-end sentinel
    let mut follow_sets: HashMap<String, HashSet<Terminal>> = grammar
        .nonterminals()
        .into_iter()
        .map(|name| (name.to_string(), HashSet::new()))
        .collect();
    follow_sets
        .get_mut(grammar.start().unwrap())
        .unwrap()
        .insert(Terminal::End);

    // 2. calculate the follow of each non-terminal occurrence
    loop {
        let mut new_follow = follow_sets.clone();

        for (left, right) in grammar.productions() {
            for (i, symbol) in right.iter().enumerate() {
                let Symbol::Nonterminal(name) = symbol else {
                    continue;
                };

                let suffix = sequence_first(&right[i + 1..], &first.firsts);
                let nullable = suffix.contains(&Terminal::Epsilon);

                new_follow
                    .get_mut(name)
                    .unwrap()
                    .extend(suffix.into_iter().filter(|t| *t != Terminal::Epsilon));

                // a nullable suffix exposes whatever can follow the
                // enclosing left-hand side
                if nullable {
                    let from_left = follow_sets.get(left).unwrap().clone();
                    new_follow.get_mut(name).unwrap().extend(from_left);
                }
            }
        }

        // 3. repeat until the sets are equal
        if follow_sets != new_follow {
            trace!("follow sets grew, iterating again");
            follow_sets = new_follow;
        } else {
            break;
        }
    }

    debug!("follow sets: {:?}", follow_sets);
    follow_sets
}

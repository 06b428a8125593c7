//! Table-driven stack automaton with panic-mode error recovery.
//!
//! The machine keeps a stack of grammar symbols, seeded with the input-end
//! sentinel and the start rule, and consumes the input one code unit at a
//! time. A terminal on top of the stack must match the lookahead; a
//! non-terminal is replaced by the production its rule-table cell predicts.
//! When neither works the machine does not stop: it skips input, drops stack
//! symbols, or restarts from the start rule, recording a diagnostic each
//! time, and only delivers its verdict once the whole input (including the
//! sentinel) has been consumed.
//!
//! Every pass around the inner loop consumes an input symbol, pops a stack
//! symbol, or expands a non-terminal through an existing table entry, so the
//! machine always makes progress, even on garbage input.

use std::fmt::Display;
use std::iter;

use log::debug;

use crate::{
    cfg::{Symbol, Terminal},
    ll1::{Analysis, Entry},
};

/// A diagnostic emitted while parsing. Any diagnostic rejects the input, but
/// none of them stop the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// The terminal on top of the stack did not match the lookahead; the
    /// terminal is dropped
    Mismatch {
        /// The terminal the stack demanded
        expected: Terminal,
        /// The lookahead actually seen
        got: Terminal,
        /// 1-indexed position in the input
        position: usize,
    },
    /// No rule-table entry existed for the lookahead; the input symbol is
    /// skipped
    UnknownLookahead {
        /// The lookahead actually seen
        got: Terminal,
        /// 1-indexed position in the input
        position: usize,
    },
    /// A synchronization cell was hit; the non-terminal is abandoned
    Synch {
        /// The lookahead actually seen
        got: Terminal,
        /// 1-indexed position in the input
        position: usize,
    },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::Mismatch {
                expected,
                got,
                position,
            } => write!(
                f,
                "Expected '{}' but got '{}' at position {}",
                expected, got, position
            ),
            Diagnostic::UnknownLookahead { got, position } => {
                write!(f, "cannot parse '{}' at position {}, skipping", got, position)
            }
            Diagnostic::Synch { got, position } => write!(
                f,
                "cannot parse '{}' at position {}, trying new rule",
                got, position
            ),
        }
    }
}

/// Outcome of running the machine over one input string
#[derive(Debug)]
pub struct Verdict {
    /// Whether the input belongs to the grammar's language
    pub accepted: bool,
    /// Everything that went wrong along the way, in input order
    pub diagnostics: Vec<Diagnostic>,
}

/// Stack automaton driven by a frozen rule table.
///
/// Holds no state of its own between runs; every [Machine::parse] call uses
/// a private stack, so one machine may check any number of inputs.
pub struct Machine<'a> {
    /// The frozen analysis tables
    analysis: &'a Analysis,
}

impl<'a> Machine<'a> {
    /// Construct a machine over an analyzed grammar
    pub fn new(analysis: &'a Analysis) -> Self {
        Self { analysis }
    }

    /// Run the machine over one input line.
    ///
    /// Every code unit of `input` is one terminal; a literal `$` denotes the
    /// reserved input-end sentinel, and the sentinel is appended in any case.
    /// The machine always consumes the whole input, recovering from errors as
    /// it goes, and accepts iff nothing went wrong and the stack ended empty.
    pub fn parse(&self, input: &str) -> Verdict {
        let start = self.analysis.start();
        let mut stack = vec![
            Symbol::Terminal(Terminal::End),
            Symbol::Nonterminal(start.to_string()),
        ];
        let mut diagnostics = Vec::new();

        let lookaheads = input
            .chars()
            .map(|c| match c {
                '$' => Terminal::End,
                _ => Terminal::Literal(c),
            })
            .chain(iter::once(Terminal::End));

        for (position, lookahead) in lookaheads.enumerate() {
            let position = position + 1;
            debug!(
                "lookahead '{}' at position {}, stack {:?}",
                lookahead, position, stack
            );

            loop {
                let Some(top) = stack.pop() else {
                    // the bottom sentinel was matched early; whatever input
                    // remains cannot change the stack any more
                    break;
                };

                match top {
                    // epsilon derives nothing; discard it and keep going
                    Symbol::Terminal(Terminal::Epsilon) => continue,
                    Symbol::Terminal(t) if t == lookahead => break,
                    Symbol::Terminal(t) => {
                        diagnostics.push(Diagnostic::Mismatch {
                            expected: t,
                            got: lookahead,
                            position,
                        });
                        if t == Terminal::End {
                            // the whole frame is lost; restart from the
                            // start rule
                            stack = vec![
                                Symbol::Terminal(Terminal::End),
                                Symbol::Nonterminal(start.to_string()),
                            ];
                            break;
                        }
                        // the unmatched terminal stays popped
                    }
                    Symbol::Nonterminal(name) => {
                        match self.analysis.entry(&name, lookahead) {
                            None => {
                                stack.push(Symbol::Nonterminal(name));
                                diagnostics.push(Diagnostic::UnknownLookahead {
                                    got: lookahead,
                                    position,
                                });
                                break;
                            }
                            Some(Entry::Synch) => {
                                diagnostics.push(Diagnostic::Synch {
                                    got: lookahead,
                                    position,
                                });
                                if stack.len() == 1 {
                                    // only the bottom sentinel is left; keep
                                    // the non-terminal and move on instead
                                    stack.push(Symbol::Nonterminal(name));
                                    break;
                                }
                            }
                            Some(Entry::Rules(ids)) => {
                                let (_, right) =
                                    &self.analysis.grammar().productions()[ids[0]];
                                stack.extend(right.iter().rev().cloned());
                            }
                        }
                    }
                }
            }
        }

        Verdict {
            accepted: diagnostics.is_empty() && stack.is_empty(),
            diagnostics,
        }
    }
}

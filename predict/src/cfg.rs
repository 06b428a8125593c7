//! Symbols and the ordered production store of a context-free grammar.
//!
//! Also validates whether the grammar is well-defined.

use std::fmt::Display;

/// A terminal symbol of the target language.
///
/// The empty-production marker and the input-end sentinel are unit variants,
/// so every use of either refers to the same interned value. Equality and
/// hashing follow the textual value of the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terminal {
    /// A literal single-character terminal
    Literal(char),
    /// The empty-production marker, written `\e` in grammar files
    Epsilon,
    /// The input-end sentinel `$`
    End,
}

impl Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Terminal::Literal(c) => write!(f, "{}", c),
            Terminal::Epsilon => write!(f, "epsilon"),
            Terminal::End => write!(f, "$"),
        }
    }
}

/// A single symbol in a production, which may or may not be terminal
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    /// A terminal symbol
    Terminal(Terminal),
    /// A non-terminal symbol, identified by its textual name
    Nonterminal(String),
}

impl Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(t) => t.fmt(f),
            Symbol::Nonterminal(name) => write!(f, "<{}>", name),
        }
    }
}

/// Some production in the form A -> alpha
pub type Production = (String, Vec<Symbol>);

/// Errors that make a grammar unusable for analysis
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    /// The grammar has no productions, so there is no start rule
    EmptyGrammar,
    /// A right-hand side referenced a non-terminal that has no productions
    UndefinedNonterminal(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyGrammar => write!(f, "grammar has no productions"),
            Error::UndefinedNonterminal(name) => {
                write!(f, "non-terminal <{}> has no productions", name)
            }
        }
    }
}

/// The numbered production rules of a context-free grammar.
///
/// Productions are numbered by insertion order and production 0 is the start
/// rule. The store is append-only; once analysis begins the grammar is owned
/// by the analysis and never mutated again.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    /// Productions in insertion order
    productions: Vec<Production>,
}

impl Grammar {
    /// Construct an empty grammar
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one production, assigning it the next index
    pub fn push(&mut self, left: String, right: Vec<Symbol>) {
        self.productions.push((left, right));
    }

    /// The production rules, in insertion order
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// Number of productions
    pub fn len(&self) -> usize {
        self.productions.len()
    }

    /// Whether the grammar has no productions
    pub fn is_empty(&self) -> bool {
        self.productions.is_empty()
    }

    /// Left-hand side of the start rule
    pub fn start(&self) -> Option<&str> {
        self.productions.first().map(|(left, _)| left.as_str())
    }

    /// Distinct non-terminal names, in order of first appearance on a
    /// left-hand side
    pub fn nonterminals(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for (left, _) in &self.productions {
            if !seen.contains(&left.as_str()) {
                seen.push(left.as_str());
            }
        }
        seen
    }

    /// Distinct literal terminals, in order of first appearance on a
    /// right-hand side
    pub fn terminals(&self) -> Vec<Terminal> {
        let mut seen = Vec::new();
        for (_, right) in &self.productions {
            for symbol in right {
                if let Symbol::Terminal(t @ Terminal::Literal(_)) = symbol {
                    if !seen.contains(t) {
                        seen.push(*t);
                    }
                }
            }
        }
        seen
    }

    /// Evaluates the validity of the grammar.
    ///
    /// # Errors
    ///
    /// Fails if the grammar is empty or if a right-hand side names a
    /// non-terminal that never appears on a left-hand side.
    pub fn validate(&self) -> Result<(), Error> {
        // rules to check:

        // 1. there must be a production to start from
        // 2. every non-terminal used in a production must have productions
        //    of its own

        if self.productions.is_empty() {
            return Err(Error::EmptyGrammar);
        }

        for (_, right) in &self.productions {
            for symbol in right {
                if let Symbol::Nonterminal(name) = symbol {
                    if !self.productions.iter().any(|(left, _)| left == name) {
                        return Err(Error::UndefinedNonterminal(name.clone()));
                    }
                }
            }
        }

        Ok(())
    }
}

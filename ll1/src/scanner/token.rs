//! Tokens of the grammar meta-language.

use std::{fmt::Display, mem};

/// Characters that may appear as literal terminals and inside non-terminal
/// names. `$` is deliberately absent: it is reserved as the input-end
/// sentinel and can never be written in a grammar.
const ALPHABET: &str = "*&!@#%^()_+=-`~'\"";

/// Whether a character belongs to the meta-language's symbol alphabet
pub fn in_alphabet(c: char) -> bool {
    c.is_ascii_alphanumeric() || ALPHABET.contains(c)
}

/// Tokens recognized by the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A non-terminal reference, written `<name>`
    Nonterminal(String),
    /// A single-character literal terminal (`\w` produces the space terminal)
    Terminal(char),
    /// The escape `\e`, marking an empty right-hand side
    Epsilon,
    /// The production separator `->`
    Assign,
    /// The alternation separator `|`
    Or,
    /// The statement terminator `;`
    StmtEnd,
    /// End of file
    Eof,
}

impl Token {
    /// Whether two tokens are the same kind of token, ignoring attributes
    pub fn syntax_eq(&self, other: &Self) -> bool {
        mem::discriminant(self) == mem::discriminant(other)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Nonterminal(name) => write!(f, "<{}>", name),
            Token::Terminal(c) => write!(f, "'{}'", c),
            Token::Epsilon => write!(f, "'\\e'"),
            Token::Assign => write!(f, "'->'"),
            Token::Or => write!(f, "'|'"),
            Token::StmtEnd => write!(f, "';'"),
            Token::Eof => write!(f, "end of file"),
        }
    }
}

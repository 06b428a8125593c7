//! Errors produced while parsing the grammar meta-language.

use std::fmt::Display;

use crate::{
    context::Context,
    scanner::{error::Error as ScannerError, token::Token},
};

/// Create a comma separated list of `T::to_string()`
fn list_to_string<T: Display>(list: &[T]) -> String {
    let mut s = String::new();
    for (i, e) in list.iter().enumerate() {
        s += &e.to_string();
        if i < list.len() - 1 {
            s += ", ";
        }
    }
    s
}

/// Types of errors that can happen during parsing.
#[derive(Debug)]
pub enum Error {
    /// A token arrived somewhere the grammar-file grammar does not allow it
    InvalidSyntax {
        /// The token that was actually scanned
        got: Token,
        /// Descriptions of the tokens which were allowed instead
        expected: Vec<&'static str>,
    },
    /// An error returned from the scanner
    Scanner(ScannerError),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSyntax { got, expected } => {
                write!(
                    f,
                    "invalid {} token, expected{}: {}",
                    got,
                    if expected.len() == 1 { "" } else { " one of" },
                    list_to_string(expected)
                )
            }
            Self::Scanner(e) => e.fmt(f),
        }
    }
}

impl From<ScannerError> for Error {
    fn from(value: ScannerError) -> Self {
        Self::Scanner(value)
    }
}

impl From<Context<ScannerError>> for Context<Error> {
    fn from(value: Context<ScannerError>) -> Self {
        value.map_kind(Error::from)
    }
}

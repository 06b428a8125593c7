//! Errors produced while scanning the grammar meta-language.

use std::{fmt::Display, io};

/// Types of errors that can happen during scanning.
#[derive(Debug)]
pub enum Error {
    /// Input contains a character outside the meta-language's alphabet
    InvalidCharacter(char),
    /// A token was started but not finished
    InvalidToken {
        /// The completion the scanner expected to see
        guess: String,
    },
    /// EOF reached before the '}' closing a block comment
    UnclosedComment,
    /// State machine holds an invalid value
    CorruptState,
    /// Errors occurring because of I/O
    Io(io::Error),
}

impl From<io::Error> for Error {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidCharacter(c) => write!(f, "character '{}' is invalid", c),
            Error::InvalidToken { guess } => {
                write!(f, "could not recognize token, do you mean '{}'?", guess)
            }
            Error::UnclosedComment => write!(f, "unclosed comment"),
            Error::CorruptState => write!(f, "state machine was corrupted"),
            Error::Io(e) => write!(f, "i/o error occurred ({:?})", e),
        }
    }
}

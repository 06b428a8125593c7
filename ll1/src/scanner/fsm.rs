//! State machine that recognizes meta-language tokens.

use std::mem;

use crate::scanner::error::Error;
use crate::scanner::token::{in_alphabet, Token};

/// Scanner implemented as a finite state machine. This module is private to
/// ensure correct usage of the 'step' and 'finish' functions.
///
/// Note: the FSM keeps no track of its location in the file, so it reports
/// only the kind of error that occurred; the caller adds the location.
#[derive(Default, Clone)]
pub struct Fsm {
    /// Current state, represented as an 8-bit unsigned integer (max value: 6)
    state: u8,
    /// Name accumulated for a non-terminal reference
    token: String,
}

impl Fsm {
    /// Short-hand method to update the state and return no token
    fn take_edge(&mut self, edge: u8) -> Result<Option<Token>, Error> {
        self.state = edge;
        Ok(None)
    }

    /// Returns the given token and resets the state to 0
    fn give_token(&mut self, t: Token) -> Result<Option<Token>, Error> {
        self.state = 0;
        Ok(Some(t))
    }

    /// Returns an unfinished-token error carrying its expected completion
    fn invalid_token(guess: &str) -> Result<Option<Token>, Error> {
        Err(Error::InvalidToken {
            guess: guess.to_string(),
        })
    }

    /// Best-guess completion of a non-terminal reference cut short
    fn name_guess(&self) -> String {
        format!("<{}>", self.token)
    }

    /// Implementation of the DFA transitions.
    ///
    /// Every token of the meta-language ends exactly on its last character,
    /// so accepting states hand the token back immediately and the caller
    /// always advances the input afterwards.
    pub fn step(&mut self, c: char) -> Result<Option<Token>, Error> {
        match self.state {
            0 => {
                if c.is_ascii_whitespace() {
                    self.take_edge(0)
                } else {
                    match c {
                        '-' => self.take_edge(1),  // start of '->'
                        '/' => self.take_edge(2),  // start of a line comment
                        '{' => self.take_edge(4),  // block comment
                        '\\' => self.take_edge(5), // escapes \w and \e
                        '<' => {
                            self.token.clear();
                            self.take_edge(6) // non-terminal reference
                        }
                        ';' => self.give_token(Token::StmtEnd),
                        '|' => self.give_token(Token::Or),
                        _ if in_alphabet(c) => self.give_token(Token::Terminal(c)),
                        _ => Err(Error::InvalidCharacter(c)),
                    }
                }
            }
            1 => match c {
                '>' => self.give_token(Token::Assign),
                _ => Self::invalid_token("->"),
            },
            2 => match c {
                '/' => self.take_edge(3),
                _ => Self::invalid_token("//"),
            },
            3 => match c {
                '\n' => self.take_edge(0),
                _ => self.take_edge(3),
            },
            4 => match c {
                '}' => self.take_edge(0),
                _ => self.take_edge(4),
            },
            5 => match c {
                'w' => self.give_token(Token::Terminal(' ')),
                'e' => self.give_token(Token::Epsilon),
                _ => Self::invalid_token("\\w or \\e"),
            },
            6 => match c {
                '>' => {
                    let name = mem::take(&mut self.token);
                    self.give_token(Token::Nonterminal(name))
                }
                _ if in_alphabet(c) => {
                    self.token.push(c);
                    self.take_edge(6)
                }
                _ => Self::invalid_token(&self.name_guess()),
            },
            _ => Err(Error::CorruptState),
        }
    }

    /// Consumes the FSM and evaluates the validity of the final state.
    pub fn finish(self) -> Result<Option<Token>, Error> {
        match self.state {
            0 => Ok(None),
            1 => Self::invalid_token("->"),
            2 => Self::invalid_token("//"),
            3 => Ok(None), // a line comment may run to EOF
            4 => Err(Error::UnclosedComment),
            5 => Self::invalid_token("\\w or \\e"),
            6 => Self::invalid_token(&self.name_guess()),
            _ => Err(Error::CorruptState),
        }
    }
}

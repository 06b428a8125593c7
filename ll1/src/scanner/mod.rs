//! The grammar meta-language scanner.

use std::{fmt::Display, path::Path};

use crate::{context::Context, file_buffer::FileBuffer};

pub mod error;
mod fsm;
pub mod token;

use error::Error;
use fsm::Fsm;
use token::Token;

/// Scanner implemented as an iterator. This combines the FSM and the
/// [FileBuffer] and handles all the call-site logic and invariance for the
/// FSM.
///
/// Note: Rust iterators are lazily evaluated, so tokens are only scanned as
/// the parser asks for them.
pub struct Scanner {
    /// Finite state machine that does actual scanning
    ///
    /// This is an [Option] because after an error or EOF it is set to [None]
    fsm: Option<Fsm>,
    /// Whether or not to print debug information
    debug: bool,
    /// Whether the EOF token has been inserted to the stream
    eof: bool,
    /// Internal count of the number of tokens returned
    token_count: usize,
    /// Cursor over the grammar source
    file_buffer: FileBuffer,
}

impl Scanner {
    /// Constructs the scanner, attempting to open the file path for reading.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read.
    pub fn new(path: &Path, debug: bool, verbose: bool) -> Result<Self, Error> {
        let file_buffer = FileBuffer::new(path, verbose)?;
        Ok(Self::over(file_buffer, debug))
    }

    /// Constructs a scanner over in-memory source text.
    pub fn from_source(file_name: &str, source: &str, debug: bool) -> Self {
        Self::over(FileBuffer::from_source(file_name, source, false), debug)
    }

    /// Shared constructor body
    fn over(file_buffer: FileBuffer, debug: bool) -> Self {
        Self {
            fsm: Some(Default::default()),
            debug,
            eof: false,
            token_count: 0,
            file_buffer,
        }
    }

    /// Add context to a given error
    pub fn context<T: Display>(&self, t: T) -> Context<T> {
        self.file_buffer.context(t)
    }

    /// Attempts to make an EOF token, returning it on the first call and
    /// [None] on subsequent calls.
    fn make_eof_token(&mut self) -> Option<Token> {
        if !self.eof {
            self.eof = true;
            self.token_count += 1;
            if self.debug {
                println!("[SCANNER] {}", Token::Eof);
                println!("[SCANNER] Total tokens: {}", self.token_count);
            }
            Some(Token::Eof)
        } else {
            None
        }
    }
}

impl Iterator for Scanner {
    type Item = Result<Token, Context<Error>>;

    /// Implementation of iterator. Points worth noting in this API:
    /// - `Some(Ok(T))` indicates that a token was scanned with no errors
    /// - `Some(Err(T))` indicates that scanning failed and should be aborted
    /// - [None] indicates that the file is exhausted; it is only returned
    ///   after the [Token::Eof] marker
    fn next(&mut self) -> Option<Self::Item> {
        // 1: check if the FSM is in a valid state
        let Some(fsm) = &mut self.fsm else {
            return self.make_eof_token().map(Ok);
        };

        // 2: feed characters until a token falls out or the source ends
        while let Some(c) = self.file_buffer.get_char() {
            match fsm.step(c) {
                Ok(token) => {
                    self.file_buffer.advance();
                    if let Some(token) = token {
                        self.token_count += 1;
                        if self.debug {
                            println!("[SCANNER] {}", token);
                        }
                        return Some(Ok(token));
                    }
                }
                Err(e) => {
                    // grab the offending location before tearing down
                    let context = self.file_buffer.context(e);
                    self.fsm = None;
                    return Some(Err(context));
                }
            }
        }

        // 3: finish the state machine
        match self.fsm.take().unwrap().finish() {
            Ok(Some(token)) => {
                self.token_count += 1;
                if self.debug {
                    println!("[SCANNER] {}", token);
                }
                Some(Ok(token))
            }
            Ok(None) => self.make_eof_token().map(Ok),
            Err(e) => Some(Err(self.file_buffer.context(e))),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Collect every token of an in-memory source
    fn scan(source: &str) -> Result<Vec<Token>, Context<Error>> {
        Scanner::from_source("test.txt", source, false).collect()
    }

    #[test]
    fn scans_every_token_kind() {
        let tokens = scan("<expr> -> a | \\e \\w; // trailing\n{ note } b").unwrap();

        assert_eq!(
            tokens,
            vec![
                Token::Nonterminal("expr".to_string()),
                Token::Assign,
                Token::Terminal('a'),
                Token::Or,
                Token::Epsilon,
                Token::Terminal(' '),
                Token::StmtEnd,
                Token::Terminal('b'),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn names_may_contain_hyphens() {
        let tokens = scan("<my-rule>").unwrap();

        assert_eq!(
            tokens,
            vec![Token::Nonterminal("my-rule".to_string()), Token::Eof]
        );
    }

    #[test]
    fn rejects_characters_outside_the_alphabet() {
        let message = scan("[").unwrap_err().to_string();

        assert!(message.contains("character '[' is invalid"));
    }

    #[test]
    fn dash_must_begin_an_arrow() {
        let message = scan("- a").unwrap_err().to_string();

        assert!(message.contains("do you mean '->'"));
    }

    #[test]
    fn unterminated_reference_reports_completion() {
        let message = scan("<nam").unwrap_err().to_string();

        assert!(message.contains("do you mean '<nam>'"));
    }

    #[test]
    fn unclosed_block_comment_is_an_error() {
        let message = scan("{ never closed").unwrap_err().to_string();

        assert!(message.contains("unclosed comment"));
    }

    #[test]
    fn line_comment_may_end_the_file() {
        let tokens = scan("a // the end").unwrap();

        assert_eq!(tokens, vec![Token::Terminal('a'), Token::Eof]);
    }
}

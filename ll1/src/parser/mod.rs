//! Recursive-descent parser for the grammar meta-language.
//!
//! The grammar of a grammar file is itself LL(1):
//!
//! ```text
//! file := stmt* ;
//! stmt := NonTerminal "->" alt ("|" alt)* ";" ;
//! alt  := symbol*
//! ```
//!
//! Each alternative becomes one numbered production under the statement's
//! left-hand side, so production 0 is always the first alternative of the
//! first statement. An empty alternative stands for the empty production.

use predict::cfg::{Grammar, Symbol, Terminal};

use crate::{
    context::Context,
    scanner::{token::Token, Scanner},
};

pub mod error;
use error::Error;

/// Short-hand version of Result<T, E> where E = Context<Error>
type Result<T> = core::result::Result<T, Context<Error>>;

/// Parser implementation, which consumes the scanner iterator.
pub struct Parser {
    /// The inner Scanner iterator
    scanner: Scanner,
    /// Whether or not to print debug information
    debug: bool,
    /// Look-ahead buffer
    buffer: Token,
}

impl Parser {
    /// Construct the parser
    ///
    /// # Errors
    ///
    /// If the first token cannot be scanned this function fails.
    #[allow(clippy::missing_panics_doc)] // never panics, EOF is inserted if the file is empty
    pub fn new(mut scanner: Scanner, debug: bool) -> Result<Self> {
        let token = scanner.next().unwrap()?;

        Ok(Self {
            scanner,
            debug,
            buffer: token,
        })
    }

    /// Parse the grammar file, consuming the parser
    ///
    /// # Errors
    ///
    /// Errors can happen during scanning, I/O, or because of syntax errors
    /// in the grammar file.
    pub fn parse(mut self) -> Result<Grammar> {
        self.nt_file()
    }

    /* Inner implementation, an LL(1) recursive descent predictive parser */

    /// Fills the look ahead buffer with the next token.
    ///
    /// # Panics
    ///
    /// Panics if called after the EOF marker.
    fn load_next_token(&mut self) -> Result<()> {
        let token = self.scanner.next().unwrap()?;
        self.buffer = token;
        Ok(())
    }

    /// Takes a token from the buffer, reloading it and returning the token
    fn take(&mut self, expected: Token, description: &'static str) -> Result<Token> {
        if self.buffer.syntax_eq(&expected) {
            let token = self.buffer.clone();
            self.load_next_token()?;
            Ok(token)
        } else {
            Err(self.expected(&[description]))
        }
    }

    /// Gives context to an error
    fn context(&self, e: Error) -> Context<Error> {
        self.scanner.context(e)
    }

    /// Creates a syntax error naming the allowed tokens
    fn expected(&self, expected: &[&'static str]) -> Context<Error> {
        self.context(Error::InvalidSyntax {
            got: self.buffer.clone(),
            expected: expected.to_vec(),
        })
    }

    /// Prints debug messages
    fn debug(&self, msg: &str) {
        if self.debug {
            println!("[PARSER] {msg}")
        }
    }

    /// stmt* <EOF>
    fn nt_file(&mut self) -> Result<Grammar> {
        self.debug("entering file");

        let mut grammar = Grammar::new();
        loop {
            match self.buffer {
                Token::Nonterminal(_) => self.nt_stmt(&mut grammar)?,
                Token::Eof => break,
                _ => return Err(self.expected(&["<non-terminal>", "end of file"])),
            }
        }

        self.debug("exiting file");
        Ok(grammar)
    }

    /// NonTerminal <-> alt (<|> alt)* <;>
    fn nt_stmt(&mut self, grammar: &mut Grammar) -> Result<()> {
        self.debug("entering stmt");

        let Token::Nonterminal(left) =
            self.take(Token::Nonterminal(String::new()), "<non-terminal>")?
        else {
            unreachable!() // take() only returns the expected kind
        };
        self.take(Token::Assign, "'->'")?;

        grammar.push(left.clone(), self.nt_alt()?);
        while matches!(self.buffer, Token::Or) {
            self.load_next_token()?;
            grammar.push(left.clone(), self.nt_alt()?);
        }
        self.take(Token::StmtEnd, "';'")?;

        self.debug("exiting stmt");
        Ok(())
    }

    /// symbol*
    fn nt_alt(&mut self) -> Result<Vec<Symbol>> {
        self.debug("entering alt");

        let mut symbols = Vec::new();
        loop {
            match &self.buffer {
                Token::Terminal(c) => {
                    symbols.push(Symbol::Terminal(Terminal::Literal(*c)));
                    self.load_next_token()?;
                }
                Token::Epsilon => {
                    symbols.push(Symbol::Terminal(Terminal::Epsilon));
                    self.load_next_token()?;
                }
                Token::Nonterminal(name) => {
                    symbols.push(Symbol::Nonterminal(name.clone()));
                    self.load_next_token()?;
                }
                Token::Or | Token::StmtEnd => break,
                _ => return Err(self.expected(&["a symbol", "'|'", "';'"])),
            }
        }

        self.debug("exiting alt");
        Ok(symbols)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    /// Parse in-memory source into a grammar
    fn parse(source: &str) -> Result<Grammar> {
        let scanner = Scanner::from_source("test.txt", source, false);
        Parser::new(scanner, false)?.parse()
    }

    #[test]
    fn numbers_alternatives_in_source_order() {
        let grammar = parse("<S> -> a <A> | b;\n<A> -> \\e;").unwrap();

        assert_eq!(grammar.len(), 3);
        assert_eq!(grammar.start(), Some("S"));
        assert_eq!(
            grammar.productions()[0],
            (
                "S".to_string(),
                vec![
                    Symbol::Terminal(Terminal::Literal('a')),
                    Symbol::Nonterminal("A".to_string()),
                ]
            )
        );
        assert_eq!(
            grammar.productions()[1],
            ("S".to_string(), vec![Symbol::Terminal(Terminal::Literal('b'))])
        );
        assert_eq!(
            grammar.productions()[2],
            ("A".to_string(), vec![Symbol::Terminal(Terminal::Epsilon)])
        );
    }

    #[test]
    fn empty_alternative_is_an_empty_right_hand_side() {
        let grammar = parse("<S> -> | a;").unwrap();

        assert_eq!(grammar.len(), 2);
        assert!(grammar.productions()[0].1.is_empty());
        assert_eq!(
            grammar.productions()[1].1,
            vec![Symbol::Terminal(Terminal::Literal('a'))]
        );
    }

    #[test]
    fn comments_and_whitespace_are_skipped() {
        let grammar = parse("// leading note\n<S> -> { inline } a;").unwrap();

        assert_eq!(grammar.len(), 1);
        assert_eq!(
            grammar.productions()[0].1,
            vec![Symbol::Terminal(Terminal::Literal('a'))]
        );
    }

    #[test]
    fn rejects_statement_without_assign() {
        assert!(parse("<S> a;").is_err());
    }

    #[test]
    fn rejects_terminal_at_statement_start() {
        assert!(parse("a -> b;").is_err());
    }

    #[test]
    fn rejects_unterminated_statement() {
        assert!(parse("<S> -> a").is_err());
    }

    #[test]
    fn scanner_errors_pass_through() {
        let message = parse("<S> -> [;").unwrap_err().to_string();

        assert!(message.contains("character '[' is invalid"));
    }
}

//! Locational context for errors. Created through
//! [crate::file_buffer::FileBuffer]. [MaybeContext] allows mixing these
//! errors with ones that have no location, like a failure to open the file.

use std::fmt::Display;

use colored::Colorize;

/// Pins an error or warning to the place in the grammar file it came from
#[derive(Debug)]
pub struct Context<T: Display> {
    /// The error being located
    kind: T,
    /// The contents of the offending line
    line: String,
    /// The number of the offending line, counted from zero
    line_num: usize,
    /// The column along the line, counted from zero
    column: usize,
    /// The name of the file the line came from
    file_name: String,
}

impl<T: Display> Context<T> {
    /// Construct a located error
    pub fn new(kind: T, line: String, line_num: usize, column: usize, file_name: String) -> Self {
        Self {
            kind,
            line,
            line_num,
            column,
            file_name,
        }
    }

    /// Convert the inner error type while keeping the location the same
    pub fn map_kind<F: FnOnce(T) -> U, U: Display>(self, f: F) -> Context<U> {
        let Self {
            kind,
            line,
            line_num,
            column,
            file_name,
        } = self;

        Context {
            kind: f(kind),
            line,
            line_num,
            column,
            file_name,
        }
    }
}

impl<T: Display> Display for Context<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // could not recognize token, do you mean '->'? in input.txt:3:7:
        // <expr> - a;
        //        ^~~ here

        write!(
            f,
            "{} in {}:{}:{}:\n{}\n{}{}\n",
            self.kind,
            self.file_name.purple(),
            (self.line_num + 1).to_string().purple(),
            (self.column + 1).to_string().purple(),
            self.line,
            " ".repeat(self.column),
            "^~~ here".blue()
        )
    }
}

/// An error type that may or may not carry a location
pub enum MaybeContext<T: Display> {
    /// Variant for errors with a known location
    Context(Context<T>),
    /// Variant for errors with no location
    NoContext(T),
}

impl<T: Display> From<Context<T>> for MaybeContext<T> {
    fn from(value: Context<T>) -> Self {
        Self::Context(value)
    }
}

impl<T: Display> From<T> for MaybeContext<T> {
    fn from(value: T) -> Self {
        Self::NoContext(value)
    }
}

impl<T: Display> Display for MaybeContext<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaybeContext::Context(c) => c.fmt(f),
            MaybeContext::NoContext(n) => n.fmt(f),
        }
    }
}

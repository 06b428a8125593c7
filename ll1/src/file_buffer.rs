//! Character-level cursor over the grammar source.

use std::{fmt::Display, fs, io, path::Path};

use crate::context::Context;

/// A cursor over the characters of a grammar file.
///
/// The whole source is read up front (the grammar file is the only file the
/// program ever opens), and the cursor tracks the line and column of the
/// character it sits on, so any error can point at its exact location. The
/// newlines stripped by the line split are handed back between lines, so the
/// scanner still sees them.
pub struct FileBuffer {
    /// Source split into lines
    lines: Vec<String>,
    /// Position along the current line
    column: usize,
    /// Index of the current line
    line_num: usize,
    /// Name of the source, as shown in error contexts
    file_name: String,
    /// Whether or not to print verbose information
    verbose: bool,
}

impl FileBuffer {
    /// Read a grammar file into a buffer.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be read.
    pub fn new(path: &Path, verbose: bool) -> Result<Self, io::Error> {
        let source = fs::read_to_string(path)?;
        Ok(Self::from_source(&path.to_string_lossy(), &source, verbose))
    }

    /// Build a buffer over in-memory source text.
    pub fn from_source(file_name: &str, source: &str, verbose: bool) -> Self {
        Self {
            lines: source.lines().map(String::from).collect(),
            column: 0,
            line_num: 0,
            file_name: file_name.to_string(),
            verbose,
        }
    }

    /// Stamp an error or warning with the cursor's location
    pub fn context<T: Display>(&self, kind: T) -> Context<T> {
        Context::new(
            kind,
            self.lines.get(self.line_num).cloned().unwrap_or_default(),
            self.line_num,
            self.column,
            self.file_name.clone(),
        )
    }

    /// The character under the cursor, or [None] at the end of the source
    pub fn get_char(&self) -> Option<char> {
        let line = self.lines.get(self.line_num)?;

        // case 1: a character along the current line
        // case 2: the newline between this line and the next
        // case 3: the source is exhausted

        if let Some(c) = line.chars().nth(self.column) {
            Some(c)
        } else if self.column == line.len() && self.line_num + 1 < self.lines.len() {
            Some('\n')
        } else {
            None
        }
    }

    /// Move the cursor one character forward
    pub fn advance(&mut self) {
        let Some(line) = self.lines.get(self.line_num) else {
            return;
        };

        // either move along the line or onto the start of the next one

        if self.column < line.len() {
            self.column += 1;
        } else {
            if self.verbose {
                println!("[FILE_BUFFER] advancing to line {}", self.line_num + 2);
            }
            self.column = 0;
            self.line_num += 1;
        }
    }
}

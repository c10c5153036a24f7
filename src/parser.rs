//! Parsing delimiter-separated text.
//!
//! This module provides the [`Parser`], which reads a stream one physical line
//! at a time and assembles records with the configured dialect.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use dsv_table::{from_str, table, Dialect};
//!
//! let table = from_str("a,\"b,c\"\r\nd,e", Dialect::Rfc4180).unwrap();
//! assert_eq!(table, table![["a", "b,c"], ["d", "e"]]);
//! ```
//!
//! ## Record-at-a-time Parsing
//!
//! A [`Parser`] is an iterator of records, so large inputs can be processed
//! without materializing the whole table:
//!
//! ```rust
//! use dsv_table::{ParseOptions, Parser};
//!
//! let input = "root:x:0\n# comment\ndaemon:x:1\n";
//! let parser = Parser::new(input.as_bytes(), ParseOptions::unix()).unwrap();
//!
//! let names: Vec<String> = parser
//!     .map(|record| record.map(|mut fields| fields.swap_remove(0)))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(names, vec!["root", "daemon"]);
//! ```

use crate::{rfc4180, unix, Dialect, ParseOptions, Record, Result, Table};
use std::io::BufRead;

/// One physical line with its terminator split off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PhysicalLine {
    pub(crate) content: String,
    /// `"\r\n"`, `"\n"`, or `""` for a last line without a line break.
    pub(crate) terminator: &'static str,
}

/// Reads physical lines and counts them.
pub(crate) struct LineReader<R> {
    reader: R,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    pub(crate) fn new(reader: R) -> Self {
        LineReader { reader, line: 0 }
    }

    /// Number of physical lines read so far.
    pub(crate) fn line(&self) -> usize {
        self.line
    }

    pub(crate) fn next_line(&mut self) -> Result<Option<PhysicalLine>> {
        let mut content = String::new();
        if self.reader.read_line(&mut content)? == 0 {
            return Ok(None);
        }
        self.line += 1;

        let terminator = if content.ends_with("\r\n") {
            "\r\n"
        } else if content.ends_with('\n') {
            "\n"
        } else {
            ""
        };
        content.truncate(content.len() - terminator.len());
        Ok(Some(PhysicalLine {
            content,
            terminator,
        }))
    }
}

/// Reads records from a buffered stream.
///
/// The parser owns its stream; the read position and line counter are its
/// only mutable state. After the end of input or the first error it yields
/// nothing more.
pub struct Parser<R> {
    lines: LineReader<R>,
    options: ParseOptions,
    finished: bool,
}

impl<R: BufRead> Parser<R> {
    /// Creates a parser over `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidOptions`] if `options` fail validation.
    pub fn new(reader: R, options: ParseOptions) -> Result<Self> {
        options.validate()?;
        Ok(Parser {
            lines: LineReader::new(reader),
            options,
            finished: false,
        })
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Number of physical lines consumed so far.
    pub fn line(&self) -> usize {
        self.lines.line()
    }

    /// Reads the next record, or `None` at the end of input.
    ///
    /// # Errors
    ///
    /// Returns a structural error for malformed input and
    /// [`crate::Error::Io`] if the stream fails.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        if self.finished {
            return Ok(None);
        }
        let result = match self.options.dialect {
            Dialect::Unix => unix::read_record(&mut self.lines, &self.options),
            Dialect::Rfc4180 => rfc4180::read_record(&mut self.lines, self.options.delimiter),
        };
        if !matches!(result, Ok(Some(_))) {
            self.finished = true;
        }
        result
    }

    /// Reads every remaining record.
    ///
    /// # Errors
    ///
    /// Fails on the first malformed record; no partial table is returned.
    pub fn read_table(mut self) -> Result<Table> {
        let mut table = Table::new();
        while let Some(record) = self.read_record()? {
            table.push(record);
        }
        tracing::debug!(
            dialect = %self.options.dialect,
            records = table.len(),
            lines = self.lines.line(),
            "parsed table"
        );
        Ok(table)
    }
}

impl<'a> Parser<&'a [u8]> {
    /// Creates a parser over an in-memory string.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidOptions`] if `options` fail validation.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str, options: ParseOptions) -> Result<Self> {
        Parser::new(input.as_bytes(), options)
    }
}

impl<R: BufRead> Iterator for Parser<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

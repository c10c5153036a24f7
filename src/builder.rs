//! Building delimiter-separated text from a table.
//!
//! This module provides the [`Builder`], which writes records to any
//! [`std::io::Write`] using the escaping policy of the configured dialect.
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use dsv_table::{table, to_string, Dialect};
//!
//! let table = table![["a", "b,c"], ["say \"hi\"", ""]];
//! let csv = to_string(&table, Dialect::Rfc4180).unwrap();
//! assert_eq!(csv, "a,\"b,c\"\r\n\"say \"\"hi\"\"\",");
//! ```
//!
//! ## Direct Builder Usage
//!
//! ```rust
//! use dsv_table::{BuildOptions, Builder};
//!
//! let mut builder = Builder::new(Vec::new(), BuildOptions::unix()).unwrap();
//! builder.write_record(&["root", "x", "/root"]).unwrap();
//! builder.write_record(&["c:\\dir"]).unwrap();
//!
//! let text = String::from_utf8(builder.into_inner()).unwrap();
//! assert_eq!(text, "root:x:/root\nc\\:\\\\dir");
//! ```
//!
//! Records are separated by the line break; no line break follows the last
//! record.

use crate::{BuildOptions, Result, Table};
use std::io::Write;

/// Writes records to a stream.
///
/// The builder owns its writer and never validates field contents: any text
/// can be represented once escaped. Only write failures are reported.
pub struct Builder<W> {
    writer: W,
    options: BuildOptions,
    line: String,
    records_written: usize,
}

impl<W: Write> Builder<W> {
    /// Creates a builder writing to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidOptions`] if `options` fail validation.
    pub fn new(writer: W, options: BuildOptions) -> Result<Self> {
        options.validate()?;
        Ok(Builder {
            writer,
            options,
            // Typical records fit without reallocating
            line: String::with_capacity(256),
            records_written: 0,
        })
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn records_written(&self) -> usize {
        self.records_written
    }

    /// Escapes and writes one record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if writing fails.
    pub fn write_record<S: AsRef<str>>(&mut self, record: &[S]) -> Result<()> {
        self.line.clear();
        if self.records_written > 0 {
            self.line.push_str(&self.options.line_break);
        }
        self.options.dialect.push_record(
            &mut self.line,
            record,
            self.options.delimiter,
            &self.options.line_break,
        );
        self.writer.write_all(self.line.as_bytes())?;
        self.records_written += 1;
        Ok(())
    }

    /// Writes every record of `table` and flushes the writer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if writing or flushing fails.
    pub fn write_table(&mut self, table: &Table) -> Result<()> {
        for record in table {
            self.write_record(record)?;
        }
        self.flush()?;
        tracing::debug!(
            dialect = %self.options.dialect,
            records = table.len(),
            "built table"
        );
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if flushing fails.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

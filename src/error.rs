//! Error types for parsing and building delimiter-separated text.
//!
//! Parsing is all-or-nothing: the first structural problem aborts the parse
//! and no partial table is returned.
//!
//! ## Error Categories
//!
//! - **Premature end of file**: the stream ended inside an open quoted field
//!   (RFC 4180 only)
//! - **Unescaped quote**: a field holds a quote character without being
//!   fully enclosed in quotes, or its quotes are unbalanced
//! - **Illegal line break**: a CR or LF inside an unquoted field
//! - **I/O errors**: the underlying reader or writer failed
//! - **Invalid options**: a delimiter that collides with the dialect's
//!   escape, quote, line-break or comment characters
//!
//! Structural errors carry the physical line number, the name of the parser
//! state that detected them, and the offending field text.
//!
//! ## Examples
//!
//! ```rust
//! use dsv_table::{from_str, Dialect, Error};
//!
//! let result = from_str("\"open", Dialect::Rfc4180);
//! assert!(matches!(result, Err(Error::PrematureEof { .. })));
//!
//! if let Err(err) = result {
//!     eprintln!("Parse error: {}", err);
//! }
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised while parsing or building.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// The stream ended while a quoted field was still open
    #[error("Premature end of file at line {line} (state {state}): unterminated field {context:?}")]
    PrematureEof {
        line: usize,
        state: &'static str,
        context: String,
    },

    /// A quote character outside a fully quoted field, or an unbalanced field
    #[error("Unescaped quote at line {line} (state {state}) in field {field:?}")]
    UnescapedQuote {
        line: usize,
        state: &'static str,
        field: String,
    },

    /// A raw CR or LF inside a field that is not enclosed in quotes
    #[error("Illegal line break in unquoted field at line {line} (state {state}): {field:?}\nHelp: RFC 4180 only allows line breaks inside quoted fields")]
    IllegalLineBreak {
        line: usize,
        state: &'static str,
        field: String,
    },

    /// Options that cannot describe an unambiguous format
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates a premature end-of-file error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dsv_table::Error;
    ///
    /// let err = Error::premature_eof(3, "read-ln", "\"abc");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn premature_eof(line: usize, state: &'static str, context: &str) -> Self {
        Error::PrematureEof {
            line,
            state,
            context: context.to_string(),
        }
    }

    /// Creates an unescaped-quote error for a field that is not validly quoted.
    pub fn unescaped_quote(line: usize, state: &'static str, field: &str) -> Self {
        Error::UnescapedQuote {
            line,
            state,
            field: field.to_string(),
        }
    }

    /// Creates an error for a line break found inside an unquoted field.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dsv_table::Error;
    ///
    /// let err = Error::illegal_line_break(1, "validate", "a\rb");
    /// assert!(err.to_string().contains("Help:"));
    /// ```
    pub fn illegal_line_break(line: usize, state: &'static str, field: &str) -> Self {
        Error::IllegalLineBreak {
            line,
            state,
            field: field.to_string(),
        }
    }

    /// Creates an invalid-options error.
    pub fn invalid_options<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidOptions(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for stream read/write failures.
    pub fn io<T: fmt::Display>(msg: T) -> Self {
        Error::Io(msg.to_string())
    }

    /// Physical line number for structural parse errors.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::PrematureEof { line, .. }
            | Error::UnescapedQuote { line, .. }
            | Error::IllegalLineBreak { line, .. } => Some(*line),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(err)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

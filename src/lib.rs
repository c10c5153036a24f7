//! # dsv_table
//!
//! Parse delimiter-separated text into a [`Table`] and build text back from
//! one, in two dialects.
//!
//! ## Dialects
//!
//! - **Unix** ([`Dialect::Unix`]): fields separated by a single character
//!   (default `:`), a backslash escapes the delimiter or itself, a line ending
//!   in an unpaired backslash continues on the next line, lines starting with
//!   `#` are comments. Think `/etc/passwd`.
//! - **RFC 4180** ([`Dialect::Rfc4180`]): comma-separated values, any field
//!   may be enclosed in double quotes, `""` is a literal quote inside a quoted
//!   field, quoted fields may span lines, records end with CRLF.
//!
//! ## Quick Start
//!
//! ```rust
//! use dsv_table::{from_str, table, to_string, Dialect};
//!
//! let table = from_str("name,quote\r\nAda,\"Hello, \"\"world\"\"\"", Dialect::Rfc4180).unwrap();
//! assert_eq!(table, table![["name", "quote"], ["Ada", "Hello, \"world\""]]);
//!
//! let text = to_string(&table, Dialect::Rfc4180).unwrap();
//! assert_eq!(from_str(&text, Dialect::Rfc4180).unwrap(), table);
//! ```
//!
//! ### Unix Dialect
//!
//! ```rust
//! use dsv_table::{from_str, table, to_string, Dialect};
//!
//! let input = "# user:uid\nroot:0\nweb:33:long\\\nline\n";
//! let table = from_str(input, Dialect::Unix).unwrap();
//! assert_eq!(table, table![["root", "0"], ["web", "33", "long:line"]]);
//!
//! assert_eq!(to_string(&table, Dialect::Unix).unwrap(), "root:0\nweb:33:long\\:line");
//! ```
//!
//! ### Guessing the Delimiter
//!
//! ```rust
//! use dsv_table::{guess_delimiter, Dialect};
//!
//! assert_eq!(guess_delimiter("a;b;c\n1;2;3", Dialect::Rfc4180), Some(';'));
//! // Two candidates give the same field count
//! assert_eq!(guess_delimiter("a,b:c", Dialect::Unix), None);
//! ```
//!
//! ## Errors
//!
//! Parsing fails as a whole on the first malformed record (see [`Error`]);
//! no partial table is returned. Building only fails when the writer does.
//!
//! ## Format Reference
//!
//! See the [`format`] module for the exact rules of both dialects.

pub mod builder;
pub mod dialect;
pub mod error;
pub mod escape;
pub mod format;
pub mod guess;
pub mod macros;
pub mod options;
pub mod parser;
mod rfc4180;
pub mod table;
mod unix;

pub use builder::Builder;
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use options::{BuildOptions, ParseOptions};
pub use parser::Parser;
pub use table::{Record, Table};

use std::io::{self, BufReader};

/// Parse a string into a table with the defaults of `dialect`.
///
/// # Examples
///
/// ```rust
/// use dsv_table::{from_str, table, Dialect};
///
/// let table = from_str("a:b\\:c", Dialect::Unix).unwrap();
/// assert_eq!(table, table![["a", "b:c"]]);
/// ```
///
/// # Errors
///
/// Returns a structural error if the input is malformed for the dialect.
pub fn from_str(text: &str, dialect: Dialect) -> Result<Table> {
    from_str_with_options(text, &ParseOptions::for_dialect(dialect))
}

/// Parse a string into a table with custom options.
///
/// # Examples
///
/// ```rust
/// use dsv_table::{from_str_with_options, table, ParseOptions};
///
/// let options = ParseOptions::unix().with_delimiter(',');
/// let table = from_str_with_options("a,b\\,c", &options).unwrap();
/// assert_eq!(table, table![["a", "b,c"]]);
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidOptions`] for unusable options, or a structural
/// error if the input is malformed.
pub fn from_str_with_options(text: &str, options: &ParseOptions) -> Result<Table> {
    Parser::from_str(text, options.clone())?.read_table()
}

/// Parse an I/O stream into a table with the defaults of `dialect`.
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, or a structural error if the input
/// is malformed.
pub fn from_reader<R>(reader: R, dialect: Dialect) -> Result<Table>
where
    R: io::Read,
{
    from_reader_with_options(reader, &ParseOptions::for_dialect(dialect))
}

/// Parse an I/O stream into a table with custom options.
///
/// # Examples
///
/// ```rust
/// use dsv_table::{from_reader_with_options, ParseOptions};
/// use std::io::Cursor;
///
/// let cursor = Cursor::new(b"a|b\nc|d".to_vec());
/// let options = ParseOptions::rfc4180().with_delimiter('|');
/// let table = from_reader_with_options(cursor, &options).unwrap();
/// assert_eq!(table.len(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidOptions`], [`Error::Io`], or a structural error.
pub fn from_reader_with_options<R>(reader: R, options: &ParseOptions) -> Result<Table>
where
    R: io::Read,
{
    Parser::new(BufReader::new(reader), options.clone())?.read_table()
}

/// Build a table into a string with the defaults of `dialect`.
///
/// # Errors
///
/// Building into memory cannot fail; the `Result` mirrors
/// [`to_string_with_options`].
pub fn to_string(table: &Table, dialect: Dialect) -> Result<String> {
    to_string_with_options(table, &BuildOptions::for_dialect(dialect))
}

/// Build a table into a string with custom options.
///
/// # Examples
///
/// ```rust
/// use dsv_table::{table, to_string_with_options, BuildOptions};
///
/// let options = BuildOptions::unix().with_delimiter(',');
/// let text = to_string_with_options(&table![["a", "b,c"]], &options).unwrap();
/// assert_eq!(text, "a,b\\,c");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidOptions`] for unusable options.
pub fn to_string_with_options(table: &Table, options: &BuildOptions) -> Result<String> {
    let mut builder = Builder::new(Vec::new(), options.clone())?;
    builder.write_table(table)?;
    String::from_utf8(builder.into_inner()).map_err(|e| Error::custom(e.to_string()))
}

/// Build a table into a writer with the defaults of `dialect`.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn to_writer<W>(writer: W, table: &Table, dialect: Dialect) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, table, &BuildOptions::for_dialect(dialect))
}

/// Build a table into a writer with custom options.
///
/// # Examples
///
/// ```rust
/// use dsv_table::{table, to_writer_with_options, BuildOptions};
///
/// let mut buffer = Vec::new();
/// to_writer_with_options(&mut buffer, &table![["a"], ["b"]], &BuildOptions::rfc4180()).unwrap();
/// assert_eq!(buffer, b"a\r\nb");
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidOptions`] or [`Error::Io`].
pub fn to_writer_with_options<W>(writer: W, table: &Table, options: &BuildOptions) -> Result<()>
where
    W: io::Write,
{
    let mut builder = Builder::new(writer, options.clone())?;
    builder.write_table(table)
}

/// Guess the delimiter of `sample` among the dialect's candidate delimiters.
///
/// Returns `None` when no candidate gives strictly more fields than all the
/// others.
#[must_use]
pub fn guess_delimiter(sample: &str, dialect: Dialect) -> Option<char> {
    guess::guess(sample, dialect, dialect.candidate_delimiters())
}

/// Guess the delimiter of `sample` among caller-supplied candidates.
///
/// # Examples
///
/// ```rust
/// use dsv_table::{guess_delimiter_among, Dialect};
///
/// assert_eq!(guess_delimiter_among("a b c", Dialect::Unix, &[' ', ':']), Some(' '));
/// ```
#[must_use]
pub fn guess_delimiter_among(sample: &str, dialect: Dialect, candidates: &[char]) -> Option<char> {
    guess::guess(sample, dialect, candidates)
}

/// Guess with the candidates and dialect of `options`.
#[must_use]
pub fn guess_delimiter_with_options(sample: &str, options: &ParseOptions) -> Option<char> {
    guess::guess(sample, options.dialect, options.candidates())
}

//! Configuration for parsing and building.
//!
//! - [`ParseOptions`]: dialect, delimiter, candidate delimiters for guessing,
//!   comment prefix
//! - [`BuildOptions`]: dialect, delimiter, line break
//!
//! Both start from the dialect defaults and are adjusted with `with_*`
//! methods. Both are serde-serializable so a host application can keep them
//! in its own configuration file.
//!
//! ## Examples
//!
//! ```rust
//! use dsv_table::{from_str_with_options, table, ParseOptions};
//!
//! // /etc/passwd style, comments allowed
//! let options = ParseOptions::unix();
//! let table = from_str_with_options("# users\nroot:x:0", &options).unwrap();
//! assert_eq!(table, table![["root", "x", "0"]]);
//!
//! // Semicolon separated CSV
//! let options = ParseOptions::rfc4180().with_delimiter(';');
//! let table = from_str_with_options("a;\"b;c\"", &options).unwrap();
//! assert_eq!(table, table![["a", "b;c"]]);
//! ```

use crate::{Dialect, Error, Result};
use serde::{Deserialize, Serialize};

/// Options controlling how text is split into a table.
///
/// # Examples
///
/// ```rust
/// use dsv_table::{Dialect, ParseOptions};
///
/// let options = ParseOptions::unix().with_delimiter(',').without_comments();
/// assert_eq!(options.dialect, Dialect::Unix);
/// assert_eq!(options.delimiter, ',');
/// assert_eq!(options.comment_prefix(), None);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseOptions {
    pub dialect: Dialect,
    pub delimiter: char,
    /// Delimiters tried when guessing; empty means the dialect's defaults.
    #[serde(default)]
    pub candidates: Vec<char>,
    /// Lines whose trimmed text starts with this prefix are skipped.
    /// Ignored by dialects without comment support.
    #[serde(default)]
    pub comment_prefix: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions::for_dialect(Dialect::default())
    }
}

impl ParseOptions {
    /// Creates default options (RFC 4180, comma delimiter).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the defaults of `dialect`.
    #[must_use]
    pub fn for_dialect(dialect: Dialect) -> Self {
        ParseOptions {
            dialect,
            delimiter: dialect.default_delimiter(),
            candidates: Vec::new(),
            comment_prefix: dialect.default_comment_prefix().map(str::to_string),
        }
    }

    /// Unix defaults: `:` delimiter, `#` comments.
    #[must_use]
    pub fn unix() -> Self {
        Self::for_dialect(Dialect::Unix)
    }

    /// RFC 4180 defaults: `,` delimiter, no comments.
    #[must_use]
    pub fn rfc4180() -> Self {
        Self::for_dialect(Dialect::Rfc4180)
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Replaces the candidate delimiters used by guessing.
    #[must_use]
    pub fn with_candidates<I>(mut self, candidates: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.candidates = candidates.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_comment_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.comment_prefix = Some(prefix.into());
        self
    }

    #[must_use]
    pub fn without_comments(mut self) -> Self {
        self.comment_prefix = None;
        self
    }

    /// Candidate delimiters in effect: the configured set, or the dialect's.
    #[must_use]
    pub fn candidates(&self) -> &[char] {
        if self.candidates.is_empty() {
            self.dialect.candidate_delimiters()
        } else {
            &self.candidates
        }
    }

    /// The comment prefix the parser honors, if the dialect has comments.
    #[must_use]
    pub fn comment_prefix(&self) -> Option<&str> {
        if self.dialect.supports_comments() {
            self.comment_prefix.as_deref()
        } else {
            None
        }
    }

    /// Checks that the delimiter and comment prefix describe an unambiguous
    /// format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] when the delimiter is reserved by the
    /// dialect, when a candidate is reserved, or when the comment prefix is
    /// empty or starts with the delimiter.
    pub fn validate(&self) -> Result<()> {
        check_delimiter(self.dialect, self.delimiter)?;
        for &candidate in &self.candidates {
            check_delimiter(self.dialect, candidate)?;
        }
        if let Some(prefix) = self.comment_prefix() {
            match prefix.chars().next() {
                None => return Err(Error::invalid_options("comment prefix is empty")),
                Some(first) if first == self.delimiter => {
                    return Err(Error::invalid_options(format!(
                        "comment prefix {:?} starts with the delimiter",
                        prefix
                    )))
                }
                Some(_) => {}
            }
        }
        if self.comment_prefix.is_some() && !self.dialect.supports_comments() {
            tracing::warn!(
                dialect = %self.dialect,
                "comment prefix ignored: dialect has no comment lines"
            );
        }
        Ok(())
    }
}

/// Options controlling how a table is written out.
///
/// # Examples
///
/// ```rust
/// use dsv_table::{to_string_with_options, table, BuildOptions};
///
/// let options = BuildOptions::rfc4180().with_line_break("\n");
/// let csv = to_string_with_options(&table![["a", "b"], ["c", "d"]], &options).unwrap();
/// assert_eq!(csv, "a,b\nc,d");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildOptions {
    pub dialect: Dialect,
    pub delimiter: char,
    pub line_break: String,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions::for_dialect(Dialect::default())
    }
}

impl BuildOptions {
    /// Creates default options (RFC 4180, comma delimiter, CRLF).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn for_dialect(dialect: Dialect) -> Self {
        BuildOptions {
            dialect,
            delimiter: dialect.default_delimiter(),
            line_break: dialect.default_line_break().to_string(),
        }
    }

    /// Unix defaults: `:` delimiter, `\n` line break.
    #[must_use]
    pub fn unix() -> Self {
        Self::for_dialect(Dialect::Unix)
    }

    /// RFC 4180 defaults: `,` delimiter, `\r\n` line break.
    #[must_use]
    pub fn rfc4180() -> Self {
        Self::for_dialect(Dialect::Rfc4180)
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_line_break(mut self, line_break: impl Into<String>) -> Self {
        self.line_break = line_break.into();
        self
    }

    /// # Errors
    ///
    /// Returns [`Error::InvalidOptions`] when the delimiter is reserved by the
    /// dialect, or the line break is empty or contains the delimiter.
    pub fn validate(&self) -> Result<()> {
        check_delimiter(self.dialect, self.delimiter)?;
        if self.line_break.is_empty() {
            return Err(Error::invalid_options("line break is empty"));
        }
        if self.line_break.contains(self.delimiter) {
            return Err(Error::invalid_options(format!(
                "line break {:?} contains the delimiter {:?}",
                self.line_break, self.delimiter
            )));
        }
        Ok(())
    }
}

fn check_delimiter(dialect: Dialect, delimiter: char) -> Result<()> {
    if dialect.reserved_chars().contains(&delimiter) {
        return Err(Error::invalid_options(format!(
            "{:?} cannot be used as a {} delimiter",
            delimiter, dialect
        )));
    }
    Ok(())
}

//! The two supported dialects and the per-dialect policy they carry.
//!
//! [`Dialect`] is a closed set. Everything that differs between the Unix and
//! RFC 4180 formats is reached through its methods, so the parser, builder
//! and guesser never branch on the variant themselves.
//!
//! | | Unix | RFC 4180 |
//! |-|------|----------|
//! | default delimiter | `:` | `,` |
//! | output line break | `\n` | `\r\n` |
//! | field protection | `\` before delimiter and `\` | enclosing `"`, doubled `"` |
//! | comment lines | `#` prefix | not supported |
//! | multi-line records | trailing `\` | quoted line breaks |

use crate::escape::{self, BACKSLASH, QUOTE};
use crate::unix;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

const UNIX_CANDIDATES: &[char] = &[':', ',', ';', '|', '\t'];
const RFC4180_CANDIDATES: &[char] = &[',', ';', '\t', '|'];

/// A delimiter-separated text convention.
///
/// # Examples
///
/// ```rust
/// use dsv_table::Dialect;
///
/// assert_eq!(Dialect::Unix.default_delimiter(), ':');
/// assert_eq!(Dialect::Rfc4180.default_line_break(), "\r\n");
/// assert!(Dialect::Unix.supports_comments());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// Backslash-escaped fields, backslash-newline continuation, `#` comments.
    Unix,
    /// Comma-separated values as described by RFC 4180.
    #[default]
    Rfc4180,
}

impl Dialect {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Dialect::Unix => "unix",
            Dialect::Rfc4180 => "rfc4180",
        }
    }

    #[must_use]
    pub const fn default_delimiter(&self) -> char {
        match self {
            Dialect::Unix => ':',
            Dialect::Rfc4180 => ',',
        }
    }

    #[must_use]
    pub const fn default_line_break(&self) -> &'static str {
        match self {
            Dialect::Unix => "\n",
            Dialect::Rfc4180 => "\r\n",
        }
    }

    /// Whether comment lines are recognized when parsing.
    ///
    /// RFC 4180 has no comment convention; a `#` line there is data.
    #[must_use]
    pub const fn supports_comments(&self) -> bool {
        matches!(self, Dialect::Unix)
    }

    #[must_use]
    pub const fn default_comment_prefix(&self) -> Option<&'static str> {
        match self {
            Dialect::Unix => Some("#"),
            Dialect::Rfc4180 => None,
        }
    }

    /// Delimiters tried by [`crate::guess_delimiter`], in priority order.
    #[must_use]
    pub const fn candidate_delimiters(&self) -> &'static [char] {
        match self {
            Dialect::Unix => UNIX_CANDIDATES,
            Dialect::Rfc4180 => RFC4180_CANDIDATES,
        }
    }

    /// Characters that can never serve as a delimiter in this dialect.
    #[must_use]
    pub const fn reserved_chars(&self) -> &'static [char] {
        match self {
            Dialect::Unix => &[BACKSLASH, '\r', '\n'],
            Dialect::Rfc4180 => &[QUOTE, '\r', '\n'],
        }
    }

    /// Splits one physical line into raw, still-escaped pieces.
    ///
    /// Unix splits only on delimiters that are not escaped. RFC 4180 splits
    /// on every delimiter; the record assembler glues the pieces of a quoted
    /// field back together.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dsv_table::Dialect;
    ///
    /// assert_eq!(Dialect::Unix.split_record("a:b\\:c", ':'), vec!["a", "b\\:c"]);
    /// assert_eq!(Dialect::Rfc4180.split_record("a,\"b,c\"", ','), vec!["a", "\"b", "c\""]);
    /// ```
    #[must_use]
    pub fn split_record<'a>(&self, line: &'a str, delimiter: char) -> Vec<&'a str> {
        match self {
            Dialect::Unix => unix::split_line(line, delimiter),
            Dialect::Rfc4180 => line.split(delimiter).collect(),
        }
    }

    /// Turns a complete raw field into its value.
    ///
    /// Unix drops escapes in front of the delimiter and the escape character.
    /// RFC 4180 strips the enclosing quotes of a fully quoted field and
    /// collapses doubled quotes; any other field is returned as-is.
    #[must_use]
    pub fn finalize_field<'a>(&self, raw: &'a str, delimiter: char) -> Cow<'a, str> {
        match self {
            Dialect::Unix => escape::unescape(raw, &[delimiter, BACKSLASH], BACKSLASH),
            Dialect::Rfc4180 => escape::unquote(raw, QUOTE),
        }
    }

    /// Protects a field value for output.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use dsv_table::Dialect;
    ///
    /// assert_eq!(Dialect::Unix.escape_field("b:c", ':', "\n"), "b\\:c");
    /// assert_eq!(Dialect::Rfc4180.escape_field("b,c", ',', "\r\n"), "\"b,c\"");
    /// assert_eq!(Dialect::Rfc4180.escape_field("plain", ',', "\r\n"), "plain");
    /// ```
    #[must_use]
    pub fn escape_field<'a>(&self, field: &'a str, delimiter: char, line_break: &str) -> Cow<'a, str> {
        match self {
            Dialect::Unix => escape::escape(field, &[delimiter, BACKSLASH], BACKSLASH),
            Dialect::Rfc4180 => {
                let needs_quotes = field.contains(&[delimiter, QUOTE, '\r', '\n'][..])
                    || (!line_break.is_empty() && field.contains(line_break));
                if needs_quotes {
                    Cow::Owned(escape::enclose(field, QUOTE))
                } else {
                    Cow::Borrowed(field)
                }
            }
        }
    }

    /// Appends one escaped record to `out`, fields joined by the delimiter.
    ///
    /// RFC 4180 writes a record holding a single empty field as `""`; an
    /// empty line is the record with no fields.
    pub fn push_record<S: AsRef<str>>(
        &self,
        out: &mut String,
        record: &[S],
        delimiter: char,
        line_break: &str,
    ) {
        if let (Dialect::Rfc4180, [only]) = (self, record) {
            if only.as_ref().is_empty() {
                out.push_str(&escape::enclose("", QUOTE));
                return;
            }
        }
        for (i, field) in record.iter().enumerate() {
            if i > 0 {
                out.push(delimiter);
            }
            out.push_str(&self.escape_field(field.as_ref(), delimiter, line_break));
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Delimiter guessing.
//!
//! Each candidate delimiter is tried by parsing the sample with the dialect's
//! own parser; the candidate that yields the most fields in the first record
//! wins. A tie for the best count is reported as `None` instead of being
//! broken arbitrarily.

use crate::{Dialect, ParseOptions, Parser};

/// Guesses which of `candidates` separates the fields of `sample`.
///
/// Returns `None` when the best field count is shared by two or more
/// candidates, or when the sample holds no record at all.
///
/// # Examples
///
/// ```rust
/// use dsv_table::{guess::guess, Dialect};
///
/// assert_eq!(guess("a;b;c", Dialect::Rfc4180, &[',', ';']), Some(';'));
/// assert_eq!(guess("a;b,c", Dialect::Rfc4180, &[',', ';']), None);
/// ```
#[must_use]
pub fn guess(sample: &str, dialect: Dialect, candidates: &[char]) -> Option<char> {
    let mut best: Option<(char, usize)> = None;
    let mut tied = false;

    for &delimiter in candidates {
        let width = first_record_width(sample, dialect, delimiter);
        tracing::debug!(?delimiter, width, "delimiter candidate");
        match best {
            Some((_, top)) if width < top => {}
            Some((_, top)) if width == top => tied = true,
            _ => {
                best = Some((delimiter, width));
                tied = false;
            }
        }
    }

    match best {
        Some((delimiter, width)) if !tied && width > 0 => Some(delimiter),
        _ => None,
    }
}

/// Field count of the first record parsed with `delimiter`; 0 if the sample
/// is empty or malformed under that delimiter.
fn first_record_width(sample: &str, dialect: Dialect, delimiter: char) -> usize {
    let options = ParseOptions::for_dialect(dialect).with_delimiter(delimiter);
    Parser::from_str(sample, options)
        .and_then(|mut parser| parser.read_record())
        .ok()
        .flatten()
        .map_or(0, |record| record.len())
}

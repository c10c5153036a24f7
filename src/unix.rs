//! Unix dialect record assembly.
//!
//! A physical line is split on delimiters not preceded by a backslash. When
//! the last raw field ends with an unpaired backslash the record continues on
//! the next physical line: the backslash is dropped and the next line's first
//! field is appended to the pending last field with the delimiter between
//! them.
//!
//! ```text
//! a:b\        ->  ["a", "b:c", "d"]
//! c:d
//! ```

use crate::escape::{ends_with_unpaired_escape, BACKSLASH};
use crate::parser::LineReader;
use crate::{Dialect, ParseOptions, Record, Result};
use std::borrow::Cow;
use std::io::BufRead;

/// Splits `line` on every delimiter that is not escaped.
///
/// A backslash always pairs with the character after it, so `\\:` is an
/// escaped backslash followed by a real split point. Fields keep their
/// escapes.
pub(crate) fn split_line(line: &str, delimiter: char) -> Vec<&str> {
    let mut fields = Vec::new();
    let mut start = 0;
    let mut escaped = false;
    for (i, ch) in line.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == BACKSLASH {
            escaped = true;
        } else if ch == delimiter {
            fields.push(&line[start..i]);
            start = i + ch.len_utf8();
        }
    }
    fields.push(&line[start..]);
    fields
}

fn is_comment(line: &str, prefix: Option<&str>) -> bool {
    prefix.map_or(false, |p| line.trim().starts_with(p))
}

/// Appends the raw fields of one physical line to the pending record.
///
/// After a continuation the first new field is glued onto the last pending
/// one with the delimiter reinserted.
fn splice(pending: &mut Vec<String>, raw: Vec<&str>, continued: bool, delimiter: char) {
    let mut fields = raw.into_iter();
    if continued {
        if let Some(last) = pending.last_mut() {
            if let Some(first) = fields.next() {
                last.push(delimiter);
                last.push_str(first);
            }
        }
    }
    pending.extend(fields.map(str::to_string));
}

fn finalize(pending: Vec<String>, delimiter: char) -> Record {
    pending
        .into_iter()
        .map(|raw| match Dialect::Unix.finalize_field(&raw, delimiter) {
            Cow::Owned(field) => field,
            Cow::Borrowed(_) => raw,
        })
        .collect()
}

/// Reads one logical record, following continuation lines and skipping
/// comments. Returns `None` once the stream is exhausted.
///
/// A stream that ends right after a continuation line still yields the
/// pending fields as a record.
pub(crate) fn read_record<R: BufRead>(
    lines: &mut LineReader<R>,
    options: &ParseOptions,
) -> Result<Option<Record>> {
    let delimiter = options.delimiter;
    let comment_prefix = options.comment_prefix();
    let mut pending: Vec<String> = Vec::new();
    let mut continued = false;

    while let Some(line) = lines.next_line()? {
        if is_comment(&line.content, comment_prefix) {
            tracing::trace!(line = lines.line(), "skipping comment line");
            continue;
        }

        let mut raw = split_line(&line.content, delimiter);
        let continues = raw
            .last()
            .map_or(false, |last| ends_with_unpaired_escape(last, BACKSLASH));
        if continues {
            if let Some(last) = raw.pop() {
                raw.push(&last[..last.len() - BACKSLASH.len_utf8()]);
            }
        }

        splice(&mut pending, raw, continued, delimiter);
        if continues {
            tracing::trace!(line = lines.line(), fields = pending.len(), "record continues");
            continued = true;
            continue;
        }
        return Ok(Some(finalize(pending, delimiter)));
    }

    if continued {
        return Ok(Some(finalize(pending, delimiter)));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_all(input: &str, options: &ParseOptions) -> Vec<Record> {
        let mut lines = LineReader::new(input.as_bytes());
        let mut records = Vec::new();
        while let Some(record) = read_record(&mut lines, options).unwrap() {
            records.push(record);
        }
        records
    }

    #[test]
    fn test_split_line_escaped_delimiter() {
        assert_eq!(split_line("a,b\\,c", ','), vec!["a", "b\\,c"]);
        assert_eq!(split_line("a\\\\,b", ','), vec!["a\\\\", "b"]);
        assert_eq!(split_line("", ':'), vec![""]);
        assert_eq!(split_line(":", ':'), vec!["", ""]);
    }

    #[test]
    fn test_split_line_multibyte() {
        assert_eq!(split_line("é§ü", '§'), vec!["é", "ü"]);
    }

    #[test]
    fn test_continuation_reinserts_delimiter() {
        let records = read_all("a:b\\\nc:d\n", &ParseOptions::unix());
        assert_eq!(records, vec![vec!["a", "b:c", "d"]]);
    }

    #[test]
    fn test_continuation_across_several_lines() {
        let records = read_all("a\\\nb\\\nc\nd\n", &ParseOptions::unix());
        assert_eq!(records, vec![vec!["a:b:c"], vec!["d"]]);
    }

    #[test]
    fn test_escaped_backslash_is_not_continuation() {
        let records = read_all("a:b\\\\\nc\n", &ParseOptions::unix());
        assert_eq!(records, vec![vec!["a", "b\\"], vec!["c"]]);
    }

    #[test]
    fn test_continuation_at_eof_yields_record() {
        let records = read_all("a:b\\", &ParseOptions::unix());
        assert_eq!(records, vec![vec!["a", "b"]]);
    }

    #[test]
    fn test_comment_inside_continuation_is_skipped() {
        let records = read_all("a\\\n  # note\nb\n", &ParseOptions::unix());
        assert_eq!(records, vec![vec!["a:b"]]);
    }

    #[test]
    fn test_comments_disabled() {
        let records = read_all("#a:b\n", &ParseOptions::unix().without_comments());
        assert_eq!(records, vec![vec!["#a", "b"]]);
    }

    #[test]
    fn test_crlf_terminators() {
        let records = read_all("a:b\\\r\nc\r\nd\r\n", &ParseOptions::unix());
        assert_eq!(records, vec![vec!["a", "b:c"], vec!["d"]]);
    }

    #[test]
    fn test_empty_line_is_single_empty_field() {
        let records = read_all("a\n\nb\n", &ParseOptions::unix());
        assert_eq!(records, vec![vec!["a"], vec![""], vec!["b"]]);
    }
}

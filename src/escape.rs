//! Character-level escaping and quoting primitives shared by both dialects.
//!
//! The Unix dialect escapes with a prefix character ([`escape`] /
//! [`unescape`]); RFC 4180 encloses fields in quotes and doubles embedded
//! quotes ([`enclose`] / [`unquote`]). Every helper returns
//! [`Cow::Borrowed`] when the input needs no change.

use std::borrow::Cow;

/// Escape character of the Unix dialect.
pub const BACKSLASH: char = '\\';

/// Enclosing character of the RFC 4180 dialect.
pub const QUOTE: char = '"';

/// Inserts `escape` before every occurrence of a character in `specials`.
///
/// # Examples
///
/// ```rust
/// use dsv_table::escape::escape;
///
/// assert_eq!(escape("a:b\\c", &[':', '\\'], '\\'), "a\\:b\\\\c");
/// assert_eq!(escape("plain", &[':'], '\\'), "plain");
/// ```
#[must_use]
pub fn escape<'a>(field: &'a str, specials: &[char], escape: char) -> Cow<'a, str> {
    if !field.contains(specials) {
        return Cow::Borrowed(field);
    }
    let mut out = String::with_capacity(field.len() + 4);
    for ch in field.chars() {
        if specials.contains(&ch) {
            out.push(escape);
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

/// Removes `escape` where it precedes a character in `specials`.
///
/// An escape in front of any other character is kept literally, so an
/// already-plain field comes back unchanged.
///
/// # Examples
///
/// ```rust
/// use dsv_table::escape::unescape;
///
/// assert_eq!(unescape("b\\,c", &[',', '\\'], '\\'), "b,c");
/// assert_eq!(unescape("c:\\temp", &[',', '\\'], '\\'), "c:\\temp");
/// ```
#[must_use]
pub fn unescape<'a>(field: &'a str, specials: &[char], escape: char) -> Cow<'a, str> {
    if !field.contains(escape) {
        return Cow::Borrowed(field);
    }
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == escape {
            if let Some(&next) = chars.peek() {
                if specials.contains(&next) {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

/// True when `raw` ends with an escape character that escapes nothing.
///
/// An escape always pairs with the character after it, so only the length
/// of the trailing run of escape characters matters.
#[must_use]
pub fn ends_with_unpaired_escape(raw: &str, escape: char) -> bool {
    raw.chars().rev().take_while(|&c| c == escape).count() % 2 == 1
}

/// Doubles every `quote` in `field`.
#[must_use]
pub fn double_quotes(field: &str, quote: char) -> Cow<'_, str> {
    if !field.contains(quote) {
        return Cow::Borrowed(field);
    }
    let mut out = String::with_capacity(field.len() + 2);
    for ch in field.chars() {
        if ch == quote {
            out.push(quote);
        }
        out.push(ch);
    }
    Cow::Owned(out)
}

/// Encloses `field` in `quote`, doubling embedded quotes.
///
/// # Examples
///
/// ```rust
/// use dsv_table::escape::enclose;
///
/// assert_eq!(enclose("say \"hi\"", '"'), "\"say \"\"hi\"\"\"");
/// ```
#[must_use]
pub fn enclose(field: &str, quote: char) -> String {
    let inner = double_quotes(field, quote);
    let mut out = String::with_capacity(inner.len() + 2);
    out.push(quote);
    out.push_str(&inner);
    out.push(quote);
    out
}

/// True when `raw` begins and ends with `quote` and is at least two
/// characters long.
#[must_use]
pub fn is_enclosed(raw: &str, quote: char) -> bool {
    raw.len() >= 2 * quote.len_utf8() && raw.starts_with(quote) && raw.ends_with(quote)
}

/// Strips the enclosing quotes of `raw` and collapses doubled quotes.
///
/// Fields that are not enclosed are returned unchanged.
///
/// # Examples
///
/// ```rust
/// use dsv_table::escape::unquote;
///
/// assert_eq!(unquote("\"a\"\"b\"", '"'), "a\"b");
/// assert_eq!(unquote("bare", '"'), "bare");
/// ```
#[must_use]
pub fn unquote(raw: &str, quote: char) -> Cow<'_, str> {
    if !is_enclosed(raw, quote) {
        return Cow::Borrowed(raw);
    }
    let width = quote.len_utf8();
    let inner = &raw[width..raw.len() - width];
    if !inner.contains(quote) {
        return Cow::Borrowed(inner);
    }
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars().peekable();
    while let Some(ch) = chars.next() {
        out.push(ch);
        if ch == quote && chars.peek() == Some(&quote) {
            chars.next();
        }
    }
    Cow::Owned(out)
}

//! Format Reference
//!
//! This module documents the two delimiter-separated formats as implemented
//! by this library.
//!
//! # Unix Dialect
//!
//! The format of `/etc/passwd`, `/etc/group` and similar files.
//!
//! ```text
//! # name:password:uid:gid:comment:home:shell
//! root:x:0:0:root:/root:/bin/bash
//! nobody:x:65534:65534:Kernel Overflow User\: reserved:/:/sbin/nologin
//! ```
//!
//! **Rules**:
//! - Fields are separated by one delimiter character, `:` by default
//! - A backslash escapes the next character. `\:` is a literal delimiter,
//!   `\\` a literal backslash
//! - A backslash in front of any other character is kept as-is when reading
//! - A line whose last character is an unpaired backslash continues on the
//!   next physical line. The backslash is removed and the delimiter is put
//!   back at the join point:
//!
//! ```text
//! a:b\
//! c:d
//! ```
//!
//! reads as the single record `["a", "b:c", "d"]`.
//!
//! - A line whose trimmed text starts with the comment prefix (`#` by
//!   default) is skipped, including in the middle of a continued record
//! - Lines end with `\n`; a `\r` right before it is ignored
//! - An empty line is a record holding one empty field
//! - Written output separates records with `\n`
//!
//! The stream may end right after a continuation line; the pending fields
//! still form a record.
//!
//! # RFC 4180 Dialect
//!
//! Comma-separated values as described in
//! [RFC 4180](https://www.rfc-editor.org/rfc/rfc4180).
//!
//! ```text
//! id,name,note
//! 1,Widget,"contains, a comma"
//! 2,Gadget,"says ""hi"""
//! 3,Tool,"spans
//! two lines"
//! ```
//!
//! **Rules**:
//! - Fields are separated by one delimiter character, `,` by default
//! - Any field may be enclosed in double quotes. Inside quotes the delimiter,
//!   CR and LF are ordinary characters, and `""` stands for one `"`
//! - A quoted field must close right before a delimiter or the end of the
//!   line; `"a"b` is an error
//! - An unquoted field must contain neither a quote nor a CR or LF
//! - Records end with `\r\n` or `\n`. A line break inside a quoted field is
//!   kept exactly as it appeared in the input
//! - An empty line outside a quoted field is a record with no fields
//! - Input ending inside an open quoted field is an error
//! - There are no comment lines: `#` is data
//! - Written output separates records with `\r\n`
//!
//! **When fields get quoted on output**: when they contain the delimiter, a
//! quote, CR, LF, or the configured line break. A record made of a single
//! empty field is written as `""`, and a record with no fields as an empty
//! line.
//!
//! ## Lone Quotes
//!
//! A field that starts with a quote followed directly by the delimiter is
//! read as a quoted field whose content starts with the delimiter:
//!
//! ```text
//! ",a",b      ->  [",a", "b"]
//! ```
//!
//! # Delimiter Guessing
//!
//! | Dialect | Candidates, in order |
//! |---------|----------------------|
//! | Unix | `:` `,` `;` `\|` tab |
//! | RFC 4180 | `,` `;` tab `\|` |
//!
//! The sample is parsed once per candidate; the candidate with the most
//! fields in the first record wins. Equal best counts give no answer.
//!
//! # Limitations
//!
//! - **Types**: every field is text; there is no header-row handling
//! - **Unix comments on output**: a record whose first field starts with the
//!   comment prefix is written unchanged and reads back as a comment
//! - **Unix trailing empty record**: a last record with one empty field is
//!   written as nothing and does not read back
//! - **Unix records without fields**: written as an empty line, which reads
//!   back as one empty field
//! - **Line breaks in Unix fields**: not representable. A CR ending the last
//!   field of a record is written right before the line break and reads back
//!   as part of a CRLF terminator, so it is lost
//! - **Trailing record without fields**: in either dialect a last record
//!   written as an empty line leaves nothing after the final line break and
//!   does not read back

// This module contains only documentation; no implementation code

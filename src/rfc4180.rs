//! RFC 4180 record assembly.
//!
//! Records are assembled by an explicit state machine. Each state has its own
//! transition function that takes the [`Context`] by value and hands it back
//! together with the next [`State`]:
//!
//! ```text
//!            +-------------------- open quote, line exhausted ---+
//!            v                                                   |
//!   read-ln --(line)--> read --(closed or unquoted)--> join --> validate --> add-field
//!      |                 ^  \__ open quote, pieces left __/                     |
//!      |                 +--------------- pieces left -------------------------+
//!      |                                                                        |
//!      +--(eof, nothing pending)--> end          add-record <-- line exhausted -+
//! ```
//!
//! A physical line is split naively on every delimiter. Pieces belonging to
//! one quoted field are glued back together with the delimiter, and pieces
//! from consecutive lines with the line terminator that separated them, so
//! both `"a,b"` and a quoted field spanning lines come back intact.

use crate::escape::QUOTE;
use crate::parser::LineReader;
use crate::{Dialect, Error, Record, Result};
use std::collections::VecDeque;
use std::io::BufRead;

/// States of the record assembler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum State {
    ReadLine,
    Read,
    Join,
    Validate,
    AddField,
    AddRecord,
    End,
}

impl State {
    pub(crate) const fn name(&self) -> &'static str {
        match self {
            State::ReadLine => "read-ln",
            State::Read => "read",
            State::Join => "join",
            State::Validate => "validate",
            State::AddField => "add-field",
            State::AddRecord => "add-record",
            State::End => "end",
        }
    }
}

/// Quotation status of the field being assembled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) enum Quotation {
    /// Does not start with a quote, or has text after its closing quote.
    #[default]
    Unquoted,
    /// Opened and closed within a single piece.
    Quoted,
    /// Opened, not yet closed.
    QuoteBegin,
    /// Closed by a piece after the one that opened it.
    QuoteEnd,
    /// The field so far is a lone quote character.
    QuoteBeginOrEnd,
}

impl Quotation {
    fn is_open(self) -> bool {
        matches!(self, Quotation::QuoteBegin | Quotation::QuoteBeginOrEnd)
    }

    fn is_closed(self) -> bool {
        matches!(self, Quotation::Quoted | Quotation::QuoteEnd)
    }
}

/// Incremental scan of the quote structure of a field.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
enum Scan {
    #[default]
    Empty,
    Unquoted,
    InQuotes,
    /// A quote inside a quoted field: either the closing quote or the first
    /// half of a doubled quote.
    QuoteSeen,
    /// Text after the closing quote.
    Trailing,
}

impl Scan {
    fn feed(self, ch: char) -> Scan {
        match (self, ch) {
            (Scan::Empty, QUOTE) => Scan::InQuotes,
            (Scan::Empty, _) => Scan::Unquoted,
            (Scan::InQuotes, QUOTE) => Scan::QuoteSeen,
            (Scan::QuoteSeen, QUOTE) => Scan::InQuotes,
            (Scan::QuoteSeen, _) => Scan::Trailing,
            (state, _) => state,
        }
    }

    fn feed_str(self, text: &str) -> Scan {
        text.chars().fold(self, Scan::feed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Fragment {
    Piece(String),
    LineBreak(&'static str),
}

/// Accumulators threaded through the transitions of one record.
#[derive(Clone, Debug)]
pub(crate) struct Context {
    delimiter: char,
    line: usize,
    /// Raw pieces of the current physical line not consumed yet.
    pieces: VecDeque<String>,
    terminator: &'static str,
    /// The field buffer.
    buffer: Vec<Fragment>,
    scan: Scan,
    status: Quotation,
    field: String,
    record: Record,
}

impl Context {
    pub(crate) fn new(delimiter: char) -> Self {
        Context {
            delimiter,
            line: 0,
            pieces: VecDeque::new(),
            terminator: "",
            buffer: Vec::new(),
            scan: Scan::Empty,
            status: Quotation::Unquoted,
            field: String::new(),
            record: Record::new(),
        }
    }

    fn push_piece(&mut self, piece: String) {
        if matches!(self.buffer.last(), Some(Fragment::Piece(_))) {
            self.scan = self.scan.feed(self.delimiter);
        }
        self.scan = self.scan.feed_str(&piece);
        self.buffer.push(Fragment::Piece(piece));
    }

    fn push_line_break(&mut self) {
        self.scan = self.scan.feed_str(self.terminator);
        self.buffer.push(Fragment::LineBreak(self.terminator));
    }

    fn piece_count(&self) -> usize {
        self.buffer
            .iter()
            .filter(|f| matches!(f, Fragment::Piece(_)))
            .count()
    }

    fn classify(&self) -> Quotation {
        match self.scan {
            Scan::Empty | Scan::Unquoted | Scan::Trailing => Quotation::Unquoted,
            Scan::QuoteSeen if self.piece_count() == 1 => Quotation::Quoted,
            Scan::QuoteSeen => Quotation::QuoteEnd,
            Scan::InQuotes => match self.buffer.as_slice() {
                [Fragment::Piece(p)] if p.len() == 1 => Quotation::QuoteBeginOrEnd,
                _ => Quotation::QuoteBegin,
            },
        }
    }

    /// Buffered fragments concatenated, with the delimiter between two
    /// adjacent pieces.
    fn joined(&self) -> String {
        let mut out = String::new();
        let mut previous_piece = false;
        for fragment in &self.buffer {
            match fragment {
                Fragment::Piece(piece) => {
                    if previous_piece {
                        out.push(self.delimiter);
                    }
                    out.push_str(piece);
                    previous_piece = true;
                }
                Fragment::LineBreak(terminator) => {
                    out.push_str(terminator);
                    previous_piece = false;
                }
            }
        }
        out
    }
}

/// Fetches the next physical line and splits it into raw pieces.
pub(crate) fn read_line<R: BufRead>(
    mut ctx: Context,
    lines: &mut LineReader<R>,
) -> Result<(State, Context)> {
    let Some(line) = lines.next_line()? else {
        if ctx.buffer.is_empty() && ctx.record.is_empty() {
            return Ok((State::End, ctx));
        }
        return Err(Error::premature_eof(
            lines.line(),
            State::ReadLine.name(),
            &ctx.joined(),
        ));
    };
    ctx.line = lines.line();
    ctx.terminator = line.terminator;
    // An empty line outside a quoted field is a record with no fields; `[""]`
    // is always written as `""`.
    if line.content.is_empty() && ctx.buffer.is_empty() {
        ctx.pieces.clear();
        return Ok((State::Read, ctx));
    }
    ctx.pieces = Dialect::Rfc4180
        .split_record(&line.content, ctx.delimiter)
        .into_iter()
        .map(str::to_string)
        .collect();
    Ok((State::Read, ctx))
}

/// Moves the next raw piece into the field buffer and classifies it.
pub(crate) fn read(mut ctx: Context) -> (State, Context) {
    let Some(piece) = ctx.pieces.pop_front() else {
        return (State::AddRecord, ctx);
    };
    ctx.push_piece(piece);
    ctx.status = ctx.classify();

    if !ctx.status.is_open() {
        return (State::Join, ctx);
    }
    if ctx.pieces.is_empty() {
        ctx.push_line_break();
        return (State::ReadLine, ctx);
    }
    (State::Read, ctx)
}

/// Concatenates the field buffer into one raw field.
pub(crate) fn join(mut ctx: Context) -> (State, Context) {
    ctx.field = ctx.joined();
    ctx.buffer.clear();
    (State::Validate, ctx)
}

/// Rejects fields that are not fully quoted yet contain a line break or a
/// quote.
pub(crate) fn validate(ctx: Context) -> Result<(State, Context)> {
    if !ctx.status.is_closed() {
        if ctx.field.contains(&['\r', '\n'][..]) {
            return Err(Error::illegal_line_break(
                ctx.line,
                State::Validate.name(),
                &ctx.field,
            ));
        }
        if ctx.field.contains(QUOTE) {
            return Err(Error::unescaped_quote(
                ctx.line,
                State::Validate.name(),
                &ctx.field,
            ));
        }
    }
    Ok((State::AddField, ctx))
}

/// Finalizes the validated field and appends it to the record.
pub(crate) fn add_field(mut ctx: Context) -> (State, Context) {
    let raw = std::mem::take(&mut ctx.field);
    let value = if ctx.status.is_closed() {
        Dialect::Rfc4180.finalize_field(&raw, ctx.delimiter).into_owned()
    } else {
        raw
    };
    ctx.record.push(value);
    ctx.scan = Scan::Empty;
    ctx.status = Quotation::Unquoted;

    if ctx.pieces.is_empty() {
        (State::AddRecord, ctx)
    } else {
        (State::Read, ctx)
    }
}

/// Hands the completed record out of the context.
pub(crate) fn add_record(ctx: Context) -> Record {
    ctx.record
}

fn step<R: BufRead>(
    state: State,
    ctx: Context,
    lines: &mut LineReader<R>,
) -> Result<(State, Context)> {
    match state {
        State::ReadLine => read_line(ctx, lines),
        State::Read => Ok(read(ctx)),
        State::Join => Ok(join(ctx)),
        State::Validate => validate(ctx),
        State::AddField => Ok(add_field(ctx)),
        State::AddRecord | State::End => Ok((state, ctx)),
    }
}

/// Runs the state machine from `read-ln` until a record is complete.
///
/// Returns `None` when the stream ends between records. The next call starts
/// again at `read-ln` with a fresh context.
pub(crate) fn read_record<R: BufRead>(
    lines: &mut LineReader<R>,
    delimiter: char,
) -> Result<Option<Record>> {
    let mut state = State::ReadLine;
    let mut ctx = Context::new(delimiter);
    loop {
        match state {
            State::AddRecord => return Ok(Some(add_record(ctx))),
            State::End => return Ok(None),
            _ => {
                tracing::trace!(state = state.name(), line = ctx.line, "rfc4180 transition");
                (state, ctx) = step(state, ctx, lines)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context_with(pieces: &[&str]) -> Context {
        let mut ctx = Context::new(',');
        ctx.line = 1;
        ctx.terminator = "\n";
        ctx.pieces = pieces.iter().map(|p| p.to_string()).collect();
        ctx
    }

    fn read_all(input: &str) -> Result<Vec<Record>> {
        let mut lines = LineReader::new(input.as_bytes());
        let mut records = Vec::new();
        while let Some(record) = read_record(&mut lines, ',')? {
            records.push(record);
        }
        Ok(records)
    }

    #[test]
    fn test_read_line_at_eof_ends() {
        let mut lines = LineReader::new(&b""[..]);
        let (state, _) = read_line(Context::new(','), &mut lines).unwrap();
        assert_eq!(state, State::End);
    }

    #[test]
    fn test_read_line_splits_pieces() {
        let mut lines = LineReader::new(&b"a,\"b,c\"\r\n"[..]);
        let (state, ctx) = read_line(Context::new(','), &mut lines).unwrap();
        assert_eq!(state, State::Read);
        assert_eq!(ctx.terminator, "\r\n");
        assert_eq!(ctx.pieces, vec!["a", "\"b", "c\""]);
    }

    #[test]
    fn test_read_unquoted_goes_to_join() {
        let (state, ctx) = read(context_with(&["a", "b"]));
        assert_eq!(state, State::Join);
        assert_eq!(ctx.status, Quotation::Unquoted);
        assert_eq!(ctx.pieces.len(), 1);
    }

    #[test]
    fn test_read_quote_begin_keeps_reading() {
        let (state, ctx) = read(context_with(&["\"b", "c\""]));
        assert_eq!(state, State::Read);
        assert_eq!(ctx.status, Quotation::QuoteBegin);

        let (state, ctx) = read(ctx);
        assert_eq!(state, State::Join);
        assert_eq!(ctx.status, Quotation::QuoteEnd);
        assert_eq!(ctx.joined(), "\"b,c\"");
    }

    #[test]
    fn test_read_open_quote_at_line_end_fetches_line() {
        let (state, ctx) = read(context_with(&["\"a"]));
        assert_eq!(state, State::ReadLine);
        assert_eq!(ctx.buffer.last(), Some(&Fragment::LineBreak("\n")));
    }

    #[test]
    fn test_lone_quote_is_ambiguous() {
        let (state, ctx) = read(context_with(&["\"", "x\""]));
        assert_eq!(state, State::Read);
        assert_eq!(ctx.status, Quotation::QuoteBeginOrEnd);

        let (state, ctx) = read(ctx);
        assert_eq!(state, State::Join);
        assert_eq!(ctx.status, Quotation::QuoteEnd);
        assert_eq!(ctx.joined(), "\",x\"");
    }

    #[test]
    fn test_fully_quoted_single_piece() {
        let (_, ctx) = read(context_with(&["\"a\"\"b\""]));
        assert_eq!(ctx.status, Quotation::Quoted);
    }

    #[test]
    fn test_join_then_validate_rejects_stray_quote() {
        let (state, ctx) = read(context_with(&["a\"b"]));
        assert_eq!(state, State::Join);
        let (state, ctx) = join(ctx);
        assert_eq!(state, State::Validate);
        let err = validate(ctx).unwrap_err();
        assert!(matches!(err, Error::UnescapedQuote { state: "validate", .. }));
    }

    #[test]
    fn test_validate_rejects_text_after_closing_quote() {
        let (_, ctx) = read(context_with(&["\"a\"b"]));
        assert_eq!(ctx.status, Quotation::Unquoted);
        let (_, ctx) = join(ctx);
        assert!(matches!(validate(ctx), Err(Error::UnescapedQuote { .. })));
    }

    #[test]
    fn test_validate_rejects_carriage_return() {
        let (_, ctx) = read(context_with(&["a\rb"]));
        let (_, ctx) = join(ctx);
        assert!(matches!(validate(ctx), Err(Error::IllegalLineBreak { line: 1, .. })));
    }

    #[test]
    fn test_add_field_unquotes_and_continues() {
        let (_, ctx) = read(context_with(&["\"x\"\"y\"", "z"]));
        let (_, ctx) = join(ctx);
        let (_, ctx) = validate(ctx).unwrap();
        let (state, ctx) = add_field(ctx);
        assert_eq!(state, State::Read);
        assert_eq!(ctx.record, vec!["x\"y"]);
    }

    #[test]
    fn test_add_field_last_piece_completes_record() {
        let (_, ctx) = read(context_with(&["z"]));
        let (_, ctx) = join(ctx);
        let (_, ctx) = validate(ctx).unwrap();
        let (state, ctx) = add_field(ctx);
        assert_eq!(state, State::AddRecord);
        assert_eq!(add_record(ctx), vec!["z"]);
    }

    #[test]
    fn test_multiline_field_keeps_crlf() {
        let records = read_all("\"a\r\nb\",c\r\nd\r\n").unwrap();
        assert_eq!(records, vec![vec!["a\r\nb", "c"], vec!["d"]]);
    }

    #[test]
    fn test_quoted_delimiters_and_empty_fields() {
        let records = read_all("\"\",\",\",,\n").unwrap();
        assert_eq!(records, vec![vec!["", ",", "", ""]]);
    }

    #[test]
    fn test_premature_eof() {
        let err = read_all("a,\"b\nc").unwrap_err();
        match err {
            Error::PrematureEof { line, state, context } => {
                assert_eq!(line, 2);
                assert_eq!(state, "read-ln");
                assert_eq!(context, "\"b\nc");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_lone_quote_at_eof_is_premature() {
        assert!(matches!(read_all("a,\""), Err(Error::PrematureEof { .. })));
    }

    #[test]
    fn test_read_line_empty_line_has_no_pieces() {
        let mut lines = LineReader::new(&b"\r\na\r\n"[..]);
        let (state, ctx) = read_line(Context::new(','), &mut lines).unwrap();
        assert_eq!(state, State::Read);
        assert!(ctx.pieces.is_empty());
        let (state, ctx) = read(ctx);
        assert_eq!(state, State::AddRecord);
        assert!(add_record(ctx).is_empty());
    }

    #[test]
    fn test_empty_line_is_record_without_fields() {
        let records = read_all("a\n\n\"\"\nb").unwrap();
        assert_eq!(records, vec![vec!["a"], vec![], vec![""], vec!["b"]]);
    }

    #[test]
    fn test_empty_line_inside_quotes_is_content() {
        let records = read_all("\"a\n\nb\"\n").unwrap();
        assert_eq!(records, vec![vec!["a\n\nb"]]);
    }

    #[test]
    fn test_trailing_newline_adds_no_record() {
        let records = read_all("a,b\n").unwrap();
        assert_eq!(records, vec![vec!["a", "b"]]);
    }
}

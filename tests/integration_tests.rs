use dsv_table::{
    from_reader, from_str, from_str_with_options, guess_delimiter, guess_delimiter_among, table,
    to_string, to_string_with_options, to_writer, BuildOptions, Builder, Dialect, Error,
    ParseOptions, Parser, Table,
};
use std::io::Cursor;

#[test]
fn test_passwd_file() {
    let passwd = "\
# /etc/passwd
root:x:0:0:root:/root:/bin/bash
daemon:x:1:1:daemon:/usr/sbin:/usr/sbin/nologin
";
    let table = from_str(passwd, Dialect::Unix).unwrap();
    println!("passwd table: {:?}", table);

    assert_eq!(table.len(), 2);
    assert_eq!(table[0][0], "root");
    assert_eq!(table[1][6], "/usr/sbin/nologin");
    assert_eq!(table.max_width(), 7);
}

#[test]
fn test_unix_escaped_delimiter_with_comma() {
    let options = ParseOptions::unix().with_delimiter(',');
    let table = from_str_with_options("a,b\\,c", &options).unwrap();
    assert_eq!(table, table![["a", "b,c"]]);
}

#[test]
fn test_unix_continuation_literal_case() {
    let table = from_str("a:b\\\nc:d", Dialect::Unix).unwrap();
    assert_eq!(table, table![["a", "b:c", "d"]]);
}

#[test]
fn test_unix_comment_lines_never_produce_records() {
    let input = "#a:b:c\n   # indented:comment\nx:y\n#\n";
    let table = from_str(input, Dialect::Unix).unwrap();
    assert_eq!(table, table![["x", "y"]]);
}

#[test]
fn test_unix_custom_comment_prefix() {
    let options = ParseOptions::unix().with_comment_prefix("//");
    let table = from_str_with_options("// note\n#not:a:comment\n", &options).unwrap();
    assert_eq!(table, table![["#not", "a", "comment"]]);
}

#[test]
fn test_rfc4180_quoting() {
    let table = from_str("a,\"b,c\"", Dialect::Rfc4180).unwrap();
    assert_eq!(table, table![["a", "b,c"]]);
}

#[test]
fn test_rfc4180_doubled_quotes() {
    let table = from_str("\"a\"\"b\"", Dialect::Rfc4180).unwrap();
    assert_eq!(table, table![["a\"b"]]);
}

#[test]
fn test_rfc4180_multiline_field() {
    let table = from_str("\"a\nb\",c", Dialect::Rfc4180).unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table[0], vec!["a\nb".to_string(), "c".to_string()]);
}

#[test]
fn test_rfc4180_bare_carriage_return_is_illegal() {
    let err = from_str("a\rb,c", Dialect::Rfc4180).unwrap_err();
    assert!(matches!(err, Error::IllegalLineBreak { line: 1, .. }));
}

#[test]
fn test_rfc4180_crlf_separates_records() {
    let table = from_str("a\r\nb,c", Dialect::Rfc4180).unwrap();
    assert_eq!(table, table![["a"], ["b", "c"]]);
}

#[test]
fn test_rfc4180_unescaped_quote() {
    let err = from_str("a,b\"c\n", Dialect::Rfc4180).unwrap_err();
    match err {
        Error::UnescapedQuote { line, field, .. } => {
            assert_eq!(line, 1);
            assert_eq!(field, "b\"c");
        }
        other => panic!("Expected unescaped quote, got {:?}", other),
    }
}

#[test]
fn test_rfc4180_premature_eof() {
    let err = from_str("a,b\n\"c,d\n", Dialect::Rfc4180).unwrap_err();
    assert!(matches!(err, Error::PrematureEof { .. }));
    assert_eq!(err.line(), Some(2));
}

#[test]
fn test_rfc4180_comment_lines_are_data() {
    let table = from_str("#a,b\n", Dialect::Rfc4180).unwrap();
    assert_eq!(table, table![["#a", "b"]]);
}

#[test]
fn test_ragged_records() {
    let table = from_str("a\nb,c,d\n\ne,f", Dialect::Rfc4180).unwrap();
    assert_eq!(table, table![["a"], ["b", "c", "d"], [], ["e", "f"]]);
}

#[test]
fn test_rfc4180_record_without_fields_roundtrip() {
    let table = table![[], ["a"], [""], [], ["b", ""]];
    let text = to_string(&table, Dialect::Rfc4180).unwrap();
    assert_eq!(text, "\r\na\r\n\"\"\r\n\r\nb,");
    assert_eq!(from_str(&text, Dialect::Rfc4180).unwrap(), table);
}

#[test]
fn test_empty_input() {
    assert_eq!(from_str("", Dialect::Rfc4180).unwrap(), Table::new());
    assert_eq!(from_str("", Dialect::Unix).unwrap(), Table::new());
}

#[test]
fn test_build_defaults() {
    let table = table![["a", "b"], ["c", "d"]];
    assert_eq!(to_string(&table, Dialect::Rfc4180).unwrap(), "a,b\r\nc,d");
    assert_eq!(to_string(&table, Dialect::Unix).unwrap(), "a:b\nc:d");
}

#[test]
fn test_build_semicolon_csv() {
    let options = BuildOptions::rfc4180().with_delimiter(';');
    let text = to_string_with_options(&table![["1,5", "a;b"]], &options).unwrap();
    assert_eq!(text, "1,5;\"a;b\"");
}

#[test]
fn test_build_then_parse_twice_is_stable() {
    let table = table![["x\"y", "p,q"], ["line\nbreak", ""]];
    let text = to_string(&table, Dialect::Rfc4180).unwrap();
    let first = from_str(&text, Dialect::Rfc4180).unwrap();
    let second = from_str(&text, Dialect::Rfc4180).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, table);

    let rebuilt = to_string(&first, Dialect::Rfc4180).unwrap();
    assert_eq!(rebuilt, text);
}

#[test]
fn test_writer_and_reader() {
    let table = table![["id", "name"], ["1", "Ada"]];
    let mut buffer = Vec::new();
    to_writer(&mut buffer, &table, Dialect::Unix).unwrap();
    let back = from_reader(Cursor::new(buffer), Dialect::Unix).unwrap();
    assert_eq!(back, table);
}

#[test]
fn test_streaming_parser_and_builder() {
    let input = "a,b\r\n\"c\r\nd\",e\r\n";
    let parser = Parser::new(input.as_bytes(), ParseOptions::rfc4180()).unwrap();

    let mut builder = Builder::new(Vec::new(), BuildOptions::unix()).unwrap();
    for record in parser {
        builder.write_record(&record.unwrap()).unwrap();
    }
    assert_eq!(builder.records_written(), 2);

    let text = String::from_utf8(builder.into_inner()).unwrap();
    assert_eq!(text, "a:b\nc\r\nd:e");
}

#[test]
fn test_guess_delimiter() {
    assert_eq!(guess_delimiter("a:b,c,d", Dialect::Unix), Some(','));
    assert_eq!(guess_delimiter("a,b:c", Dialect::Unix), None);
    assert_eq!(guess_delimiter("a\tb\tc\n1\t2\t3", Dialect::Rfc4180), Some('\t'));
    assert_eq!(guess_delimiter_among("a-b-c,d", Dialect::Rfc4180, &['-', ',']), Some('-'));
}

#[test]
fn test_guessed_delimiter_parses() {
    let sample = "name;city\n\"Doe; Jane\";Paris\n";
    let delimiter = guess_delimiter(sample, Dialect::Rfc4180).unwrap();
    let options = ParseOptions::rfc4180().with_delimiter(delimiter);
    let table = from_str_with_options(sample, &options).unwrap();
    assert_eq!(table, table![["name", "city"], ["Doe; Jane", "Paris"]]);
}

#[test]
fn test_invalid_options() {
    let options = ParseOptions::rfc4180().with_delimiter('"');
    assert!(matches!(
        from_str_with_options("a", &options),
        Err(Error::InvalidOptions(_))
    ));
    let options = BuildOptions::unix().with_delimiter('\\');
    assert!(matches!(
        to_string_with_options(&table![["a"]], &options),
        Err(Error::InvalidOptions(_))
    ));
}

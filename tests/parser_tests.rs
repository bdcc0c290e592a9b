// tests/parser_tests.rs

mod common;

use common::{assert_parse_error_at, fixture, mem, open_fixture, pairs};
use grammarc::grammar::{parse_file_with, parse_str_with};
use grammarc::{parse_file, parse_str, ErrorType, Grammar, Parser, ParserConfig, Rule};

// ---
// Terminal symbols
// ---

#[test]
fn test_terminal_fixtures() {
    let cases = [
        ("single_terminal_1.grm", Some('[')),
        ("single_terminal_2.grm", Some('p')),
        ("bad_terminal_1.grm", None),
        ("bad_terminal_2.grm", None),
    ];
    for (name, expected) in cases {
        let mut file = open_fixture(name);
        let mut parser = Parser::new(&mut file);
        let result = parser.read_terminal(true);
        match expected {
            Some(ch) => assert_eq!(result.unwrap(), Some(ch), "fixture {name}"),
            None => {
                let err = result.expect_err(name);
                assert_parse_error_at(&err, 0);
            }
        }
    }
}

#[test]
fn test_mismatched_quotes_fail_even_when_optional() {
    let mut file = mem("'x\"");
    let err = Parser::new(&mut file).read_terminal(false).unwrap_err();
    assert_parse_error_at(&err, 0);
    assert!(err.to_string().contains("closes with"));
}

#[test]
fn test_terminal_rejects_unrecognized_character() {
    let mut file = mem("'='");
    let mut parser = Parser::new(&mut file);
    assert_eq!(parser.read_terminal(false).unwrap(), None);
    drop(parser);
    assert_eq!(file.position().unwrap(), 0);
}

// ---
// Rules and grammars
// ---

#[test]
fn test_two_rules_in_source_order() {
    let grammar = parse_str("foo = 'x'\nbar = 'y'").unwrap();
    assert_eq!(
        pairs(&grammar),
        vec![("foo".to_string(), 'x'), ("bar".to_string(), 'y')]
    );
}

#[test]
fn test_two_rules_from_file() {
    let grammar = parse_file(fixture("two_rules.grm")).unwrap();
    assert_eq!(grammar, Grammar::new(vec![Rule::new("foo", 'x'), Rule::new("bar", 'y')]));
}

#[test]
fn test_blank_lines_crlf_and_spacing() {
    let grammar = parse_file(fixture("spaced_rules.grm")).unwrap();
    assert_eq!(
        pairs(&grammar),
        vec![
            ("open".to_string(), '['),
            ("close".to_string(), ']'),
            ("pipe".to_string(), '|'),
            ("under_score_1".to_string(), '_'),
        ]
    );
}

#[test]
fn test_indented_rule_continues_grammar() {
    let grammar = parse_str("a = 'b'\n  c = 'd'\n  \n   e='f'").unwrap();
    assert_eq!(
        pairs(&grammar),
        vec![
            ("a".to_string(), 'b'),
            ("c".to_string(), 'd'),
            ("e".to_string(), 'f'),
        ]
    );
}

#[test]
fn test_empty_input_is_empty_grammar() {
    assert!(parse_str("").unwrap().is_empty());
    assert!(parse_str("\n\n   \n").unwrap().is_empty());
}

#[test]
fn test_rule_read_returns_none_without_identifier() {
    let mut file = mem("= 'x'");
    let mut parser = Parser::new(&mut file);
    assert_eq!(parser.read_rule().unwrap(), None);
    drop(parser);
    assert_eq!(file.position().unwrap(), 0);
}

#[test]
fn test_missing_assignment_is_fatal() {
    let err = parse_file(fixture("missing_assignment.grm")).unwrap_err();
    assert_parse_error_at(&err, 13);
}

#[test]
fn test_missing_terminal_is_fatal() {
    let err = parse_str("foo = x").unwrap_err();
    assert_parse_error_at(&err, 6);
}

#[test]
fn test_mismatched_quotes_in_rule_is_fatal() {
    let err = parse_file(fixture("mismatched_quotes.grm")).unwrap_err();
    assert_parse_error_at(&err, 16);
}

#[test]
fn test_two_rules_on_one_line_is_fatal() {
    let err = parse_str("a = 'b' c = 'd'").unwrap_err();
    assert_parse_error_at(&err, 7);
}

#[test]
fn test_unrecognized_line_ends_grammar() {
    let grammar = parse_file(fixture("trailing_content.grm")).unwrap();
    assert_eq!(pairs(&grammar), vec![("foo".to_string(), 'x')]);
}

// ---
// Configuration
// ---

#[test]
fn test_require_eof_rejects_trailing_content() {
    let config = ParserConfig {
        require_eof: true,
        ..ParserConfig::default()
    };
    let err = parse_file_with(fixture("trailing_content.grm"), config).unwrap_err();
    assert_parse_error_at(&err, 10);
}

#[test]
fn test_blank_lines_can_be_disallowed() {
    let config = ParserConfig {
        allow_blank_lines: false,
        ..ParserConfig::default()
    };
    let grammar = parse_str_with("a = 'b'\n\nc = 'd'\n", config.clone()).unwrap();
    assert_eq!(pairs(&grammar), vec![("a".to_string(), 'b')]);

    let strict = ParserConfig {
        require_eof: true,
        ..config
    };
    let err = parse_str_with("a = 'b'\n\nc = 'd'\n", strict).unwrap_err();
    assert_parse_error_at(&err, 8);
}

#[test]
fn test_trailing_spaces_can_be_disallowed() {
    let err = parse_str_with("a = 'b'  \n", ParserConfig::strict()).unwrap_err();
    assert_parse_error_at(&err, 7);
    assert!(parse_str_with("a = 'b'\nc = 'd'", ParserConfig::strict()).is_ok());
}

// ---
// Output and diagnostics
// ---

#[test]
fn test_grammar_serializes_as_rule_list() {
    let grammar = parse_str("foo = 'x'\n").unwrap();
    let json = serde_json::to_string(&grammar).unwrap();
    assert_eq!(json, r#"[{"identifier":"foo","terminal":"x"}]"#);
    let back: Grammar = serde_json::from_str(&json).unwrap();
    assert_eq!(back, grammar);
}

#[test]
fn test_grammar_display_reparses() {
    let grammar = parse_file(fixture("spaced_rules.grm")).unwrap();
    let reparsed = parse_str(&grammar.to_string()).unwrap();
    assert_eq!(reparsed, grammar);
}

#[test]
fn test_file_errors_render_with_source() {
    let err = parse_file(fixture("mismatched_quotes.grm")).unwrap_err();
    let report = format!("{:?}", miette::Report::new(err));
    assert!(report.contains("mismatched_quotes.grm"));
    assert!(report.contains("same quote"));
}

#[test]
fn test_missing_file_is_io_error() {
    let err = parse_file(fixture("no_such_grammar.grm")).unwrap_err();
    assert_eq!(err.error_type(), ErrorType::Io);
}

//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::path::PathBuf;

use grammarc::{CursorFile, GrammarError, Rule};

/// Path of a fixture under `tests/grammars/`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("grammars")
        .join(name)
}

pub fn open_fixture(name: &str) -> CursorFile {
    CursorFile::open(fixture(name), "r")
        .unwrap_or_else(|e| panic!("failed to open fixture {name}: {e}"))
}

pub fn mem(text: &str) -> CursorFile {
    CursorFile::from_text("mem", text)
}

/// `(identifier, terminal)` pairs, for compact assertions.
pub fn pairs<'a>(rules: impl IntoIterator<Item = &'a Rule>) -> Vec<(String, char)> {
    rules
        .into_iter()
        .map(|rule| (rule.identifier().to_string(), rule.terminal()))
        .collect()
}

pub fn assert_parse_error_at(err: &GrammarError, offset: u64) {
    assert_eq!(err.error_type(), grammarc::ErrorType::Parse, "unexpected error: {err}");
    assert_eq!(err.offset(), Some(offset), "wrong offset for: {err}");
}

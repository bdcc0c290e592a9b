//! Grammar-definition language: rules, classifiers and the parser.

use std::path::Path;

use crate::config::ParserConfig;
use crate::cursor::CursorFile;
use crate::diagnostics::{ErrorType, GrammarError, Result};

pub mod ast;
pub mod classify;
pub mod parser;

pub use ast::{Grammar, Rule};
pub use parser::Parser;

/// Parses the grammar file at `path` with default settings.
pub fn parse_file(path: impl AsRef<Path>) -> Result<Grammar> {
    parse_file_with(path, ParserConfig::default())
}

pub fn parse_file_with(path: impl AsRef<Path>, config: ParserConfig) -> Result<Grammar> {
    let path = path.as_ref();
    let result = CursorFile::with_open(path, "r", |file| {
        Parser::with_config(file, config).read_grammar()
    });
    result.map_err(|err| attach_file_source(err, path))
}

fn attach_file_source(err: GrammarError, path: &Path) -> GrammarError {
    if err.error_type() != ErrorType::Parse {
        return err;
    }
    match std::fs::read(path) {
        Ok(bytes) => err.with_source(
            path.display().to_string(),
            String::from_utf8_lossy(&bytes).into_owned(),
        ),
        Err(_) => err,
    }
}

/// Parses grammar text held in memory with default settings.
pub fn parse_str(text: &str) -> Result<Grammar> {
    parse_str_with(text, ParserConfig::default())
}

pub fn parse_str_with(text: &str, config: ParserConfig) -> Result<Grammar> {
    let mut file = CursorFile::from_text("<input>", text);
    Parser::with_config(&mut file, config)
        .read_grammar()
        .map_err(|err| err.with_source("<input>", text))
}

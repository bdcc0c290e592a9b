pub use crate::diagnostics::{ErrorType, GrammarError, Result};

pub mod config;
pub mod cursor;
pub mod diagnostics;
pub mod grammar;
pub mod reader;

pub use crate::config::ParserConfig;
pub use crate::cursor::{CursorFile, OpenMode};
pub use crate::grammar::{parse_file, parse_str, Grammar, Parser, Rule};
pub use crate::reader::{Match, Reader, Token};

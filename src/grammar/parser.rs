//! Recursive-descent recognition of grammar files.
//!
//! The grammar-specific readers are assembled from the generic combinators
//! in [`crate::reader`]. Each rule sits on its own line:
//!
//! ```text
//! digit_zero = '0'
//! open       = "["
//! ```
//!
//! Blank lines and indentation before a rule are skipped unless
//! `allow_blank_lines` is off. A line that does not start with an identifier
//! ends the grammar. Once an identifier is read, the assignment and terminal are required and their
//! absence is a fatal [`GrammarError::Parse`].

use tracing::{debug, trace};

use crate::config::ParserConfig;
use crate::cursor::CursorFile;
use crate::diagnostics::{GrammarError, Result};
use crate::err_parse;
use crate::grammar::ast::{Grammar, Rule};
use crate::grammar::classify::{
    is_character, is_digit, is_letter, is_space, is_terminal_quote, is_underscore,
};
use crate::reader::{
    all, any, char_eq, char_where, from_fn, sequence, BoxedReader, Match, Reader, Token,
};

// ============================================================================
// READER BUILDERS
// ============================================================================

pub fn terminal_quote_reader() -> BoxedReader {
    char_where(is_terminal_quote)
}

pub fn character_reader() -> BoxedReader {
    char_where(is_character)
}

/// `quote character quote`. Whether both quotes agree is checked by the
/// caller after the structural match.
pub fn terminal_reader() -> BoxedReader {
    all(vec![
        terminal_quote_reader(),
        character_reader(),
        terminal_quote_reader(),
    ])
}

/// One letter followed by letters, digits or underscores.
pub fn identifier_reader() -> BoxedReader {
    all(vec![
        char_where(is_letter),
        sequence(any(vec![
            char_where(is_letter),
            char_where(is_digit),
            char_where(is_underscore),
        ])),
    ])
}

/// `=` with any number of spaces on either side.
pub fn assignment_reader() -> BoxedReader {
    all(vec![
        sequence(char_where(is_space)),
        char_eq('='),
        sequence(char_where(is_space)),
    ])
}

/// `\n` or `\r\n`.
pub fn newline_reader() -> BoxedReader {
    any(vec![char_eq('\n'), all(vec![char_eq('\r'), char_eq('\n')])])
}

/// Zero-width match at end of data.
pub fn end_of_data_reader() -> BoxedReader {
    from_fn(|file| {
        Ok(match file.read_char()? {
            None => Match::Matched(Token::Seq(vec![])),
            Some(_) => Match::Miss,
        })
    })
}

fn line_end_reader(allow_trailing_spaces: bool) -> BoxedReader {
    let terminator = any(vec![newline_reader(), end_of_data_reader()]);
    if allow_trailing_spaces {
        all(vec![sequence(char_where(is_space)), terminator])
    } else {
        terminator
    }
}

struct Readers {
    terminal: BoxedReader,
    identifier: BoxedReader,
    assignment: BoxedReader,
    line_end: BoxedReader,
    blank_lines: BoxedReader,
    indent: BoxedReader,
    end_of_data: BoxedReader,
}

impl Readers {
    fn new(config: &ParserConfig) -> Self {
        Self {
            terminal: terminal_reader(),
            identifier: identifier_reader(),
            assignment: assignment_reader(),
            line_end: line_end_reader(config.allow_trailing_spaces),
            blank_lines: sequence(line_end_reader(true)),
            indent: sequence(char_where(is_space)),
            end_of_data: end_of_data_reader(),
        }
    }
}

// ============================================================================
// PARSER
// ============================================================================

pub struct Parser<'f> {
    file: &'f mut CursorFile,
    config: ParserConfig,
    readers: Readers,
    grammar: Option<Grammar>,
}

impl<'f> Parser<'f> {
    pub fn new(file: &'f mut CursorFile) -> Self {
        Self::with_config(file, ParserConfig::default())
    }

    pub fn with_config(file: &'f mut CursorFile, config: ParserConfig) -> Self {
        let readers = Readers::new(&config);
        Self {
            file,
            config,
            readers,
            grammar: None,
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Recognizes the rest of the file as a grammar and keeps the result.
    pub fn parse(&mut self) -> Result<&Grammar> {
        let grammar = self.read_grammar()?;
        Ok(&*self.grammar.insert(grammar))
    }

    /// The grammar from the last successful [`Parser::parse`].
    pub fn grammar(&self) -> Option<&Grammar> {
        self.grammar.as_ref()
    }

    pub fn into_grammar(self) -> Option<Grammar> {
        self.grammar
    }

    pub fn read_grammar(&mut self) -> Result<Grammar> {
        self.read_rules().map_err(|e| {
            debug!(file = %self.file.name(), error = %e, "grammar parse failed");
            e
        })
    }

    fn read_rules(&mut self) -> Result<Grammar> {
        let mut rules = Vec::new();
        loop {
            let line_start = self.file.position()?;
            if self.config.allow_blank_lines {
                self.readers.blank_lines.attempt(self.file)?;
                self.readers.indent.attempt(self.file)?;
            }
            let Some(rule) = self.read_rule()? else {
                self.file.set_position(line_start)?;
                break;
            };
            rules.push(rule);
            self.require_line_end()?;
        }
        if self.config.require_eof && self.readers.end_of_data.attempt(self.file)?.is_miss() {
            let offset = self.file.position()?;
            return Err(err_parse!(offset, "unexpected content after the last rule"));
        }
        debug!(file = %self.file.name(), rules = rules.len(), "grammar recognized");
        Ok(Grammar::new(rules))
    }

    /// `identifier = terminal`. No identifier means no rule here, which is
    /// not an error; anything missing after the identifier is.
    pub fn read_rule(&mut self) -> Result<Option<Rule>> {
        let start = self.file.position()?;
        let Some(identifier) = self.read_identifier(false)? else {
            trace!(offset = start, "no rule at offset");
            return Ok(None);
        };
        self.read_assignment(true)?;
        let terminal = self.expect_terminal()?;
        debug!(offset = start, %identifier, %terminal, "rule parsed");
        Ok(Some(Rule::new(identifier, terminal)))
    }

    /// Reads `'c'` or `"c"` and returns `c`. Mismatched quotes are always a
    /// parse error, even when the terminal is optional.
    pub fn read_terminal(&mut self, required: bool) -> Result<Option<char>> {
        if required {
            return self.expect_terminal().map(Some);
        }
        Ok(self.match_terminal()?.into_option())
    }

    fn expect_terminal(&mut self) -> Result<char> {
        let start = self.file.position()?;
        match self.match_terminal()? {
            Match::Matched(ch) => Ok(ch),
            Match::Miss => Err(missing(start, "terminal symbol")
                .with_help("terminals are one quoted character: 'x' or \"x\"")),
        }
    }

    fn match_terminal(&mut self) -> Result<Match<char>> {
        let start = self.file.position()?;
        match self.readers.terminal.attempt(self.file)? {
            Match::Matched(token) => match token.as_seq() {
                Some([Token::Char(open), Token::Char(ch), Token::Char(close)]) => {
                    if open != close {
                        return Err(err_parse!(
                            start,
                            "terminal symbol opens with {} but closes with {}",
                            open,
                            close
                        )
                        .with_help("use the same quote on both sides: 'x' or \"x\""));
                    }
                    Ok(Match::Matched(*ch))
                }
                _ => Err(err_parse!(start, "malformed terminal symbol")),
            },
            Match::Miss => Ok(Match::Miss),
        }
    }

    pub fn read_identifier(&mut self, required: bool) -> Result<Option<String>> {
        let start = self.file.position()?;
        match self.readers.identifier.attempt(self.file)?.map(|token| token.text()) {
            Match::Matched(identifier) => Ok(Some(identifier)),
            Match::Miss if required => Err(missing(start, "identifier")),
            Match::Miss => Ok(None),
        }
    }

    /// Returns whether an assignment token was read.
    pub fn read_assignment(&mut self, required: bool) -> Result<bool> {
        let start = self.file.position()?;
        match self.readers.assignment.attempt(self.file)? {
            Match::Matched(_) => Ok(true),
            Match::Miss if required => Err(missing(start, "'=' after identifier")),
            Match::Miss => Ok(false),
        }
    }

    fn require_line_end(&mut self) -> Result<()> {
        let start = self.file.position()?;
        if self.readers.line_end.attempt(self.file)?.is_miss() {
            return Err(missing(start, "end of line after rule")
                .with_help("each rule must be on its own line"));
        }
        Ok(())
    }
}

fn missing(offset: u64, what: &str) -> GrammarError {
    err_parse!(offset, "expected {}", what)
}

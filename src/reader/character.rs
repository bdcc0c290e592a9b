use std::fmt;

use crate::cursor::CursorFile;
use crate::diagnostics::Result;
use crate::reader::{Match, Reader, Token};

/// Matches one decoded character accepted by a predicate.
pub struct CharReader<P> {
    predicate: P,
}

impl<P> CharReader<P>
where
    P: Fn(char) -> bool,
{
    pub fn new(predicate: P) -> Self {
        Self { predicate }
    }
}

impl<P> fmt::Debug for CharReader<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CharReader")
    }
}

impl<P> Reader for CharReader<P>
where
    P: Fn(char) -> bool,
{
    fn attempt(&self, file: &mut CursorFile) -> Result<Match<Token>> {
        file.scoped_position(|file| {
            let ch = file.read_char()?.filter(|&ch| (self.predicate)(ch));
            Ok(Match::from(ch.map(Token::Char)))
        })
    }
}

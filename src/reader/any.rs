use crate::cursor::CursorFile;
use crate::diagnostics::Result;
use crate::reader::{BoxedReader, Match, Reader, Token};

/// Ordered alternation: the first reader that matches wins.
///
/// Alternatives are tried strictly in the given order and later ones are
/// never invoked once one matches. There is no guarded region here: each
/// alternative already restores the cursor when it misses.
pub struct AnyReader {
    readers: Vec<BoxedReader>,
}

impl AnyReader {
    pub fn new(readers: Vec<BoxedReader>) -> Self {
        Self { readers }
    }
}

impl Reader for AnyReader {
    fn attempt(&self, file: &mut CursorFile) -> Result<Match<Token>> {
        for reader in &self.readers {
            if let Match::Matched(token) = reader.attempt(file)? {
                return Ok(Match::Matched(token));
            }
        }
        Ok(Match::Miss)
    }
}

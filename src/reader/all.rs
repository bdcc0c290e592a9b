use crate::cursor::CursorFile;
use crate::diagnostics::Result;
use crate::reader::{BoxedReader, Match, Reader, Token};

/// Conjunctive sequence: every reader must match, in order.
///
/// The whole attempt runs in one guarded region, so a miss from any reader
/// also rolls back what the readers before it consumed.
pub struct AllReader {
    readers: Vec<BoxedReader>,
}

impl AllReader {
    pub fn new(readers: Vec<BoxedReader>) -> Self {
        Self { readers }
    }
}

impl Reader for AllReader {
    fn attempt(&self, file: &mut CursorFile) -> Result<Match<Token>> {
        file.scoped_position(|file| {
            let mut parts = Vec::with_capacity(self.readers.len());
            for reader in &self.readers {
                match reader.attempt(file)? {
                    Match::Matched(token) => parts.push(token),
                    Match::Miss => return Ok(Match::Miss),
                }
            }
            Ok(Match::Matched(Token::Seq(parts)))
        })
    }
}

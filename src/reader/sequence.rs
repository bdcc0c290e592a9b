use crate::cursor::CursorFile;
use crate::diagnostics::Result;
use crate::reader::{BoxedReader, Match, Reader, Token};

/// Zero-or-more repetition of one reader. Never misses.
pub struct SequenceReader {
    reader: BoxedReader,
}

impl SequenceReader {
    pub fn new(reader: BoxedReader) -> Self {
        Self { reader }
    }
}

impl Reader for SequenceReader {
    fn attempt(&self, file: &mut CursorFile) -> Result<Match<Token>> {
        let mut items = Vec::new();
        loop {
            let before = file.position()?;
            match file.scoped_position(|file| self.reader.attempt(file))? {
                Match::Matched(token) => {
                    // A match that consumed nothing would repeat forever.
                    if file.position()? == before {
                        break;
                    }
                    items.push(token);
                }
                Match::Miss => break,
            }
        }
        Ok(Match::Matched(Token::Seq(items)))
    }
}

//! Composable readers over a [`CursorFile`].
//!
//! A reader either returns [`Match::Matched`] with the cursor moved exactly
//! past the recognized bytes, or [`Match::Miss`] with the cursor where it was
//! before the call. I/O and decode failures are `Err` and are never confused
//! with a miss.
//!
//! Readers are built by composition: [`CharReader`] recognizes one character,
//! [`AllReader`], [`AnyReader`] and [`SequenceReader`] combine other readers
//! without knowing what they recognize.

use crate::cursor::CursorFile;
use crate::diagnostics::Result;

pub mod all;
pub mod any;
pub mod character;
pub mod sequence;

pub use all::AllReader;
pub use any::AnyReader;
pub use character::CharReader;
pub use sequence::SequenceReader;

// ============================================================================
// MATCH RESULTS
// ============================================================================

/// Outcome of one reader attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Match<T> {
    Matched(T),
    Miss,
}

impl<T> Match<T> {
    pub fn is_miss(&self) -> bool {
        matches!(self, Match::Miss)
    }

    pub fn is_matched(&self) -> bool {
        !self.is_miss()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Match<U> {
        match self {
            Match::Matched(value) => Match::Matched(f(value)),
            Match::Miss => Match::Miss,
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Match::Matched(value) => Some(value),
            Match::Miss => None,
        }
    }
}

impl<T> From<Option<T>> for Match<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(value) => Match::Matched(value),
            None => Match::Miss,
        }
    }
}

/// Value produced by a successful read.
///
/// An empty `Seq` is a successful match of nothing (a repetition that found
/// zero items), which is different from [`Match::Miss`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Char(char),
    Seq(Vec<Token>),
}

impl Token {
    pub fn as_char(&self) -> Option<char> {
        match self {
            Token::Char(ch) => Some(*ch),
            Token::Seq(_) => None,
        }
    }

    pub fn as_seq(&self) -> Option<&[Token]> {
        match self {
            Token::Seq(items) => Some(items),
            Token::Char(_) => None,
        }
    }

    /// Concatenates every character in the token, depth first.
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Token::Char(ch) => out.push(*ch),
            Token::Seq(items) => items.iter().for_each(|item| item.push_text(out)),
        }
    }
}

// ============================================================================
// READER CAPABILITY
// ============================================================================

/// Something that tries to recognize a unit at the cursor.
///
/// Implementations must leave the cursor untouched on [`Match::Miss`]: either
/// by wrapping their attempt in [`CursorFile::scoped_position`] or by only
/// delegating to readers that already do.
pub trait Reader {
    fn attempt(&self, file: &mut CursorFile) -> Result<Match<Token>>;
}

impl<R: Reader + ?Sized> Reader for Box<R> {
    fn attempt(&self, file: &mut CursorFile) -> Result<Match<Token>> {
        (**self).attempt(file)
    }
}

impl<R: Reader + ?Sized> Reader for &R {
    fn attempt(&self, file: &mut CursorFile) -> Result<Match<Token>> {
        (**self).attempt(file)
    }
}

/// Reader backed by a closure; see [`from_fn`].
pub struct FnReader<F> {
    f: F,
}

impl<F> Reader for FnReader<F>
where
    F: Fn(&mut CursorFile) -> Result<Match<Token>>,
{
    fn attempt(&self, file: &mut CursorFile) -> Result<Match<Token>> {
        file.scoped_position(|file| (self.f)(file))
    }
}

pub type BoxedReader = Box<dyn Reader>;

// ============================================================================
// BUILDERS
// ============================================================================

/// Wraps a closure as a reader. The closure runs inside its own guarded
/// region, so it may consume input before deciding to miss.
pub fn from_fn<F>(f: F) -> BoxedReader
where
    F: Fn(&mut CursorFile) -> Result<Match<Token>> + 'static,
{
    Box::new(FnReader { f })
}

pub fn char_where(predicate: impl Fn(char) -> bool + 'static) -> BoxedReader {
    Box::new(CharReader::new(predicate))
}

pub fn char_eq(expected: char) -> BoxedReader {
    char_where(move |ch| ch == expected)
}

pub fn all(readers: Vec<BoxedReader>) -> BoxedReader {
    Box::new(AllReader::new(readers))
}

pub fn any(readers: Vec<BoxedReader>) -> BoxedReader {
    Box::new(AnyReader::new(readers))
}

pub fn sequence(reader: BoxedReader) -> BoxedReader {
    Box::new(SequenceReader::new(reader))
}

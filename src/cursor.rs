//! Byte-addressed, seekable grammar source with UTF-8 text decoding.
//!
//! [`CursorFile`] owns the underlying handle for its whole lifetime and
//! releases it on drop, so every exit path (return, `?`, panic) closes it.
//! [`CursorFile::scoped_position`] is the backtracking primitive the reader
//! combinators are built on.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::diagnostics::{GrammarError, Result};
use crate::reader::{Match, Reader, Token};

// ============================================================================
// OPEN MODES
// ============================================================================

/// How a file is opened. The data is always handled as bytes, so a `b`
/// in the mode string is accepted and ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenMode {
    /// `r`: read an existing file
    Read,
    /// `w`: create or truncate, write only
    Write,
    /// `a`: create if missing, every write goes to the end
    Append,
    /// `r+`: read and write an existing file
    ReadWrite,
    /// `w+`: create or truncate, read and write
    WriteRead,
    /// `a+`: create if missing, read anywhere, write at the end
    AppendRead,
}

impl OpenMode {
    fn options(self) -> OpenOptions {
        let mut options = OpenOptions::new();
        match self {
            OpenMode::Read => options.read(true),
            OpenMode::Write => options.write(true).create(true).truncate(true),
            OpenMode::Append => options.append(true).create(true),
            OpenMode::ReadWrite => options.read(true).write(true),
            OpenMode::WriteRead => options.read(true).write(true).create(true).truncate(true),
            OpenMode::AppendRead => options.read(true).append(true).create(true),
        };
        options
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OpenMode::Read => "r",
            OpenMode::Write => "w",
            OpenMode::Append => "a",
            OpenMode::ReadWrite => "r+",
            OpenMode::WriteRead => "w+",
            OpenMode::AppendRead => "a+",
        }
    }
}

impl FromStr for OpenMode {
    type Err = GrammarError;

    fn from_str(mode: &str) -> Result<Self> {
        let binary_flags = mode.matches('b').count();
        let normalized: String = mode.chars().filter(|&c| c != 'b').collect();
        match normalized.as_str() {
            _ if binary_flags > 1 => Err(unsupported_mode(mode)),
            "r" => Ok(OpenMode::Read),
            "w" => Ok(OpenMode::Write),
            "a" => Ok(OpenMode::Append),
            "r+" => Ok(OpenMode::ReadWrite),
            "w+" => Ok(OpenMode::WriteRead),
            "a+" => Ok(OpenMode::AppendRead),
            _ => Err(unsupported_mode(mode)),
        }
    }
}

fn unsupported_mode(mode: &str) -> GrammarError {
    GrammarError::io(
        format!("unsupported open mode '{}'", mode),
        io::Error::from(io::ErrorKind::InvalidInput),
    )
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// CURSOR FILE
// ============================================================================

/// Any seekable byte stream the cursor can sit on.
pub trait Stream: Read + Write + Seek {}

impl<T: Read + Write + Seek> Stream for T {}

/// Bytes pulled per chunk by [`CursorFile::read_line`] before retreating.
const LINE_CHUNK: usize = 64;

pub struct CursorFile {
    name: String,
    inner: Box<dyn Stream>,
}

impl fmt::Debug for CursorFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorFile").field("name", &self.name).finish()
    }
}

impl CursorFile {
    /// Opens `path` with a mode string such as `"r"` or `"w+"`.
    pub fn open(path: impl AsRef<Path>, mode: &str) -> Result<Self> {
        let mode: OpenMode = mode.parse()?;
        Self::open_with(path, mode)
    }

    pub fn open_with(path: impl AsRef<Path>, mode: OpenMode) -> Result<Self> {
        let path = path.as_ref();
        let file: File = mode.options().open(path).map_err(|e| {
            GrammarError::io(format!("failed to open '{}' ({})", path.display(), mode), e)
        })?;
        debug!(path = %path.display(), %mode, "opened grammar file");
        Ok(Self {
            name: path.display().to_string(),
            inner: Box::new(file),
        })
    }

    /// Bracketed form of [`CursorFile::open`]: the file is released as soon
    /// as `f` returns, whatever the outcome.
    pub fn with_open<T>(
        path: impl AsRef<Path>,
        mode: &str,
        f: impl FnOnce(&mut CursorFile) -> Result<T>,
    ) -> Result<T> {
        let mut file = Self::open(path, mode)?;
        f(&mut file)
    }

    /// Wraps an in-memory or otherwise already-open stream.
    pub fn from_stream(name: impl Into<String>, stream: impl Stream + 'static) -> Self {
        Self {
            name: name.into(),
            inner: Box::new(stream),
        }
    }

    /// Read-only view over a string, mostly for tests and `parse_str`.
    pub fn from_text(name: impl Into<String>, text: &str) -> Self {
        Self::from_stream(name, io::Cursor::new(text.as_bytes().to_vec()))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    // ------------------------------------------------------------------------
    // Position control
    // ------------------------------------------------------------------------

    pub fn position(&mut self) -> Result<u64> {
        self.inner
            .stream_position()
            .map_err(|e| GrammarError::io(format!("failed to query position in '{}'", self.name), e))
    }

    pub fn set_position(&mut self, pos: u64) -> Result<()> {
        self.inner
            .seek(SeekFrom::Start(pos))
            .map(|_| ())
            .map_err(|e| GrammarError::io(format!("failed to seek to byte {} in '{}'", pos, self.name), e))
    }

    /// Signed seek from the current position. Moving before byte 0 fails.
    pub fn seek_relative(&mut self, delta: i64) -> Result<()> {
        self.inner
            .seek(SeekFrom::Current(delta))
            .map(|_| ())
            .map_err(|e| GrammarError::io(format!("failed to move cursor by {} in '{}'", delta, self.name), e))
    }

    pub fn move_left(&mut self, delta: u64) -> Result<()> {
        let offset = i64::try_from(delta).ok().and_then(i64::checked_neg);
        let offset = self.checked_offset(offset, "left", delta)?;
        self.seek_relative(offset)
    }

    pub fn move_right(&mut self, delta: u64) -> Result<()> {
        let offset = i64::try_from(delta).ok();
        let offset = self.checked_offset(offset, "right", delta)?;
        self.seek_relative(offset)
    }

    fn checked_offset(&self, offset: Option<i64>, direction: &str, delta: u64) -> Result<i64> {
        offset.ok_or_else(|| {
            GrammarError::io(
                format!("cannot move cursor {} by {} in '{}'", direction, delta, self.name),
                io::Error::from(io::ErrorKind::InvalidInput),
            )
        })
    }

    // ------------------------------------------------------------------------
    // Reading and writing
    // ------------------------------------------------------------------------

    /// Reads up to `n` bytes and decodes them. Returns an empty string at end
    /// of data.
    pub fn read(&mut self, n: usize) -> Result<String> {
        let start = self.position()?;
        let bytes = self.read_bytes(n)?;
        decode(bytes, start)
    }

    /// Reads through the next `\n` (included), or to end of data.
    pub fn read_line(&mut self) -> Result<String> {
        let start = self.position()?;
        let mut line = Vec::new();
        loop {
            let chunk = self.read_bytes(LINE_CHUNK)?;
            if chunk.is_empty() {
                break;
            }
            if let Some(idx) = chunk.iter().position(|&b| b == b'\n') {
                line.extend_from_slice(&chunk[..=idx]);
                let over_read = chunk.len() - idx - 1;
                if over_read > 0 {
                    self.move_left(over_read as u64)?;
                }
                break;
            }
            line.extend_from_slice(&chunk);
        }
        decode(line, start)
    }

    /// Reads exactly one UTF-8 scalar value, or `None` at end of data.
    pub fn read_char(&mut self) -> Result<Option<char>> {
        let start = self.position()?;
        let lead = self.read_bytes(1)?;
        let Some(&first) = lead.first() else {
            return Ok(None);
        };
        let width = utf8_width(first);
        let mut bytes = lead;
        if width > 1 {
            bytes.extend(self.read_bytes(width - 1)?);
        }
        Ok(decode(bytes, start)?.chars().next())
    }

    /// Encodes `text` as UTF-8 and writes it at the current position.
    pub fn write(&mut self, text: &str) -> Result<usize> {
        self.inner
            .write_all(text.as_bytes())
            .and_then(|_| self.inner.flush())
            .map_err(|e| GrammarError::io(format!("failed to write to '{}'", self.name), e))?;
        Ok(text.len())
    }

    fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        (&mut self.inner)
            .take(n as u64)
            .read_to_end(&mut buf)
            .map_err(|e| GrammarError::io(format!("failed to read from '{}'", self.name), e))?;
        Ok(buf)
    }

    // ------------------------------------------------------------------------
    // Backtracking
    // ------------------------------------------------------------------------

    /// Runs `f` and, if it reports a miss, puts the cursor back where it was
    /// on entry. Matches and errors leave the position as `f` set it.
    pub fn scoped_position<T>(
        &mut self,
        f: impl FnOnce(&mut CursorFile) -> Result<Match<T>>,
    ) -> Result<Match<T>> {
        let saved = self.position()?;
        let outcome = f(self)?;
        if outcome.is_miss() {
            self.set_position(saved)?;
        }
        Ok(outcome)
    }

    /// Runs any reader inside its own guarded region.
    pub fn attempt_with<R: Reader + ?Sized>(&mut self, reader: &R) -> Result<Match<Token>> {
        self.scoped_position(|file| reader.attempt(file))
    }
}

fn decode(bytes: Vec<u8>, offset: u64) -> Result<String> {
    String::from_utf8(bytes).map_err(|e| GrammarError::Decode {
        offset: offset + e.utf8_error().valid_up_to() as u64,
        source: e.utf8_error(),
    })
}

/// Encoded width implied by a UTF-8 lead byte. Continuation and invalid
/// bytes report 1 so decoding fails on them rather than over-reading.
fn utf8_width(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

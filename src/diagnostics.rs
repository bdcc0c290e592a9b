//! Unified, `miette`-based diagnostics for the grammar engine.
//!
//! Every failure that can leave the engine is a [`GrammarError`]. A reader
//! *miss* is not an error: it is the [`crate::reader::Match::Miss`] value and
//! never travels through this type.
//!
//! # Error Construction
//!
//! - Use `err_parse!` for positioned parse errors:
//!   `err_parse!(offset, "expected terminal symbol")`
//! - Use [`GrammarError::io`] to wrap `std::io::Error` with a message.
//! - Attach the grammar text with [`GrammarError::with_source`] before
//!   rendering through `miette::Report` to get a labelled snippet.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

pub type SourceArc = Arc<NamedSource<String>>;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, GrammarError>;

/// Byte range inside a grammar source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// A zero-width span at `offset`.
    pub fn at(offset: u64) -> Self {
        let offset = offset as usize;
        Self {
            start: offset,
            end: offset,
        }
    }
}

/// Type-safe error classification, used instead of matching on messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// A required construct was absent or malformed
    Parse,
    /// Opening, seeking, reading or writing the data source failed
    Io,
    /// The data source held bytes that are not valid UTF-8
    Decode,
    /// A parser configuration could not be loaded
    Config,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Parse => "Parse",
            ErrorType::Io => "Io",
            ErrorType::Decode => "Decode",
            ErrorType::Config => "Config",
        }
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optional source and span attached to a parse error for rendering.
#[derive(Debug, Default)]
pub struct ErrorContext {
    pub source: Option<SourceArc>,
    pub span: Option<Span>,
    pub help: Option<String>,
}

impl ErrorContext {
    pub fn with_span(span: Span) -> Self {
        Self {
            source: None,
            span: Some(span),
            help: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum GrammarError {
    #[error("Parse error at byte {offset}: {message}")]
    Parse {
        message: String,
        offset: u64,
        ctx: ErrorContext,
    },
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Decode error at byte {offset}: invalid UTF-8")]
    Decode {
        offset: u64,
        #[source]
        source: std::str::Utf8Error,
    },
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl GrammarError {
    /// Builds a fatal parse error positioned at `offset`.
    pub fn parse(message: impl Into<String>, offset: u64) -> Self {
        GrammarError::Parse {
            message: message.into(),
            offset,
            ctx: ErrorContext::with_span(Span::at(offset)),
        }
    }

    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        GrammarError::Io {
            message: message.into(),
            source,
        }
    }

    pub fn error_type(&self) -> ErrorType {
        match self {
            GrammarError::Parse { .. } => ErrorType::Parse,
            GrammarError::Io { .. } => ErrorType::Io,
            GrammarError::Decode { .. } => ErrorType::Decode,
            GrammarError::Config { .. } => ErrorType::Config,
        }
    }

    /// Byte offset of the failure, when the error has one.
    pub fn offset(&self) -> Option<u64> {
        match self {
            GrammarError::Parse { offset, .. } | GrammarError::Decode { offset, .. } => {
                Some(*offset)
            }
            _ => None,
        }
    }

    /// Attaches the grammar text so reports can show where parsing stopped.
    /// Only parse errors carry a source; other variants are returned as is.
    pub fn with_source(mut self, name: impl AsRef<str>, text: impl Into<String>) -> Self {
        if let GrammarError::Parse { ctx, .. } = &mut self {
            ctx.source = Some(Arc::new(NamedSource::new(name, text.into())));
        }
        self
    }

    /// Adds a help line to a parse error.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        if let GrammarError::Parse { ctx, .. } = &mut self {
            ctx.help = Some(help.into());
        }
        self
    }

    fn ctx(&self) -> Option<&ErrorContext> {
        match self {
            GrammarError::Parse { ctx, .. } => Some(ctx),
            _ => None,
        }
    }
}

impl Diagnostic for GrammarError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.error_type() {
            ErrorType::Parse => "grammarc::parse",
            ErrorType::Io => "grammarc::io",
            ErrorType::Decode => "grammarc::decode",
            ErrorType::Config => "grammarc::config",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.ctx()?
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.ctx()?
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let GrammarError::Parse { message, ctx, .. } = self else {
            return None;
        };
        // Without a source miette cannot resolve the span.
        ctx.source.as_ref()?;
        let span = ctx.span?;
        let len = if span.end > span.start {
            span.end - span.start
        } else {
            1
        };
        let label = LabeledSpan::new(Some(message.clone()), span.start, len);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Constructs a positioned [`GrammarError::Parse`] with a formatted message.
#[macro_export]
macro_rules! err_parse {
    ($offset:expr, $msg:expr, $($arg:expr),+ $(,)?) => {
        $crate::GrammarError::parse(format!($msg, $($arg),+), $offset)
    };
    ($offset:expr, $msg:expr) => {
        $crate::GrammarError::parse(format!("{}", $msg), $offset)
    };
}

//! Contains the common [`ErrorKind`] trait used by all errors to display user-facing error
//! messages, and the [`Error`] type returned by every fallible operation in `mathex`.

use ariadne::{Color, Report, Source};
use std::{any::Any, fmt, ops::Range};

/// The color to use to highlight expressions.
pub const EXPR: Color = Color::RGB(52, 235, 152);

/// The broad category an error belongs to. Callers can use this to tell bad input apart from a
/// missing binding or a numeric domain violation without inspecting the concrete error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The source could not be split into tokens.
    Lex,

    /// The tokens do not form a valid expression.
    Syntax,

    /// A function could not be resolved.
    UnknownFunction,

    /// A variable could not be resolved.
    UnknownVariable,

    /// A function was called with the wrong number of arguments.
    InvalidArgumentCount,

    /// A numeric operation was applied outside of its domain, such as division by zero.
    Domain,

    /// Rewriting did not reach a fixpoint within the iteration bound.
    NonTerminatingRewrite,

    /// Any other error.
    Generic,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorCategory::Lex => "lex error",
            ErrorCategory::Syntax => "syntax error",
            ErrorCategory::UnknownFunction => "unknown function",
            ErrorCategory::UnknownVariable => "unknown variable",
            ErrorCategory::InvalidArgumentCount => "invalid argument count",
            ErrorCategory::Domain => "domain error",
            ErrorCategory::NonTerminatingRewrite => "non-terminating rewrite",
            ErrorCategory::Generic => "error",
        };
        f.write_str(name)
    }
}

/// Represents any kind of error that can occur during some operation.
///
/// This trait is usually derived with `mathex_attrs::ErrorKind`.
pub trait ErrorKind: fmt::Debug + Send + Sync {
    /// Returns `self` as [`Any`], so that the concrete error kind can be recovered.
    fn as_any(&self) -> &dyn Any;

    /// The category of this error.
    fn category(&self) -> ErrorCategory;

    /// The human-readable message of this error.
    fn message(&self) -> String;

    /// Builds the report for this error.
    fn build_report<'a>(
        &self,
        src_id: &'a str,
        spans: &[Range<usize>],
    ) -> Report<(&'a str, Range<usize>)>;
}

/// An error associated with regions of source code that can be highlighted.
///
/// Errors produced while evaluating a tree have no spans, since the tree no longer knows where
/// it came from.
#[derive(Debug)]
pub struct Error {
    /// The regions of the source code that this error originated from.
    pub spans: Vec<Range<usize>>,

    /// The kind of error that occurred.
    pub kind: Box<dyn ErrorKind>,
}

impl Error {
    /// Creates a new error with the given spans and kind.
    pub fn new(spans: Vec<Range<usize>>, kind: impl ErrorKind + 'static) -> Self {
        Self { spans, kind: Box::new(kind) }
    }

    /// Creates a new error that does not point at any source code.
    pub fn without_spans(kind: impl ErrorKind + 'static) -> Self {
        Self::new(Vec::new(), kind)
    }

    /// The category of this error.
    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// The human-readable message of this error.
    pub fn message(&self) -> String {
        self.kind.message()
    }

    /// Returns the concrete error kind if it is of type `T`.
    pub fn kind<T: ErrorKind + 'static>(&self) -> Option<&T> {
        self.kind.as_any().downcast_ref()
    }

    /// Returns true if the concrete error kind is of type `T`.
    pub fn is<T: ErrorKind + 'static>(&self) -> bool {
        self.kind::<T>().is_some()
    }

    /// Build a report from this error kind.
    pub fn build_report<'a>(&self, src_id: &'a str) -> Report<(&'a str, Range<usize>)> {
        self.kind.build_report(src_id, &self.spans)
    }

    /// Renders the report for this error against the given source code.
    pub fn report_to_string(&self, src_id: &str, source: &str) -> String {
        let mut buf = Vec::new();
        match self.build_report(src_id).write((src_id, Source::from(source)), &mut buf) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => self.to_string(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.category(), self.message())
    }
}

impl std::error::Error for Error {}

//! Diagnostics (spec §4.7, §7). Every error the core can raise is one of
//! the six kinds §7 enumerates; each carries the phrase to print and an
//! already-rendered pretty-print of the offending AST sub-tree or type, so
//! `Display` can produce the exact one-line format spec §4.7 pins:
//! `` <kind>: <phrase>: `<ast-or-type pretty print>` ``.
//!
//! Generator functions propagate failure with a two-state `Result<T, ()>`
//! (spec §7 "a two-state result suffices"): the `Error` itself is recorded
//! in the [`ErrorSink`] at the point of failure, not carried up the call
//! stack, matching the original source's `status` contract exactly.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The AST violates the shape contract in spec §6 — a front-end bug.
    Structural,
    /// An operator was applied to an incompatible type.
    SemanticType,
    /// An identifier was used without a declaration in scope.
    SemanticBinding,
    /// A construct outside the supported subset.
    Unsupported,
    /// `sizeof`/array sizing hit a type whose size can't be computed.
    SizeUnknown,
    /// A context requiring a compile-time integer constant got something
    /// else.
    ConstantEval,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Structural => "Structural error",
            ErrorKind::SemanticType => "Error",
            ErrorKind::SemanticBinding => "Error",
            ErrorKind::Unsupported => "Unsupported",
            ErrorKind::SizeUnknown => "Error",
            ErrorKind::ConstantEval => "Error",
        };
        f.write_str(s)
    }
}

/// One diagnostic: a kind, a human phrase, and the pretty-printed AST
/// sub-tree or type it refers to.
#[derive(Debug, Clone)]
pub struct Error {
    pub kind: ErrorKind,
    pub phrase: String,
    pub rendered: String,
}

impl Error {
    #[must_use]
    pub fn new(kind: ErrorKind, phrase: impl Into<String>, rendered: impl Into<String>) -> Self {
        Self { kind, phrase: phrase.into(), rendered: rendered.into() }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: `{}`", self.kind, self.phrase, self.rendered)
    }
}

impl std::error::Error for Error {}

/// Collects every diagnostic emitted during a compilation so the driver
/// can keep going after the first error (spec §5 "the driver continues
/// with the next item") and still report a non-zero status at the end
/// (spec §8 P7).
#[derive(Debug, Default)]
pub struct ErrorSink {
    errors: Vec<Error>,
}

impl ErrorSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, e: Error) {
        self.errors.push(e);
    }

    #[must_use]
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }

    #[must_use]
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Write every collected diagnostic, one per line, to `w` (spec §4.7
    /// "every diagnostic is one line on stderr").
    pub fn write_all(&self, mut w: impl fmt::Write) -> fmt::Result {
        for e in &self.errors {
            writeln!(w, "{e}")?;
        }
        Ok(())
    }
}

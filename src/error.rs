//! Error types shared by every pass.
//!
//! `spec.md` §7 calls for one error per run, reported with source position
//! when available, followed by immediate abort. `CompileError` is the single
//! type every pass returns so that `main` has exactly one place to print and
//! exit.

use thiserror::Error;

/// A source position. `line`/`col` are 1-indexed per `spec.md` §3 invariant (a).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Which stage a failure originated in. Doubles as the process exit code
/// via [`Stage::exit_code`], per `spec.md` §6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Io,
    Preprocess,
    Lex,
    Parse,
    Emit,
    External,
}

impl Stage {
    pub const fn exit_code(self) -> i32 {
        match self {
            Stage::Io => 1,
            Stage::Preprocess => 2,
            Stage::Lex => 3,
            Stage::Parse => 4,
            Stage::Emit => 5,
            Stage::External => 6,
        }
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("preprocessor error at {span}: {message}")]
    Preprocess { message: String, span: Span },

    #[error("lex error at {span}: {message}")]
    Lex { message: String, span: Span },

    #[error("parse error at {span}: {message}")]
    Parse { message: String, span: Span },

    /// An AST node kind unexpected for its position in the optimizer or
    /// emitter — per `spec.md` §7's "Internal" category. Reaching this is a
    /// bug in `velac`, not in the user's program.
    #[error("internal compiler error: {message}")]
    Internal { message: String },

    /// The external assembler or linker (`spec.md` §4.6/§6) exited
    /// non-zero, or could not be spawned at all.
    #[error("external tool failed: {message}")]
    External { message: String },
}

impl CompileError {
    pub fn io(message: impl Into<String>) -> Self {
        CompileError::Io {
            message: message.into(),
        }
    }

    pub fn preprocess(message: impl Into<String>, span: Span) -> Self {
        CompileError::Preprocess {
            message: message.into(),
            span,
        }
    }

    pub fn lex(message: impl Into<String>, span: Span) -> Self {
        CompileError::Lex {
            message: message.into(),
            span,
        }
    }

    pub fn parse(message: impl Into<String>, span: Span) -> Self {
        CompileError::Parse {
            message: message.into(),
            span,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CompileError::Internal {
            message: message.into(),
        }
    }

    pub fn external(message: impl Into<String>) -> Self {
        CompileError::External {
            message: message.into(),
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            CompileError::Io { .. } => Stage::Io,
            CompileError::Preprocess { .. } => Stage::Preprocess,
            CompileError::Lex { .. } => Stage::Lex,
            CompileError::Parse { .. } => Stage::Parse,
            CompileError::Internal { .. } => Stage::Emit,
            CompileError::External { .. } => Stage::External,
        }
    }
}

impl From<std::io::Error> for CompileError {
    fn from(err: std::io::Error) -> Self {
        CompileError::io(err.to_string())
    }
}

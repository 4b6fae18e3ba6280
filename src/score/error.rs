//! Error types for the score compiler.

use std::io;

/// What went wrong while compiling a score.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    #[error("invalid tempo: {0:?}")]
    InvalidTempo(String),
    #[error("invalid note: {0:?}")]
    InvalidNote(String),
    #[error("invalid instrument: {0:?}")]
    InvalidInstrumentSpec(String),
    #[error("invalid instrument count: expected {expected} note columns, found {found}")]
    InvalidInstrumentCount { expected: usize, found: usize },
    #[error("unknown line {0:?}")]
    UnknownLine(char),
    #[error("invalid dynamic {0:?}")]
    MalformedDynamic(String),
    #[error("invalid line spec {0:?}")]
    InvalidLineSpec(String),
    #[error("missing {0} line")]
    MissingHeader(&'static str),
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

/// An error that aborted compilation, tagged with the 1-based source line.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct CompileError {
    pub line: usize,
    pub kind: ErrorKind,
}

impl CompileError {
    pub fn new(line: usize, kind: ErrorKind) -> Self {
        Self { line, kind }
    }
}

//! Score compiler — tune text → beat grid + resolved dynamics.

pub mod dynamics;
pub mod error;
pub mod note;
pub mod parser;
pub mod tune;

pub use error::{CompileError, ErrorKind};
pub use note::{note_to_freq, parse_note};
pub use parser::Parser;
pub use tune::{Dynamic, NoteHit, Tune};

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::render::SynthConfig;

/// Parse a tune from any line source.
pub fn parse_reader<R: BufRead>(reader: R, config: &SynthConfig) -> Result<Tune, CompileError> {
    Parser::new(reader, config).parse()
}

/// Parse a tune from source text.
pub fn parse_str(source: &str, config: &SynthConfig) -> Result<Tune, CompileError> {
    parse_reader(source.as_bytes(), config)
}

/// Parse a tune from a file.
pub fn read_tune(path: &Path, config: &SynthConfig) -> Result<Tune, CompileError> {
    let file = File::open(path).map_err(|e| CompileError::new(0, e.into()))?;
    parse_reader(BufReader::new(file), config)
}

//! Parser for the tune format.
//!
//! ```text
//! 120                      ; tempo in beats per minute
//! ab                       ; line identifiers, lowercase letters only
//! square|c4, tri|e4        ; one instrument spec per note column
//! Ab|a=f, b=mp             ; note columns | dynamics
//!  b|a=cresc
//! ```
//!
//! `;` starts a comment. Rows without a `|` are ignored. Comments may hold
//! any bytes; the rest of a line is read as UTF-8, with invalid sequences
//! replaced by U+FFFD.

use std::io::BufRead;

use tracing::debug;

use super::dynamics::{self, parse_dynamic};
use super::error::{CompileError, ErrorKind};
use super::tune::{line_position, Dynamic, NoteHit, Tune};
use crate::instrument::{parse_instrument, Instrument};
use crate::render::SynthConfig;

pub struct Parser<'a, R> {
    reader: R,
    line: usize,
    config: &'a SynthConfig,
}

impl<'a, R: BufRead> Parser<'a, R> {
    pub fn new(reader: R, config: &'a SynthConfig) -> Self {
        Self {
            reader,
            line: 0,
            config,
        }
    }

    /// Parse the whole source and resolve its dynamics.
    pub fn parse(mut self) -> Result<Tune, CompileError> {
        let tempo = self.parse_tempo()?;
        let samples_per_beat = (60 * self.config.sample_rate as u64 / tempo as u64) as usize;
        let lines = self.parse_line_ids()?;
        let instruments = self.parse_instruments()?;
        debug!(
            tempo,
            samples_per_beat,
            ?lines,
            instruments = instruments.len(),
            "parsed header"
        );

        let mut beats = Vec::new();
        let mut grid: Vec<Vec<Dynamic>> = Vec::new();
        while let Some(text) = self.next_line()? {
            let Some((notes, marks)) = text.split_once('|') else {
                continue;
            };
            let hits = self
                .parse_notes(notes, &lines, instruments.len())
                .map_err(|kind| self.error(kind))?;
            let row = self
                .parse_dynamics(marks, &lines, grid.last().map(Vec::as_slice))
                .map_err(|kind| self.error(kind))?;
            beats.push(hits);
            grid.push(row);
        }

        dynamics::interpolate(&mut grid, self.config);

        Ok(Tune {
            tempo,
            samples_per_beat,
            lines,
            instruments,
            beats,
            dynamics: grid,
        })
    }

    fn error(&self, kind: ErrorKind) -> CompileError {
        CompileError::new(self.line, kind)
    }

    /// Read the next line with its comment stripped, or `None` at end of source.
    fn next_line(&mut self) -> Result<Option<String>, CompileError> {
        let mut buf = Vec::new();
        let read = self.reader.read_until(b'\n', &mut buf);
        if let Ok(0) = read {
            return Ok(None);
        }
        self.line += 1;
        read.map_err(|e| self.error(e.into()))?;

        // `;` never occurs inside a multi-byte UTF-8 sequence.
        if let Some(comment) = buf.iter().position(|&b| b == b';') {
            buf.truncate(comment);
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
    }

    fn header(&mut self, what: &'static str) -> Result<String, CompileError> {
        self.next_line()?
            .ok_or_else(|| CompileError::new(self.line + 1, ErrorKind::MissingHeader(what)))
    }

    fn parse_tempo(&mut self) -> Result<u32, CompileError> {
        let text = self.header("tempo")?;
        match text.trim().parse::<u32>() {
            Ok(bpm) if bpm > 0 => Ok(bpm),
            _ => Err(self.error(ErrorKind::InvalidTempo(text.trim().to_string()))),
        }
    }

    fn parse_line_ids(&mut self) -> Result<Vec<char>, CompileError> {
        let text = self.header("line")?;
        Ok(text.chars().filter(char::is_ascii_lowercase).collect())
    }

    fn parse_instruments(&mut self) -> Result<Vec<Box<dyn Instrument>>, CompileError> {
        let text = self.header("instrument")?;
        let mut instruments: Vec<Box<dyn Instrument>> = Vec::new();
        for spec in text.split(',') {
            let built = parse_instrument(spec.trim(), instruments.len(), self.config)
                .map_err(|kind| self.error(kind))?;
            instruments.extend(built);
        }
        Ok(instruments)
    }

    /// One character per instrument: space for a rest, otherwise the line
    /// the note belongs to, uppercase to articulate.
    fn parse_notes(
        &self,
        notes: &str,
        lines: &[char],
        instrument_count: usize,
    ) -> Result<Vec<NoteHit>, ErrorKind> {
        let found = notes.chars().count();
        if found != instrument_count {
            return Err(ErrorKind::InvalidInstrumentCount {
                expected: instrument_count,
                found,
            });
        }

        let mut hits = Vec::new();
        for (instrument, c) in notes.chars().enumerate() {
            if c == ' ' {
                continue;
            }
            let line = line_position(lines, c).ok_or(ErrorKind::UnknownLine(c))?;
            hits.push(NoteHit {
                instrument,
                line,
                articulate: c.is_ascii_uppercase(),
            });
        }
        Ok(hits)
    }

    /// Comma-separated `<line>=<info>` entries. Lines without an entry carry
    /// the previous beat's dynamic forward, marked for interpolation.
    fn parse_dynamics(
        &self,
        marks: &str,
        lines: &[char],
        prev: Option<&[Dynamic]>,
    ) -> Result<Vec<Dynamic>, ErrorKind> {
        let previous = |pos: usize| prev.map(|row| row[pos]).unwrap_or_default();
        let mut row: Vec<Option<Dynamic>> = vec![None; lines.len()];

        for entry in marks.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let malformed = || ErrorKind::MalformedDynamic(entry.to_string());
            let (key, info) = entry.split_once('=').ok_or_else(malformed)?;
            let mut key = key.trim().chars();
            let (Some(line), None) = (key.next(), key.next()) else {
                return Err(malformed());
            };
            if !lines.contains(&line) {
                return Err(ErrorKind::UnknownLine(line));
            }

            // Duplicate line identifiers share one dynamic.
            for (pos, _) in lines.iter().enumerate().filter(|(_, &l)| l == line) {
                row[pos] = Some(parse_dynamic(info, &previous(pos))?);
            }
        }

        Ok(row
            .into_iter()
            .enumerate()
            .map(|(pos, dynamic)| {
                dynamic.unwrap_or_else(|| Dynamic {
                    hand_written: false,
                    ..previous(pos)
                })
            })
            .collect())
    }
}

//! Compiled tune — the beat grid, resolved dynamics, and the instruments that play them.

use crate::instrument::Instrument;

/// One note occurrence on a beat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteHit {
    /// Index of the instrument (note column) that plays this note.
    pub instrument: usize,
    /// Declared position of the line whose dynamics scale this note.
    pub line: usize,
    /// Whether the instrument restarts its phase on this beat.
    pub articulate: bool,
}

/// The dynamic marking of one line on one beat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dynamic {
    /// Explicitly written in the score, as opposed to filled in by interpolation.
    pub hand_written: bool,
    /// This beat starts a ramp towards the next hand-written dynamic.
    pub should_change: bool,
    /// ..., -3 = pp, -2 = p, -1 = mp, 0 = mf, 1 = f, 2 = ff, ...
    pub level: i32,
    /// Amplitude scale used in the final mix.
    pub multiplier: f64,
}

impl Default for Dynamic {
    fn default() -> Self {
        Self {
            hand_written: false,
            should_change: false,
            level: 0,
            multiplier: 0.0,
        }
    }
}

/// A fully parsed and interpolated score, ready for rendering.
pub struct Tune {
    pub(crate) tempo: u32,
    pub(crate) samples_per_beat: usize,
    pub(crate) lines: Vec<char>,
    pub(crate) instruments: Vec<Box<dyn Instrument>>,
    pub(crate) beats: Vec<Vec<NoteHit>>,
    /// `dynamics[beat][line]`, indexed by declared line position.
    pub(crate) dynamics: Vec<Vec<Dynamic>>,
}

impl Tune {
    /// Tempo in beats per minute.
    pub fn tempo(&self) -> u32 {
        self.tempo
    }

    pub fn samples_per_beat(&self) -> usize {
        self.samples_per_beat
    }

    /// Declared line identifiers, in declaration order.
    pub fn lines(&self) -> &[char] {
        &self.lines
    }

    /// Number of beat rows.
    pub fn len(&self) -> usize {
        self.beats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    /// Total length of the rendered tune in samples.
    pub fn total_samples(&self) -> usize {
        self.beats.len() * self.samples_per_beat
    }

    pub fn instrument_count(&self) -> usize {
        self.instruments.len()
    }

    /// The notes sounding on a beat.
    pub fn notes(&self, beat: usize) -> &[NoteHit] {
        &self.beats[beat]
    }

    /// The resolved dynamics of every line on a beat.
    pub fn dynamics(&self, beat: usize) -> &[Dynamic] {
        &self.dynamics[beat]
    }

    /// The resolved dynamic of the named line on a beat, if the line is declared.
    pub fn dynamic_of(&self, beat: usize, line: char) -> Option<&Dynamic> {
        let pos = self.line_position(line)?;
        self.dynamics.get(beat).map(|row| &row[pos])
    }

    /// Declared position of a line, matching either case.
    pub fn line_position(&self, line: char) -> Option<usize> {
        line_position(&self.lines, line)
    }
}

pub(crate) fn line_position(lines: &[char], line: char) -> Option<usize> {
    let line = line.to_ascii_lowercase();
    lines.iter().position(|&l| l == line)
}

impl std::fmt::Debug for Tune {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tune")
            .field("tempo", &self.tempo)
            .field("samples_per_beat", &self.samples_per_beat)
            .field("lines", &self.lines)
            .field("instruments", &self.instruments.len())
            .field("beats", &self.beats.len())
            .finish()
    }
}

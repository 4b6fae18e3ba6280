//! Instrument specs — builds instruments from `kind|...` text.
//!
//! Supported forms:
//! - `noise|white`
//! - `tri|<note>`, `saw|<note>`, `square|<note>` (also `tri|one|<note>`)
//! - `tri|<scale>|<note>|<count>`: `count` notes walking `minor`, `major` or `chrom`

use tracing::debug;

use crate::render::SynthConfig;
use crate::score::error::ErrorKind;
use crate::score::note::parse_note;

use super::oscillator::Waveform;
use super::{Instrument, NoiseGen, PeriodicNote};

/// Named scales, as semitone offsets within one octave.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scale {
    Minor,
    Major,
    Chromatic,
}

impl Scale {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "minor" => Some(Scale::Minor),
            "major" => Some(Scale::Major),
            "chrom" => Some(Scale::Chromatic),
            _ => None,
        }
    }

    pub fn steps(self) -> &'static [i32] {
        match self {
            Scale::Minor => &[0, 2, 3, 5, 7, 8, 10],
            Scale::Major => &[0, 2, 4, 5, 7, 9, 11],
            Scale::Chromatic => &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11],
        }
    }

    /// The first `count` notes of this scale starting at `start`, climbing
    /// one octave each time the pattern wraps. `None` if a note leaves the
    /// `i32` range.
    pub fn walk(self, start: i32, count: usize) -> Option<Vec<i32>> {
        let steps = self.steps();
        (0..count)
            .map(|i| {
                let octave = i32::try_from(i / steps.len()).ok()?.checked_mul(12)?;
                start
                    .checked_add(steps[i % steps.len()])?
                    .checked_add(octave)
            })
            .collect()
    }
}

/// Upper bound on the notes a single scale spec may declare.
pub const MAX_SCALE_NOTES: usize = 256;

/// Parse one instrument spec into the instruments it declares.
///
/// Scale specs produce several instruments; every other spec produces one.
/// `index` is the position of the first produced instrument in the tune and
/// seeds noise generators.
pub fn parse_instrument(
    spec: &str,
    index: usize,
    config: &SynthConfig,
) -> Result<Vec<Box<dyn Instrument>>, ErrorKind> {
    let parts: Vec<&str> = spec.split('|').collect();

    if parts[0] == "noise" {
        return match parts[1..] {
            ["white"] => {
                let seed = config.noise_seed.wrapping_add(index as u64);
                debug!(index, seed, "white noise");
                Ok(vec![Box::new(NoiseGen::new(seed, config.articulation_len))])
            }
            _ => Err(ErrorKind::InvalidInstrumentSpec(spec.to_string())),
        };
    }

    let notes = parse_periodic(spec, config)?;
    debug!(index, count = notes.len(), "periodic");
    Ok(notes
        .into_iter()
        .map(|note| Box::new(note) as Box<dyn Instrument>)
        .collect())
}

/// Parse a `tri`, `saw` or `square` spec into its notes.
///
/// Any malformed part, including the note text, fails the whole spec.
pub fn parse_periodic(spec: &str, config: &SynthConfig) -> Result<Vec<PeriodicNote>, ErrorKind> {
    let invalid = || ErrorKind::InvalidInstrumentSpec(spec.to_string());
    let note = |text: &str| parse_note(text).map_err(|_| invalid());
    let parts: Vec<&str> = spec.split('|').collect();

    let waveform = Waveform::from_keyword(parts[0]).ok_or_else(invalid)?;
    let notes = match parts[1..] {
        [start] | ["one", start] => vec![note(start)?],
        [scale, start, count] => {
            let scale = Scale::from_keyword(scale).ok_or_else(invalid)?;
            let start = note(start)?;
            let count: usize = count.trim().parse().map_err(|_| invalid())?;
            if count > MAX_SCALE_NOTES {
                return Err(invalid());
            }
            scale.walk(start, count).ok_or_else(invalid)?
        }
        _ => return Err(invalid()),
    };

    Ok(notes
        .into_iter()
        .map(|n| PeriodicNote::new(waveform, n, config.sample_rate, config.articulation_len))
        .collect())
}

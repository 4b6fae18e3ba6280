//! Periodic note — a single pitched note played with one of the fixed waveforms.

use crate::score::note::note_to_freq;

use super::oscillator::{oscillator, Waveform};
use super::{Articulation, Instrument, PLATEAU};

/// A periodic waveform fixed to one note.
///
/// The cycle length is rounded down to a whole number of samples, and the
/// phase is taken from the absolute sample position.
pub struct PeriodicNote {
    waveform: Waveform,
    note: i32,
    period: u64,
    articulation: Articulation,
}

impl PeriodicNote {
    /// Build a periodic instrument for `note` (semitones from C4).
    pub fn new(waveform: Waveform, note: i32, sample_rate: u32, articulation_len: u64) -> Self {
        let frequency = note_to_freq(note);
        // Notes above the sample rate still need a non-empty cycle.
        let period = ((sample_rate as f64 / frequency) as u64).max(1);
        Self {
            waveform,
            note,
            period,
            articulation: Articulation::new(articulation_len),
        }
    }

    pub fn waveform(&self) -> Waveform {
        self.waveform
    }

    /// The note, in semitones from C4.
    pub fn note(&self) -> i32 {
        self.note
    }

    /// Cycle length in samples.
    pub fn period(&self) -> u64 {
        self.period
    }
}

impl Instrument for PeriodicNote {
    fn articulate(&mut self, time: u64) {
        self.articulation.restart(time);
    }

    fn sample(&mut self, time: u64) -> f64 {
        if self.articulation.sounding(time) {
            return PLATEAU;
        }
        oscillator(self.waveform, self.period, time % self.period)
    }

    fn name(&self) -> &str {
        self.waveform.keyword()
    }
}

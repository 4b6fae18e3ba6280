//! Instruments — white noise and periodic waveform generators, built from text specs.

pub mod noise_gen;
pub mod oscillator;
pub mod periodic;
pub mod spec;

pub use noise_gen::NoiseGen;
pub use oscillator::Waveform;
pub use periodic::PeriodicNote;
pub use spec::{parse_instrument, parse_periodic, Scale, MAX_SCALE_NOTES};

/// Common interface for all instruments.
///
/// An instrument plays a single note. Samples are in the range `[0.0, 1.0]`.
///
/// `time` is an absolute sample position. Callers must pass non-decreasing
/// times across every `articulate` and `sample` call for the whole tune.
pub trait Instrument: Send {
    /// Restart the instrument's attack at `time`.
    fn articulate(&mut self, time: u64);

    /// Produce the unscaled sample at `time`.
    fn sample(&mut self, time: u64) -> f64;

    /// Human-readable name for this instrument.
    fn name(&self) -> &str;
}

/// Shared attack state: a fixed-level plateau for a short window after each articulation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Articulation {
    last: Option<u64>,
    len: u64,
}

/// Level returned while an articulation plateau is sounding.
pub const PLATEAU: f64 = 0.5;

impl Articulation {
    pub(crate) fn new(len: u64) -> Self {
        Self { last: None, len }
    }

    pub(crate) fn restart(&mut self, time: u64) {
        self.last = Some(time);
    }

    /// Whether `time` falls inside the plateau following the last articulation.
    pub(crate) fn sounding(&self, time: u64) -> bool {
        self.last
            .is_some_and(|last| time.saturating_sub(last) < self.len)
    }
}

//! Oscillator primitives — periodic waveform shapes over integer sample periods.

/// Available waveform shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveform {
    Triangle,
    Saw,
    Square,
}

impl Waveform {
    /// Look up a waveform by its spec keyword (`tri`, `saw`, `square`).
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "tri" => Some(Waveform::Triangle),
            "saw" => Some(Waveform::Saw),
            "square" => Some(Waveform::Square),
            _ => None,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            Waveform::Triangle => "tri",
            Waveform::Saw => "saw",
            Waveform::Square => "square",
        }
    }
}

/// Generate a single sample for the given waveform.
///
/// `period` is the cycle length in samples and `depth` the position within
/// the cycle, `0 <= depth < period`. Returns a value in [0.0, 1.0].
pub fn oscillator(waveform: Waveform, period: u64, depth: u64) -> f64 {
    match waveform {
        Waveform::Triangle => {
            let folded = if depth > period / 2 {
                period - depth
            } else {
                depth
            };
            2.0 * folded as f64 / period as f64
        }
        Waveform::Saw => depth as f64 / period as f64,
        Waveform::Square => {
            if depth < period / 2 {
                0.0
            } else {
                1.0
            }
        }
    }
}

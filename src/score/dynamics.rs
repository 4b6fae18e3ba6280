//! Dynamics — marking parser and the crescendo/decrescendo interpolation pass.
//!
//! Scores only mark dynamics sparsely. Every beat without a hand-written
//! marking is filled in here, either by holding the last multiplier or by
//! interpolating linearly between two hand-written anchors when the first
//! one is flagged as the start of a ramp.

use tracing::debug;

use super::error::ErrorKind;
use super::tune::Dynamic;
use crate::render::SynthConfig;

/// Parse a dynamic level token: `mp`, `mf`, or a run of `p` or `f`.
pub fn parse_level(token: &str) -> Result<i32, ErrorKind> {
    match token {
        "mp" => return Ok(-1),
        "mf" => return Ok(0),
        _ => {}
    }
    let invalid = || ErrorKind::InvalidLineSpec(token.to_string());
    let first = token.chars().next().ok_or_else(invalid)?;
    if !matches!(first, 'p' | 'f') || token.chars().any(|c| c != first) {
        return Err(invalid());
    }
    let count = token.len() as i32;
    Ok(if first == 'p' { -1 - count } else { count })
}

/// Parse the `<info>` half of a `<line>=<info>` dynamics entry.
///
/// `info` is a `&`-separated list of tokens. `cresc` and `dec` mark the beat
/// as the start of a ramp, `hold` keeps the previous level and ramp flag, and
/// a level token sets a new level. A level token without an accompanying
/// ramp token ends any ramp.
pub fn parse_dynamic(info: &str, prev: &Dynamic) -> Result<Dynamic, ErrorKind> {
    let mut dynamic = Dynamic {
        hand_written: true,
        should_change: prev.should_change,
        level: prev.level,
        multiplier: 0.0,
    };
    let mut ramp = false;
    for part in info.split('&').map(str::trim) {
        match part {
            "cresc" | "dec" => {
                dynamic.should_change = true;
                ramp = true;
            }
            "hold" => {}
            _ => {
                dynamic.level = parse_level(part)?;
                dynamic.should_change = ramp;
            }
        }
    }
    Ok(dynamic)
}

/// Map a dynamic level onto an amplitude multiplier.
pub fn level_to_multiplier(level: i32, config: &SynthConfig) -> f64 {
    config.base_dynamic_mult * config.dynamic_step.powi(level)
}

/// A ramp between two hand-written anchors.
#[derive(Debug, Clone, Copy)]
struct Ramp {
    start_index: usize,
    start: f64,
    end_index: usize,
    end: f64,
}

impl Ramp {
    fn at(&self, index: usize) -> f64 {
        let progress =
            (index - self.start_index) as f64 / (self.end_index - self.start_index) as f64;
        self.start + (self.end - self.start) * progress
    }
}

/// Resolve the multiplier of every line on every beat, in place.
///
/// `dynamics` is indexed `[beat][line]`; every row must have the same length.
/// Running this twice gives the same result as running it once.
pub fn interpolate(dynamics: &mut [Vec<Dynamic>], config: &SynthConfig) {
    let lines = dynamics.first().map_or(0, Vec::len);
    for line in 0..lines {
        interpolate_line(dynamics, line, config);
    }
}

fn interpolate_line(dynamics: &mut [Vec<Dynamic>], line: usize, config: &SynthConfig) {
    let mut held = config.base_dynamic_mult;
    let mut ramp: Option<Ramp> = None;

    for i in 0..dynamics.len() {
        let current = dynamics[i][line];
        if !current.hand_written {
            dynamics[i][line].multiplier = match &ramp {
                Some(r) => r.at(i),
                None => held,
            };
            continue;
        }

        let start = level_to_multiplier(current.level, config);
        dynamics[i][line].multiplier = start;
        held = start;
        ramp = None;
        if !current.should_change {
            continue;
        }

        // A ramp with nothing to ramp towards is just a hold.
        let Some(end_index) = (i + 1..dynamics.len()).find(|&j| dynamics[j][line].hand_written)
        else {
            continue;
        };
        let end = level_to_multiplier(dynamics[end_index][line].level, config);
        debug!(line, from = i, to = end_index, start, end, "dynamic ramp");
        ramp = Some(Ramp {
            start_index: i,
            start,
            end_index,
            end,
        });
    }
}

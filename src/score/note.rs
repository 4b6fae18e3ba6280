//! Note model — converts "c4", "eb3", "f#5" to semitone numbers and frequencies.
//!
//! Notes are signed semitone offsets from C4, so `c4 = 0`, `a4 = 9`, `c3 = -12`.

use super::error::ErrorKind;

/// Frequencies of C4 through B4 in Hz (scientific pitch notation).
const OCTAVE_4_HZ: [f64; 12] = [
    261.6256, 277.1826, 293.6648, 311.1270, 329.6276, 349.2282, 369.9944, 391.9954, 415.3047,
    440.0000, 466.1638, 493.8833,
];

/// Semitone offsets from C for the letters `a` through `g`.
const LETTER_SEMITONES: [i32; 7] = [9, 11, 0, 2, 4, 5, 7];

/// Parse a note name into a semitone offset from C4.
///
/// Format: `<letter><optional accidental><octave>`
/// - Letter: a, b, c, d, e, f, g (lowercase)
/// - Accidental: # (sharp) or b (flat)
/// - Octave: any integer, 4 being the octave of middle C
pub fn parse_note(name: &str) -> Result<i32, ErrorKind> {
    let invalid = || ErrorKind::InvalidNote(name.to_string());

    let mut chars = name.chars();
    let letter = chars.next().ok_or_else(invalid)?;
    if name.len() < 2 || !('a'..='g').contains(&letter) {
        return Err(invalid());
    }
    let mut semitone = LETTER_SEMITONES[(letter as u8 - b'a') as usize];

    let mut rest = chars.as_str();
    if let Some(stripped) = rest.strip_prefix('#') {
        semitone += 1;
        rest = stripped;
    } else if let Some(stripped) = rest.strip_prefix('b') {
        semitone -= 1;
        rest = stripped;
    }
    let semitone = semitone.rem_euclid(12);

    let octave: i32 = rest.parse().map_err(|_| invalid())?;
    octave
        .checked_sub(4)
        .and_then(|o| o.checked_mul(12))
        .and_then(|o| o.checked_add(semitone))
        .ok_or_else(invalid)
}

/// Convert a semitone offset from C4 into a frequency in Hz.
///
/// Equal temperament anchored at A4 = 440 Hz. Defined for every integer.
pub fn note_to_freq(note: i32) -> f64 {
    // Shift so that A4 is zero; octaves then run A..G#.
    let shifted = note as i64 - 9;
    let mut octave_shift = shifted.div_euclid(12);
    let index = (shifted.rem_euclid(12) + 9) as usize;
    if index >= 12 {
        // C..G# of the A-rooted octave live one octave above the C4 table.
        octave_shift += 1;
    }
    let octave_shift = octave_shift.clamp(i32::MIN as i64, i32::MAX as i64) as i32;
    OCTAVE_4_HZ[index % 12] * 2.0f64.powi(octave_shift)
}

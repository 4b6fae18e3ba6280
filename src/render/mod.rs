//! Renderer — turns a compiled tune into per-beat blocks of mixed samples.
//!
//! Each note contributes `sample * multiplier`, truncated to an integer, and
//! all notes on a beat are summed. Instrument samples lie in `[0.0, 1.0]`,
//! so with the default `mf` multiplier of 1000 a single note spans 0..=1000.
//! Both the per-note product and the sum saturate at the `i32` range.

pub mod config;
pub mod wav;

pub use config::SynthConfig;
pub use wav::{write_wav, write_wav_file, WavError};

use tracing::info;

use crate::score::Tune;

/// Iterator over the rendered beats of a tune.
///
/// Yields one block of `samples_per_beat` samples per beat, in order.
pub struct Renderer {
    tune: Tune,
    beat: usize,
    position: u64,
}

impl Renderer {
    pub fn new(tune: Tune) -> Self {
        Self {
            tune,
            beat: 0,
            position: 0,
        }
    }

    /// Absolute sample position of the next beat.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn tune(&self) -> &Tune {
        &self.tune
    }

    /// Render one beat, or `None` once the tune is finished.
    pub fn render_beat(&mut self) -> Option<Vec<i32>> {
        let notes = self.tune.beats.get(self.beat)?;
        let dynamics = &self.tune.dynamics[self.beat];
        let mut block = vec![0i32; self.tune.samples_per_beat];

        for hit in notes {
            let instrument = &mut self.tune.instruments[hit.instrument];
            if hit.articulate {
                instrument.articulate(self.position);
            }
            let multiplier = dynamics[hit.line].multiplier;
            for (offset, out) in block.iter_mut().enumerate() {
                let sample = instrument.sample(self.position + offset as u64);
                *out = out.saturating_add((sample * multiplier) as i32);
            }
        }

        self.beat += 1;
        self.position += self.tune.samples_per_beat as u64;
        Some(block)
    }

    /// Render every remaining beat into one contiguous buffer.
    pub fn render_all(mut self) -> Vec<i32> {
        let mut out = Vec::with_capacity(self.tune.total_samples());
        while let Some(block) = self.render_beat() {
            out.extend(block);
        }
        info!(
            beats = self.tune.len(),
            samples = out.len(),
            "rendered tune"
        );
        out
    }
}

impl Iterator for Renderer {
    type Item = Vec<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        self.render_beat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::parse_str;

    fn render(src: &str) -> Vec<Vec<i32>> {
        let tune = parse_str(src, &SynthConfig::default()).expect("parse failed");
        Renderer::new(tune).collect()
    }

    #[test]
    fn one_block_per_beat() {
        let blocks = render("600\na\nsquare|a4\nA|\na|\n |\n");
        assert_eq!(blocks.len(), 3);
        assert!(blocks.iter().all(|b| b.len() == 4410));
    }

    #[test]
    fn rest_is_silent() {
        let blocks = render("600\na\nsquare|a4\n |\n");
        assert!(blocks[0].iter().all(|&s| s == 0));
    }

    #[test]
    fn articulation_plateau_at_beat_start() {
        let blocks = render("600\na\nsaw|a4\nA|a=mf\n");
        assert!(blocks[0][..100].iter().all(|&s| s == 500));
        // Past the plateau the saw restarts from absolute phase.
        assert_eq!(blocks[0][100], 0);
        assert_eq!(blocks[0][150], 500);
    }

    #[test]
    fn lowercase_continues_without_plateau() {
        let blocks = render("600\na\nsquare|a4\na|\n");
        // Square is low for the first half of each 100-sample period.
        assert!(blocks[0][..50].iter().all(|&s| s == 0));
        assert!(blocks[0][50..100].iter().all(|&s| s == 1000));
    }

    #[test]
    fn time_runs_across_beats() {
        // 44100 * 60 / 600 = 4410 samples per beat = 44.1 saw periods.
        let blocks = render("600\na\nsaw|a4\na|\na|\n");
        assert_eq!(blocks[1][0], 100);
    }

    #[test]
    fn notes_on_different_lines_sum() {
        let blocks = render("600\nab\nsquare|a4, square|a4\nab|\n");
        assert_eq!(blocks[0][60], 2000);
    }

    #[test]
    fn dynamics_scale_notes() {
        let blocks = render("600\nab\nsquare|a4, square|a4\nab|a=f, b=p\n");
        let expected = (1500.0f64) as i32 + (1000.0 / 2.25f64) as i32;
        assert_eq!(blocks[0][60], expected);
    }

    #[test]
    fn loud_notes_saturate_the_mix() {
        let fff = "f".repeat(60);
        let blocks = render(&format!(
            "600\nab\nsquare|a4, square|a4\nAb|a={fff}, b={fff}\n"
        ));
        // Plateau on line a plus a high square on line b.
        assert_eq!(blocks[0][60], i32::MAX);
        // Both square waves low.
        assert_eq!(blocks[0][110], 0);
    }

    #[test]
    fn render_all_concatenates() {
        let tune = parse_str("600\na\nsquare|a4\nA|\na|\n", &SynthConfig::default()).unwrap();
        let total = tune.total_samples();
        let out = Renderer::new(tune).render_all();
        assert_eq!(out.len(), total);
        assert_eq!(out.len(), 8820);
    }

    #[test]
    fn position_advances_per_beat() {
        let tune = parse_str("600\na\nsquare|a4\nA|\na|\n", &SynthConfig::default()).unwrap();
        let mut renderer = Renderer::new(tune);
        assert_eq!(renderer.position(), 0);
        renderer.render_beat();
        assert_eq!(renderer.position(), 4410);
        renderer.render_beat();
        assert!(renderer.render_beat().is_none());
        assert_eq!(renderer.position(), 8820);
    }
}

//! Chiptune — compiles a plain-text score into a stream of PCM samples.

pub mod instrument;
pub mod render;
pub mod score;

//! WAV output — writes rendered beats as 16-bit mono PCM.

use std::io::{Seek, Write};
use std::path::Path;

/// Errors that can occur when writing a WAV file.
#[derive(Debug, thiserror::Error)]
pub enum WavError {
    /// WAV encoding or I/O error.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),
}

fn spec(sample_rate: u32) -> hound::WavSpec {
    hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    }
}

/// Write blocks of mixed samples to a WAV stream, saturating to the 16-bit range.
///
/// Returns the number of samples written.
pub fn write_wav<W, I>(writer: W, sample_rate: u32, blocks: I) -> Result<u64, WavError>
where
    W: Write + Seek,
    I: IntoIterator<Item = Vec<i32>>,
{
    let mut wav = hound::WavWriter::new(writer, spec(sample_rate))?;
    let mut written = 0u64;
    for block in blocks {
        for sample in block {
            wav.write_sample(saturate(sample))?;
            written += 1;
        }
    }
    wav.finalize()?;
    Ok(written)
}

/// Write blocks of mixed samples to a WAV file at `path`.
pub fn write_wav_file<I>(path: &Path, sample_rate: u32, blocks: I) -> Result<u64, WavError>
where
    I: IntoIterator<Item = Vec<i32>>,
{
    let file = std::io::BufWriter::new(std::fs::File::create(path).map_err(hound::Error::from)?);
    write_wav(file, sample_rate, blocks)
}

fn saturate(sample: i32) -> i16 {
    sample.clamp(i16::MIN as i32, i16::MAX as i32) as i16
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn saturates_to_16_bit() {
        assert_eq!(saturate(0), 0);
        assert_eq!(saturate(1234), 1234);
        assert_eq!(saturate(40_000), i16::MAX);
        assert_eq!(saturate(-40_000), i16::MIN);
    }

    #[test]
    fn writes_mono_16_bit() {
        let mut buf = Cursor::new(Vec::new());
        let written = write_wav(&mut buf, 44100, vec![vec![0, 500, 1000], vec![-20, 70_000]]).unwrap();
        assert_eq!(written, 5);

        buf.set_position(0);
        let reader = hound::WavReader::new(buf).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 44100);
        assert_eq!(spec.bits_per_sample, 16);
        let samples: Vec<i16> = reader.into_samples::<i16>().map(Result::unwrap).collect();
        assert_eq!(samples, [0, 500, 1000, -20, i16::MAX]);
    }

    #[test]
    fn empty_tune_writes_valid_header() {
        let mut buf = Cursor::new(Vec::new());
        let written = write_wav(&mut buf, 22050, Vec::<Vec<i32>>::new()).unwrap();
        assert_eq!(written, 0);
        buf.set_position(0);
        let reader = hound::WavReader::new(buf).unwrap();
        assert_eq!(reader.len(), 0);
        assert_eq!(reader.spec().sample_rate, 22050);
    }

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        write_wav_file(&path, 44100, vec![vec![1, 2, 3]]).unwrap();
        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.len(), 3);
    }
}

//! Synth configuration — sample rate and mixing constants, loaded from ~/.chiptune/config.yaml.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Fixed numeric settings shared by the parser, instruments, and renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    /// Output sample rate in Hz.
    pub sample_rate: u32,
    /// Length of the plateau following an articulation, in samples.
    pub articulation_len: u64,
    /// Multiplier of the `mf` dynamic.
    pub base_dynamic_mult: f64,
    /// Ratio between adjacent dynamic levels.
    pub dynamic_step: f64,
    /// Seed for white noise instruments.
    pub noise_seed: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            articulation_len: 100,
            base_dynamic_mult: 1000.0,
            dynamic_step: 1.5,
            noise_seed: 42,
        }
    }
}

impl SynthConfig {
    /// Load a config from a YAML file.
    pub fn from_path(path: &Path) -> Result<Self, io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    /// Load config from the standard path (~/.chiptune/config.yaml).
    /// Returns defaults if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        default_config_path()
            .and_then(|path| Self::from_path(&path).ok())
            .unwrap_or_default()
    }
}

/// Get the config file path.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".chiptune").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let config = SynthConfig::default();
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.articulation_len, 100);
        assert_eq!(config.base_dynamic_mult, 1000.0);
        assert_eq!(config.dynamic_step, 1.5);
    }

    #[test]
    fn serialize_deserialize() {
        let config = SynthConfig::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: SynthConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let yaml = "sample_rate: 22050\ndynamic_step: 2.0\n";
        let config: SynthConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.sample_rate, 22050);
        assert_eq!(config.dynamic_step, 2.0);
        assert_eq!(config.articulation_len, 100);
        assert_eq!(config.noise_seed, 42);
    }

    #[test]
    fn from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "noise_seed: 7").unwrap();
        let config = SynthConfig::from_path(file.path()).unwrap();
        assert_eq!(config.noise_seed, 7);
    }

    #[test]
    fn from_path_rejects_bad_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "sample_rate: [1, 2]").unwrap();
        let err = SynthConfig::from_path(file.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SynthConfig::from_path(&dir.path().join("nope.yaml")).is_err());
    }

    #[test]
    fn load_never_panics() {
        let _ = SynthConfig::load();
    }
}

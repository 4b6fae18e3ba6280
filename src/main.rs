//! Chiptune — renders a `.tune` score to a 16-bit mono WAV file.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use chiptune::render::{write_wav_file, Renderer, SynthConfig};
use chiptune::score::read_tune;

#[derive(Parser, Debug)]
#[command(version, about = "Render a chiptune score to a WAV file")]
struct Args {
    /// Score to compile.
    input: PathBuf,

    /// WAV file to write.
    output: PathBuf,

    /// YAML synth config (defaults to ~/.chiptune/config.yaml if present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the white noise seed.
    #[arg(long)]
    seed: Option<u64>,
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => SynthConfig::from_path(path)
            .map_err(|e| format!("failed to load config {}: {e}", path.display()))?,
        None => SynthConfig::load(),
    };
    if let Some(seed) = args.seed {
        config.noise_seed = seed;
    }

    let tune = read_tune(&args.input, &config)
        .map_err(|e| format!("{}: {e}", args.input.display()))?;
    info!(
        tempo = tune.tempo(),
        beats = tune.len(),
        lines = tune.lines().len(),
        instruments = tune.instrument_count(),
        "compiled {}",
        args.input.display()
    );

    let written = write_wav_file(&args.output, config.sample_rate, Renderer::new(tune))?;
    info!(
        samples = written,
        seconds = written as f64 / config.sample_rate as f64,
        "wrote {}",
        args.output.display()
    );
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

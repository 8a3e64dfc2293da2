use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use ferrous_mlp::data::{self, Digit, CLASSES};
use ferrous_mlp::{Network, TrainConfig};

/// Trains a sigmoid MLP on MNIST-format digits, or evaluates saved weights.
#[derive(Parser, Debug)]
#[command(name = "ferrous-mlp", version)]
struct Cli {
    /// Weight file from an earlier run; training is skipped when given.
    weights: Option<PathBuf>,

    /// Directory holding the four IDX files.
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// JSON training config; built-in defaults otherwise.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Overrides the config seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Where newly trained weights are written.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    ferrous_mlp::telemetry::init_tracing()?;

    let test_set = load_split(&cli.data_dir, data::TEST_IMAGES, data::TEST_LABELS)?;

    let network = match &cli.weights {
        Some(path) => Network::load(path)
            .with_context(|| format!("failed to load weights from {}", path.display()))?,
        None => train(&cli)?,
    };
    check_widths(&network, &test_set)?;

    let eval = network.validate(&test_set)?;
    info!(mean_cost = eval.mean_cost(), "test set: {eval}");
    println!("Test accuracy: {eval}");
    Ok(())
}

fn train(cli: &Cli) -> Result<Network> {
    let mut config = match &cli.config {
        Some(path) => TrainConfig::load_json(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => TrainConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    config.validate()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        seed,
        layers = ?config.layer_sizes,
        epochs = config.epochs,
        batch_size = config.batch_size,
        learning_rate = config.learning_rate,
        "starting training"
    );
    let mut rng = StdRng::seed_from_u64(seed);

    let training = load_split(&cli.data_dir, data::TRAIN_IMAGES, data::TRAIN_LABELS)?;
    let mut network = Network::random(&config.layer_sizes, &mut rng)?;
    check_widths(&network, &training)?;

    network.sgd(
        &training,
        config.epochs,
        config.batch_size,
        config.learning_rate,
        &mut rng,
    )?;

    let path = cli
        .out_dir
        .join(config.weights_file_name(Local::now().naive_local()));
    network
        .save(&path)
        .with_context(|| format!("failed to write weights to {}", path.display()))?;
    println!("Saved weights to {}", path.display());
    Ok(network)
}

fn load_split(dir: &Path, images: &str, labels: &str) -> Result<Vec<Digit>> {
    let digits = data::load_digits(&dir.join(images), &dir.join(labels))?;
    if digits.is_empty() {
        bail!("{} contains no samples", dir.join(images).display());
    }
    Ok(digits)
}

fn check_widths(network: &Network, samples: &[Digit]) -> Result<()> {
    let pixels = samples.first().map_or(0, |d| d.pixels.len());
    if network.input_size() != pixels || network.output_size() != CLASSES {
        bail!(
            "network is {:?} but samples have {pixels} pixels and {CLASSES} classes",
            network.layer_sizes()
        );
    }
    Ok(())
}

// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `train`, `predict` and
// `evaluate`, and all their configurable flags.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::train_use_case::TrainConfig;
use crate::ml::detector::DEFAULT_TRUNCATE;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the classifier on a labelled CSV of domains
    Train(TrainArgs),

    /// Classify domains with a trained checkpoint
    Predict(PredictArgs),

    /// Report a checkpoint's accuracy on a labelled CSV
    Evaluate(EvaluateArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// CSV with `domain` and `type` columns (0 = legit, 1 = dga)
    #[arg(long, default_value = "data/dga_domains.csv")]
    pub data: PathBuf,

    /// Where the trained checkpoint is written
    #[arg(long, default_value = "checkpoints/dga_detector.mpk")]
    pub checkpoint: PathBuf,

    /// Directory for metrics.csv and train_config.json
    #[arg(long, default_value = "checkpoints")]
    pub metrics_dir: PathBuf,

    /// Continue training from an existing checkpoint
    #[arg(long)]
    pub resume: Option<PathBuf>,

    #[arg(long, default_value_t = 1000)]
    pub batch_size: usize,

    #[arg(long, default_value_t = 5)]
    pub epochs: usize,

    /// Fraction of records used for training
    #[arg(long, default_value_t = 0.7)]
    pub train_size: f64,

    /// Characters kept from the start of each domain
    #[arg(long, default_value_t = 100)]
    pub truncate: usize,

    /// Width every batch is zero-padded to
    #[arg(long, default_value_t = 100)]
    pub pad_max_len: usize,

    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Size of the character vocabulary (codes at or above map to padding)
    #[arg(long, default_value_t = 128)]
    pub char_vocab: usize,

    #[arg(long, default_value_t = 100)]
    pub hidden_size: usize,

    /// Number of output classes
    #[arg(long, default_value_t = 2)]
    pub n_domain_type: usize,

    /// Stacked bidirectional GRU layers
    #[arg(long, default_value_t = 3)]
    pub n_layers: usize,

    /// Seed for the train/test shuffle
    #[arg(long)]
    pub seed: Option<u64>,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            data_path:     a.data,
            checkpoint:    a.checkpoint,
            metrics_dir:   a.metrics_dir,
            resume:        a.resume,
            char_vocab:    a.char_vocab,
            hidden_size:   a.hidden_size,
            n_domain_type: a.n_domain_type,
            n_layers:      a.n_layers,
            batch_size:    a.batch_size,
            epochs:        a.epochs,
            train_size:    a.train_size,
            truncate:      a.truncate,
            pad_max_len:   a.pad_max_len,
            lr:            a.lr,
            seed:          a.seed,
        }
    }
}

/// All arguments for the `predict` command
#[derive(Args, Debug)]
pub struct PredictArgs {
    #[arg(long, default_value = "checkpoints/dga_detector.mpk")]
    pub checkpoint: PathBuf,

    /// Domain to classify; may be repeated
    #[arg(long = "domain")]
    pub domains: Vec<String>,

    /// File with one domain per line
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Print DGA probabilities instead of class labels
    #[arg(long)]
    pub probability: bool,

    #[arg(long, default_value_t = DEFAULT_TRUNCATE)]
    pub truncate: usize,
}

/// All arguments for the `evaluate` command
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[arg(long, default_value = "checkpoints/dga_detector.mpk")]
    pub checkpoint: PathBuf,

    /// Labelled CSV in the same format as `train --data`
    #[arg(long)]
    pub data: PathBuf,

    #[arg(long, default_value_t = 1000)]
    pub batch_size: usize,

    #[arg(long, default_value_t = 100)]
    pub truncate: usize,

    #[arg(long, default_value_t = 100)]
    pub pad_max_len: usize,
}

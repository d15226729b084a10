// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with `clap`.
// All business logic is delegated to Layer 2 (application).
//
//   1. `train`    — fits a model on a labelled CSV
//   2. `predict`  — prints `domain<TAB>value` per input domain
//   3. `evaluate` — prints accuracy on a labelled CSV

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvaluateArgs, PredictArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "dga-detector",
    version,
    about = "Character-level RNN classifier for DGA-generated domain names."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the matching use case. Only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args)    => run_train(args),
            Commands::Predict(args)  => run_predict(args),
            Commands::Evaluate(args) => run_evaluate(args),
        }
    }
}

fn run_train(args: TrainArgs) -> Result<()> {
    use crate::application::train_use_case::TrainUseCase;

    tracing::info!("Starting training on '{}'", args.data.display());
    let checkpoint = args.checkpoint.clone();
    let report = TrainUseCase::new(args.into()).execute()?;

    match report.final_accuracy() {
        Some(acc) => println!("Training complete. Test accuracy {:.2}%.", acc * 100.0),
        None      => println!("Training complete."),
    }
    println!("Checkpoint saved to {}", checkpoint.display());
    Ok(())
}

fn run_predict(args: PredictArgs) -> Result<()> {
    use crate::application::predict_use_case::PredictUseCase;

    let domains = PredictUseCase::collect_domains(&args.domains, args.input.as_deref())?;
    anyhow::ensure!(!domains.is_empty(), "no domains given; use --domain or --input");

    let use_case = PredictUseCase::new(&args.checkpoint)?;
    let prediction = use_case.classify(&domains, args.probability, args.truncate)?;

    for (i, domain) in domains.iter().enumerate() {
        if let Some(value) = prediction.format_value(i) {
            println!("{domain}\t{value}");
        }
    }
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    use crate::application::evaluate_use_case::EvaluateUseCase;

    let use_case = EvaluateUseCase::new(&args.checkpoint)?;
    let accuracy = use_case.evaluate(&args.data, args.batch_size, args.truncate, args.pad_max_len)?;
    println!("Accuracy: {:.4}", accuracy);
    Ok(())
}

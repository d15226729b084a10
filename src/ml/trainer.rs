// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Epoch loop over the train partition with Adam and
// cross-entropy, evaluating on the test partition at the end
// of every epoch.
//
//   - Training uses the AutodiffBackend B for gradients
//   - model.valid() returns the model on B::InnerBackend
//     for evaluation (no autodiff overhead)
//   - Batches come in dataset order; empty ones are skipped

use burn::{
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};
use indicatif::{ProgressBar, ProgressStyle};

use crate::data::{batcher::DgaBatcher, dataset::DgaDataset};
use crate::error::{DgaError, DgaResult};
use crate::infra::metrics::EpochMetrics;
use crate::ml::evaluator::evaluate;
use crate::ml::model::RnnClassifier;

/// Running loss is logged every this many non-empty batches.
const LOG_EVERY: usize = 10;

/// Parameters of one `train_model` call.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainParams {
    pub batch_size:    usize,
    pub epochs:        usize,
    /// Fraction of records used for training; the rest is the test partition
    pub train_size:    f64,
    /// Characters kept from the start of each domain
    pub truncate:      usize,
    /// Width every batch is zero-padded to
    pub pad_max_len:   usize,
    pub learning_rate: f64,
    /// Shuffle seed for the train/test split
    pub seed:          Option<u64>,
}

impl Default for TrainParams {
    fn default() -> Self {
        Self {
            batch_size:    1000,
            epochs:        5,
            train_size:    0.7,
            truncate:      100,
            pad_max_len:   100,
            learning_rate: 1e-3,
            seed:          None,
        }
    }
}

impl TrainParams {
    pub fn validate(&self) -> DgaResult<()> {
        if self.batch_size == 0 {
            return Err(DgaError::invalid_config("batch_size must be positive"));
        }
        if self.pad_max_len == 0 {
            return Err(DgaError::invalid_config("pad_max_len must be positive"));
        }
        if !(self.train_size > 0.0 && self.train_size <= 1.0) {
            return Err(DgaError::invalid_config(format!(
                "train_size must be in (0, 1], got {}", self.train_size
            )));
        }
        if !(self.learning_rate > 0.0) {
            return Err(DgaError::invalid_config("learning_rate must be positive"));
        }
        Ok(())
    }
}

/// Per-epoch loss and test accuracy of a training run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrainingReport {
    pub epochs: Vec<EpochMetrics>,
}

impl TrainingReport {
    pub fn final_accuracy(&self) -> Option<f64> {
        self.epochs.last().map(|m| m.test_accuracy)
    }

    pub fn final_loss(&self) -> Option<f64> {
        self.epochs.last().map(|m| m.train_loss)
    }
}

pub fn train_loop<B: AutodiffBackend>(
    mut model: RnnClassifier<B>,
    train:     &DgaDataset,
    test:      &DgaDataset,
    params:    &TrainParams,
    device:    &B::Device,
) -> DgaResult<(RnnClassifier<B>, TrainingReport)> {
    let mut optim = AdamConfig::new().init();
    let batcher   = DgaBatcher::<B>::new(device.clone(), params.pad_max_len);
    let dataset_len = train.sample_count();
    let mut report  = TrainingReport::default();

    if dataset_len == 0 {
        tracing::warn!("Train partition is empty; weights will not change");
    }

    let progress = epoch_progress(params.epochs);

    for epoch in 1..=params.epochs {
        let mut total_loss = 0.0f64;
        let mut batches    = 0usize;
        let mut seen       = 0usize;

        for items in train.batches(params.batch_size) {
            if items.is_empty() {
                continue;
            }
            let batch = batcher.batch(items)?;
            let (loss, _) = model.forward_loss(batch.inputs, batch.lengths, batch.labels);
            let loss_val: f64 = loss.clone().into_scalar().elem::<f64>();

            // Backward pass + Adam update
            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(params.learning_rate, model, grads);

            total_loss += loss_val;
            batches    += 1;
            seen       += items.len();

            if batches % LOG_EVERY == 0 {
                tracing::info!(
                    "[{}/{} ({:.0}%)]\tLoss: {:.4}",
                    seen,
                    dataset_len,
                    100.0 * seen as f64 / dataset_len as f64,
                    total_loss / batches as f64,
                );
            }
        }

        let train_loss = if batches > 0 { total_loss / batches as f64 } else { f64::NAN };
        let accuracy = evaluate(
            &model.valid(), test, params.batch_size, params.pad_max_len, device,
        )?.accuracy();

        tracing::info!(
            "Epoch {:>3}/{} | train_loss={:.4} | test_acc={:.1}%",
            epoch, params.epochs, train_loss, accuracy * 100.0,
        );
        report.epochs.push(EpochMetrics::new(epoch, train_loss, accuracy));
        progress.set_message(format!("loss {train_loss:.4}"));
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok((model, report))
}

fn epoch_progress(epochs: usize) -> ProgressBar {
    let pb = ProgressBar::new(epochs as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "Epoch [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos:>3}/{len:3} {msg}",
    ) {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_match_detector_defaults() {
        let p = TrainParams::default();
        assert_eq!((p.batch_size, p.epochs, p.truncate, p.pad_max_len), (1000, 5, 100, 100));
        assert_eq!(p.train_size, 0.7);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_params() {
        let zero_batch = TrainParams { batch_size: 0, ..TrainParams::default() };
        assert!(zero_batch.validate().is_err());

        let bad_split = TrainParams { train_size: 1.5, ..TrainParams::default() };
        assert!(bad_split.validate().is_err());

        let empty_split = TrainParams { train_size: 0.0, ..TrainParams::default() };
        assert!(empty_split.validate().is_err());
    }

    #[test]
    fn test_report_accessors() {
        let report = TrainingReport {
            epochs: vec![EpochMetrics::new(1, 0.7, 0.5), EpochMetrics::new(2, 0.3, 0.9)],
        };
        assert_eq!(report.final_accuracy(), Some(0.9));
        assert_eq!(report.final_loss(), Some(0.3));
        assert_eq!(TrainingReport::default().final_accuracy(), None);
    }
}

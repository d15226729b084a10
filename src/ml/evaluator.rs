// ============================================================
// Layer 5 — Evaluator
// ============================================================
// Accuracy of arg-max predictions against true labels:
//
//   accuracy = correct / dataset length
//
// An empty dataset has accuracy 0.0 rather than NaN.

use burn::prelude::*;

use crate::data::{batcher::DgaBatcher, dataset::DgaDataset};
use crate::error::DgaResult;
use crate::ml::model::RnnClassifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    pub correct: usize,
    pub total:   usize,
}

impl Evaluation {
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 { 0.0 } else { self.correct as f64 / self.total as f64 }
    }
}

pub fn evaluate<B: Backend>(
    model:       &RnnClassifier<B>,
    dataset:     &DgaDataset,
    batch_size:  usize,
    pad_max_len: usize,
    device:      &B::Device,
) -> DgaResult<Evaluation> {
    tracing::info!("Evaluating trained model ...");
    let batcher = DgaBatcher::<B>::new(device.clone(), pad_max_len);
    let mut correct = 0usize;

    for items in dataset.batches(batch_size) {
        if items.is_empty() {
            continue;
        }
        let batch  = batcher.batch(items)?;
        let output = model.forward(batch.inputs, batch.lengths);

        // argmax(1) returns shape [batch, 1]
        let pred = output.argmax(1).flatten::<1>(0, 1);
        let batch_correct: i64 = pred
            .equal(batch.labels)
            .int().sum().into_scalar().elem::<i64>();
        correct += batch_correct as usize;
    }

    let eval = Evaluation { correct, total: dataset.sample_count() };
    if eval.total == 0 {
        tracing::warn!("Evaluation dataset is empty; reporting accuracy 0");
    }
    tracing::info!("Test set accuracy: {}/{} ({:.4})", eval.correct, eval.total, eval.accuracy());
    Ok(eval)
}

// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Runs an eval-mode forward pass over vectorized domains.
//
//   probability = sigmoid(logit of the positive class)
//   label       = arg-max over class logits
//
// Inputs are processed in fixed-size chunks; results are
// appended chunk by chunk, so output order is input order.

use burn::{prelude::*, tensor::activation};

use crate::data::batcher::DgaBatcher;
use crate::domain::record::{DomainType, Prediction};
use crate::error::{DgaError, DgaResult};
use crate::ml::model::RnnClassifier;

/// Domains per forward pass during inference
pub const INFERENCE_BATCH: usize = 1000;

pub fn infer<B: Backend>(
    model:       &RnnClassifier<B>,
    codes:       &[Vec<u32>],
    probability: bool,
    pad_max_len: usize,
    device:      &B::Device,
) -> DgaResult<Prediction> {
    let batcher = DgaBatcher::<B>::new(device.clone(), pad_max_len);
    let mut probs: Vec<f32> = Vec::new();
    let mut labels: Vec<usize> = Vec::new();

    for chunk in codes.chunks(INFERENCE_BATCH) {
        let (inputs, lengths) = batcher.sequences(chunk.iter().map(Vec::as_slice));
        let logits = model.forward(inputs, lengths);
        let [n, _] = logits.dims();

        if probability {
            let positive = logits.narrow(1, DomainType::Dga.index(), 1).reshape([n]);
            let values = activation::sigmoid(positive)
                .into_data()
                .to_vec::<f32>()
                .map_err(|e| DgaError::Tensor(format!("{e:?}")))?;
            probs.extend(values);
        } else {
            let preds = logits.argmax(1).reshape([n]).into_data();
            labels.extend(preds.iter::<i64>().map(|v| v as usize));
        }
        tracing::debug!("Classified chunk of {} domains", n);
    }

    Ok(if probability { Prediction::Probabilities(probs) } else { Prediction::Labels(labels) })
}

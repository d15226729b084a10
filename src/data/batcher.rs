// ============================================================
// Layer 4 — DGA Batcher
// ============================================================
// Converts a slice of DgaSamples (or raw code sequences) into
// device tensors.
//
// How batching works here:
//   Input:  N samples, each with a variable-length code vector
//   Output: DgaBatch with
//             inputs  [N, pad_max_len]  zero-padded codes
//             lengths [N]               true lengths, ≤ pad_max_len
//             labels  [N]               class indices
//
//   Sequences longer than the pad width are cut at the pad width
//   and their length clamped with them, so a length never points
//   past the end of its row.

use burn::prelude::*;

use crate::data::dataset::DgaSample;
use crate::data::vectorizer::PAD_CODE;
use crate::error::{DgaError, DgaResult};

// ─── DgaBatch ─────────────────────────────────────────────────────────────────
#[derive(Debug, Clone)]
pub struct DgaBatch<B: Backend> {
    /// Character codes — shape: [batch_size, pad_max_len]
    pub inputs: Tensor<B, 2, Int>,

    /// True sequence lengths — shape: [batch_size]
    pub lengths: Tensor<B, 1, Int>,

    /// Class indices — shape: [batch_size]
    pub labels: Tensor<B, 1, Int>,
}

// ─── DgaBatcher ───────────────────────────────────────────────────────────────
/// Holds the target device so tensors are created on the correct GPU/CPU.
#[derive(Clone, Debug)]
pub struct DgaBatcher<B: Backend> {
    pub device:      B::Device,
    pub pad_max_len: usize,
}

impl<B: Backend> DgaBatcher<B> {
    pub fn new(device: B::Device, pad_max_len: usize) -> Self {
        Self { device, pad_max_len }
    }

    /// Labelled batch for training and evaluation.
    /// Fails on a label that does not fit the tensor's integer type.
    pub fn batch(&self, items: &[DgaSample]) -> DgaResult<DgaBatch<B>> {
        let labels = items
            .iter()
            .map(|s| {
                i32::try_from(s.label).map_err(|_| DgaError::LabelOutOfRange {
                    label:     s.label,
                    n_classes: i32::MAX as usize,
                })
            })
            .collect::<DgaResult<Vec<i32>>>()?;
        let labels = Tensor::<B, 1, Int>::from_ints(labels.as_slice(), &self.device);

        let (inputs, lengths) = self.sequences(items.iter().map(|s| s.codes.as_slice()));
        Ok(DgaBatch { inputs, lengths, labels })
    }

    /// Padded input tensor and length tensor for unlabelled sequences.
    pub fn sequences<'a, I>(&self, codes: I) -> (Tensor<B, 2, Int>, Tensor<B, 1, Int>)
    where
        I: IntoIterator<Item = &'a [u32]>,
    {
        let width = self.pad_max_len;
        let mut flat: Vec<i32> = Vec::new();
        let mut lengths: Vec<i32> = Vec::new();

        for seq in codes {
            let kept = seq.len().min(width);
            flat.extend(seq[..kept].iter().map(|&c| c as i32));
            flat.extend(std::iter::repeat(PAD_CODE as i32).take(width - kept));
            lengths.push(kept as i32);
        }

        let batch_size = lengths.len();
        let inputs = Tensor::<B, 1, Int>::from_ints(flat.as_slice(), &self.device)
            .reshape([batch_size, width]);
        let lengths = Tensor::<B, 1, Int>::from_ints(lengths.as_slice(), &self.device);

        (inputs, lengths)
    }
}

// ============================================================
// Layer 5 — Character RNN Classifier
// ============================================================
// embedding(vocab → hidden)
//   → n_layers × bidirectional GRU
//   → linear(hidden → classes) on the final reverse-direction state
//
// Variable-length domains share one padded tensor. Each GRU step
// is gated by a length mask so a row's state only moves while
// t < len: the forward direction stops at the last real character
// and the reverse direction starts there. Padding therefore never
// reaches the classifier head, whatever the pad width.

use burn::{
    nn::{
        loss::CrossEntropyLossConfig,
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
    },
    prelude::*,
    tensor::activation,
};

use crate::error::{DgaError, DgaResult};

#[derive(Config, Debug)]
pub struct RnnClassifierConfig {
    /// Character vocabulary size (128 covers ASCII)
    pub input_size:  usize,
    pub hidden_size: usize,
    /// Number of domain classes
    pub output_size: usize,
    pub n_layers:    usize,
}

impl RnnClassifierConfig {
    pub fn validate(&self) -> DgaResult<()> {
        if self.input_size == 0 {
            return Err(DgaError::invalid_config("input_size must be positive"));
        }
        if self.hidden_size == 0 {
            return Err(DgaError::invalid_config("hidden_size must be positive"));
        }
        if self.n_layers == 0 {
            return Err(DgaError::invalid_config("n_layers must be positive"));
        }
        if self.output_size < 2 {
            return Err(DgaError::invalid_config("output_size must be at least 2"));
        }
        Ok(())
    }

    pub fn init<B: Backend>(&self, device: &B::Device) -> RnnClassifier<B> {
        let embedding = EmbeddingConfig::new(self.input_size, self.hidden_size).init(device);
        // Later layers read the concatenated forward + reverse outputs.
        let layers = (0..self.n_layers)
            .map(|i| {
                let d_input = if i == 0 { self.hidden_size } else { 2 * self.hidden_size };
                BiGruLayer {
                    forward_cell:  GruCell::new(d_input, self.hidden_size, device),
                    backward_cell: GruCell::new(d_input, self.hidden_size, device),
                }
            })
            .collect();
        let fc = LinearConfig::new(self.hidden_size, self.output_size).init(device);
        RnnClassifier {
            embedding, layers, fc,
            input_size:  self.input_size,
            hidden_size: self.hidden_size,
            output_size: self.output_size,
            n_layers:    self.n_layers,
        }
    }
}

// ─── GRU cell ─────────────────────────────────────────────────────────────────
#[derive(Module, Debug)]
pub struct GruCell<B: Backend> {
    /// W_i[r|z|n] x + b_i
    pub input_gates:  Linear<B>,
    /// W_h[r|z|n] h + b_h
    pub hidden_gates: Linear<B>,
    pub hidden_size:  usize,
}

impl<B: Backend> GruCell<B> {
    pub fn new(d_input: usize, d_hidden: usize, device: &B::Device) -> Self {
        Self {
            input_gates:  LinearConfig::new(d_input, 3 * d_hidden).init(device),
            hidden_gates: LinearConfig::new(d_hidden, 3 * d_hidden).init(device),
            hidden_size:  d_hidden,
        }
    }

    /// x: [batch, seq, d_input], mask: [batch, seq, 1] (1.0 on real steps)
    /// → per-step states [batch, seq, hidden], final state [batch, hidden]
    pub fn forward(&self, x: Tensor<B, 3>, mask: Tensor<B, 3>, reverse: bool) -> (Tensor<B, 3>, Tensor<B, 2>) {
        let [batch, seq, _] = x.dims();
        let hs = self.hidden_size;

        // Input projections for every step at once.
        let projected = self.input_gates.forward(x); // [batch, seq, 3*hidden]
        let mut h = Tensor::<B, 2>::zeros([batch, hs], &projected.device());
        let mut outputs: Vec<Tensor<B, 2>> = Vec::with_capacity(seq);

        let steps: Vec<usize> = if reverse { (0..seq).rev().collect() } else { (0..seq).collect() };
        for t in steps {
            let x_t = projected.clone().narrow(1, t, 1).reshape([batch, 3 * hs]);
            let m_t = mask.clone().narrow(1, t, 1).reshape([batch, 1]).expand([batch, hs]);
            let candidate = self.step(x_t, h.clone());
            // Rows past their length keep their state.
            h = h.clone() + m_t * (candidate - h);
            outputs.push(h.clone());
        }
        if reverse {
            outputs.reverse();
        }

        (Tensor::stack::<3>(outputs, 1), h)
    }

    fn step(&self, x_t: Tensor<B, 2>, h: Tensor<B, 2>) -> Tensor<B, 2> {
        let hs = self.hidden_size;
        let h_proj = self.hidden_gates.forward(h.clone());

        let r = activation::sigmoid(x_t.clone().narrow(1, 0, hs) + h_proj.clone().narrow(1, 0, hs));
        let z = activation::sigmoid(x_t.clone().narrow(1, hs, hs) + h_proj.clone().narrow(1, hs, hs));
        let n = activation::tanh(x_t.narrow(1, 2 * hs, hs) + r * h_proj.narrow(1, 2 * hs, hs));

        // h' = (1 - z) * n + z * h
        n.clone() + z * (h - n)
    }
}

// ─── Bidirectional layer ──────────────────────────────────────────────────────
#[derive(Module, Debug)]
pub struct BiGruLayer<B: Backend> {
    pub forward_cell:  GruCell<B>,
    pub backward_cell: GruCell<B>,
}

impl<B: Backend> BiGruLayer<B> {
    /// Concatenated [forward | reverse] outputs and the reverse
    /// direction's final state.
    pub fn forward(&self, x: Tensor<B, 3>, mask: Tensor<B, 3>) -> (Tensor<B, 3>, Tensor<B, 2>) {
        let (fwd_out, _) = self.forward_cell.forward(x.clone(), mask.clone(), false);
        let (bwd_out, bwd_h) = self.backward_cell.forward(x, mask, true);
        (Tensor::cat(vec![fwd_out, bwd_out], 2), bwd_h)
    }
}

// ─── Classifier ───────────────────────────────────────────────────────────────
#[derive(Module, Debug)]
pub struct RnnClassifier<B: Backend> {
    pub embedding:   Embedding<B>,
    pub layers:      Vec<BiGruLayer<B>>,
    pub fc:          Linear<B>,
    pub input_size:  usize,
    pub hidden_size: usize,
    pub output_size: usize,
    pub n_layers:    usize,
}

impl<B: Backend> RnnClassifier<B> {
    /// The architecture this network was built with.
    pub fn config(&self) -> RnnClassifierConfig {
        RnnClassifierConfig::new(self.input_size, self.hidden_size, self.output_size, self.n_layers)
    }

    /// inputs: [batch, pad] codes, lengths: [batch] → logits [batch, classes]
    pub fn forward(&self, inputs: Tensor<B, 2, Int>, lengths: Tensor<B, 1, Int>) -> Tensor<B, 2> {
        let [batch_size, seq_len] = inputs.dims();
        let device = inputs.device();

        let positions = Tensor::<B, 1, Int>::arange(0..seq_len as i64, &device)
            .reshape([1, seq_len])
            .expand([batch_size, seq_len]);
        let mask = positions
            .lower(lengths.reshape([batch_size, 1]).expand([batch_size, seq_len]))
            .float()
            .reshape([batch_size, seq_len, 1]);

        let mut x = self.embedding.forward(inputs); // [batch, pad, hidden]
        let mut hidden = Tensor::<B, 2>::zeros([batch_size, self.hidden_size], &device);
        for layer in &self.layers {
            let (out, h) = layer.forward(x, mask.clone());
            x = out;
            hidden = h;
        }

        self.fc.forward(hidden)
    }

    /// Cross-entropy loss against class indices, plus the logits.
    pub fn forward_loss(
        &self,
        inputs:  Tensor<B, 2, Int>,
        lengths: Tensor<B, 1, Int>,
        labels:  Tensor<B, 1, Int>,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let logits = self.forward(inputs, lengths);
        let ce = CrossEntropyLossConfig::new().init(&logits.device());
        let loss = ce.forward(logits.clone(), labels);
        (loss, logits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::batcher::DgaBatcher;
    use crate::data::vectorizer::CharVectorizer;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn small_model() -> RnnClassifier<TestBackend> {
        RnnClassifierConfig::new(128, 8, 2, 2).init(&Default::default())
    }

    #[test]
    fn test_forward_shape() {
        let model = small_model();
        let batcher = DgaBatcher::<TestBackend>::new(Default::default(), 12);
        let v = CharVectorizer::default();
        let codes = [v.encode("nvidia.com"), v.encode("xj3f9sd.biz"), v.encode("a.io")];
        let (inputs, lengths) = batcher.sequences(codes.iter().map(Vec::as_slice));
        assert_eq!(model.forward(inputs, lengths).dims(), [3, 2]);
    }

    #[test]
    fn test_logits_ignore_pad_width() {
        let model = small_model();
        let v = CharVectorizer::default();
        let codes = [v.encode("nvidia.com"), v.encode("xj3f9sd.biz")];

        let narrow = DgaBatcher::<TestBackend>::new(Default::default(), 12);
        let wide   = DgaBatcher::<TestBackend>::new(Default::default(), 20);
        let (a_in, a_len) = narrow.sequences(codes.iter().map(Vec::as_slice));
        let (b_in, b_len) = wide.sequences(codes.iter().map(Vec::as_slice));

        let a: Vec<f32> = model.forward(a_in, a_len).into_data().iter::<f32>().collect();
        let b: Vec<f32> = model.forward(b_in, b_len).into_data().iter::<f32>().collect();
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-5, "{x} vs {y}");
        }
    }

    #[test]
    fn test_config_round_trip() {
        let cfg = small_model().config();
        assert_eq!((cfg.input_size, cfg.hidden_size, cfg.output_size, cfg.n_layers), (128, 8, 2, 2));
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        assert!(RnnClassifierConfig::new(128, 0, 2, 1).validate().is_err());
        assert!(RnnClassifierConfig::new(128, 8, 1, 1).validate().is_err());
        assert!(RnnClassifierConfig::new(128, 8, 2, 0).validate().is_err());
        assert!(RnnClassifierConfig::new(128, 100, 2, 3).validate().is_ok());
    }

    #[test]
    fn test_loss_is_finite() {
        let model = small_model();
        let batcher = DgaBatcher::<TestBackend>::new(Default::default(), 12);
        let v = CharVectorizer::default();
        let samples = vec![
            crate::data::dataset::DgaSample { domain: "a.io".into(), codes: v.encode("a.io"), len: 4, label: 1 },
        ];
        let batch = batcher.batch(&samples).unwrap();
        let (loss, _) = model.forward_loss(batch.inputs, batch.lengths, batch.labels);
        let value: f32 = loss.into_scalar().elem();
        assert!(value.is_finite());
    }
}

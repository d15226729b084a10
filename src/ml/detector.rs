// ============================================================
// Layer 5 — DGA Detector
// ============================================================
// Owns the classifier and exposes the full lifecycle:
//
//   uninitialized ──init_model──────▶ ready
//   any           ──load_checkpoint─▶ ready (trained weights)
//   ready         ──train_model─────▶ trained
//
// predict / evaluate_model / save_checkpoint need a model and
// return ModelNotInitialized otherwise.

use std::path::Path;

use burn::{module::AutodiffModule, prelude::*, tensor::backend::AutodiffBackend};

use crate::data::{
    dataset::DgaDataset,
    splitter::split_train_test,
    vectorizer::{CharVectorizer, ASCII_VOCAB},
};
use crate::domain::record::{DomainRecord, Prediction};
use crate::domain::traits::Detector;
use crate::error::{DgaError, DgaResult};
use crate::infra::checkpoint;
use crate::ml::{
    evaluator::evaluate,
    inferencer::infer,
    model::{RnnClassifier, RnnClassifierConfig},
    trainer::{train_loop, TrainParams, TrainingReport},
};

pub const DEFAULT_CHAR_VOCAB:    usize = ASCII_VOCAB;
pub const DEFAULT_HIDDEN_SIZE:   usize = 100;
pub const DEFAULT_N_DOMAIN_TYPE: usize = 2;
pub const DEFAULT_N_LAYERS:      usize = 3;
pub const DEFAULT_TRUNCATE:      usize = 100;

/// Architecture used when the caller does not pick one.
pub fn default_model_config() -> RnnClassifierConfig {
    RnnClassifierConfig::new(
        DEFAULT_CHAR_VOCAB,
        DEFAULT_HIDDEN_SIZE,
        DEFAULT_N_DOMAIN_TYPE,
        DEFAULT_N_LAYERS,
    )
}

pub struct DgaDetector<B: AutodiffBackend> {
    model:  Option<RnnClassifier<B>>,
    device: B::Device,
}

impl<B: AutodiffBackend> DgaDetector<B> {
    pub fn new(device: B::Device) -> Self {
        tracing::debug!("Detector device: {:?}", device);
        Self { model: None, device }
    }

    pub fn device(&self) -> &B::Device {
        &self.device
    }

    pub fn is_initialized(&self) -> bool {
        self.model.is_some()
    }

    /// Build a fresh network. A no-op when a model is already installed.
    pub fn init_model(&mut self, config: &RnnClassifierConfig) -> DgaResult<()> {
        if self.model.is_some() {
            tracing::debug!("Model already initialized; keeping existing weights");
            return Ok(());
        }
        config.validate()?;
        let model = config.init::<B>(&self.device);
        self.leverage_model(model);
        Ok(())
    }

    /// Split, vectorize and train on `domains` / `labels`, evaluating
    /// on the held-out partition after every epoch.
    pub fn train_model<S: AsRef<str>>(
        &mut self,
        domains: &[S],
        labels:  &[usize],
        params:  &TrainParams,
    ) -> DgaResult<TrainingReport> {
        tracing::info!("Initiating model training ...");
        tracing::info!("Truncate domains to width: {}", params.truncate);

        params.validate()?;
        if domains.len() != labels.len() {
            return Err(DgaError::LengthMismatch { domains: domains.len(), labels: labels.len() });
        }
        let (vocab, n_classes) = {
            let model = self.model()?;
            (model.input_size, model.output_size)
        };
        check_labels(labels.iter().copied(), n_classes)?;

        let records: Vec<DomainRecord> = domains
            .iter()
            .zip(labels)
            .map(|(d, &l)| DomainRecord::new(d.as_ref(), l))
            .collect();
        let (train, test) = split_train_test(records, params.train_size, params.seed);
        let vectorizer = CharVectorizer::new(vocab);
        let train_ds = DgaDataset::from_records(&train, params.truncate, &vectorizer);
        let test_ds  = DgaDataset::from_records(&test, params.truncate, &vectorizer);
        tracing::info!("Split: {} train, {} test", train_ds.sample_count(), test_ds.sample_count());

        let model = self.model.take().ok_or(DgaError::ModelNotInitialized)?;
        let trained = train_loop(model.clone(), &train_ds, &test_ds, params, &self.device);
        let (model, report) = match trained {
            Ok(done) => done,
            Err(e) => {
                self.model = Some(model);
                return Err(e);
            }
        };
        self.model = Some(model);

        tracing::info!("Training complete");
        Ok(report)
    }

    /// Classify `domains`, keeping at most `truncate` leading characters of
    /// each. Output is aligned one-to-one with the input.
    pub fn predict<S: AsRef<str>>(
        &self,
        domains:     &[S],
        probability: bool,
        truncate:    usize,
    ) -> DgaResult<Prediction> {
        tracing::debug!("Initiating model inference ...");
        tracing::debug!("Truncate domains to width: {}", truncate);

        let model = self.model()?.valid();
        let vectorizer = CharVectorizer::new(model.input_size);
        let codes: Vec<Vec<u32>> = domains
            .iter()
            .map(|d| vectorizer.vectorize(d.as_ref(), truncate))
            .collect();

        infer(&model, &codes, probability, truncate.max(1), &self.device)
    }

    /// Accuracy of the active model on a prepared dataset.
    pub fn evaluate_model(
        &self,
        dataset:     &DgaDataset,
        batch_size:  usize,
        pad_max_len: usize,
    ) -> DgaResult<f64> {
        if batch_size == 0 || pad_max_len == 0 {
            return Err(DgaError::invalid_config("batch_size and pad_max_len must be positive"));
        }
        let model = self.model()?;
        check_labels(dataset.samples().iter().map(|s| s.label), model.output_size)?;
        Ok(evaluate(&model.valid(), dataset, batch_size, pad_max_len, &self.device)?.accuracy())
    }

    /// Vectorize labelled records with the active model's vocabulary.
    /// Labels outside the model's class range are rejected.
    pub fn dataset(&self, records: &[DomainRecord], truncate: usize) -> DgaResult<DgaDataset> {
        let model = self.model()?;
        check_labels(records.iter().map(|r| r.label), model.output_size)?;
        let vectorizer = CharVectorizer::new(model.input_size);
        Ok(DgaDataset::from_records(records, truncate, &vectorizer))
    }
}

fn check_labels(labels: impl IntoIterator<Item = usize>, n_classes: usize) -> DgaResult<()> {
    match labels.into_iter().find(|&l| l >= n_classes) {
        Some(label) => Err(DgaError::LabelOutOfRange { label, n_classes }),
        None => Ok(()),
    }
}

impl<B: AutodiffBackend> Default for DgaDetector<B> {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl<B: AutodiffBackend> Detector for DgaDetector<B> {
    type Model = RnnClassifier<B>;

    fn leverage_model(&mut self, model: RnnClassifier<B>) {
        tracing::info!(
            "Model ready: {} layers, hidden={}, {} parameters",
            model.n_layers, model.hidden_size, model.num_params(),
        );
        self.model = Some(model);
    }

    fn model(&self) -> DgaResult<&RnnClassifier<B>> {
        self.model.as_ref().ok_or(DgaError::ModelNotInitialized)
    }

    fn save_checkpoint(&self, path: &Path) -> DgaResult<()> {
        checkpoint::save_checkpoint(self.model()?, path)?;
        tracing::info!("Checkpoint saved to '{}'", path.display());
        Ok(())
    }

    fn load_checkpoint(&mut self, path: &Path) -> DgaResult<()> {
        let model = checkpoint::load_checkpoint::<B>(path, &self.device)?;
        self.leverage_model(model);
        Ok(())
    }
}

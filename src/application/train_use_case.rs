// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates a full training run:
//
//   Step 1: Load labelled domains       (Layer 4 - data)
//   Step 2: Build or resume the model   (Layer 5 - ml)
//   Step 3: Train + per-epoch eval      (Layer 5 - ml)
//   Step 4: Save checkpoint             (Layer 6 - infra)
//   Step 5: Write metrics and config    (Layer 6 - infra)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data::loader::CsvDomainLoader;
use crate::domain::record::DomainRecord;
use crate::domain::traits::{Detector, DomainSource};
use crate::infra::{config_store::save_config, metrics::MetricsLogger};
use crate::ml::{
    detector::{self, DgaDetector},
    model::RnnClassifierConfig,
    trainer::{TrainParams, TrainingReport},
    TrainBackend,
};

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything a training run needs. Serialisable so it can be
// written beside the metrics for provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:     PathBuf,
    pub checkpoint:    PathBuf,
    pub metrics_dir:   PathBuf,
    /// Continue from this checkpoint instead of a fresh model
    pub resume:        Option<PathBuf>,
    pub char_vocab:    usize,
    pub hidden_size:   usize,
    pub n_domain_type: usize,
    pub n_layers:      usize,
    pub batch_size:    usize,
    pub epochs:        usize,
    pub train_size:    f64,
    pub truncate:      usize,
    pub pad_max_len:   usize,
    pub lr:            f64,
    pub seed:          Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        let params = TrainParams::default();
        let model  = detector::default_model_config();
        Self {
            data_path:     PathBuf::from("data/dga_domains.csv"),
            checkpoint:    PathBuf::from("checkpoints/dga_detector.mpk"),
            metrics_dir:   PathBuf::from("checkpoints"),
            resume:        None,
            char_vocab:    model.input_size,
            hidden_size:   model.hidden_size,
            n_domain_type: model.output_size,
            n_layers:      model.n_layers,
            batch_size:    params.batch_size,
            epochs:        params.epochs,
            train_size:    params.train_size,
            truncate:      params.truncate,
            pad_max_len:   params.pad_max_len,
            lr:            params.learning_rate,
            seed:          params.seed,
        }
    }
}

impl TrainConfig {
    pub fn model_config(&self) -> RnnClassifierConfig {
        RnnClassifierConfig::new(self.char_vocab, self.hidden_size, self.n_domain_type, self.n_layers)
    }

    pub fn train_params(&self) -> TrainParams {
        TrainParams {
            batch_size:    self.batch_size,
            epochs:        self.epochs,
            train_size:    self.train_size,
            truncate:      self.truncate,
            pad_max_len:   self.pad_max_len,
            learning_rate: self.lr,
            seed:          self.seed,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<TrainingReport> {
        let cfg = &self.config;

        // ── Step 1: Load labelled domains ─────────────────────────────────────
        tracing::info!("Loading labelled domains from '{}'", cfg.data_path.display());
        let records = CsvDomainLoader::new(&cfg.data_path)
            .load_all()
            .with_context(|| format!("Cannot load training data '{}'", cfg.data_path.display()))?;
        anyhow::ensure!(!records.is_empty(), "no labelled domains in '{}'", cfg.data_path.display());

        // ── Step 2: Build or resume the model ─────────────────────────────────
        let mut detector = DgaDetector::<TrainBackend>::default();
        match &cfg.resume {
            Some(path) => {
                tracing::info!("Resuming from checkpoint '{}'", path.display());
                detector.load_checkpoint(path)?;
            }
            None => detector.init_model(&cfg.model_config())?,
        }

        // ── Step 3: Train ─────────────────────────────────────────────────────
        let (domains, labels) = DomainRecord::unzip(&records);
        let report = detector.train_model(&domains, &labels, &cfg.train_params())?;

        // ── Step 4: Save checkpoint ───────────────────────────────────────────
        detector.save_checkpoint(&cfg.checkpoint)?;

        // ── Step 5: Metrics and config ────────────────────────────────────────
        let logger = MetricsLogger::new(&cfg.metrics_dir)?;
        for m in &report.epochs {
            logger.log(m)?;
        }
        save_config(cfg, &cfg.metrics_dir)?;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{evaluate_use_case::EvaluateUseCase, predict_use_case::PredictUseCase};
    use crate::domain::record::Prediction;
    use std::fs;
    use tempfile::TempDir;

    fn tiny_config(dir: &TempDir) -> TrainConfig {
        let data_path = dir.path().join("domains.csv");
        fs::write(
            &data_path,
            "domain,type\nnvidia.com,0\nxj3f9sd.biz,1\ngoogle.com,0\nqwpozmxn.info,1\n",
        ).unwrap();
        TrainConfig {
            data_path,
            checkpoint:  dir.path().join("model.ckpt"),
            metrics_dir: dir.path().join("run"),
            hidden_size: 4,
            n_layers:    1,
            batch_size:  2,
            epochs:      2,
            train_size:  0.5,
            truncate:    16,
            pad_max_len: 16,
            seed:        Some(1),
            ..TrainConfig::default()
        }
    }

    #[test]
    fn test_end_to_end_train_predict_evaluate() {
        let dir = TempDir::new().unwrap();
        let cfg = tiny_config(&dir);

        let report = TrainUseCase::new(cfg.clone()).execute().unwrap();
        assert_eq!(report.epochs.len(), 2);
        assert!(cfg.checkpoint.exists());

        let metrics = fs::read_to_string(cfg.metrics_dir.join("metrics.csv")).unwrap();
        assert_eq!(metrics.lines().count(), 3);
        let json = fs::read_to_string(cfg.metrics_dir.join("train_config.json")).unwrap();
        let saved: TrainConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(saved.hidden_size, 4);

        let predictor = PredictUseCase::new(&cfg.checkpoint).unwrap();
        let out = predictor.classify(&["nvidia.com".to_string(), "xj3f9sd.biz".to_string()], true, 16).unwrap();
        assert!(matches!(out, Prediction::Probabilities(ref p) if p.len() == 2));

        let accuracy = EvaluateUseCase::new(&cfg.checkpoint).unwrap()
            .evaluate(&cfg.data_path, 2, 16, 16)
            .unwrap();
        assert!((0.0..=1.0).contains(&accuracy));
    }

    #[test]
    fn test_empty_dataset_is_rejected() {
        let dir = TempDir::new().unwrap();
        let mut cfg = tiny_config(&dir);
        fs::write(&cfg.data_path, "domain,type\n").unwrap();
        cfg.epochs = 1;
        assert!(TrainUseCase::new(cfg).execute().is_err());
    }
}

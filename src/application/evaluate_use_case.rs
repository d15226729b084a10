// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Accuracy of a saved checkpoint on a labelled CSV file.

use anyhow::{Context, Result};
use std::path::Path;

use crate::data::loader::CsvDomainLoader;
use crate::domain::traits::{Detector, DomainSource};
use crate::ml::{detector::DgaDetector, TrainBackend};

pub struct EvaluateUseCase {
    detector: DgaDetector<TrainBackend>,
}

impl EvaluateUseCase {
    pub fn new(checkpoint: &Path) -> Result<Self> {
        let mut detector = DgaDetector::<TrainBackend>::default();
        detector
            .load_checkpoint(checkpoint)
            .with_context(|| format!("Cannot load checkpoint '{}'", checkpoint.display()))?;
        Ok(Self { detector })
    }

    pub fn evaluate(
        &self,
        data:        &Path,
        batch_size:  usize,
        truncate:    usize,
        pad_max_len: usize,
    ) -> Result<f64> {
        let records = CsvDomainLoader::new(data)
            .load_all()
            .with_context(|| format!("Cannot load evaluation data '{}'", data.display()))?;
        tracing::info!("Evaluating on {} labelled domains", records.len());

        let dataset = self.detector.dataset(&records, truncate)?;
        Ok(self.detector.evaluate_model(&dataset, batch_size, pad_max_len)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::RnnClassifierConfig;
    use std::fs;
    use tempfile::TempDir;

    fn saved_checkpoint(dir: &TempDir) -> std::path::PathBuf {
        let path = dir.path().join("dga.mpk");
        let mut detector = DgaDetector::<TrainBackend>::default();
        detector.init_model(&RnnClassifierConfig::new(128, 4, 2, 1)).unwrap();
        detector.save_checkpoint(&path).unwrap();
        path
    }

    #[test]
    fn test_out_of_range_label_fails_evaluation() {
        let dir = TempDir::new().unwrap();
        let checkpoint = saved_checkpoint(&dir);
        let data = dir.path().join("eval.csv");
        fs::write(&data, "domain,type\nnvidia.com,0\nxj3f9sd.biz,4294967296\n").unwrap();

        let use_case = EvaluateUseCase::new(&checkpoint).unwrap();
        assert!(use_case.evaluate(&data, 2, 16, 16).is_err());
    }

    #[test]
    fn test_in_range_labels_give_unit_interval_accuracy() {
        let dir = TempDir::new().unwrap();
        let checkpoint = saved_checkpoint(&dir);
        let data = dir.path().join("eval.csv");
        fs::write(&data, "domain,type\nnvidia.com,0\nxj3f9sd.biz,1\n").unwrap();

        let accuracy = EvaluateUseCase::new(&checkpoint).unwrap().evaluate(&data, 2, 16, 16).unwrap();
        assert!((0.0..=1.0).contains(&accuracy));
    }
}

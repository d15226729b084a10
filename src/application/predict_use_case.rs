// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Loads a trained checkpoint once, then classifies domain
// names on demand. Output order always follows input order.

use anyhow::{Context, Result};
use std::path::Path;

use crate::data::{loader::load_domain_list, preprocessor::Preprocessor};
use crate::domain::record::Prediction;
use crate::domain::traits::Detector;
use crate::ml::{detector::DgaDetector, TrainBackend};

pub struct PredictUseCase {
    detector: DgaDetector<TrainBackend>,
}

impl PredictUseCase {
    /// Restore the detector from `checkpoint`.
    pub fn new(checkpoint: &Path) -> Result<Self> {
        let mut detector = DgaDetector::<TrainBackend>::default();
        detector
            .load_checkpoint(checkpoint)
            .with_context(|| format!("Cannot load checkpoint '{}'", checkpoint.display()))?;
        Ok(Self { detector })
    }

    pub fn classify(&self, domains: &[String], probability: bool, truncate: usize) -> Result<Prediction> {
        tracing::info!("Classifying {} domains", domains.len());
        Ok(self.detector.predict(domains, probability, truncate)?)
    }

    /// Gather domains from repeated `--domain` values followed by the
    /// lines of an optional input file, cleaned the same way.
    pub fn collect_domains(inline: &[String], input: Option<&Path>) -> Result<Vec<String>> {
        let prep = Preprocessor::new();
        let mut domains: Vec<String> = inline.iter().map(|d| prep.clean(d)).collect();
        if let Some(path) = input {
            let listed = load_domain_list(path)
                .with_context(|| format!("Cannot read domain list '{}'", path.display()))?;
            domains.extend(listed);
        }
        Ok(domains)
    }
}

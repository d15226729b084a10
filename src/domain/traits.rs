// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits rather
// than concrete types:
//   - CsvDomainLoader implements DomainSource
//   - DgaDetector implements Detector
//
// Detector is the model-holder capability: install a network,
// hand it out, and persist it as a checkpoint.

use std::path::Path;

use crate::domain::record::DomainRecord;
use crate::error::DgaResult;

// ─── DomainSource ─────────────────────────────────────────────────────────────
/// Any component that can produce labelled domains.
pub trait DomainSource {
    /// Load all available records from this source.
    fn load_all(&self) -> DgaResult<Vec<DomainRecord>>;
}

// ─── Detector ─────────────────────────────────────────────────────────────────
/// Any component that owns a trainable model and can checkpoint it.
pub trait Detector {
    /// The network type held by this detector
    type Model;

    /// Install `model` as the active model, replacing any previous one.
    fn leverage_model(&mut self, model: Self::Model);

    /// Borrow the active model.
    /// Fails with `ModelNotInitialized` if none has been installed.
    fn model(&self) -> DgaResult<&Self::Model>;

    /// Persist architecture and weights of the active model to `path`.
    fn save_checkpoint(&self, path: &Path) -> DgaResult<()>;

    /// Rebuild a model from the checkpoint at `path` and install it.
    fn load_checkpoint(&mut self, path: &Path) -> DgaResult<()>;
}

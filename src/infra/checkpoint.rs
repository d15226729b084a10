// ============================================================
// Layer 6 — Checkpoint Store
// ============================================================
// A checkpoint is ONE record holding both the trained weights
// and the four architecture numbers needed to rebuild the
// network before those weights can be loaded:
//
//   state_dict   — every learned parameter (RnnClassifierRecord)
//   input_size   — character vocabulary size
//   hidden_size  — GRU hidden width
//   n_layers     — stacked GRU layers
//   output_size  — number of domain classes
//
// Records are encoded with Burn's NamedMpkBytesRecorder at full
// precision, so save → load reproduces predictions exactly. The
// bytes are written to exactly the path given; no extension is
// added or replaced.

use std::path::Path;

use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkBytesRecorder, Record, Recorder},
};

use crate::error::{DgaError, DgaResult};
use crate::ml::model::{RnnClassifier, RnnClassifierConfig, RnnClassifierRecord};

type CheckpointRecorder = NamedMpkBytesRecorder<FullPrecisionSettings>;

#[derive(Record)]
pub struct DgaCheckpointRecord<B: Backend> {
    pub state_dict:  RnnClassifierRecord<B>,
    pub input_size:  usize,
    pub hidden_size: usize,
    pub n_layers:    usize,
    pub output_size: usize,
}

/// Extract architecture and weights from `model` and write them to `path`.
pub fn save_checkpoint<B: Backend>(model: &RnnClassifier<B>, path: &Path) -> DgaResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let record = DgaCheckpointRecord {
        input_size:  model.input_size,
        hidden_size: model.hidden_size,
        n_layers:    model.n_layers,
        output_size: model.output_size,
        state_dict:  model.clone().into_record(),
    };

    let bytes = CheckpointRecorder::default()
        .record(record, ())
        .map_err(|e| DgaError::Checkpoint(format!("cannot encode '{}': {e}", path.display())))?;
    std::fs::write(path, bytes)
        .map_err(|e| DgaError::Checkpoint(format!("cannot save '{}': {e}", path.display())))?;

    tracing::debug!("Saved checkpoint to '{}'", path.display());
    Ok(())
}

/// Read the record at `path`, rebuild the network from its stored
/// architecture, then load the trained weights into it.
pub fn load_checkpoint<B: Backend>(path: &Path, device: &B::Device) -> DgaResult<RnnClassifier<B>> {
    let bytes = std::fs::read(path)
        .map_err(|e| DgaError::Checkpoint(format!("cannot read '{}': {e}", path.display())))?;
    let record: DgaCheckpointRecord<B> = CheckpointRecorder::default()
        .load(bytes, device)
        .map_err(|e| DgaError::Checkpoint(format!("cannot load '{}': {e}", path.display())))?;

    let config = RnnClassifierConfig::new(
        record.input_size,
        record.hidden_size,
        record.output_size,
        record.n_layers,
    );
    config.validate()?;

    tracing::info!(
        "Rebuilding model from checkpoint: vocab={}, hidden={}, layers={}, classes={}",
        config.input_size, config.hidden_size, config.n_layers, config.output_size,
    );

    Ok(config.init::<B>(device).load_record(record.state_dict))
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use tempfile::TempDir;

    type TestBackend = NdArray;

    #[test]
    fn test_round_trip_preserves_architecture() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dga.mpk");
        let device = Default::default();
        let model = RnnClassifierConfig::new(64, 6, 3, 2).init::<TestBackend>(&device);

        save_checkpoint(&model, &path).unwrap();
        let loaded = load_checkpoint::<TestBackend>(&path, &device).unwrap();

        let cfg = loaded.config();
        assert_eq!((cfg.input_size, cfg.hidden_size, cfg.output_size, cfg.n_layers), (64, 6, 3, 2));
        assert_eq!(loaded.layers.len(), 2);
    }

    #[test]
    fn test_missing_checkpoint_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = load_checkpoint::<TestBackend>(&dir.path().join("absent.mpk"), &Default::default());
        assert!(matches!(result, Err(DgaError::Checkpoint(_))));
    }

    #[test]
    fn test_save_writes_exactly_the_given_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dga_detector.v2");
        let device = Default::default();
        let model = RnnClassifierConfig::new(128, 4, 2, 1).init::<TestBackend>(&device);

        save_checkpoint(&model, &path).unwrap();
        assert!(path.exists());
        assert!(!dir.path().join("dga_detector.mpk").exists());

        let loaded = load_checkpoint::<TestBackend>(&path, &device).unwrap();
        assert_eq!(loaded.hidden_size, 4);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("dga.mpk");
        let model = RnnClassifierConfig::new(128, 4, 2, 1).init::<TestBackend>(&Default::default());
        save_checkpoint(&model, &path).unwrap();
        assert!(path.exists());
    }
}

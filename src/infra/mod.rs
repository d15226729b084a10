// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Persistence shared by the other layers:
//
//   checkpoint.rs   — single-record model checkpoints
//                     (weights + architecture) via Burn's
//                     NamedMpkFileRecorder
//
//   metrics.rs      — per-epoch loss / accuracy CSV log
//
//   config_store.rs — training hyperparameters as JSON

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;

/// Training config persistence
pub mod config_store;

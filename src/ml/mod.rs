// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model, training and inference code lives here.
//
//   model.rs      — embedding → bidirectional GRU stack → linear head
//   trainer.rs    — epoch loop: forward, loss, backward, Adam step
//   evaluator.rs  — arg-max accuracy on a prepared dataset
//   inferencer.rs — eval-mode forward pass → probabilities or labels
//   detector.rs   — DgaDetector, the model holder tying it together
//
// Backend selection:
//   default  → NdArray on the CPU
//   `wgpu`   → Wgpu; its default device is the best adapter found
// Training wraps the backend in Autodiff; inference runs on the
// inner backend via `valid()`.

pub mod model;

pub mod trainer;

pub mod evaluator;

pub mod inferencer;

pub mod detector;

#[cfg(feature = "wgpu")]
pub type InferBackend = burn::backend::Wgpu;
#[cfg(not(feature = "wgpu"))]
pub type InferBackend = burn::backend::NdArray;

pub type TrainBackend = burn::backend::Autodiff<InferBackend>;

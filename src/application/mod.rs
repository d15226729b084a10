// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Each use case drives one CLI command end to end by calling
// into the data, ml and infra layers.
//
// Rules for this layer:
//   - No tensor code here
//   - No printing here (that's Layer 1)
//   - Only workflow coordination

// Load CSV → train → checkpoint, metrics, config
pub mod train_use_case;

// Checkpoint → probabilities or labels
pub mod predict_use_case;

// Checkpoint + labelled CSV → accuracy
pub mod evaluate_use_case;

// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits describing what the
// system works with: labelled domains, predictions and the
// detector capability.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits

// Labelled domain names, class indices and prediction output
pub mod record;

// Core abstractions (traits) that other layers implement
pub mod traits;

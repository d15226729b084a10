// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from raw domain files to device tensors.
//
//   CSV / domain list
//       │
//       ▼
//   loader            → reads lines, parses labels
//       │
//       ▼
//   Preprocessor      → trims whitespace, quotes, root dot
//       │
//       ▼
//   splitter          → shuffled train / test partitions
//       │
//       ▼
//   CharVectorizer    → truncation + character codes
//       │
//       ▼
//   DgaDataset        → implements Burn's Dataset trait
//       │
//       ▼
//   DgaBatcher        → zero-padded tensor batches

/// Reads labelled CSV files and plain domain lists
pub mod loader;

/// Cleans raw domain strings
pub mod preprocessor;

/// Truncation and character-code encoding
pub mod vectorizer;

/// Implements Burn's Dataset trait for DGA samples
pub mod dataset;

/// Builds padded input, length and label tensors
pub mod batcher;

/// Shuffles and splits data into train/test sets
pub mod splitter;

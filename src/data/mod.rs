// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between raw dialogue logs and integer-id files.
//
// The pipeline flows in this order:
//
//   dialogs/**/*.tsv
//       │
//       ▼
//   dialogue_filter   → deletes conversations with one speaker
//       │
//       ▼
//   reformatter       → merges turns into aligned .enc/.dec lines
//       │
//       ▼
//   splitter          → first 3/4 of the lines train, the rest test
//       │
//       ▼
//   vocab_builder     → most frequent tokens, reserved symbols first
//       │
//       ▼
//   encoder           → one line of space-separated ids per line
//
// Every step that writes a file is a no-op when that file
// already exists.
//
// Reference: Rust Book §12 (I/O), §13 (Iterators and Closures)

/// Line readers, dialogue file discovery and output helpers
pub mod loader;

/// Punctuation-aware word tokenizer and digit normalisation
pub mod tokenizer;

/// Frequency-ranked vocabulary files
pub mod vocab_builder;

/// Sentence → ids, and file → ids-file
pub mod encoder;

/// Removes single-speaker dialogue files
pub mod dialogue_filter;

/// Dialogue logs → paired encoder/decoder files
pub mod reformatter;

/// Splits aligned line files into train/test partitions
pub mod splitter;

/// Result of a step guarded by an existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The output was written by this call.
    Created,
    /// The output already existed; nothing was touched.
    Skipped,
}

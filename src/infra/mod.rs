// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Persistence concerns shared by the other layers:
//
//   vocab_store.rs: vocabulary files on disk
//                    One token per line; line index = id.
//                    Missing files surface as VocabError::NotFound.
//
//   manifest.rs:    the prepared.json record
//                    Lists the six files a preparation run produced
//                    so the training side can locate them.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow / thiserror)

/// Vocabulary file loading and writing
pub mod vocab_store;

/// JSON record of prepared artifacts
pub mod manifest;

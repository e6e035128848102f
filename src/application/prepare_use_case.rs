// ============================================================
// Layer 2 — PrepareUseCase
// ============================================================
// Runs the full preparation pipeline in order:
//
//   Step 1: Reformat dialogues into train/test .enc/.dec  (Layer 4)
//   Step 2: Build the encoder vocabulary from train.enc   (Layer 4)
//   Step 3: Build the decoder vocabulary from train.dec   (Layer 4)
//   Step 4: Tokenize train.enc, train.dec                 (Layer 4)
//   Step 5: Tokenize test.enc, test.dec                   (Layer 4)
//   Step 6: Save the manifest                             (Layer 6)
//
// Each step skips itself when its output already exists.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};

use crate::data::{
    encoder::data_to_token_ids,
    loader::with_suffix,
    reformatter::{create_my_dataset, DatasetPaths},
    vocab_builder::create_vocabulary,
};
use crate::domain::traits::Tokenize;
use crate::infra::manifest::{write_manifest, PreparedPaths};

// ─── Preparation Configuration ───────────────────────────────────────────────
// Everything a preparation run needs. Serialisable so a run can
// be described by a JSON file instead of command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrepareConfig {
    pub working_dir:      PathBuf,
    pub dialogs_dir:      PathBuf,
    pub train_enc:        PathBuf,
    pub train_dec:        PathBuf,
    pub test_enc:         PathBuf,
    pub test_dec:         PathBuf,
    pub enc_vocab_size:   usize,
    pub dec_vocab_size:   usize,
    pub normalize_digits: bool,
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            working_dir:      "working_dir".into(),
            dialogs_dir:      "data/dialogs".into(),
            train_enc:        "data/train.enc".into(),
            train_dec:        "data/train.dec".into(),
            test_enc:         "data/test.enc".into(),
            test_dec:         "data/test.dec".into(),
            enc_vocab_size:   20_000,
            dec_vocab_size:   20_000,
            normalize_digits: true,
        }
    }
}

impl PrepareConfig {
    /// Load a config from a JSON file; missing fields take their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Cannot read config '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Cannot parse config '{}'", path.display()))
    }

    /// The four reformatter outputs.
    pub fn dataset_paths(&self) -> DatasetPaths {
        DatasetPaths {
            train_enc: self.train_enc.clone(),
            train_dec: self.train_dec.clone(),
            test_enc:  self.test_enc.clone(),
            test_dec:  self.test_dec.clone(),
        }
    }

    /// `<working_dir>/vocab<N>.enc`
    pub fn enc_vocab_path(&self) -> PathBuf {
        self.working_dir.join(format!("vocab{}.enc", self.enc_vocab_size))
    }

    /// `<working_dir>/vocab<N>.dec`
    pub fn dec_vocab_path(&self) -> PathBuf {
        self.working_dir.join(format!("vocab{}.dec", self.dec_vocab_size))
    }

    /// Where the id files for this config land.
    pub fn prepared_paths(&self) -> PreparedPaths {
        let enc_ids = format!(".ids{}", self.enc_vocab_size);
        let dec_ids = format!(".ids{}", self.dec_vocab_size);
        PreparedPaths {
            enc_train_ids: with_suffix(&self.train_enc, &enc_ids),
            dec_train_ids: with_suffix(&self.train_dec, &dec_ids),
            enc_test_ids:  with_suffix(&self.test_enc, &enc_ids),
            dec_test_ids:  with_suffix(&self.test_dec, &dec_ids),
            enc_vocab:     self.enc_vocab_path(),
            dec_vocab:     self.dec_vocab_path(),
        }
    }
}

// ─── PrepareUseCase ───────────────────────────────────────────────────────────
pub struct PrepareUseCase {
    config: PrepareConfig,
}

impl PrepareUseCase {
    pub fn new(config: PrepareConfig) -> Self {
        Self { config }
    }

    /// Run every step with the default tokenizer.
    pub fn execute(&self) -> Result<PreparedPaths> {
        prepare_my_data(&self.config, None)
    }
}

/// Produce the six training artifacts described by `cfg`.
///
/// `tokenizer` replaces the default word tokenizer in every
/// vocabulary and tokenization pass.
pub fn prepare_my_data(cfg: &PrepareConfig, tokenizer: Option<&dyn Tokenize>) -> Result<PreparedPaths> {
    let norm = cfg.normalize_digits;

    // ── Step 1: dialogue logs → text pairs ───────────────────────────────────
    if let Some(summary) = create_my_dataset(&cfg.dialogs_dir, &cfg.dataset_paths())? {
        tracing::info!(
            "Reformatted {} files: {} exchanges ({} train / {} test)",
            summary.files,
            summary.exchanges,
            summary.train_lines,
            summary.test_lines
        );
    }

    let out = cfg.prepared_paths();

    // ── Steps 2-3: vocabularies ──────────────────────────────────────────────
    create_vocabulary(&out.enc_vocab, &cfg.train_enc, cfg.enc_vocab_size, tokenizer, norm)?;
    create_vocabulary(&out.dec_vocab, &cfg.train_dec, cfg.dec_vocab_size, tokenizer, norm)?;

    // ── Steps 4-5: token ids for train and test ──────────────────────────────
    let passes = [
        (&cfg.train_enc, &out.enc_train_ids, &out.enc_vocab),
        (&cfg.train_dec, &out.dec_train_ids, &out.dec_vocab),
        (&cfg.test_enc,  &out.enc_test_ids,  &out.enc_vocab),
        (&cfg.test_dec,  &out.dec_test_ids,  &out.dec_vocab),
    ];
    for (data, target, vocab) in passes {
        data_to_token_ids(data, target, vocab, tokenizer, norm)?;
    }

    // ── Step 6: manifest ─────────────────────────────────────────────────────
    write_manifest(&cfg.working_dir, &out)?;

    tracing::info!("Preparation complete");
    Ok(out)
}

// ============================================================
// Layer 6 — Preparation Manifest
// ============================================================
// After a full preparation run the six produced paths are saved
// as JSON next to the vocabularies:
//
//   working_dir/
//     vocab20000.enc
//     vocab20000.dec
//     prepared.json   ← { "enc_train_ids": "...", ... }
//
// The manifest is rewritten on every run; nothing reads it back
// to decide whether work is needed.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// File name of the manifest inside the working directory.
pub const MANIFEST_FILE: &str = "prepared.json";

/// The six artifacts handed to model training.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedPaths {
    pub enc_train_ids: PathBuf,
    pub dec_train_ids: PathBuf,
    pub enc_test_ids:  PathBuf,
    pub dec_test_ids:  PathBuf,
    pub enc_vocab:     PathBuf,
    pub dec_vocab:     PathBuf,
}

/// Save `paths` as pretty JSON into `working_dir`.
pub fn write_manifest(working_dir: &Path, paths: &PreparedPaths) -> Result<PathBuf> {
    fs::create_dir_all(working_dir)
        .with_context(|| format!("Cannot create '{}'", working_dir.display()))?;

    let path = working_dir.join(MANIFEST_FILE);
    fs::write(&path, serde_json::to_string_pretty(paths)?)
        .with_context(|| format!("Cannot write manifest '{}'", path.display()))?;

    tracing::debug!("Saved manifest to '{}'", path.display());
    Ok(path)
}

/// Load a previously written manifest.
pub fn read_manifest(working_dir: &Path) -> Result<PreparedPaths> {
    let path = working_dir.join(MANIFEST_FILE);
    let json = fs::read_to_string(&path)
        .with_context(|| format!("Cannot read manifest '{}'", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Cannot parse manifest '{}'", path.display()))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let paths = PreparedPaths {
            enc_train_ids: "data/train.enc.ids100".into(),
            dec_train_ids: "data/train.dec.ids100".into(),
            enc_test_ids:  "data/test.enc.ids100".into(),
            dec_test_ids:  "data/test.dec.ids100".into(),
            enc_vocab:     "w/vocab100.enc".into(),
            dec_vocab:     "w/vocab100.dec".into(),
        };

        let written = write_manifest(dir.path(), &paths).unwrap();
        assert_eq!(written, dir.path().join(MANIFEST_FILE));
        assert_eq!(read_manifest(dir.path()).unwrap(), paths);
    }
}

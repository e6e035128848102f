// ============================================================
// Layer 6 — Vocabulary Store
// ============================================================
// Reads and writes vocabulary files: one token per line, the
// zero-based line index is the token id.

use anyhow::{Context, Result};
use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::data::loader;
use crate::domain::vocabulary::Vocabulary;

/// Errors raised while loading a vocabulary file.
#[derive(Debug, Error)]
pub enum VocabError {
    /// The vocabulary file has not been created.
    #[error("vocabulary file '{}' not found", .path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("cannot read vocabulary file '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Load a vocabulary file: token → line index, plus the reverse list.
/// Trailing whitespace on each line is stripped.
pub fn initialize_vocabulary(path: &Path) -> Result<Vocabulary, VocabError> {
    if !path.exists() {
        return Err(VocabError::NotFound { path: path.to_path_buf() });
    }

    let io_err = |source| VocabError::Io { path: path.to_path_buf(), source };
    let file = std::fs::File::open(path).map_err(io_err)?;

    let tokens = loader::LossyLines::new(io::BufReader::new(file))
        .map(|line| line.map(|l| l.trim_end().to_string()))
        .collect::<io::Result<Vec<String>>>()
        .map_err(io_err)?;

    tracing::debug!("Loaded {} vocabulary entries from '{}'", tokens.len(), path.display());
    Ok(Vocabulary::from_tokens(tokens))
}

/// Write `tokens` one per line, in id order.
pub fn write_vocabulary<S: AsRef<str>>(path: &Path, tokens: &[S]) -> Result<()> {
    let mut out = loader::create_output(path)?;
    for token in tokens {
        writeln!(out, "{}", token.as_ref())
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
    }
    out.flush()
        .with_context(|| format!("Cannot flush '{}'", path.display()))?;
    Ok(())
}

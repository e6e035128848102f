// ============================================================
// Layer 4 — Vocabulary Builder
// ============================================================
// Builds a vocabulary file from a one-sentence-per-line corpus:
//
//   1. Tokenize every line (caller's tokenizer or the default)
//   2. Optionally map digits to '0' in each token
//   3. Count every token
//   4. Reserved symbols first, then tokens by descending count
//      (equal counts keep first-seen order)
//   5. Truncate to `max_vocabulary_size` and write one per line
//
// If the vocabulary file already exists nothing is recomputed.

use anyhow::Result;
use std::{collections::HashMap, path::Path};

use crate::data::{loader, tokenizer, StepOutcome};
use crate::domain::{traits::Tokenize, vocabulary::START_VOCAB};
use crate::infra::vocab_store;

/// Progress is logged once per this many lines.
pub const PROGRESS_EVERY: usize = 100_000;

/// Create `vocabulary_path` from `data_path` unless it already exists.
pub fn create_vocabulary(
    vocabulary_path:     &Path,
    data_path:           &Path,
    max_vocabulary_size: usize,
    tokenizer:           Option<&dyn Tokenize>,
    normalize_digits:    bool,
) -> Result<StepOutcome> {
    if vocabulary_path.exists() {
        tracing::info!("Vocabulary '{}' already exists", vocabulary_path.display());
        return Ok(StepOutcome::Skipped);
    }

    tracing::info!(
        "Creating vocabulary '{}' from data '{}'",
        vocabulary_path.display(),
        data_path.display()
    );

    let tokenizer = tokenizer::or_default(tokenizer);
    let counts    = count_tokens(data_path, tokenizer, normalize_digits)?;

    let mut vocab_list: Vec<&str> = START_VOCAB.to_vec();
    vocab_list.extend(counts.iter().map(|(token, _)| token.as_str()));
    vocab_list.truncate(max_vocabulary_size);

    vocab_store::write_vocabulary(vocabulary_path, &vocab_list)?;

    tracing::info!(
        "Vocabulary '{}' written: {} entries ({} distinct tokens seen)",
        vocabulary_path.display(),
        vocab_list.len(),
        counts.len()
    );
    Ok(StepOutcome::Created)
}

/// Count tokens in `data_path`, sorted by descending count.
/// Ties keep the order in which tokens were first seen.
fn count_tokens(
    data_path: &Path,
    tokenizer: &dyn Tokenize,
    normalize: bool,
) -> Result<Vec<(String, usize)>> {
    let mut index:  HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)>   = Vec::new();

    for (n, line) in loader::lines(data_path)?.enumerate() {
        let line = line?;
        if (n + 1) % PROGRESS_EVERY == 0 {
            tracing::info!("  processing line {}", n + 1);
        }

        for word in tokenizer::tokens_for(&line, tokenizer, normalize) {
            match index.get(&word) {
                Some(&i) => counts[i].1 += 1,
                // First sighting fixes the token's tie-break position
                None => {
                    index.insert(word.clone(), counts.len());
                    counts.push((word, 1));
                }
            }
        }
    }

    // sort_by is stable: equal counts stay in first-seen order
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(counts)
}

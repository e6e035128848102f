// ============================================================
// Layer 4 — Sentence and Corpus Encoder
// ============================================================
// sentence_to_token_ids:
//   "I have a dog" → ["I", "have", "a", "dog"] → [4, 9, 6, 12]
//   Tokens missing from the vocabulary become UNK_ID (3).
//
// data_to_token_ids:
//   Applies the sentence encoder to every line of a file and
//   writes one line of space-separated ids per input line.
//   Line count and order are preserved exactly, so an encoder
//   file and its decoder file stay aligned after encoding.
//
// Reference: Rust Book §13 (Iterators)

use anyhow::{Context, Result};
use std::{io::Write, path::Path};

use crate::data::{loader, tokenizer, vocab_builder::PROGRESS_EVERY, StepOutcome};
use crate::domain::{traits::Tokenize, vocabulary::Vocabulary};
use crate::infra::vocab_store;

/// Convert one sentence to token ids.
///
/// One id per token; digit normalisation (when enabled) is applied
/// to each token before lookup, exactly as when the vocabulary was built.
pub fn sentence_to_token_ids(
    sentence:         &str,
    vocabulary:       &Vocabulary,
    tokenizer:        Option<&dyn Tokenize>,
    normalize_digits: bool,
) -> Vec<u32> {
    let tokenizer = tokenizer::or_default(tokenizer);
    tokenizer::tokens_for(sentence, tokenizer, normalize_digits)
        .iter()
        .map(|token| vocabulary.id_or_unk(token))
        .collect()
}

/// Tokenize `data_path` into `target_path` using the vocabulary at
/// `vocabulary_path`. No-op if `target_path` already exists.
pub fn data_to_token_ids(
    data_path:        &Path,
    target_path:      &Path,
    vocabulary_path:  &Path,
    tokenizer:        Option<&dyn Tokenize>,
    normalize_digits: bool,
) -> Result<StepOutcome> {
    if target_path.exists() {
        tracing::info!("Token ids '{}' already exist", target_path.display());
        return Ok(StepOutcome::Skipped);
    }

    tracing::info!("Tokenizing data in '{}'", data_path.display());
    let vocab = vocab_store::initialize_vocabulary(vocabulary_path)?;

    let mut out   = loader::create_output(target_path)?;
    let mut count = 0usize;

    for line in loader::lines(data_path)? {
        let line = line?;
        count += 1;
        if count % PROGRESS_EVERY == 0 {
            tracing::info!("  tokenizing line {}", count);
        }

        let ids = sentence_to_token_ids(&line, &vocab, tokenizer, normalize_digits);
        writeln!(out, "{}", join_ids(&ids))
            .with_context(|| format!("Cannot write '{}'", target_path.display()))?;
    }

    out.flush()
        .with_context(|| format!("Cannot flush '{}'", target_path.display()))?;

    tracing::info!("Wrote {} lines of token ids to '{}'", count, target_path.display());
    Ok(StepOutcome::Created)
}

/// Render ids as space-separated decimals.
pub fn join_ids(ids: &[u32]) -> String {
    ids.iter().map(u32::to_string).collect::<Vec<_>>().join(" ")
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocab_builder::create_vocabulary;
    use crate::domain::vocabulary::UNK_ID;
    use std::fs;

    fn vocab_of(tokens: &[&str]) -> Vocabulary {
        let mut all = vec!["_PAD", "_GO", "_EOS", "_UNK"];
        all.extend_from_slice(tokens);
        Vocabulary::from_tokens(all.into_iter().map(String::from).collect())
    }

    #[test]
    fn test_sentence_to_ids() {
        let vocab = vocab_of(&["I", "have", "a", "dog", "."]);
        assert_eq!(
            sentence_to_token_ids("I have a dog.", &vocab, None, true),
            vec![4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn test_unknown_tokens_map_to_unk() {
        let vocab = vocab_of(&["dog"]);
        assert_eq!(
            sentence_to_token_ids("a dog barks", &vocab, None, true),
            vec![UNK_ID, 4, UNK_ID]
        );
    }

    #[test]
    fn test_digit_normalization_on_lookup() {
        let vocab = vocab_of(&["room", "00"]);
        let a = sentence_to_token_ids("room 42", &vocab, None, true);
        let b = sentence_to_token_ids("room 17", &vocab, None, true);
        assert_eq!(a, b);
        assert_eq!(a, vec![4, 5]);

        // Without normalisation the raw digits are unknown
        assert_eq!(sentence_to_token_ids("room 42", &vocab, None, false), vec![4, UNK_ID]);
    }

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&[4, 5, 3]), "4 5 3");
        assert_eq!(join_ids(&[]), "");
    }

    #[test]
    fn test_data_to_token_ids_preserves_lines() {
        let dir   = tempfile::tempdir().unwrap();
        let data  = dir.path().join("train.enc");
        let vocab = dir.path().join("vocab.enc");
        let ids   = dir.path().join("train.enc.ids100");
        fs::write(&data, "hello world\n\nhello there 9\n").unwrap();

        create_vocabulary(&vocab, &data, 100, None, true).unwrap();
        assert_eq!(data_to_token_ids(&data, &ids, &vocab, None, true).unwrap(), StepOutcome::Created);

        let out = fs::read_to_string(&ids).unwrap();
        // hello=4 world=5 there=6 0=7
        assert_eq!(out, "4 5\n\n4 6 7\n");
        assert_eq!(out.lines().count(), fs::read_to_string(&data).unwrap().lines().count());
    }

    #[test]
    fn test_data_to_token_ids_needs_vocabulary() {
        let dir  = tempfile::tempdir().unwrap();
        let data = dir.path().join("train.enc");
        fs::write(&data, "hello\n").unwrap();

        let err = data_to_token_ids(&data, &dir.path().join("out"), &dir.path().join("missing"), None, true)
            .unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_data_to_token_ids_second_run_is_noop() {
        let dir   = tempfile::tempdir().unwrap();
        let data  = dir.path().join("test.dec");
        let vocab = dir.path().join("vocab.dec");
        let ids   = dir.path().join("test.dec.ids");
        fs::write(&data, "a b\n").unwrap();
        create_vocabulary(&vocab, &data, 100, None, true).unwrap();

        data_to_token_ids(&data, &ids, &vocab, None, true).unwrap();
        let before = fs::read(&ids).unwrap();
        fs::write(&data, "b b b\nc\n").unwrap();
        assert_eq!(data_to_token_ids(&data, &ids, &vocab, None, true).unwrap(), StepOutcome::Skipped);
        assert_eq!(fs::read(&ids).unwrap(), before);
    }
}

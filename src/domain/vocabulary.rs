// ============================================================
// Layer 3 — Vocabulary Domain Type
// ============================================================
// An ordered list of distinct tokens. The position of a token
// in the list is its integer id, so the file
//
//   _PAD
//   _GO
//   _EOS
//   _UNK
//   dog
//   cat
//
// gives {"_PAD": 0, "_GO": 1, "_EOS": 2, "_UNK": 3, "dog": 4, "cat": 5}.
//
// The first four ids are reserved in every vocabulary and
// must match exactly for downstream models to interoperate.
//
// Reference: Rust Book §8 (HashMap), §5 (Structs)

use std::collections::HashMap;

/// Padding symbol.
pub const PAD: &str = "_PAD";
/// Sequence-start symbol.
pub const GO: &str = "_GO";
/// Sequence-end symbol.
pub const EOS: &str = "_EOS";
/// Out-of-vocabulary symbol.
pub const UNK: &str = "_UNK";

/// Reserved symbols, always written first and in this order.
pub const START_VOCAB: [&str; 4] = [PAD, GO, EOS, UNK];

pub const PAD_ID: u32 = 0;
pub const GO_ID: u32 = 1;
pub const EOS_ID: u32 = 2;
pub const UNK_ID: u32 = 3;

/// A loaded vocabulary: the forward token→id map and the
/// reverse id→token list. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    /// token → zero-based line index
    token_to_id: HashMap<String, u32>,

    /// line index → token, in file order
    id_to_token: Vec<String>,
}

impl Vocabulary {
    /// Build a vocabulary from tokens in id order.
    ///
    /// If a token occurs twice, the forward map keeps the later
    /// index, while the reverse list keeps both entries.
    pub fn from_tokens(tokens: Vec<String>) -> Self {
        let token_to_id = tokens
            .iter()
            .enumerate()
            .map(|(id, token)| (token.clone(), id as u32))
            .collect();

        Self {
            token_to_id,
            id_to_token: tokens,
        }
    }

    /// Id of `token`, if present.
    pub fn id(&self, token: &str) -> Option<u32> {
        self.token_to_id.get(token).copied()
    }

    /// Id of `token`, or `UNK_ID` when the token is out of vocabulary.
    pub fn id_or_unk(&self, token: &str) -> u32 {
        self.id(token).unwrap_or(UNK_ID)
    }

    /// Token stored at `id`, if the id is in range.
    pub fn token(&self, id: u32) -> Option<&str> {
        self.id_to_token.get(id as usize).map(String::as_str)
    }

    /// Map ids back to tokens; ids out of range render as `_UNK`.
    pub fn decode(&self, ids: &[u32]) -> Vec<&str> {
        ids.iter().map(|&id| self.token(id).unwrap_or(UNK)).collect()
    }

    /// Number of distinct tokens in the forward map.
    pub fn len(&self) -> usize {
        self.token_to_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.token_to_id.is_empty()
    }

    /// The reverse vocabulary, in id order.
    pub fn tokens(&self) -> &[String] {
        &self.id_to_token
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vocabulary {
        let mut tokens: Vec<String> = START_VOCAB.iter().map(|s| s.to_string()).collect();
        tokens.extend(["dog".to_string(), "cat".to_string()]);
        Vocabulary::from_tokens(tokens)
    }

    #[test]
    fn test_reserved_ids_are_fixed() {
        let vocab = sample();
        assert_eq!(vocab.id(PAD), Some(PAD_ID));
        assert_eq!(vocab.id(GO), Some(GO_ID));
        assert_eq!(vocab.id(EOS), Some(EOS_ID));
        assert_eq!(vocab.id(UNK), Some(UNK_ID));
    }

    #[test]
    fn test_unknown_token_maps_to_unk() {
        let vocab = sample();
        assert_eq!(vocab.id_or_unk("dog"), 4);
        assert_eq!(vocab.id_or_unk("horse"), UNK_ID);
    }

    #[test]
    fn test_decode_uses_reverse_list() {
        let vocab = sample();
        assert_eq!(vocab.decode(&[4, 5, 99]), vec!["dog", "cat", "_UNK"]);
    }

    #[test]
    fn test_duplicate_token_keeps_later_index() {
        let vocab = Vocabulary::from_tokens(vec!["a".into(), "b".into(), "a".into()]);
        assert_eq!(vocab.id("a"), Some(2));
        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.tokens().len(), 3);
    }
}

// ============================================================
// Layer 4 — Basic Word Tokenizer
// ============================================================
// Splits one line of text into word-level tokens:
//
//   1. Trim and split on whitespace
//   2. Split each fragment on the punctuation class
//        . , ! ? " ' : ; ) (
//      keeping every punctuation mark as its own token
//   3. Drop empty strings
//
// Example:
//   "I have a dog."  →  ["I", "have", "a", "dog", "."]
//   "(wow!)"         →  ["(", "wow", "!", ")"]
//
// Digit normalisation maps every ASCII digit to '0', so "42"
// and "17" both become "00" and share one vocabulary entry.
//
// Reference: regex crate documentation
//            Rust Book §8 (Strings in Rust)

use regex::Regex;
use std::{borrow::Cow, sync::LazyLock};

use crate::domain::traits::Tokenize;

/// Punctuation marks that become standalone tokens.
static WORD_SPLIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[.,!?"':;)(]"#).expect("word split pattern is valid"));

/// Decimal digits replaced during normalisation.
static DIGIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[0-9]").expect("digit pattern is valid"));

/// Split a sentence into whitespace- and punctuation-delimited tokens.
pub fn basic_tokenizer(sentence: &str) -> Vec<String> {
    let mut words = Vec::new();

    for fragment in sentence.split_ascii_whitespace() {
        let mut last = 0;
        for mark in WORD_SPLIT.find_iter(fragment) {
            if mark.start() > last {
                words.push(fragment[last..mark.start()].to_string());
            }
            words.push(mark.as_str().to_string());
            last = mark.end();
        }
        if last < fragment.len() {
            words.push(fragment[last..].to_string());
        }
    }

    words
}

/// Replace every decimal digit in `token` with `0`.
/// Borrows when the token has no digits.
pub fn normalize_digits(token: &str) -> Cow<'_, str> {
    DIGIT_RE.replace_all(token, "0")
}

/// The default tokenizer used when a caller supplies none.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicTokenizer;

impl Tokenize for BasicTokenizer {
    fn tokenize(&self, line: &str) -> Vec<String> {
        basic_tokenizer(line)
    }
}

/// Use the caller's tokenizer, or fall back to `BasicTokenizer`.
pub fn or_default(tokenizer: Option<&dyn Tokenize>) -> &dyn Tokenize {
    tokenizer.unwrap_or(&BasicTokenizer)
}

/// Tokenize `line` and, when `normalize` is set, normalise digits
/// in each token. Never merges or drops tokens.
pub fn tokens_for(line: &str, tokenizer: &dyn Tokenize, normalize: bool) -> Vec<String> {
    let tokens = tokenizer.tokenize(line);
    if !normalize {
        return tokens;
    }
    tokens
        .iter()
        .map(|t| normalize_digits(t).into_owned())
        .collect()
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_trailing_period() {
        assert_eq!(basic_tokenizer("I have a dog."), vec!["I", "have", "a", "dog", "."]);
    }

    #[test]
    fn test_keeps_every_punctuation_mark() {
        assert_eq!(
            basic_tokenizer("(wow!) \"ok\", it's: fine; really?"),
            vec![
                "(", "wow", "!", ")", "\"", "ok", "\"", ",", "it", "'", "s", ":", "fine", ";",
                "really", "?"
            ]
        );
    }

    #[test]
    fn test_discards_empty_strings() {
        assert!(basic_tokenizer("   \t  ").is_empty());
        assert_eq!(basic_tokenizer("..."), vec![".", ".", "."]);
        assert_eq!(basic_tokenizer("  spaced   out  "), vec!["spaced", "out"]);
    }

    #[test]
    fn test_splits_on_ascii_whitespace_only() {
        assert_eq!(basic_tokenizer("a\u{00A0}b"), vec!["a\u{00A0}b"]);
        assert_eq!(basic_tokenizer("a\tb\r\nc"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_normalize_digits() {
        assert_eq!(normalize_digits("42"), "00");
        assert_eq!(normalize_digits("17"), "00");
        assert_eq!(normalize_digits("room7b"), "room0b");
        assert!(matches!(normalize_digits("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_tokens_for_keeps_length() {
        let raw = tokens_for("port 8080 on 127.0.0.1", &BasicTokenizer, false);
        let norm = tokens_for("port 8080 on 127.0.0.1", &BasicTokenizer, true);
        assert_eq!(raw.len(), norm.len());
        assert_eq!(norm[1], "0000");
    }

    #[test]
    fn test_custom_tokenizer_closure() {
        let by_comma = |s: &str| -> Vec<String> { s.split(',').map(String::from).collect() };
        let tok = or_default(Some(&by_comma));
        assert_eq!(tok.tokenize("a,b"), vec!["a", "b"]);
        assert_eq!(or_default(None).tokenize("a,b"), vec!["a", ",", "b"]);
    }
}

// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// Every step that splits text into tokens (vocabulary building,
// sentence encoding, corpus tokenization) accepts an optional
// caller-supplied tokenizer. The steps only see this trait:
//
//   - BasicTokenizer implements Tokenize (the default)
//   - any closure `Fn(&str) -> Vec<String>` implements Tokenize
//
// Reference: Rust Book §10 (Traits: Defining Shared Behaviour)
//            Rust Book §13 (Closures)

// ─── Tokenize ─────────────────────────────────────────────────────────────────
/// Any component that can split one line of text into tokens.
pub trait Tokenize {
    /// Split `line` into tokens. Implementations must not return empty tokens.
    fn tokenize(&self, line: &str) -> Vec<String>;
}

/// Plain closures work as tokenizers, so callers can write
/// `Some(&|s: &str| s.split(',').map(String::from).collect())`.
impl<F> Tokenize for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn tokenize(&self, line: &str) -> Vec<String> {
        self(line)
    }
}

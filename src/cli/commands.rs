// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// One subcommand per pipeline step, plus `prepare` for the
// whole pipeline and `encode` to inspect a single sentence.
//
// clap's derive macros generate help text, error messages for
// missing args, and string → number / path conversion.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::prepare_use_case::PrepareConfig;

/// Top-level subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the full pipeline: dialogues → text pairs → vocabularies → ids
    Prepare(PrepareArgs),

    /// Reformat dialogue logs into train/test .enc/.dec files
    Reformat(ReformatArgs),

    /// Delete dialogue files that have fewer than two speakers
    Filter(FilterArgs),

    /// Build a vocabulary file from a text corpus
    Vocab(VocabArgs),

    /// Convert a text file to a file of token ids
    Tokenize(TokenizeArgs),

    /// Print the token ids of one sentence
    Encode(EncodeArgs),
}

/// All arguments for the `prepare` command.
#[derive(Args, Debug)]
pub struct PrepareArgs {
    /// JSON config file; when given, the other flags are ignored
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory receiving the vocabularies and prepared.json
    #[arg(long, default_value = "working_dir")]
    pub working_dir: PathBuf,

    /// Directory tree holding the .tsv dialogue logs
    #[arg(long, default_value = "data/dialogs")]
    pub dialogs_dir: PathBuf,

    #[arg(long, default_value = "data/train.enc")]
    pub train_enc: PathBuf,

    #[arg(long, default_value = "data/train.dec")]
    pub train_dec: PathBuf,

    #[arg(long, default_value = "data/test.enc")]
    pub test_enc: PathBuf,

    #[arg(long, default_value = "data/test.dec")]
    pub test_dec: PathBuf,

    /// Maximum encoder vocabulary size, reserved symbols included
    #[arg(long, default_value_t = 20_000)]
    pub enc_vocab_size: usize,

    /// Maximum decoder vocabulary size, reserved symbols included
    #[arg(long, default_value_t = 20_000)]
    pub dec_vocab_size: usize,

    /// Keep digits as-is instead of mapping them to 0
    #[arg(long)]
    pub keep_digits: bool,
}

/// Convert CLI PrepareArgs into the application-layer PrepareConfig.
/// The application layer never sees clap types.
impl From<PrepareArgs> for PrepareConfig {
    fn from(a: PrepareArgs) -> Self {
        PrepareConfig {
            working_dir:      a.working_dir,
            dialogs_dir:      a.dialogs_dir,
            train_enc:        a.train_enc,
            train_dec:        a.train_dec,
            test_enc:         a.test_enc,
            test_dec:         a.test_dec,
            enc_vocab_size:   a.enc_vocab_size,
            dec_vocab_size:   a.dec_vocab_size,
            normalize_digits: !a.keep_digits,
        }
    }
}

/// All arguments for the `reformat` command
#[derive(Args, Debug)]
pub struct ReformatArgs {
    #[arg(long, default_value = "data/dialogs")]
    pub dialogs_dir: PathBuf,

    #[arg(long, default_value = "data/train.enc")]
    pub train_enc: PathBuf,

    #[arg(long, default_value = "data/train.dec")]
    pub train_dec: PathBuf,

    #[arg(long, default_value = "data/test.enc")]
    pub test_enc: PathBuf,

    #[arg(long, default_value = "data/test.dec")]
    pub test_dec: PathBuf,
}

/// All arguments for the `filter` command
#[derive(Args, Debug)]
pub struct FilterArgs {
    #[arg(long, default_value = "data/dialogs")]
    pub dialogs_dir: PathBuf,
}

/// All arguments for the `vocab` command
#[derive(Args, Debug)]
pub struct VocabArgs {
    /// One-sentence-per-line corpus to count
    #[arg(long)]
    pub data: PathBuf,

    /// Vocabulary file to create
    #[arg(long)]
    pub output: PathBuf,

    #[arg(long, default_value_t = 20_000)]
    pub max_size: usize,

    #[arg(long)]
    pub keep_digits: bool,
}

/// All arguments for the `tokenize` command
#[derive(Args, Debug)]
pub struct TokenizeArgs {
    /// One-sentence-per-line text file
    #[arg(long)]
    pub data: PathBuf,

    /// Id file to create
    #[arg(long)]
    pub output: PathBuf,

    /// Vocabulary file to look tokens up in
    #[arg(long)]
    pub vocab: PathBuf,

    #[arg(long)]
    pub keep_digits: bool,
}

/// Which side's vocabulary `encode` reads from the manifest.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Enc,
    Dec,
}

/// All arguments for the `encode` command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// The sentence to encode
    #[arg(long)]
    pub sentence: String,

    /// Vocabulary file; defaults to the one recorded in prepared.json
    #[arg(long)]
    pub vocab: Option<PathBuf>,

    /// Working directory holding prepared.json
    #[arg(long, default_value = "working_dir")]
    pub working_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Side::Enc)]
    pub side: Side,

    #[arg(long)]
    pub keep_digits: bool,
}

// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and routes each subcommand to Layer 2 or Layer 4.
// All computation happens in those layers.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{
    Commands, EncodeArgs, FilterArgs, PrepareArgs, ReformatArgs, Side, TokenizeArgs, VocabArgs,
};

use crate::application::prepare_use_case::{PrepareConfig, PrepareUseCase};
use crate::data::{dialogue_filter, encoder, reformatter, vocab_builder, StepOutcome};
use crate::infra::{manifest, vocab_store};

/// The main CLI struct
#[derive(Parser, Debug)]
#[command(
    name = "dialogue-prep",
    version,
    about = "Turn two-party dialogue logs into vocabularies and token-id files for seq2seq training."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Dispatch to the handler for the chosen subcommand.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Prepare(args)  => run_prepare(args),
            Commands::Reformat(args) => run_reformat(args),
            Commands::Filter(args)   => run_filter(args),
            Commands::Vocab(args)    => run_vocab(args),
            Commands::Tokenize(args) => run_tokenize(args),
            Commands::Encode(args)   => run_encode(args),
        }
    }
}

fn run_prepare(args: PrepareArgs) -> Result<()> {
    let config = match args.config.clone() {
        Some(path) => PrepareConfig::load(&path)?,
        None       => args.into(),
    };
    tracing::info!("Preparing data from dialogues in: {}", config.dialogs_dir.display());

    let out = PrepareUseCase::new(config).execute()?;

    println!("Encoder train ids: {}", out.enc_train_ids.display());
    println!("Decoder train ids: {}", out.dec_train_ids.display());
    println!("Encoder test ids:  {}", out.enc_test_ids.display());
    println!("Decoder test ids:  {}", out.dec_test_ids.display());
    println!("Encoder vocab:     {}", out.enc_vocab.display());
    println!("Decoder vocab:     {}", out.dec_vocab.display());
    Ok(())
}

fn run_reformat(args: ReformatArgs) -> Result<()> {
    let paths = reformatter::DatasetPaths {
        train_enc: args.train_enc,
        train_dec: args.train_dec,
        test_enc:  args.test_enc,
        test_dec:  args.test_dec,
    };

    match reformatter::create_my_dataset(&args.dialogs_dir, &paths)? {
        Some(s) => println!(
            "{} files → {} exchanges ({} train / {} test)",
            s.files, s.exchanges, s.train_lines, s.test_lines
        ),
        None => println!("Dataset already created."),
    }
    Ok(())
}

fn run_filter(args: FilterArgs) -> Result<()> {
    let removed = dialogue_filter::rm_one_way_conv(&args.dialogs_dir)?;
    println!("Removed {removed} one-way conversations.");
    Ok(())
}

fn run_vocab(args: VocabArgs) -> Result<()> {
    let outcome = vocab_builder::create_vocabulary(
        &args.output,
        &args.data,
        args.max_size,
        None,
        !args.keep_digits,
    )?;
    report(outcome, &args.output);
    Ok(())
}

fn run_tokenize(args: TokenizeArgs) -> Result<()> {
    let outcome = encoder::data_to_token_ids(
        &args.data,
        &args.output,
        &args.vocab,
        None,
        !args.keep_digits,
    )?;
    report(outcome, &args.output);
    Ok(())
}

fn run_encode(args: EncodeArgs) -> Result<()> {
    let vocab_path = match args.vocab {
        Some(path) => path,
        None => {
            let prepared = manifest::read_manifest(&args.working_dir)?;
            match args.side {
                Side::Enc => prepared.enc_vocab,
                Side::Dec => prepared.dec_vocab,
            }
        }
    };

    let vocab = vocab_store::initialize_vocabulary(&vocab_path)?;
    let ids   = encoder::sentence_to_token_ids(&args.sentence, &vocab, None, !args.keep_digits);

    println!("{}", encoder::join_ids(&ids));
    println!("{}", vocab.decode(&ids).join(" "));
    Ok(())
}

fn report(outcome: StepOutcome, path: &std::path::Path) {
    match outcome {
        StepOutcome::Created => println!("Wrote {}", path.display()),
        StepOutcome::Skipped => println!("{} already exists, left unchanged.", path.display()),
    }
}

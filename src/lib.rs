//! Data preparation for sequence-to-sequence dialogue models.
//!
//! Two-party dialogue logs are reformatted into line-aligned
//! encoder/decoder text files, vocabularies are built from them,
//! and every line is converted to a sequence of token ids.
//!
//! ```no_run
//! use dialogue_prep::application::prepare_use_case::{prepare_my_data, PrepareConfig};
//!
//! let out = prepare_my_data(&PrepareConfig::default(), None)?;
//! println!("encoder vocabulary: {}", out.enc_vocab.display());
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod application;
pub mod domain;
pub mod data;
pub mod infra;

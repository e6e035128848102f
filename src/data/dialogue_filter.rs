// ============================================================
// Layer 4 — One-Way Conversation Filter
// ============================================================
// A dialogue file where only one person ever speaks cannot
// produce an input/output pair, so it is deleted before the
// reformatter runs.
//
// Completion is recorded with a sentinel file in the dialogue
// directory; once it exists the pass is skipped.

use anyhow::{Context, Result};
use std::{collections::HashSet, fs, path::Path};

use crate::data::loader;

/// Name of the marker file written after a completed pass.
pub const SENTINEL: &str = ".one_way_conv_removed";

/// Delete every `.tsv` under `dialogs_path` with fewer than two distinct
/// speakers. Returns how many files were removed (0 when skipped).
pub fn rm_one_way_conv(dialogs_path: &Path) -> Result<usize> {
    let sentinel = dialogs_path.join(SENTINEL);
    if sentinel.exists() {
        tracing::info!("One-way conversations already removed");
        return Ok(0);
    }
    if !dialogs_path.is_dir() {
        tracing::warn!(
            "Dialogue directory '{}' does not exist, nothing to filter",
            dialogs_path.display()
        );
        return Ok(0);
    }

    tracing::info!("Removing one-way conversations...");
    let mut removed = 0usize;

    for tsv in loader::find_dialogue_files(dialogs_path)? {
        if count_speakers(&tsv)? < 2 {
            tracing::debug!("Removing '{}'", tsv.display());
            fs::remove_file(&tsv)
                .with_context(|| format!("Cannot remove '{}'", tsv.display()))?;
            removed += 1;
        }
    }

    fs::File::create(&sentinel)
        .with_context(|| format!("Cannot create '{}'", sentinel.display()))?;

    tracing::info!("Removed {} one-way conversations", removed);
    Ok(removed)
}

/// Distinct speaker ids (second column) in one file, counting up to two.
/// Rows without a speaker column are ignored.
fn count_speakers(tsv: &Path) -> Result<usize> {
    let mut speakers: HashSet<String> = HashSet::new();

    for line in loader::lines(tsv)? {
        let line = line?;
        if let Some(speaker) = line.split('\t').nth(1) {
            speakers.insert(speaker.to_string());
            if speakers.len() >= 2 {
                break;
            }
        }
    }

    Ok(speakers.len())
}

// ============================================================
// Layer 4 — Train/Test Splitter
// ============================================================
// Splits line-aligned files into two partitions:
//   - Training set: the first `split_at` lines
//   - Test set:     every line after that
//
// The split is positional, never shuffled: an encoder file and
// its decoder file are split at the same index, so line N of
// train.enc still answers to line N of train.dec.
//
// Split ratio: 3/4 training, 1/4 test
//
// Reference: Rust Book §12 (I/O)

use anyhow::{Context, Result};
use std::{io::Write, path::Path};

use crate::data::loader;

/// Index of the first test line: `floor(3 * total / 4)`.
///
/// Computed as `total - ceil(total / 4)` so large counts cannot overflow.
pub fn split_index(total: usize) -> usize {
    total - total.div_ceil(4)
}

/// Copy the first `split_at` lines of `source` to `train` and the rest
/// to `test`. Returns (train lines, test lines).
pub fn split_file(source: &Path, split_at: usize, train: &Path, test: &Path) -> Result<(usize, usize)> {
    let mut train_out = loader::create_output(train)?;
    let mut test_out  = loader::create_output(test)?;
    let mut counts    = (0usize, 0usize);

    for (n, line) in loader::lines(source)?.enumerate() {
        let line = line?;
        if n < split_at {
            writeln!(train_out, "{line}")?;
            counts.0 += 1;
        } else {
            writeln!(test_out, "{line}")?;
            counts.1 += 1;
        }
    }

    train_out.flush()
        .with_context(|| format!("Cannot flush '{}'", train.display()))?;
    test_out.flush()
        .with_context(|| format!("Cannot flush '{}'", test.display()))?;

    tracing::debug!(
        "Split '{}': {} training, {} test",
        source.display(),
        counts.0,
        counts.1
    );
    Ok(counts)
}

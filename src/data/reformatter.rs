// ============================================================
// Layer 4 — Dialogue Reformatter
// ============================================================
// Turns a directory of two-party dialogue logs into four
// line-aligned text files:
//
//   train.enc / train.dec   first 3/4 of all exchanges
//   test.enc  / test.dec    the remaining exchanges
//
// Steps:
//   1. Skip everything if train.enc and train.dec already exist
//   2. Remove one-way conversations (dialogue_filter)
//   3. For each remaining .tsv, in sorted order:
//        - the first row's width sets the layout of the opening
//          turn; rows after the first speaker change have four fields
//        - merge consecutive same-speaker rows into turns
//        - write each (encoder turn, decoder turn) exchange to
//          <train_enc>.tmp and <train_dec>.tmp
//        - a malformed row ends that file early
//   4. Split both temporary files at floor(3/4 × exchanges)
//   5. Delete the temporary files

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use crate::data::{dialogue_filter, loader, splitter};
use crate::domain::dialogue::{ColumnLayout, Conversation, DialogueRow, Exchange};

/// The four text files produced by the reformatter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetPaths {
    pub train_enc: PathBuf,
    pub train_dec: PathBuf,
    pub test_enc:  PathBuf,
    pub test_dec:  PathBuf,
}

/// What a reformatting run produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DatasetSummary {
    /// Dialogue files read
    pub files:       usize,
    /// Exchanges written across all files
    pub exchanges:   usize,
    pub train_lines: usize,
    pub test_lines:  usize,
}

/// Build the train/test encoder/decoder files from the logs under
/// `dialogs_path`. Returns `None` when the training files already exist.
pub fn create_my_dataset(dialogs_path: &Path, paths: &DatasetPaths) -> Result<Option<DatasetSummary>> {
    if paths.train_enc.exists() && paths.train_dec.exists() {
        tracing::info!("Dataset already created");
        return Ok(None);
    }

    tracing::info!(
        "Creating the formatted dataset from dialogues in '{}'",
        dialogs_path.display()
    );

    dialogue_filter::rm_one_way_conv(dialogs_path)?;
    let files = loader::find_dialogue_files(dialogs_path)?;

    let enc_tmp = loader::with_suffix(&paths.train_enc, ".tmp");
    let dec_tmp = loader::with_suffix(&paths.train_dec, ".tmp");

    let mut sink = ExchangeSink {
        enc:   loader::create_output(&enc_tmp)?,
        dec:   loader::create_output(&dec_tmp)?,
        total: 0,
    };

    for (n, tsv) in files.iter().enumerate() {
        let written = parse_dialogue_file(tsv, &mut sink)?;
        tracing::debug!(
            "Parsed file {} of {}: '{}' ({} exchanges)",
            n + 1,
            files.len(),
            tsv.display(),
            written
        );
    }

    let total = sink.finish(&enc_tmp, &dec_tmp)?;
    tracing::info!("Parsed {} files into {} exchanges", files.len(), total);

    // ── Finalise: split the temporary files into train/test ─────────────────
    let split_at = splitter::split_index(total);
    let (train_lines, test_lines) =
        splitter::split_file(&enc_tmp, split_at, &paths.train_enc, &paths.test_enc)?;
    splitter::split_file(&dec_tmp, split_at, &paths.train_dec, &paths.test_dec)?;

    for tmp in [&enc_tmp, &dec_tmp] {
        fs::remove_file(tmp)
            .with_context(|| format!("Cannot remove '{}'", tmp.display()))?;
    }

    tracing::info!("Dataset ready: {} training, {} test exchanges", train_lines, test_lines);
    Ok(Some(DatasetSummary {
        files: files.len(),
        exchanges: total,
        train_lines,
        test_lines,
    }))
}

/// The two accumulating temporary files plus the global exchange counter.
struct ExchangeSink {
    enc:   BufWriter<File>,
    dec:   BufWriter<File>,
    total: usize,
}

impl ExchangeSink {
    /// Write both sides of an exchange at the same line number.
    fn write(&mut self, exchange: &Exchange) -> Result<()> {
        writeln!(self.enc, "{}", exchange.prompt)?;
        writeln!(self.dec, "{}", exchange.reply)?;
        self.total += 1;
        Ok(())
    }

    /// Flush and close both files; returns the exchange count.
    fn finish(mut self, enc_path: &Path, dec_path: &Path) -> Result<usize> {
        self.enc.flush()
            .with_context(|| format!("Cannot flush '{}'", enc_path.display()))?;
        self.dec.flush()
            .with_context(|| format!("Cannot flush '{}'", dec_path.display()))?;
        Ok(self.total)
    }
}

/// Read one dialogue file and write its exchanges to `sink`.
/// Returns how many exchanges the file contributed.
fn parse_dialogue_file(tsv: &Path, sink: &mut ExchangeSink) -> Result<usize> {
    let mut lines = loader::lines(tsv)?;

    let Some(first) = lines.next().transpose()? else {
        tracing::debug!("'{}' is empty", tsv.display());
        return Ok(0);
    };

    // The first row decides the layout of the opening turn only
    let field_count = first.split('\t').count();
    let Some(layout) = ColumnLayout::detect(field_count) else {
        tracing::warn!("'{}' starts with a malformed row, skipped", tsv.display());
        return Ok(0);
    };
    let Some(first_row) = DialogueRow::parse(&first, layout) else {
        return Ok(0);
    };

    let mut conversation = Conversation::start(first_row, layout);
    let mut written      = 0usize;

    for line in lines {
        let line = line?;
        // A short or empty row marks the end of usable content
        let Some(row) = conversation.parse_row(&line) else {
            break;
        };
        // Exchanges leave only once their reply turn has closed
        if let Some(exchange) = conversation.push(row) {
            sink.write(&exchange)?;
            written += 1;
        }
    }

    // End of file closes the last reply, if any
    if let Some(exchange) = conversation.finish() {
        sink.write(&exchange)?;
        written += 1;
    }

    Ok(written)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dialogue_filter::SENTINEL;

    fn paths_in(dir: &Path) -> DatasetPaths {
        DatasetPaths {
            train_enc: dir.join("out/train.enc"),
            train_dec: dir.join("out/train.dec"),
            test_enc:  dir.join("out/test.enc"),
            test_dec:  dir.join("out/test.dec"),
        }
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    /// Build a four-column conversation from (speaker, message) pairs.
    fn tsv(rows: &[(&str, &str)]) -> String {
        rows.iter()
            .enumerate()
            .map(|(i, (who, msg))| format!("t{i}\t{who}\t\t{msg}\n"))
            .collect()
    }

    #[test]
    fn test_merges_turns_and_drops_trailing_prompt() {
        let dir     = tempfile::tempdir().unwrap();
        let dialogs = dir.path().join("dialogs");
        fs::create_dir_all(dialogs.join("3")).unwrap();
        fs::write(
            dialogs.join("3/1.tsv"),
            tsv(&[("A", "a1"), ("A", "a2"), ("B", "b1"), ("B", "b2"), ("A", "a3")]),
        )
        .unwrap();

        let paths   = paths_in(dir.path());
        let summary = create_my_dataset(&dialogs, &paths).unwrap().unwrap();
        assert_eq!(summary.exchanges, 1);
        // floor(3/4 × 1) = 0 → the single exchange lands in test
        assert_eq!((summary.train_lines, summary.test_lines), (0, 1));
        assert_eq!(read(&paths.test_enc), "a1 a2\n");
        assert_eq!(read(&paths.test_dec), "b1 b2\n");
        assert_eq!(read(&paths.train_enc), "");
    }

    #[test]
    fn test_split_three_quarters_and_alignment() {
        let dir     = tempfile::tempdir().unwrap();
        let dialogs = dir.path().join("dialogs");
        fs::create_dir_all(&dialogs).unwrap();
        fs::write(
            dialogs.join("a.tsv"),
            tsv(&[("A", "q1"), ("B", "r1"), ("A", "q2"), ("B", "r2")]),
        )
        .unwrap();
        fs::write(
            dialogs.join("b.tsv"),
            tsv(&[("C", "q3"), ("D", "r3"), ("D", "r3b"), ("C", "q4"), ("D", "r4")]),
        )
        .unwrap();

        let paths   = paths_in(dir.path());
        let summary = create_my_dataset(&dialogs, &paths).unwrap().unwrap();
        assert_eq!(summary.files, 2);
        assert_eq!(summary.exchanges, 4);
        assert_eq!(read(&paths.train_enc), "q1\nq2\nq3\n");
        assert_eq!(read(&paths.train_dec), "r1\nr2\nr3 r3b\n");
        assert_eq!(read(&paths.test_enc), "q4\n");
        assert_eq!(read(&paths.test_dec), "r4\n");

        // Temporary files are gone
        assert!(!loader::with_suffix(&paths.train_enc, ".tmp").exists());
        assert!(!loader::with_suffix(&paths.train_dec, ".tmp").exists());
    }

    #[test]
    fn test_short_first_row_then_recipient_rows() {
        let dir     = tempfile::tempdir().unwrap();
        let dialogs = dir.path().join("dialogs");
        fs::create_dir_all(&dialogs).unwrap();
        fs::write(
            dialogs.join("mount.tsv"),
            "t0\talice\thow do I mount\n\
             t1\talice\tmy usb stick\n\
             t2\tbob\talice\ttry sudo mount\n\
             t3\talice\tbob\tthanks\n\
             t4\tbob\talice\tnp\n",
        )
        .unwrap();

        let paths   = paths_in(dir.path());
        let summary = create_my_dataset(&dialogs, &paths).unwrap().unwrap();
        assert_eq!(summary.exchanges, 2);
        assert_eq!(read(&paths.train_enc), "how do I mount my usb stick\n");
        assert_eq!(read(&paths.train_dec), "try sudo mount\n");
        assert_eq!(read(&paths.test_enc), "thanks\n");
        assert_eq!(read(&paths.test_dec), "np\n");
    }

    #[test]
    fn test_short_row_after_reply_ends_file() {
        let dir     = tempfile::tempdir().unwrap();
        let dialogs = dir.path().join("dialogs");
        fs::create_dir_all(&dialogs).unwrap();
        fs::write(
            dialogs.join("x.tsv"),
            "t0\tA\thello\nt1\tB\tA\thi\nt2\tA\tlost\nt3\tB\tA\tlost\n",
        )
        .unwrap();

        let paths   = paths_in(dir.path());
        let summary = create_my_dataset(&dialogs, &paths).unwrap().unwrap();
        assert_eq!(summary.exchanges, 1);
        assert_eq!(read(&paths.test_enc), "hello\n");
        assert_eq!(read(&paths.test_dec), "hi\n");
    }

    #[test]
    fn test_malformed_row_ends_file() {
        let dir     = tempfile::tempdir().unwrap();
        let dialogs = dir.path().join("dialogs");
        fs::create_dir_all(&dialogs).unwrap();
        fs::write(
            dialogs.join("x.tsv"),
            "t0\tA\t\tq\nt1\tB\t\tr\n\nt2\tA\t\tlost\nt3\tB\t\tlost\n",
        )
        .unwrap();

        let paths   = paths_in(dir.path());
        let summary = create_my_dataset(&dialogs, &paths).unwrap().unwrap();
        assert_eq!(summary.exchanges, 1);
        assert_eq!(read(&paths.test_enc), "q\n");
        assert_eq!(read(&paths.test_dec), "r\n");
    }

    #[test]
    fn test_single_speaker_file_contributes_nothing() {
        let dir     = tempfile::tempdir().unwrap();
        let dialogs = dir.path().join("dialogs");
        fs::create_dir_all(&dialogs).unwrap();
        fs::write(dialogs.join("solo.tsv"), tsv(&[("A", "anyone?"), ("A", "hello?")])).unwrap();
        fs::write(dialogs.join("pair.tsv"), tsv(&[("A", "q"), ("B", "r")])).unwrap();

        let paths   = paths_in(dir.path());
        let summary = create_my_dataset(&dialogs, &paths).unwrap().unwrap();
        assert_eq!(summary.files, 1);
        assert_eq!(summary.exchanges, 1);
        assert!(!dialogs.join("solo.tsv").exists());
        assert!(dialogs.join(SENTINEL).exists());
    }

    #[test]
    fn test_existing_training_files_skip_everything() {
        let dir     = tempfile::tempdir().unwrap();
        let dialogs = dir.path().join("dialogs");
        fs::create_dir_all(&dialogs).unwrap();
        fs::write(dialogs.join("pair.tsv"), tsv(&[("A", "q"), ("B", "r")])).unwrap();

        let paths = paths_in(dir.path());
        assert!(create_my_dataset(&dialogs, &paths).unwrap().is_some());
        let before = read(&paths.test_enc);

        fs::write(dialogs.join("more.tsv"), tsv(&[("C", "q2"), ("D", "r2")])).unwrap();
        assert!(create_my_dataset(&dialogs, &paths).unwrap().is_none());
        assert_eq!(read(&paths.test_enc), before);
    }
}

// ============================================================
// Layer 4 — Corpus File Access
// ============================================================
// Small helpers shared by every pipeline step:
//
//   - lines()               reads a file line by line; bytes that are
//                           not valid UTF-8 are replaced, not fatal
//   - find_dialogue_files() walks a directory tree for .tsv files
//   - create_output()       opens a buffered writer, creating parents
//   - with_suffix()         "train.enc" + ".ids20000" → "train.enc.ids20000"
//
// All handles are owned values, so they are closed when they go
// out of scope, including on early `?` returns.
//
// Reference: Rust Book §9 (Error Handling)
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufRead, BufReader, BufWriter},
    path::{Path, PathBuf},
};

/// Iterator over the lines of a reader, without line terminators.
/// Invalid UTF-8 is replaced with U+FFFD.
pub struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> LossyLines<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, buf: Vec::new() }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => None,
            Ok(_) => {
                // Strip "\n" and a Windows "\r" before it
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                Some(Ok(String::from_utf8_lossy(&self.buf).into_owned()))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// Open `path` for line-by-line reading.
pub fn lines(path: &Path) -> Result<LossyLines<BufReader<File>>> {
    let file = File::open(path)
        .with_context(|| format!("Cannot open '{}'", path.display()))?;
    Ok(LossyLines::new(BufReader::new(file)))
}

/// Create (or truncate) `path` behind a buffered writer.
/// Missing parent directories are created, like `mkdir -p`.
pub fn create_output(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Append `suffix` to the full file name of `path`.
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Every `.tsv` file under `dir`, at any depth, in sorted path order.
///
/// A missing directory yields an empty list.
pub fn find_dialogue_files(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        tracing::warn!(
            "Dialogue directory '{}' does not exist, no conversations to read",
            dir.display()
        );
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        for entry in fs::read_dir(&current)
            .with_context(|| format!("Cannot read directory '{}'", current.display()))?
        {
            let path = entry?.path();
            if path.is_dir() {
                pending.push(path);
            } else if path.extension().and_then(|e| e.to_str()) == Some("tsv") {
                files.push(path);
            }
        }
    }

    files.sort();
    tracing::debug!("Found {} dialogue files under '{}'", files.len(), dir.display());
    Ok(files)
}

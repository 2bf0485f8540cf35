//! Persistence of extraction results.
//!
//! A [`ResultRecorder`] stores one [`DocumentRecord`] per successfully
//! processed document. Failed extractions are never recorded.

use crate::Result;
use crate::types::DocumentRecord;
use parking_lot::Mutex;
use std::fs::OpenOptions;
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Stores the outcome of an extraction.
pub trait ResultRecorder: Send + Sync {
    fn record(&self, record: &DocumentRecord) -> Result<()>;
}

/// Appends each record as one JSON object per line.
pub struct JsonLinesRecorder {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonLinesRecorder {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read back every record in the file. A missing file holds no records.
    pub fn read_all(&self) -> Result<Vec<DocumentRecord>> {
        read_records(&self.path)
    }
}

impl ResultRecorder for JsonLinesRecorder {
    fn record(&self, record: &DocumentRecord) -> Result<()> {
        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let _guard = self.lock.lock();

        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.flush()?;

        tracing::debug!(
            "Recorded {} ({}) in {}",
            record.file_name,
            record.ocr_source,
            self.path.display()
        );
        Ok(())
    }
}

/// Keeps records in memory.
#[derive(Default)]
pub struct MemoryRecorder {
    records: Mutex<Vec<DocumentRecord>>,
}

impl MemoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<DocumentRecord> {
        self.records.lock().clone()
    }
}

impl ResultRecorder for MemoryRecorder {
    fn record(&self, record: &DocumentRecord) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}

/// Parse a JSON Lines file written by [`JsonLinesRecorder`].
pub fn read_records(path: impl AsRef<Path>) -> Result<Vec<DocumentRecord>> {
    let file = match std::fs::File::open(path.as_ref()) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(e.into()),
    };

    let mut records = Vec::new();
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        records.push(serde_json::from_str(&line)?);
    }
    Ok(records)
}

//! Dataset writer - buffered, hashed, flushed on every exit path

use detox_core::Record;
use std::io::{self, BufWriter, Write};

/// Writes `label<TAB>text` lines and hashes every byte written.
///
/// `finish` flushes and returns the BLAKE3 digest. If the writer is dropped
/// without `finish` (a run aborted), buffered lines are still flushed.
pub struct DatasetWriter<W: Write> {
    inner: BufWriter<W>,
    hasher: blake3::Hasher,
    records: usize,
    finished: bool,
}

impl<W: Write> DatasetWriter<W> {
    pub fn new(output: W) -> Self {
        Self {
            inner: BufWriter::new(output),
            hasher: blake3::Hasher::new(),
            records: 0,
            finished: false,
        }
    }

    pub fn write_record(&mut self, record: &Record) -> io::Result<()> {
        let line = format!("{record}\n");
        self.inner.write_all(line.as_bytes())?;
        self.hasher.update(line.as_bytes());
        self.records += 1;
        Ok(())
    }

    pub fn records(&self) -> usize {
        self.records
    }

    /// Flush and return the hex digest of everything written
    pub fn finish(mut self) -> io::Result<String> {
        self.inner.flush()?;
        self.finished = true;
        Ok(self.hasher.finalize().to_hex().to_string())
    }
}

impl<W: Write> Drop for DatasetWriter<W> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        match self.inner.flush() {
            Ok(()) => tracing::warn!(records = self.records, "Flushed partial output"),
            Err(err) => tracing::error!(error = %err, "Failed to flush partial output"),
        }
    }
}

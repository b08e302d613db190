use std::path::PathBuf;

use crate::{deterministic_filename, AtomicFileWriter, PersistError};

/// Materializes archive content as a standalone document that can be opened
/// outside the panel.
pub struct PopOutWriter {
    writer: AtomicFileWriter,
}

impl PopOutWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
        }
    }

    pub fn write(&self, title: Option<&str>, url: &str, body: &str) -> Result<PathBuf, PersistError> {
        let filename = deterministic_filename(title, url);
        self.writer.write(&filename, body)
    }
}

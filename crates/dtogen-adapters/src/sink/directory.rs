//! Filesystem emission sink.

use std::{
    io,
    path::{Path, PathBuf},
    sync::{Arc, RwLock},
};

use tracing::debug;

use dtogen_core::{
    application::{ApplicationError, ports::EmissionSink},
    error::{DtogenError, DtogenResult},
};

/// Writes each document to `<dir>/<name>.g.<ext>`.
///
/// The directory is created on the first write.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
    extension: String,
    written: Arc<RwLock<Vec<PathBuf>>>,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            extension: extension.into(),
            written: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a document name maps to.
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(format!("{name}.g.{}", self.extension))
    }

    /// Paths written so far, in order.
    pub fn written(&self) -> Vec<PathBuf> {
        self.written.read().map(|w| w.clone()).unwrap_or_default()
    }
}

impl EmissionSink for DirectorySink {
    fn add_document(&self, name: &str, text: &str) -> DtogenResult<()> {
        if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
            return Err(ApplicationError::EmissionFailed {
                name: name.to_string(),
                reason: "document names must be plain file names".into(),
            }
            .into());
        }

        std::fs::create_dir_all(&self.root)
            .map_err(|e| map_io_error(name, &self.root, e, "create directory"))?;

        let path = self.path_for(name);
        std::fs::write(&path, text).map_err(|e| map_io_error(name, &path, e, "write file"))?;
        debug!(path = %path.display(), bytes = text.len(), "Document written");

        self.written
            .write()
            .map_err(|_| ApplicationError::StateLockError { name: "directory sink" })?
            .push(path);
        Ok(())
    }
}

fn map_io_error(name: &str, path: &Path, e: io::Error, operation: &str) -> DtogenError {
    ApplicationError::EmissionFailed {
        name: name.to_string(),
        reason: format!("Failed to {} '{}': {}", operation, path.display(), e),
    }
    .into()
}

//! In-memory emission sink.

use std::sync::{Arc, RwLock};

use dtogen_core::{
    application::{ApplicationError, ports::EmissionSink},
    error::DtogenResult,
};

/// Collects emitted documents in emission order.
///
/// Re-adding a name replaces the text in place. Clones share the same
/// buffer, so a clone can be handed to the service and read afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<RwLock<Vec<(String, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(name, text)` pair, in emission order.
    pub fn documents(&self) -> Vec<(String, String)> {
        self.inner.read().map(|docs| docs.clone()).unwrap_or_default()
    }

    pub fn names(&self) -> Vec<String> {
        self.documents().into_iter().map(|(name, _)| name).collect()
    }

    pub fn get(&self, name: &str) -> Option<String> {
        self.inner
            .read()
            .ok()?
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, text)| text.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.read().map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EmissionSink for MemorySink {
    fn add_document(&self, name: &str, text: &str) -> DtogenResult<()> {
        let mut docs = self
            .inner
            .write()
            .map_err(|_| ApplicationError::StateLockError { name: "memory sink" })?;

        match docs.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = text.to_string(),
            None => docs.push((name.to_string(), text.to_string())),
        }
        Ok(())
    }
}

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::calendar::{Event, EventDraft};

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// String-keyed storage the event store writes through. Injected so the
/// store core runs against doubles in tests; real widgets plug in
/// whatever the host offers.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError>;
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One file per key under a base directory.
#[derive(Debug)]
pub struct FileStore {
    base_dir: PathBuf,
}

impl FileStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base_dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistError> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

pub fn encode_events(events: &[Event]) -> Result<String, serde_json::Error> {
    serde_json::to_string(events)
}

/// Parse a persisted payload back into canonical events. Records are
/// rehydrated through draft normalization; any record that fails marks
/// the whole payload corrupt so the caller falls back to its initial
/// collection.
pub fn decode_events(raw: &str) -> Result<Vec<Event>, DecodeError> {
    let drafts: Vec<EventDraft> = serde_json::from_str(raw)?;
    drafts
        .into_iter()
        .map(|draft| draft.into_event().map_err(DecodeError::from))
        .collect()
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed event payload: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid persisted record: {0}")]
    Record(#[from] crate::calendar::ValidationError),
}

use crate::calendar::{Event, EventDraft, ValidationError};
use crate::storage::persist::{self, KeyValueStore};

/// Owns the authoritative event collection. Every mutation funnels
/// through normalize -> validate before the collection changes; on
/// failure the store is untouched and the error goes back to the caller.
///
/// Events live in insertion order, so id lookups are a deterministic
/// left-to-right scan even when callers insert duplicate ids.
pub struct EventStore {
    events: Vec<Event>,
    persistence: Option<Persistence>,
}

struct Persistence {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl EventStore {
    pub fn new(initial: Vec<Event>) -> Self {
        Self {
            events: initial,
            persistence: None,
        }
    }

    /// Boot from the backend when a value is present and parses cleanly;
    /// absent, corrupt, or unreadable values fall back to `initial`.
    pub fn with_persistence(
        initial: Vec<Event>,
        backend: Box<dyn KeyValueStore>,
        key: impl Into<String>,
    ) -> Self {
        let key = key.into();
        let events = match backend.get(&key) {
            Ok(Some(raw)) => match persist::decode_events(&raw) {
                Ok(events) => events,
                Err(err) => {
                    tracing::warn!("Discarding corrupt persisted events: {}", err);
                    initial
                }
            },
            Ok(None) => initial,
            Err(err) => {
                tracing::warn!("Failed to read persisted events: {}", err);
                initial
            }
        };

        Self {
            events,
            persistence: Some(Persistence { backend, key }),
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Returns the stored id, assigned at creation when the draft carries
    /// none.
    pub fn add(&mut self, draft: EventDraft) -> Result<String, ValidationError> {
        let event = draft.into_event()?;
        let id = event.id.clone();
        tracing::info!("Adding event: {}", id);
        self.events.push(event);
        self.persist();
        Ok(id)
    }

    /// Shallow-merge the patch onto the first event with a matching id,
    /// then validate the merged record. The temporal pair always comes
    /// from the normalized patch. Unknown ids are a no-op.
    pub fn update(&mut self, id: &str, patch: EventDraft) -> Result<(), ValidationError> {
        let Some(index) = self.events.iter().position(|e| e.id == id) else {
            return Ok(());
        };

        let replacement = self.events[index].merged_with(patch).into_event()?;
        tracing::info!("Updating event: {}", id);
        self.events[index] = replacement;
        self.persist();
        Ok(())
    }

    /// Removes the first event with a matching id; unknown ids are a
    /// silent no-op.
    pub fn delete(&mut self, id: &str) {
        let Some(index) = self.events.iter().position(|e| e.id == id) else {
            return;
        };

        let removed = self.events.remove(index);
        tracing::info!("Deleted event: {}", removed.id);
        self.persist();
    }

    fn persist(&mut self) {
        let Some(persistence) = &mut self.persistence else {
            return;
        };

        let raw = match persist::encode_events(&self.events) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("Failed to serialize events: {}", err);
                return;
            }
        };

        // In-memory state stays authoritative when the backend refuses
        // the write.
        if let Err(err) = persistence.backend.set(&persistence.key, &raw) {
            tracing::warn!("Failed to persist events: {}", err);
        }
    }
}

pub mod event;
pub mod grid;
pub mod query;

pub use event::{DEFAULT_EVENT_COLOR, Event, EventDraft, ValidationError};

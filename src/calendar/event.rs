use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub const DEFAULT_EVENT_COLOR: &str = "#4F46E5";
pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("title required")]
    TitleRequired,
    #[error("title too long (max 100 characters)")]
    TitleTooLong,
    #[error("description too long (max 500 characters)")]
    DescriptionTooLong,
    #[error("invalid start")]
    InvalidStart,
    #[error("invalid end")]
    InvalidEnd,
    #[error("end must be after start")]
    EndNotAfterStart,
}

/// Canonical event record. Temporal fields exist only as
/// `start_date`/`end_date`; the alternate `start`/`end` input shape never
/// reaches the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Event {
    pub fn duration_minutes(&self) -> i64 {
        (self.end_date - self.start_date).num_minutes()
    }

    /// Strict open-interval conflict test. Adjacent events that touch at a
    /// boundary do not overlap; range queries use the boundary-inclusive
    /// test in `calendar::query` instead.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.start_date < other.end_date && other.start_date < self.end_date
    }

    /// Shallow merge of a patch onto this event. Patch fields override;
    /// the temporal pair is always taken from the normalized patch.
    pub fn merged_with(&self, patch: EventDraft) -> EventDraft {
        let patch = patch.normalize();
        EventDraft {
            id: Some(self.id.clone()),
            title: patch.title.or_else(|| Some(self.title.clone())),
            description: patch.description.or_else(|| self.description.clone()),
            start: None,
            end: None,
            start_date: patch.start_date,
            end_date: patch.end_date,
            color: patch.color.or_else(|| Some(self.color.clone())),
            category: patch.category.or_else(|| self.category.clone()),
        }
    }
}

/// Incoming event data of ambiguous shape: the temporal pair may arrive as
/// `start`/`end` or `start_date`/`end_date`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventDraft {
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
    pub start_date: Option<NaiveDateTime>,
    pub end_date: Option<NaiveDateTime>,
    pub color: Option<String>,
    pub category: Option<String>,
}

impl EventDraft {
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.start.or(self.start_date)
    }

    pub fn end(&self) -> Option<NaiveDateTime> {
        self.end.or(self.end_date)
    }

    /// Collapse to the canonical temporal shape: the coalesced pair moves
    /// into `start_date`/`end_date`, `start`/`end` are cleared, everything
    /// else passes through. Idempotent.
    pub fn normalize(mut self) -> EventDraft {
        self.start_date = self.start();
        self.end_date = self.end();
        self.start = None;
        self.end = None;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let title = self.title.as_deref().unwrap_or("").trim();
        if title.is_empty() {
            return Err(ValidationError::TitleRequired);
        }
        if title.chars().count() > MAX_TITLE_LENGTH {
            return Err(ValidationError::TitleTooLong);
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                return Err(ValidationError::DescriptionTooLong);
            }
        }
        let start = self.start().ok_or(ValidationError::InvalidStart)?;
        let end = self.end().ok_or(ValidationError::InvalidEnd)?;
        if end <= start {
            return Err(ValidationError::EndNotAfterStart);
        }
        Ok(())
    }

    /// Normalize, validate, and finalize into a canonical event. Ids are
    /// assigned when absent; color falls back to the fixed default.
    pub fn into_event(self) -> Result<Event, ValidationError> {
        let draft = self.normalize();
        draft.validate()?;

        let start_date = draft.start_date.ok_or(ValidationError::InvalidStart)?;
        let end_date = draft.end_date.ok_or(ValidationError::InvalidEnd)?;
        let title = draft
            .title
            .map(|t| t.trim().to_string())
            .ok_or(ValidationError::TitleRequired)?;

        Ok(Event {
            id: draft.id.unwrap_or_else(|| Uuid::new_v4().to_string()),
            title,
            description: draft.description,
            start_date,
            end_date,
            color: draft.color.unwrap_or_else(|| DEFAULT_EVENT_COLOR.to_string()),
            category: draft.category,
        })
    }
}

impl From<&Event> for EventDraft {
    fn from(event: &Event) -> Self {
        EventDraft {
            id: Some(event.id.clone()),
            title: Some(event.title.clone()),
            description: event.description.clone(),
            start: None,
            end: None,
            start_date: Some(event.start_date),
            end_date: Some(event.end_date),
            color: Some(event.color.clone()),
            category: event.category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    fn datetime(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    fn draft(title: &str, start: NaiveDateTime, end: NaiveDateTime) -> EventDraft {
        EventDraft {
            title: Some(title.to_string()),
            start: Some(start),
            end: Some(end),
            ..EventDraft::default()
        }
    }

    #[test]
    fn normalize_moves_alternate_shape_into_canonical_fields() {
        let normalized = draft("Standup", datetime(10, 0), datetime(10, 30)).normalize();

        assert_eq!(normalized.start_date, Some(datetime(10, 0)));
        assert_eq!(normalized.end_date, Some(datetime(10, 30)));
        assert_eq!(normalized.start, None);
        assert_eq!(normalized.end, None);
    }

    #[test]
    fn normalize_prefers_start_over_start_date_when_both_present() {
        let mut d = draft("Standup", datetime(10, 0), datetime(10, 30));
        d.start_date = Some(datetime(8, 0));
        d.end_date = Some(datetime(9, 0));

        let normalized = d.normalize();

        assert_eq!(normalized.start_date, Some(datetime(10, 0)));
        assert_eq!(normalized.end_date, Some(datetime(10, 30)));
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = draft("Standup", datetime(10, 0), datetime(10, 30)).normalize();
        let twice = once.clone().normalize();

        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_leaves_non_temporal_fields_untouched() {
        let mut d = draft("Standup", datetime(10, 0), datetime(10, 30));
        d.description = Some("Daily sync".to_string());
        d.category = Some("Meeting".to_string());

        let normalized = d.normalize();

        assert_eq!(normalized.description, Some("Daily sync".to_string()));
        assert_eq!(normalized.category, Some("Meeting".to_string()));
    }

    #[test]
    fn empty_title_is_rejected() {
        let d = draft("", datetime(10, 0), datetime(11, 0));

        assert_eq!(d.validate(), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn whitespace_only_title_is_rejected() {
        let d = draft("   ", datetime(10, 0), datetime(11, 0));

        assert_eq!(d.validate(), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn title_over_100_characters_is_rejected() {
        let d = draft(&"x".repeat(101), datetime(10, 0), datetime(11, 0));

        assert_eq!(d.validate(), Err(ValidationError::TitleTooLong));
    }

    #[test]
    fn title_of_exactly_100_characters_is_accepted() {
        let d = draft(&"x".repeat(100), datetime(10, 0), datetime(11, 0));

        assert_eq!(d.validate(), Ok(()));
    }

    #[test]
    fn description_over_500_characters_is_rejected() {
        let mut d = draft("Standup", datetime(10, 0), datetime(11, 0));
        d.description = Some("y".repeat(501));

        assert_eq!(d.validate(), Err(ValidationError::DescriptionTooLong));
    }

    #[test]
    fn missing_start_is_rejected() {
        let mut d = draft("Standup", datetime(10, 0), datetime(11, 0));
        d.start = None;

        assert_eq!(d.validate(), Err(ValidationError::InvalidStart));
    }

    #[test]
    fn missing_end_is_rejected() {
        let mut d = draft("Standup", datetime(10, 0), datetime(11, 0));
        d.end = None;

        assert_eq!(d.validate(), Err(ValidationError::InvalidEnd));
    }

    #[test]
    fn end_equal_to_start_is_rejected() {
        let d = draft("Standup", datetime(10, 0), datetime(10, 0));

        assert_eq!(d.validate(), Err(ValidationError::EndNotAfterStart));
    }

    #[test]
    fn end_before_start_is_rejected() {
        let d = draft("Standup", datetime(11, 0), datetime(10, 0));

        assert_eq!(d.validate(), Err(ValidationError::EndNotAfterStart));
    }

    #[test]
    fn title_check_runs_before_temporal_checks() {
        let d = draft("", datetime(11, 0), datetime(10, 0));

        assert_eq!(d.validate(), Err(ValidationError::TitleRequired));
    }

    #[test]
    fn into_event_assigns_id_and_default_color() {
        let event = draft("Standup", datetime(10, 0), datetime(10, 30))
            .into_event()
            .unwrap();

        assert!(!event.id.is_empty());
        assert_eq!(event.color, DEFAULT_EVENT_COLOR);
    }

    #[test]
    fn into_event_keeps_caller_supplied_id() {
        let mut d = draft("Standup", datetime(10, 0), datetime(10, 30));
        d.id = Some("evt-1".to_string());

        let event = d.into_event().unwrap();

        assert_eq!(event.id, "evt-1");
    }

    #[test]
    fn into_event_trims_title() {
        let event = draft("  Standup  ", datetime(10, 0), datetime(10, 30))
            .into_event()
            .unwrap();

        assert_eq!(event.title, "Standup");
    }

    #[test]
    fn duration_is_reported_in_minutes() {
        let event = draft("Standup", datetime(10, 0), datetime(11, 30))
            .into_event()
            .unwrap();

        assert_eq!(event.duration_minutes(), 90);
    }

    #[test]
    fn overlapping_events_are_detected() {
        let a = draft("A", datetime(10, 0), datetime(12, 0)).into_event().unwrap();
        let b = draft("B", datetime(11, 0), datetime(13, 0)).into_event().unwrap();

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn adjacent_events_do_not_overlap() {
        let a = draft("A", datetime(10, 0), datetime(11, 0)).into_event().unwrap();
        let b = draft("B", datetime(11, 0), datetime(12, 0)).into_event().unwrap();

        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
    }

    #[test]
    fn merged_with_overrides_only_patched_fields() {
        let existing = {
            let mut d = draft("Standup", datetime(10, 0), datetime(10, 30));
            d.category = Some("Meeting".to_string());
            d.into_event().unwrap()
        };

        let patch = EventDraft {
            title: Some("Retro".to_string()),
            start: Some(datetime(14, 0)),
            end: Some(datetime(15, 0)),
            ..EventDraft::default()
        };

        let merged = existing.merged_with(patch);

        assert_eq!(merged.title, Some("Retro".to_string()));
        assert_eq!(merged.category, Some("Meeting".to_string()));
        assert_eq!(merged.start_date, Some(datetime(14, 0)));
        assert_eq!(merged.end_date, Some(datetime(15, 0)));
    }

    #[test]
    fn merged_with_takes_temporal_pair_from_patch_only() {
        let existing = draft("Standup", datetime(10, 0), datetime(10, 30))
            .into_event()
            .unwrap();

        let patch = EventDraft {
            title: Some("Standup".to_string()),
            ..EventDraft::default()
        };

        let merged = existing.merged_with(patch);

        assert_eq!(merged.start_date, None);
        assert_eq!(merged.end_date, None);
        assert_eq!(merged.validate(), Err(ValidationError::InvalidStart));
    }
}

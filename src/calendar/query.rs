use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::calendar::Event;

const UNCATEGORIZED: &str = "Uncategorized";

/// Boundary-inclusive intersection of each event's span with
/// `[start, end]`. An event touching the window at either boundary is
/// included; pairwise conflict detection uses the strict test in
/// `Event::overlaps`.
pub fn events_in_range(
    events: &[Event],
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Vec<&Event> {
    events
        .iter()
        .filter(|e| e.start_date <= end && e.end_date >= start)
        .collect()
}

pub fn events_for_day(events: &[Event], date: NaiveDate) -> Vec<&Event> {
    let day_start = date.and_time(NaiveTime::MIN);
    let Some(end_time) = NaiveTime::from_hms_milli_opt(23, 59, 59, 999) else {
        return Vec::new();
    };
    events_in_range(events, day_start, date.and_time(end_time))
}

/// Ascending by start; the sort is stable so ties keep their original
/// relative order.
pub fn sort_events<'a>(events: &[&'a Event]) -> Vec<&'a Event> {
    let mut sorted = events.to_vec();
    sorted.sort_by_key(|e| e.start_date);
    sorted
}

/// Sidebar filtering: exact category match (None means all categories)
/// and case-insensitive substring search over title and description.
pub fn filter_events<'a>(
    events: &'a [Event],
    search: &str,
    category: Option<&str>,
) -> Vec<&'a Event> {
    let query = search.trim().to_lowercase();
    events
        .iter()
        .filter(|e| match category {
            Some(wanted) => e.category.as_deref() == Some(wanted),
            None => true,
        })
        .filter(|e| {
            if query.is_empty() {
                return true;
            }
            if e.title.to_lowercase().contains(&query) {
                return true;
            }
            e.description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query))
        })
        .collect()
}

pub fn count_by_category(events: &[Event]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for event in events {
        let category = event.category.as_deref().unwrap_or(UNCATEGORIZED);
        *counts.entry(category.to_string()).or_insert(0) += 1;
    }
    counts
}

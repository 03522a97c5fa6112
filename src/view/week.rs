use chrono::{Days, NaiveDate, Timelike};

use crate::calendar::Event;
use crate::calendar::grid::start_of_week;
use crate::calendar::query::sort_events;

#[derive(Debug, Clone, PartialEq)]
pub struct WeekLayout {
    pub week_start: NaiveDate,
    pub days: Vec<DayColumn>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub is_today: bool,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlot {
    pub hour: u32,
    pub events: Vec<EventBlock>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EventBlock {
    pub event_id: String,
    pub title: String,
    pub color: String,
    pub start_hour: u32,
    pub start_minute: u32,
    pub duration_minutes: i64,
}

/// Seven columns starting on the Sunday of `anchor`'s week, each with its
/// events grouped into hour slots. The week runs Sunday-first; the month
/// grid is Monday-first.
pub fn calculate_layout(
    anchor: NaiveDate,
    selected: Option<NaiveDate>,
    today: NaiveDate,
    events: &[Event],
) -> WeekLayout {
    let week_start = start_of_week(anchor);

    let mut days = Vec::new();
    for day_offset in 0..7u64 {
        let Some(date) = week_start.checked_add_days(Days::new(day_offset)) else {
            continue;
        };

        let day_events: Vec<&Event> = events
            .iter()
            .filter(|e| e.start_date.date() == date)
            .collect();

        days.push(DayColumn {
            date,
            is_selected: selected == Some(date),
            is_today: date == today,
            slots: build_time_slots(&sort_events(&day_events)),
        });
    }

    WeekLayout { week_start, days }
}

fn build_time_slots(events: &[&Event]) -> Vec<TimeSlot> {
    let mut slots = Vec::new();

    for hour in 0..24 {
        let hour_events: Vec<EventBlock> = events
            .iter()
            .filter(|e| e.start_date.hour() == hour)
            .map(|e| EventBlock {
                event_id: e.id.clone(),
                title: e.title.clone(),
                color: e.color.clone(),
                start_hour: e.start_date.hour(),
                start_minute: e.start_date.minute(),
                duration_minutes: e.duration_minutes(),
            })
            .collect();

        if !hour_events.is_empty() {
            slots.push(TimeSlot {
                hour,
                events: hour_events,
            });
        }
    }

    slots
}

use chrono::NaiveDate;

use crate::calendar::Event;
use crate::calendar::query::{events_for_day, sort_events};

/// Day-list text for the agenda / mobile view: a date header plus one
/// line per event, sorted by start time.
pub fn format_day_agenda(date: NaiveDate, events: &[Event]) -> String {
    let day_events = sort_events(&events_for_day(events, date));

    let mut lines = Vec::new();
    lines.push(format!("Agenda – {}", date.format("%A, %B %d, %Y")));
    lines.push(String::new());

    if day_events.is_empty() {
        lines.push("No events scheduled.".to_string());
    } else {
        for event in day_events {
            lines.push(format!("- {}", build_agenda_line(event)));
        }
    }

    lines.join("\n")
}

fn build_agenda_line(event: &Event) -> String {
    let time_label = format!(
        "{}-{}",
        event.start_date.format("%H:%M"),
        event.end_date.format("%H:%M")
    );

    let mut line = format!("{:<13} {}", time_label, event.title);
    if let Some(category) = &event.category {
        if !category.is_empty() {
            line.push_str(&format!(" [{}]", category));
        }
    }
    line
}

use chrono::{Datelike, NaiveDate};

use crate::calendar::Event;
use crate::calendar::grid::month_grid;
use crate::calendar::query::events_for_day;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthLayout {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Week>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Week {
    pub days: Vec<DayCell>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_selected: bool,
    pub is_today: bool,
    pub is_current_month: bool,
    pub event_count: usize,
}

impl DayCell {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            is_selected: false,
            is_today: false,
            is_current_month: true,
            event_count: 0,
        }
    }

    pub fn with_selected(mut self, selected: bool) -> Self {
        self.is_selected = selected;
        self
    }

    pub fn with_today(mut self, today: bool) -> Self {
        self.is_today = today;
        self
    }

    pub fn with_current_month(mut self, current_month: bool) -> Self {
        self.is_current_month = current_month;
        self
    }

    pub fn with_event_count(mut self, count: usize) -> Self {
        self.event_count = count;
        self
    }
}

/// Six rows of seven cells over the Monday-first month grid. Leading and
/// trailing cells from the adjacent months are flagged so renderers can
/// dim them.
pub fn calculate_layout(
    anchor: NaiveDate,
    selected: Option<NaiveDate>,
    today: NaiveDate,
    events: &[Event],
) -> MonthLayout {
    let weeks = month_grid(anchor)
        .chunks(7)
        .map(|chunk| Week {
            days: chunk
                .iter()
                .map(|&date| {
                    let in_month =
                        date.month() == anchor.month() && date.year() == anchor.year();
                    DayCell::new(date)
                        .with_selected(selected == Some(date))
                        .with_today(date == today)
                        .with_current_month(in_month)
                        .with_event_count(events_for_day(events, date).len())
                })
                .collect(),
        })
        .collect();

    MonthLayout {
        year: anchor.year(),
        month: anchor.month(),
        weeks,
    }
}

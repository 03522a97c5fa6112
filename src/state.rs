use chrono::{Datelike, Days, Local, NaiveDate};

use crate::calendar::Event;
use crate::calendar::grid::{format_month_year, start_of_week};
use crate::calendar::query::filter_events;
use crate::storage::Config;
use crate::view::{MonthLayout, WeekLayout, month, week};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewType {
    Month,
    Week,
}

/// Navigation and filter state for one widget instance. Month anchors
/// snap to the 1st; week anchors move in whole weeks.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarState {
    pub view: ViewType,
    pub current_date: NaiveDate,
    pub selected_date: Option<NaiveDate>,
    pub slot_interval_minutes: u32,
    pub search: String,
    pub category_filter: Option<String>,
}

impl CalendarState {
    pub fn new(initial_date: NaiveDate, initial_view: ViewType) -> Self {
        let current_date = match initial_view {
            ViewType::Month => month_anchor(initial_date),
            ViewType::Week => initial_date,
        };
        Self {
            view: initial_view,
            current_date,
            selected_date: None,
            slot_interval_minutes: 30,
            search: String::new(),
            category_filter: None,
        }
    }

    pub fn from_config(config: &Config, initial_date: NaiveDate) -> Self {
        let view = if config.ui.default_view.eq_ignore_ascii_case("week") {
            ViewType::Week
        } else {
            ViewType::Month
        };
        let mut state = Self::new(initial_date, view);
        state.slot_interval_minutes = if config.ui.slot_interval_minutes == 60 {
            60
        } else {
            30
        };
        state
    }

    pub fn go_to_next(&mut self) {
        self.current_date = match self.view {
            ViewType::Month => first_of_next_month(self.current_date),
            ViewType::Week => self
                .current_date
                .checked_add_days(Days::new(7))
                .unwrap_or(self.current_date),
        };
    }

    pub fn go_to_previous(&mut self) {
        self.current_date = match self.view {
            ViewType::Month => first_of_previous_month(self.current_date),
            ViewType::Week => self
                .current_date
                .checked_sub_days(Days::new(7))
                .unwrap_or(self.current_date),
        };
    }

    pub fn go_to_today(&mut self) {
        let today = Local::now().date_naive();
        self.current_date = match self.view {
            ViewType::Month => month_anchor(today),
            ViewType::Week => today,
        };
    }

    pub fn toggle_view(&mut self) {
        self.view = match self.view {
            ViewType::Month => ViewType::Week,
            ViewType::Week => ViewType::Month,
        };
        if self.view == ViewType::Month {
            self.current_date = month_anchor(self.current_date);
        }
    }

    pub fn set_month(&mut self, month: u32) {
        if let Some(date) = NaiveDate::from_ymd_opt(self.current_date.year(), month, 1) {
            self.current_date = date;
        }
    }

    pub fn set_year(&mut self, year: i32) {
        if let Some(date) = NaiveDate::from_ymd_opt(year, self.current_date.month(), 1) {
            self.current_date = date;
        }
    }

    /// Header text: the month name for month view, the week's span for
    /// week view ("January 2025", "Jan–Feb 2025", "Dec–Jan 2024–2025").
    pub fn header_label(&self) -> String {
        match self.view {
            ViewType::Month => format_month_year(self.current_date),
            ViewType::Week => {
                let start = start_of_week(self.current_date);
                let end = start.checked_add_days(Days::new(6)).unwrap_or(start);

                let month_part = if start.month() == end.month() && start.year() == end.year() {
                    start.format("%B").to_string()
                } else {
                    format!("{}–{}", start.format("%b"), end.format("%b"))
                };
                let year_part = if start.year() == end.year() {
                    start.year().to_string()
                } else {
                    format!("{}–{}", start.year(), end.year())
                };
                format!("{} {}", month_part, year_part)
            }
        }
    }

    pub fn filtered_events<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        filter_events(events, &self.search, self.category_filter.as_deref())
    }

    pub fn month_layout(&self, today: NaiveDate, events: &[Event]) -> MonthLayout {
        month::calculate_layout(self.current_date, self.selected_date, today, events)
    }

    pub fn week_layout(&self, today: NaiveDate, events: &[Event]) -> WeekLayout {
        week::calculate_layout(self.current_date, self.selected_date, today, events)
    }
}

impl Default for CalendarState {
    fn default() -> Self {
        Self::new(Local::now().date_naive(), ViewType::Month)
    }
}

fn month_anchor(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    next.unwrap_or(date)
}

fn first_of_previous_month(date: NaiveDate) -> NaiveDate {
    let previous = if date.month() == 1 {
        NaiveDate::from_ymd_opt(date.year() - 1, 12, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() - 1, 1)
    };
    previous.unwrap_or(date)
}

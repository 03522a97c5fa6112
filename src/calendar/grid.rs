use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Number of cells in a month grid: 6 weeks of 7 days.
pub const MONTH_GRID_CELLS: usize = 42;

pub fn start_of_day(d: NaiveDateTime) -> NaiveDateTime {
    d.date().and_time(NaiveTime::MIN)
}

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

pub fn add_days(d: NaiveDateTime, n: i64) -> NaiveDateTime {
    d + Duration::days(n)
}

pub fn add_hours(d: NaiveDateTime, n: i64) -> NaiveDateTime {
    d + Duration::hours(n)
}

pub fn add_minutes(d: NaiveDateTime, n: i64) -> NaiveDateTime {
    d + Duration::minutes(n)
}

pub fn clamp<T: PartialOrd>(value: T, min: T, max: T) -> T {
    if value < min {
        min
    } else if value > max {
        max
    } else {
        value
    }
}

/// 42 consecutive days covering the month of `anchor`, starting on the
/// Monday on or before the 1st. Leading and trailing cells belong to the
/// adjacent months.
pub fn month_grid(anchor: NaiveDate) -> Vec<NaiveDate> {
    let Some(first_of_month) = NaiveDate::from_ymd_opt(anchor.year(), anchor.month(), 1) else {
        return Vec::new();
    };

    let days_before = first_of_month.weekday().num_days_from_monday() as u64;
    let Some(grid_start) = first_of_month.checked_sub_days(Days::new(days_before)) else {
        return Vec::new();
    };

    let mut cells = Vec::with_capacity(MONTH_GRID_CELLS);
    let mut current = grid_start;
    for _ in 0..MONTH_GRID_CELLS {
        cells.push(current);
        let Some(next) = current.succ_opt() else { break };
        current = next;
    }
    cells
}

/// The Sunday on or before `date`. Week layouts run Sunday through
/// Saturday; the month grid above is Monday-first. The two conventions
/// are independent.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let days_from_sunday = date.weekday().num_days_from_sunday() as u64;
    date.checked_sub_days(Days::new(days_from_sunday))
        .unwrap_or(date)
}

pub fn hours_in_day(step_minutes: u32) -> Vec<NaiveTime> {
    if step_minutes == 0 {
        return Vec::new();
    }
    (0..24 * 60)
        .step_by(step_minutes as usize)
        .filter_map(|m| NaiveTime::from_hms_opt(m / 60, m % 60, 0))
        .collect()
}

pub fn format_month_year(d: NaiveDate) -> String {
    d.format("%B %Y").to_string()
}

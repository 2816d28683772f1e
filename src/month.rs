//! Month grids and labels used to lay out the calendar.
//!
//! Months are addressed by their zero-based index (January = 0), weeks start
//! on Monday.

use chrono::{Datelike, Month, NaiveDate};
use num_traits::FromPrimitive;

/// One row of a month grid. Slots outside the month are `None`.
pub type Week = [Option<NaiveDate>; 7];

pub type MonthGrid = Vec<Week>;

const MONTH_NAMES: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

pub const WEEKDAY_LABELS: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];

pub fn days_of_month(month: &Month, year: i32) -> u32 {
    let first = NaiveDate::from_ymd_opt(year, month.number_from_month(), 1);
    let next = if month.number_from_month() == 12 {
        year.checked_add(1)
            .and_then(|next_year| NaiveDate::from_ymd_opt(next_year, 1, 1))
    } else {
        NaiveDate::from_ymd_opt(year, month.number_from_month() + 1, 1)
    };

    match (first, next) {
        (Some(first), Some(next)) => next.signed_duration_since(first).num_days() as u32,
        _ => 0,
    }
}

/// Builds the week rows of `month0` (taken modulo 12) in `year`.
///
/// Returns an empty grid if the month lies outside the representable range.
pub fn month_data(year: i32, month0: u32) -> MonthGrid {
    let month = match Month::from_u32(month0 % 12 + 1) {
        Some(month) => month,
        None => return MonthGrid::new(),
    };
    let first = match NaiveDate::from_ymd_opt(year, month.number_from_month(), 1) {
        Some(first) => first,
        None => return MonthGrid::new(),
    };

    let offset = first.weekday().num_days_from_monday() as usize;
    let num_days = days_of_month(&month, year) as usize;

    let mut grid = MonthGrid::new();
    let mut week: Week = [None; 7];

    for (slot, date) in (offset..).zip(first.iter_days().take(num_days)) {
        week[slot % 7] = Some(date);
        if slot % 7 == 6 {
            grid.push(week);
            week = [None; 7];
        }
    }

    if week.iter().any(Option::is_some) {
        grid.push(week);
    }

    grid
}

pub fn month_name(month0: u32) -> &'static str {
    MONTH_NAMES[(month0 % 12) as usize]
}

/// Calendar-day equality, ignoring anything finer than the day.
pub fn are_equal<A: Datelike, B: Datelike>(a: &A, b: &B) -> bool {
    a.year() == b.year() && a.month() == b.month() && a.day() == b.day()
}

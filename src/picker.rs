use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use std::fmt;

use crate::month::{self, MonthGrid};
use crate::selection::{self, DayClass, Selection};

pub type ChangeHandler = Box<dyn FnMut(NaiveDate)>;

/// One block of the rolling window.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthEntry {
    pub month_index: u32,
    pub grid: MonthGrid,
    pub name: &'static str,
}

/// Selection state of the calendar.
///
/// `now` is captured once on construction. "Today" is its calendar day,
/// "disabled" is measured against the moment itself.
pub struct RangePicker {
    anchor: NaiveDate,
    now: NaiveDateTime,
    current: NaiveDate,
    selected: Selection,
    on_change: ChangeHandler,
}

impl Default for RangePicker {
    fn default() -> Self {
        RangePicker::new()
    }
}

impl fmt::Debug for RangePicker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangePicker")
            .field("anchor", &self.anchor)
            .field("now", &self.now)
            .field("selected", &self.selected)
            .finish()
    }
}

impl RangePicker {
    pub const WINDOW_LEN: u32 = 12;

    pub fn new() -> Self {
        RangePicker::at(Local::now().naive_local())
    }

    pub fn at(now: NaiveDateTime) -> Self {
        let current = now.date();
        RangePicker {
            anchor: current,
            now,
            current,
            selected: Selection::new(),
            on_change: Box::new(|_| {}),
        }
    }

    /// Picker captured at the very first moment of `current`.
    pub fn with_current(current: NaiveDate) -> Self {
        match current.and_hms_opt(0, 0, 0) {
            Some(start_of_day) => RangePicker::at(start_of_day),
            None => RangePicker::new(),
        }
    }

    pub fn with_anchor(mut self, anchor: NaiveDate) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn on_change<F>(mut self, handler: F) -> Self
    where
        F: FnMut(NaiveDate) + 'static,
    {
        self.on_change = Box::new(handler);
        self
    }

    pub fn anchor(&self) -> &NaiveDate {
        &self.anchor
    }

    pub fn current(&self) -> &NaiveDate {
        &self.current
    }

    pub fn selection(&self) -> &Selection {
        &self.selected
    }

    /// Year every month of the window is fetched for.
    pub fn year(&self) -> i32 {
        self.anchor.year()
    }

    /// Twelve months starting at the current month, wrapping past December.
    ///
    /// All entries use the anchor year, so wrapped months show the days of
    /// that year rather than the following one.
    pub fn month_window(&self) -> Vec<MonthEntry> {
        let year = self.year();
        let first = self.current.month0();

        (0..Self::WINDOW_LEN)
            .map(|i| {
                let month_index = (first + i) % 12;
                MonthEntry {
                    month_index,
                    grid: month::month_data(year, month_index),
                    name: month::month_name(month_index),
                }
            })
            .collect()
    }

    pub fn handle_day_click(&mut self, day: NaiveDate) {
        self.selected.push(day);
        log::debug!("selected {} ({} picked)", day, self.selected.len());
        (self.on_change)(day);
    }

    pub fn reset_selected_dates(&mut self) {
        if !self.selected.is_empty() {
            log::debug!("selection reset");
        }
        self.selected.clear();
    }

    /// Activation of a day cell. Past days, including today once it has
    /// started, reset the selection instead of extending it.
    pub fn click(&mut self, day: NaiveDate) {
        if self.is_disabled(&day) {
            self.reset_selected_dates();
        } else {
            self.handle_day_click(day);
        }
    }

    pub fn classify(&self, day: &NaiveDate) -> DayClass {
        selection::classify(&self.current, &self.selected, day)
    }

    pub fn is_disabled(&self, day: &NaiveDate) -> bool {
        selection::is_disabled(&self.now, day)
    }
}

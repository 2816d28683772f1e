use chrono::{NaiveDate, NaiveDateTime};
use derive_more::Display;

use crate::month::are_equal;

/// Visual class of a day cell. Disabled days are tracked separately, see
/// [`is_disabled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DayClass {
    #[display(fmt = "today")]
    Today,
    #[display(fmt = "selected")]
    Selected,
    #[display(fmt = "between")]
    Between,
    #[display(fmt = "notToday")]
    Default,
}

/// Ordered sequence of at most two picked dates.
///
/// The first entry is the start of the range, the second its end. Pushing
/// onto a full selection starts over with the new date.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    dates: Vec<NaiveDate>,
}

impl Selection {
    pub const MAX_LEN: usize = 2;

    pub fn new() -> Self {
        Selection::default()
    }

    pub fn push(&mut self, date: NaiveDate) {
        if self.dates.len() == Self::MAX_LEN {
            self.dates.clear();
        }
        self.dates.push(date);
    }

    pub fn clear(&mut self) {
        self.dates.clear();
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn as_slice(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn contains(&self, date: &NaiveDate) -> bool {
        self.dates.iter().any(|selected| are_equal(selected, date))
    }

    /// Both ends in click order, once two dates are picked.
    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self.dates.as_slice() {
            [first, second] => Some((*first, *second)),
            _ => None,
        }
    }
}

/// Strictly after the first and strictly before the second pick. The picks
/// are taken in click order, a reversed range never matches.
pub fn is_between(selection: &Selection, date: &NaiveDate) -> bool {
    selection
        .range()
        .map_or(false, |(first, second)| *date > first && *date < second)
}

/// A day is past once its first moment lies before `now`, which makes the
/// current day disabled as soon as it has started.
pub fn is_disabled(now: &NaiveDateTime, date: &NaiveDate) -> bool {
    date.and_hms_opt(0, 0, 0)
        .map_or(false, |start_of_day| start_of_day < *now)
}

/// First match wins: today, selected, between, default.
pub fn classify(current: &NaiveDate, selection: &Selection, date: &NaiveDate) -> DayClass {
    if are_equal(date, current) {
        DayClass::Today
    } else if selection.contains(date) {
        DayClass::Selected
    } else if is_between(selection, date) {
        DayClass::Between
    } else {
        DayClass::Default
    }
}

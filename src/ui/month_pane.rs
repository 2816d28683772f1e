use chrono::{Datelike, NaiveDate};
use std::fmt::{self, Display};

use unsegen::base::StyleModifier;

use super::Theme;
use crate::month::WEEKDAY_LABELS;
use crate::picker::{MonthEntry, RangePicker};
use crate::selection::DayClass;

/// A piece of a calendar line occupying one fixed-width column, or the
/// whole line for titles.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    Title(String),
    Weekday(&'static str),
    Day {
        date: NaiveDate,
        class: DayClass,
        disabled: bool,
    },
    Empty,
    Blank,
}

pub type Line = Vec<Segment>;

pub struct DayCell<'a> {
    day_num: u32,
    class: DayClass,
    disabled: bool,
    focused: bool,
    theme: &'a Theme,
}

impl<'a> DayCell<'a> {
    pub const CELL_WIDTH: usize = 4;

    pub fn new(date: &NaiveDate, class: DayClass, disabled: bool, theme: &'a Theme) -> Self {
        DayCell {
            day_num: date.day(),
            class,
            disabled,
            focused: false,
            theme,
        }
    }

    pub fn focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Style of the cell without focus, which is layered on top by the
    /// window.
    pub fn style(&self) -> StyleModifier {
        self.theme.day_cell_style(self.class, self.disabled)
    }
}

impl Display for DayCell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let arg_today = if self.class == DayClass::Today {
            self.theme.today_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        let arg_focus = if self.focused {
            self.theme.focus_day_char.unwrap_or(' ')
        } else {
            ' '
        };

        write!(f, "{}{}{:>2}", arg_today, arg_focus, self.day_num)
    }
}

/// Lines of a single month block: title, weekday labels, the weeks and a
/// trailing spacer.
pub struct MonthPane<'a> {
    entry: &'a MonthEntry,
    year: i32,
    picker: &'a RangePicker,
}

impl<'a> MonthPane<'a> {
    pub const COLUMNS: usize = 7;
    pub const HEADER_ROWS: usize = 2;
    pub const SPACER_ROWS: usize = 1;

    pub fn new(entry: &'a MonthEntry, picker: &'a RangePicker) -> Self {
        MonthPane {
            entry,
            year: picker.year(),
            picker,
        }
    }

    pub fn title(&self) -> String {
        format!("{} {}г", self.entry.name, self.year)
    }

    pub fn height(&self) -> usize {
        Self::HEADER_ROWS + self.entry.grid.len() + Self::SPACER_ROWS
    }

    pub fn lines(&self) -> Vec<Line> {
        let mut lines = Vec::with_capacity(self.height());

        lines.push(vec![Segment::Title(self.title())]);
        lines.push(
            WEEKDAY_LABELS
                .iter()
                .map(|&label| Segment::Weekday(label))
                .collect(),
        );

        for week in self.entry.grid.iter() {
            lines.push(
                week.iter()
                    .map(|slot| match slot {
                        Some(date) => Segment::Day {
                            date: *date,
                            class: self.picker.classify(date),
                            disabled: self.picker.is_disabled(date),
                        },
                        None => Segment::Empty,
                    })
                    .collect(),
            );
        }

        lines.push(vec![Segment::Blank]);
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn header_has_fixed_labels() {
        let picker = RangePicker::with_current(ymd(2024, 5, 10));
        for entry in picker.month_window().iter() {
            let lines = MonthPane::new(entry, &picker).lines();
            assert_eq!(
                lines[1],
                ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"]
                    .iter()
                    .map(|&l| Segment::Weekday(l))
                    .collect::<Vec<_>>()
            );
        }
    }

    #[test]
    fn title_uses_picker_year() {
        let picker = RangePicker::with_current(ymd(2024, 11, 10));
        let window = picker.month_window();
        assert_eq!(MonthPane::new(&window[0], &picker).title(), "Ноябрь 2024г");
        assert_eq!(MonthPane::new(&window[2], &picker).title(), "Январь 2024г");
    }

    #[test]
    fn out_of_month_slots_are_empty() {
        // 1 May 2024 was a Wednesday
        let picker = RangePicker::with_current(ymd(2024, 5, 10));
        let window = picker.month_window();
        let pane = MonthPane::new(&window[0], &picker);
        let lines = pane.lines();

        assert_eq!(lines.len(), pane.height());
        assert_eq!(lines[2][0], Segment::Empty);
        assert_eq!(lines[2][1], Segment::Empty);
        assert!(matches!(lines[2][2], Segment::Day { date, disabled: true, .. } if date == ymd(2024, 5, 1)));
    }

    #[test]
    fn day_cells_carry_classification() {
        let mut picker = RangePicker::with_current(ymd(2024, 5, 10));
        picker.click(ymd(2024, 5, 13));
        picker.click(ymd(2024, 5, 15));
        let window = picker.month_window();
        let lines = MonthPane::new(&window[0], &picker).lines();

        let class_of = |day: u32| {
            lines
                .iter()
                .flatten()
                .find_map(|segment| match segment {
                    Segment::Day { date, class, .. } if *date == ymd(2024, 5, day) => Some(*class),
                    _ => None,
                })
                .unwrap()
        };

        assert_eq!(class_of(10), DayClass::Today);
        assert_eq!(class_of(13), DayClass::Selected);
        assert_eq!(class_of(14), DayClass::Between);
        assert_eq!(class_of(16), DayClass::Default);
    }

    #[test]
    fn day_cell_markers() {
        let theme = Theme::default();
        let today = DayCell::new(&ymd(2024, 5, 10), DayClass::Today, false, &theme);
        assert_eq!(today.to_string(), "* 10");

        let plain = DayCell::new(&ymd(2024, 5, 3), DayClass::Default, true, &theme).focus(true);
        assert_eq!(plain.to_string(), "   3");
    }
}

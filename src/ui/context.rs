use chrono::{Duration, NaiveDate};

use crate::config::{ColorName, Config, ThemeConfig};
use crate::picker::RangePicker;
use crate::selection::DayClass;

use unsegen::base::style::*;
use unsegen::widget::builtin::PromptLine;

use super::calendar_window::CalendarLayout;
use super::scroll::ScrollState;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Command,
}

#[derive(Clone, Debug)]
pub struct Theme {
    pub day_style: StyleModifier,
    pub day_text_style: TextFormatModifier,
    pub today_day_style: StyleModifier,
    pub today_day_text_style: TextFormatModifier,
    pub today_day_char: Option<char>,
    pub selected_day_style: StyleModifier,
    pub between_day_style: StyleModifier,
    pub disabled_day_style: StyleModifier,
    pub focus_day_style: StyleModifier,
    pub focus_day_char: Option<char>,
    pub month_header_style: StyleModifier,
    pub month_header_text_style: TextFormatModifier,
    pub weekday_style: StyleModifier,
}

impl Default for Theme {
    fn default() -> Self {
        Theme::from(&ThemeConfig::default())
    }
}

impl From<&ThemeConfig> for Theme {
    fn from(config: &ThemeConfig) -> Self {
        fn fg(color: Option<ColorName>) -> StyleModifier {
            color.map_or(StyleModifier::default(), |c| {
                StyleModifier::default().fg_color(c.into())
            })
        }

        fn bg(color: Option<ColorName>) -> StyleModifier {
            color.map_or(StyleModifier::default(), |c| {
                StyleModifier::default().bg_color(c.into())
            })
        }

        Theme {
            day_style: StyleModifier::default(),
            day_text_style: TextFormatModifier::default(),
            today_day_style: StyleModifier::default().invert(true),
            today_day_text_style: TextFormatModifier::default().bold(true),
            today_day_char: config.today_char,
            selected_day_style: bg(config.selected_bg),
            between_day_style: bg(config.between_bg),
            disabled_day_style: fg(config.disabled_fg),
            focus_day_style: bg(config.focus_bg),
            focus_day_char: config.focus_char,
            month_header_style: fg(config.month_header_fg),
            month_header_text_style: TextFormatModifier::default().bold(true),
            weekday_style: fg(config.weekday_fg),
        }
    }
}

impl Theme {
    /// Disabled days keep their marker characters but not their class style.
    pub fn day_cell_style(&self, class: DayClass, disabled: bool) -> StyleModifier {
        if disabled {
            return self.disabled_day_style.format(self.day_text_style);
        }

        match class {
            DayClass::Today => self.today_day_style.format(self.today_day_text_style),
            DayClass::Selected => self.selected_day_style.format(self.day_text_style),
            DayClass::Between => self.between_day_style.format(self.day_text_style),
            DayClass::Default => self.day_style.format(self.day_text_style),
        }
    }
}

impl From<ColorName> for Color {
    fn from(name: ColorName) -> Self {
        match name {
            ColorName::Black => Color::Black,
            ColorName::Red => Color::Red,
            ColorName::Green => Color::Green,
            ColorName::Yellow => Color::Yellow,
            ColorName::Blue => Color::Blue,
            ColorName::Magenta => Color::Magenta,
            ColorName::Cyan => Color::Cyan,
            ColorName::White => Color::White,
            ColorName::LightBlack => Color::LightBlack,
            ColorName::LightRed => Color::LightRed,
            ColorName::LightGreen => Color::LightGreen,
            ColorName::LightYellow => Color::LightYellow,
            ColorName::LightBlue => Color::LightBlue,
            ColorName::LightMagenta => Color::LightMagenta,
            ColorName::LightCyan => Color::LightCyan,
            ColorName::LightWhite => Color::LightWhite,
        }
    }
}

pub struct Context {
    pub mode: Mode,
    pub theme: Theme,
    pub picker: RangePicker,
    pub cursor: NaiveDate,
    pub scroll: ScrollState,
    pub scrolloff: usize,
    pub output_format: String,
    pub command_line: PromptLine,
    pub last_error_message: Option<String>,
    pub quit: bool,
    follow_cursor: bool,
}

impl Context {
    pub fn new(config: &Config, picker: RangePicker) -> Self {
        Context {
            mode: Mode::Normal,
            theme: Theme::from(&config.theme),
            cursor: *picker.current(),
            picker,
            scroll: ScrollState::new(),
            scrolloff: config.scrolloff,
            output_format: config.output_format.clone(),
            command_line: PromptLine::with_prompt(":".to_owned()),
            last_error_message: None,
            quit: false,
            follow_cursor: false,
        }
    }

    pub fn layout(&self) -> CalendarLayout {
        CalendarLayout::new(&self.picker)
    }

    pub fn cursor(&self) -> &NaiveDate {
        &self.cursor
    }

    /// Moves the cursor to `date` if the date is part of the calendar.
    pub fn set_cursor(&mut self, date: NaiveDate) -> bool {
        if self.layout().position_of(&date).is_none() {
            return false;
        }
        self.cursor = date;
        self.follow_cursor = true;
        true
    }

    pub fn move_cursor(&mut self, days: i64) -> bool {
        match self.cursor.checked_add_signed(Duration::days(days)) {
            Some(date) => self.set_cursor(date),
            None => false,
        }
    }

    pub fn goto_today(&mut self) -> bool {
        let today = *self.picker.current();
        self.set_cursor(today)
    }

    /// Activates the day under the cursor.
    pub fn click_cursor(&mut self) {
        let day = self.cursor;
        self.picker.click(day);
        self.last_error_message = None;
    }

    pub fn selection_summary(&self) -> String {
        match self.picker.selection().as_slice() {
            [] => "no selection".to_owned(),
            [start] => format!("{}", start.format(&self.output_format)),
            [start, end, ..] => format!(
                "{} – {}",
                start.format(&self.output_format),
                end.format(&self.output_format)
            ),
        }
    }

    /// Brings the scroll state up to date before drawing a frame of
    /// `viewport` calendar lines.
    pub fn prepare_frame(&mut self, viewport: usize) {
        let layout = self.layout();

        self.scroll.align_to_current_month(self.picker.current(), &layout);
        self.scroll.update_metrics(&layout, viewport);

        if self.follow_cursor {
            self.follow_cursor = false;
            if let Some((line, _)) = layout.position_of(&self.cursor) {
                self.scroll.follow(line, self.scrolloff);
            }
        }
    }
}

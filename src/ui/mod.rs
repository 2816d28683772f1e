pub mod app;
pub mod calendar_window;
pub mod command;
pub mod context;
pub mod month_pane;
pub mod scroll;

pub use app::App;
pub use calendar_window::{CalendarLayout, CalendarWindow};
pub use context::{Context, Mode, Theme};
pub use month_pane::{DayCell, MonthPane};
pub use scroll::{BlockMeasure, BlockScroll, ScrollState};

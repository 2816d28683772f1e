pub mod config;
pub mod error;
pub mod events;
pub mod month;
pub mod picker;
pub mod selection;
pub mod ui;

pub use error::{Error, ErrorKind, Result};
pub use picker::{MonthEntry, RangePicker};
pub use selection::{DayClass, Selection};

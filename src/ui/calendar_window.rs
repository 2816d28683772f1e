use chrono::NaiveDate;
use std::fmt::Write;
use std::ops::Range;

use itertools::Itertools;
use unsegen::base::*;
use unsegen::widget::*;

use super::month_pane::{DayCell, Line, MonthPane, Segment};
use super::scroll::BlockMeasure;
use super::{Context, Theme};
use crate::picker::RangePicker;

/// All month blocks of the picker stacked into lines.
///
/// Rebuilt for every frame from the picker state.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarLayout {
    lines: Vec<Line>,
    blocks: Vec<Range<usize>>,
}

impl CalendarLayout {
    pub fn new(picker: &RangePicker) -> Self {
        let mut lines = Vec::new();
        let mut blocks = Vec::new();

        for entry in picker.month_window().iter() {
            let start = lines.len();
            lines.extend(MonthPane::new(entry, picker).lines());
            blocks.push(start..lines.len());
        }

        CalendarLayout { lines, blocks }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn block_lines(&self, index: usize) -> Option<Range<usize>> {
        self.blocks.get(index).cloned()
    }

    /// Line and column of the cell showing `date`.
    pub fn position_of(&self, date: &NaiveDate) -> Option<(usize, usize)> {
        self.lines.iter().enumerate().find_map(|(line_idx, line)| {
            line.iter()
                .position(|segment| matches!(segment, Segment::Day { date: d, .. } if d == date))
                .map(|col| (line_idx, col))
        })
    }

    /// Renders the layout without styles, one string per line.
    pub fn to_plain_text(&self, theme: &Theme) -> String {
        self.lines
            .iter()
            .map(|line| {
                line.iter()
                    .map(|segment| plain_segment(segment, theme))
                    .join("")
                    .trim_end()
                    .to_owned()
            })
            .join("\n")
    }
}

fn plain_segment(segment: &Segment, theme: &Theme) -> String {
    match segment {
        Segment::Title(title) => title.clone(),
        Segment::Weekday(label) => format!("{:>width$}", label, width = DayCell::CELL_WIDTH),
        Segment::Day {
            date,
            class,
            disabled,
        } => DayCell::new(date, *class, *disabled, theme).to_string(),
        Segment::Empty => " ".repeat(DayCell::CELL_WIDTH),
        Segment::Blank => String::new(),
    }
}

impl BlockMeasure for CalendarLayout {
    fn block_count(&self) -> usize {
        self.blocks.len()
    }

    fn block_start(&self, index: usize) -> Option<usize> {
        self.blocks.get(index).map(|block| block.start)
    }

    fn block_height(&self, index: usize) -> Option<usize> {
        self.blocks.get(index).map(|block| block.len())
    }

    fn content_height(&self) -> usize {
        self.lines.len()
    }
}

/// Scrollable stack of the month blocks.
pub struct CalendarWindow<'a> {
    context: &'a Context,
}

impl<'a> CalendarWindow<'a> {
    pub fn new(context: &'a Context) -> Self {
        CalendarWindow { context }
    }
}

impl Widget for CalendarWindow<'_> {
    fn space_demand(&self) -> Demand2D {
        Demand2D {
            width: ColDemand::at_least(MonthPane::COLUMNS * DayCell::CELL_WIDTH),
            height: RowDemand::at_least(MonthPane::HEADER_ROWS + 1),
        }
    }

    fn draw(&self, mut window: Window, _hints: RenderingHints) {
        let theme = &self.context.theme;
        let layout = self.context.layout();
        let height = window.get_height().raw_value().max(0) as usize;
        let offset = self.context.scroll.offset();

        let mut cursor = Cursor::new(&mut window).wrapping_mode(WrappingMode::NoWrap);

        for (row, line) in layout.lines().iter().skip(offset).take(height).enumerate() {
            cursor.move_to(ColIndex::new(0), RowIndex::new(row as i32));

            for segment in line.iter() {
                let written = match segment {
                    Segment::Title(title) => {
                        cursor.set_style_modifier(
                            theme
                                .month_header_style
                                .format(theme.month_header_text_style),
                        );
                        write!(&mut cursor, "{}", title)
                    }
                    Segment::Weekday(label) => {
                        cursor.set_style_modifier(theme.weekday_style);
                        write!(
                            &mut cursor,
                            "{:>width$}",
                            label,
                            width = DayCell::CELL_WIDTH
                        )
                    }
                    Segment::Day {
                        date,
                        class,
                        disabled,
                    } => {
                        let cell = DayCell::new(date, *class, *disabled, theme)
                            .focus(date == self.context.cursor());
                        cursor.set_style_modifier(cell.style());
                        if cell.is_focused() {
                            cursor.apply_style_modifier(theme.focus_day_style);
                        }
                        write!(&mut cursor, "{}", cell)
                    }
                    Segment::Empty => {
                        cursor.set_style_modifier(StyleModifier::default());
                        write!(&mut cursor, "{}", " ".repeat(DayCell::CELL_WIDTH))
                    }
                    Segment::Blank => Ok(()),
                };

                if let Err(err) = written {
                    log::warn!("Error while drawing calendar: {}", err);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn layout_has_twelve_contiguous_blocks() {
        let picker = RangePicker::with_current(ymd(2024, 11, 5));
        let layout = CalendarLayout::new(&picker);

        assert_eq!(layout.block_count(), 12);
        let mut expected_start = 0;
        for idx in 0..12 {
            let block = layout.block_lines(idx).unwrap();
            assert_eq!(block.start, expected_start);
            expected_start = block.end;
        }
        assert_eq!(expected_start, layout.content_height());
        assert_eq!(layout.block_lines(12), None);
    }

    #[test]
    fn block_order_starts_at_current_month() {
        let picker = RangePicker::with_current(ymd(2024, 11, 5));
        let layout = CalendarLayout::new(&picker);

        let titles: Vec<&str> = layout
            .lines()
            .iter()
            .filter_map(|line| match line.first() {
                Some(Segment::Title(title)) => Some(title.as_str()),
                _ => None,
            })
            .collect();

        assert_eq!(titles.len(), 12);
        assert_eq!(titles[0], "Ноябрь 2024г");
        assert_eq!(titles[1], "Декабрь 2024г");
        assert_eq!(titles[2], "Январь 2024г");
        assert_eq!(titles[11], "Октябрь 2024г");
    }

    #[test]
    fn block_heights_follow_week_count() {
        // February 2021 fits exactly into four weeks
        let picker = RangePicker::with_current(ymd(2021, 2, 1));
        let layout = CalendarLayout::new(&picker);
        assert_eq!(layout.block_height(0), Some(2 + 4 + 1));
    }

    #[test]
    fn positions_of_rendered_dates() {
        let picker = RangePicker::with_current(ymd(2024, 5, 10));
        let layout = CalendarLayout::new(&picker);

        // Title and weekday line precede the first week, May 1 is a Wednesday
        assert_eq!(layout.position_of(&ymd(2024, 5, 1)), Some((2, 2)));
        assert_eq!(layout.position_of(&ymd(2023, 12, 31)), None);
    }

    #[test]
    fn plain_text_rendering() {
        let picker = RangePicker::with_current(ymd(2024, 5, 10));
        let layout = CalendarLayout::new(&picker);
        let text = layout.to_plain_text(&Theme::default());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Май 2024г");
        assert_eq!(lines[1], "  Пн  Вт  Ср  Чт  Пт  Сб  Вс");
        assert_eq!(lines[2], "           1   2   3   4   5");
        assert_eq!(lines[3], "   6   7   8   9* 10  11  12");
    }
}

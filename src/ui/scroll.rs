use chrono::{Datelike, NaiveDate};
use unsegen::input::{OperationResult, Scrollable};

/// Vertical extent of the rendered month blocks, measured in lines.
pub trait BlockMeasure {
    fn block_count(&self) -> usize;
    fn block_start(&self, index: usize) -> Option<usize>;
    fn block_height(&self, index: usize) -> Option<usize>;
    fn content_height(&self) -> usize;
}

/// Line offset of the calendar window.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollState {
    offset: usize,
    viewport: usize,
    content: usize,
    block_starts: Vec<usize>,
    aligned_for: Option<NaiveDate>,
}

impl ScrollState {
    pub fn new() -> Self {
        ScrollState::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn max_offset(&self) -> usize {
        self.content.saturating_sub(self.viewport)
    }

    /// Records the current layout and viewport, pulling the offset back into
    /// range the way a scroll container clamps its position.
    pub fn update_metrics<M: BlockMeasure>(&mut self, measure: &M, viewport: usize) {
        self.viewport = viewport;
        self.content = measure.content_height();
        self.block_starts = (0..measure.block_count())
            .filter_map(|idx| measure.block_start(idx))
            .collect();
        self.offset = self.offset.min(self.max_offset());
    }

    /// Scrolls to `block_height(m) * m` where `m` is the zero-based month of
    /// `current`, treating every block as high as block `m`.
    ///
    /// Runs once per distinct `current`. Does nothing if there is no block at
    /// position `m`.
    pub fn align_to_current_month<M: BlockMeasure>(&mut self, current: &NaiveDate, measure: &M) {
        if self.aligned_for.as_ref() == Some(current) {
            return;
        }
        self.aligned_for = Some(*current);

        let month_index = current.month0() as usize;
        if let Some(height) = measure.block_height(month_index) {
            self.offset = height * month_index;
            log::debug!("aligned calendar to line {}", self.offset);
        }
    }

    /// Keeps `line` within the viewport with `scrolloff` lines of margin.
    pub fn follow(&mut self, line: usize, scrolloff: usize) {
        if self.viewport == 0 {
            return;
        }
        let margin = scrolloff.min(self.viewport.saturating_sub(1) / 2);

        if line < self.offset + margin {
            self.offset = line.saturating_sub(margin);
        } else if line + margin >= self.offset + self.viewport {
            self.offset = line + margin + 1 - self.viewport;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn scroll_to_next_block(&mut self) -> OperationResult {
        let max = self.max_offset();
        match self.block_starts.iter().find(|&&start| start > self.offset) {
            Some(&start) if self.offset < max => {
                self.offset = start.min(max);
                Ok(())
            }
            _ => Err(()),
        }
    }

    pub fn scroll_to_prev_block(&mut self) -> OperationResult {
        match self
            .block_starts
            .iter()
            .rev()
            .find(|&&start| start < self.offset)
        {
            Some(&start) => {
                self.offset = start;
                Ok(())
            }
            None => Err(()),
        }
    }
}

impl Scrollable for ScrollState {
    fn scroll_backwards(&mut self) -> OperationResult {
        if self.offset > 0 {
            self.offset -= 1;
            Ok(())
        } else {
            Err(())
        }
    }

    fn scroll_forwards(&mut self) -> OperationResult {
        if self.offset < self.max_offset() {
            self.offset += 1;
            Ok(())
        } else {
            Err(())
        }
    }
}

/// Scrolls by whole month blocks.
pub struct BlockScroll<'a>(pub &'a mut ScrollState);

impl Scrollable for BlockScroll<'_> {
    fn scroll_backwards(&mut self) -> OperationResult {
        self.0.scroll_to_prev_block()
    }

    fn scroll_forwards(&mut self) -> OperationResult {
        self.0.scroll_to_next_block()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Blocks(Vec<usize>);

    impl BlockMeasure for Blocks {
        fn block_count(&self) -> usize {
            self.0.len()
        }

        fn block_start(&self, index: usize) -> Option<usize> {
            if index < self.0.len() {
                Some(self.0[..index].iter().sum())
            } else {
                None
            }
        }

        fn block_height(&self, index: usize) -> Option<usize> {
            self.0.get(index).copied()
        }

        fn content_height(&self) -> usize {
            self.0.iter().sum()
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn alignment_uses_height_times_month_index() {
        let blocks = Blocks(vec![8, 9, 8, 8, 9, 8, 8, 8, 9, 8, 8, 8]);
        let mut scroll = ScrollState::new();

        scroll.align_to_current_month(&ymd(2024, 4, 3), &blocks);
        assert_eq!(scroll.offset(), 8 * 3);
    }

    #[test]
    fn alignment_runs_once_per_date() {
        let blocks = Blocks(vec![8; 12]);
        let mut scroll = ScrollState::new();
        scroll.update_metrics(&blocks, 20);

        scroll.align_to_current_month(&ymd(2024, 3, 3), &blocks);
        assert_eq!(scroll.offset(), 16);

        scroll.scroll_forwards().unwrap();
        scroll.align_to_current_month(&ymd(2024, 3, 3), &blocks);
        assert_eq!(scroll.offset(), 17);
    }

    #[test]
    fn missing_block_is_tolerated() {
        let blocks = Blocks(vec![8, 8]);
        let mut scroll = ScrollState::new();
        scroll.align_to_current_month(&ymd(2024, 6, 1), &blocks);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn offset_is_clamped_to_content() {
        let blocks = Blocks(vec![8; 12]);
        let mut scroll = ScrollState::new();
        scroll.align_to_current_month(&ymd(2024, 12, 1), &blocks);
        assert_eq!(scroll.offset(), 88);

        scroll.update_metrics(&blocks, 40);
        assert_eq!(scroll.offset(), 96 - 40);
        assert!(scroll.scroll_forwards().is_err());
        assert!(scroll.scroll_backwards().is_ok());
    }

    #[test]
    fn follow_keeps_margin() {
        let blocks = Blocks(vec![8; 12]);
        let mut scroll = ScrollState::new();
        scroll.update_metrics(&blocks, 10);

        scroll.follow(15, 2);
        assert_eq!(scroll.offset(), 8);

        scroll.follow(9, 2);
        assert_eq!(scroll.offset(), 7);

        scroll.follow(0, 2);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn block_scrolling_snaps_to_block_starts() {
        let blocks = Blocks(vec![8; 12]);
        let mut scroll = ScrollState::new();
        scroll.update_metrics(&blocks, 10);

        BlockScroll(&mut scroll).scroll_forwards().unwrap();
        assert_eq!(scroll.offset(), 8);
        scroll.scroll_forwards().unwrap();
        BlockScroll(&mut scroll).scroll_backwards().unwrap();
        assert_eq!(scroll.offset(), 8);
        BlockScroll(&mut scroll).scroll_backwards().unwrap();
        assert_eq!(scroll.offset(), 0);
        assert!(BlockScroll(&mut scroll).scroll_backwards().is_err());
    }
}

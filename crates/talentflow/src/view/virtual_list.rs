//! Windowing over long row lists.
//!
//! Only rows that intersect the viewport, plus `overscan` rows on either
//! side, are handed out for rendering. Rows start at the estimated size and
//! can be corrected with [`VirtualList::measure`].

use std::ops::Range;

pub const ESTIMATED_ROW_SIZE: u32 = 120;
pub const OVERSCAN: usize = 5;

/// One row placed in the scroll space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualItem {
    pub index: usize,
    pub start: u64,
    pub size: u32,
}

impl VirtualItem {
    pub fn end(&self) -> u64 {
        self.start + u64::from(self.size)
    }
}

#[derive(Debug, Clone)]
pub struct VirtualList {
    sizes: Vec<u32>,
    estimate: u32,
    overscan: usize,
    scroll_offset: u64,
    viewport: u64,
}

impl VirtualList {
    pub fn new(count: usize) -> Self {
        Self::with_estimate(count, ESTIMATED_ROW_SIZE, OVERSCAN)
    }

    pub fn with_estimate(count: usize, estimate: u32, overscan: usize) -> Self {
        Self {
            sizes: vec![estimate; count],
            estimate,
            overscan,
            scroll_offset: 0,
            viewport: 0,
        }
    }

    pub fn count(&self) -> usize {
        self.sizes.len()
    }

    /// Resizes the list. Measurements of surviving rows are kept.
    pub fn set_count(&mut self, count: usize) {
        self.sizes.resize(count, self.estimate);
        self.scroll_offset = self.scroll_offset.min(self.max_offset());
    }

    pub fn set_viewport(&mut self, height: u64) {
        self.viewport = height;
    }

    pub fn scroll_to(&mut self, offset: u64) {
        self.scroll_offset = offset.min(self.max_offset());
    }

    /// Brings row `index` to the top of the viewport.
    pub fn scroll_to_index(&mut self, index: usize) {
        let offset = self.start_of(index.min(self.count()));
        self.scroll_to(offset);
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    /// Records the rendered size of row `index`.
    pub fn measure(&mut self, index: usize, size: u32) {
        if let Some(slot) = self.sizes.get_mut(index) {
            *slot = size;
        }
    }

    /// Height of the whole scroll space.
    pub fn total_size(&self) -> u64 {
        self.sizes.iter().map(|s| u64::from(*s)).sum()
    }

    /// Indices of the rows to render.
    pub fn range(&self) -> Range<usize> {
        if self.sizes.is_empty() {
            return 0..0;
        }

        let top = self.scroll_offset;
        let bottom = top + self.viewport;

        let mut start = 0u64;
        let mut first = None;
        let mut last = 0;
        for (index, size) in self.sizes.iter().enumerate() {
            let end = start + u64::from(*size);
            if end > top && first.is_none() {
                first = Some(index);
            }
            if start <= bottom {
                last = index;
            } else {
                break;
            }
            start = end;
        }

        let first = first.unwrap_or(self.sizes.len() - 1).min(last);
        let from = first.saturating_sub(self.overscan);
        let to = (last + self.overscan + 1).min(self.sizes.len());
        from..to
    }

    pub fn virtual_items(&self) -> Vec<VirtualItem> {
        let range = self.range();
        let mut start = self.start_of(range.start);
        range
            .map(|index| {
                let size = self.sizes[index];
                let item = VirtualItem { index, start, size };
                start += u64::from(size);
                item
            })
            .collect()
    }

    fn start_of(&self, index: usize) -> u64 {
        self.sizes[..index].iter().map(|s| u64::from(*s)).sum()
    }

    fn max_offset(&self) -> u64 {
        self.total_size().saturating_sub(self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_list_renders_nothing() {
        let mut list = VirtualList::new(0);
        list.set_viewport(600);
        assert_eq!(list.range(), 0..0);
        assert!(list.virtual_items().is_empty());
        assert_eq!(list.total_size(), 0);
    }

    #[test]
    fn test_top_of_list_overscans_below() {
        let mut list = VirtualList::new(1000);
        list.set_viewport(600);

        // Rows 0..=5 touch the viewport, plus five below.
        assert_eq!(list.range(), 0..11);
        assert_eq!(list.total_size(), 120_000);
    }

    #[test]
    fn test_scrolled_window_overscans_both_sides() {
        let mut list = VirtualList::new(1000);
        list.set_viewport(600);
        list.scroll_to(12_000);

        let range = list.range();
        assert_eq!(range, 95..111);
        assert!(range.len() <= 6 + 1 + 2 * OVERSCAN);

        let items = list.virtual_items();
        assert_eq!(items[0].index, 95);
        assert_eq!(items[0].start, 95 * 120);
        assert_eq!(items[1].start, items[0].end());
    }

    #[test]
    fn test_scroll_is_clamped_to_content() {
        let mut list = VirtualList::new(10);
        list.set_viewport(600);
        list.scroll_to(1_000_000);
        assert_eq!(list.scroll_offset(), 1200 - 600);
        assert_eq!(list.range().end, 10);

        list.set_count(3);
        assert_eq!(list.scroll_offset(), 0);
        assert_eq!(list.range(), 0..3);
    }

    #[test]
    fn test_measurements_shift_later_rows() {
        let mut list = VirtualList::with_estimate(5, 100, 0);
        list.set_viewport(100);
        list.measure(0, 300);

        assert_eq!(list.total_size(), 700);
        list.scroll_to_index(1);
        assert_eq!(list.scroll_offset(), 300);
        assert_eq!(list.virtual_items()[0].index, 1);
    }
}

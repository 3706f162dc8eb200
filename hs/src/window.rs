//! Page window arithmetic
//!
//! A page window is the contiguous slice `[(page-1)*limit, page*limit)` of a
//! sequence. [`BlockWindows`] applies one window to a sequence made of
//! consecutive blocks (one per narrator) and yields, for every block that
//! intersects the window, the block index and the range local to that block.
//! None of this touches storage, so the boundary cases are tested here.

use std::ops::Range;

/// The slice of a global sequence selected by `(page, limit)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    start: usize,
    len: usize,
}

impl PageWindow {
    /// `page` is 1-based
    pub fn new(page: usize, limit: usize) -> Self {
        debug_assert!(page >= 1, "page is 1-based");
        Self {
            start: page.saturating_sub(1).saturating_mul(limit),
            len: limit,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    /// Exclusive end of the window, ignoring the sequence length
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    /// The window clipped to a sequence of `total` items
    pub fn range(&self, total: usize) -> Range<usize> {
        self.start.min(total)..self.end().min(total)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start && index < self.end()
    }

    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[self.range(items.len())]
    }
}

/// Part of one block that falls inside the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSlice {
    /// Position of the block in the block sequence
    pub block: usize,
    /// Range local to the block
    pub range: Range<usize>,
}

/// Walks consecutive block sizes and yields the slices that fall in a window.
///
/// Stops pulling sizes as soon as the running offset reaches the window end,
/// so blocks after the window are never inspected.
pub struct BlockWindows<I> {
    sizes: I,
    window: PageWindow,
    offset: usize,
    next_block: usize,
}

impl<I> BlockWindows<I>
where
    I: Iterator<Item = usize>,
{
    pub fn new(sizes: impl IntoIterator<IntoIter = I>, window: PageWindow) -> Self {
        Self {
            sizes: sizes.into_iter(),
            window,
            offset: 0,
            next_block: 0,
        }
    }
}

impl<I> Iterator for BlockWindows<I>
where
    I: Iterator<Item = usize>,
{
    type Item = BlockSlice;

    fn next(&mut self) -> Option<Self::Item> {
        while self.offset < self.window.end() {
            let size = self.sizes.next()?;
            let block = self.next_block;
            let block_start = self.offset;
            self.next_block += 1;
            self.offset += size;

            let lo = self.window.start().max(block_start);
            let hi = self.window.end().min(self.offset);
            if lo < hi {
                return Some(BlockSlice {
                    block,
                    range: (lo - block_start)..(hi - block_start),
                });
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn slices(sizes: &[usize], page: usize, limit: usize) -> Vec<BlockSlice> {
        BlockWindows::new(sizes.iter().copied(), PageWindow::new(page, limit)).collect()
    }

    #[test]
    fn test_window_range() {
        let window = PageWindow::new(3, 10);
        assert_eq!(window.start(), 20);
        assert_eq!(window.end(), 30);
        assert_eq!(window.range(25), 20..25);
        assert_eq!(window.range(100), 20..30);
    }

    #[test]
    fn test_window_past_end_is_empty() {
        let window = PageWindow::new(4, 10);
        assert!(window.range(25).is_empty());

        let items: Vec<u32> = (0..25).collect();
        assert!(window.slice(&items).is_empty());
    }

    #[test]
    fn test_window_contains() {
        let window = PageWindow::new(2, 5);
        assert!(!window.contains(4));
        assert!(window.contains(5));
        assert!(window.contains(9));
        assert!(!window.contains(10));
    }

    #[test]
    fn test_huge_page_does_not_overflow() {
        let window = PageWindow::new(usize::MAX, 100);
        assert!(window.range(1_000).is_empty());
    }

    #[test]
    fn test_window_spans_block_boundary() {
        assert_eq!(
            slices(&[3, 3], 1, 4),
            vec![
                BlockSlice { block: 0, range: 0..3 },
                BlockSlice { block: 1, range: 0..1 },
            ]
        );
        assert_eq!(slices(&[3, 3], 2, 4), vec![BlockSlice { block: 1, range: 1..3 }]);
        assert!(slices(&[3, 3], 3, 4).is_empty());
    }

    #[test]
    fn test_window_skips_empty_blocks() {
        assert_eq!(
            slices(&[0, 2, 0, 0, 2], 1, 3),
            vec![
                BlockSlice { block: 1, range: 0..2 },
                BlockSlice { block: 4, range: 0..1 },
            ]
        );
    }

    #[test]
    fn test_window_ending_on_block_boundary() {
        assert_eq!(slices(&[5, 5], 1, 5), vec![BlockSlice { block: 0, range: 0..5 }]);
        assert_eq!(slices(&[5, 5], 2, 5), vec![BlockSlice { block: 1, range: 0..5 }]);
    }

    #[test]
    fn test_stops_pulling_sizes_after_window() {
        let mut pulled = 0;
        let sizes = [10, 10, 10, 10].into_iter().inspect(|_| pulled += 1);
        let found: Vec<_> = BlockWindows::new(sizes, PageWindow::new(1, 10)).collect();

        assert_eq!(found, vec![BlockSlice { block: 0, range: 0..10 }]);
        assert_eq!(pulled, 1);
    }

    proptest! {
        #[test]
        fn prop_matches_concatenated_slice(
            sizes in proptest::collection::vec(0usize..20, 0..8),
            page in 1usize..12,
            limit in 1usize..15,
        ) {
            // Tag every item with (block, local index) and slice the flat sequence
            let flat: Vec<(usize, usize)> = sizes
                .iter()
                .enumerate()
                .flat_map(|(b, &n)| (0..n).map(move |i| (b, i)))
                .collect();
            let expected = PageWindow::new(page, limit).slice(&flat).to_vec();

            let actual: Vec<(usize, usize)> = slices(&sizes, page, limit)
                .into_iter()
                .flat_map(|s| s.range.map(move |i| (s.block, i)))
                .collect();

            prop_assert_eq!(actual, expected);
        }
    }
}

//! Offset pagination control.

/// `ceil(total / size)`; zero when either is zero.
pub fn total_pages(total_count: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(u64::from(page_size)).min(u64::from(u32::MAX)) as u32
}

/// Inputs of the control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
}

/// What the control shows. Only exists when there is something to page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    pub page: u32,
    pub total_pages: u32,
    pub total_count: u64,
    pub has_prev: bool,
    pub has_next: bool,
    /// 1-based range of the rows on this page.
    pub first_item: u64,
    pub last_item: u64,
    /// Page links around the current page (0-based).
    pub window: Vec<u32>,
}

const WINDOW: u32 = 2;

impl Pagination {
    pub fn new(page: u32, page_size: u32, total_count: u64) -> Self {
        Self {
            page,
            page_size,
            total_count,
        }
    }

    pub fn total_pages(&self) -> u32 {
        total_pages(self.total_count, self.page_size)
    }

    /// Clamp a requested page into `[0, total_pages - 1]`.
    pub fn clamp(&self, target: i64) -> u32 {
        let last = i64::from(self.total_pages().saturating_sub(1));
        target.clamp(0, last) as u32
    }

    pub fn prev(&self) -> Option<u32> {
        (self.page > 0).then(|| self.page - 1)
    }

    pub fn next(&self) -> Option<u32> {
        (self.page + 1 < self.total_pages()).then(|| self.page + 1)
    }

    /// `None` when there are no rows; the table shows the empty state then.
    pub fn view(&self) -> Option<PaginationView> {
        let total_pages = self.total_pages();
        if total_pages == 0 {
            return None;
        }
        let page = self.clamp(i64::from(self.page));
        let first_item = u64::from(page) * u64::from(self.page_size) + 1;
        let last_item = (first_item + u64::from(self.page_size) - 1).min(self.total_count);
        let lo = page.saturating_sub(WINDOW);
        let hi = (page + WINDOW).min(total_pages - 1);

        Some(PaginationView {
            page,
            total_pages,
            total_count: self.total_count,
            has_prev: page > 0,
            has_next: page + 1 < total_pages,
            first_item,
            last_item,
            window: (lo..=hi).collect(),
        })
    }
}

impl PaginationView {
    pub fn summary(&self) -> String {
        format!(
            "Showing {}-{} of {} (page {} of {})",
            self.first_item,
            self.last_item,
            self.total_count,
            self.page + 1,
            self.total_pages
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_to_render_without_rows() {
        assert_eq!(Pagination::new(0, 10, 0).view(), None);
    }

    #[test]
    fn first_and_last_page_disable_their_edge() {
        let first = Pagination::new(0, 10, 57).view().unwrap();
        assert!(!first.has_prev);
        assert!(first.has_next);
        assert_eq!(first.total_pages, 6);

        let last = Pagination::new(5, 10, 57).view().unwrap();
        assert!(last.has_prev);
        assert!(!last.has_next);
        assert_eq!((last.first_item, last.last_item), (51, 57));
        assert_eq!(last.summary(), "Showing 51-57 of 57 (page 6 of 6)");
    }

    #[test]
    fn window_surrounds_current_page() {
        let v = Pagination::new(4, 10, 200).view().unwrap();
        assert_eq!(v.window, vec![2, 3, 4, 5, 6]);
        assert!(v.has_prev && v.has_next);
    }

    #[test]
    fn prev_next_stay_in_range() {
        let p = Pagination::new(0, 10, 15);
        assert_eq!(p.prev(), None);
        assert_eq!(p.next(), Some(1));
        assert_eq!(Pagination::new(1, 10, 15).next(), None);
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clamp_stays_within_bounds(
                total in 1u64..10_000,
                size in 1u32..200,
                target in -1_000i64..1_000,
            ) {
                let p = Pagination::new(0, size, total);
                let clamped = p.clamp(target);
                prop_assert!(clamped < p.total_pages());
            }

            #[test]
            fn total_pages_covers_every_row(total in 0u64..100_000, size in 1u32..500) {
                let pages = u64::from(total_pages(total, size));
                prop_assert!(pages * u64::from(size) >= total);
                prop_assert!(pages == 0 || (pages - 1) * u64::from(size) < total);
            }

            #[test]
            fn next_disabled_exactly_on_last_page(total in 1u64..5_000, size in 1u32..100, page in 0u32..200) {
                let p = Pagination::new(page, size, total);
                let v = p.view().unwrap();
                prop_assert_eq!(v.has_next, v.page + 1 < v.total_pages);
                prop_assert_eq!(v.has_prev, v.page > 0);
            }
        }
    }
}

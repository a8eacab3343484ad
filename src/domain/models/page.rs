//! Offset pagination.

use serde::{Deserialize, Serialize};

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PER_PAGE: u32 = 10;

/// A requested page window. Pages are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageRequest {
    /// Build a request from raw query input.
    ///
    /// A missing or zero page becomes 1, a missing or zero size becomes
    /// `default_per_page`, and sizes are capped at `max_per_page`.
    pub fn from_query(
        page: Option<u32>,
        per_page: Option<u32>,
        default_per_page: u32,
        max_per_page: u32,
    ) -> Self {
        let page = page.filter(|p| *p > 0).unwrap_or(1);
        let per_page = per_page
            .filter(|p| *p > 0)
            .unwrap_or(default_per_page)
            .min(max_per_page)
            .max(1);
        Self { page, per_page }
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.per_page)
    }

    /// Slice an already-ordered collection down to this window.
    pub fn paginate<T: Clone>(&self, items: &[T]) -> Page<T> {
        let total = items.len() as u64;
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX).min(items.len());
        let end = start.saturating_add(self.per_page as usize).min(items.len());
        Page {
            items: items[start..end].to_vec(),
            total,
            per_page: self.per_page,
            current_page: self.page,
        }
    }
}

/// One page of results plus the metadata needed to navigate the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub per_page: u32,
    pub current_page: u32,
}

impl<T> Page<T> {
    /// Last page number; 1 for an empty result.
    pub fn last_page(&self) -> u32 {
        if self.total == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(u64::from(self.per_page.max(1)));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// 1-based position of the first item on this page.
    pub fn from(&self) -> Option<u64> {
        if self.items.is_empty() {
            None
        } else {
            Some(u64::from(self.current_page.saturating_sub(1)) * u64::from(self.per_page) + 1)
        }
    }

    /// 1-based position of the last item on this page.
    pub fn to(&self) -> Option<u64> {
        self.from().map(|from| from + self.items.len() as u64 - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_query_defaults() {
        let req = PageRequest::from_query(None, None, 10, 100);
        assert_eq!(req, PageRequest { page: 1, per_page: 10 });

        let req = PageRequest::from_query(Some(0), Some(0), 15, 100);
        assert_eq!(req, PageRequest { page: 1, per_page: 15 });

        let req = PageRequest::from_query(Some(3), Some(500), 10, 100);
        assert_eq!(req, PageRequest { page: 3, per_page: 100 });
    }

    #[test]
    fn test_paginate_middle_page() {
        let items: Vec<u32> = (1..=25).collect();
        let page = PageRequest { page: 2, per_page: 10 }.paginate(&items);

        assert_eq!(page.items, (11..=20).collect::<Vec<_>>());
        assert_eq!(page.total, 25);
        assert_eq!(page.last_page(), 3);
        assert_eq!(page.from(), Some(11));
        assert_eq!(page.to(), Some(20));
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let items: Vec<u32> = (1..=5).collect();
        let page = PageRequest { page: 4, per_page: 10 }.paginate(&items);

        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
        assert_eq!(page.from(), None);
        assert_eq!(page.to(), None);
    }

    #[test]
    fn test_empty_collection_has_one_page() {
        let page = PageRequest::default().paginate::<u32>(&[]);
        assert_eq!(page.last_page(), 1);
    }

    proptest! {
        #[test]
        fn prop_pages_partition_collection(len in 0usize..200, per_page in 1u32..30) {
            let items: Vec<usize> = (0..len).collect();
            let first = PageRequest { page: 1, per_page }.paginate(&items);
            let last_page = first.last_page();

            let mut seen = Vec::new();
            for page in 1..=last_page {
                let p = PageRequest { page, per_page }.paginate(&items);
                prop_assert!(p.items.len() <= per_page as usize);
                prop_assert_eq!(p.total, len as u64);
                seen.extend(p.items);
            }
            prop_assert_eq!(seen, items);
        }

        #[test]
        fn prop_from_to_bounds(len in 1usize..200, per_page in 1u32..30, page in 1u32..20) {
            let items: Vec<usize> = (0..len).collect();
            let p = PageRequest { page, per_page }.paginate(&items);
            if let (Some(from), Some(to)) = (p.from(), p.to()) {
                prop_assert!(from <= to);
                prop_assert!(to <= len as u64);
                prop_assert_eq!(to - from + 1, p.items.len() as u64);
            } else {
                prop_assert!(p.items.is_empty());
            }
        }
    }
}

//! Fixed-size page slicing.

use serde::Serialize;

/// Results per page on the search page
pub const SEARCH_PAGE_SIZE: usize = 18;
/// Results added by each "show more" click in the similar listings block
pub const RELATED_PAGE_SIZE: usize = 6;

/// One page of results plus the totals the pager needs
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based page number that was requested
    pub page: usize,
    pub total_pages: usize,
    pub total_count: usize,
}

/// Slice page `page` (1-based) out of `items`.
///
/// A page outside `1..=total_pages` is empty rather than clamped; use
/// [`clamp_page`] first if that is not what the caller wants. A page size of
/// zero is treated as one.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_count = items.len();
    let total_pages = total_count.div_ceil(page_size);

    let slice: &[T] = match page.checked_sub(1) {
        Some(index) => {
            let start = index.saturating_mul(page_size).min(total_count);
            let end = start.saturating_add(page_size).min(total_count);
            &items[start..end]
        }
        None => &[],
    };

    Page {
        items: slice.to_vec(),
        page,
        total_pages,
        total_count,
    }
}

/// Bring a requested page into `1..=total_pages` (page 1 when there are none).
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn pages_cover_every_item_once(len in 0usize..100, page_size in 1usize..25) {
            let items: Vec<usize> = (0..len).collect();
            let total_pages = paginate(&items, 1, page_size).total_pages;

            let mut joined = Vec::new();
            for page in 1..=total_pages {
                joined.extend(paginate(&items, page, page_size).items);
            }
            prop_assert_eq!(joined, items);
            prop_assert!(paginate(&(0..len).collect::<Vec<_>>(), total_pages + 1, page_size).items.is_empty());
        }
    }
}

//! Split the materialized item list into fixed-size display pages.

/// Number of pages needed for `total_items` at `items_per_page` each.
/// An empty list has zero pages. A capacity of zero is treated as one.
pub fn total_pages(total_items: usize, items_per_page: usize) -> usize {
    total_items.div_ceil(items_per_page.max(1))
}

/// True when the items do not fit on one page and the carousel must rotate.
pub fn needs_rotation(total_items: usize, items_per_page: usize) -> bool {
    total_items > items_per_page.max(1)
}

/// Consecutive pages of at most `items_per_page` items; the last page may be
/// shorter.
pub fn paginate<T>(items: &[T], items_per_page: usize) -> Vec<&[T]> {
    items.chunks(items_per_page.max(1)).collect()
}

/// The slice shown on page `index`, or an empty slice past the end.
pub fn page_slice<T>(items: &[T], items_per_page: usize, index: usize) -> &[T] {
    let per_page = items_per_page.max(1);
    let start = index.saturating_mul(per_page).min(items.len());
    let end = start.saturating_add(per_page).min(items.len());
    &items[start..end]
}

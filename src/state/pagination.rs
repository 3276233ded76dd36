//! Page-count policy.

/// Total number of pages for `total_count` results at `per_page` results
/// per page: ceiling division, with zero results yielding zero pages.
///
/// `per_page` must be >= 1; configuration enforces this before the value
/// reaches the core.
pub fn total_pages(total_count: u32, per_page: u32) -> u32 {
    debug_assert!(per_page >= 1, "per_page must be >= 1");
    if total_count == 0 {
        0
    } else {
        total_count.div_ceil(per_page)
    }
}

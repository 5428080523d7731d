//! Page-size clamping and offset arithmetic for book listings.

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
/// Page number used when the caller does not supply one.
pub const DEFAULT_PAGE: i64 = 1;
/// Largest page size a listing will return.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A normalized listing window.
///
/// The clamp is one-sided: any `page_size` outside `0..=100`, negative
/// values included, becomes exactly [`MAX_PAGE_SIZE`]. `page` is taken
/// as given, so `page <= 0` produces a negative offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    pub fn new(page: i64, page_size: i64) -> Self {
        let page_size = if !(0..=MAX_PAGE_SIZE).contains(&page_size) {
            MAX_PAGE_SIZE
        } else {
            page_size
        };
        Self { page, page_size }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    /// Row limit after clamping.
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Rows to skip: `(page - 1) * page_size`, saturating at the `i64` bounds.
    pub fn offset(&self) -> i64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

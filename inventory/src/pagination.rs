//! Offset based pagination.
//!
//! A [`Pagination`] is what the user asks for (page number and page size), the `(offset,
//! limit)` pair is what the SQL statements need, and a [`Page`] is what comes back.
//!
//! Whether there is a next page is guessed from the number of rows returned: a full page
//! suggests there may be more. When the total number of rows is an exact multiple of the
//! page size the last page will claim there is a next one, which then turns out empty. Use
//! the exact `count_*` operations of the repositories where that matters.
use crate::error::InventoryError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_index: u32,
    page_size: u32,
}

impl Pagination {
    /// # Errors
    /// [`InventoryError::Validation`] if `page_size` is zero.
    pub fn new(page_index: u32, page_size: u32) -> Result<Self, InventoryError> {
        if page_size == 0 {
            return Err(InventoryError::Validation(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            page_index,
            page_size,
        })
    }

    #[must_use]
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Rows to skip and rows to fetch.
    #[must_use]
    pub fn offset_limit(&self) -> (u64, u32) {
        (
            u64::from(self.page_index) * u64::from(self.page_size),
            self.page_size,
        )
    }
}

/// Page number for a raw `offset`/`limit` pair. The offset must fall on a page boundary,
/// otherwise rows before it would not be reachable through page navigation.
///
/// # Errors
/// [`InventoryError::Validation`] if `limit` is zero or `offset` is not a multiple of it.
pub fn page_index_of(offset: u64, limit: u32) -> Result<u32, InventoryError> {
    if limit == 0 {
        return Err(InventoryError::Validation(
            "limit must be at least 1".to_string(),
        ));
    }
    if offset % u64::from(limit) != 0 {
        return Err(InventoryError::Validation(format!(
            "offset {offset} is not a multiple of the limit {limit}"
        )));
    }
    u32::try_from(offset / u64::from(limit))
        .map_err(|_| InventoryError::Validation(format!("offset {offset} is out of range")))
}

/// An ordered slice of a larger ordered result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    items: Vec<T>,
    page_index: u32,
    page_size: u32,
}

impl<T> Page<T> {
    #[must_use]
    pub fn new(items: Vec<T>, page_index: u32, page_size: u32) -> Self {
        Self {
            items,
            page_index,
            page_size,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// A full page suggests more rows follow.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.items.len() >= self.page_size as usize
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page_index > 0
    }

    #[must_use]
    pub fn next_index(&self) -> Option<u32> {
        if self.has_next() {
            self.page_index.checked_add(1)
        } else {
            None
        }
    }

    #[must_use]
    pub fn previous_index(&self) -> Option<u32> {
        self.page_index.checked_sub(1)
    }

    /// Number of pages needed for `total` rows with this page size.
    #[must_use]
    pub fn total_pages(&self, total: i64) -> u64 {
        let total = u64::try_from(total).unwrap_or(0);
        total.div_ceil(u64::from(self.page_size.max(1)))
    }
}

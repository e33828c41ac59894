//! Pagination window and page results for repository queries

/// Row window for list queries
///
/// `offset` is always a row count here; page-number conventions are
/// resolved before reaching the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Number of rows to skip
    pub offset: u64,
    /// Maximum number of rows to return
    pub limit: u64,
}

impl Pagination {
    /// Create a new pagination window
    pub fn new(offset: u64, limit: u64) -> Self {
        Self { offset, limit }
    }

    /// First `limit` rows
    pub fn first_page(limit: u64) -> Self {
        Self::new(0, limit)
    }
}

/// One page of records plus the unfiltered total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Records in this window, ordered by id ascending
    pub records: Vec<T>,
    /// Total number of records in the store
    pub total: u64,
}

impl<T> Page<T> {
    /// Create a page
    pub fn new(records: Vec<T>, total: u64) -> Self {
        Self { records, total }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_page() {
        assert_eq!(Pagination::first_page(10), Pagination::new(0, 10));
    }
}

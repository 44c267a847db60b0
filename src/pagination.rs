//! Common types for paging transaction data.

use serde::{Deserialize, Serialize};

/// The page size used when the caller does not specify one.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// One page of rows as returned by the expense API.
///
/// The backend has sent both `page`/`size` and `pageNumber`/`pageSize`
/// spellings for the page coordinates, so both are accepted. Missing
/// numeric fields deserialize as zero.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// The rows on this page.
    ///
    /// The path form keeps the derived impl from demanding `T: Default`.
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    /// The zero-based page number.
    #[serde(default, alias = "pageNumber")]
    pub page: u64,
    /// The page size the server applied.
    #[serde(default, alias = "pageSize")]
    pub size: u64,
    /// The total number of rows across all pages.
    #[serde(default)]
    pub total_elements: u64,
    /// The total number of pages.
    #[serde(default)]
    pub total_pages: u64,
}

/// The pagination state of a transaction list, without the rows themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    /// The zero-based page currently displayed.
    pub page: u64,
    /// The number of rows requested per page.
    pub size: u64,
    /// The total number of rows across all pages.
    pub total_elements: u64,
    /// The total number of pages.
    pub total_pages: u64,
}

impl PageInfo {
    /// An empty first page with the given page size.
    pub fn with_page_size(size: u64) -> Self {
        Self {
            page: 0,
            size,
            total_elements: 0,
            total_pages: 0,
        }
    }

    /// Whether `page` refers to a page that currently exists.
    ///
    /// Always false while no data has been loaded (`total_pages` is zero).
    pub fn contains_page(&self, page: u64) -> bool {
        page < self.total_pages
    }
}

impl Default for PageInfo {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

/// The sort directions accepted by the transaction list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortDirection {
    /// Oldest or smallest first.
    #[serde(rename = "ASC")]
    Ascending,
    /// Newest or largest first.
    #[serde(rename = "DESC")]
    Descending,
}

/// The columns the transaction list endpoints can sort by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SortField {
    /// Sort by the date the transaction occurred.
    #[serde(rename = "transactionDate")]
    TransactionDate,
    /// Sort by the transaction amount.
    #[serde(rename = "amount")]
    Amount,
}

/// Query parameters for the paged transaction endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    /// The zero-based page to fetch.
    pub page: u64,
    /// The number of rows per page.
    pub size: u64,
    /// The column to sort by.
    pub sort_by: SortField,
    /// The direction to sort in.
    pub sort_dir: SortDirection,
}

impl ListQuery {
    /// A query for `page` with the default ordering of newest first.
    pub fn for_page(page: u64, size: u64) -> Self {
        Self {
            page,
            size,
            sort_by: SortField::TransactionDate,
            sort_dir: SortDirection::Descending,
        }
    }
}

impl Default for ListQuery {
    fn default() -> Self {
        Self::for_page(0, DEFAULT_PAGE_SIZE)
    }
}
